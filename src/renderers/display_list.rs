//! Display List for rendering output
//!
//! This module defines the drawing output produced by the rendering backends.
//! The DisplayList holds fully resolved glyph codes and font families so the
//! host can draw without consulting any code table or font fallback itself.

use crate::symbols::SymbolId;
use serde::{Deserialize, Serialize};

/// Top-level display list produced by one render call
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
    /// Name of the backend that produced this list
    pub renderer: String,

    /// Drawing commands in paint order
    pub commands: Vec<DrawCommand>,
}

/// A single drawing command
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawCommand {
    Glyph(RenderGlyph),
    Text(RenderText),
}

/// A positioned music symbol glyph
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderGlyph {
    /// The symbol this glyph stands for
    pub symbol: SymbolId,

    /// Codepoint to draw in `font`
    pub codepoint: u32,

    /// Font family to draw with
    pub font: String,

    /// X position (glyph origin)
    pub x: f64,

    /// Y position (baseline)
    pub y: f64,
}

/// A positioned run of text
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RenderText {
    pub text: String,
    pub font: String,
    pub x: f64,
    pub y: f64,
}

impl DisplayList {
    pub fn new(renderer: &str) -> Self {
        Self {
            renderer: renderer.to_string(),
            commands: Vec::new(),
        }
    }

    pub fn push_glyph(&mut self, glyph: RenderGlyph) {
        self.commands.push(DrawCommand::Glyph(glyph));
    }

    pub fn push_text(&mut self, text: RenderText) {
        self.commands.push(DrawCommand::Text(text));
    }

    /// All glyph commands in paint order
    pub fn glyphs(&self) -> impl Iterator<Item = &RenderGlyph> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Glyph(g) => Some(g),
            DrawCommand::Text(_) => None,
        })
    }

    /// All text commands in paint order
    pub fn texts(&self) -> impl Iterator<Item = &RenderText> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text(t) => Some(t),
            DrawCommand::Glyph(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
