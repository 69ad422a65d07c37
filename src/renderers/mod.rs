//! Rendering backends
//!
//! The layout algorithm lives outside this crate. What lives here is the
//! narrow interface the document side renders through, the interchangeable
//! implementations of it, and the registry that binds one implementation to
//! each rendering capability.

pub mod dev;
pub mod display_list;
pub mod registry;
pub mod single;
pub mod stable;

pub use display_list::{DisplayList, DrawCommand, RenderGlyph, RenderText};
pub use registry::{RenderingBackend, RenderingBackendRegistry};

use crate::fonts::FontSubstitutions;
use crate::symbols::{SymbolCodes, SymbolId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A rendering responsibility bound to exactly one implementation
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde_repr::Serialize_repr, serde_repr::Deserialize_repr)]
pub enum RenderingCapability {
    /// Full score rendering (`ScoreRenderer`)
    FullScoreRender = 0,

    /// Single element rendering for palettes and previews (`SingleRenderer`)
    SingleElementRender = 1,
}

impl RenderingCapability {
    pub const ALL: [RenderingCapability; 2] = [
        RenderingCapability::FullScoreRender,
        RenderingCapability::SingleElementRender,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RenderingCapability::FullScoreRender => "full_score_render",
            RenderingCapability::SingleElementRender => "single_element_render",
        }
    }
}

impl std::fmt::Display for RenderingCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which full-score renderer to run
///
/// `Dev` is the working version; `Stable` is frozen and kept for comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererVariant {
    #[default]
    Dev,
    Stable,
}

impl RendererVariant {
    /// Construct the full-score renderer for this variant
    pub fn create_score_renderer(self) -> Arc<dyn ScoreRenderer> {
        match self {
            RendererVariant::Dev => Arc::new(dev::DevScoreRenderer::new()),
            RendererVariant::Stable => Arc::new(stable::StableScoreRenderer::new()),
        }
    }
}

/// A music symbol placed by the layout
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PlacedSymbol {
    pub symbol: SymbolId,
    pub x: f64,
    pub y: f64,
}

/// A text item placed by the layout
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PlacedText {
    pub text: String,
    /// Requested family; may be substituted at render time
    pub family: String,
    pub x: f64,
    pub y: f64,
}

/// Laid-out score content handed to a `ScoreRenderer`
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ScoreView {
    pub symbols: Vec<PlacedSymbol>,
    pub texts: Vec<PlacedText>,
}

/// Read-only lookups a renderer needs to resolve glyphs and fonts
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub codes: &'a SymbolCodes,
    pub substitutions: &'a FontSubstitutions,
    /// Family of the score's music symbol font
    pub score_font: &'a str,
}

/// Renders a whole laid-out score
pub trait ScoreRenderer: Send + Sync {
    fn name(&self) -> &'static str;

    fn render(&self, score: &ScoreView, ctx: &RenderContext<'_>) -> DisplayList;
}

/// Renders one element on its own, at the origin
pub trait SingleRenderer: Send + Sync {
    fn name(&self) -> &'static str;

    fn render_item(&self, symbol: SymbolId, ctx: &RenderContext<'_>) -> DisplayList;
}
