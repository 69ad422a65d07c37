//! Dev score renderer
//!
//! Current working version. Symbols missing from the SMuFL table fall back
//! to their legacy music-symbol block code, drawn in the substituted symbol
//! font. Text families go through the text substitution graph.

use super::{DisplayList, RenderContext, RenderGlyph, RenderText, ScoreRenderer, ScoreView};
use crate::fonts::FontNamespace;
use crate::symbols::SymbolId;

#[derive(Debug, Default)]
pub struct DevScoreRenderer;

impl DevScoreRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Codepoint and family for `symbol`, or `None` when no table knows it
    fn resolve_glyph(symbol: SymbolId, ctx: &RenderContext<'_>) -> Option<(u32, String)> {
        let smufl = ctx.codes.smufl_code(symbol);
        if smufl.primary != 0 {
            return Some((smufl.primary, ctx.score_font.to_string()));
        }

        let block = match ctx.codes.code(symbol).secondary {
            0 => smufl.secondary,
            code => code,
        };
        if block == 0 {
            return None;
        }
        let fallback = ctx.substitutions.resolve(ctx.score_font, FontNamespace::MusicSymbol);
        Some((block, fallback))
    }
}

impl ScoreRenderer for DevScoreRenderer {
    fn name(&self) -> &'static str {
        "dev"
    }

    fn render(&self, score: &ScoreView, ctx: &RenderContext<'_>) -> DisplayList {
        let mut list = DisplayList::new(self.name());

        for placed in &score.symbols {
            match Self::resolve_glyph(placed.symbol, ctx) {
                Some((codepoint, font)) => list.push_glyph(RenderGlyph {
                    symbol: placed.symbol,
                    codepoint,
                    font,
                    x: placed.x,
                    y: placed.y,
                }),
                None => log::debug!("dev renderer: no glyph for {}", placed.symbol),
            }
        }

        for text in &score.texts {
            list.push_text(RenderText {
                text: text.text.clone(),
                font: ctx.substitutions.resolve(&text.family, FontNamespace::Text),
                x: text.x,
                y: text.y,
            });
        }

        list
    }
}
