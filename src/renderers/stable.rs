//! Stable score renderer
//!
//! Frozen version, do not modify. Draws SMuFL codes only and keeps requested
//! text families as they are.

use super::{DisplayList, RenderContext, RenderGlyph, RenderText, ScoreRenderer, ScoreView};

#[derive(Debug, Default)]
pub struct StableScoreRenderer;

impl StableScoreRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ScoreRenderer for StableScoreRenderer {
    fn name(&self) -> &'static str {
        "stable"
    }

    fn render(&self, score: &ScoreView, ctx: &RenderContext<'_>) -> DisplayList {
        let mut list = DisplayList::new(self.name());

        for placed in &score.symbols {
            let code = ctx.codes.smufl_code(placed.symbol);
            if code.primary == 0 {
                continue;
            }
            list.push_glyph(RenderGlyph {
                symbol: placed.symbol,
                codepoint: code.primary,
                font: ctx.score_font.to_string(),
                x: placed.x,
                y: placed.y,
            });
        }

        for text in &score.texts {
            list.push_text(RenderText {
                text: text.text.clone(),
                font: text.family.clone(),
                x: text.x,
                y: text.y,
            });
        }

        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::{FontNamespace, FontSubstitutions};
    use crate::renderers::{PlacedSymbol, PlacedText};
    use crate::symbols::{SymbolCodeTable, SymbolCodes, SymbolEncoding, SymbolId};

    #[test]
    fn test_draws_smufl_codes_only() {
        let smufl = SymbolCodeTable::from_json_str(
            SymbolEncoding::Smufl,
            r#"{
                "gClef": { "codepoint": "U+E050" },
                "coda": { "alternateCodepoint": "U+1D10C" }
            }"#,
            false,
        )
        .unwrap();
        let jianpu = SymbolCodeTable::from_json_str(
            SymbolEncoding::Jianpu,
            r#"{ "augmentationDot": { "codepoint": "U+E1E7", "alternateCodepoint": "U+1D16D" } }"#,
            false,
        )
        .unwrap();
        let codes = SymbolCodes::new(smufl, jianpu);
        let mut subs = FontSubstitutions::new();
        subs.insert_substitution(FontNamespace::MusicSymbol, "Leland", "Bravura");
        subs.insert_substitution(FontNamespace::Text, "ScoreFont", "Leland Text");
        let ctx = RenderContext { codes: &codes, substitutions: &subs, score_font: "Leland" };

        let view = ScoreView {
            symbols: vec![
                PlacedSymbol { symbol: SymbolId::GClef, x: 0.0, y: 0.0 },
                PlacedSymbol { symbol: SymbolId::AugmentationDot, x: 10.0, y: 0.0 },
                PlacedSymbol { symbol: SymbolId::Coda, x: 20.0, y: 0.0 },
            ],
            texts: vec![PlacedText {
                text: "Allegro".to_string(),
                family: "ScoreFont".to_string(),
                x: 0.0,
                y: -20.0,
            }],
        };
        let list = StableScoreRenderer::new().render(&view, &ctx);

        let glyphs: Vec<_> = list.glyphs().collect();
        assert_eq!(glyphs.len(), 1);
        assert_eq!(glyphs[0].codepoint, 0xE050);
        assert_eq!(glyphs[0].font, "Leland");

        // requested family kept as is
        assert_eq!(list.texts().next().unwrap().font, "ScoreFont");
        assert_eq!(list.renderer, "stable");
    }
}
