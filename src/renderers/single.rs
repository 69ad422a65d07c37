//! Single element renderer, used for palette cells and previews

use super::{DisplayList, RenderContext, RenderGlyph, SingleRenderer};
use crate::symbols::SymbolId;

#[derive(Debug, Default)]
pub struct SingleElementRenderer;

impl SingleElementRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl SingleRenderer for SingleElementRenderer {
    fn name(&self) -> &'static str {
        "single"
    }

    fn render_item(&self, symbol: SymbolId, ctx: &RenderContext<'_>) -> DisplayList {
        let mut list = DisplayList::new(self.name());

        let code = ctx.codes.smufl_code(symbol);
        let codepoint = if code.primary != 0 { code.primary } else { code.secondary };
        if codepoint != 0 {
            list.push_glyph(RenderGlyph {
                symbol,
                codepoint,
                font: ctx.score_font.to_string(),
                x: 0.0,
                y: 0.0,
            });
        }

        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FontSubstitutions;
    use crate::symbols::{SymbolCodeTable, SymbolCodes, SymbolEncoding};

    #[test]
    fn test_renders_one_glyph_at_origin() {
        let smufl = SymbolCodeTable::from_json_str(
            SymbolEncoding::Smufl,
            r#"{
                "accidentalSharp": { "codepoint": "U+E262", "alternateCodepoint": "U+266F" },
                "coda": { "alternateCodepoint": "U+1D10C" }
            }"#,
            false,
        )
        .unwrap();
        let codes = SymbolCodes::new(smufl, SymbolCodeTable::empty(SymbolEncoding::Jianpu));
        let subs = FontSubstitutions::new();
        let ctx = RenderContext { codes: &codes, substitutions: &subs, score_font: "Bravura" };
        let renderer = SingleElementRenderer::new();

        let sharp = renderer.render_item(SymbolId::AccidentalSharp, &ctx);
        let glyphs: Vec<_> = sharp.glyphs().collect();
        assert_eq!(glyphs.len(), 1);
        assert_eq!((glyphs[0].codepoint, glyphs[0].x, glyphs[0].y), (0xE262, 0.0, 0.0));
        assert_eq!(glyphs[0].font, "Bravura");

        let coda = renderer.render_item(SymbolId::Coda, &ctx);
        assert_eq!(coda.glyphs().next().unwrap().codepoint, 0x1D10C);

        assert!(renderer.render_item(SymbolId::RestQuarter, &ctx).is_empty());
    }
}
