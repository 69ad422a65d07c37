//! WASM API for the engraving core
//!
//! JavaScript-facing entry points over the process-wide engraving context.
//! In the browser there is no filesystem: glyph-name datasets are passed in
//! as JSON text and fonts are loaded by the page itself (CSS `@font-face`).

use wasm_bindgen::prelude::*;
use crate::bootstrap::{self, BootstrapSequencer, EngravingContext, RunMode};
use crate::config::EngravingConfiguration;
use crate::errors::{FontLoadError, UnknownFontNamespace};
use crate::fonts::{FontFace, FontLoader, FontNamespace, StaticFontFace};
use crate::symbols::{SymbolEncoding, SymbolId};
use std::sync::Arc;

/// Fonts are owned by the page; every locator yields a face without metrics
struct HostFontLoader;

impl FontLoader for HostFontLoader {
    fn load(&self, _locator: &str) -> Result<Arc<dyn FontFace>, FontLoadError> {
        Ok(Arc::new(StaticFontFace::new(1000)))
    }
}

/// Codes of one symbol in every encoding, as handed to JavaScript
#[derive(serde::Serialize)]
struct SymbolCodeInfo {
    name: &'static str,
    smufl: u32,
    smufl_alternate: u32,
    jianpu: u32,
    music_sym_block: u32,
}

fn context() -> Result<&'static EngravingContext, JsValue> {
    bootstrap::global().ok_or_else(|| JsValue::from_str("Engraving is not initialized"))
}

fn symbol_by_name(name: &str) -> Result<SymbolId, JsValue> {
    SymbolId::from_name(name)
        .filter(|id| !id.is_sentinel())
        .ok_or_else(|| JsValue::from_str(&format!("Unknown symbol: {}", name)))
}

/// Bootstrap the engraving core
///
/// # Parameters
/// - `smufl_json`: SMuFL glyph-name dataset
/// - `jianpu_json`: Jianpu glyph-name dataset
/// - `config_yaml`: optional configuration overriding the defaults
#[wasm_bindgen(js_name = initEngraving)]
pub fn init_engraving(
    smufl_json: String,
    jianpu_json: String,
    config_yaml: Option<String>,
) -> Result<(), JsValue> {
    let config = match config_yaml {
        Some(yaml) => EngravingConfiguration::from_yaml_str(&yaml)
            .map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => EngravingConfiguration::default(),
    };

    let sequencer = BootstrapSequencer::new(config)
        .with_font_loader(Arc::new(HostFontLoader))
        .with_glyphnames_json(SymbolEncoding::Smufl, smufl_json)
        .with_glyphnames_json(SymbolEncoding::Jianpu, jianpu_json);

    bootstrap::init_global(sequencer, RunMode::GuiApp).map_err(|e| {
        log::error!("engraving bootstrap failed: {}", e);
        JsValue::from_str(&e.to_string())
    })?;
    Ok(())
}

/// Codes of a symbol by canonical name
///
/// Returns `{ name, smufl, smufl_alternate, jianpu, music_sym_block }`,
/// with 0 for every code the datasets do not define.
#[wasm_bindgen(js_name = getSymbolCode)]
pub fn get_symbol_code(name: &str) -> Result<JsValue, JsValue> {
    let ctx = context()?;
    let id = symbol_by_name(name)?;

    let smufl = ctx.codes().smufl_code(id);
    let jianpu = ctx.codes().code(id);
    let info = SymbolCodeInfo {
        name: id.name(),
        smufl: smufl.primary,
        smufl_alternate: smufl.secondary,
        jianpu: jianpu.primary,
        music_sym_block: jianpu.secondary,
    };

    serde_wasm_bindgen::to_value(&info)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// One-hop font substitution; `namespace` is "text" or "music_symbol"
#[wasm_bindgen(js_name = resolveFontSubstitution)]
pub fn resolve_font_substitution(name: &str, namespace: &str) -> Result<String, JsValue> {
    let ctx = context()?;
    let namespace: FontNamespace = namespace
        .parse()
        .map_err(|e: UnknownFontNamespace| JsValue::from_str(&e.to_string()))?;
    Ok(ctx.resolve_font(name, namespace))
}

/// Display list for a single symbol, as drawn in palettes
#[wasm_bindgen(js_name = renderSymbol)]
pub fn render_symbol(name: &str) -> Result<JsValue, JsValue> {
    let ctx = context()?;
    let id = symbol_by_name(name)?;
    serde_wasm_bindgen::to_value(&ctx.render_symbol(id))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Default notehead width primed at bootstrap
#[wasm_bindgen(js_name = getDefaultNoteHeadWidth)]
pub fn get_default_note_head_width() -> Result<f64, JsValue> {
    Ok(context()?.note_head_width())
}
