//! Music Engraving Core
//!
//! Resolves abstract music symbols into concrete glyph codes across the
//! SMuFL and Jianpu font encodings, keeps the font catalog and family
//! fallbacks, and binds the rendering backends the document side draws with.

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod dom;
pub mod errors;
pub mod fonts;
pub mod renderers;
pub mod symbols;

// Re-export commonly used types
pub use bootstrap::{BootstrapSequencer, EngravingContext, RunMode};
pub use config::EngravingConfiguration;
pub use errors::*;
pub use fonts::{FontCatalog, FontNamespace, FontSubstitutions};
pub use renderers::{RendererVariant, RenderingBackendRegistry, RenderingCapability};
pub use symbols::{GlyphCode, SymbolCodeTable, SymbolCodes, SymbolEncoding, SymbolId};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(all(target_arch = "wasm32", feature = "console_log"))]
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("Music engraving WASM module initialized");
}
