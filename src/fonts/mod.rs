//! Fonts used by the engraver
//!
//! - `catalog`: registered music symbol fonts and the fallback designation
//! - `substitution`: one-hop family fallbacks for text and symbol fonts
//! - `loader`: the seam to whatever actually reads font files

pub mod catalog;
pub mod loader;
pub mod substitution;

pub use catalog::{EngravingFont, EngravingFontPtr, FontCatalog};
pub use loader::{FileFontLoader, FontFace, FontLoader, OpenTypeFace, StaticFontFace, StaticFontLoader};
pub use substitution::{FontNamespace, FontSubstitutions};
