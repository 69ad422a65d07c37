//! Engraving font catalog
//!
//! Registry of the music symbol fonts known to the engraver. Fonts are
//! registered by public name and materialized through the `FontLoader`,
//! either on first use or all at once via `load_all_fonts`.

use super::loader::{FontFace, FontLoader};
use crate::errors::FontLoadError;
use crate::symbols::{SymbolCodes, SymbolId};
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Staff spaces per em in SMuFL fonts
pub const STAFF_SPACES_PER_EM: f64 = 4.0;

/// Shared handle to a registered engraving font
pub type EngravingFontPtr = Arc<EngravingFont>;

/// A registered, lazily loadable music symbol font
pub struct EngravingFont {
    name: String,
    family: String,
    locator: String,
    loader: Arc<dyn FontLoader>,
    /// `Some(None)` records a failed load; it is not retried
    face: OnceCell<Option<Arc<dyn FontFace>>>,
}

impl std::fmt::Debug for EngravingFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngravingFont")
            .field("name", &self.name)
            .field("family", &self.family)
            .field("locator", &self.locator)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl EngravingFont {
    /// Public name, as shown to users and stored in styles
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Internal family name of the font file
    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Whether the face has been materialized successfully
    pub fn is_loaded(&self) -> bool {
        matches!(self.face.get(), Some(Some(_)))
    }

    /// Whether a load was attempted and failed
    pub fn load_failed(&self) -> bool {
        matches!(self.face.get(), Some(None))
    }

    /// Load the face if no attempt was made yet
    ///
    /// The outcome of the first attempt is kept, including failures.
    pub fn ensure_loaded(&self) -> Result<Arc<dyn FontFace>, FontLoadError> {
        let mut error = None;
        let face = self.face.get_or_init(|| match self.loader.load(&self.locator) {
            Ok(face) => {
                log::debug!("loaded engraving font '{}' from {}", self.name, self.locator);
                Some(face)
            }
            Err(e) => {
                error = Some(e);
                None
            }
        });

        match (face, error) {
            (Some(face), _) => Ok(face.clone()),
            (None, Some(e)) => Err(e),
            (None, None) => Err(FontLoadError::NotFound(self.locator.clone())),
        }
    }

    /// The loaded face, loading it on first use
    pub fn face(&self) -> Option<Arc<dyn FontFace>> {
        self.ensure_loaded().ok()
    }

    /// Advance width of `id` at the given spatium, in the same units as `spatium`
    ///
    /// `None` when the font is not loadable, the symbol has no SMuFL code,
    /// or the face has no metrics for it.
    pub fn width(&self, id: SymbolId, spatium: f64, codes: &SymbolCodes) -> Option<f64> {
        let face = self.face()?;
        let code = codes.smufl_code(id);
        if code.primary == 0 {
            return None;
        }
        let upem = f64::from(face.units_per_em().max(1));
        let advance = face.advance_width(code.primary)?;
        Some(advance / upem * STAFF_SPACES_PER_EM * spatium)
    }
}

/// Catalog of engraving fonts plus the catalog-wide fallback designation
pub struct FontCatalog {
    loader: Arc<dyn FontLoader>,
    fonts: Vec<EngravingFontPtr>,
    fallback: Option<String>,
    text_fonts: Vec<String>,
}

impl std::fmt::Debug for FontCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontCatalog")
            .field("fonts", &self.fonts)
            .field("fallback", &self.fallback)
            .field("text_fonts", &self.text_fonts)
            .finish()
    }
}

impl FontCatalog {
    pub fn new(loader: Arc<dyn FontLoader>) -> Self {
        Self {
            loader,
            fonts: Vec::new(),
            fallback: None,
            text_fonts: Vec::new(),
        }
    }

    /// Register a font; a second registration under the same public name
    /// replaces the first
    pub fn add_font(&mut self, name: &str, family: &str, locator: &str) {
        let font = Arc::new(EngravingFont {
            name: name.to_string(),
            family: family.to_string(),
            locator: locator.to_string(),
            loader: self.loader.clone(),
            face: OnceCell::new(),
        });

        match self.fonts.iter_mut().find(|f| f.name == name) {
            Some(existing) => {
                log::debug!("engraving font '{}' re-registered with {}", name, locator);
                *existing = font;
            }
            None => self.fonts.push(font),
        }
    }

    /// Designate the catalog-wide fallback font
    ///
    /// The designation is recorded even when `name` is not (yet) registered;
    /// that case is logged as an error.
    pub fn set_fallback_font(&mut self, name: &str) {
        if self.font_by_name(name).is_none() {
            log::error!("fallback font '{}' is not a registered engraving font", name);
        }
        self.fallback = Some(name.to_string());
    }

    /// Name of the designated fallback font, if any
    pub fn fallback_font_name(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    /// The designated fallback font, if it is registered
    pub fn fallback_font(&self) -> Option<EngravingFontPtr> {
        self.fallback.as_deref().and_then(|name| self.font_by_name(name))
    }

    /// Registered font by public name; no fallback substitution happens here
    pub fn font_by_name(&self, name: &str) -> Option<EngravingFontPtr> {
        self.fonts.iter().find(|f| f.name == name).cloned()
    }

    /// All registered fonts in registration order
    pub fn fonts(&self) -> &[EngravingFontPtr] {
        &self.fonts
    }

    /// Eagerly load every registered font
    ///
    /// Failures are logged and skipped. Returns the number of fonts that are
    /// loaded afterwards.
    pub fn load_all_fonts(&self) -> usize {
        let mut loaded = 0;
        for font in &self.fonts {
            match font.ensure_loaded() {
                Ok(_) => loaded += 1,
                Err(e) => log::error!("failed to load engraving font '{}': {}", font.name, e),
            }
        }
        log::info!("loaded {} of {} engraving fonts", loaded, self.fonts.len());
        loaded
    }

    /// Load a text font through the catalog's loader
    ///
    /// Text fonts are only made known to the font backend; they are not
    /// addressable through `font_by_name`.
    pub fn add_text_font(&mut self, locator: &str) -> Result<(), FontLoadError> {
        match self.loader.load(locator) {
            Ok(_) => {
                self.text_fonts.push(locator.to_string());
                Ok(())
            }
            Err(e) => {
                log::error!("Fatal error: cannot load internal font {}: {}", locator, e);
                Err(e)
            }
        }
    }

    /// Locators of the text fonts that loaded successfully
    pub fn text_fonts(&self) -> &[String] {
        &self.text_fonts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::loader::{StaticFontFace, StaticFontLoader};
    use crate::symbols::{SymbolCodeTable, SymbolEncoding};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn loader() -> Arc<dyn FontLoader> {
        Arc::new(
            StaticFontLoader::new()
                .with_face("mem:leland", StaticFontFace::new(1000).with_advance(0xE0A4, 295.0))
                .with_face("mem:bravura", StaticFontFace::new(1000))
                .with_face("mem:edwin", StaticFontFace::new(2048)),
        )
    }

    #[test]
    fn test_font_by_name_does_not_substitute() {
        let mut catalog = FontCatalog::new(loader());
        catalog.add_font("Leland", "Leland", "mem:leland");
        catalog.set_fallback_font("Leland");

        assert!(catalog.font_by_name("Leland").is_some());
        assert!(catalog.font_by_name("Petaluma").is_none());
    }

    #[test]
    fn test_fallback_designation_is_recorded_optimistically() {
        let mut catalog = FontCatalog::new(loader());
        catalog.set_fallback_font("Bravura");

        assert_eq!(catalog.fallback_font_name(), Some("Bravura"));
        assert!(catalog.fallback_font().is_none());

        catalog.add_font("Bravura", "Bravura", "mem:bravura");
        assert_eq!(catalog.fallback_font().unwrap().name(), "Bravura");
    }

    #[test]
    fn test_duplicate_registration_overwrites() {
        let mut catalog = FontCatalog::new(loader());
        catalog.add_font("Leland", "Leland", "mem:missing");
        catalog.add_font("Leland", "Leland", "mem:leland");

        assert_eq!(catalog.fonts().len(), 1);
        assert_eq!(catalog.font_by_name("Leland").unwrap().locator(), "mem:leland");
    }

    #[test]
    fn test_load_all_fonts_skips_failures() {
        let mut catalog = FontCatalog::new(loader());
        catalog.add_font("Leland", "Leland", "mem:leland");
        catalog.add_font("Gonville", "Gootville", "mem:gootville");
        catalog.add_font("Bravura", "Bravura", "mem:bravura");

        assert_eq!(catalog.load_all_fonts(), 2);
        assert!(catalog.font_by_name("Leland").unwrap().is_loaded());
        assert!(catalog.font_by_name("Gonville").unwrap().load_failed());
        assert!(catalog.font_by_name("Bravura").unwrap().is_loaded());
    }

    struct CountingLoader(AtomicUsize);

    impl FontLoader for CountingLoader {
        fn load(&self, locator: &str) -> Result<Arc<dyn FontFace>, FontLoadError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(FontLoadError::NotFound(locator.to_string()))
        }
    }

    #[test]
    fn test_failed_load_is_not_retried() {
        let counter = Arc::new(CountingLoader(AtomicUsize::new(0)));
        let mut catalog = FontCatalog::new(counter.clone());
        catalog.add_font("Petaluma", "Petaluma", "mem:petaluma");

        catalog.load_all_fonts();
        catalog.load_all_fonts();
        assert!(catalog.font_by_name("Petaluma").unwrap().face().is_none());
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_width_uses_smufl_code() {
        let smufl = SymbolCodeTable::from_json_str(
            SymbolEncoding::Smufl,
            r#"{ "noteheadBlack": { "codepoint": "U+E0A4" } }"#,
            false,
        )
        .unwrap();
        let codes = SymbolCodes::new(smufl, SymbolCodeTable::empty(SymbolEncoding::Jianpu));

        let mut catalog = FontCatalog::new(loader());
        catalog.add_font("Leland", "Leland", "mem:leland");
        let leland = catalog.font_by_name("Leland").unwrap();

        // 295 units at 1000 upem = 1.18 staff spaces
        let width = leland.width(SymbolId::NoteheadBlack, 25.0, &codes).unwrap();
        assert!((width - 29.5).abs() < 1e-9);

        assert_eq!(leland.width(SymbolId::GClef, 25.0, &codes), None);
    }

    #[test]
    fn test_text_fonts() {
        let mut catalog = FontCatalog::new(loader());
        assert!(catalog.add_text_font("mem:edwin").is_ok());
        assert!(catalog.add_text_font("mem:freeserif").is_err());
        assert_eq!(catalog.text_fonts(), &["mem:edwin".to_string()]);
    }
}
