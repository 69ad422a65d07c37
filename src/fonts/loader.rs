//! Font loading seam
//!
//! Loading and measuring is delegated to a `FontLoader`. The filesystem
//! loader reads OpenType/TrueType files through `ttf-parser`; hosts with
//! their own font database (a browser, a test double) supply another.

use crate::errors::FontLoadError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Prefix of locators that point into the bundled resource tree
pub const RESOURCE_PREFIX: &str = ":/";

/// A loaded font face, as far as the engraving core needs to know it
pub trait FontFace: Send + Sync + std::fmt::Debug {
    /// Design units per em
    fn units_per_em(&self) -> u16;

    /// Horizontal advance of the glyph mapped to `codepoint`, in design units
    fn advance_width(&self, codepoint: u32) -> Option<f64>;
}

/// Materializes font faces from resource locators
pub trait FontLoader: Send + Sync {
    fn load(&self, locator: &str) -> Result<Arc<dyn FontFace>, FontLoadError>;
}

/// An OpenType or TrueType face read from a font file
///
/// The file is validated once on load; advances are looked up through the
/// `cmap` and `hmtx` tables on demand.
pub struct OpenTypeFace {
    locator: String,
    data: Vec<u8>,
    units_per_em: u16,
}

impl OpenTypeFace {
    /// Parse `data` as the first face of a font file
    pub fn from_bytes(locator: &str, data: Vec<u8>) -> Result<Self, FontLoadError> {
        let units_per_em = ttf_parser::Face::parse(&data, 0)
            .map_err(|e| FontLoadError::Malformed {
                locator: locator.to_string(),
                message: e.to_string(),
            })?
            .units_per_em();

        Ok(Self {
            locator: locator.to_string(),
            data,
            units_per_em,
        })
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }
}

impl std::fmt::Debug for OpenTypeFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenTypeFace")
            .field("locator", &self.locator)
            .field("units_per_em", &self.units_per_em)
            .field("size", &self.data.len())
            .finish()
    }
}

impl FontFace for OpenTypeFace {
    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn advance_width(&self, codepoint: u32) -> Option<f64> {
        // validated in from_bytes
        let face = ttf_parser::Face::parse(&self.data, 0).ok()?;
        let glyph = face.glyph_index(char::from_u32(codepoint)?)?;
        face.glyph_hor_advance(glyph).map(f64::from)
    }
}

/// Loads fonts from the filesystem
///
/// Resource locators (`:/fonts/...`) resolve relative to `resource_root`,
/// anything else is treated as a plain path.
#[derive(Debug, Clone)]
pub struct FileFontLoader {
    resource_root: PathBuf,
}

impl FileFontLoader {
    pub fn new<P: AsRef<Path>>(resource_root: P) -> Self {
        Self {
            resource_root: resource_root.as_ref().to_path_buf(),
        }
    }

    /// Filesystem path a locator refers to
    pub fn resolve_path(&self, locator: &str) -> PathBuf {
        match locator.strip_prefix(RESOURCE_PREFIX) {
            Some(relative) => self.resource_root.join(relative),
            None => PathBuf::from(locator),
        }
    }
}

impl FontLoader for FileFontLoader {
    fn load(&self, locator: &str) -> Result<Arc<dyn FontFace>, FontLoadError> {
        let path = self.resolve_path(locator);
        if !path.exists() {
            return Err(FontLoadError::NotFound(locator.to_string()));
        }

        let ext = path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase());
        if !matches!(ext.as_deref(), Some("otf") | Some("ttf")) {
            return Err(FontLoadError::Unsupported(locator.to_string()));
        }

        let data = std::fs::read(&path).map_err(|e| FontLoadError::Io {
            locator: locator.to_string(),
            message: e.to_string(),
        })?;

        let face = OpenTypeFace::from_bytes(locator, data)?;
        log::debug!("loaded {} ({} units per em)", locator, face.units_per_em());
        Ok(Arc::new(face))
    }
}

/// Face with a fixed advance-width table
#[derive(Debug, Clone, Default)]
pub struct StaticFontFace {
    pub units_per_em: u16,
    pub advances: HashMap<u32, f64>,
}

impl StaticFontFace {
    pub fn new(units_per_em: u16) -> Self {
        Self {
            units_per_em,
            advances: HashMap::new(),
        }
    }

    pub fn with_advance(mut self, codepoint: u32, advance: f64) -> Self {
        self.advances.insert(codepoint, advance);
        self
    }
}

impl FontFace for StaticFontFace {
    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn advance_width(&self, codepoint: u32) -> Option<f64> {
        self.advances.get(&codepoint).copied()
    }
}

/// In-memory loader serving pre-built faces by locator
#[derive(Debug, Clone, Default)]
pub struct StaticFontLoader {
    faces: HashMap<String, Arc<StaticFontFace>>,
}

impl StaticFontLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_face(mut self, locator: &str, face: StaticFontFace) -> Self {
        self.faces.insert(locator.to_string(), Arc::new(face));
        self
    }
}

impl FontLoader for StaticFontLoader {
    fn load(&self, locator: &str) -> Result<Arc<dyn FontFace>, FontLoadError> {
        self.faces
            .get(locator)
            .map(|face| face.clone() as Arc<dyn FontFace>)
            .ok_or_else(|| FontLoadError::NotFound(locator.to_string()))
    }
}
