//! Symbol code tables
//!
//! A `SymbolCodeTable` translates `SymbolId`s into the numeric glyph codes of
//! one font encoding. Tables are filled once from a glyph-name dataset and
//! are read-only afterwards, so they can be shared freely between threads.

use super::glyphnames::{self, GlyphNames};
use super::SymbolId;
use crate::errors::DatasetError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Glyph numbering scheme a table was loaded for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolEncoding {
    /// SMuFL music-symbol fonts (primary: SMuFL codepoint, secondary: legacy block)
    Smufl,
    /// Jianpu numeral notation font (primary: Jianpu code, secondary: music-symbol block)
    Jianpu,
}

impl SymbolEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolEncoding::Smufl => "smufl",
            SymbolEncoding::Jianpu => "jianpu",
        }
    }
}

impl std::fmt::Display for SymbolEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete codes a font uses for one symbol. Zero means absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlyphCode {
    /// Code in the encoding's own numbering
    pub primary: u32,
    /// Code in the legacy music-symbol block
    pub secondary: u32,
}

impl GlyphCode {
    pub const fn new(primary: u32, secondary: u32) -> Self {
        Self { primary, secondary }
    }

    pub fn is_valid(&self) -> bool {
        self.primary != 0 || self.secondary != 0
    }

    /// Primary code as a `char`, if present and a valid scalar value
    pub fn primary_char(&self) -> Option<char> {
        (self.primary != 0).then(|| char::from_u32(self.primary)).flatten()
    }

    /// Secondary code as a `char`, if present and a valid scalar value
    pub fn secondary_char(&self) -> Option<char> {
        (self.secondary != 0).then(|| char::from_u32(self.secondary)).flatten()
    }
}

/// Mapping from `SymbolId` to `GlyphCode` for one encoding
#[derive(Debug, Clone)]
pub struct SymbolCodeTable {
    encoding: SymbolEncoding,
    codes: HashMap<SymbolId, GlyphCode>,
}

impl SymbolCodeTable {
    /// An empty table: every lookup yields `GlyphCode::default()`
    pub fn empty(encoding: SymbolEncoding) -> Self {
        Self {
            encoding,
            codes: HashMap::new(),
        }
    }

    /// Load a table from a glyph-name dataset on disk
    ///
    /// Failing to read or parse the file is an error. Entries that are
    /// missing or carry unparsable codepoints are not.
    pub fn load(encoding: SymbolEncoding, path: &Path, debug_mode: bool) -> Result<Self, DatasetError> {
        let names = glyphnames::parse_glyphnames_file(path).map_err(|e| {
            log::error!("could not load {} glyph names from {}: {}", encoding, path.display(), e);
            e
        })?;
        Ok(Self::from_glyph_names(encoding, &names, debug_mode))
    }

    /// Build a table from a glyph-name dataset held in memory
    ///
    /// An empty document is rejected like an empty file.
    pub fn from_json_str(encoding: SymbolEncoding, content: &str, debug_mode: bool) -> Result<Self, DatasetError> {
        let names = glyphnames::parse_glyphnames_str(content)?;
        if names.is_empty() {
            return Err(DatasetError::Empty(format!("<inline {} dataset>", encoding)));
        }
        Ok(Self::from_glyph_names(encoding, &names, debug_mode))
    }

    /// Build a table from an already parsed dataset
    ///
    /// Every non-sentinel `SymbolId` is looked up by its canonical name.
    /// With `debug_mode` set, unreadable codepoints are reported at debug level.
    pub fn from_glyph_names(encoding: SymbolEncoding, names: &GlyphNames, debug_mode: bool) -> Self {
        let mut codes = HashMap::new();

        for id in SymbolId::valid() {
            let Some(entry) = names.entry(id.name()) else {
                continue;
            };

            let mut code = GlyphCode::default();

            match entry.codepoint.and_then(glyphnames::parse_codepoint) {
                Some(cp) => code.primary = cp,
                None if debug_mode => {
                    log::debug!("could not read codepoint for glyph {}", id.name());
                }
                None => {}
            }

            match entry.alternate_codepoint.and_then(glyphnames::parse_codepoint) {
                Some(cp) => code.secondary = cp,
                None if debug_mode => {
                    log::debug!("could not read alternate codepoint for glyph {}", id.name());
                }
                None => {}
            }

            if code.is_valid() {
                codes.insert(id, code);
            }
        }

        log::debug!("{} symbol table: {} of {} symbols have codes",
            encoding, codes.len(), SymbolId::ALL.len() - 2);

        Self { encoding, codes }
    }

    pub fn encoding(&self) -> SymbolEncoding {
        self.encoding
    }

    /// Codes for `id`; `(0, 0)` for sentinels and symbols without a dataset entry
    pub fn code(&self, id: SymbolId) -> GlyphCode {
        if id.is_sentinel() {
            return GlyphCode::default();
        }
        self.codes.get(&id).copied().unwrap_or_default()
    }

    /// Primary code for `id`, 0 when absent
    pub fn primary_code(&self, id: SymbolId) -> u32 {
        self.code(id).primary
    }

    /// Number of symbols that received a valid code
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// The code tables of every supported encoding, loaded together at bootstrap
#[derive(Debug, Clone)]
pub struct SymbolCodes {
    smufl: SymbolCodeTable,
    jianpu: SymbolCodeTable,
}

impl SymbolCodes {
    pub fn new(smufl: SymbolCodeTable, jianpu: SymbolCodeTable) -> Self {
        debug_assert_eq!(smufl.encoding(), SymbolEncoding::Smufl);
        debug_assert_eq!(jianpu.encoding(), SymbolEncoding::Jianpu);
        Self { smufl, jianpu }
    }

    pub fn table(&self, encoding: SymbolEncoding) -> &SymbolCodeTable {
        match encoding {
            SymbolEncoding::Smufl => &self.smufl,
            SymbolEncoding::Jianpu => &self.jianpu,
        }
    }

    /// SMuFL codes for `id`
    pub fn smufl_code(&self, id: SymbolId) -> GlyphCode {
        self.smufl.code(id)
    }

    /// Jianpu code pair (Jianpu code, music-symbol block code) for `id`
    pub fn code(&self, id: SymbolId) -> GlyphCode {
        self.jianpu.code(id)
    }

    /// Jianpu code for `id`, 0 when absent
    pub fn jianpu_code(&self, id: SymbolId) -> u32 {
        self.jianpu.primary_code(id)
    }
}
