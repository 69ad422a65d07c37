//! Glyph-name dataset parser
//!
//! Reads the glyph-name JSON datasets that ship next to each symbol font.
//! The document maps canonical symbol names to objects with `codepoint` and
//! optional `alternateCodepoint` fields, each written as a two-character
//! prefix followed by hexadecimal digits (e.g. `"U+E1D1"`).
//!
//! Only the document as a whole can fail to load. Individual entries are
//! kept as raw JSON values so a malformed entry never poisons the batch.

use crate::errors::DatasetError;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Field holding the primary codepoint of an entry
pub const CODEPOINT_FIELD: &str = "codepoint";

/// Field holding the secondary (alternate) codepoint of an entry
pub const ALTERNATE_CODEPOINT_FIELD: &str = "alternateCodepoint";

/// Parsed glyph-name dataset, keyed by canonical symbol name
#[derive(Debug, Clone, Default)]
pub struct GlyphNames {
    entries: Map<String, Value>,
}

impl GlyphNames {
    /// Number of top-level entries in the dataset
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw codepoint strings for `name`, or `None` when the dataset has no
    /// object for that name
    pub fn entry(&self, name: &str) -> Option<GlyphNameEntry<'_>> {
        let obj = self.entries.get(name)?.as_object()?;
        Some(GlyphNameEntry {
            codepoint: obj.get(CODEPOINT_FIELD).and_then(Value::as_str),
            alternate_codepoint: obj.get(ALTERNATE_CODEPOINT_FIELD).and_then(Value::as_str),
        })
    }
}

/// Codepoint strings of a single dataset entry, as written in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphNameEntry<'a> {
    pub codepoint: Option<&'a str>,
    pub alternate_codepoint: Option<&'a str>,
}

/// Read and parse a glyph-name dataset from disk
pub fn parse_glyphnames_file(path: &Path) -> Result<GlyphNames, DatasetError> {
    let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let names = parse_glyphnames_str(&content)?;
    if names.is_empty() {
        return Err(DatasetError::Empty(path.display().to_string()));
    }
    Ok(names)
}

/// Parse a glyph-name dataset from a JSON string
///
/// The root must be a JSON object. An empty object parses successfully; the
/// file loader rejects it since a shipped dataset is never empty.
pub fn parse_glyphnames_str(content: &str) -> Result<GlyphNames, DatasetError> {
    let root: Value =
        serde_json::from_str(content).map_err(|e| DatasetError::Parse(e.to_string()))?;

    match root {
        Value::Object(entries) => Ok(GlyphNames { entries }),
        _ => Err(DatasetError::NotAnObject),
    }
}

/// Parse a prefixed hexadecimal codepoint such as `"U+E1D1"`
///
/// The first two characters are dropped whatever they are. Returns `None`
/// unless what remains is one or more hex digits fitting in 32 bits; a
/// sign such as `"U++E1D1"` is rejected.
pub fn parse_codepoint(value: &str) -> Option<u32> {
    let digits: String = value.chars().skip(2).collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(&digits, 16).ok()
}
