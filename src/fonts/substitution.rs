//! Font family substitution
//!
//! One-hop redirects from a requested family to its fallback, kept in two
//! independent namespaces. Resolution never follows chains; callers that
//! want multi-hop fallback re-query and bound the hop count themselves.

use crate::errors::UnknownFontNamespace;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Which kind of font a substitution applies to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontNamespace {
    /// Text fonts (lyrics, titles, musical text fonts)
    Text,
    /// Music symbol fonts
    MusicSymbol,
}

impl FontNamespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontNamespace::Text => "text",
            FontNamespace::MusicSymbol => "music_symbol",
        }
    }
}

impl FromStr for FontNamespace {
    type Err = UnknownFontNamespace;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(FontNamespace::Text),
            "music_symbol" | "musicSymbol" | "music" => Ok(FontNamespace::MusicSymbol),
            _ => Err(UnknownFontNamespace(s.to_string())),
        }
    }
}

/// Normalize a family name for use as a substitution key
///
/// Surrounding whitespace is dropped and inner runs collapse to one space.
/// Case is preserved: family names are case-sensitive for the font database.
pub fn normalize_family(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Family-name fallback edges for text and music-symbol fonts
#[derive(Debug, Clone, Default)]
pub struct FontSubstitutions {
    text: HashMap<String, String>,
    music_symbol: HashMap<String, String>,
}

impl FontSubstitutions {
    pub fn new() -> Self {
        Self::default()
    }

    fn edges(&self, namespace: FontNamespace) -> &HashMap<String, String> {
        match namespace {
            FontNamespace::Text => &self.text,
            FontNamespace::MusicSymbol => &self.music_symbol,
        }
    }

    /// Register `from -> to` in `namespace`; a later registration for the
    /// same `from` replaces the earlier one
    pub fn insert_substitution(&mut self, namespace: FontNamespace, from: &str, to: &str) {
        let edges = match namespace {
            FontNamespace::Text => &mut self.text,
            FontNamespace::MusicSymbol => &mut self.music_symbol,
        };
        if let Some(previous) = edges.insert(normalize_family(from), normalize_family(to)) {
            log::debug!("{} substitution for '{}' replaced (was '{}')", namespace.as_str(), from, previous);
        }
    }

    /// The registered fallback for `name`, or `name` unchanged
    ///
    /// Lookup uses the normalized family; a miss hands back the input as given.
    pub fn resolve(&self, name: &str, namespace: FontNamespace) -> String {
        match self.edges(namespace).get(&normalize_family(name)) {
            Some(to) => to.clone(),
            None => name.to_string(),
        }
    }

    /// Whether `name` has a registered fallback in `namespace`
    pub fn has_substitution(&self, name: &str, namespace: FontNamespace) -> bool {
        self.edges(namespace).contains_key(&normalize_family(name))
    }

    /// Number of edges in `namespace`
    pub fn len(&self, namespace: FontNamespace) -> usize {
        self.edges(namespace).len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.music_symbol.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_one_hop() {
        let mut subs = FontSubstitutions::new();
        subs.insert_substitution(FontNamespace::Text, "Petaluma Text", "MuseJazz Text");
        subs.insert_substitution(FontNamespace::Text, "MuseJazz Text", "Leland Text");

        // never follows the second edge
        assert_eq!(subs.resolve("Petaluma Text", FontNamespace::Text), "MuseJazz Text");
        assert_eq!(subs.resolve("Edwin", FontNamespace::Text), "Edwin");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut subs = FontSubstitutions::new();
        subs.insert_substitution(FontNamespace::Text, "ScoreFont", "Leland Text");

        let first = subs.resolve("ScoreFont", FontNamespace::Text);
        let second = subs.resolve("ScoreFont", FontNamespace::Text);
        assert_eq!(first, second);
    }

    #[test]
    fn test_namespaces_are_isolated() {
        let mut subs = FontSubstitutions::new();
        subs.insert_substitution(FontNamespace::Text, "A", "B");

        assert_eq!(subs.resolve("A", FontNamespace::Text), "B");
        assert_eq!(subs.resolve("A", FontNamespace::MusicSymbol), "A");
        assert_eq!(subs.len(FontNamespace::MusicSymbol), 0);
    }

    #[test]
    fn test_last_registration_wins() {
        let mut subs = FontSubstitutions::new();
        subs.insert_substitution(FontNamespace::MusicSymbol, "Gonville", "Bravura");
        subs.insert_substitution(FontNamespace::MusicSymbol, "Gonville", "Leland");

        assert_eq!(subs.resolve("Gonville", FontNamespace::MusicSymbol), "Leland");
        assert_eq!(subs.len(FontNamespace::MusicSymbol), 1);
    }

    #[test]
    fn test_mutual_fallbacks_are_allowed() {
        let mut subs = FontSubstitutions::new();
        subs.insert_substitution(FontNamespace::Text, "Leland Text", "Bravura Text");
        subs.insert_substitution(FontNamespace::Text, "Bravura Text", "Leland Text");

        // caller-side hop guard
        let mut name = "Leland Text".to_string();
        for _ in 0..3 {
            name = subs.resolve(&name, FontNamespace::Text);
        }
        assert_eq!(name, "Bravura Text");
    }

    #[test]
    fn test_names_are_normalized() {
        let mut subs = FontSubstitutions::new();
        subs.insert_substitution(FontNamespace::Text, "  Finale   Maestro Text ", "Leland Text");

        assert!(subs.has_substitution("Finale Maestro Text", FontNamespace::Text));
        assert_eq!(subs.resolve("Finale Maestro  Text", FontNamespace::Text), "Leland Text");
        assert_eq!(normalize_family(" Edwin  "), "Edwin");
    }

    #[test]
    fn test_unsubstituted_name_is_returned_as_given() {
        let mut subs = FontSubstitutions::new();
        subs.insert_substitution(FontNamespace::Text, "ScoreFont", "Leland Text");

        assert_eq!(subs.resolve(" Edwin  Roman ", FontNamespace::Text), " Edwin  Roman ");
        assert_eq!(subs.resolve("Gonville", FontNamespace::MusicSymbol), "Gonville");
    }

    #[test]
    fn test_namespace_from_str() {
        assert_eq!("text".parse::<FontNamespace>(), Ok(FontNamespace::Text));
        assert_eq!("music_symbol".parse::<FontNamespace>(), Ok(FontNamespace::MusicSymbol));
        assert_eq!(
            "tablature".parse::<FontNamespace>(),
            Err(UnknownFontNamespace("tablature".to_string()))
        );
    }
}
