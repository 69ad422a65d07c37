//! Engraving configuration
//!
//! Describes which datasets, fonts, substitutions and renderer the bootstrap
//! sequence sets up. `Default` reproduces the built-in font set; a YAML file
//! can override any part of it.

use crate::errors::ConfigError;
use crate::fonts::FontNamespace;
use crate::renderers::RendererVariant;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A music symbol font to register in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicFontEntry {
    /// Public name, as used in styles
    pub name: String,
    /// Internal family name of the font file
    pub subfamily: String,
    pub locator: String,
}

impl MusicFontEntry {
    fn new(name: &str, subfamily: &str, locator: &str) -> Self {
        Self {
            name: name.to_string(),
            subfamily: subfamily.to_string(),
            locator: locator.to_string(),
        }
    }
}

/// Settings of the reference score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Engraving font the default metrics are measured with
    pub score_font: String,
    pub musical_text_font: String,
    pub spatium: f64,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            score_font: "Leland".to_string(),
            musical_text_font: "Leland Text".to_string(),
            spatium: crate::dom::reference_score::DEFAULT_SPATIUM,
        }
    }
}

/// Cursor nudge distances, in spatium
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NudgeSteps {
    /// Cursor key
    pub nudge: f64,
    /// Ctrl + cursor key
    pub nudge10: f64,
    /// Alt + cursor key
    pub nudge50: f64,
}

impl Default for NudgeSteps {
    fn default() -> Self {
        Self {
            nudge: 0.1,
            nudge10: 1.0,
            nudge50: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngravingConfiguration {
    /// Full-score renderer to bind at bootstrap
    pub renderer: RendererVariant,

    /// Root that `:/` resource locators resolve against
    pub resource_root: String,

    pub smufl_glyphnames: String,
    pub jianpu_glyphnames: String,

    pub music_fonts: Vec<MusicFontEntry>,

    /// Fallback preference; the first registered candidate wins
    pub fallback_candidates: Vec<String>,

    pub text_fonts: Vec<String>,

    /// `[from, to]` edges in the text namespace, applied in order
    pub text_substitutions: Vec<(String, String)>,

    /// `[from, to]` edges in the music-symbol namespace, applied in order
    pub music_substitutions: Vec<(String, String)>,

    pub reference: ReferenceConfig,

    pub nudge: NudgeSteps,

    /// Report unreadable glyph codes at debug level
    pub debug_mode: bool,
}

fn edges(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect()
}

impl Default for EngravingConfiguration {
    fn default() -> Self {
        Self {
            renderer: RendererVariant::Dev,
            resource_root: ".".to_string(),
            smufl_glyphnames: ":/fonts/smufl/glyphnames.json".to_string(),
            jianpu_glyphnames: ":/fonts/jianpu/jianpuGlyphnames.json".to_string(),
            music_fonts: vec![
                MusicFontEntry::new("Leland", "Leland", ":/fonts/leland/Leland.otf"),
                MusicFontEntry::new("Bravura", "Bravura", ":/fonts/bravura/Bravura.otf"),
                MusicFontEntry::new("Emmentaler", "MScore", ":/fonts/mscore/mscore.ttf"),
                MusicFontEntry::new("Gonville", "Gootville", ":/fonts/gootville/Gootville.otf"),
                MusicFontEntry::new("MuseJazz", "MuseJazz", ":/fonts/musejazz/MuseJazz.otf"),
                MusicFontEntry::new("Petaluma", "Petaluma", ":/fonts/petaluma/Petaluma.otf"),
                MusicFontEntry::new("Finale Maestro", "Finale Maestro", ":/fonts/finalemaestro/FinaleMaestro.otf"),
                MusicFontEntry::new("Finale Broadway", "Finale Broadway", ":/fonts/finalebroadway/FinaleBroadway.otf"),
                MusicFontEntry::new("Jianpu", "Jianpu", ":/fonts/jianpu/Jianpu.otf"),
            ],
            fallback_candidates: vec!["Jianpu".to_string(), "Bravura".to_string()],
            text_fonts: [
                ":/fonts/musejazz/MuseJazzText.otf",
                ":/fonts/campania/Campania.otf",
                ":/fonts/edwin/Edwin-Roman.otf",
                ":/fonts/edwin/Edwin-Bold.otf",
                ":/fonts/edwin/Edwin-Italic.otf",
                ":/fonts/edwin/Edwin-BdIta.otf",
                ":/fonts/FreeSans.ttf",
                ":/fonts/FreeSerif.ttf",
                ":/fonts/FreeSerifBold.ttf",
                ":/fonts/FreeSerifItalic.ttf",
                ":/fonts/FreeSerifBoldItalic.ttf",
                ":/fonts/mscoreTab.ttf",
                ":/fonts/mscore-BC.ttf",
                ":/fonts/leland/LelandText.otf",
                ":/fonts/leland/Leland.otf",
                ":/fonts/bravura/BravuraText.otf",
                ":/fonts/gootville/GootvilleText.otf",
                ":/fonts/mscore/MScoreText.ttf",
                ":/fonts/petaluma/PetalumaText.otf",
                ":/fonts/petaluma/PetalumaScript.otf",
                ":/fonts/finalemaestro/FinaleMaestroText.otf",
                ":/fonts/finalebroadway/FinaleBroadwayText.otf",
                ":/fonts/jianpu/Jianpu.otf",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            text_substitutions: edges(&[
                ("Leland Text", "Bravura Text"),
                ("Bravura Text", "Leland Text"),
                ("MScore Text", "Leland Text"),
                ("Gootville Text", "Leland Text"),
                ("MuseJazz Text", "Leland Text"),
                ("Petaluma Text", "MuseJazz Text"),
                ("Finale Maestro Text", "Leland Text"),
                ("Finale Broadway Text", "MuseJazz Text"),
                // alias for the current musical text font
                ("ScoreFont", "Leland Text"),
            ]),
            music_substitutions: edges(&[
                ("Emmentaler", "Leland"),
                ("Gonville", "Leland"),
                ("Petaluma", "Leland"),
                ("Finale Maestro", "Bravura"),
                ("Finale Broadway", "MuseJazz"),
                ("Jianpu", "Bravura"),
            ]),
            reference: ReferenceConfig::default(),
            nudge: NudgeSteps::default(),
            debug_mode: false,
        }
    }
}

impl EngravingConfiguration {
    /// Parse a YAML configuration; missing keys keep their defaults
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read a YAML configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Substitution edges for `namespace`
    pub fn substitutions(&self, namespace: FontNamespace) -> &[(String, String)] {
        match namespace {
            FontNamespace::Text => &self.text_substitutions,
            FontNamespace::MusicSymbol => &self.music_substitutions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_font_set() {
        let config = EngravingConfiguration::default();
        assert_eq!(config.renderer, RendererVariant::Dev);
        assert_eq!(config.music_fonts.len(), 9);
        assert_eq!(config.music_fonts[2].name, "Emmentaler");
        assert_eq!(config.music_fonts[2].subfamily, "MScore");
        assert_eq!(config.text_fonts.len(), 23);
        assert_eq!(config.text_substitutions.len(), 9);
        assert_eq!(config.fallback_candidates, vec!["Jianpu", "Bravura"]);
        assert_eq!(config.reference.score_font, "Leland");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
renderer: stable
resource_root: /opt/engraving
text_substitutions:
  - [ScoreFont, Bravura Text]
reference:
  score_font: Bravura
"#;
        let config = EngravingConfiguration::from_yaml_str(yaml).unwrap();

        assert_eq!(config.renderer, RendererVariant::Stable);
        assert_eq!(config.resource_root, "/opt/engraving");
        assert_eq!(
            config.substitutions(FontNamespace::Text),
            &[("ScoreFont".to_string(), "Bravura Text".to_string())]
        );
        assert_eq!(config.reference.score_font, "Bravura");
        assert_eq!(config.reference.musical_text_font, "Leland Text");
        assert_eq!(config.music_fonts.len(), 9);
        assert_eq!(config.nudge, NudgeSteps::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"debug_mode: true\nnudge:\n  nudge: 0.2\n").unwrap();
        file.flush().unwrap();

        let config = EngravingConfiguration::load(file.path()).unwrap();
        assert!(config.debug_mode);
        assert_eq!(config.nudge.nudge, 0.2);
        assert_eq!(config.nudge.nudge10, 1.0);
    }

    #[test]
    fn test_invalid_yaml() {
        let result = EngravingConfiguration::from_yaml_str("renderer: [nope");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));

        let result = EngravingConfiguration::from_yaml_str("renderer: experimental");
        assert!(result.is_err());
    }
}
