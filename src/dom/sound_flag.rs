//! Sound flag
//!
//! A small decorative item attached to a staff text (or any other parent)
//! that carries playback metadata: an ordered list of sound preset codes and
//! an ordered list of playing technique codes. The first preset is the
//! default one. A flag with neither is hidden.
//!
//! Both lists only change together through `change`/`clear`, which hand
//! back a reversible `SoundFlagChange` for the caller's undo stack.

use super::{Color, ElementId};
use serde::{Deserialize, Serialize};

pub type PresetCodes = Vec<String>;
pub type PlayingTechniqueCodes = Vec<String>;

/// Icon font family the flag glyph is drawn with
pub const ICON_FONT_FAMILY: &str = "MusescoreIcon";

/// Glyph code of the flag icon in `ICON_FONT_FAMILY`
pub const ICON_CODE: char = '\u{EF4E}';

/// Default icon font size in points
pub const DEFAULT_ICON_FONT_SIZE: f64 = 8.0;

/// Icon background when not selected
pub const ICON_BACKGROUND: Color = Color::rgb(0xE0, 0xE0, 0xE0);

/// Icon background when selected
pub const ICON_BACKGROUND_SELECTED: Color = Color::rgb(0x17, 0x6A, 0xD4);

/// Font reference for the flag icon
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IconFont {
    pub family: String,
    pub size: f64,
}

impl Default for IconFont {
    fn default() -> Self {
        Self {
            family: ICON_FONT_FAMILY.to_string(),
            size: DEFAULT_ICON_FONT_SIZE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoundFlag {
    parent: ElementId,
    sound_presets: PresetCodes,
    playing_techniques: PlayingTechniqueCodes,
    #[serde(skip)]
    selected: bool,
    icon_font: IconFont,
}

impl SoundFlag {
    /// A new, empty (hence hidden) flag attached to `parent`
    pub fn new(parent: ElementId) -> Self {
        Self {
            parent,
            sound_presets: Vec::new(),
            playing_techniques: Vec::new(),
            selected: false,
            icon_font: IconFont::default(),
        }
    }

    pub fn parent(&self) -> ElementId {
        self.parent
    }

    pub fn is_editable(&self) -> bool {
        true
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn sound_presets(&self) -> &PresetCodes {
        &self.sound_presets
    }

    pub fn playing_techniques(&self) -> &PlayingTechniqueCodes {
        &self.playing_techniques
    }

    /// Default preset: the first one, if any
    pub fn default_preset(&self) -> Option<&str> {
        self.sound_presets.first().map(String::as_str)
    }

    /// Hidden from rendering while both lists are empty
    pub fn should_hide(&self) -> bool {
        self.sound_presets.is_empty() && self.playing_techniques.is_empty()
    }

    /// Replace both lists at once
    ///
    /// Returns the change so it can be reverted by an undo collaborator.
    pub fn change(&mut self, presets: PresetCodes, techniques: PlayingTechniqueCodes) -> SoundFlagChange {
        let change = SoundFlagChange {
            old_presets: self.sound_presets.clone(),
            old_techniques: self.playing_techniques.clone(),
            new_presets: presets,
            new_techniques: techniques,
        };
        change.execute(self);
        change
    }

    /// Empty both lists, hiding the flag
    pub fn clear(&mut self) -> SoundFlagChange {
        self.change(Vec::new(), Vec::new())
    }

    pub fn icon_code(&self) -> char {
        ICON_CODE
    }

    pub fn icon_font(&self) -> &IconFont {
        &self.icon_font
    }

    pub fn set_icon_font_size(&mut self, size: f64) {
        self.icon_font.size = size;
    }

    pub fn icon_background_color(&self) -> Color {
        if self.selected {
            ICON_BACKGROUND_SELECTED
        } else {
            ICON_BACKGROUND
        }
    }
}

/// Reversible replacement of a flag's preset and technique lists
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoundFlagChange {
    pub old_presets: PresetCodes,
    pub old_techniques: PlayingTechniqueCodes,
    pub new_presets: PresetCodes,
    pub new_techniques: PlayingTechniqueCodes,
}

impl SoundFlagChange {
    /// Apply the new lists
    pub fn execute(&self, flag: &mut SoundFlag) {
        flag.sound_presets = self.new_presets.clone();
        flag.playing_techniques = self.new_techniques.clone();
    }

    /// Restore the old lists
    pub fn undo(&self, flag: &mut SoundFlag) {
        flag.sound_presets = self.old_presets.clone();
        flag.playing_techniques = self.old_techniques.clone();
    }

    /// Whether applying this change alters anything
    pub fn is_noop(&self) -> bool {
        self.old_presets == self.new_presets && self.old_techniques == self.new_techniques
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_flag_is_hidden() {
        let flag = SoundFlag::new(ElementId(7));
        assert!(flag.should_hide());
        assert!(flag.is_editable());
        assert_eq!(flag.parent(), ElementId(7));
        assert_eq!(flag.default_preset(), None);
    }

    #[test]
    fn test_change_replaces_both_lists() {
        let mut flag = SoundFlag::new(ElementId(1));
        flag.change(codes(&["violin.pizz", "violin.arco"]), codes(&["pizzicato"]));

        assert!(!flag.should_hide());
        assert_eq!(flag.sound_presets(), &codes(&["violin.pizz", "violin.arco"]));
        assert_eq!(flag.playing_techniques(), &codes(&["pizzicato"]));
        assert_eq!(flag.default_preset(), Some("violin.pizz"));
    }

    #[test]
    fn test_visible_when_only_one_list_is_set() {
        let mut flag = SoundFlag::new(ElementId(1));
        flag.change(Vec::new(), codes(&["mute"]));
        assert!(!flag.should_hide());

        flag.change(codes(&["trumpet"]), Vec::new());
        assert!(!flag.should_hide());
    }

    #[test]
    fn test_clear_hides_and_can_be_undone() {
        let mut flag = SoundFlag::new(ElementId(1));
        flag.change(codes(&["a", "b"]), codes(&["t"]));

        let change = flag.clear();
        assert!(flag.should_hide());

        change.undo(&mut flag);
        assert_eq!(flag.sound_presets(), &codes(&["a", "b"]));
        assert_eq!(flag.playing_techniques(), &codes(&["t"]));

        change.execute(&mut flag);
        assert!(flag.should_hide());
    }

    #[test]
    fn test_noop_change() {
        let mut flag = SoundFlag::new(ElementId(1));
        assert!(flag.clear().is_noop());
        assert!(!flag.change(codes(&["a"]), Vec::new()).is_noop());
    }

    #[test]
    fn test_icon_background_follows_selection() {
        let mut flag = SoundFlag::new(ElementId(1));
        assert_eq!(flag.icon_background_color(), ICON_BACKGROUND);

        flag.set_selected(true);
        assert_eq!(flag.icon_background_color(), ICON_BACKGROUND_SELECTED);
        assert_eq!(flag.icon_code(), ICON_CODE);

        flag.set_icon_font_size(12.0);
        assert_eq!(flag.icon_font().size, 12.0);
        assert_eq!(flag.icon_font().family, ICON_FONT_FAMILY);
    }

    #[test]
    fn test_clone_keeps_lists() {
        let mut flag = SoundFlag::new(ElementId(3));
        flag.change(codes(&["p"]), codes(&["t1", "t2"]));
        let copy = flag.clone();
        assert_eq!(copy, flag);
    }
}
