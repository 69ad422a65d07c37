//! Sound flag visibility and change round trips, driven the way an undo
//! collaborator drives them.

use engraving_core::dom::{ElementId, SoundFlag, SoundFlagChange};

fn codes(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Minimal stand-in for the host's undo stack
#[derive(Default)]
struct UndoLog {
    done: Vec<SoundFlagChange>,
}

impl UndoLog {
    fn record(&mut self, change: SoundFlagChange) {
        if !change.is_noop() {
            self.done.push(change);
        }
    }

    fn undo(&mut self, flag: &mut SoundFlag) -> bool {
        match self.done.pop() {
            Some(change) => {
                change.undo(flag);
                true
            }
            None => false,
        }
    }
}

#[test]
fn test_visibility_follows_lists() {
    let mut flag = SoundFlag::new(ElementId(42));
    assert!(flag.should_hide());

    flag.change(Vec::new(), codes(&["harmonics"]));
    assert!(!flag.should_hide());

    flag.change(codes(&["cello.ensemble"]), codes(&["harmonics"]));
    assert!(!flag.should_hide());

    flag.clear();
    assert!(flag.should_hide());
    assert!(flag.sound_presets().is_empty());
    assert!(flag.playing_techniques().is_empty());
}

#[test]
fn test_changes_undo_in_order() {
    let mut flag = SoundFlag::new(ElementId(1));
    let mut log = UndoLog::default();

    log.record(flag.change(codes(&["flute"]), Vec::new()));
    log.record(flag.change(codes(&["flute", "piccolo"]), codes(&["flutter"])));
    log.record(flag.clear());
    log.record(flag.clear());
    assert_eq!(log.done.len(), 3);

    assert!(log.undo(&mut flag));
    assert_eq!(flag.sound_presets(), &codes(&["flute", "piccolo"]));
    assert_eq!(flag.playing_techniques(), &codes(&["flutter"]));
    assert_eq!(flag.default_preset(), Some("flute"));

    assert!(log.undo(&mut flag));
    assert_eq!(flag.sound_presets(), &codes(&["flute"]));
    assert!(flag.playing_techniques().is_empty());

    assert!(log.undo(&mut flag));
    assert!(flag.should_hide());
    assert!(!log.undo(&mut flag));
}

#[test]
fn test_flag_serializes_without_selection() {
    let mut flag = SoundFlag::new(ElementId(5));
    flag.change(codes(&["oboe"]), codes(&["staccato"]));
    flag.set_selected(true);

    let json = serde_json::to_string(&flag).unwrap();
    assert!(json.contains("\"oboe\""));
    assert!(!json.contains("selected"));

    let restored: SoundFlag = serde_json::from_str(&json).unwrap();
    assert!(!restored.is_selected());
    assert_eq!(restored.sound_presets(), flag.sound_presets());
}
