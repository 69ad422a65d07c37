//! Document-side types owned by the engraving core
//!
//! The full score model lives elsewhere. This module only holds what the
//! core itself creates or exposes: the sound flag item, the reference score
//! used to prime default metrics, and the registry of live objects.

pub mod reference_score;
pub mod sound_flag;

pub use reference_score::{ObjectRegistry, ReferenceScore, Style, SuspendGuard};
pub use sound_flag::{SoundFlag, SoundFlagChange};

use serde::{Deserialize, Serialize};

/// Identifier of a document node
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u64);

/// RGBA colour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// `#rrggbb` notation
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
