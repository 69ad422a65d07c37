//! Musical symbol identifiers and their glyph codes
//!
//! `SymbolId` is the shared key space for every glyph concept the engraver
//! knows about. Encoding-specific numbers only live in the code tables
//! loaded from the glyph-name datasets (see `code_table`).

pub mod code_table;
pub mod glyphnames;

pub use code_table::{GlyphCode, SymbolCodeTable, SymbolCodes, SymbolEncoding};

use serde::{Deserialize, Serialize};

/// Declares the `SymbolId` enumeration together with its canonical names.
///
/// Order matters: identifiers are totally ordered by declaration, `NoSym`
/// must come first and `LastSym` last.
macro_rules! symbol_ids {
    ($($variant:ident => $name:literal,)+) => {
        /// Opaque identifier for one musical glyph concept
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum SymbolId {
            $($variant,)+
        }

        impl SymbolId {
            /// Every identifier in declaration order, sentinels included
            pub const ALL: &'static [SymbolId] = &[$(SymbolId::$variant,)+];

            /// Canonical glyph name used as key in the glyph-name datasets
            pub fn name(self) -> &'static str {
                match self {
                    $(SymbolId::$variant => $name,)+
                }
            }
        }
    };
}

symbol_ids! {
    NoSym => "noSym",

    // Noteheads
    NoteheadDoubleWhole => "noteheadDoubleWhole",
    NoteheadWhole => "noteheadWhole",
    NoteheadHalf => "noteheadHalf",
    NoteheadBlack => "noteheadBlack",
    NoteheadXBlack => "noteheadXBlack",
    NoteheadSlashHorizontalEnds => "noteheadSlashHorizontalEnds",
    NoteheadParenthesisLeft => "noteheadParenthesisLeft",
    NoteheadParenthesisRight => "noteheadParenthesisRight",

    // Stems, flags and dots
    Stem => "stem",
    Flag8thUp => "flag8thUp",
    Flag8thDown => "flag8thDown",
    Flag16thUp => "flag16thUp",
    Flag16thDown => "flag16thDown",
    AugmentationDot => "augmentationDot",

    // Clefs
    GClef => "gClef",
    FClef => "fClef",
    CClef => "cClef",
    UnpitchedPercussionClef1 => "unpitchedPercussionClef1",
    SixStringTabClef => "6stringTabClef",

    // Accidentals
    AccidentalFlat => "accidentalFlat",
    AccidentalNatural => "accidentalNatural",
    AccidentalSharp => "accidentalSharp",
    AccidentalDoubleSharp => "accidentalDoubleSharp",
    AccidentalDoubleFlat => "accidentalDoubleFlat",

    // Time signatures
    TimeSig0 => "timeSig0",
    TimeSig1 => "timeSig1",
    TimeSig2 => "timeSig2",
    TimeSig3 => "timeSig3",
    TimeSig4 => "timeSig4",
    TimeSig5 => "timeSig5",
    TimeSig6 => "timeSig6",
    TimeSig7 => "timeSig7",
    TimeSig8 => "timeSig8",
    TimeSig9 => "timeSig9",
    TimeSigCommon => "timeSigCommon",
    TimeSigCutCommon => "timeSigCutCommon",

    // Rests
    RestWhole => "restWhole",
    RestHalf => "restHalf",
    RestQuarter => "restQuarter",
    Rest8th => "rest8th",
    Rest16th => "rest16th",

    // Barlines and repeats
    BarlineSingle => "barlineSingle",
    BarlineDouble => "barlineDouble",
    BarlineFinal => "barlineFinal",
    RepeatLeft => "repeatLeft",
    RepeatRight => "repeatRight",
    RepeatDots => "repeatDots",
    Segno => "segno",
    Coda => "coda",

    // Articulations and holds
    ArticAccentAbove => "articAccentAbove",
    ArticStaccatoAbove => "articStaccatoAbove",
    ArticTenutoAbove => "articTenutoAbove",
    ArticMarcatoAbove => "articMarcatoAbove",
    FermataAbove => "fermataAbove",
    BreathMarkComma => "breathMarkComma",

    // Ornaments
    OrnamentTrill => "ornamentTrill",
    OrnamentTurn => "ornamentTurn",
    OrnamentMordent => "ornamentMordent",
    OrnamentShortTrill => "ornamentShortTrill",

    // Dynamics
    DynamicPiano => "dynamicPiano",
    DynamicMezzo => "dynamicMezzo",
    DynamicForte => "dynamicForte",
    DynamicSforzando => "dynamicSforzando",
    DynamicCrescendoHairpin => "dynamicCrescendoHairpin",
    DynamicDiminuendoHairpin => "dynamicDiminuendoHairpin",

    // Octaves and pedals
    Ottava => "ottava",
    Quindicesima => "quindicesima",
    KeyboardPedalPed => "keyboardPedalPed",
    KeyboardPedalUp => "keyboardPedalUp",

    // Tuplets
    Tuplet3 => "tuplet3",
    TupletColon => "tupletColon",

    LastSym => "lastSym",
}

impl SymbolId {
    /// Position of this identifier in the enumeration
    pub fn index(self) -> usize {
        self as usize
    }

    /// Bounds-checked inverse of [`SymbolId::index`]
    pub fn from_index(index: usize) -> Option<SymbolId> {
        Self::ALL.get(index).copied()
    }

    /// Look up an identifier by its canonical glyph name
    pub fn from_name(name: &str) -> Option<SymbolId> {
        Self::ALL.iter().copied().find(|id| id.name() == name)
    }

    /// Whether this is one of the two sentinels that never receive codes
    pub fn is_sentinel(self) -> bool {
        matches!(self, SymbolId::NoSym | SymbolId::LastSym)
    }

    /// All identifiers that may carry glyph codes
    pub fn valid() -> impl Iterator<Item = SymbolId> {
        Self::ALL.iter().copied().filter(|id| !id.is_sentinel())
    }
}

impl std::fmt::Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
