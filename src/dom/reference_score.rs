//! Reference score
//!
//! A minimal score built once at bootstrap, before any real document exists.
//! It carries the default style and the engraving font used to measure
//! default metrics such as the notehead width, which later documents inherit.
//!
//! It is built while the object registry is suspended so that it never
//! shows up as a live, user-visible document.

use super::ElementId;
use crate::fonts::{EngravingFontPtr, FontCatalog};
use crate::symbols::{SymbolCodes, SymbolId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Raster resolution the engraver lays out at
pub const DPI: f64 = 360.0;

/// Spatium of a 20pt staff (5pt) at `DPI`
pub const SPATIUM20: f64 = 5.0 * (DPI / 72.0);

/// Default spatium: 1.75mm at `DPI`
pub const DEFAULT_SPATIUM: f64 = 24.8;

/// Notehead width used when the reference font cannot be measured
pub const DEFAULT_NOTE_HEAD_WIDTH: f64 = 1.17;

/// Registry of live documents, enumerated by accessibility and element
/// providers
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    live: Mutex<BTreeSet<ElementId>>,
    suspended: AtomicUsize,
    next_id: AtomicU64,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh document id
    pub fn allocate_id(&self) -> ElementId {
        ElementId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Register `id` as live; ignored while suspended
    pub fn register(&self, id: ElementId) -> bool {
        if self.is_suspended() {
            log::debug!("registry suspended, not registering {:?}", id);
            return false;
        }
        match self.live.lock() {
            Ok(mut live) => live.insert(id),
            Err(e) => {
                log::error!("object registry poisoned: {}", e);
                false
            }
        }
    }

    pub fn unregister(&self, id: ElementId) -> bool {
        match self.live.lock() {
            Ok(mut live) => live.remove(&id),
            Err(e) => {
                log::error!("object registry poisoned: {}", e);
                false
            }
        }
    }

    pub fn is_registered(&self, id: ElementId) -> bool {
        self.live.lock().map(|live| live.contains(&id)).unwrap_or(false)
    }

    /// Ids of all live documents
    pub fn live_ids(&self) -> Vec<ElementId> {
        self.live
            .lock()
            .map(|live| live.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended.load(Ordering::Acquire) > 0
    }

    /// Suspend registration until the returned guard is dropped
    pub fn suspend(&self) -> SuspendGuard<'_> {
        self.suspended.fetch_add(1, Ordering::AcqRel);
        SuspendGuard { registry: self }
    }
}

/// Keeps an `ObjectRegistry` suspended for its lifetime
#[derive(Debug)]
pub struct SuspendGuard<'a> {
    registry: &'a ObjectRegistry,
}

impl Drop for SuspendGuard<'_> {
    fn drop(&mut self) {
        self.registry.suspended.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Style values the reference score sets
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub spatium: f64,
    pub musical_text_font: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            spatium: DEFAULT_SPATIUM,
            musical_text_font: "Leland Text".to_string(),
        }
    }
}

#[derive(Debug)]
pub struct ReferenceScore {
    id: ElementId,
    style: Style,
    engraving_font: Option<EngravingFontPtr>,
    note_head_width: f64,
    measured: bool,
}

impl ReferenceScore {
    /// Build the reference score and measure its default metrics
    ///
    /// `score_font` names the engraving font to measure with. When it is not
    /// registered the catalog fallback is used; when nothing can be measured
    /// the notehead width stays at `DEFAULT_NOTE_HEAD_WIDTH`.
    pub fn build(
        registry: &ObjectRegistry,
        style: Style,
        score_font: &str,
        catalog: &FontCatalog,
        codes: &SymbolCodes,
    ) -> Self {
        let id = {
            let _suspended = registry.suspend();
            let id = registry.allocate_id();
            registry.register(id);
            id
        };

        let engraving_font = catalog.font_by_name(score_font).or_else(|| {
            log::warn!("reference font '{}' is not registered, using fallback", score_font);
            catalog.fallback_font()
        });

        let measured = engraving_font
            .as_ref()
            .and_then(|font| font.width(SymbolId::NoteheadBlack, style.spatium, codes));

        let note_head_width = match measured {
            Some(width) => width / SPATIUM20,
            None => {
                log::warn!("could not measure default notehead width, using {}", DEFAULT_NOTE_HEAD_WIDTH);
                DEFAULT_NOTE_HEAD_WIDTH
            }
        };

        Self {
            id,
            style,
            engraving_font,
            note_head_width,
            measured: measured.is_some(),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn engraving_font(&self) -> Option<&EngravingFontPtr> {
        self.engraving_font.as_ref()
    }

    /// Width of a black notehead relative to `SPATIUM20`
    pub fn note_head_width(&self) -> f64 {
        self.note_head_width
    }

    /// Whether the default metrics came from an actual font
    pub fn metrics_measured(&self) -> bool {
        self.measured
    }
}
