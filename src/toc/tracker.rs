//! ScrollSpy: tracks which heading is currently in view.
//!
//! The platform (a browser, a terminal pager, a test) owns the geometry and
//! reports visibility changes as batches of [`IntersectionEntry`]s through
//! an [`Observer`]. The [`ScrollSpy`] guard owns the subscription:
//!
//! ```text
//! ScrollSpy::attach(..) ──► observer() ──► platform
//!        │                                    │ deliver(batch)
//!        │ drop / detach()                    ▼
//!        └──────► disconnect ──────────► ActiveId (no more writes)
//! ```
//!
//! `ActiveId` has a single writer (the observer) and any number of readers
//! (render passes).
//!
//! In rendered pages the browser side is `embed/scrollspy.js`, which applies
//! the same first-visible-entry rule with `IntersectionObserver`.

use std::ops::RangeInclusive;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashSet;

use super::heading::Heading;

// ============================================================================
// Active heading signal
// ============================================================================

/// Id of the heading currently in view, shared between observer and renderer.
#[derive(Debug, Clone, Default)]
pub struct ActiveId(Arc<RwLock<Option<String>>>);

impl ActiveId {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current active id, if any heading has been seen yet.
    pub fn get(&self) -> Option<String> {
        self.0.read().clone()
    }

    fn set(&self, id: &str) -> bool {
        let mut current = self.0.write();
        if current.as_deref() == Some(id) {
            return false;
        }
        *current = Some(id.to_string());
        true
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// Observation region settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of the viewport, measured from the bottom, that does not count
    /// as "in view". `0.6` leaves the top 40%.
    pub root_margin_bottom: f32,
    /// Fraction of a heading's height that must be inside the region.
    pub threshold: f32,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            root_margin_bottom: 0.6,
            threshold: 0.1,
        }
    }
}

impl ObserverOptions {
    /// CSS `rootMargin` equivalent, e.g. `0px 0px -60% 0px`.
    pub fn root_margin_css(&self) -> String {
        format!("0px 0px -{}% 0px", (self.root_margin_bottom * 100.0).round())
    }
}

/// Element box relative to the top of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }
}

/// One visibility report for an observed heading.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    /// Id of the heading element.
    pub target: String,
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    pub fn new(target: impl Into<String>, is_intersecting: bool) -> Self {
        Self {
            target: target.into(),
            is_intersecting,
        }
    }

    /// Compute the entry for an element at `rect` in a viewport of
    /// `viewport_height`.
    ///
    /// The element intersects when at least `threshold` of its height lies
    /// between the viewport top and the bottom margin. Zero-height elements
    /// intersect when their top edge is inside the region.
    pub fn measure(
        target: impl Into<String>,
        rect: Rect,
        viewport_height: f32,
        options: &ObserverOptions,
    ) -> Self {
        let region_bottom = viewport_height * (1.0 - options.root_margin_bottom);
        let is_intersecting = if rect.height <= 0.0 {
            (0.0..=region_bottom).contains(&rect.top)
        } else {
            let visible = (rect.top + rect.height).min(region_bottom) - rect.top.max(0.0);
            visible > 0.0 && visible / rect.height >= options.threshold
        };
        Self::new(target, is_intersecting)
    }
}

// ============================================================================
// ScrollSpy
// ============================================================================

#[derive(Debug)]
struct SpyState {
    connected: bool,
    targets: FxHashSet<String>,
}

#[derive(Debug)]
struct Shared {
    /// The connected check and the active-id write both happen under this
    /// lock, so once `disconnect` returns no delivery can write again.
    state: Mutex<SpyState>,
    active: ActiveId,
    options: ObserverOptions,
}

impl Shared {
    fn disconnect(&self) {
        let mut state = self.state.lock();
        state.connected = false;
        state.targets.clear();
    }
}

/// Scoped visibility subscription for a page's headings.
///
/// Dropping the spy (or calling [`ScrollSpy::detach`]) releases every
/// observation; outstanding [`Observer`] handles become inert.
#[derive(Debug)]
pub struct ScrollSpy {
    shared: Arc<Shared>,
}

impl ScrollSpy {
    /// Start observing every heading whose level is in `levels`.
    pub fn attach<'a>(
        headings: impl IntoIterator<Item = &'a Heading>,
        levels: RangeInclusive<u8>,
        active: ActiveId,
        options: ObserverOptions,
    ) -> Self {
        let targets = headings
            .into_iter()
            .filter(|h| levels.contains(&h.level))
            .map(|h| h.id.clone())
            .collect();

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(SpyState {
                    connected: true,
                    targets,
                }),
                active,
                options,
            }),
        }
    }

    /// Handle for the platform to report visibility changes through.
    pub fn observer(&self) -> Observer {
        Observer {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Number of distinct heading ids being observed.
    pub fn observed(&self) -> usize {
        self.shared.state.lock().targets.len()
    }

    pub fn is_attached(&self) -> bool {
        self.shared.state.lock().connected
    }

    /// Stop observing. Equivalent to dropping the spy.
    pub fn detach(self) {}
}

impl Drop for ScrollSpy {
    fn drop(&mut self) {
        self.shared.disconnect();
    }
}

/// Platform-side handle of a [`ScrollSpy`]. Cheap to clone, usable from any
/// thread.
#[derive(Debug, Clone)]
pub struct Observer {
    shared: Arc<Shared>,
}

impl Observer {
    /// Report a batch of visibility changes.
    ///
    /// The first intersecting entry for an observed heading becomes active;
    /// batch order is whatever the platform enumerates. Returns whether the
    /// active id changed. After the spy is detached this does nothing.
    pub fn deliver(&self, entries: &[IntersectionEntry]) -> bool {
        let state = self.shared.state.lock();
        if !state.connected {
            return false;
        }

        entries
            .iter()
            .find(|entry| entry.is_intersecting && state.targets.contains(&entry.target))
            .is_some_and(|entry| self.shared.active.set(&entry.target))
    }

    /// Measure `elements` against the viewport and deliver the batch.
    pub fn deliver_layout(&self, viewport_height: f32, elements: &[(&str, Rect)]) -> bool {
        let entries: Vec<_> = elements
            .iter()
            .map(|(id, rect)| {
                IntersectionEntry::measure(*id, *rect, viewport_height, &self.shared.options)
            })
            .collect();
        self.deliver(&entries)
    }

    pub fn is_connected(&self) -> bool {
        self.shared.state.lock().connected
    }

    pub fn options(&self) -> ObserverOptions {
        self.shared.options
    }
}
