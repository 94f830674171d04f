//! Scrollspy Navigator - tracks the section currently in the reading band
//!
//! Watches every section targeted by an in-page nav link through the host's
//! intersection observer, using an asymmetric band biased toward the
//! upper-middle of the viewport: a section becomes current once it reaches
//! roughly the top 45..50% strip, not when it merely touches an edge.
//!
//! When a section enters the band, its nav link becomes the sole current
//! link and the URL fragment is updated with replace semantics, so
//! scroll-driven updates never pollute back/forward history.
//!
//! Tie-break: when several sections qualify within one callback batch, the
//! last one in document order wins. This favors the lower section and is a
//! kept approximation of the source behavior, not a nearest-to-band-center
//! computation.
//!
//! Degradation: without the observer capability the navigator stays
//! inert - no highlighting, no fragment updates, no polling fallback.

use std::rc::Rc;

use spark_signals::{Signal, signal};

use crate::error::PageError;
use crate::host::{
    Cleanup, DocumentHost, IntersectionEntry, LocationHost, ObserverConfig, ViewportObserver,
};

/// Viewport band for "currently reading": shrink the top by 45% and the
/// bottom by 50%, qualify on any sliver of overlap.
const SPY_CONFIG: ObserverConfig = ObserverConfig {
    top_margin_pct: -45,
    bottom_margin_pct: -50,
    threshold: 0.01,
};

// =============================================================================
// ACTIVE SECTION SIGNAL
// =============================================================================

thread_local! {
    static ACTIVE_ID: Signal<Option<String>> = signal(None);
}

/// Id of the section currently marked as active, if any.
pub fn active_id() -> Option<String> {
    ACTIVE_ID.with(|s| s.get())
}

/// Reset scrollspy state (for testing and page teardown).
pub fn reset_scrollspy_state() {
    ACTIVE_ID.with(|s| s.set(None));
}

// =============================================================================
// INIT
// =============================================================================

/// Start tracking the current section.
///
/// Builds the section list from the nav anchors whose target elements
/// exist, in document order, and observes them with the reading band.
/// Returns the disposer that unobserves everything and clears the active
/// state.
///
/// Errors (handled by the caller as silent degradation):
/// - [`PageError::UnsupportedCapability`] when the host has no observer
/// - [`PageError::MissingElement`] when no nav target exists on the page
pub fn init_scrollspy(
    dom: Rc<dyn DocumentHost>,
    observer: &dyn ViewportObserver,
    location: Rc<dyn LocationHost>,
) -> Result<Cleanup, PageError> {
    if !observer.is_supported() {
        return Err(PageError::UnsupportedCapability("intersection observer"));
    }

    let sections: Vec<String> = dom
        .nav_target_ids()
        .into_iter()
        .filter(|id| dom.has_element(id))
        .collect();
    if sections.is_empty() {
        return Err(PageError::MissingElement("scrollspy sections".to_string()));
    }

    let known = sections.clone();
    let callback = Rc::new(move |entries: &[IntersectionEntry]| {
        // Batch order is document order: the last qualifying entry wins
        for entry in entries {
            if entry.is_intersecting && known.iter().any(|id| id == &entry.target_id) {
                activate(&*dom, &*location, &entry.target_id);
            }
        }
    });

    let unobserve = observer.observe(&sections, SPY_CONFIG, callback);

    Ok(Box::new(move || {
        unobserve();
        reset_scrollspy_state();
    }))
}

/// Make `id` the sole active section. Re-activating the current section
/// is a no-op, so redundant observer batches have no accumulating effect.
fn activate(dom: &dyn DocumentHost, location: &dyn LocationHost, id: &str) {
    let already_active = ACTIVE_ID.with(|s| s.get().as_deref() == Some(id));
    if already_active {
        return;
    }

    dom.set_active_nav(Some(id));
    location.replace_fragment(id);
    ACTIVE_ID.with(|s| s.set(Some(id.to_string())));
}

// =============================================================================
// TESTS
// =============================================================================
