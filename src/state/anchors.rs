//! Smooth Scroll Controller - in-page anchor navigation with header offset
//!
//! Intercepts activation of in-page anchors before default navigation,
//! computes a destination offset that compensates for the fixed header
//! plus a small visual gap, and animates the scroll.
//!
//! Reduced motion wins outright: when the preference is set at init,
//! nothing is intercepted and native jump behavior applies everywhere.
//!
//! On load, a URL that already carries a fragment naming an existing
//! element gets one deferred scroll pass after the first render settles,
//! so the landing position accounts for the header exactly like a click.

use std::rc::Rc;

use crate::error::PageError;
use crate::host::{Cleanup, DocumentHost, LocationHost, ReducedMotionSignal, noop_cleanup};
use crate::state::header;

/// Visual breathing room between the header's bottom edge and the
/// scrolled-to section top.
pub const SCROLL_GAP_PX: u32 = 6;

// =============================================================================
// OFFSET MATH
// =============================================================================

/// Destination scroll offset for an element: its document-relative top
/// minus the published header height minus [`SCROLL_GAP_PX`].
///
/// Fails with [`PageError::MissingElement`] when the id has no element;
/// callers leave such activations to default browser handling.
pub fn scroll_offset_for(dom: &dyn DocumentHost, id: &str) -> Result<f64, PageError> {
    let top = dom
        .element_top(id)
        .ok_or_else(|| PageError::MissingElement(id.to_string()))?;
    Ok(top - f64::from(header::header_height() + SCROLL_GAP_PX))
}

// =============================================================================
// INIT
// =============================================================================

/// Wire up smooth in-page anchor scrolling.
///
/// Registers the fragment-click interception and, when the current URL
/// already names an existing element, schedules one deferred scroll pass.
/// Returns the disposer for the interception.
///
/// When reduced motion is set, returns a no-op cleanup and registers
/// nothing: anchors keep their native jump behavior.
pub fn init_smooth_anchors(
    dom: Rc<dyn DocumentHost>,
    location: &dyn LocationHost,
    motion: &dyn ReducedMotionSignal,
) -> Cleanup {
    if motion.current() {
        return noop_cleanup();
    }

    let click_dom = dom.clone();
    let cleanup = dom.on_fragment_click(Rc::new(move |id: &str| {
        // Empty fragments and missing targets stay on the default path
        if id.is_empty() {
            return false;
        }
        match scroll_offset_for(&*click_dom, id) {
            Ok(offset) => {
                click_dom.scroll_to(offset, true);
                true
            }
            Err(_) => false,
        }
    }));

    // Deep link: scroll once the first render has settled, so the offset
    // sees the real header height
    if let Some(fragment) = location.fragment() {
        if !fragment.is_empty() && dom.has_element(&fragment) {
            let deferred_dom = dom.clone();
            dom.defer(Box::new(move || {
                if let Ok(offset) = scroll_offset_for(&*deferred_dom, &fragment) {
                    deferred_dom.scroll_to(offset, true);
                }
            }));
        }
    }

    cleanup
}

// =============================================================================
// TESTS
// =============================================================================
