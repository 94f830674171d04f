//! Header Height Synchronizer - fixed-header layout metrics
//!
//! The fixed header can change size (viewport resize, theme change that
//! alters font metrics, a collapsible sub-navigation opening). Consumers of
//! its height are the content top padding (published through the layout
//! variable) and the smooth scroll offset math, which reads the signal.
//!
//! [`measure`] is a pure function of the current rendered height and is safe
//! to run redundantly: republishing an unchanged value is a no-op, and an
//! absent header skips the update entirely rather than publishing zero.
//!
//! # Example
//!
//! ```ignore
//! use spark_page::state::header;
//!
//! let cleanup = header::init_header_spacing(dom.clone(), &*resize);
//! let px = header::header_height();
//! cleanup();
//! ```

use std::rc::Rc;

use spark_signals::{Signal, signal};

use crate::host::{Cleanup, DocumentHost, ResizeSignal};

// =============================================================================
// HEADER HEIGHT SIGNAL
// =============================================================================

thread_local! {
    static HEADER_HEIGHT: Signal<u32> = signal(0);
}

/// Last published header height in integer pixels (0 before first measure).
pub fn header_height() -> u32 {
    HEADER_HEIGHT.with(|s| s.get())
}

// =============================================================================
// MEASUREMENT
// =============================================================================

/// Measure the header and publish its height.
///
/// Reads the rendered box height, rounds up to the next integer pixel,
/// stores it in the height signal and republishes the layout variable.
/// When the header element is absent this is a no-op: the previous value
/// stays published, which is never smaller than reality.
pub fn measure(dom: &dyn DocumentHost) {
    let Some(raw) = dom.header_height() else {
        return;
    };
    let px = raw.ceil().max(0.0) as u32;

    HEADER_HEIGHT.with(|s| {
        if s.get() != px {
            s.set(px);
        }
    });

    // Republish the layout variable even when the signal is unchanged: a
    // navigation can clear the document-side variable while the in-process
    // signal survives.
    dom.set_header_height_var(px);
}

/// Measure now and keep the published height synchronized with viewport
/// resizes. Returns a cleanup that unsubscribes the resize listener.
pub fn init_header_spacing(dom: Rc<dyn DocumentHost>, resize: &dyn ResizeSignal) -> Cleanup {
    measure(&*dom);

    let dom_clone = dom.clone();
    resize.subscribe(Rc::new(move || {
        measure(&*dom_clone);
    }))
}

/// Reset the height signal (for testing).
pub fn reset_header_state() {
    HEADER_HEIGHT.with(|s| s.set(0));
}

// =============================================================================
// TESTS
// =============================================================================
