//! Boot Sequencer - page view setup and guaranteed teardown.
//!
//! [`mount`] wires the page-level systems against the current document in
//! dependency order: layout-affecting systems first (header spacing, then
//! theme, since both change what everything else measures), then the
//! scroll-coupled systems against the current section list, then the
//! anchor set normalization. Each component that fails to initialize
//! (missing capability, no sections) degrades silently on its own; the
//! rest of the page still works.
//!
//! [`PageHandle`] owns every disposer the mount collected. Unmounting (or
//! dropping the handle) runs them all and discards the page-view signals,
//! so repeated navigations never accumulate listeners.
//!
//! # Example
//!
//! ```ignore
//! use spark_page::pipeline::{mount, PageHosts};
//!
//! let handle = mount(PageHosts { dom, store, observer, resize, motion, location });
//! // ... page view lives ...
//! handle.unmount();
//! ```

use std::rc::Rc;

use crate::host::{
    Cleanup, DocumentHost, KeyValueStore, LocationHost, ReducedMotionSignal, ResizeSignal,
    ViewportObserver,
};
use crate::state::{anchors, header, links, scrollspy};
use crate::theme;

// =============================================================================
// HOSTS
// =============================================================================

/// The capability handles a page view runs against.
pub struct PageHosts {
    pub dom: Rc<dyn DocumentHost>,
    pub store: Rc<dyn KeyValueStore>,
    pub observer: Rc<dyn ViewportObserver>,
    pub resize: Rc<dyn ResizeSignal>,
    pub motion: Rc<dyn ReducedMotionSignal>,
    pub location: Rc<dyn LocationHost>,
}

// =============================================================================
// PAGE HANDLE
// =============================================================================

/// Handle returned by [`mount`]. Holds every disposer registered during
/// setup; unmounting runs them and resets the page-view state.
pub struct PageHandle {
    cleanups: Vec<Cleanup>,
}

impl PageHandle {
    /// Tear down the page view: deregister every listener this mount
    /// registered and discard the page-view signals. The persisted theme
    /// preference outlives the page view and is not touched.
    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        for cleanup in self.cleanups.drain(..) {
            cleanup();
        }
        header::reset_header_state();
        scrollspy::reset_scrollspy_state();
    }
}

impl Drop for PageHandle {
    fn drop(&mut self) {
        // Dropping without an explicit unmount must not leak listeners
        self.teardown();
    }
}

// =============================================================================
// MOUNT
// =============================================================================

/// Wire the page-level systems to the host and return the teardown handle.
pub fn mount(hosts: PageHosts) -> PageHandle {
    let mut cleanups: Vec<Cleanup> = Vec::new();

    // Layout first: everything downstream reads the published header height
    cleanups.push(header::init_header_spacing(hosts.dom.clone(), &*hosts.resize));
    theme::init(&*hosts.store, &*hosts.dom);

    // Scroll-coupled systems against the current section list
    match scrollspy::init_scrollspy(hosts.dom.clone(), &*hosts.observer, hosts.location.clone()) {
        Ok(cleanup) => cleanups.push(cleanup),
        // No observer or no sections: reading stays fine without highlighting
        Err(_) => {}
    }
    cleanups.push(anchors::init_smooth_anchors(
        hosts.dom.clone(),
        &*hosts.location,
        &*hosts.motion,
    ));

    // Anchor set is rendered by now
    links::normalize_external_links(&*hosts.dom, &*hosts.location);

    PageHandle { cleanups }
}

// =============================================================================
// TESTS
// =============================================================================
