//! Lightbox Controller - fullscreen image viewer lifecycle
//!
//! Two states: closed and open. Opening locks page-level scrolling and
//! registers an Escape handler; closing releases the lock and removes the
//! handler. Close triggers: explicit close control, backdrop activation
//! (clicking the enlarged image itself is inert), Escape, and dropping the
//! instance while still open. Every exit path releases the scroll lock -
//! teardown must never leave the page permanently non-scrollable.
//!
//! The scroll lock is a single page-wide boolean with exclusive ownership.
//! A second instance opening while the page is already locked leaves the
//! lock untouched, so there is no double-lock/double-unlock hazard.
//!
//! # Example
//!
//! ```ignore
//! use spark_page::state::lightbox::{Lightbox, ImageSubject};
//!
//! let viewer = Lightbox::new(dom.clone());
//! viewer.open(ImageSubject::new("diagram.png", "System diagram"));
//! // Escape, backdrop, close control, or drop all close it
//! viewer.close();
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::host::{Cleanup, DocumentHost};
use crate::state::keyboard;

// =============================================================================
// TYPES
// =============================================================================

/// The image a lightbox presents.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageSubject {
    pub src: String,
    pub alt: String,
    pub caption: Option<String>,
}

impl ImageSubject {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

struct Inner {
    open: bool,
    subject: Option<ImageSubject>,
    escape_cleanup: Option<Cleanup>,
}

// =============================================================================
// PAGE SCROLL LOCK
// =============================================================================

thread_local! {
    // Exclusive ownership: at most one open lightbox holds the page lock
    static SCROLL_LOCK_HELD: Cell<bool> = Cell::new(false);
}

/// Whether any lightbox currently holds the page scroll lock.
pub fn scroll_lock_held() -> bool {
    SCROLL_LOCK_HELD.with(|held| held.get())
}

fn acquire_scroll_lock(dom: &dyn DocumentHost) {
    SCROLL_LOCK_HELD.with(|held| {
        if !held.get() {
            held.set(true);
            dom.set_scroll_lock(true);
        }
    });
}

fn release_scroll_lock(dom: &dyn DocumentHost) {
    SCROLL_LOCK_HELD.with(|held| {
        if held.get() {
            held.set(false);
            dom.set_scroll_lock(false);
        }
    });
}

/// Reset the page lock flag (for testing).
pub fn reset_lightbox_state() {
    SCROLL_LOCK_HELD.with(|held| held.set(false));
}

// =============================================================================
// LIGHTBOX
// =============================================================================

/// Fullscreen image viewer owned by the embedding component. Dropping an
/// open instance closes it cleanly.
pub struct Lightbox {
    dom: Rc<dyn DocumentHost>,
    inner: Rc<RefCell<Inner>>,
}

impl Lightbox {
    pub fn new(dom: Rc<dyn DocumentHost>) -> Self {
        Self {
            dom,
            inner: Rc::new(RefCell::new(Inner {
                open: false,
                subject: None,
                escape_cleanup: None,
            })),
        }
    }

    /// Open the viewer on a subject. No-op when already open.
    ///
    /// Locks page scrolling (idempotently, page-wide) and registers the
    /// Escape handler for exactly the duration of the open state.
    pub fn open(&self, subject: ImageSubject) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.open {
                return;
            }
            inner.open = true;
            inner.subject = Some(subject);
        }

        acquire_scroll_lock(&*self.dom);

        let weak = Rc::downgrade(&self.inner);
        let dom = self.dom.clone();
        let cleanup = keyboard::on_key("Escape", move || {
            match weak.upgrade() {
                Some(inner) => close_inner(&inner, &*dom),
                None => false,
            }
        });
        self.inner.borrow_mut().escape_cleanup = Some(cleanup);
    }

    /// Close via the explicit close control. No-op when already closed.
    pub fn close(&self) {
        close_inner(&self.inner, &*self.dom);
    }

    /// Overlay background was activated: closes the viewer.
    pub fn backdrop_activated(&self) {
        close_inner(&self.inner, &*self.dom);
    }

    /// The enlarged content itself was activated: deliberately inert, so a
    /// click on the image never dismisses it.
    pub fn content_activated(&self) {}

    pub fn is_open(&self) -> bool {
        self.inner.borrow().open
    }

    /// Current subject; `Some` exactly while open.
    pub fn subject(&self) -> Option<ImageSubject> {
        self.inner.borrow().subject.clone()
    }
}

impl Drop for Lightbox {
    fn drop(&mut self) {
        // Unmount while open must still release the lock and the handler
        close_inner(&self.inner, &*self.dom);
    }
}

/// Shared close path. Returns whether a transition happened.
fn close_inner(inner: &Rc<RefCell<Inner>>, dom: &dyn DocumentHost) -> bool {
    let escape_cleanup = {
        let mut inner = inner.borrow_mut();
        if !inner.open {
            return false;
        }
        inner.open = false;
        inner.subject = None;
        inner.escape_cleanup.take()
    };

    release_scroll_lock(dom);
    if let Some(cleanup) = escape_cleanup {
        cleanup();
    }
    true
}

// =============================================================================
// TESTS
// =============================================================================
