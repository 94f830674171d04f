//! # spark-page
//!
//! Reactive page interaction runtime for content-heavy sites.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity. The page content itself is static; this crate
//! owns the parts that react to the reader - layout metrics for a fixed
//! header that can change size, scrollspy navigation with URL fragment
//! sync, smooth anchor scrolling that compensates for the header, a
//! persisted theme preference, outbound link isolation, a scroll-locking
//! lightbox, and visibility-gated decorative animation.
//!
//! ## Architecture
//!
//! Browser primitives never appear directly. Everything the runtime needs
//! from its host is a narrow capability trait in [`host`], consumed as
//! `Rc<dyn Trait>`, and every subscription returns a disposer:
//!
//! ```text
//! host events -> state systems (signals) -> document mutations
//! ```
//!
//! The [`pipeline`] module is the composition root: `mount` wires the
//! page-level systems in dependency order and the returned handle tears
//! every one of them down on navigation. All state is re-derivable from
//! the current host observations, so redundant events are harmless.
//!
//! ## Modules
//!
//! - [`host`] - capability contracts over the embedding environment
//! - [`state`] - header, scrollspy, anchors, links, keyboard, lightbox, motion
//! - [`theme`] - persisted theme preference
//! - [`pipeline`] - mount/unmount lifecycle
//! - [`error`] - the non-fatal failure taxonomy

pub mod error;
pub mod host;
pub mod pipeline;
pub mod state;
pub mod theme;

// Re-export commonly used items
pub use error::PageError;

pub use host::{
    AnchorInfo, Cleanup, DocumentHost, IntersectionEntry, KeyValueStore, LocationHost,
    ObserverConfig, ReducedMotionSignal, ResizeSignal, ViewportObserver, noop_cleanup,
};

pub use pipeline::{PageHandle, PageHosts, mount};

pub use state::{
    // Header
    header::{header_height, init_header_spacing, measure, reset_header_state},
    // Keyboard
    keyboard::{KeyEvent, dispatch, on_key, reset_keyboard_state},
    // Scrollspy
    scrollspy::{active_id, init_scrollspy, reset_scrollspy_state},
    // Anchors
    anchors::{SCROLL_GAP_PX, init_smooth_anchors, scroll_offset_for},
    // Links
    links::normalize_external_links,
    // Lightbox
    lightbox::{ImageSubject, Lightbox, scroll_lock_held},
    // Motion
    motion::{AnimationMode, FlowAnimation, VISIBILITY_THRESHOLD},
};

pub use theme::{THEME_KEY, ThemeChoice, current_theme, set_preference};
