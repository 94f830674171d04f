//! Host capability layer - narrow contracts over the embedding environment.
//!
//! The runtime never touches the document, storage, or media queries
//! directly. Each browser primitive it needs is expressed as a small
//! object-safe trait, consumed as `Rc<dyn Trait>`:
//!
//! - [`KeyValueStore`] - persisted preference storage
//! - [`ViewportObserver`] - batched intersection reporting
//! - [`ResizeSignal`] - "viewport or element size may have changed"
//! - [`ReducedMotionSignal`] - current value + changes of the motion preference
//! - [`LocationHost`] - base URL and fragment control (replace semantics)
//! - [`DocumentHost`] - the rendered page surface itself
//!
//! Every subscription returns a [`Cleanup`] disposer. Components pair each
//! subscribe with its disposer structurally, so teardown is enforced by
//! ownership rather than by convention.
//!
//! # Example
//!
//! ```ignore
//! use spark_page::host::{ResizeSignal, Cleanup};
//!
//! fn watch(resize: &dyn ResizeSignal) -> Cleanup {
//!     resize.subscribe(std::rc::Rc::new(|| {
//!         // re-measure something
//!     }))
//! }
//! ```

use std::rc::Rc;

use crate::error::PageError;

#[cfg(test)]
pub mod fake;

// =============================================================================
// CLEANUP
// =============================================================================

/// Disposer returned by every subscription. Calling it deregisters the
/// exact listener that was registered. Must be called when the owning
/// scope ends; dropping it without calling leaks the subscription.
pub type Cleanup = Box<dyn FnOnce()>;

/// A cleanup that does nothing. Returned by init functions that decided
/// not to register anything (reduced motion, absent capability).
pub fn noop_cleanup() -> Cleanup {
    Box::new(|| {})
}

// =============================================================================
// STORAGE
// =============================================================================

/// Persisted key-value store. Used only for the theme preference key.
pub trait KeyValueStore {
    /// Read a value. `None` when the key is absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value. Fails with [`PageError::Storage`] when the store is
    /// unavailable (quota, permissions); callers degrade to in-memory.
    fn set(&self, key: &str, value: &str) -> Result<(), PageError>;
}

// =============================================================================
// INTERSECTION OBSERVATION
// =============================================================================

/// Viewport band and threshold for an observation.
///
/// Margins are percentages of the viewport height, applied to the top and
/// bottom edges of the intersection root. Negative values shrink the band:
/// `top_margin_pct: -45, bottom_margin_pct: -50` leaves roughly the
/// 45%..50% horizontal strip of the viewport as the qualifying region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverConfig {
    pub top_margin_pct: i32,
    pub bottom_margin_pct: i32,
    /// Fraction of the target that must overlap the band to qualify.
    pub threshold: f64,
}

impl ObserverConfig {
    /// Full-viewport band at the given threshold.
    pub fn threshold_only(threshold: f64) -> Self {
        Self {
            top_margin_pct: 0,
            bottom_margin_pct: 0,
            threshold,
        }
    }
}

/// One element's intersection status within a callback batch.
#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionEntry {
    /// Element id of the observed target.
    pub target_id: String,
    pub is_intersecting: bool,
}

/// Callback receiving a batch of intersection changes, in document order.
pub type ObserverCallback = Rc<dyn Fn(&[IntersectionEntry])>;

/// Batched element-visibility observation.
pub trait ViewportObserver {
    /// Whether the host actually provides the observation primitive.
    /// When `false`, dependent components disable themselves.
    fn is_supported(&self) -> bool;

    /// Observe the given element ids. The callback fires with batches of
    /// entries whenever intersection status changes. The returned disposer
    /// unobserves all targets of this call.
    fn observe(
        &self,
        target_ids: &[String],
        config: ObserverConfig,
        callback: ObserverCallback,
    ) -> Cleanup;
}

// =============================================================================
// SIGNALS FROM THE ENVIRONMENT
// =============================================================================

/// "Viewport or element size may have changed." Delivery is best-effort
/// and may fire at high frequency; subscribers must be idempotent.
pub trait ResizeSignal {
    fn subscribe(&self, callback: Rc<dyn Fn()>) -> Cleanup;
}

/// System-level reduced-motion preference. Can change at any time via
/// system settings, not just at load.
pub trait ReducedMotionSignal {
    /// Current preference value.
    fn current(&self) -> bool;

    /// Subscribe to changes. The callback receives the new value.
    fn subscribe(&self, callback: Rc<dyn Fn(bool)>) -> Cleanup;
}

// =============================================================================
// LOCATION
// =============================================================================

/// URL state of the current page view.
pub trait LocationHost {
    /// Absolute URL of the current document, used as the base for
    /// resolving relative anchor hrefs.
    fn base_url(&self) -> String;

    /// Current fragment identifier without the leading `#`.
    /// `None` when the URL carries no fragment.
    fn fragment(&self) -> Option<String>;

    /// Update the visible fragment without creating a history entry.
    /// Replace semantics only - scroll-driven updates must not pollute
    /// back/forward navigation.
    fn replace_fragment(&self, id: &str);
}

// =============================================================================
// DOCUMENT
// =============================================================================

/// One hyperlink on the rendered page, as seen at normalization time.
#[derive(Clone, Debug, PartialEq)]
pub struct AnchorInfo {
    /// Raw href attribute, possibly relative or malformed.
    pub href: String,
    /// Links styled as primary call-to-action buttons keep default
    /// navigation even when external.
    pub is_primary_button: bool,
}

/// The rendered page surface. Everything here is a plain read or an
/// attribute-level mutation; no call on this trait may panic or block.
pub trait DocumentHost {
    // --- layout -------------------------------------------------------------

    /// Rendered box height of the fixed header, fractional pixels.
    /// `None` when the header element is absent.
    fn header_height(&self) -> Option<f64>;

    /// Publish the measured header height as the layout variable consumed
    /// by content padding and scroll math.
    fn set_header_height_var(&self, px: u32);

    // --- theme --------------------------------------------------------------

    /// Apply a theme by name as the document theme attribute.
    fn apply_theme(&self, name: &str);

    // --- elements and scrolling ---------------------------------------------

    /// Whether an element with this id exists in the document.
    fn has_element(&self, id: &str) -> bool;

    /// Document-relative top of the element, fractional pixels.
    /// `None` when the element is absent.
    fn element_top(&self, id: &str) -> Option<f64>;

    /// Scroll the page to the given document offset. `smooth` requests an
    /// animated scroll; `false` jumps.
    fn scroll_to(&self, top: f64, smooth: bool);

    /// Lock or unlock page-level scrolling (overlay open/closed).
    fn set_scroll_lock(&self, locked: bool);

    // --- navigation ---------------------------------------------------------

    /// Target ids of the in-page nav anchors, in document order.
    fn nav_target_ids(&self) -> Vec<String>;

    /// Mark the nav link for `id` as current, clearing all others first.
    /// `None` clears every mark.
    fn set_active_nav(&self, id: Option<&str>);

    // --- anchors ------------------------------------------------------------

    /// Every hyperlink on the page, in document order.
    fn anchors(&self) -> Vec<AnchorInfo>;

    /// Make the anchor at `index` (into [`DocumentHost::anchors`]) open in
    /// an isolated new browsing context: no opener access, no referrer.
    fn isolate_anchor(&self, index: usize);

    /// Intercept activation of in-page anchors. The handler receives the
    /// fragment id (without `#`) and returns `true` to consume the
    /// activation (default navigation suppressed). The disposer removes
    /// the interception.
    fn on_fragment_click(&self, handler: Rc<dyn Fn(&str) -> bool>) -> Cleanup;

    // --- scheduling ---------------------------------------------------------

    /// Run a job after the current render settles. Used for the one-shot
    /// initial-fragment scroll pass.
    fn defer(&self, job: Box<dyn FnOnce()>);
}
