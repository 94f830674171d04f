//! Visibility-Driven Animation Controller - gates a looping illustration
//!
//! Two independent inputs: is the animated region at least partially
//! on-screen, and does the system request reduced motion (a live signal,
//! not a load-time constant). The derived state is
//! `playing = visible && !reduced_motion`, re-derived on every observer
//! callback and every preference change.
//!
//! When playing flips off the region shows a static fallback, not a
//! mid-frame pause, so rapid toggling never leaves non-deterministic
//! visual state. When it flips back on, loops resume from their default
//! phase; no resumed-offset memory is kept.
//!
//! Without the observer capability, visibility gating is disabled (the
//! region counts as visible) and only reduced motion gates playback.

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{Signal, signal};

use crate::host::{
    Cleanup, IntersectionEntry, ObserverConfig, ReducedMotionSignal, ViewportObserver,
};

/// Fraction of the region that must be on-screen to count as visible.
pub const VISIBILITY_THRESHOLD: f64 = 0.2;

// =============================================================================
// TYPES
// =============================================================================

/// What the embedding component should render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationMode {
    /// Looping motion primitives run from their default phase.
    Animating,
    /// Static fallback representation, all motion suppressed.
    Static,
}

struct Inner {
    visible: bool,
    reduced_motion: bool,
    playing: Signal<bool>,
}

impl Inner {
    /// Re-derive `playing` from the two inputs. Pure function of current
    /// observed state, safe to run redundantly.
    fn rederive(&self) {
        let playing = self.visible && !self.reduced_motion;
        if self.playing.get() != playing {
            self.playing.set(playing);
        }
    }
}

// =============================================================================
// FLOW ANIMATION
// =============================================================================

/// Per-component animation gate. Dropping the instance disposes both the
/// observer subscription and the reduced-motion listener.
pub struct FlowAnimation {
    inner: Rc<RefCell<Inner>>,
    cleanups: Vec<Cleanup>,
}

impl FlowAnimation {
    /// Start gating the region with the given element id.
    ///
    /// The region counts as not visible until the first observer callback,
    /// so with reduced motion set at load the animation never starts.
    pub fn new(
        observer: &dyn ViewportObserver,
        motion: &dyn ReducedMotionSignal,
        region_id: &str,
    ) -> Self {
        let observer_supported = observer.is_supported();
        let reduced_motion = motion.current();
        // No observer: gating disabled, only reduced motion applies
        let visible = !observer_supported;

        let inner = Rc::new(RefCell::new(Inner {
            visible,
            reduced_motion,
            playing: signal(visible && !reduced_motion),
        }));

        let mut cleanups: Vec<Cleanup> = Vec::new();

        let motion_inner = inner.clone();
        cleanups.push(motion.subscribe(Rc::new(move |reduced: bool| {
            let mut inner = motion_inner.borrow_mut();
            inner.reduced_motion = reduced;
            inner.rederive();
        })));

        if observer_supported {
            let region = region_id.to_string();
            let observe_inner = inner.clone();
            cleanups.push(observer.observe(
                &[region.clone()],
                ObserverConfig::threshold_only(VISIBILITY_THRESHOLD),
                Rc::new(move |entries: &[IntersectionEntry]| {
                    let mut inner = observe_inner.borrow_mut();
                    for entry in entries {
                        if entry.target_id == region {
                            inner.visible = entry.is_intersecting;
                        }
                    }
                    inner.rederive();
                }),
            ));
        }

        Self { inner, cleanups }
    }

    /// `true` exactly when the region is visible and motion is allowed.
    pub fn is_playing(&self) -> bool {
        self.inner.borrow().playing.get()
    }

    /// Representation the embedding component should render.
    pub fn mode(&self) -> AnimationMode {
        if self.is_playing() {
            AnimationMode::Animating
        } else {
            AnimationMode::Static
        }
    }

    /// Last reported region visibility.
    pub fn is_visible(&self) -> bool {
        self.inner.borrow().visible
    }

    /// Last reported reduced-motion preference.
    pub fn reduced_motion(&self) -> bool {
        self.inner.borrow().reduced_motion
    }
}

impl Drop for FlowAnimation {
    fn drop(&mut self) {
        for cleanup in self.cleanups.drain(..) {
            cleanup();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
