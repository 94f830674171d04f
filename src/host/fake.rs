//! Fake host implementations for tests.
//!
//! Every capability trait gets an in-memory fake with interior mutability,
//! event-firing methods, and live-subscription counters so tests can assert
//! that teardown actually deregistered the exact listener it registered.
//! No real rendering surface is involved anywhere.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use crate::error::PageError;

use super::{
    AnchorInfo, Cleanup, DocumentHost, IntersectionEntry, KeyValueStore, LocationHost,
    ObserverCallback, ObserverConfig, ReducedMotionSignal, ResizeSignal, ViewportObserver,
};

// =============================================================================
// FAKE STORE
// =============================================================================

/// In-memory [`KeyValueStore`] with switchable write failure.
#[derive(Default)]
pub struct FakeStore {
    map: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl FakeStore {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Make every subsequent `set` fail with a storage error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Seed a value without counting it as a runtime write.
    pub fn seed(&self, key: &str, value: &str) {
        self.map.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for FakeStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PageError> {
        if self.fail_writes.get() {
            return Err(PageError::Storage("write rejected".to_string()));
        }
        self.map.borrow_mut().insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

// =============================================================================
// FAKE OBSERVER
// =============================================================================

struct Observation {
    targets: Vec<String>,
    config: ObserverConfig,
    callback: ObserverCallback,
    alive: Rc<Cell<bool>>,
}

/// Recording [`ViewportObserver`]. Tests drive it with [`FakeObserver::fire`].
pub struct FakeObserver {
    supported: Cell<bool>,
    observations: RefCell<Vec<Observation>>,
}

impl FakeObserver {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            supported: Cell::new(true),
            observations: RefCell::new(Vec::new()),
        })
    }

    pub fn set_supported(&self, supported: bool) {
        self.supported.set(supported);
    }

    /// Number of observations whose disposer has not run.
    pub fn live_count(&self) -> usize {
        self.observations
            .borrow()
            .iter()
            .filter(|o| o.alive.get())
            .count()
    }

    /// Config of the most recent observe call.
    pub fn last_config(&self) -> Option<ObserverConfig> {
        self.observations.borrow().last().map(|o| o.config)
    }

    /// Target ids of the most recent observe call.
    pub fn last_targets(&self) -> Vec<String> {
        self.observations
            .borrow()
            .last()
            .map(|o| o.targets.clone())
            .unwrap_or_default()
    }

    /// Deliver a batch to every live observation.
    pub fn fire(&self, entries: &[IntersectionEntry]) {
        let callbacks: Vec<ObserverCallback> = self
            .observations
            .borrow()
            .iter()
            .filter(|o| o.alive.get())
            .map(|o| o.callback.clone())
            .collect();
        for cb in callbacks {
            cb(entries);
        }
    }
}

impl ViewportObserver for FakeObserver {
    fn is_supported(&self) -> bool {
        self.supported.get()
    }

    fn observe(
        &self,
        target_ids: &[String],
        config: ObserverConfig,
        callback: ObserverCallback,
    ) -> Cleanup {
        let alive = Rc::new(Cell::new(true));
        self.observations.borrow_mut().push(Observation {
            targets: target_ids.to_vec(),
            config,
            callback,
            alive: alive.clone(),
        });
        Box::new(move || alive.set(false))
    }
}

// =============================================================================
// FAKE RESIZE
// =============================================================================

/// Recording [`ResizeSignal`]. Tests drive it with [`FakeResize::fire`].
#[derive(Default)]
pub struct FakeResize {
    subs: RefCell<Vec<(Rc<dyn Fn()>, Rc<Cell<bool>>)>>,
}

impl FakeResize {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn live_count(&self) -> usize {
        self.subs.borrow().iter().filter(|(_, a)| a.get()).count()
    }

    pub fn fire(&self) {
        let callbacks: Vec<Rc<dyn Fn()>> = self
            .subs
            .borrow()
            .iter()
            .filter(|(_, a)| a.get())
            .map(|(cb, _)| cb.clone())
            .collect();
        for cb in callbacks {
            cb();
        }
    }
}

impl ResizeSignal for FakeResize {
    fn subscribe(&self, callback: Rc<dyn Fn()>) -> Cleanup {
        let alive = Rc::new(Cell::new(true));
        self.subs.borrow_mut().push((callback, alive.clone()));
        Box::new(move || alive.set(false))
    }
}

// =============================================================================
// FAKE REDUCED MOTION
// =============================================================================

/// [`ReducedMotionSignal`] with a settable value. `set` notifies subscribers.
pub struct FakeReducedMotion {
    value: Cell<bool>,
    subs: RefCell<Vec<(Rc<dyn Fn(bool)>, Rc<Cell<bool>>)>>,
}

impl FakeReducedMotion {
    pub fn new(initial: bool) -> Rc<Self> {
        Rc::new(Self {
            value: Cell::new(initial),
            subs: RefCell::new(Vec::new()),
        })
    }

    pub fn live_count(&self) -> usize {
        self.subs.borrow().iter().filter(|(_, a)| a.get()).count()
    }

    /// Change the preference and notify live subscribers.
    pub fn set(&self, value: bool) {
        self.value.set(value);
        let callbacks: Vec<Rc<dyn Fn(bool)>> = self
            .subs
            .borrow()
            .iter()
            .filter(|(_, a)| a.get())
            .map(|(cb, _)| cb.clone())
            .collect();
        for cb in callbacks {
            cb(value);
        }
    }
}

impl ReducedMotionSignal for FakeReducedMotion {
    fn current(&self) -> bool {
        self.value.get()
    }

    fn subscribe(&self, callback: Rc<dyn Fn(bool)>) -> Cleanup {
        let alive = Rc::new(Cell::new(true));
        self.subs.borrow_mut().push((callback, alive.clone()));
        Box::new(move || alive.set(false))
    }
}

// =============================================================================
// FAKE LOCATION
// =============================================================================

/// [`LocationHost`] with a recorded fragment-replacement history.
pub struct FakeLocation {
    base: RefCell<String>,
    fragment: RefCell<Option<String>>,
    replaced: RefCell<Vec<String>>,
}

impl FakeLocation {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            base: RefCell::new("https://example.com/portfolio".to_string()),
            fragment: RefCell::new(None),
            replaced: RefCell::new(Vec::new()),
        })
    }

    pub fn set_base_url(&self, base: &str) {
        *self.base.borrow_mut() = base.to_string();
    }

    pub fn set_fragment(&self, id: Option<&str>) {
        *self.fragment.borrow_mut() = id.map(|s| s.to_string());
    }

    /// Every fragment passed to `replace_fragment`, in order.
    pub fn replaced(&self) -> Vec<String> {
        self.replaced.borrow().clone()
    }
}

impl LocationHost for FakeLocation {
    fn base_url(&self) -> String {
        self.base.borrow().clone()
    }

    fn fragment(&self) -> Option<String> {
        self.fragment.borrow().clone()
    }

    fn replace_fragment(&self, id: &str) {
        *self.fragment.borrow_mut() = Some(id.to_string());
        self.replaced.borrow_mut().push(id.to_string());
    }
}

// =============================================================================
// FAKE DOCUMENT
// =============================================================================

/// In-memory [`DocumentHost`]. Fixtures are set up-front; every mutation
/// the runtime performs is recorded for assertions.
#[derive(Default)]
pub struct FakeDocument {
    header_height: Cell<Option<f64>>,
    header_var: Cell<Option<u32>>,
    theme_attr: RefCell<Option<String>>,
    element_tops: RefCell<HashMap<String, f64>>,
    scrolls: RefCell<Vec<(f64, bool)>>,
    scroll_locked: Cell<bool>,
    lock_calls: Cell<usize>,
    nav_targets: RefCell<Vec<String>>,
    active_nav: RefCell<Option<String>>,
    active_nav_sets: Cell<usize>,
    anchors: RefCell<Vec<AnchorInfo>>,
    isolated: RefCell<BTreeSet<usize>>,
    click_handlers: RefCell<Vec<(Rc<dyn Fn(&str) -> bool>, Rc<Cell<bool>>)>>,
    deferred: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl FakeDocument {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    // --- fixtures -----------------------------------------------------------

    pub fn set_header(&self, height: Option<f64>) {
        self.header_height.set(height);
    }

    pub fn add_element(&self, id: &str, top: f64) {
        self.element_tops.borrow_mut().insert(id.to_string(), top);
    }

    pub fn set_nav_targets(&self, ids: &[&str]) {
        *self.nav_targets.borrow_mut() = ids.iter().map(|s| s.to_string()).collect();
    }

    pub fn set_anchors(&self, anchors: Vec<AnchorInfo>) {
        *self.anchors.borrow_mut() = anchors;
    }

    // --- recorded state -----------------------------------------------------

    pub fn header_var(&self) -> Option<u32> {
        self.header_var.get()
    }

    pub fn theme_attr(&self) -> Option<String> {
        self.theme_attr.borrow().clone()
    }

    pub fn scrolls(&self) -> Vec<(f64, bool)> {
        self.scrolls.borrow().clone()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked.get()
    }

    /// Number of `set_scroll_lock` calls, locking or unlocking.
    pub fn lock_call_count(&self) -> usize {
        self.lock_calls.get()
    }

    pub fn active_nav(&self) -> Option<String> {
        self.active_nav.borrow().clone()
    }

    pub fn active_nav_set_count(&self) -> usize {
        self.active_nav_sets.get()
    }

    pub fn isolated_anchors(&self) -> Vec<usize> {
        self.isolated.borrow().iter().copied().collect()
    }

    pub fn live_click_handlers(&self) -> usize {
        self.click_handlers
            .borrow()
            .iter()
            .filter(|(_, a)| a.get())
            .count()
    }

    // --- event driving ------------------------------------------------------

    /// Simulate activation of an in-page anchor. Returns whether any live
    /// handler consumed it (default navigation suppressed).
    pub fn click_fragment(&self, id: &str) -> bool {
        let handlers: Vec<Rc<dyn Fn(&str) -> bool>> = self
            .click_handlers
            .borrow()
            .iter()
            .filter(|(_, a)| a.get())
            .map(|(h, _)| h.clone())
            .collect();
        for h in handlers {
            if h(id) {
                return true;
            }
        }
        false
    }

    /// Run every deferred job queued so far.
    pub fn run_deferred(&self) {
        let jobs: Vec<Box<dyn FnOnce()>> = self.deferred.borrow_mut().drain(..).collect();
        for job in jobs {
            job();
        }
    }
}

impl DocumentHost for FakeDocument {
    fn header_height(&self) -> Option<f64> {
        self.header_height.get()
    }

    fn set_header_height_var(&self, px: u32) {
        self.header_var.set(Some(px));
    }

    fn apply_theme(&self, name: &str) {
        *self.theme_attr.borrow_mut() = Some(name.to_string());
    }

    fn has_element(&self, id: &str) -> bool {
        self.element_tops.borrow().contains_key(id)
    }

    fn element_top(&self, id: &str) -> Option<f64> {
        self.element_tops.borrow().get(id).copied()
    }

    fn scroll_to(&self, top: f64, smooth: bool) {
        self.scrolls.borrow_mut().push((top, smooth));
    }

    fn set_scroll_lock(&self, locked: bool) {
        self.scroll_locked.set(locked);
        self.lock_calls.set(self.lock_calls.get() + 1);
    }

    fn nav_target_ids(&self) -> Vec<String> {
        self.nav_targets.borrow().clone()
    }

    fn set_active_nav(&self, id: Option<&str>) {
        *self.active_nav.borrow_mut() = id.map(|s| s.to_string());
        self.active_nav_sets.set(self.active_nav_sets.get() + 1);
    }

    fn anchors(&self) -> Vec<AnchorInfo> {
        self.anchors.borrow().clone()
    }

    fn isolate_anchor(&self, index: usize) {
        self.isolated.borrow_mut().insert(index);
    }

    fn on_fragment_click(&self, handler: Rc<dyn Fn(&str) -> bool>) -> Cleanup {
        let alive = Rc::new(Cell::new(true));
        self.click_handlers.borrow_mut().push((handler, alive.clone()));
        Box::new(move || alive.set(false))
    }

    fn defer(&self, job: Box<dyn FnOnce()>) {
        self.deferred.borrow_mut().push(job);
    }
}
