//! Keyboard Module - key event dispatch and handler registry
//!
//! The host delivers document-level key presses by calling [`dispatch`];
//! components subscribe to individual keys with [`on_key`] and get back a
//! cleanup. Handlers return `true` to consume the event.
//!
//! Dispatch snapshots the handler list before invoking, so a handler may
//! deregister itself (or any other handler) while running. The lightbox
//! relies on this: its Escape handler removes itself as part of closing.
//!
//! # Example
//!
//! ```ignore
//! use spark_page::state::keyboard;
//!
//! let cleanup = keyboard::on_key("Escape", || {
//!     // close something
//!     true // consume
//! });
//!
//! keyboard::dispatch(keyboard::KeyEvent::new("Escape"));
//! cleanup();
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::host::Cleanup;

// =============================================================================
// TYPES
// =============================================================================

/// A document-level key press.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed (e.g. "Escape", "Enter", "a").
    pub key: String,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Handler for a specific key. Return `true` to consume the event.
type KeyHandler = Rc<dyn Fn() -> bool>;

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

struct HandlerRegistry {
    key_handlers: HashMap<String, Vec<(usize, KeyHandler)>>,
    next_id: usize,
}

impl HandlerRegistry {
    fn new() -> Self {
        Self {
            key_handlers: HashMap::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<HandlerRegistry> = RefCell::new(HandlerRegistry::new());
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Dispatch a key event to the handlers registered for that key.
/// Returns `true` if any handler consumed the event.
///
/// The handler list is snapshotted before invocation: a handler removed
/// during this dispatch still sees the current event, and a handler added
/// during it sees only the next one.
pub fn dispatch(event: KeyEvent) -> bool {
    let handlers: Vec<(usize, KeyHandler)> = REGISTRY.with(|reg| {
        reg.borrow()
            .key_handlers
            .get(&event.key)
            .cloned()
            .unwrap_or_default()
    });

    for (id, handler) in handlers {
        // Skip handlers deregistered earlier in this same batch
        let still_registered = REGISTRY.with(|reg| {
            reg.borrow()
                .key_handlers
                .get(&event.key)
                .is_some_and(|list| list.iter().any(|(hid, _)| *hid == id))
        });
        if still_registered && handler() {
            return true;
        }
    }
    false
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Subscribe to a specific key. Return `true` from the handler to consume
/// the event. Returns a cleanup that deregisters this exact handler.
pub fn on_key<F>(key: &str, handler: F) -> Cleanup
where
    F: Fn() -> bool + 'static,
{
    let key = key.to_string();
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.key_handlers
            .entry(key.clone())
            .or_default()
            .push((id, Rc::new(handler)));
        id
    });

    Box::new(move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(handlers) = reg.key_handlers.get_mut(&key) {
                handlers.retain(|(handler_id, _)| *handler_id != id);
                if handlers.is_empty() {
                    reg.key_handlers.remove(&key);
                }
            }
        });
    })
}

/// Number of handlers currently registered for a key.
pub fn handler_count(key: &str) -> usize {
    REGISTRY.with(|reg| {
        reg.borrow()
            .key_handlers
            .get(key)
            .map(|list| list.len())
            .unwrap_or(0)
    })
}

/// Clear all handlers (for testing).
pub fn reset_keyboard_state() {
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        reg.key_handlers.clear();
        reg.next_id = 0;
    });
}

// =============================================================================
// TESTS
// =============================================================================
