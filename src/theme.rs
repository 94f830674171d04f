//! Theme Preference Manager - persisted user theme choice.
//!
//! One well-known key in the host's key-value store holds the user's theme
//! choice; the document theme attribute mirrors it. Default is dark when
//! the key is missing or holds an unrecognized value.
//!
//! Invariant: immediately after any write, the applied DOM attribute and
//! the persisted value are equal. Storage failures degrade to
//! apply-without-persisting; they never fail the click handler.
//!
//! # Example
//!
//! ```ignore
//! use spark_page::theme::{self, ThemeChoice};
//!
//! theme::init(&*store, &*dom);
//! theme::set_preference(&*store, &*dom, ThemeChoice::Light);
//! assert_eq!(theme::current_theme(), ThemeChoice::Light);
//! ```

use spark_signals::{Signal, signal};

use crate::host::{DocumentHost, KeyValueStore};
use crate::state::header;

/// Storage key for the persisted choice.
pub const THEME_KEY: &str = "gp_theme_choice";

// =============================================================================
// ThemeChoice
// =============================================================================

/// Recognized theme choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeChoice {
    /// Default when nothing (or garbage) is persisted.
    #[default]
    Dark,
    Light,
    /// High-contrast accessibility palette.
    HighContrast,
}

impl ThemeChoice {
    /// Parse from the persisted string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            "high-contrast" => Some(Self::HighContrast),
            _ => None,
        }
    }

    /// Name used for both persistence and the DOM theme attribute.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::HighContrast => "high-contrast",
        }
    }

    /// All recognized choices.
    pub const fn all() -> &'static [ThemeChoice] {
        &[Self::Dark, Self::Light, Self::HighContrast]
    }
}

// =============================================================================
// CURRENT THEME SIGNAL
// =============================================================================

thread_local! {
    static CURRENT_THEME: Signal<ThemeChoice> = signal(ThemeChoice::Dark);
}

/// Currently applied theme choice.
pub fn current_theme() -> ThemeChoice {
    CURRENT_THEME.with(|s| s.get())
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Read the persisted preference and apply it.
///
/// Missing or unrecognized stored values fall back to [`ThemeChoice::Dark`].
/// Never writes back to storage: a fresh visitor stays unwritten until they
/// actually pick a theme.
pub fn init(store: &dyn KeyValueStore, dom: &dyn DocumentHost) {
    let choice = store
        .get(THEME_KEY)
        .and_then(|raw| ThemeChoice::from_str(&raw))
        .unwrap_or_default();

    apply(dom, choice);
}

/// Persist and apply a theme choice.
///
/// The DOM attribute is applied first, then the value is persisted; a
/// failed write leaves the applied theme in place (in-memory degradation).
/// Finishes with a header re-measurement, since visual density can change
/// the header's rendered height. Idempotent: repeating the same choice
/// produces the identical final DOM and storage state.
///
/// Unrecognized raw strings never reach this function; they are rejected at
/// the [`ThemeChoice::from_str`] boundary with no state change and no write.
pub fn set_preference(store: &dyn KeyValueStore, dom: &dyn DocumentHost, choice: ThemeChoice) {
    apply(dom, choice);

    // Quota or permission failures degrade to apply-without-persist
    let _ = store.set(THEME_KEY, choice.as_str());

    // Header colors and font metrics may change size slightly
    header::measure(dom);
}

fn apply(dom: &dyn DocumentHost, choice: ThemeChoice) {
    dom.apply_theme(choice.as_str());
    CURRENT_THEME.with(|s| s.set(choice));
}

/// Reset the theme signal (for testing).
pub fn reset_theme_state() {
    CURRENT_THEME.with(|s| s.set(ThemeChoice::Dark));
}

// =============================================================================
// TESTS
// =============================================================================
