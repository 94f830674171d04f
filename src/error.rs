//! Error types for the page runtime.
//!
//! Every failure in this crate is non-fatal: the operation that detects it
//! either skips itself or disables the component that needed the missing
//! capability. Nothing here propagates to a user-visible surface. `PageError`
//! exists so init functions can report *why* they degraded and so fallible
//! host calls (storage, URL resolution) have a typed channel.

use thiserror::Error;

/// Non-fatal failures of the page runtime.
#[derive(Debug, Error)]
pub enum PageError {
    /// A referenced element id does not exist in the document.
    /// The triggering operation is skipped.
    #[error("element `{0}` does not exist")]
    MissingElement(String),

    /// The host lacks an observation primitive. The dependent component
    /// disables itself instead of polyfilling.
    #[error("host capability unavailable: {0}")]
    UnsupportedCapability(&'static str),

    /// The preference store rejected a read or write (quota, permissions).
    /// Theme application proceeds in memory without persistence.
    #[error("preference storage failed: {0}")]
    Storage(String),

    /// An anchor href could not be resolved against the document base.
    /// That single link keeps its default behavior.
    #[error("could not resolve link target: {0}")]
    MalformedUrl(#[from] url::ParseError),
}
