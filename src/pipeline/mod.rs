//! Page lifecycle pipeline
//!
//! The composition root that wires the page-level systems to host events
//! and tears them down on navigation:
//!
//! ```text
//! mount(hosts) -> header spacing -> theme -> scrollspy -> smooth anchors -> links
//! ```
//!
//! Per-component systems (lightbox, flow animation) are constructed by the
//! embedding layer, not here.

pub mod boot;

pub use boot::{PageHandle, PageHosts, mount};
