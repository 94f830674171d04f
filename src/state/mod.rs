//! State Module - the page-view interaction systems
//!
//! Each submodule owns one interaction concern, driven by host callbacks:
//!
//! - **Header** - fixed-header height measurement and publication
//! - **Scrollspy** - which section is currently being read
//! - **Anchors** - smooth in-page scrolling with header compensation
//! - **Links** - outbound link isolation
//! - **Keyboard** - key event dispatch and handler registry
//! - **Lightbox** - fullscreen image viewer lifecycle and scroll lock
//! - **Motion** - visibility plus reduced-motion animation gating

pub mod anchors;
pub mod header;
pub mod keyboard;
pub mod lightbox;
pub mod links;
pub mod motion;
pub mod scrollspy;
