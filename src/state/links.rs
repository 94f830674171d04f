//! External Link Normalizer - outbound links open in isolated contexts
//!
//! Resolves every anchor's href against the document base URL and compares
//! hosts. Anchors landing on a different host are marked to open in a new
//! browsing context with opener isolation and no referrer. Primary
//! call-to-action buttons are exempt even when external; that is a
//! deliberate UX exception, not an oversight.
//!
//! Malformed hrefs (and a malformed base) are skipped silently: the single
//! affected link keeps its default behavior.

use url::Url;

use crate::error::PageError;
use crate::host::{DocumentHost, LocationHost};

// =============================================================================
// NORMALIZATION
// =============================================================================

/// Classify every anchor on the page and isolate the external ones.
///
/// One-shot at boot, after the anchor set has rendered. Idempotent:
/// isolation marking is a set operation, so running it again over already
/// normalized anchors changes nothing.
pub fn normalize_external_links(dom: &dyn DocumentHost, location: &dyn LocationHost) {
    let Ok(base) = Url::parse(&location.base_url()) else {
        // Without a usable base nothing can be classified
        return;
    };
    let page_host = authority_of(&base);

    for (index, anchor) in dom.anchors().iter().enumerate() {
        if anchor.is_primary_button {
            continue;
        }
        match resolve_host(&base, &anchor.href) {
            Ok(host) if host != page_host => dom.isolate_anchor(index),
            Ok(_) => {}
            // Malformed href: this one link keeps its default behavior
            Err(_) => {}
        }
    }
}

/// Resolve an href (possibly relative) against the base and return its
/// authority. Fragment-only and relative hrefs resolve to the page host.
fn resolve_host(base: &Url, href: &str) -> Result<String, PageError> {
    let resolved = base.join(href)?;
    Ok(authority_of(&resolved))
}

/// Host plus explicit port, matching how the platform's `location.host`
/// compares. Schemes without a host (mailto:, data:) yield an empty
/// authority, which never equals the page host.
fn authority_of(url: &Url) -> String {
    let host = url.host_str().unwrap_or("");
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
