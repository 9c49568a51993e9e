// src/checker/mod.rs
// =============================================================================
// This module contains everything that works on a single link.
//
// Submodules:
// - markdown: Extracts raw links from README markdown
// - html: Extracts raw links from HTML embedded in that markdown
// - normalize: Makes raw links absolute using the owning repository
// - http: Probes a URL and decides whether it is alive
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

mod html;
mod http;
mod markdown;
mod normalize;

pub use http::{HttpProbe, Probe, ProbeResult, ProbeSettings, RateLimitPolicy};
pub use markdown::extract_links;
pub use normalize::{LinkNormalizer, DEFAULT_LINK_HOST};
