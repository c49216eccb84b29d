//! Quote service: the provider call plus the fallback policy applied when it fails.

mod fallback;
mod quote_service;

pub use fallback::FallbackPolicy;
pub use quote_service::QuoteService;
