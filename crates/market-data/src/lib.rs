//! Pricewatch Market Data Crate
//!
//! This crate fetches the current price of a single instrument and turns it
//! into a [`Sample`] the rest of the system can display and alert on.
//!
//! # Overview
//!
//! - A provider-agnostic [`QuoteProvider`] trait
//! - An Alpha Vantage intraday implementation ([`AlphaVantageProvider`])
//! - A [`SyntheticGenerator`] producing demo samples around a baseline
//! - A [`QuoteService`] that applies a named [`FallbackPolicy`] when the
//!   provider fails
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |   QuoteService   | --> |  QuoteProvider   |  (Alpha Vantage, ...)
//! +------------------+     +------------------+
//!          |                        |
//!          | on failure             v
//!          v               +------------------+
//! +------------------+     |      Sample      |  origin = provider
//! |SyntheticGenerator| --> |      Sample      |  origin = fallback
//! +------------------+     +------------------+
//! ```

pub mod errors;
pub mod models;
pub mod provider;
pub mod service;
pub mod synthetic;

pub use errors::MarketDataError;
pub use models::{Sample, SampleOrigin};
pub use provider::alpha_vantage::AlphaVantageProvider;
pub use provider::QuoteProvider;
pub use service::{FallbackPolicy, QuoteService};
pub use synthetic::SyntheticGenerator;
