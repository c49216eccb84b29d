//! Quote provider abstractions and implementations.
//!
//! This module contains:
//! - The `QuoteProvider` trait that all providers implement
//! - The Alpha Vantage intraday provider
//!
//! Providers only report the latest observed price. Deciding what to do when
//! a provider fails is the job of [`QuoteService`](crate::QuoteService).

mod traits;

pub mod alpha_vantage;

pub use traits::QuoteProvider;
