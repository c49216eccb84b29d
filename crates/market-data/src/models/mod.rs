//! Market data models
//!
//! - `sample` - One timestamped price observation (Sample, SampleOrigin)

mod sample;

pub use sample::{Sample, SampleOrigin};
