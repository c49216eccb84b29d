mod service_source;
mod synthetic_source;

pub use service_source::ServiceSource;
pub use synthetic_source::SyntheticSource;
