mod log_notifier;
mod service_notifier;

pub use log_notifier::LogNotifier;
pub use service_notifier::ServiceNotifier;
