mod alerts_model;

pub use alerts_model::{evaluate, AlertDecision, AlertMessage};
