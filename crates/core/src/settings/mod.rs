pub mod settings_model;
pub mod settings_service;
pub mod settings_store;

pub use settings_model::{Settings, SettingsForm};
pub use settings_service::SettingsService;
pub use settings_store::{FileSettingsStore, MemorySettingsStore, SettingsStore};
