//! Utils - Settings and Local File Storage

pub mod config_store;
pub mod settings;

pub use config_store::ConfigStore;
pub use settings::Settings;
