//! Configuration types
//!
//! Runtime settings are a small string-keyed map persisted as postcard
//! binary data. Typed views (like the laser timing) read from it with
//! per-key defaults.

pub mod calibration;
pub mod persistence;
pub mod settings;

pub use calibration::LaserTiming;
pub use persistence::{ConfigStore, FlashConfigStore, StoreError};
pub use settings::{keys, ConfigValue, Settings, SettingsError, MAX_SETTINGS};
