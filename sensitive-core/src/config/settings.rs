//! Settings map
//!
//! A bounded mapping from string keys to bool/int/float values. Missing
//! keys are simply absent; every reader supplies its own default.

use heapless::{LinearMap, String};
use serde::{Deserialize, Serialize};

/// Maximum key length in bytes
pub const MAX_KEY_LEN: usize = 16;

/// Maximum number of stored settings
pub const MAX_SETTINGS: usize = 8;

/// Setting key
pub type Key = String<MAX_KEY_LEN>;

/// Well-known setting keys
pub mod keys {
    /// Whether the control loop is running
    pub const ENABLED: &str = "enabled";
    /// Laser pre-range VCSEL pulse period
    pub const PRE_PERIOD: &str = "pre_period";
    /// Laser final-range VCSEL pulse period
    pub const FINAL_PERIOD: &str = "final_period";

    /// Keys the script reads
    pub const KNOWN: [&str; 3] = [ENABLED, PRE_PERIOD, FINAL_PERIOD];

    /// Whether the script reads `key`
    pub fn is_known(key: &str) -> bool {
        KNOWN.contains(&key)
    }
}

/// A stored value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigValue {
    Bool(bool),
    Int(i32),
    Float(f32),
}

/// Errors when updating settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// Key longer than [`MAX_KEY_LEN`]
    KeyTooLong,
    /// Map already holds [`MAX_SETTINGS`] other keys
    Full,
}

/// Settings map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    entries: LinearMap<Key, ConfigValue, MAX_SETTINGS>,
}

impl Settings {
    /// Create an empty map (all defaults)
    pub fn new() -> Self {
        Self {
            entries: LinearMap::new(),
        }
    }

    /// Look up a raw value
    pub fn get(&self, key: &str) -> Option<ConfigValue> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| *v)
    }

    /// Insert or replace a value
    pub fn set(&mut self, key: &str, value: ConfigValue) -> Result<(), SettingsError> {
        let mut k = Key::new();
        k.push_str(key).map_err(|_| SettingsError::KeyTooLong)?;
        self.entries
            .insert(k, value)
            .map(|_| ())
            .map_err(|_| SettingsError::Full)
    }

    /// Remove a value, returning it if present
    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        let k = self.entries.keys().find(|k| k.as_str() == key)?.clone();
        self.entries.remove(&k)
    }

    /// Boolean value, if present with that type
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            ConfigValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Integer value, if present with that type
    pub fn get_int(&self, key: &str) -> Option<i32> {
        match self.get(key)? {
            ConfigValue::Int(i) => Some(i),
            _ => None,
        }
    }

    /// Float value; integers are widened
    pub fn get_float(&self, key: &str) -> Option<f32> {
        match self.get(key)? {
            ConfigValue::Float(f) => Some(f),
            ConfigValue::Int(i) => Some(i as f32),
            ConfigValue::Bool(_) => None,
        }
    }

    /// Persisted run state, `true` unless stored otherwise
    pub fn enabled(&self) -> bool {
        self.get_bool(keys::ENABLED).unwrap_or(true)
    }

    /// Record the run state
    ///
    /// The flag always gets a slot: on a full map one key the script does
    /// not read is dropped to make room.
    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), SettingsError> {
        let value = ConfigValue::Bool(enabled);
        match self.set(keys::ENABLED, value) {
            Err(SettingsError::Full) => {
                let unknown = self
                    .entries
                    .keys()
                    .find(|k| !keys::is_known(k.as_str()))
                    .cloned();
                if let Some(unknown) = unknown {
                    warn!("Settings full, dropping {}", unknown.as_str());
                    self.entries.remove(&unknown);
                }
                self.set(keys::ENABLED, value)
            }
            other => other,
        }
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over key/value pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, ConfigValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
