//! Settings persistence
//!
//! The control loop loads settings once at boot and writes them back on
//! every run/pause toggle. Any load failure means "use defaults".

use serde::{Deserialize, Serialize};

use sensitive_hal::flash::{FlashError, FlashStorage, StorageKey};

use super::settings::Settings;

/// Current layout version of the stored blob
pub const STATE_VERSION: u8 = 1;

/// Maximum encoded size of the stored blob
pub const MAX_STATE_SIZE: usize = 256;

/// Persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Flash operation failed
    Flash(FlashError),
    /// Encoding failed (blob too large)
    Encode,
    /// Stored blob does not decode
    Decode,
    /// Stored blob has another layout version
    VersionMismatch,
}

impl From<FlashError> for StoreError {
    fn from(e: FlashError) -> Self {
        StoreError::Flash(e)
    }
}

/// Where settings live between power cycles
pub trait ConfigStore {
    /// Load the stored settings
    fn load(&mut self) -> Result<Settings, StoreError>;

    /// Persist the settings, replacing what was stored
    fn save(&mut self, settings: &Settings) -> Result<(), StoreError>;
}

#[derive(Serialize)]
struct StoredStateRef<'a> {
    version: u8,
    settings: &'a Settings,
}

#[derive(Deserialize)]
struct StoredState {
    version: u8,
    settings: Settings,
}

/// Settings stored as a versioned postcard blob in flash
pub struct FlashConfigStore<F> {
    storage: F,
}

impl<F: FlashStorage> FlashConfigStore<F> {
    /// Create a store on top of flash storage
    pub fn new(storage: F) -> Self {
        Self { storage }
    }

    /// Give back the underlying storage
    pub fn into_storage(self) -> F {
        self.storage
    }

    /// Access the underlying storage
    pub fn storage(&self) -> &F {
        &self.storage
    }
}

impl<F: FlashStorage> ConfigStore for FlashConfigStore<F> {
    fn load(&mut self) -> Result<Settings, StoreError> {
        let mut buffer = [0u8; MAX_STATE_SIZE];
        let len = self.storage.read(StorageKey::ScriptState, &mut buffer)?;
        debug!("Read {} bytes of script state", len);

        let bytes = buffer.get(..len).ok_or(StoreError::Decode)?;
        let state: StoredState = postcard::from_bytes(bytes).map_err(|_| StoreError::Decode)?;

        if state.version != STATE_VERSION {
            warn!(
                "Script state version mismatch: found {}, expected {}",
                state.version, STATE_VERSION
            );
            return Err(StoreError::VersionMismatch);
        }

        Ok(state.settings)
    }

    fn save(&mut self, settings: &Settings) -> Result<(), StoreError> {
        let mut buffer = [0u8; MAX_STATE_SIZE];
        let state = StoredStateRef {
            version: STATE_VERSION,
            settings,
        };
        let encoded = postcard::to_slice(&state, &mut buffer).map_err(|_| StoreError::Encode)?;

        self.storage.write(StorageKey::ScriptState, encoded)?;
        debug!("Saved {} bytes of script state", encoded.len());
        Ok(())
    }
}
