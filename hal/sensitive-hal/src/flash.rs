//! Flash storage abstractions
//!
//! Persistent key-value storage for the script state blob. Access is
//! blocking: the control loop is single-threaded and only touches
//! storage at boot and on a toggle.

/// Storage keys for persisted data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageKey {
    /// Script settings map (postcard)
    ScriptState,
}

/// Errors from flash storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Flash operation failed
    Flash,
    /// Key not found
    NotFound,
    /// Buffer too small for the data
    BufferTooSmall,
}

/// Flash storage trait
pub trait FlashStorage {
    /// Read a value by key into the provided buffer
    ///
    /// # Returns
    /// The number of bytes read, or an error.
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError>;

    /// Write a value by key, replacing any previous value
    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError>;
}
