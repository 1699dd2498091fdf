//! I2C bus abstractions
//!
//! The sensors share a single bus. Discovery happens once at boot by
//! probing every non-reserved 7-bit address.

use heapless::Vec;

/// First non-reserved 7-bit address
pub const FIRST_ADDRESS: u8 = 0x08;

/// Last non-reserved 7-bit address
pub const LAST_ADDRESS: u8 = 0x77;

/// Upper bound on devices a scan can report
pub const MAX_DEVICES: usize = (LAST_ADDRESS - FIRST_ADDRESS + 1) as usize;

/// I2C bus master
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Check whether a device acknowledges its address
    ///
    /// Issues an empty write; only the address phase reaches the wire.
    fn probe(&mut self, address: u8) -> bool {
        self.write(address, &[]).is_ok()
    }

    /// Probe the whole address range and collect the responders
    fn scan(&mut self) -> PresentDevices {
        let mut present = PresentDevices::new();
        for address in FIRST_ADDRESS..=LAST_ADDRESS {
            if self.probe(address) {
                present.insert(address);
            }
        }
        present
    }
}

/// Set of addresses that answered a bus scan, in ascending order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PresentDevices {
    addresses: Vec<u8, MAX_DEVICES>,
}

impl PresentDevices {
    /// Create an empty set
    pub const fn new() -> Self {
        Self {
            addresses: Vec::new(),
        }
    }

    /// Record an address as present
    ///
    /// Reserved addresses and duplicates are ignored.
    pub fn insert(&mut self, address: u8) {
        if !(FIRST_ADDRESS..=LAST_ADDRESS).contains(&address) {
            return;
        }
        if let Err(pos) = self.addresses.binary_search(&address) {
            // Capacity covers the full address range
            let _ = self.addresses.insert(pos, address);
        }
    }

    /// Check if an address answered
    pub fn contains(&self, address: u8) -> bool {
        self.addresses.binary_search(&address).is_ok()
    }

    /// Present addresses in ascending order
    pub fn as_slice(&self) -> &[u8] {
        &self.addresses
    }

    /// Number of devices found
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// True if nothing answered
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

impl FromIterator<u8> for PresentDevices {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        let mut present = Self::new();
        for address in iter {
            present.insert(address);
        }
        present
    }
}

/// Adapter exposing any `embedded-hal` 1.0 blocking I2C bus as an [`I2cBus`]
pub struct EmbeddedHalBus<I>(pub I);

impl<I> EmbeddedHalBus<I> {
    /// Give back the wrapped bus
    pub fn into_inner(self) -> I {
        self.0
    }
}

impl<I: embedded_hal::i2c::I2c> I2cBus for EmbeddedHalBus<I> {
    type Error = I::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.0.read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.0.write_read(address, write_data, read_buf)
    }
}
