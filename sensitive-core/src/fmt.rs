//! Logging macros
//!
//! Forward to `defmt` when the `defmt` feature is enabled and compile to
//! nothing otherwise, so host tests run without a global logger.
//! Arguments are still evaluated in the disabled case; pass references or
//! `Copy` values.

#![macro_use]
#![allow(unused_macros)]

#[cfg(feature = "defmt")]
macro_rules! trace {
    ($($arg:tt)*) => {
        ::defmt::trace!($($arg)*)
    };
}

#[cfg(feature = "defmt")]
macro_rules! debug {
    ($($arg:tt)*) => {
        ::defmt::debug!($($arg)*)
    };
}

#[cfg(feature = "defmt")]
macro_rules! info {
    ($($arg:tt)*) => {
        ::defmt::info!($($arg)*)
    };
}

#[cfg(feature = "defmt")]
macro_rules! warn {
    ($($arg:tt)*) => {
        ::defmt::warn!($($arg)*)
    };
}

#[cfg(feature = "defmt")]
macro_rules! error {
    ($($arg:tt)*) => {
        ::defmt::error!($($arg)*)
    };
}

#[cfg(not(feature = "defmt"))]
macro_rules! trace {
    ($($arg:tt)*) => {{
        let _ = ($($arg)*);
    }};
}

#[cfg(not(feature = "defmt"))]
macro_rules! debug {
    ($($arg:tt)*) => {{
        let _ = ($($arg)*);
    }};
}

#[cfg(not(feature = "defmt"))]
macro_rules! info {
    ($($arg:tt)*) => {{
        let _ = ($($arg)*);
    }};
}

#[cfg(not(feature = "defmt"))]
macro_rules! warn {
    ($($arg:tt)*) => {{
        let _ = ($($arg)*);
    }};
}

#[cfg(not(feature = "defmt"))]
macro_rules! error {
    ($($arg:tt)*) => {{
        let _ = ($($arg)*);
    }};
}
