//! Input registers of the T67xx and the decoding of the status register.

use modular_bitfield::prelude::*;
use strum_macros::EnumIter;

/// Read-only input registers exposed by the sensor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter)]
#[repr(u16)]
pub enum Register {
    /// __R__ - Status bit flags.
    ///
    /// See [`StatusFlags`] for the meaning of each bit.
    Status = 0x138A,
    /// __R__ - Gas concentration in parts-per-million, no further scaling.
    GasPpm = 0x138B,
}

impl Register {
    /// Register start address as sent in the request frame.
    pub const fn address(self) -> u16 {
        self as u16
    }

    /// Number of 16-bit registers requested in one read.
    pub const fn count(self) -> u16 {
        0x0001
    }
}

impl From<Register> for u16 {
    fn from(value: Register) -> Self {
        value as u16
    }
}

/// Decoded "STATUS" register.
///
/// Bits that aren't named here are reserved by the device and ignored.
#[bitfield(bits = 16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFlags {
    /// Bit 0: general error.
    pub error: bool,
    /// Bit 1: flash memory error.
    pub flash_error: bool,
    /// Bit 2: calibration error.
    pub calibration_error: bool,
    #[skip]
    reserved_low: B5,
    /// Bit 8: RS-232 interface active.
    pub rs232: bool,
    /// Bit 9: RS-485 interface active.
    pub rs485: bool,
    /// Bit 10: I2C interface active.
    pub i2c: bool,
    /// Bit 11: sensor is still warming up, readings are not yet valid.
    pub warmup_mode: bool,
    #[skip]
    reserved_high: B3,
    /// Bit 15: single point calibration in progress.
    pub singlepoint_calibration: bool,
}

impl StatusFlags {
    /// The register value these flags were decoded from.
    pub fn raw(&self) -> u16 {
        u16::from_le_bytes(self.into_bytes())
    }

    /// Whether any of the error bits is set.
    pub fn has_fault(&self) -> bool {
        self.error() || self.flash_error() || self.calibration_error()
    }
}

impl From<u16> for StatusFlags {
    fn from(value: u16) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }
}

impl From<StatusFlags> for u16 {
    fn from(value: StatusFlags) -> Self {
        value.raw()
    }
}
