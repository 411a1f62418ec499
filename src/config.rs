//! Fixed protocol constants and the tunable parts of a [`T67xx`](crate::sensor::T67xx).

use fugit::MillisDurationU32;

/// Modbus address the T67xx answers on.
pub const SLAVE_ADDRESS: u8 = 0x15;

/// Function code for "read input registers".
pub const READ_INPUT_REGISTERS: u8 = 0x04;

/// The serial port used for sensor comms should be configured like so.
pub const BAUD_RATE: u32 = 19200;
/// Data bits per character.
pub const DATA_BITS: u8 = 8;
/// Parity, even.
pub const PARITY: Parity = Parity::Even;
/// Stop bits per character.
pub const STOP_BITS: u8 = 1;

/// Parity setting expected by the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Odd,
    Even,
}

/// Default wait between sending a request and reading the response.
pub const DEFAULT_RESPONSE_DELAY_MS: u32 = 100;

/// Tunable settings of a [`T67xx`](crate::sensor::T67xx).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// How long to wait after writing a request before reading the reply.
    ///
    /// The sensor has no "ready" signal and fills its output buffer slowly,
    /// so each transaction sleeps this long before the first read.
    pub response_delay: MillisDurationU32,
}

impl Config {
    pub const fn new(response_delay: MillisDurationU32) -> Self {
        Self { response_delay }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(MillisDurationU32::millis(DEFAULT_RESPONSE_DELAY_MS))
    }
}
