//! This crate provides an interface for reading the Telaire T67xx series of CO2 sensors over
//! their serial Modbus interface.
//!
//! It supports `no-std` environments by use of the `no_std` feature flag.
//!
//! Sensor models which this should work with:
//! * T6703
//! * T6713
//! * T6715
//!
//! Only two read-only input registers are used: the status flags and the gas concentration in
//! ppm. Configuration and calibration commands are not supported.
//!
//! The serial port used for sensor comms should be configured like so:
//! * Baud rate: 19200
//! * Data bits: 8
//! * Stop bits: 1
//! * Parity: Even
//!
//! The port must have a finite read timeout. A read which times out is reported as an
//! [`Error::SerialError`](error::Error::SerialError) rather than hanging.

#![cfg_attr(feature = "no_std", no_std)]

pub mod config;
pub mod crc;
pub mod diagnostics;
pub mod error;
pub mod frame;
pub mod register;
pub mod sensor;

pub use config::Config;
pub use diagnostics::{Diagnostics, LogDiagnostics};
pub use error::{ChecksumError, Error};
pub use register::{Register, StatusFlags};
pub use sensor::T67xx;

#[cfg(test)]
mod mock_serial;
