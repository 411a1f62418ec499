//! Our error types for the T67xx sensors.

use thiserror::Error;

use crate::frame::RawFrame;

pub type Result<T, I> = core::result::Result<T, Error<I>>;

/// Custom error type for T67xx communications.
#[derive(Error, Debug)]
pub enum Error<I: embedded_io::Error> {
    #[error("Serial communication error")]
    SerialError(I),
    #[error("Serial port returned fewer bytes than requested")]
    ShortRead,
    #[error("Frame does not fit in the receive buffer")]
    BufferError,
    #[error(transparent)]
    Checksum(#[from] ChecksumError),
    #[error("Sensor replied with exception code {0:#04x}")]
    Exception(u8),
    #[error("Response from address {address:#04x} with command {command:#04x} does not match the request")]
    UnexpectedResponse { address: u8, command: u8 },
    #[error("Response payload of {0} bytes is too short for a register value")]
    PayloadTooShort(usize),
}

impl<I: embedded_io::Error> Error<I> {
    /// Whether the underlying read/write failed, as opposed to a frame which arrived but was rejected.
    ///
    /// Transport failures only abort the current transaction, the next call may succeed.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::SerialError(_) | Error::ShortRead)
    }
}

impl<I: embedded_io::Error> From<embedded_io::ReadExactError<I>> for Error<I> {
    fn from(err: embedded_io::ReadExactError<I>) -> Self {
        match err {
            embedded_io::ReadExactError::UnexpectedEof => Error::ShortRead,
            embedded_io::ReadExactError::Other(e) => Error::SerialError(e),
        }
    }
}

/// A received frame failed its integrity check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Received crc is invalid (expected {expected:#06x}, received {received:#06x}, frame {frame:02X?})")]
pub struct ChecksumError {
    /// Checksum computed over the received header and payload.
    pub expected: u16,
    /// Checksum carried in the last two bytes of the frame.
    pub received: u16,
    /// Every byte of the frame as it came off the wire.
    pub frame: RawFrame,
}
