//! Optional hooks for observing the traffic of a [`T67xx`](crate::sensor::T67xx).
//!
//! The protocol code never depends on a sink being present: `()` is the
//! "nothing attached" implementation.

use crate::{error::ChecksumError, register::Register};

/// Receives a callback at each step of a transaction.
///
/// Every method has an empty default, so implementors only pick what they need.
pub trait Diagnostics {
    /// A complete request frame was written.
    fn request_sent(&mut self, _frame: &[u8]) {}

    /// Header and body of a response were read, before validation.
    fn response_received(&mut self, _header: &[u8], _body: &[u8]) {}

    /// A response failed its checksum and is about to be rejected.
    fn checksum_mismatch(&mut self, _error: &ChecksumError) {}

    /// A register value was decoded from a valid response.
    fn value_decoded(&mut self, _register: Register, _value: u16) {}
}

impl Diagnostics for () {}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn request_sent(&mut self, frame: &[u8]) {
        (**self).request_sent(frame)
    }

    fn response_received(&mut self, header: &[u8], body: &[u8]) {
        (**self).response_received(header, body)
    }

    fn checksum_mismatch(&mut self, error: &ChecksumError) {
        (**self).checksum_mismatch(error)
    }

    fn value_decoded(&mut self, register: Register, value: u16) {
        (**self).value_decoded(register, value)
    }
}

/// Forwards every event to the [`log`] facade.
///
/// Frames go out at `debug`, checksum failures at `warn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn request_sent(&mut self, frame: &[u8]) {
        log::debug!("[t67xx] request {:02X?}", frame);
    }

    fn response_received(&mut self, header: &[u8], body: &[u8]) {
        log::debug!("[t67xx] response header {:02X?} body {:02X?}", header, body);
    }

    fn checksum_mismatch(&mut self, error: &ChecksumError) {
        log::warn!(
            "[t67xx] computed crc 0x{:04x}, received crc 0x{:04x}, frame {:02X?}",
            error.expected,
            error.received,
            error.frame
        );
    }

    fn value_decoded(&mut self, register: Register, value: u16) {
        log::debug!("[t67xx] {:?} = {}", register, value);
    }
}
