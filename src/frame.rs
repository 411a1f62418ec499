//! Byte layout of the request and response frames.
//!
//! Requests are a fixed 8 bytes:
//! `[address][command][register hi][register lo][count hi][count lo][crc lo][crc hi]`.
//!
//! Responses are length prefixed:
//! `[address][command][N][N bytes of payload][crc lo][crc hi]`.
//! The serial link has no delimiter, so a response is read in two steps: the
//! 3 byte header, then exactly `N + 2` bytes.

use crate::{
    crc,
    error::{ChecksumError, Error, Result},
};

/// Address, command and length byte at the start of every response.
pub const HEADER_LEN: usize = 3;
/// Trailing checksum bytes of every frame.
pub const CHECKSUM_LEN: usize = 2;
/// Request without its checksum.
pub const REQUEST_BODY_LEN: usize = 6;
/// Request as written to the wire.
pub const REQUEST_LEN: usize = REQUEST_BODY_LEN + CHECKSUM_LEN;
/// Largest body a one byte length field can announce, checksum included.
pub const MAX_BODY_LEN: usize = u8::MAX as usize + CHECKSUM_LEN;
/// Largest complete response frame.
pub const MAX_FRAME_LEN: usize = HEADER_LEN + MAX_BODY_LEN;

/// Set on the echoed command byte when the sensor refuses a request.
const EXCEPTION_FLAG: u8 = 0x80;

/// Payload and checksum bytes following a [`Header`].
pub type Body = heapless::Vec<u8, MAX_BODY_LEN>;
/// A whole response frame, kept for diagnostics.
pub type RawFrame = heapless::Vec<u8, MAX_FRAME_LEN>;

/// Lay out a register read request without its checksum.
pub fn build_request(
    slave_addr: u8,
    command: u8,
    register_addr: u16,
    register_count: u16,
) -> [u8; REQUEST_BODY_LEN] {
    let [addr_hi, addr_lo] = register_addr.to_be_bytes();
    let [count_hi, count_lo] = register_count.to_be_bytes();
    [slave_addr, command, addr_hi, addr_lo, count_hi, count_lo]
}

/// Append the checksum, low byte first, to a request body.
pub fn append_checksum(body: [u8; REQUEST_BODY_LEN]) -> Request {
    let [crc_lo, crc_hi] = crc::to_wire(crc::compute(&body));
    let mut frame = [0u8; REQUEST_LEN];
    frame[..REQUEST_BODY_LEN].copy_from_slice(&body);
    frame[REQUEST_BODY_LEN] = crc_lo;
    frame[REQUEST_BODY_LEN + 1] = crc_hi;
    Request(frame)
}

/// A complete request frame, ready to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request([u8; REQUEST_LEN]);

impl Request {
    pub fn new(slave_addr: u8, command: u8, register_addr: u16, register_count: u16) -> Self {
        append_checksum(build_request(
            slave_addr,
            command,
            register_addr,
            register_count,
        ))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// The first three bytes of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub address: u8,
    pub command: u8,
    /// Payload length, or the exception code for an exception response.
    pub length: u8,
}

impl Header {
    pub fn from_bytes(bytes: [u8; HEADER_LEN]) -> Self {
        let [address, command, length] = bytes;
        Self {
            address,
            command,
            length,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        [self.address, self.command, self.length]
    }

    /// The sensor rejected the request. Only a checksum follows the header.
    pub fn is_exception(&self) -> bool {
        self.command & EXCEPTION_FLAG != 0
    }

    /// Payload bytes still to be read after the header.
    pub fn payload_len(&self) -> u8 {
        if self.is_exception() { 0 } else { self.length }
    }
}

/// Read the fixed size response header.
pub fn read_header<S: embedded_io::Read>(transport: &mut S) -> Result<Header, S::Error> {
    let mut bytes = [0u8; HEADER_LEN];
    transport.read_exact(&mut bytes)?;
    Ok(Header::from_bytes(bytes))
}

/// Read `length` payload bytes plus the two checksum bytes.
pub fn read_body<S: embedded_io::Read>(transport: &mut S, length: u8) -> Result<Body, S::Error> {
    let mut body = Body::new();
    body.resize(length as usize + CHECKSUM_LEN, 0)
        .map_err(|_| Error::BufferError)?;
    transport.read_exact(&mut body)?;
    Ok(body)
}

/// Check the trailing checksum of a response and return its payload.
///
/// A body shorter than the checksum itself can never validate; its missing
/// checksum bytes are reported as zero.
pub fn validate<'b>(
    header: &Header,
    body: &'b [u8],
) -> core::result::Result<&'b [u8], ChecksumError> {
    let split = body.len().saturating_sub(CHECKSUM_LEN);
    let (payload, trailer) = body.split_at(split);

    let header_bytes = header.to_bytes();
    let mut covered: RawFrame = RawFrame::new();
    covered.extend(
        header_bytes
            .iter()
            .chain(payload)
            .copied()
            .take(MAX_FRAME_LEN),
    );
    let expected = crc::compute(&covered);

    let received = match trailer {
        [low, high] => crc::from_wire(*low, *high),
        _ => 0,
    };

    if expected == received {
        Ok(payload)
    } else {
        let mut frame = RawFrame::new();
        frame.extend(
            header_bytes
                .iter()
                .chain(body)
                .copied()
                .take(MAX_FRAME_LEN),
        );
        Err(ChecksumError {
            expected,
            received,
            frame,
        })
    }
}

/// Big endian value of the first register in a payload.
pub fn decode_u16(payload: &[u8]) -> Option<u16> {
    match payload {
        [high, low, ..] => Some(u16::from_be_bytes([*high, *low])),
        _ => None,
    }
}
