//! CRC-16/MODBUS as used by the T67xx to protect every frame.
//!
//! Seed `0xFFFF`, reflected polynomial `0xA001`. The sensor rejects any other
//! variant, so this has to match bit for bit.

const SEED: u16 = 0xFFFF;
const POLYNOMIAL: u16 = 0xA001;

/// Compute the checksum over `bytes`.
///
/// An empty slice yields the seed value.
pub fn compute(bytes: &[u8]) -> u16 {
    let mut crc = SEED;
    for &byte in bytes {
        crc ^= byte as u16;
        for _ in 0..8 {
            if crc & 0x0001 != 0 {
                crc = (crc >> 1) ^ POLYNOMIAL;
            } else {
                crc >>= 1;
            }
        }
    }
    crc
}

/// Checksum as it goes on the wire: low byte first, then high byte.
pub fn to_wire(crc: u16) -> [u8; 2] {
    crc.to_le_bytes()
}

/// Rebuild a checksum from its two trailing wire bytes.
pub fn from_wire(low: u8, high: u8) -> u16 {
    ((high as u16) << 8) | low as u16
}
