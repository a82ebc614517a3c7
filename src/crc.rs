//! Software CRC-16 helper (§4.9, §6.3).
//!
//! Most radios validate the over-the-air CRC in hardware and expose the
//! verdict through [`crate::radio::Radio::filter`]; this function backs
//! the software path, and the teacher's own `Beacon` frame validation,
//! for drivers or tests that don't.

/// CRC-16 over `data`, using the same polynomial as the teacher's
/// `Beacon` frame validation (`crc_0x8810::CRC_16_LORA`).
pub fn crc16(data: &[u8]) -> u16 {
    crc_0x8810::CRC_16_LORA.checksum(data)
}
