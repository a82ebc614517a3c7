//! TSTP data frame header (§3.2): one config byte, a confidence byte,
//! an 8-byte origin time, origin coordinates at the active [`Scale`],
//! an 8-byte last-hop time, and last-hop coordinates at the same
//! scale.
//!
//! The config byte is a `#[bitfield]`, the same way the teacher packs
//! `DownlinkFrameControl`/`UplinkFrameControl`. The variable-width
//! coordinate section can't be expressed as one fixed bitfield layout,
//! so the rest of the header is a raw-slice reader/writer, the same
//! pattern the teacher uses for `FrameHeaderBuf`.

use crate::error::{Error, Result};
use modular_bitfield::prelude::*;

#[bitfield(bits = 8)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    #[bits = 2]
    pub scale: Scale,
    pub time_request: bool,
    #[bits = 2]
    pub msg_type: MessageType,
    pub version: B3,
}

/// Coordinate width selected by expected network size (§3.3).
#[repr(u8)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, BitfieldSpecifier)]
pub enum Scale {
    /// ≤ 10 nodes, 8-bit coordinates, 50 cm/unit.
    Single = 0b00,
    /// ≤ 100 nodes, 16-bit coordinates, 50 cm/unit.
    Double = 0b01,
    /// ≤ 10 000 nodes, 16-bit coordinates, 25 cm/unit.
    Quadruple = 0b10,
    /// else, 32-bit coordinates, 25 cm/unit.
    Octuple = 0b11,
}

impl Scale {
    pub const fn coordinate_bytes(self) -> usize {
        match self {
            Scale::Single => 1,
            Scale::Double | Scale::Quadruple => 2,
            Scale::Octuple => 4,
        }
    }
}

/// Begins at 4 to avoid colliding with IEEE 802.15.4 reserved frame-type
/// values (§3.2).
#[repr(u8)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, BitfieldSpecifier)]
pub enum MessageType {
    Interest = 0,
    Response = 1,
    Command = 2,
    Control = 3,
}

impl TryFrom<u8> for MessageType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Ok(match value {
            0 => MessageType::Interest,
            1 => MessageType::Response,
            2 => MessageType::Command,
            3 => MessageType::Control,
            _ => return Err(Error::UnknownType),
        })
    }
}

/// Fixed portion of the header excluding the variable-width coordinate
/// fields: config byte, confidence byte, origin time, last-hop time.
pub const HEADER_FIXED_SIZE: usize = 1 + 1 + 8 + 8;

/// A decoded header plus the byte offsets of its variable-width
/// coordinate fields, so a caller can read/write coordinates at the
/// right [`Scale`] without a second parse.
#[derive(Debug, Clone, Copy)]
pub struct Header {
    pub config: Config,
    pub confidence: u8,
    pub origin_time: u64,
    pub last_hop_time: u64,
}

impl Header {
    /// Total wire size of a header carrying coordinates at `scale`.
    pub const fn wire_size(scale: Scale) -> usize {
        HEADER_FIXED_SIZE + 2 * scale.coordinate_bytes() * 3
    }

    pub fn encode(&self, out: &mut [u8]) -> Result<usize> {
        let size = Self::wire_size(self.config.scale());
        if out.len() < size {
            return Err(Error::Truncated);
        }
        out[0] = self.config.into_bytes()[0];
        out[1] = self.confidence;
        out[2..10].copy_from_slice(&self.origin_time.to_le_bytes());
        out[10..18].copy_from_slice(&self.last_hop_time.to_le_bytes());
        Ok(size)
    }

    pub fn decode(bytes: &[u8]) -> Result<(Self, usize)> {
        if bytes.len() < HEADER_FIXED_SIZE {
            return Err(Error::Truncated);
        }
        let config = Config::from_bytes([bytes[0]]);
        let confidence = bytes[1];
        let origin_time = u64::from_le_bytes(bytes[2..10].try_into().unwrap());
        let last_hop_time = u64::from_le_bytes(bytes[10..18].try_into().unwrap());
        let size = Self::wire_size(config.scale());
        if bytes.len() < size {
            return Err(Error::Truncated);
        }
        Ok((
            Header {
                config,
                confidence,
                origin_time,
                last_hop_time,
            },
            size,
        ))
    }

    /// Byte offset of the origin-coordinates field within the encoded header.
    pub const fn origin_coordinates_offset() -> usize {
        HEADER_FIXED_SIZE
    }

    /// Byte offset of the last-hop-coordinates field within the encoded header.
    pub const fn last_hop_coordinates_offset(scale: Scale) -> usize {
        HEADER_FIXED_SIZE + scale.coordinate_bytes() * 3
    }
}

/// Encode a signed coordinate triple at the given [`Scale`] into `out`,
/// least-significant-byte first per component, x then y then z.
pub fn encode_coordinates_i32(scale: Scale, xyz: [i32; 3], out: &mut [u8]) -> Result<()> {
    let n = scale.coordinate_bytes();
    if out.len() < n * 3 {
        return Err(Error::Truncated);
    }
    for (i, v) in xyz.into_iter().enumerate() {
        let bytes = v.to_le_bytes();
        out[i * n..i * n + n].copy_from_slice(&bytes[..n]);
    }
    Ok(())
}

/// Decode a signed coordinate triple at the given [`Scale`], sign-extending
/// each component to `i32`.
pub fn decode_coordinates_i32(scale: Scale, bytes: &[u8]) -> Result<[i32; 3]> {
    let n = scale.coordinate_bytes();
    if bytes.len() < n * 3 {
        return Err(Error::Truncated);
    }
    let mut out = [0i32; 3];
    for (i, slot) in out.iter_mut().enumerate() {
        let component = &bytes[i * n..i * n + n];
        let sign_bit_set = component[n - 1] & 0x80 != 0;
        let mut buf = if sign_bit_set { [0xffu8; 4] } else { [0u8; 4] };
        buf[..n].copy_from_slice(component);
        *slot = i32::from_le_bytes(buf);
    }
    Ok(out)
}
