//! The Microframe preamble element (§3.2, §6.3): 64 bits, transmitted
//! back-to-back `Tᵢ` µs apart during a preamble train.
//!
//! Packed the same way the teacher packs `MacHeader`/`DlSettings`: a
//! `#[bitfield]` struct with explicit bit widths. The 16-bit CRC that
//! rides alongside each Microframe over the air is a PHY trailer
//! validated by the Radio driver's `filter()` contract, not a field of
//! this type (see [`crate::crc`]).

use modular_bitfield::prelude::*;

#[bitfield(bits = 64)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Microframe {
    /// Forces every receiver, not just geographically closer ones, to
    /// treat this message as relevant (used for downlink/broadcast to
    /// the sink).
    pub all_listen: bool,
    /// Remaining microframes in this preamble train, decremented per
    /// transmission; 0 on the last microframe before the data frame.
    pub count: B11,
    /// 12-bit message identifier, matched against the TX schedule to
    /// suppress a pending duplicate forward.
    pub id: B12,
    /// Sender's distance-to-destination, copied into a receiving
    /// buffer's `sender_distance`.
    pub hint: B32,
    #[skip]
    __: B8,
}

impl Microframe {
    pub const WIRE_SIZE: usize = 8;

    pub fn to_bytes(self) -> [u8; Self::WIRE_SIZE] {
        self.into_bytes()
    }

    pub fn from_bytes_exact(bytes: [u8; Self::WIRE_SIZE]) -> Self {
        Self::from_bytes(bytes)
    }
}
