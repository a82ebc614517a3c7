//! 32-bit packed SI/digital `Unit` encoding, mirroring IEEE 1451 TEDs.
//!
//! Bit 31 selects the two top-level shapes:
//!
//! * `0`: digital type + device selector.
//! * `1`: SI quantity — a 2-bit numeric format, a 2-bit modifier, and
//!   nine signed 3-bit exponents (bias +4) for `{sr, rad, m, kg, s, A,
//!   K, mol, cd}`.
//!
//! This is hand-rolled with shifts/masks rather than `modular_bitfield`,
//! following the same manual byte/bit-codec style as `serde.rs`'s
//! `u24_from_le_bytes`: the two shapes overlap the same 32 bits under a
//! single discriminant bit, which doesn't fit `#[bitfield]`'s one-layout
//! model cleanly.

const SI_FLAG: u32 = 1 << 31;
const NUM_FORMAT_SHIFT: u32 = 29;
const NUM_FORMAT_MASK: u32 = 0b11;
const MODIFIER_SHIFT: u32 = 27;
const MODIFIER_MASK: u32 = 0b11;
const EXPONENT_BITS: u32 = 3;
const EXPONENT_MASK: u32 = 0b111;
const EXPONENT_BIAS: i8 = 4;
const NUM_EXPONENTS: u32 = 9;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NumericFormat {
    I32 = 0,
    I64 = 1,
    F32 = 2,
    D64 = 3,
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Modifier {
    Direct = 0,
    Ratio = 1,
    Log = 2,
    LogRatio = 3,
}

/// The nine base-quantity exponents an SI `Unit` carries, in fixed order.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Exponents {
    pub sr: i8,
    pub rad: i8,
    pub m: i8,
    pub kg: i8,
    pub s: i8,
    pub a: i8,
    pub k: i8,
    pub mol: i8,
    pub cd: i8,
}

impl Exponents {
    pub const fn new() -> Self {
        Self {
            sr: 0,
            rad: 0,
            m: 0,
            kg: 0,
            s: 0,
            a: 0,
            k: 0,
            mol: 0,
            cd: 0,
        }
    }

    fn as_array(&self) -> [i8; NUM_EXPONENTS as usize] {
        [
            self.sr, self.rad, self.m, self.kg, self.s, self.a, self.k, self.mol, self.cd,
        ]
    }

    fn from_array(a: [i8; NUM_EXPONENTS as usize]) -> Self {
        Self {
            sr: a[0],
            rad: a[1],
            m: a[2],
            kg: a[3],
            s: a[4],
            a: a[5],
            k: a[6],
            mol: a[7],
            cd: a[8],
        }
    }
}

/// An IEEE-1451-TEDs-style 32-bit quantity/device identifier.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit(u32);

impl Unit {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn digital(device: u32) -> Self {
        Self(device & !SI_FLAG)
    }

    pub fn si(format: NumericFormat, modifier: Modifier, exponents: Exponents) -> Self {
        let mut raw = SI_FLAG;
        raw |= (format as u32 & NUM_FORMAT_MASK) << NUM_FORMAT_SHIFT;
        raw |= (modifier as u32 & MODIFIER_MASK) << MODIFIER_SHIFT;
        for (i, e) in exponents.as_array().into_iter().enumerate() {
            let biased = (e + EXPONENT_BIAS) as u32 & EXPONENT_MASK;
            let shift = MODIFIER_SHIFT - (i as u32 + 1) * EXPONENT_BITS;
            raw |= biased << shift;
        }
        Self(raw)
    }

    pub const fn is_si(self) -> bool {
        self.0 & SI_FLAG != 0
    }

    pub fn numeric_format(self) -> Option<NumericFormat> {
        if !self.is_si() {
            return None;
        }
        Some(match (self.0 >> NUM_FORMAT_SHIFT) & NUM_FORMAT_MASK {
            0 => NumericFormat::I32,
            1 => NumericFormat::I64,
            2 => NumericFormat::F32,
            _ => NumericFormat::D64,
        })
    }

    pub fn modifier(self) -> Option<Modifier> {
        if !self.is_si() {
            return None;
        }
        Some(match (self.0 >> MODIFIER_SHIFT) & MODIFIER_MASK {
            0 => Modifier::Direct,
            1 => Modifier::Ratio,
            2 => Modifier::Log,
            _ => Modifier::LogRatio,
        })
    }

    pub fn exponents(self) -> Option<Exponents> {
        if !self.is_si() {
            return None;
        }
        let mut a = [0i8; NUM_EXPONENTS as usize];
        for (i, slot) in a.iter_mut().enumerate() {
            let shift = MODIFIER_SHIFT - (i as u32 + 1) * EXPONENT_BITS;
            let biased = (self.0 >> shift) & EXPONENT_MASK;
            *slot = biased as i8 - EXPONENT_BIAS;
        }
        Some(Exponents::from_array(a))
    }
}

/// Common SI quantities as constructors, following the naming the
/// pipeline and Smart Data examples refer to (temperature, humidity,
/// and so on), built from [`Exponents`].
pub mod quantity {
    use super::*;

    pub fn temperature() -> Unit {
        let mut e = Exponents::new();
        e.k = 1;
        Unit::si(NumericFormat::F32, Modifier::Direct, e)
    }

    pub fn length_m() -> Unit {
        let mut e = Exponents::new();
        e.m = 1;
        Unit::si(NumericFormat::F32, Modifier::Direct, e)
    }

    pub fn acceleration() -> Unit {
        let mut e = Exponents::new();
        e.m = 1;
        e.s = -2;
        Unit::si(NumericFormat::F32, Modifier::Direct, e)
    }
}
