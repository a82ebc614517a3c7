//! Locator (§4.2): annotates a buffer with geographic distance.

use crate::buffer::Buffer;
use crate::geometry::{Coordinates, Region};

/// A pluggable source of this node's own coordinates.
///
/// `TSTP::Locator::here()` is a placeholder in the original (a
/// hardcoded `Coordinates(5,5,5)`); real localisation is out of scope
/// here (§9), so `here()` is expressed as a strategy trait rather than
/// a fixed return value, letting a test harness, a fixed-position
/// deployment, and a future localisation service all implement it
/// without touching [`Locator`]'s `marshal`/`update`.
pub trait LocationSource<N> {
    fn here(&self) -> Coordinates<N>;
}

/// The original's own placeholder, reproduced as one concrete
/// `LocationSource` implementation instead of a hardcoded return value.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation<N>(pub Coordinates<N>);

impl<N: Copy> LocationSource<N> for FixedLocation<N> {
    fn here(&self) -> Coordinates<N> {
        self.0
    }
}

pub struct Locator<L> {
    location: L,
}

impl<N, L> Locator<L>
where
    L: LocationSource<N>,
    Coordinates<N>: core::ops::Sub<Output = crate::geometry::Distance> + Copy,
{
    pub fn new(location: L) -> Self {
        Self { location }
    }

    /// Outbound: `my_distance = ‖here - dest.centre‖`; `sender_distance`
    /// starts equal to `my_distance` (we are the first hop).
    pub fn marshal(&self, buf: &mut Buffer, dest: &Region<N>) {
        let my_distance = self.location.here() - dest.centre;
        buf.meta.my_distance = my_distance;
        buf.meta.sender_distance = my_distance;
    }

    /// Inbound: a microframe carries the sender's distance as `hint`;
    /// a data frame's distance is recomputed locally.
    pub fn update(&self, buf: &mut Buffer, dest: &Region<N>, microframe_hint: Option<i64>) {
        if buf.meta.is_microframe {
            if let Some(hint) = microframe_hint {
                buf.meta.sender_distance = hint;
            }
        } else {
            buf.meta.my_distance = self.location.here() - dest.centre;
        }
    }
}
