//! Timekeeper (§4.3): annotates a buffer with its expiry.

use crate::buffer::Buffer;
use crate::geometry::Region;
use embedded_time::Clock;

/// `TSTP::Timekeeper::now()` is a placeholder in the original (network-
/// wide time sync is out of scope, §9); generalised here over
/// `embedded_time::Clock`, the same bound the teacher's own
/// `EndDevice<C: Clock>` uses for its notion of time, so a real
/// disciplined network clock can later stand in without touching
/// `marshal`/`update`.
pub struct Timekeeper<C> {
    clock: C,
}

impl<C: Clock> Timekeeper<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Both outbound and inbound set `expiry` to the destination
    /// region's `t1`; the two are identical in the original and kept
    /// as one function here.
    pub fn marshal<N>(&self, buf: &mut Buffer, dest: &Region<N>) {
        buf.meta.expiry = dest.t1;
    }

    pub fn update<N>(&self, buf: &mut Buffer, dest: &Region<N>) {
        buf.meta.expiry = dest.t1;
    }

    /// Monotonic microsecond time. May simply be the MAC timer; kept
    /// generic so a future disciplined network clock can replace it.
    pub fn now(&self) -> Option<u64> {
        self.clock
            .try_now()
            .ok()
            .map(|instant| instant.duration_since_epoch().integer() as u64)
    }
}
