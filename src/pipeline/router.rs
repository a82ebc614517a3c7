//! Router (§4.4): forwarding decision, destination match, and backoff
//! arbitration.

use crate::buffer::{Buffer, BufferPool};
use crate::geometry::{Coordinates, Region};

pub struct Router {
    radio_range: i64,
}

/// The outcome of [`Router::update`] on an inbound data frame: either
/// nothing to do, or a freshly allocated buffer to hand to the MAC
/// scheduler for forwarding.
pub enum Forward {
    None,
    Relay { handle: usize },
}

impl Router {
    pub fn new(radio_range: i64) -> Self {
        Self { radio_range }
    }

    /// Inbound microframe: mark `relevant` iff this node is strictly
    /// closer to the destination (approximated here by `sink`, the
    /// original's forwarding target) than the sender.
    pub fn update_microframe<N>(&self, buf: &mut Buffer, here: Coordinates<N>, sink: Coordinates<N>)
    where
        Coordinates<N>: core::ops::Sub<Output = crate::geometry::Distance> + Copy,
    {
        if buf.meta.is_microframe && !buf.meta.relevant {
            let distance = here - sink;
            debug_assert!(distance >= 0);
            buf.meta.relevant = (distance as u64) < buf.meta.sender_distance as u64;
        }
    }

    /// Inbound data frame: mark `destined_to_me` and, if we are closer
    /// to the destination than the sender, allocate and queue a
    /// forwarded copy.
    pub fn update_data<N, const POOL: usize>(
        &self,
        buf: &Buffer,
        dest: &Region<N>,
        here: Coordinates<N>,
        now: u64,
        pool: &mut BufferPool<POOL>,
    ) -> crate::error::Result<(bool, Forward)>
    where
        Coordinates<N>: core::ops::Sub<Output = crate::geometry::Distance> + Copy,
    {
        let destined_to_me = dest.contains(here, now);
        if buf.meta.my_distance >= buf.meta.sender_distance {
            return Ok((destined_to_me, Forward::None));
        }

        let handle = pool.alloc(buf.meta.size)?;
        {
            let send_buf = pool.get_mut(handle).expect("just allocated");
            send_buf.set_frame(buf.frame())?;
            send_buf.meta.id = buf.meta.id;
            send_buf.meta.destined_to_me = destined_to_me;
            send_buf.meta.downlink = buf.meta.downlink;
            send_buf.meta.expiry = buf.meta.expiry;
            send_buf.meta.origin_time = buf.meta.origin_time;
            send_buf.meta.my_distance = buf.meta.my_distance;
            send_buf.meta.sender_distance = buf.meta.sender_distance;
            send_buf.meta.is_new = false;
            send_buf.meta.is_microframe = false;
            send_buf.meta.offset = self.offset(send_buf.meta.my_distance, send_buf.meta.sender_distance);
        }
        Ok((destined_to_me, Forward::Relay { handle }))
    }

    /// Outbound: set `downlink` (destination centred at the sink) and
    /// `destined_to_me`, and compute the initial backoff `offset`.
    pub fn marshal<N>(&self, buf: &mut Buffer, dest: &Region<N>, here: Coordinates<N>, sink: Coordinates<N>, now: u64)
    where
        N: PartialEq,
        Coordinates<N>: core::ops::Sub<Output = crate::geometry::Distance> + Copy,
    {
        buf.meta.downlink = dest.centre == sink;
        buf.meta.destined_to_me = dest.contains(here, now);
        buf.meta.offset = self.offset(buf.meta.my_distance, buf.meta.sender_distance);
    }

    /// `offset = |my_distance - (sender_distance - RADIO_RANGE)|`:
    /// nodes closer to the ideal next-hop ring defer less.
    fn offset(&self, my_distance: i64, sender_distance: i64) -> u32 {
        (my_distance - (sender_distance - self.radio_range)).unsigned_abs() as u32
    }
}
