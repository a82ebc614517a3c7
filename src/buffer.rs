//! The buffer and its attached per-pipeline-stage metadata (§3.1).
//!
//! A buffer is created by [`BufferPool::alloc`], mutated by the MAC and
//! pipeline while it moves through the stack, and released by
//! [`BufferPool::free`]. There is no allocator: the pool is a fixed-size
//! array of slots, matching the no-dynamic-allocation posture of the
//! rest of the crate (§5).

use crate::error::{Error, Result};
use crate::geometry::Distance;

/// Maximum payload a buffer can carry: TSTP header + payload, per the
/// 100-byte MTU in §6.3.
pub const MTU: usize = 100;

/// Mutable per-pipeline-stage annotations carried alongside a frame.
///
/// Every field here is written by exactly one pipeline stage (Locator,
/// Timekeeper, Router, Security) as described in §4, and read by later
/// stages and by the MAC scheduler.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy)]
pub struct Metadata {
    /// Radio-timer count at SFD reception; set by the MAC on receive.
    pub sfd_time_stamp: u64,
    /// 12-bit message identifier, drawn from a PRNG on send.
    pub id: u16,
    /// True iff the destination region is centred at the sink.
    pub downlink: bool,
    /// False once a buffer has been re-allocated for forwarding
    /// (Router's copy keeps `is_new = false`).
    pub is_new: bool,
    /// True while this buffer represents an in-flight Microframe rather
    /// than a data frame.
    pub is_microframe: bool,
    /// Set by Router on an inbound microframe: the receiver is
    /// strictly closer to the destination than the sender.
    pub relevant: bool,
    /// Set by Security; `true` means the buffer passed the
    /// authentication policy (or there is none configured).
    pub trusted: bool,
    /// Set by Router on an inbound data frame: this node is inside the
    /// destination region.
    pub destined_to_me: bool,
    /// Sender's geographic distance to the destination (hint, or
    /// recomputed from a data frame).
    pub sender_distance: Distance,
    /// This node's geographic distance to the destination.
    pub my_distance: Distance,
    /// Absolute deadline (microseconds) after which the buffer is
    /// dropped from the TX schedule.
    pub expiry: u64,
    /// Time the message was created by the origin node.
    pub origin_time: u64,
    /// Router-computed backoff, in CCA-gaps, for forwarding arbitration.
    pub offset: u32,
    /// Payload length in bytes.
    pub size: usize,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            sfd_time_stamp: 0,
            id: 0,
            downlink: false,
            is_new: true,
            is_microframe: false,
            relevant: false,
            trusted: false,
            destined_to_me: false,
            sender_distance: 0,
            my_distance: 0,
            expiry: 0,
            origin_time: 0,
            offset: 0,
            size: 0,
        }
    }
}

/// A fixed-capacity frame with its attached [`Metadata`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy)]
pub struct Buffer {
    pub meta: Metadata,
    frame: [u8; MTU],
}

impl Buffer {
    fn empty() -> Self {
        Self {
            meta: Metadata::default(),
            frame: [0u8; MTU],
        }
    }

    /// The frame bytes actually in use, per `meta.size`.
    pub fn frame(&self) -> &[u8] {
        &self.frame[..self.meta.size]
    }

    pub fn frame_mut(&mut self) -> &mut [u8] {
        let size = self.meta.size;
        &mut self.frame[..size]
    }

    /// Copy `data` into the buffer's frame storage and set `meta.size`.
    pub fn set_frame(&mut self, data: &[u8]) -> Result<()> {
        if data.len() > MTU {
            return Err(Error::Truncated);
        }
        self.frame[..data.len()].copy_from_slice(data);
        self.meta.size = data.len();
        Ok(())
    }

    /// Append `data` after the current frame contents, growing `meta.size`.
    pub fn append(&mut self, data: &[u8]) -> Result<()> {
        let start = self.meta.size;
        let end = start + data.len();
        if end > MTU {
            return Err(Error::Truncated);
        }
        self.frame[start..end].copy_from_slice(data);
        self.meta.size = end;
        Ok(())
    }

    /// Drop the last `n` bytes of the frame, shrinking `meta.size`.
    pub fn truncate(&mut self, n: usize) {
        self.meta.size = self.meta.size.saturating_sub(n);
    }
}

/// A fixed-capacity pool of buffer slots.
///
/// `N` is the pool capacity; exhaustion is reported through
/// [`Error::BufferPoolExhausted`] rather than growing, per the
/// "Buffer allocation failure" row of §7.
pub struct BufferPool<const N: usize> {
    slots: [Option<Buffer>; N],
}

impl<const N: usize> BufferPool<N> {
    pub const fn new() -> Self {
        Self {
            slots: [None; N],
        }
    }

    /// Allocate a fresh, zeroed buffer able to hold `size` bytes of
    /// payload.
    pub fn alloc(&mut self, size: usize) -> Result<usize> {
        if size > MTU {
            return Err(Error::Truncated);
        }
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.is_none() {
                let mut buf = Buffer::empty();
                buf.meta.size = size;
                *slot = Some(buf);
                return Ok(i);
            }
        }
        Err(Error::BufferPoolExhausted)
    }

    pub fn get(&self, handle: usize) -> Option<&Buffer> {
        self.slots.get(handle).and_then(|s| s.as_ref())
    }

    pub fn get_mut(&mut self, handle: usize) -> Option<&mut Buffer> {
        self.slots.get_mut(handle).and_then(|s| s.as_mut())
    }

    pub fn free(&mut self, handle: usize) {
        if let Some(slot) = self.slots.get_mut(handle) {
            *slot = None;
        }
    }
}

impl<const N: usize> Default for BufferPool<N> {
    fn default() -> Self {
        Self::new()
    }
}
