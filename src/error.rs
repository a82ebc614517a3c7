//! Crate-wide error type.
//!
//! The MAC and pipeline are fail-silent internally (see the module docs on
//! `mac` and `pipeline`); `Error` is only ever returned from the public
//! operations that are allowed to reject a caller: `send`, `alloc`, frame
//! decoding, and Smart Data construction.

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A buffer or frame was shorter than the format it was decoded as.
    Truncated,
    /// CRC check over a received frame failed.
    BadCrc,
    /// The `type` field of a data frame header did not match a known message type.
    UnknownType,
    /// Security policy rejected the buffer.
    NotTrusted,
    /// The buffer's expiry was already in the past when offered to the schedule.
    Expired,
    /// No free buffer was available in the pool.
    BufferPoolExhausted,
    /// The TX schedule is at capacity.
    ScheduleFull,
    /// An Interests/Responsives registry bucket is at capacity.
    TooManyObservers,
    /// The radio rejected the operation (busy, not in the expected power mode).
    RadioBusy,
    /// The timer could not arm the requested interrupt.
    TimerUnavailable,
}

pub type Result<T> = core::result::Result<T, Error>;
