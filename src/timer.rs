//! Required Timer contract (§6.2): the raw hardware-facing interrupt
//! and counter contract the MAC state machine drives directly.
//!
//! This is distinct from the `embedded_time::Clock` bound used by
//! [`crate::pipeline::timekeeper::Timekeeper`] (§4.3): `MacTimer` is a
//! one-shot-compare-interrupt abstraction over a raw hardware counter,
//! while Timekeeper's `now()` is a separate, pluggable monotonic-time
//! source that need not be backed by the same timer.

/// The MAC state a scheduled timer interrupt should resume into.
///
/// A `no_std`/no-allocator equivalent of the original's function-
/// pointer callbacks: rather than storing a closure, the timer records
/// which state function to re-enter, and the driver calls
/// [`crate::mac::Mac::on_timer`] with this value from interrupt
/// context.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacEvent {
    UpdateTxSchedule,
    Cca,
    TxMf,
    TxData,
    RxMfTimeout,
    RxData,
    RxDataTimeout,
}

/// A monotonic counter with microsecond resolution (reference: 32 MHz,
/// at least 40 bits wide) and one-shot compare-interrupt scheduling.
pub trait MacTimer {
    /// Raw counter value.
    fn read(&self) -> u64;

    /// Current time in microseconds.
    fn now(&self) -> u64 {
        self.count2us(self.read())
    }

    /// Set the counter to `t`.
    fn set(&mut self, t: u64);

    /// Arm a one-shot interrupt at `when` (counter units), replacing
    /// any previously armed interrupt. The driver calls
    /// `Mac::on_timer(event)` when it fires.
    fn interrupt(&mut self, when: u64, event: MacEvent);

    /// Disable any armed interrupt.
    fn int_disable(&mut self);

    /// Convert a microsecond duration to counter units.
    fn us2count(&self, us: u64) -> u64;

    /// Convert counter units to microseconds.
    fn count2us(&self, count: u64) -> u64;

    /// The counter value latched at Start-of-Frame-Delimiter reception
    /// by the radio's dedicated capture register.
    fn sfd(&self) -> u64;
}
