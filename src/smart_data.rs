//! Smart Data binding (§3.5, §3.6, §4.7): a typed observable bound
//! either to a local [`Transducer`] or to a remote subscription.

use heapless::HistoryBuffer;

use crate::dispatcher::Message;
use crate::frame::message::{Interest, Response};
use crate::geometry::{Coordinates, Region};
use crate::transducer::Transducer;
use crate::units::Unit;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Private,
    Advertised,
    Commanded,
}

/// One logged observation (§3.6), produced whenever a value is updated,
/// local or remote. Narrowed from the original's `DB_Record`/
/// `DB_Series`: only the fixed-size in-memory ring survives here, not
/// the on-device relational database it originally fed.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy)]
pub struct DataRecord<N> {
    pub unit: Unit,
    pub value: i64,
    pub error: u16,
    pub origin: Coordinates<N>,
    pub time: u64,
}

/// A Smart Data object. `HIST` bounds the in-memory [`DataRecord`] log.
///
/// * Local source: `device` is `Some`; `unit`/`error` come from the
///   transducer.
/// * Remote subscriber: `device` is `None`; values arrive only via
///   [`SmartData::update`] on an inbound `Response`.
pub struct SmartData<N, T, const HIST: usize> {
    unit: Unit,
    value: i64,
    error: u16,
    origin: Coordinates<N>,
    time: u64,
    expiry: u64,
    mode: Mode,
    device: Option<T>,
    /// Handle into the dispatcher's `Responsives` registry, if this is
    /// an `ADVERTISED`/`COMMANDED` local source.
    pub responsive_handle: Option<usize>,
    /// Handle into the dispatcher's `Interests` registry, if this is a
    /// remote subscriber.
    pub interested_handle: Option<usize>,
    period_us: Option<u32>,
    last_publish: u64,
    history: HistoryBuffer<DataRecord<N>, HIST>,
}

impl<N, T, const HIST: usize> SmartData<N, T, HIST>
where
    N: Copy,
    T: Transducer,
{
    /// Local source (§4.7). If `mode` is `ADVERTISED`/`COMMANDED`, the
    /// caller must separately register a `Responsive` with the
    /// dispatcher and pass the resulting handle; if the transducer is
    /// interrupt-driven, attach as observer is the caller's
    /// responsibility too (the MAC/dispatcher owns observer wiring,
    /// §9 "cyclic observer graph").
    pub fn local(mut device: T, origin: Coordinates<N>, expiry: u64, mode: Mode, now: u64) -> Self {
        let unit = device.unit();
        let value = if T::INTERRUPT { 0 } else { device.sense() };
        Self {
            unit,
            value,
            error: T::ERROR,
            origin,
            time: now,
            expiry,
            mode,
            device: Some(device),
            responsive_handle: None,
            interested_handle: None,
            period_us: None,
            last_publish: now,
            history: HistoryBuffer::new(),
        }
    }

    /// Remote subscriber (§4.7). Returns the `Interest` the caller
    /// should broadcast via the MAC at construction; revocation (a
    /// `CONTROL` DELETE) is the caller's responsibility at destruction
    /// time since `Drop` cannot send.
    pub fn remote(unit: Unit, region: Region<N>, expiry: u64, period_us: Option<u32>, now: u64) -> (Self, Interest<N>) {
        let interest = Interest {
            unit,
            region,
            period_us,
        };
        let smart_data = Self {
            unit,
            value: 0,
            error: 0,
            origin: region.centre,
            time: now,
            expiry,
            mode: Mode::Private,
            device: None,
            responsive_handle: None,
            interested_handle: None,
            period_us,
            last_publish: now,
            history: HistoryBuffer::new(),
        };
        (smart_data, interest)
    }

    /// The cast-to-Value operation (§3.5): if the cached value is
    /// stale, re-sense synchronously for a local source, or report
    /// staleness to the caller (who may log it, per §7) for a remote
    /// subscriber.
    pub fn value(&mut self, now: u64) -> (i64, bool) {
        let stale = now > self.time + self.expiry;
        if stale {
            if let Some(device) = self.device.as_mut() {
                self.value = device.sense();
                self.time = now;
                self.push_record();
                return (self.value, false);
            }
        }
        (self.value, stale)
    }

    /// Dispatch an inbound message addressed to this object (§4.7).
    ///
    /// A `match` arm cannot fall through in Rust, which is the
    /// structural fix for the historical INTEREST/RESPONSE-falls-into-
    /// COMMAND bug (§9): RESPONSE only ever updates the cached value
    /// and returns.
    pub fn update(&mut self, msg: &Message<N>, now: u64) -> Option<Response<N>> {
        match msg {
            Message::Interest(_interest) => self.respond(now),
            Message::Response(response) => {
                self.value = response.value;
                self.error = response.error;
                self.time = response.time;
                self.push_record();
                None
            }
            Message::Command(command) => {
                if let Some(device) = self.device.as_mut() {
                    device.actuate(command.value);
                    self.value = command.value;
                    self.time = now;
                    self.push_record();
                }
                self.respond(now)
            }
            Message::Control(_) => None,
        }
    }

    /// Sense (if local and interrupt-driven or due) and produce a
    /// `Response` to publish, the body of the original's periodic
    /// `updater()` thread function and of an INTEREST/COMMAND reply.
    fn respond(&mut self, now: u64) -> Option<Response<N>> {
        let device = self.device.as_mut()?;
        if !T::INTERRUPT {
            self.value = device.sense();
            self.time = now;
            self.push_record();
        }
        Some(Response {
            unit: self.unit,
            value: self.value,
            error: self.error,
            origin: self.origin,
            time: self.time,
        })
    }

    fn push_record(&mut self) {
        self.history.write(DataRecord {
            unit: self.unit,
            value: self.value,
            error: self.error,
            origin: self.origin,
            time: self.time,
        });
    }

    /// `true` once `period_us` has elapsed since the last publish; the
    /// caller's periodic task abstraction (§1) is responsible for
    /// actually invoking this at some cadence.
    pub fn due(&self, now: u64) -> bool {
        match self.period_us {
            Some(period) => now.saturating_sub(self.last_publish) >= period as u64,
            None => false,
        }
    }

    pub fn mark_published(&mut self, now: u64) {
        self.last_publish = now;
    }

    pub fn history(&self) -> &HistoryBuffer<DataRecord<N>, HIST> {
        &self.history
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}
