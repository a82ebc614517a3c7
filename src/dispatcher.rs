//! The TSTP dispatcher (§4.6): demultiplexes inbound Interest/Response/
//! Command/Control messages to Smart Data observers keyed by `Unit`.
//!
//! Per §9 ("cyclic observer graph"), `Interests`/`Responsives` are
//! plain fixed-capacity registries rather than an intrusive observer
//! graph; `update` takes a caller-supplied closure to notify matching
//! entries instead of calling back into live objects, keeping this
//! module free of the original's cyclic `TSTP`/`Smart_Data` ownership.

use heapless::Vec;

use crate::frame::message::{Command, Control, Interest, Response};
use crate::geometry::Coordinates;
use crate::units::Unit;

/// A registered local source able to answer Interests/Commands for
/// `unit`, keyed by `handle` (an index into the owner's own Smart Data
/// table).
#[derive(Debug, Clone, Copy)]
pub struct Responsive<N> {
    pub unit: Unit,
    pub origin: Coordinates<N>,
    pub handle: usize,
}

/// A registered remote subscriber interested in `unit` within `region`.
#[derive(Debug, Clone, Copy)]
pub struct Interested<N> {
    pub unit: Unit,
    pub region: crate::geometry::Region<N>,
    pub handle: usize,
}

/// A decoded inbound data-frame payload, dispatched by [`Dispatcher::update`].
pub enum Message<N> {
    Interest(Interest<N>),
    Response(Response<N>),
    Command(Command<N>),
    Control(Control),
}

pub struct Dispatcher<N, const CAP: usize> {
    interests: Vec<Interested<N>, CAP>,
    responsives: Vec<Responsive<N>, CAP>,
}

impl<N, const CAP: usize> Dispatcher<N, CAP>
where
    N: Copy,
    Coordinates<N>: core::ops::Sub<Output = crate::geometry::Distance> + Copy,
{
    pub fn new() -> Self {
        Self {
            interests: Vec::new(),
            responsives: Vec::new(),
        }
    }

    pub fn attach_interested(&mut self, entry: Interested<N>) -> crate::error::Result<()> {
        self.interests
            .push(entry)
            .map_err(|_| crate::error::Error::TooManyObservers)
    }

    pub fn detach_interested(&mut self, handle: usize) {
        self.interests.retain(|e| e.handle != handle);
    }

    pub fn attach_responsive(&mut self, entry: Responsive<N>) -> crate::error::Result<()> {
        self.responsives
            .push(entry)
            .map_err(|_| crate::error::Error::TooManyObservers)
    }

    pub fn detach_responsive(&mut self, handle: usize) {
        self.responsives.retain(|e| e.handle != handle);
    }

    /// Demultiplex `msg` and invoke `notify(handle)` for every matching
    /// registered entry, per §4.6. The caller frees the buffer after
    /// this returns, as the original does unconditionally.
    pub fn update<F: FnMut(usize)>(&self, msg: &Message<N>, now: u64, mut notify: F) {
        match msg {
            Message::Interest(interest) => {
                for r in self.responsives.iter() {
                    if r.unit == interest.unit && interest.region.contains(r.origin, now) {
                        notify(r.handle);
                    }
                }
            }
            Message::Response(response) => {
                for i in self.interests.iter() {
                    if i.unit == response.unit && i.region.contains(response.origin, response.time) {
                        notify(i.handle);
                    }
                }
            }
            Message::Command(command) => {
                for r in self.responsives.iter() {
                    if r.unit == command.unit && command.region.contains(r.origin, now) {
                        notify(r.handle);
                    }
                }
            }
            // The one CONTROL subtype defined (§9): revoke a prior
            // registration. The dispatcher itself only notifies; the
            // caller is expected to correlate `id` with a handle and
            // call `detach_interested`/`detach_responsive`.
            Message::Control(Control::Delete { id }) => notify(*id as usize),
            Message::Control(Control::Unknown) => {}
        }
    }
}

impl<N, const CAP: usize> Default for Dispatcher<N, CAP>
where
    N: Copy,
    Coordinates<N>: core::ops::Sub<Output = crate::geometry::Distance> + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}
