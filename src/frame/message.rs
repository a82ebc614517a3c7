//! The four TSTP message payloads carried after the header (§4.6):
//! Interest, Response, Command, Control.

use crate::geometry::{Coordinates, Region};
use crate::units::Unit;

/// A request for data matching `unit` from any Responsive whose
/// `origin` lies in `region`. `period_us` of `Some` asks the
/// responder to reply periodically rather than once.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy)]
pub struct Interest<N> {
    pub unit: Unit,
    pub region: Region<N>,
    pub period_us: Option<u32>,
}

/// A value published in answer to an Interest, or unsolicited by a
/// Responsive in `ADVERTISED` mode.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy)]
pub struct Response<N> {
    pub unit: Unit,
    pub value: i64,
    pub error: u16,
    pub origin: Coordinates<N>,
    pub time: u64,
}

/// An actuation request targeted at Responsives matching `unit` within
/// `region`.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy)]
pub struct Command<N> {
    pub unit: Unit,
    pub region: Region<N>,
    pub value: i64,
}

/// Reserved control-plane messages (§4.6, §9). The only currently
/// defined subtype revokes a prior Interest/Responsive registration,
/// the "resending with mode DELETE" mechanism §4.7 describes for a
/// remote subscriber's destructor.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy)]
pub enum Control {
    Delete { id: u16 },
    Unknown,
}
