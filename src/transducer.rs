//! The local sensor/actuator contract a Smart Data object binds to
//! (§4.7), grounded on the original's `Keyboard_Sensor`-style
//! transducer example: a fixed `UNIT`, numeric format, error bound,
//! and whether the device is interrupt-driven or must be polled.

use crate::units::Unit;

pub trait Transducer {
    /// Absolute error bound of a reading, in the transducer's own units.
    const ERROR: u16;
    /// `true` if the transducer raises an observer notification itself
    /// (Smart Data attaches as observer); `false` if it must be polled.
    const INTERRUPT: bool;

    /// The physical quantity/format this transducer reports.
    fn unit(&self) -> Unit;

    /// Take a reading.
    fn sense(&mut self) -> i64;

    /// Apply an actuation value; no-op for sensors.
    fn actuate(&mut self, _value: i64) {}
}
