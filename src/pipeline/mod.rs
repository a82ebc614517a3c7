//! The four-stage marshal/unmarshal pipeline (§4.2–§4.5): Locator,
//! Timekeeper, Router, Security.
//!
//! Per §9 ("cyclic observer graph"), the pipeline is an explicit linear
//! chain of `marshal`/`update` calls rather than a cyclic observer
//! graph: the MAC calls `update` on an inbound buffer in order, and
//! Smart Data/TSTP call `marshal` on an outbound buffer in order.

pub mod locator;
pub mod router;
pub mod security;
pub mod timekeeper;

pub use locator::{FixedLocation, LocationSource, Locator};
pub use router::{Forward, Router};
pub use security::{NoopPolicy, Security, SecurityPolicy};
pub use timekeeper::Timekeeper;
