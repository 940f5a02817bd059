//! Infrastructure Ports
//!
//! Process-level services the domain depends on.

/// Wall-clock port
pub mod clock;

pub use clock::{Clock, SystemClock};
