//! Domain Port Interfaces
//!
//! Boundary contracts implemented by the outer layers:
//! - **providers/** - the networked primary store
//! - **infrastructure/** - process services such as the clock

/// Infrastructure service ports
pub mod infrastructure;
/// External service provider ports
pub mod providers;

pub use infrastructure::{Clock, SystemClock};
pub use providers::PrimaryStore;
