//! Clock port
//!
//! Entry timestamps and expiry checks read the time through this trait so
//! tests can move time forward without sleeping.

use chrono::{DateTime, Utc};

/// Source of the current time
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current instant in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
