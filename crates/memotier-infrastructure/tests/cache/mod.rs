//! Cache Tests
//!
//! Tests for the local store, the two-tier service, memoization and
//! invalidation.

mod invalidation_test;
mod local_test;
