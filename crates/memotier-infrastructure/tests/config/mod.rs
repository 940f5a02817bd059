//! Configuration Tests
//!
//! Tests for configuration loading and validation.

mod loader_test;
