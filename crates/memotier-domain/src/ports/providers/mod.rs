//! External Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | PrimaryStore | Networked key-value store backing the cache |

/// Primary store port
pub mod primary_store;

pub use primary_store::PrimaryStore;
