//! Integration test utilities for the roster server
//!
//! Spawns the full HTTP application against a real PostgreSQL database and
//! drives it over the wire.

pub mod fixtures;

pub use fixtures::*;
pub use helpers::*;
