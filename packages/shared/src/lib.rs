//! Shared utilities for the Parlor chat server.
//!
//! Provides the tracing bootstrap used by binaries and the wall-clock helpers
//! used to stamp chat messages and rooms.

pub mod logger;
pub mod time;
