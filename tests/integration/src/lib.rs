//! Integration test utilities for the cine API
//!
//! Helpers for running end-to-end tests against the REST API, either a
//! server spawned in-process or one already running at `TEST_API_URL`.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
