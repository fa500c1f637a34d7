#![allow(dead_code)]
/// Shared helpers for the integration test crates
pub mod fixtures;
pub mod mocks;
