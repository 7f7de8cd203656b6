//! Shared fixtures for generator integration tests

pub mod fixtures;
