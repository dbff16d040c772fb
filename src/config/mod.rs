//! Configuration loading and layering.
//!
//! Handles `.docdelta.toml` loading, environment variable resolution,
//! and built-in defaults with proper priority ordering.

pub mod loader;

pub use loader::{Config, ProviderConfig};
