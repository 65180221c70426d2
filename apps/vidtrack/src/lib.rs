//! # vidtrack Library
//!
//! Exposes the HTTP API, CLI commands and configuration for testing and
//! integration.
//!
//! The binary uses these modules through the `main.rs` entry point.

pub mod api;
pub mod cli;
pub mod config;

// Re-export vidtrack_core for convenience
pub use vidtrack_core;
