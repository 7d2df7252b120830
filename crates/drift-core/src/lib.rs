//! Drift Core - Foundational types for the Drift ambient animation engine
//!
//! This crate provides the core types that all other Drift crates depend on:
//! - `Dimensions` - Surface size in logical pixels
//! - `Color` - RGBA color with hex parsing
//! - Error types and Result alias

mod error;
mod types;

pub use error::{DriftError, Result};
pub use types::{Color, Dimensions};
