//! # Engine Module
//!
//! This module turns parsed vibrational data into the things a viewer draws:
//! displaced-geometry frames for an animation and displacement arrows for a
//! static picture of a mode.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Animation and arrow parameters with validating builders
//! - **Frame Generation** ([`frames`]) - One sine period of displaced geometries per mode
//! - **Arrow Filtering** ([`arrows`]) - Significant displacements as drawable arrows
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! Everything here is pure computation over borrowed inputs; no state is kept
//! between calls.

pub mod arrows;
pub mod config;
pub mod error;
pub mod frames;
pub mod progress;
