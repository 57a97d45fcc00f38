//! Provides input/output functionality for the supported text formats.
//!
//! - [`gaussian`] reads geometries and normal modes out of Gaussian log transcripts.
//! - [`xyz`] reads and writes the portable coordinate text format, including
//!   multi-frame trajectories.
//! - [`modes`] encodes and strictly decodes the JSON mode record.
//!
//! Readers that produce a [`crate::core::models::geometry::Geometry`] share the
//! [`traits::GeometryFile`] interface.

pub mod gaussian;
pub mod modes;
pub mod traits;
pub mod xyz;
