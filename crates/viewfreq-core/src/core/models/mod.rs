//! Molecular data models produced by the transcript parsers.
//!
//! A parse yields two long-lived artifacts: a [`geometry::Geometry`] and a list of
//! [`mode::VibrationMode`]. Frames and arrows derived from them live in
//! [`crate::engine`] and are recomputed on demand.

pub mod atom;
pub mod elements;
pub mod geometry;
pub mod mode;
