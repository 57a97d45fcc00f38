//! # ViewFreq Core Library
//!
//! Extraction and animation engine for vibrational normal modes reported in
//! Gaussian log files.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer split throughout:
//!
//! - **[`core`]: The Foundation.** Immutable data models (`Geometry`, `VibrationMode`),
//!   the periodic table, and the text codecs that read Gaussian transcripts and
//!   read/write the coordinate and mode record exchange formats.
//!
//! - **[`engine`]: The Numeric Core.** Pure functions that turn a mode and a geometry
//!   into animation frames or arrow geometry, plus the validated parameter sets
//!   they consume.
//!
//! - **[`workflows`]: The Public API.** Entry points that chain the codecs and the
//!   engine into complete procedures such as "parse a log for the viewer" or
//!   "animate mode N".

pub mod core;
pub mod engine;
pub mod workflows;
