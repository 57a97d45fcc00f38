//! # Core Module
//!
//! Data structures and text codecs shared by every other layer.
//!
//! - **Molecular Representation** ([`models`]) - Atoms, geometries, vibration modes
//!   and the periodic table lookup
//! - **File I/O** ([`io`]) - Gaussian log extraction, coordinate text (XYZ) and the
//!   JSON mode record
//!
//! Everything here is immutable once constructed. Parsing a transcript twice
//! yields identical values.

pub mod io;
pub mod models;
