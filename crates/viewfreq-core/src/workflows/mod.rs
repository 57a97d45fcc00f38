//! # Workflows Module
//!
//! High-level entry points that chain the transcript readers, the exchange
//! codecs and the engine into complete procedures.
//!
//! - **Parse Workflow** ([`parse`]) - Reads a Gaussian transcript into geometry,
//!   frequencies and modes, and packages them as the coordinate text and mode
//!   record pair consumed by a viewer.
//! - **Animate Workflow** ([`animate`]) - Selects a mode by its 1-based number and
//!   produces animation frames or displacement arrows for it.
//!
//! All workflows report failures through [`crate::engine::error::EngineError`].

pub mod animate;
pub mod parse;
