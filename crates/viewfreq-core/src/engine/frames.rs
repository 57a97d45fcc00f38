use super::config::AnimationParams;
use super::error::EngineError;
use crate::core::models::geometry::Geometry;
use crate::core::models::mode::Displacement;
use nalgebra::{Point3, Vector3};
use std::f64::consts::TAU;

/// Atom positions of one animation frame, in geometry order.
pub type Frame = Vec<Point3<f64>>;
pub type FrameSequence = Vec<Frame>;

/// Displacement scale for frame `frame` of a `frame_count`-frame period.
pub fn frame_scale(frame: usize, frame_count: usize, amplitude: f64) -> f64 {
    let phase = frame as f64 / frame_count as f64 * TAU;
    phase.sin() * amplitude
}

/// Generates one full sine period of displaced geometries.
///
/// Each atom is matched to its displacement by center number; atoms without
/// one stay put. Frame 0 is the undisplaced geometry and the sequence wraps
/// cleanly, so frame `frame_count` would equal frame 0 again.
///
/// # Errors
///
/// - [`EngineError::EmptyGeometry`] / [`EngineError::EmptyDisplacements`] for empty inputs.
/// - [`EngineError::InvalidParameter`] for a non-positive or non-finite
///   amplitude or a zero frame count.
pub fn generate_frames(
    geometry: &Geometry,
    displacements: &[Displacement],
    params: &AnimationParams,
) -> Result<FrameSequence, EngineError> {
    if geometry.atoms().is_empty() {
        return Err(EngineError::EmptyGeometry);
    }
    if displacements.is_empty() {
        return Err(EngineError::EmptyDisplacements);
    }
    if !(params.amplitude.is_finite() && params.amplitude > 0.0) {
        return Err(EngineError::InvalidParameter {
            name: "amplitude",
            reason: format!("must be a positive finite number, got {}", params.amplitude),
        });
    }
    if params.frame_count == 0 {
        return Err(EngineError::InvalidParameter {
            name: "frame_count",
            reason: "must be at least 1".to_string(),
        });
    }

    // Resolve each atom's vector once rather than per frame.
    let vectors: Vec<Vector3<f64>> = geometry
        .atoms()
        .iter()
        .map(|atom| {
            displacements
                .iter()
                .find(|d| d.atom_index == atom.index)
                .map_or_else(Vector3::zeros, |d| d.vector)
        })
        .collect();

    let frames: FrameSequence = (0..params.frame_count)
        .map(|f| {
            let scale = frame_scale(f, params.frame_count, params.amplitude);
            geometry
                .atoms()
                .iter()
                .zip(&vectors)
                .map(|(atom, v)| atom.position + v * scale)
                .collect::<Frame>()
        })
        .collect();
    Ok(frames)
}
