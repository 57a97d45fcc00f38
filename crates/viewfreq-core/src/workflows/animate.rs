use crate::core::models::geometry::Geometry;
use crate::core::models::mode::VibrationMode;
use crate::engine::arrows::{Arrow, build_arrows};
use crate::engine::config::{AnimationParams, ArrowParams};
use crate::engine::error::EngineError;
use crate::engine::frames::{FrameSequence, generate_frames};
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument, warn};

/// Frames generated for one mode of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeAnimation {
    /// 1-based position of the mode in the mode list.
    pub position: usize,
    pub frequency: f64,
    pub frames: FrameSequence,
}

/// Display label for a mode, e.g. `Mode 1: 1642.31 cm⁻¹`.
pub fn mode_label(position: usize, mode: &VibrationMode) -> String {
    format!("Mode {}: {:.2} cm⁻¹", position, mode.frequency)
}

/// Looks up a mode by its 1-based number.
pub fn select_mode(modes: &[VibrationMode], mode_number: usize) -> Result<&VibrationMode, EngineError> {
    mode_number
        .checked_sub(1)
        .and_then(|i| modes.get(i))
        .ok_or(EngineError::ModeNotFound {
            requested: mode_number,
            available: modes.len(),
        })
}

#[instrument(skip_all, name = "animate_mode_workflow", fields(mode = mode_number))]
pub fn animate_mode(
    geometry: &Geometry,
    modes: &[VibrationMode],
    mode_number: usize,
    params: &AnimationParams,
) -> Result<FrameSequence, EngineError> {
    let mode = select_mode(modes, mode_number)?;
    let frames = generate_frames(geometry, &mode.displacements, params)?;
    info!(
        "{}: generated {} frame(s) at amplitude {}.",
        mode_label(mode_number, mode),
        frames.len(),
        params.amplitude
    );
    Ok(frames)
}

#[instrument(skip_all, name = "arrows_workflow", fields(mode = mode_number))]
pub fn arrows_for_mode(
    geometry: &Geometry,
    modes: &[VibrationMode],
    mode_number: usize,
    params: &ArrowParams,
) -> Result<Vec<Arrow>, EngineError> {
    params.validate()?;
    let mode = select_mode(modes, mode_number)?;
    let arrows = build_arrows(geometry.atoms(), &mode.displacements, params);
    info!(
        "{}: {} of {} displacement(s) above threshold {}.",
        mode_label(mode_number, mode),
        arrows.len(),
        mode.displacements.len(),
        params.threshold
    );
    Ok(arrows)
}

/// Animates every mode in order.
///
/// Modes without displacements (possible in a hand-written mode record) are
/// skipped with a warning rather than failing the batch.
#[instrument(skip_all, name = "animate_all_workflow")]
pub fn animate_all(
    geometry: &Geometry,
    modes: &[VibrationMode],
    params: &AnimationParams,
    reporter: &ProgressReporter,
) -> Result<Vec<ModeAnimation>, EngineError> {
    reporter.phase("Animating modes", || {
        reporter.report(Progress::TaskStart {
            total_steps: modes.len() as u64,
        });

        let mut animations = Vec::with_capacity(modes.len());
        for (i, mode) in modes.iter().enumerate() {
            let position = i + 1;
            if mode.displacements.is_empty() {
                let note = format!("Skipping {}: no displacements.", mode_label(position, mode));
                warn!("{}", note);
                reporter.report(Progress::Message(note));
            } else {
                animations.push(ModeAnimation {
                    position,
                    frequency: mode.frequency,
                    frames: generate_frames(geometry, &mode.displacements, params)?,
                });
            }
            reporter.report(Progress::ModeProcessed {
                position,
                frequency: mode.frequency,
            });
        }

        reporter.report(Progress::TaskFinish);
        info!("Animated {} of {} mode(s).", animations.len(), modes.len());
        Ok(animations)
    })
}
