use crate::core::io::gaussian::{extract_final_geometry, extract_frequencies, extract_vibration_modes};
use crate::core::io::modes::{from_mode_record, to_mode_record};
use crate::core::io::xyz::{DEFAULT_TITLE, read_coordinate_text, to_coordinate_text};
use crate::core::models::geometry::Geometry;
use crate::core::models::mode::VibrationMode;
use crate::engine::error::EngineError;
use tracing::{info, instrument, warn};

/// Everything extracted from one Gaussian transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLog {
    /// The final standard-orientation geometry.
    pub geometry: Geometry,
    /// Every reported frequency in file order, imaginary ones included.
    pub frequencies: Vec<f64>,
    /// The real-frequency modes that carry displacements.
    pub modes: Vec<VibrationMode>,
}

impl ParsedLog {
    pub fn atom_count(&self) -> usize {
        self.geometry.atom_count()
    }

    pub fn mode_count(&self) -> usize {
        self.modes.len()
    }

    pub fn imaginary_count(&self) -> usize {
        self.frequencies.iter().filter(|&&f| f < 0.0).count()
    }
}

/// A parsed log together with its serialized exchange files.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerBundle {
    pub log: ParsedLog,
    pub xyz_text: String,
    /// `None` when the log has no modes; an empty record would not load back.
    pub modes_json: Option<String>,
}

/// Parses a complete transcript.
///
/// Only a missing or empty geometry is fatal; a transcript without usable
/// frequency data yields a log with no modes.
#[instrument(skip_all, name = "parse_log_workflow")]
pub fn parse_log(transcript: &str) -> Result<ParsedLog, EngineError> {
    let geometry = extract_final_geometry(transcript)?;
    let frequencies = extract_frequencies(transcript);
    let modes = extract_vibration_modes(transcript);

    let log = ParsedLog {
        geometry,
        frequencies,
        modes,
    };
    info!(
        "Parsed {} atom(s), {} mode(s), {} imaginary frequency(ies).",
        log.atom_count(),
        log.mode_count(),
        log.imaginary_count()
    );
    if log.imaginary_count() > 0 {
        warn!(
            "{} imaginary frequency(ies) found; those modes are not animated.",
            log.imaginary_count()
        );
    }
    Ok(log)
}

/// Parses a transcript and serializes the result for a viewer.
///
/// `title` becomes line 2 of the coordinate text; `None` uses [`DEFAULT_TITLE`].
#[instrument(skip_all, name = "export_workflow")]
pub fn export_for_viewer(transcript: &str, title: Option<&str>) -> Result<ViewerBundle, EngineError> {
    let log = parse_log(transcript)?;
    let dense = log
        .geometry
        .atoms()
        .iter()
        .enumerate()
        .all(|(i, atom)| atom.index == i + 1);
    if !dense {
        warn!("Center numbers have gaps; the coordinate text renumbers atoms from 1.");
    }
    let xyz_text = to_coordinate_text(&log.geometry, title.unwrap_or(DEFAULT_TITLE))?;
    let modes_json = if log.modes.is_empty() {
        warn!("No modes to export; the mode record is skipped.");
        None
    } else {
        Some(to_mode_record(&log.modes).to_json_string()?)
    };
    Ok(ViewerBundle {
        log,
        xyz_text,
        modes_json,
    })
}

/// Loads a previously exported coordinate text and mode record pair.
#[instrument(skip_all, name = "load_bundle_workflow")]
pub fn load_viewer_bundle(
    xyz_text: &str,
    modes_json: &str,
) -> Result<(Geometry, Vec<VibrationMode>), EngineError> {
    let geometry = read_coordinate_text(xyz_text)?;
    let modes = from_mode_record(modes_json)?;

    let atom_count = geometry.atom_count();
    for (i, mode) in modes.iter().enumerate() {
        if let Some(d) = mode
            .displacements
            .iter()
            .find(|d| geometry.atom_by_index(d.atom_index).is_none())
        {
            warn!(
                "Mode {} displaces atom {} which is not among the {} atom(s); it will be ignored.",
                i + 1,
                d.atom_index,
                atom_count
            );
        }
    }
    info!(
        "Loaded {} atom(s) and {} mode(s).",
        atom_count,
        modes.len()
    );
    Ok((geometry, modes))
}
