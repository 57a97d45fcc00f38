use crate::cli::SourceArgs;
use crate::error::{CliError, Result};
use std::path::Path;
use tracing::{debug, info};
use viewfreq::core::io::gaussian::{GaussianLogFile, extract_vibration_modes};
use viewfreq::core::io::modes::read_modes_from_path;
use viewfreq::core::io::traits::GeometryFile;
use viewfreq::core::io::xyz::XyzFile;
use viewfreq::core::models::geometry::Geometry;
use viewfreq::core::models::mode::VibrationMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Coordinates,
    ModeRecord,
    GaussianLog,
}

/// Classifies an input by extension; anything unrecognized is treated as a log,
/// since Gaussian output is written as `.log`, `.out` or without extension.
pub fn source_kind(path: &Path) -> SourceKind {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("xyz") => SourceKind::Coordinates,
        Some("json") => SourceKind::ModeRecord,
        _ => SourceKind::GaussianLog,
    }
}

pub fn load_geometry(path: &Path) -> Result<Geometry> {
    info!("Loading geometry from {:?}", path);
    let parsing_error = |source: anyhow::Error| CliError::FileParsing {
        path: path.to_path_buf(),
        source,
    };
    match source_kind(path) {
        SourceKind::Coordinates => XyzFile::read_from_path(path).map_err(|e| parsing_error(e.into())),
        SourceKind::GaussianLog => {
            GaussianLogFile::read_from_path(path).map_err(|e| parsing_error(e.into()))
        }
        SourceKind::ModeRecord => Err(CliError::Argument(format!(
            "'{}' is a mode record and holds no geometry",
            path.display()
        ))),
    }
}

pub fn load_modes(path: &Path) -> Result<Vec<VibrationMode>> {
    info!("Loading modes from {:?}", path);
    let modes = match source_kind(path) {
        SourceKind::ModeRecord => read_modes_from_path(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?,
        SourceKind::GaussianLog => extract_vibration_modes(&std::fs::read_to_string(path)?),
        SourceKind::Coordinates => {
            return Err(CliError::Argument(format!(
                "'{}' is a coordinate file and holds no modes",
                path.display()
            )));
        }
    };
    debug!("Loaded {} mode(s) from {:?}", modes.len(), path);
    Ok(modes)
}

/// Resolves the geometry and mode sources of `animate` and `arrows`.
///
/// Without `--modes`, the geometry source must be a Gaussian log and supplies both.
pub fn load_sources(source: &SourceArgs) -> Result<(Geometry, Vec<VibrationMode>)> {
    let modes_path: &Path = match &source.modes {
        Some(path) => path.as_path(),
        None if source_kind(&source.geometry) == SourceKind::GaussianLog => {
            source.geometry.as_path()
        }
        None => {
            return Err(CliError::Argument(
                "--modes is required unless --geometry is a Gaussian log".to_string(),
            ));
        }
    };
    let geometry = load_geometry(&source.geometry)?;
    let modes = load_modes(modes_path)?;
    Ok((geometry, modes))
}
