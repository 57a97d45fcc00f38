use crate::core::models::mode::{Displacement, VibrationMode};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModeRecordError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid mode record: {0}")]
    Format(String),
    #[error("Invalid mode at position {position}: {reason}")]
    ElementFormat { position: usize, reason: String },
}

/// The serialized form of a mode list, as exchanged with the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeRecord {
    pub modes: Vec<ModeEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeEntry {
    pub frequency: f64,
    pub displacements: Vec<DisplacementEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplacementEntry {
    pub atom_index: usize,
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

impl From<&Displacement> for DisplacementEntry {
    fn from(d: &Displacement) -> Self {
        Self {
            atom_index: d.atom_index,
            dx: d.vector.x,
            dy: d.vector.y,
            dz: d.vector.z,
        }
    }
}

impl From<&VibrationMode> for ModeEntry {
    fn from(mode: &VibrationMode) -> Self {
        Self {
            frequency: mode.frequency,
            displacements: mode.displacements.iter().map(Into::into).collect(),
        }
    }
}

impl ModeRecord {
    /// Pretty-printed JSON with 2-space indentation.
    pub fn to_json_string(&self) -> Result<String, ModeRecordError> {
        serde_json::to_string_pretty(self).map_err(|e| ModeRecordError::Format(e.to_string()))
    }

    pub fn into_modes(self) -> Vec<VibrationMode> {
        self.modes
            .into_iter()
            .map(|entry| VibrationMode {
                frequency: entry.frequency,
                displacements: entry
                    .displacements
                    .into_iter()
                    .map(|d| Displacement::new(d.atom_index, Vector3::new(d.dx, d.dy, d.dz)))
                    .collect(),
            })
            .collect()
    }
}

pub fn to_mode_record(modes: &[VibrationMode]) -> ModeRecord {
    ModeRecord {
        modes: modes.iter().map(Into::into).collect(),
    }
}

/// Decodes a mode record, rejecting the whole record on the first bad element.
///
/// Unlike the transcript parser this decoder is strict: the record is usually
/// hand-edited or produced by another tool, and a silently dropped mode would
/// renumber every mode after it.
///
/// # Errors
///
/// - [`ModeRecordError::Format`] if the text is not JSON or the top-level
///   `modes` list is missing, not a list, or empty.
/// - [`ModeRecordError::ElementFormat`] with the 1-based mode position if a
///   mode has no usable frequency, no displacement list, or a malformed entry.
pub fn from_mode_record(json: &str) -> Result<Vec<VibrationMode>, ModeRecordError> {
    let root: Value = serde_json::from_str(json)
        .map_err(|e| ModeRecordError::Format(format!("not valid JSON: {}", e)))?;

    let modes = match root.get("modes") {
        None => return Err(ModeRecordError::Format("missing 'modes' list".into())),
        Some(Value::Array(modes)) => modes,
        Some(_) => return Err(ModeRecordError::Format("'modes' is not a list".into())),
    };
    if modes.is_empty() {
        return Err(ModeRecordError::Format("'modes' list is empty".into()));
    }

    modes
        .iter()
        .enumerate()
        .map(|(i, value)| {
            decode_mode(value).map_err(|reason| ModeRecordError::ElementFormat {
                position: i + 1,
                reason,
            })
        })
        .collect()
}

fn decode_mode(value: &Value) -> Result<VibrationMode, String> {
    let object = value.as_object().ok_or("mode is not an object")?;

    let frequency = match object.get("frequency") {
        None | Some(Value::Null) => return Err("missing frequency".into()),
        Some(v) => v
            .as_f64()
            .filter(|f| f.is_finite() && *f != 0.0)
            .ok_or("frequency must be a non-zero number")?,
    };

    let entries = match object.get("displacements") {
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err("'displacements' is not a list".into()),
        None => return Err("missing displacements".into()),
    };

    let displacements = entries
        .iter()
        .enumerate()
        .map(|(j, entry)| {
            entry
                .as_object()
                .ok_or_else(|| "entry is not an object".to_string())
                .and_then(decode_displacement)
                .map_err(|reason| format!("displacement {}: {}", j + 1, reason))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::with_capacity(displacements.len());
    if let Some(d) = displacements.iter().find(|d| !seen.insert(d.atom_index)) {
        return Err(format!("atomIndex {} appears more than once", d.atom_index));
    }

    Ok(VibrationMode {
        frequency,
        displacements,
    })
}

fn decode_displacement(entry: &Map<String, Value>) -> Result<Displacement, String> {
    let atom_index = entry
        .get("atomIndex")
        .and_then(Value::as_u64)
        .filter(|&n| n >= 1)
        .ok_or("atomIndex must be a positive integer")? as usize;

    let component = |key: &str| {
        entry
            .get(key)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("'{}' must be a finite number", key))
    };

    Ok(Displacement::new(
        atom_index,
        Vector3::new(component("dx")?, component("dy")?, component("dz")?),
    ))
}

pub fn read_modes_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<VibrationMode>, ModeRecordError> {
    let text = fs::read_to_string(path)?;
    from_mode_record(&text)
}

pub fn write_modes_to_path<P: AsRef<Path>>(
    modes: &[VibrationMode],
    path: P,
) -> Result<(), ModeRecordError> {
    let json = to_mode_record(modes).to_json_string()?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn bend_and_stretch() -> Vec<VibrationMode> {
        vec![
            VibrationMode {
                frequency: 1642.31,
                displacements: vec![
                    Displacement::new(1, Vector3::new(0.0, 0.0, 0.07)),
                    Displacement::new(2, Vector3::new(0.0, 0.43, -0.56)),
                    Displacement::new(3, Vector3::new(0.0, -0.43, -0.56)),
                ],
            },
            VibrationMode {
                frequency: 3756.92,
                displacements: vec![Displacement::new(2, Vector3::new(0.0, 0.58, 0.4))],
            },
        ]
    }

    fn assert_element_error(json: &str, expected_position: usize, reason_fragment: &str) {
        match from_mode_record(json) {
            Err(ModeRecordError::ElementFormat { position, reason }) => {
                assert_eq!(position, expected_position);
                assert!(
                    reason.contains(reason_fragment),
                    "reason '{}' lacks '{}'",
                    reason,
                    reason_fragment
                );
            }
            other => panic!("expected element error, got {:?}", other),
        }
    }

    #[test]
    fn json_uses_camel_case_atom_index_and_two_space_indent() {
        let json = to_mode_record(&bend_and_stretch()).to_json_string().unwrap();
        assert!(json.contains("\"atomIndex\": 1"));
        assert!(json.contains("\n  \"modes\": ["));
        assert!(!json.contains("atom_index"));
    }

    #[test]
    fn record_round_trips_to_equal_modes() {
        let modes = bend_and_stretch();
        let json = to_mode_record(&modes).to_json_string().unwrap();
        assert_eq!(from_mode_record(&json).unwrap(), modes);
    }

    #[test]
    fn into_modes_inverts_to_mode_record() {
        let modes = bend_and_stretch();
        assert_eq!(to_mode_record(&modes).into_modes(), modes);
    }

    #[test]
    fn rejects_text_that_is_not_json() {
        assert!(matches!(
            from_mode_record("modes: []"),
            Err(ModeRecordError::Format(_))
        ));
    }

    #[test]
    fn rejects_missing_non_list_or_empty_modes() {
        for json in [r#"{}"#, r#"{"modes": 3}"#, r#"{"modes": []}"#, r#"[]"#] {
            assert!(
                matches!(from_mode_record(json), Err(ModeRecordError::Format(_))),
                "accepted {}",
                json
            );
        }
    }

    #[test]
    fn rejects_mode_without_usable_frequency() {
        assert_element_error(
            r#"{"modes": [{"frequency": 100.0, "displacements": []}, {"displacements": []}]}"#,
            2,
            "missing frequency",
        );
        assert_element_error(
            r#"{"modes": [{"frequency": 0, "displacements": []}]}"#,
            1,
            "non-zero",
        );
        assert_element_error(
            r#"{"modes": [{"frequency": "high", "displacements": []}]}"#,
            1,
            "non-zero",
        );
    }

    #[test]
    fn rejects_mode_without_displacement_list() {
        assert_element_error(r#"{"modes": [{"frequency": 100.0}]}"#, 1, "missing displacements");
        assert_element_error(
            r#"{"modes": [{"frequency": 100.0, "displacements": {}}]}"#,
            1,
            "not a list",
        );
    }

    #[test]
    fn rejects_malformed_displacement_entries() {
        assert_element_error(
            r#"{"modes": [{"frequency": 100.0, "displacements": [{"atomIndex": 1, "dx": 0, "dy": 0}]}]}"#,
            1,
            "'dz'",
        );
        assert_element_error(
            r#"{"modes": [{"frequency": 100.0, "displacements": [{"atomIndex": 0, "dx": 0, "dy": 0, "dz": 0}]}]}"#,
            1,
            "atomIndex",
        );
        assert_element_error(
            r#"{"modes": [{"frequency": 100.0, "displacements": [1.5]}]}"#,
            1,
            "displacement 1",
        );
    }

    #[test]
    fn rejects_repeated_atom_index_within_a_mode() {
        assert_element_error(
            r#"{"modes": [
                {"frequency": 100.0, "displacements": [{"atomIndex": 1, "dx": 0, "dy": 0, "dz": 0}]},
                {"frequency": 200.0, "displacements": [
                    {"atomIndex": 2, "dx": 0, "dy": 0, "dz": 0},
                    {"atomIndex": 2, "dx": 1, "dy": 0, "dz": 0}]}]}"#,
            2,
            "atomIndex 2 appears more than once",
        );
    }

    #[test]
    fn accepts_negative_frequency_and_empty_displacements() {
        let modes =
            from_mode_record(r#"{"modes": [{"frequency": -50.2, "displacements": []}]}"#).unwrap();
        assert_eq!(modes.len(), 1);
        assert_eq!(modes[0].frequency, -50.2);
        assert!(modes[0].displacements.is_empty());
    }

    #[test]
    fn path_helpers_write_and_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("modes.json");
        let modes = bend_and_stretch();

        write_modes_to_path(&modes, &path).unwrap();
        assert_eq!(read_modes_from_path(&path).unwrap(), modes);
    }

    #[test]
    fn reading_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            read_modes_from_path(dir.path().join("absent.json")),
            Err(ModeRecordError::Io(_))
        ));
    }
}
