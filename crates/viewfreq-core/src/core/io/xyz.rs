use super::traits::{GeometryFile, read_all};
use crate::core::models::atom::Atom;
use crate::core::models::elements;
use crate::core::models::geometry::Geometry;
use nalgebra::Point3;
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Title written on line 2 when the caller has no better one.
pub const DEFAULT_TITLE: &str = "Molecule from Gaussian log";

#[derive(Debug, Error)]
pub enum CoordinateError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },
}

#[derive(Debug, Error, PartialEq)]
pub enum XyzParseErrorKind {
    #[error("Missing atom count line")]
    MissingCount,
    #[error("Invalid atom count '{0}'")]
    InvalidCount(String),
    #[error("Expected {expected} atom line(s) but found {found}")]
    AtomCountMismatch { expected: usize, found: usize },
    #[error("Atom line needs an element and three coordinates")]
    TooFewFields,
    #[error("Unknown element symbol '{0}'")]
    UnknownElement(String),
    #[error("Invalid coordinate value '{0}'")]
    InvalidFloat(String),
}

fn validate(geometry: &Geometry) -> Result<(), CoordinateError> {
    for atom in geometry.atoms() {
        if atom.element.trim().is_empty() {
            return Err(CoordinateError::InvalidGeometry(format!(
                "atom {} has no element symbol",
                atom.index
            )));
        }
        if !atom.has_finite_position() {
            return Err(CoordinateError::InvalidGeometry(format!(
                "atom {} has a non-finite coordinate",
                atom.index
            )));
        }
    }
    Ok(())
}

fn push_block<'a>(
    out: &mut String,
    title: &str,
    atoms: impl Iterator<Item = (&'a str, &'a Point3<f64>)>,
    count: usize,
) {
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", count);
    let _ = writeln!(out, "{}", title);
    for (element, p) in atoms {
        let _ = writeln!(out, "{:<2} {:>12.6} {:>12.6} {:>12.6}", element, p.x, p.y, p.z);
    }
}

/// Formats a geometry as coordinate text: the atom count, a title line, then
/// one `element x y z` line per atom with 6-decimal fixed-point numbers.
///
/// # Errors
///
/// Returns [`CoordinateError::InvalidGeometry`] if an atom has an empty element
/// symbol or a non-finite coordinate.
pub fn to_coordinate_text(geometry: &Geometry, title: &str) -> Result<String, CoordinateError> {
    validate(geometry)?;
    let mut out = String::new();
    push_block(
        &mut out,
        title,
        geometry
            .atoms()
            .iter()
            .map(|atom| (atom.element.as_str(), &atom.position)),
        geometry.atom_count(),
    );
    Ok(out)
}

/// Parses coordinate text back into a geometry.
///
/// Atoms get center numbers `1..=N` in file order and their atomic numbers are
/// resolved from the element symbols. Trailing blank lines are ignored.
///
/// # Errors
///
/// Returns [`CoordinateError::Parse`] naming the 1-based line of the first problem.
pub fn read_coordinate_text(text: &str) -> Result<Geometry, CoordinateError> {
    let parse_err = |line: usize, kind: XyzParseErrorKind| CoordinateError::Parse { line, kind };

    let mut lines = text.lines();
    let count_line = lines
        .next()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .ok_or_else(|| parse_err(1, XyzParseErrorKind::MissingCount))?;
    let expected: usize = count_line
        .parse()
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| parse_err(1, XyzParseErrorKind::InvalidCount(count_line.to_string())))?;

    let body: Vec<&str> = lines.skip(1).take(expected).collect();
    if body.len() < expected {
        return Err(parse_err(
            body.len() + 3,
            XyzParseErrorKind::AtomCountMismatch {
                expected,
                found: body.len(),
            },
        ));
    }

    let mut atoms = Vec::with_capacity(expected);
    for (i, line) in body.iter().enumerate() {
        let line_num = i + 3;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(parse_err(line_num, XyzParseErrorKind::TooFewFields));
        }
        let atomic_number = elements::atomic_number_for(fields[0]).ok_or_else(|| {
            parse_err(
                line_num,
                XyzParseErrorKind::UnknownElement(fields[0].to_string()),
            )
        })?;
        let mut coords = [0.0; 3];
        for (slot, field) in coords.iter_mut().zip(&fields[1..4]) {
            *slot = field
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    parse_err(line_num, XyzParseErrorKind::InvalidFloat(field.to_string()))
                })?;
        }
        atoms.push(Atom::new(
            i + 1,
            atomic_number,
            Point3::new(coords[0], coords[1], coords[2]),
        ));
    }

    Geometry::new(atoms).map_err(|e| CoordinateError::InvalidGeometry(e.to_string()))
}

/// Writes a multi-frame coordinate file, one coordinate block per frame.
///
/// Each frame must hold one position per atom of `geometry`, in geometry order.
///
/// # Errors
///
/// Returns [`CoordinateError::InvalidGeometry`] for an invalid geometry or a
/// frame whose length differs from the atom count.
pub fn write_trajectory(
    geometry: &Geometry,
    frames: &[Vec<Point3<f64>>],
    title: &str,
    writer: &mut impl Write,
) -> Result<(), CoordinateError> {
    validate(geometry)?;
    let total = frames.len();
    let mut out = String::new();
    for (i, frame) in frames.iter().enumerate() {
        if frame.len() != geometry.atom_count() {
            return Err(CoordinateError::InvalidGeometry(format!(
                "frame {} has {} position(s) for {} atom(s)",
                i + 1,
                frame.len(),
                geometry.atom_count()
            )));
        }
        push_block(
            &mut out,
            &format!("{} (frame {}/{})", title, i + 1, total),
            geometry
                .atoms()
                .iter()
                .map(|atom| atom.element.as_str())
                .zip(frame.iter()),
            frame.len(),
        );
    }
    writer.write_all(out.as_bytes())?;
    Ok(())
}

pub struct XyzFile;

impl XyzFile {
    pub fn write_to(
        geometry: &Geometry,
        title: &str,
        writer: &mut impl Write,
    ) -> Result<(), CoordinateError> {
        writer.write_all(to_coordinate_text(geometry, title)?.as_bytes())?;
        Ok(())
    }
}

impl GeometryFile for XyzFile {
    type Error = CoordinateError;

    fn read_from(reader: &mut impl BufRead) -> Result<Geometry, Self::Error> {
        let text = read_all(reader)?;
        read_coordinate_text(&text)
    }
}
