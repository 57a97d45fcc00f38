//! Extraction of geometries and normal modes from Gaussian log transcripts.
//!
//! A transcript is free text, so both extractors work on trimmed lines and rely
//! on textual markers:
//!
//! - the geometry is the table following the **last** `Standard orientation:`
//!   marker, bounded by the horizontal rules under its column header;
//! - normal modes come in blocks opened by a `Frequencies --` line, with up to
//!   three modes sharing one `Atom AN X Y Z ...` displacement table.
//!
//! Geometry rows and mode blocks that do not parse are skipped silently. The
//! geometry extractor fails only when nothing usable is found; the mode
//! extractor never fails.

use super::traits::{GeometryFile, read_all};
use crate::core::models::atom::Atom;
use crate::core::models::elements;
use crate::core::models::geometry::Geometry;
use crate::core::models::mode::{Displacement, VibrationMode};
use nalgebra::{Point3, Vector3};
use std::collections::HashSet;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{debug, trace};

pub const ORIENTATION_MARKER: &str = "Standard orientation:";
pub const FREQUENCY_MARKER: &str = "Frequencies --";

/// Lines searched after a frequency line (inclusive) for its displacement table.
const TABLE_SEARCH_WINDOW: usize = 100;

const GEOMETRY_HEADER_TOKENS: [&str; 3] = ["Center", "Atomic", "Coordinates"];
const DISPLACEMENT_HEADER_TOKENS: [&str; 5] = ["Atom", "AN", "X", "Y", "Z"];
const TRAILER_MARKERS: [&str; 3] = ["Red. masses", "Frc consts", "IR Inten"];
const GEOMETRY_RULE: &str = "-----";
const TABLE_RULE: &str = "---";

#[derive(Debug, Error)]
pub enum GaussianLogError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("No 'Standard orientation:' section found in the transcript")]
    NotFound,
    #[error("The 'Standard orientation:' section at line {line} contains no valid atom rows")]
    NoData { line: usize },
}

/// Extracts the last reported geometry of a transcript.
///
/// Later orientation sections supersede earlier ones, which is what an
/// optimization run prints as it converges.
///
/// # Errors
///
/// Returns [`GaussianLogError::NotFound`] if the transcript has no
/// `Standard orientation:` marker, and [`GaussianLogError::NoData`] if the last
/// marker is not followed by at least one valid atom row.
pub fn extract_final_geometry(transcript: &str) -> Result<Geometry, GaussianLogError> {
    let lines: Vec<&str> = transcript.lines().map(str::trim).collect();

    let start = lines
        .iter()
        .enumerate()
        .fold(None, |last, (i, line)| {
            line.contains(ORIENTATION_MARKER).then_some(i).or(last)
        })
        .ok_or(GaussianLogError::NotFound)?;
    debug!("Using orientation section at line {}.", start + 1);

    let mut header_found = false;
    let mut in_data = false;
    let mut atoms = Vec::new();

    for &line in &lines[start..] {
        if contains_all(line, &GEOMETRY_HEADER_TOKENS) {
            header_found = true;
            continue;
        }
        if header_found && line.contains(GEOMETRY_RULE) {
            if in_data {
                break;
            }
            in_data = true;
            continue;
        }
        if in_data && !line.is_empty() {
            match parse_geometry_row(line) {
                Some(atom) => atoms.push(atom),
                None => trace!("Skipping malformed geometry row: '{}'", line),
            }
        }
    }

    Geometry::new(atoms).map_err(|_| GaussianLogError::NoData { line: start + 1 })
}

/// Parses `center atomic-number type x y z`. The type column is not checked.
fn parse_geometry_row(line: &str) -> Option<Atom> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 6 {
        return None;
    }
    let index: usize = fields[0].parse().ok()?;
    let atomic_number: u8 = fields[1].parse().ok()?;
    if !elements::is_valid_atomic_number(atomic_number) {
        return None;
    }
    let x = parse_finite(fields[3])?;
    let y = parse_finite(fields[4])?;
    let z = parse_finite(fields[5])?;
    Some(Atom::new(index, atomic_number, Point3::new(x, y, z)))
}

/// Lists every value printed on `Frequencies --` lines, imaginary ones included.
pub fn extract_frequencies(transcript: &str) -> Vec<f64> {
    transcript
        .lines()
        .filter_map(|line| parse_frequency_line(line.trim()))
        .flatten()
        .collect()
}

/// Reads the numeric tokens after `Frequencies --`, stopping at the first
/// non-numeric one. High-precision `Frequencies ---` lines are not matched.
fn parse_frequency_line(line: &str) -> Option<Vec<f64>> {
    let (_, rest) = line.split_once(FREQUENCY_MARKER)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.split_whitespace().map_while(parse_finite).collect())
}

/// Extracts all real-frequency normal modes, in file order.
///
/// Modes within a block keep the left-to-right order of their frequency
/// columns. Imaginary (non-positive) frequencies are excluded, and so is every
/// mode that ends up without a single displacement.
pub fn extract_vibration_modes(transcript: &str) -> Vec<VibrationMode> {
    let mut cursor = LineCursor::new(transcript);
    let mut modes = Vec::new();
    let mut state = BlockState::SeekingHeader;

    loop {
        state = match state {
            BlockState::SeekingHeader => {
                let Some(line) = cursor.next_line() else {
                    break;
                };
                match parse_frequency_line(line) {
                    Some(declared) => open_block(&declared, cursor.position() - 1),
                    None => BlockState::SeekingHeader,
                }
            }
            BlockState::SeekingTable(block) => match cursor.peek() {
                None => {
                    debug!(
                        "Discarding frequency block at line {}: transcript ends before its displacement table.",
                        block.frequency_line + 1
                    );
                    BlockState::Aborted(block.resume_point())
                }
                Some(_) if cursor.position() >= block.frequency_line + TABLE_SEARCH_WINDOW => {
                    debug!(
                        "Discarding frequency block at line {}: no displacement table within {} lines.",
                        block.frequency_line + 1,
                        TABLE_SEARCH_WINDOW
                    );
                    BlockState::Aborted(block.resume_point())
                }
                Some(line) if contains_all(line, &DISPLACEMENT_HEADER_TOKENS) => {
                    cursor.advance();
                    BlockState::ConsumingRows(block)
                }
                Some(line) if line.contains(FREQUENCY_MARKER) => {
                    debug!(
                        "Discarding frequency block at line {}: next block starts before its displacement table.",
                        block.frequency_line + 1
                    );
                    BlockState::Aborted(block.resume_point())
                }
                Some(_) => {
                    cursor.advance();
                    BlockState::SeekingTable(block)
                }
            },
            BlockState::ConsumingRows(mut block) => match cursor.peek() {
                Some(line) if !is_row_terminator(line) => {
                    block.absorb_row(line);
                    cursor.advance();
                    BlockState::ConsumingRows(block)
                }
                _ => BlockState::Done(block),
            },
            BlockState::Done(block) => {
                modes.extend(block.into_modes());
                BlockState::SeekingHeader
            }
            BlockState::Aborted(resume_at) => {
                cursor.restore(resume_at);
                BlockState::SeekingHeader
            }
        };
    }

    debug!("Extracted {} vibration mode(s).", modes.len());
    modes
}

fn open_block(declared: &[f64], frequency_line: usize) -> BlockState {
    let columns: Vec<ModeColumn> = declared
        .iter()
        .filter(|&&frequency| frequency > 0.0)
        .map(|&frequency| ModeColumn {
            mode: VibrationMode::new(frequency),
            seen_atoms: HashSet::new(),
        })
        .collect();

    let block = PendingBlock {
        frequency_line,
        columns,
    };
    if block.columns.is_empty() {
        debug!(
            "Discarding frequency block at line {}: no positive frequencies in {:?}.",
            frequency_line + 1,
            declared
        );
        return BlockState::Aborted(block.resume_point());
    }
    BlockState::SeekingTable(block)
}

fn is_row_terminator(line: &str) -> bool {
    line.is_empty()
        || line.contains(FREQUENCY_MARKER)
        || TRAILER_MARKERS.iter().any(|marker| line.contains(marker))
        || line.contains(TABLE_RULE)
        || is_mode_index_line(line)
}

/// A line holding nothing but mode numbers, e.g. `4` or `4 5 6`.
fn is_mode_index_line(line: &str) -> bool {
    let mut tokens = line.split_whitespace().peekable();
    tokens.peek().is_some() && tokens.all(|token| token.parse::<u32>().is_ok())
}

fn contains_all(line: &str, tokens: &[&str]) -> bool {
    tokens.iter().all(|token| line.contains(token))
}

fn parse_finite(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[derive(Debug)]
enum BlockState {
    SeekingHeader,
    SeekingTable(PendingBlock),
    ConsumingRows(PendingBlock),
    Done(PendingBlock),
    Aborted(usize),
}

#[derive(Debug)]
struct PendingBlock {
    /// 0-based line index of the `Frequencies --` line that opened the block.
    frequency_line: usize,
    columns: Vec<ModeColumn>,
}

/// A surviving mode. Survivors take the table's triples left to right, so
/// after an imaginary column is dropped the trailing triple goes unread.
#[derive(Debug)]
struct ModeColumn {
    mode: VibrationMode,
    seen_atoms: HashSet<usize>,
}

impl PendingBlock {
    fn resume_point(&self) -> usize {
        self.frequency_line + 1
    }

    /// Distributes one `atom AN x y z [x y z ...]` row over the block's modes.
    fn absorb_row(&mut self, line: &str) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 5 {
            return;
        }
        let (Ok(atom_index), Ok(atomic_number)) =
            (fields[0].parse::<usize>(), fields[1].parse::<u8>())
        else {
            return;
        };
        if atom_index == 0 || !elements::is_valid_atomic_number(atomic_number) {
            return;
        }

        for (position, column) in self.columns.iter_mut().enumerate() {
            let start = 2 + position * 3;
            let Some(triple) = fields.get(start..start + 3) else {
                continue;
            };
            let Some(vector) = parse_triple(triple) else {
                continue;
            };
            if column.seen_atoms.insert(atom_index) {
                column
                    .mode
                    .displacements
                    .push(Displacement::new(atom_index, vector));
            }
        }
    }

    fn into_modes(self) -> impl Iterator<Item = VibrationMode> {
        self.columns
            .into_iter()
            .map(|column| column.mode)
            .filter(|mode| !mode.displacements.is_empty())
    }
}

fn parse_triple(triple: &[&str]) -> Option<Vector3<f64>> {
    Some(Vector3::new(
        parse_finite(triple[0])?,
        parse_finite(triple[1])?,
        parse_finite(triple[2])?,
    ))
}

/// Forward-only view over the trimmed lines of a transcript with explicit
/// restore points.
struct LineCursor<'a> {
    lines: Vec<&'a str>,
    position: usize,
}

impl<'a> LineCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().map(str::trim).collect(),
            position: 0,
        }
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.position).copied()
    }

    fn next_line(&mut self) -> Option<&'a str> {
        let line = self.peek()?;
        self.position += 1;
        Some(line)
    }

    fn advance(&mut self) {
        self.position = (self.position + 1).min(self.lines.len());
    }

    fn position(&self) -> usize {
        self.position
    }

    fn restore(&mut self, position: usize) {
        self.position = position.min(self.lines.len());
    }
}

/// Reads the final geometry of a Gaussian log.
pub struct GaussianLogFile;

impl GeometryFile for GaussianLogFile {
    type Error = GaussianLogError;

    fn read_from(reader: &mut impl BufRead) -> Result<Geometry, Self::Error> {
        let transcript = read_all(reader)?;
        extract_final_geometry(&transcript)
    }
}
