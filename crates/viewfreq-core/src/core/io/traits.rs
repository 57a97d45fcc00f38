use crate::core::models::geometry::Geometry;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for text formats that yield a molecular geometry.
///
/// Both the Gaussian log reader and the XYZ reader implement this trait, so
/// callers can load a geometry without caring which of the two a user supplied.
pub trait GeometryFile {
    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads a geometry from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the content holds no usable geometry or reading fails.
    fn read_from(reader: &mut impl BufRead) -> Result<Geometry, Self::Error>;

    /// Reads a geometry from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Geometry, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

/// Reads the whole reader into memory.
///
/// The transcript formats here are scanned with look-ahead windows, so they are
/// parsed from a complete string rather than line by line.
pub(crate) fn read_all(reader: &mut impl BufRead) -> io::Result<String> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    Ok(content)
}
