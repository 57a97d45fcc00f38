use super::atom::Atom;
use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GeometryError {
    #[error("A geometry must contain at least one atom")]
    Empty,
}

/// An ordered, non-empty list of atoms in transcript order.
///
/// The atom list is private so the non-empty invariant established by
/// [`Geometry::new`] cannot be broken afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    atoms: Vec<Atom>,
}

impl Geometry {
    /// Creates a geometry from an ordered list of atoms.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Empty`] if `atoms` is empty.
    pub fn new(atoms: Vec<Atom>) -> Result<Self, GeometryError> {
        if atoms.is_empty() {
            return Err(GeometryError::Empty);
        }
        Ok(Self { atoms })
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Looks up an atom by its 1-based center number.
    pub fn atom_by_index(&self, index: usize) -> Option<&Atom> {
        self.atoms.iter().find(|atom| atom.index == index)
    }

    /// Returns the atom positions in geometry order, i.e. the undisplaced frame.
    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.atoms.iter().map(|atom| atom.position).collect()
    }

    pub fn into_atoms(self) -> Vec<Atom> {
        self.atoms
    }
}
