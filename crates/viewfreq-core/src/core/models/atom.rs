use super::elements;
use nalgebra::Point3;

/// Represents one atom of a reported molecular geometry.
///
/// Atoms are created once per parsed geometry block and never modified
/// afterwards. The `index` is the center number assigned by the transcript, so
/// it is 1-based and dense within one geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The 1-based center number of the atom within its geometry.
    pub index: usize,
    /// The chemical symbol (e.g., "C", "O", "Fe").
    pub element: String,
    /// The atomic number, in `1..=118` for atoms read from a transcript.
    pub atomic_number: u8,
    /// The Cartesian coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom`, deriving the element symbol from the atomic number.
    ///
    /// Atomic numbers outside the periodic table get the sentinel symbol
    /// [`elements::UNKNOWN_SYMBOL`].
    ///
    /// # Arguments
    ///
    /// * `index` - The 1-based center number.
    /// * `atomic_number` - The atomic number of the element.
    /// * `position` - The Cartesian coordinates in Angstroms.
    pub fn new(index: usize, atomic_number: u8, position: Point3<f64>) -> Self {
        Self {
            index,
            element: elements::symbol_for(atomic_number).to_string(),
            atomic_number,
            position,
        }
    }

    /// Returns `true` when all three coordinates are finite numbers.
    pub fn has_finite_position(&self) -> bool {
        self.position.iter().all(|c| c.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_resolves_element_symbol() {
        let atom = Atom::new(1, 8, Point3::new(0.0, 0.0, 0.1173));
        assert_eq!(atom.index, 1);
        assert_eq!(atom.element, "O");
        assert_eq!(atom.atomic_number, 8);
        assert_eq!(atom.position, Point3::new(0.0, 0.0, 0.1173));
    }

    #[test]
    fn new_atom_with_unmapped_number_uses_sentinel_symbol() {
        let atom = Atom::new(3, 0, Point3::origin());
        assert_eq!(atom.element, elements::UNKNOWN_SYMBOL);
    }

    #[test]
    fn has_finite_position_detects_nan_and_infinity() {
        let mut atom = Atom::new(1, 1, Point3::new(1.0, 2.0, 3.0));
        assert!(atom.has_finite_position());
        atom.position.y = f64::NAN;
        assert!(!atom.has_finite_position());
        atom.position.y = f64::INFINITY;
        assert!(!atom.has_finite_position());
    }

    #[test]
    fn atom_equality_and_clone_works() {
        let atom1 = Atom::new(2, 1, Point3::new(0.0, 0.7572, -0.4692));
        let atom2 = atom1.clone();
        assert_eq!(atom1, atom2);
    }
}
