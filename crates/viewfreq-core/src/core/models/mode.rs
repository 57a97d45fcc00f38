use nalgebra::Vector3;

/// The unit-scale displacement of one atom along one normal mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Displacement {
    /// The 1-based center number of the displaced atom.
    pub atom_index: usize,
    /// The dimensionless (dx, dy, dz) displacement direction.
    pub vector: Vector3<f64>,
}

impl Displacement {
    pub fn new(atom_index: usize, vector: Vector3<f64>) -> Self {
        Self { atom_index, vector }
    }

    pub fn magnitude(&self) -> f64 {
        self.vector.norm()
    }
}

/// A vibrational normal mode: one frequency and a displacement per atom.
///
/// Atoms without an entry in `displacements` are stationary in this mode.
#[derive(Debug, Clone, PartialEq)]
pub struct VibrationMode {
    /// The harmonic frequency in cm⁻¹.
    pub frequency: f64,
    /// Per-atom displacements, unique by `atom_index`, in table order.
    pub displacements: Vec<Displacement>,
}

impl VibrationMode {
    pub fn new(frequency: f64) -> Self {
        Self {
            frequency,
            displacements: Vec::new(),
        }
    }

    pub fn displacement_for(&self, atom_index: usize) -> Option<&Displacement> {
        self.displacements
            .iter()
            .find(|displacement| displacement.atom_index == atom_index)
    }

    /// Largest displacement magnitude in the mode, or `0.0` for an empty mode.
    pub fn max_magnitude(&self) -> f64 {
        self.displacements
            .iter()
            .map(Displacement::magnitude)
            .fold(0.0, f64::max)
    }
}
