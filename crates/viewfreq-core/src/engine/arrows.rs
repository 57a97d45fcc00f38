use super::config::ArrowParams;
use crate::core::models::atom::Atom;
use crate::core::models::mode::Displacement;
use nalgebra::Point3;

const MIN_MID_FRACTION: f64 = 0.1;
const MAX_MID_FRACTION: f64 = 0.9;

/// A drawable displacement arrow anchored at an atom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub atom_index: usize,
    pub start: Point3<f64>,
    pub end: Point3<f64>,
    pub shaft_radius: f64,
    /// Head width relative to the shaft radius.
    pub head_ratio: f64,
    /// Fraction of the arrow length taken by the shaft, in `[0.1, 0.9]`.
    pub mid_fraction: f64,
}

impl Arrow {
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// Shaft fraction for an arrow of `total_length` with a head of `head_length`.
///
/// Clamped to `[0.1, 0.9]`; degenerate lengths give the lower bound.
pub fn mid_fraction(total_length: f64, head_length: f64) -> f64 {
    if total_length <= 0.0 {
        return MIN_MID_FRACTION;
    }
    let ratio = (total_length - head_length) / total_length;
    if !ratio.is_finite() {
        return MIN_MID_FRACTION;
    }
    ratio.clamp(MIN_MID_FRACTION, MAX_MID_FRACTION)
}

/// Converts displacements above the threshold into arrows, in displacement order.
///
/// A displacement is drawn from the atom whose center number equals its
/// `atom_index`; displacements with no such atom are skipped.
pub fn build_arrows(atoms: &[Atom], displacements: &[Displacement], params: &ArrowParams) -> Vec<Arrow> {
    displacements
        .iter()
        .filter(|d| d.magnitude() > params.threshold)
        .filter_map(|d| {
            let atom = atoms.iter().find(|atom| atom.index == d.atom_index)?;
            let total_length = d.magnitude() * params.scale;
            Some(Arrow {
                atom_index: d.atom_index,
                start: atom.position,
                end: atom.position + d.vector * params.scale,
                shaft_radius: params.radius,
                head_ratio: params.head_width,
                mid_fraction: mid_fraction(total_length, params.head_length),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn atoms() -> Vec<Atom> {
        vec![
            Atom::new(1, 8, Point3::new(0.0, 0.0, 0.119262)),
            Atom::new(2, 1, Point3::new(0.0, 0.763239, -0.477047)),
            Atom::new(3, 1, Point3::new(0.0, -0.763239, -0.477047)),
        ]
    }

    #[test]
    fn mid_fraction_clamps_to_bounds() {
        assert_eq!(mid_fraction(0.0, 0.3), 0.1);
        assert_eq!(mid_fraction(-1.0, 0.3), 0.1);
        assert_eq!(mid_fraction(0.2, 0.3), 0.1);
        assert_eq!(mid_fraction(100.0, 0.3), 0.9);
        assert!((mid_fraction(1.0, 0.3) - 0.7).abs() < 1e-12);
        assert_eq!(mid_fraction(f64::INFINITY, 0.3), 0.1);
    }

    #[test]
    fn threshold_excludes_small_and_equal_magnitudes() {
        let displacements = vec![
            Displacement::new(1, Vector3::new(0.0, 0.0, 0.005)),
            Displacement::new(2, Vector3::new(0.0, 0.0, 0.01)),
            Displacement::new(3, Vector3::new(0.0, 0.0, 0.02)),
        ];
        let arrows = build_arrows(&atoms(), &displacements, &ArrowParams::default());
        assert_eq!(arrows.len(), 1);
        assert_eq!(arrows[0].atom_index, 3);
    }

    #[test]
    fn arrow_spans_scaled_displacement_from_atom() {
        let displacements = vec![Displacement::new(2, Vector3::new(0.0, 0.03, -0.04))];
        let params = ArrowParams::default();
        let arrows = build_arrows(&atoms(), &displacements, &params);
        let arrow = arrows[0];

        assert_eq!(arrow.start, atoms()[1].position);
        assert!((arrow.end - Point3::new(0.0, 1.063239, -0.877047)).norm() < 1e-12);
        assert!((arrow.length() - 0.5).abs() < 1e-12);
        assert!((arrow.mid_fraction - 0.4).abs() < 1e-12);
        assert_eq!(arrow.shaft_radius, 0.05);
        assert_eq!(arrow.head_ratio, 2.0);
    }

    #[test]
    fn zero_threshold_with_zero_vector_is_still_excluded() {
        let params = ArrowParams {
            threshold: 0.0,
            ..ArrowParams::default()
        };
        let displacements = vec![Displacement::new(1, Vector3::zeros())];
        assert!(build_arrows(&atoms(), &displacements, &params).is_empty());
    }

    #[test]
    fn out_of_range_atom_indices_are_skipped() {
        let displacements = vec![
            Displacement::new(0, Vector3::new(0.0, 0.0, 1.0)),
            Displacement::new(4, Vector3::new(0.0, 0.0, 1.0)),
            Displacement::new(1, Vector3::new(0.0, 0.0, 1.0)),
        ];
        let arrows = build_arrows(&atoms(), &displacements, &ArrowParams::default());
        assert_eq!(arrows.len(), 1);
        assert_eq!(arrows[0].atom_index, 1);
    }

    #[test]
    fn atoms_are_matched_by_center_number_not_position() {
        // Center 2 was skipped by the log reader, leaving a gap.
        let gapped = vec![
            Atom::new(1, 8, Point3::new(0.0, 0.0, 0.0)),
            Atom::new(3, 1, Point3::new(1.0, 0.0, 0.0)),
        ];
        let displacements = vec![
            Displacement::new(2, Vector3::new(0.0, 0.0, 1.0)),
            Displacement::new(3, Vector3::new(0.0, 0.0, 1.0)),
        ];
        let arrows = build_arrows(&gapped, &displacements, &ArrowParams::default());
        assert_eq!(arrows.len(), 1);
        assert_eq!(arrows[0].atom_index, 3);
        assert_eq!(arrows[0].start, Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn arrows_follow_displacement_order() {
        let displacements = vec![
            Displacement::new(3, Vector3::new(0.1, 0.0, 0.0)),
            Displacement::new(1, Vector3::new(0.1, 0.0, 0.0)),
        ];
        let order: Vec<_> = build_arrows(&atoms(), &displacements, &ArrowParams::default())
            .iter()
            .map(|a| a.atom_index)
            .collect();
        assert_eq!(order, [3, 1]);
    }
}
