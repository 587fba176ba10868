pub mod errors;

pub use errors::{SolverError, SolverResult};

use crate::common::constants::mass_coupling_factor;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Woods-Saxon well parameters. `depth_mev` is a positive magnitude; the
/// potential itself is attractive (negative energy contribution).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PotentialParams {
    depth_mev: f64,
    radius_fm: f64,
    diffuseness_fm: f64,
}

impl PotentialParams {
    pub fn new(depth_mev: f64, radius_fm: f64, diffuseness_fm: f64) -> SolverResult<Self> {
        require_positive("depth_mev", depth_mev)?;
        require_positive("radius_fm", radius_fm)?;
        require_positive("diffuseness_fm", diffuseness_fm)?;

        Ok(Self {
            depth_mev,
            radius_fm,
            diffuseness_fm,
        })
    }

    pub fn depth_mev(&self) -> f64 {
        self.depth_mev
    }

    pub fn radius_fm(&self) -> f64 {
        self.radius_fm
    }

    pub fn diffuseness_fm(&self) -> f64 {
        self.diffuseness_fm
    }
}

/// The 2mu/hbar^2 factor in fm^-2 MeV^-1 that scales every potential and
/// energy term in the radial equation. Always passed explicitly; there is no
/// module-level default system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassCoupling(f64);

impl MassCoupling {
    pub fn from_reduced_mass_mev(reduced_mass_mev: f64) -> SolverResult<Self> {
        require_positive("reduced_mass_mev", reduced_mass_mev)?;
        Ok(Self(mass_coupling_factor(reduced_mass_mev)))
    }

    pub fn from_value(value: f64) -> SolverResult<Self> {
        require_positive("mass_coupling", value)?;
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// (l, n) state labels. A valid bound state labelled (l, n) carries exactly
/// n - l - 1 interior nodes; labels violating that are rejected up front.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantumLabels {
    l: u32,
    n: u32,
    total_angular_momentum: Option<f64>,
}

impl QuantumLabels {
    pub fn new(l: u32, n: u32) -> SolverResult<Self> {
        if n < 1 || n < l + 1 {
            return Err(SolverError::UnphysicalQuantumNumbers { l, n });
        }

        Ok(Self {
            l,
            n,
            total_angular_momentum: None,
        })
    }

    pub fn with_total_angular_momentum(mut self, j: f64) -> Self {
        self.total_angular_momentum = Some(j);
        self
    }

    pub fn l(&self) -> u32 {
        self.l
    }

    pub fn n(&self) -> u32 {
        self.n
    }

    pub fn total_angular_momentum(&self) -> Option<f64> {
        self.total_angular_momentum
    }

    pub fn target_nodes(&self) -> usize {
        (self.n - self.l - 1) as usize
    }
}

/// Uniform radial grid starting at r = 0. Owned by a single propagation call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadialGrid {
    step_fm: f64,
    r_max_fm: f64,
}

impl RadialGrid {
    pub fn new(step_fm: f64, r_max_fm: f64) -> SolverResult<Self> {
        require_positive("step_fm", step_fm)?;
        require_positive("r_max_fm", r_max_fm)?;
        if r_max_fm < step_fm {
            return Err(SolverError::InvalidParameter {
                name: "r_max_fm",
                value: r_max_fm,
            });
        }

        Ok(Self { step_fm, r_max_fm })
    }

    pub fn step_fm(&self) -> f64 {
        self.step_fm
    }

    pub fn r_max_fm(&self) -> f64 {
        self.r_max_fm
    }

    /// floor(r_max/h) + 1, with a small guard against the usual binary
    /// representation shortfall of decimal steps.
    pub fn sample_count(&self) -> usize {
        (self.r_max_fm / self.step_fm + 1.0e-6).floor() as usize + 1
    }

    pub fn radius_at(&self, index: usize) -> f64 {
        index as f64 * self.step_fm
    }

    /// Radius of the last sample, which the matcher uses as the matching
    /// radius. Equals `r_max_fm` whenever the step divides it.
    pub fn outer_radius_fm(&self) -> f64 {
        self.radius_at(self.sample_count() - 1)
    }
}

/// Samples of u(r) = r * psi(r) on a uniform grid; u(0) = 0 exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialWavefunction {
    grid: RadialGrid,
    samples: Vec<f64>,
}

impl RadialWavefunction {
    pub fn from_samples(grid: RadialGrid, samples: Vec<f64>) -> SolverResult<Self> {
        let expected = grid.sample_count();
        if samples.len() != expected {
            return Err(SolverError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self { grid, samples })
    }

    pub fn grid(&self) -> RadialGrid {
        self.grid
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn max_abs(&self) -> f64 {
        self.samples
            .iter()
            .fold(0.0_f64, |maximum, value| maximum.max(value.abs()))
    }

    /// Boundary value u(r_max) scaled by the overall amplitude, so tolerance
    /// checks are independent of the seed normalization.
    pub fn boundary_fraction(&self) -> f64 {
        let maximum = self.max_abs();
        if maximum == 0.0 {
            return 0.0;
        }

        self.samples.last().copied().unwrap_or(0.0) / maximum
    }

    pub fn same_grid(&self, other: &Self) -> bool {
        self.grid == other.grid && self.samples.len() == other.samples.len()
    }
}

/// Outcome of one bound-state search. Immutable after creation; non-converged
/// results still carry the best candidate for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundStateResult {
    pub energy_mev: f64,
    pub raw: RadialWavefunction,
    pub normalized: Option<RadialWavefunction>,
    pub node_count: usize,
    pub boundary_value: f64,
    pub converged: bool,
    pub bisections: usize,
}

/// Phase shift and the matching diagnostics that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseShiftResult {
    pub delta_rad: f64,
    pub matching_radius_fm: f64,
    pub wavenumber_inv_fm: f64,
    pub s_matrix: Complex64,
    pub bessel_value: f64,
    pub neumann_value: f64,
    pub bessel_derivative: f64,
    pub neumann_derivative: f64,
}

/// Knobs for the shooting-method search. The defaults reproduce the loose
/// 0.01 MeV tolerance the boundary tail warrants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub bracket_mev: Option<(f64, f64)>,
    pub energy_tolerance_mev: f64,
    pub boundary_tolerance: f64,
    pub max_node_bisections: usize,
    pub max_refine_bisections: usize,
    pub max_bracket_retries: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            bracket_mev: None,
            energy_tolerance_mev: 0.01,
            boundary_tolerance: 0.01,
            max_node_bisections: 64,
            max_refine_bisections: 200,
            max_bracket_retries: 8,
        }
    }
}

fn require_positive(name: &'static str, value: f64) -> SolverResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SolverError::InvalidParameter { name, value });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        MassCoupling, PotentialParams, QuantumLabels, RadialGrid, RadialWavefunction, SolverError,
    };

    #[test]
    fn potential_params_reject_non_positive_values() {
        assert!(matches!(
            PotentialParams::new(0.0, 2.0, 0.6),
            Err(SolverError::InvalidParameter {
                name: "depth_mev",
                ..
            })
        ));
        assert!(matches!(
            PotentialParams::new(50.0, -1.0, 0.6),
            Err(SolverError::InvalidParameter {
                name: "radius_fm",
                ..
            })
        ));
        assert!(matches!(
            PotentialParams::new(50.0, 2.0, f64::NAN),
            Err(SolverError::InvalidParameter {
                name: "diffuseness_fm",
                ..
            })
        ));
    }

    #[test]
    fn mass_coupling_from_reduced_mass_matches_direct_value() {
        let from_mass = MassCoupling::from_reduced_mass_mev(745.0).expect("coupling");
        let direct = MassCoupling::from_value(from_mass.value()).expect("coupling");
        assert_eq!(from_mass, direct);
        assert!((from_mass.value() - 0.038_122).abs() < 1.0e-6);
    }

    #[test]
    fn quantum_labels_enforce_node_count_validity() {
        let labels = QuantumLabels::new(1, 3).expect("labels");
        assert_eq!(labels.target_nodes(), 1);

        assert_eq!(
            QuantumLabels::new(2, 2),
            Err(SolverError::UnphysicalQuantumNumbers { l: 2, n: 2 })
        );
        assert_eq!(
            QuantumLabels::new(0, 0),
            Err(SolverError::UnphysicalQuantumNumbers { l: 0, n: 0 })
        );
    }

    #[test]
    fn grid_sample_count_survives_decimal_steps() {
        let grid = RadialGrid::new(0.01, 20.0).expect("grid");
        assert_eq!(grid.sample_count(), 2001);
        assert!((grid.outer_radius_fm() - 20.0).abs() < 1.0e-9);

        let grid = RadialGrid::new(0.01, 10.0).expect("grid");
        assert_eq!(grid.sample_count(), 1001);

        let grid = RadialGrid::new(0.001, 20.0).expect("grid");
        assert_eq!(grid.sample_count(), 20_001);
    }

    #[test]
    fn wavefunction_rejects_sample_count_mismatch() {
        let grid = RadialGrid::new(0.5, 2.0).expect("grid");
        let error = RadialWavefunction::from_samples(grid, vec![0.0, 1.0])
            .expect_err("length mismatch should fail");
        assert_eq!(
            error,
            SolverError::SampleCountMismatch {
                expected: 5,
                actual: 2,
            }
        );
    }

    #[test]
    fn boundary_fraction_is_scale_free() {
        let grid = RadialGrid::new(0.5, 2.0).expect("grid");
        let small = RadialWavefunction::from_samples(grid, vec![0.0, 0.1, 0.4, 0.2, 0.05])
            .expect("wavefunction");
        let large = RadialWavefunction::from_samples(grid, vec![0.0, 100.0, 400.0, 200.0, 50.0])
            .expect("wavefunction");
        assert!((small.boundary_fraction() - large.boundary_fraction()).abs() < 1.0e-15);
    }
}
