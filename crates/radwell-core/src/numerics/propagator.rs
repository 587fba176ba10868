//! Fixed-step Numerov propagation of the radial equation u'' = f(r) u.

use crate::domain::{
    MassCoupling, PotentialParams, RadialGrid, RadialWavefunction, SolverResult,
};
use crate::numerics::ensure_finite;
use crate::numerics::special::bessel::{riccati_i, riccati_j};
use crate::potential::{depth_at_origin, radial_coefficient};
use serde::{Deserialize, Serialize};

/// Strategy for the two wavefunction samples near the origin. Both satisfy
/// the regularity condition u(0) = 0; they differ in how u(h) is seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginStart {
    /// First term of the power-series regular solution, u(h) = h^(l+1).
    PowerLaw,
    /// Short-argument Riccati-Bessel behaviour at the local wavenumber
    /// q = sqrt(coupling * (E - V(0))); falls back to the modified branch
    /// when q^2 < 0 and to the power law at q = 0.
    RiccatiBessel,
}

impl OriginStart {
    pub fn seed(self, step: f64, l: u32, q_squared: f64) -> (f64, f64) {
        match self {
            Self::PowerLaw => (0.0, step.powi(l as i32 + 1)),
            Self::RiccatiBessel => {
                if q_squared > 0.0 {
                    (0.0, riccati_j(l, q_squared.sqrt() * step))
                } else if q_squared < 0.0 {
                    (0.0, riccati_i(l, (-q_squared).sqrt() * step))
                } else {
                    (0.0, step.powi(l as i32 + 1))
                }
            }
        }
    }
}

/// Advances u through the three-point Numerov recurrence
///
/// (1 + h^2 f_{i+1}/12) u_{i+1}
///     = 2 (1 - 5 h^2 f_i / 12) u_i - (1 + h^2 f_{i-1}/12) u_{i-1},
///
/// local truncation error O(h^6). The coefficient function is arbitrary and
/// the inputs are never mutated; identical inputs produce bit-identical
/// output. Non-finite values are allowed to propagate so the caller can
/// surface them as an instability instead of masking them.
pub fn propagate<F>(coefficient: &F, seed_u0: f64, seed_u1: f64, step: f64, sample_count: usize) -> Vec<f64>
where
    F: Fn(f64) -> f64,
{
    let mut samples = Vec::with_capacity(sample_count);
    if sample_count == 0 {
        return samples;
    }

    samples.push(seed_u0);
    if sample_count == 1 {
        return samples;
    }
    samples.push(seed_u1);

    let twelfth = step * step / 12.0;
    let mut f_previous = coefficient(0.0);
    let mut f_current = coefficient(step);

    for index in 2..sample_count {
        let f_next = coefficient(step * index as f64);
        let next = (2.0 * (1.0 - 5.0 * twelfth * f_current) * samples[index - 1]
            - (1.0 + twelfth * f_previous) * samples[index - 2])
            / (1.0 + twelfth * f_next);
        samples.push(next);
        f_previous = f_current;
        f_current = f_next;
    }

    samples
}

/// Propagates the full radial wavefunction for one Woods-Saxon configuration,
/// seeding from the chosen origin strategy and surfacing instability as a
/// structured error.
pub fn propagate_radial(
    params: &PotentialParams,
    coupling: MassCoupling,
    energy_mev: f64,
    l: u32,
    grid: RadialGrid,
    start: OriginStart,
) -> SolverResult<RadialWavefunction> {
    let q_squared = coupling.value() * (energy_mev - depth_at_origin(params));
    let (seed_u0, seed_u1) = start.seed(grid.step_fm(), l, q_squared);
    let coefficient = radial_coefficient(*params, coupling, energy_mev, l);
    let samples = propagate(
        &coefficient,
        seed_u0,
        seed_u1,
        grid.step_fm(),
        grid.sample_count(),
    );
    ensure_finite(&samples, grid.step_fm())?;
    RadialWavefunction::from_samples(grid, samples)
}
