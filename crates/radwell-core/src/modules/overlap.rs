//! Radial overlap integral between two normalized wavefunctions, the
//! contract form-factor tooling consumes.

use crate::domain::{RadialWavefunction, SolverError, SolverResult};
use crate::numerics::simpson_integral;

/// Integral of phi_i(r) phi_f(r) dr over the shared grid. Both wavefunctions
/// must be sampled on an identical grid; a mismatch is a caller error.
pub fn overlap_integral(
    initial: &RadialWavefunction,
    final_state: &RadialWavefunction,
) -> SolverResult<f64> {
    if !initial.same_grid(final_state) {
        return Err(SolverError::GridMismatch {
            left_samples: initial.samples().len(),
            left_step: initial.grid().step_fm(),
            right_samples: final_state.samples().len(),
            right_step: final_state.grid().step_fm(),
        });
    }

    let product: Vec<f64> = initial
        .samples()
        .iter()
        .zip(final_state.samples())
        .map(|(lhs, rhs)| lhs * rhs)
        .collect();

    Ok(simpson_integral(&product, initial.grid().step_fm()))
}
