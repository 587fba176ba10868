//! Diagnostic passes over already-computed wavefunction sequences. Neither
//! pass is fused into the propagation loop; both leave the data untouched.

use crate::domain::{SolverError, SolverResult};

/// Samples excluded at the start of the sequence: u(0) = 0 and the seed
/// sample must not register as a crossing.
const NODE_EXCLUSION_SAMPLES: usize = 2;

/// A sample only carries a sign once it clears this fraction of the overall
/// amplitude, which keeps isolated near-zero noise from flipping the count.
const NODE_MAGNITUDE_FRACTION: f64 = 1.0e-8;

/// Counts genuine sign reversals of u across the interior of the grid.
pub fn count_nodes(samples: &[f64]) -> usize {
    let maximum = samples
        .iter()
        .fold(0.0_f64, |maximum, value| maximum.max(value.abs()));
    if maximum == 0.0 {
        return 0;
    }

    let threshold = maximum * NODE_MAGNITUDE_FRACTION;
    let mut nodes = 0;
    let mut last_sign = 0_i8;

    for value in samples.iter().copied().skip(NODE_EXCLUSION_SAMPLES) {
        if value.abs() <= threshold {
            continue;
        }

        let sign = if value > 0.0 { 1 } else { -1 };
        if last_sign != 0 && sign != last_sign {
            nodes += 1;
        }
        last_sign = sign;
    }

    nodes
}

/// Trace of the conserved bilinear between a numerical solution and a
/// reference solution sampled on the same grid. Discarded after diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct WronskianTrace {
    values: Vec<f64>,
}

impl WronskianTrace {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Maximum deviation from the trace's initial value. For a regular
    /// reference both factors vanish at r = 0, so the initial value is the
    /// exact conserved 0 and contamination by the irregular solution shows
    /// up directly.
    pub fn drift(&self) -> f64 {
        let Some(first) = self.values.first().copied() else {
            return 0.0;
        };

        self.values
            .iter()
            .map(|value| (value - first).abs())
            .fold(0.0_f64, f64::max)
    }
}

/// W_i = u_i Dw_i - Du_i w_i with D the central difference (one-sided at the
/// ends). Analytically conserved when u and w solve the same second-order
/// equation; drift flags loss of numerical fidelity. Never alters either
/// sequence.
pub fn wronskian_trace(solution: &[f64], reference: &[f64], step: f64) -> SolverResult<WronskianTrace> {
    if solution.len() != reference.len() {
        return Err(SolverError::GridMismatch {
            left_samples: solution.len(),
            left_step: step,
            right_samples: reference.len(),
            right_step: step,
        });
    }
    if solution.len() < 3 {
        return Err(SolverError::InvalidParameter {
            name: "sample_count",
            value: solution.len() as f64,
        });
    }

    let last = solution.len() - 1;
    let derivative = |samples: &[f64], index: usize| -> f64 {
        if index == 0 {
            (samples[1] - samples[0]) / step
        } else if index == last {
            (samples[last] - samples[last - 1]) / step
        } else {
            (samples[index + 1] - samples[index - 1]) / (2.0 * step)
        }
    };

    let mut values = Vec::with_capacity(solution.len());
    for index in 0..=last {
        let value = solution[index] * derivative(reference, index)
            - derivative(solution, index) * reference[index];
        values.push(value);
    }

    Ok(WronskianTrace { values })
}
