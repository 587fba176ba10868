pub mod diagnostics;
pub mod propagator;
pub mod special;

pub use diagnostics::{count_nodes, wronskian_trace, WronskianTrace};
pub use propagator::{propagate, propagate_radial, OriginStart};

use crate::domain::{SolverError, SolverResult};

/// Flags the first non-finite entry of a propagated sequence. Instability is
/// surfaced, never clamped; it means the step size or coupling is too large
/// for the chosen energy and potential.
pub fn ensure_finite(samples: &[f64], step: f64) -> SolverResult<()> {
    for (index, value) in samples.iter().copied().enumerate() {
        if !value.is_finite() {
            return Err(SolverError::NumericalInstability {
                index,
                radius: index as f64 * step,
            });
        }
    }

    Ok(())
}

/// Composite Simpson rule over a uniform grid. An odd interval count is
/// closed with a trapezoid on the final interval.
pub fn simpson_integral(values: &[f64], step: f64) -> f64 {
    let count = values.len();
    if count < 2 {
        return 0.0;
    }

    let intervals = count - 1;
    let simpson_intervals = if intervals % 2 == 0 {
        intervals
    } else {
        intervals - 1
    };

    let mut sum = 0.0;
    if simpson_intervals >= 2 {
        sum += values[0] + values[simpson_intervals];
        let mut index = 1;
        while index < simpson_intervals {
            let weight = if index % 2 == 1 { 4.0 } else { 2.0 };
            sum += weight * values[index];
            index += 1;
        }
        sum *= step / 3.0;
    }

    if simpson_intervals != intervals {
        sum += 0.5 * step * (values[intervals - 1] + values[intervals]);
    }

    sum
}

/// Five-point one-sided derivative at the last sample, O(h^4). The matcher
/// needs this order so the boundary-derivative error stays below the
/// initializer effects the phase shift is meant to resolve.
pub fn boundary_derivative(samples: &[f64], step: f64) -> SolverResult<f64> {
    let count = samples.len();
    if count < 5 {
        return Err(SolverError::InvalidParameter {
            name: "sample_count",
            value: count as f64,
        });
    }

    let last = count - 1;
    Ok(
        (25.0 * samples[last] - 48.0 * samples[last - 1] + 36.0 * samples[last - 2]
            - 16.0 * samples[last - 3]
            + 3.0 * samples[last - 4])
            / (12.0 * step),
    )
}

pub fn relative_difference(lhs: f64, rhs: f64, relative_floor: f64) -> f64 {
    let scale = lhs.abs().max(rhs.abs()).max(relative_floor);
    (lhs - rhs).abs() / scale
}

#[cfg(test)]
mod tests {
    use super::{boundary_derivative, ensure_finite, relative_difference, simpson_integral};
    use crate::domain::SolverError;

    #[test]
    fn ensure_finite_reports_first_bad_index() {
        assert!(ensure_finite(&[0.0, 1.0, 2.0], 0.1).is_ok());

        let error = ensure_finite(&[0.0, 1.0, f64::NAN, f64::INFINITY], 0.5)
            .expect_err("non-finite samples should fail");
        assert_eq!(
            error,
            SolverError::NumericalInstability {
                index: 2,
                radius: 1.0,
            }
        );
    }

    #[test]
    fn simpson_is_exact_for_cubics() {
        let step = 0.125;
        let values: Vec<f64> = (0..=16)
            .map(|index| {
                let x = step * index as f64;
                x * x * x - 2.0 * x * x + 3.0
            })
            .collect();

        let exact = {
            let x: f64 = 2.0;
            x.powi(4) / 4.0 - 2.0 * x.powi(3) / 3.0 + 3.0 * x
        };
        assert!((simpson_integral(&values, step) - exact).abs() < 1.0e-12);
    }

    #[test]
    fn simpson_closes_odd_interval_counts_with_a_trapezoid() {
        let step = 0.25;
        let values: Vec<f64> = (0..=5).map(|index| step * index as f64).collect();
        // integral of x over [0, 1.25]; the trapezoid closure is exact for a line
        assert!((simpson_integral(&values, step) - 1.25_f64.powi(2) / 2.0).abs() < 1.0e-12);
    }

    #[test]
    fn boundary_derivative_is_high_order() {
        let step = 0.01;
        let samples: Vec<f64> = (0..=200).map(|index| (step * index as f64).sin()).collect();
        let derivative = boundary_derivative(&samples, step).expect("derivative");
        assert!((derivative - 2.0_f64.cos()).abs() < 1.0e-8);
    }

    #[test]
    fn boundary_derivative_requires_five_samples() {
        let error = boundary_derivative(&[0.0, 1.0], 0.1).expect_err("too short");
        assert!(matches!(
            error,
            SolverError::InvalidParameter {
                name: "sample_count",
                ..
            }
        ));
    }

    #[test]
    fn relative_difference_uses_relative_floor() {
        let diff = relative_difference(0.0, 1.0e-10, 1.0e-6);
        assert!((diff - 1.0e-4).abs() < 1.0e-12);
    }
}
