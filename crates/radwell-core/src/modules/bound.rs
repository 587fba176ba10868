//! Shooting-method eigenvalue search and bound-state normalization.
//!
//! The search brackets adaptively on the observed node count instead of
//! hardcoded per-n energy windows: the count of u(r_max; E) is a step
//! function of E that jumps from target to target+1 exactly where the
//! boundary value crosses zero, so bisecting the transition converges on the
//! eigenvalue for any well depth.

use crate::domain::{
    BoundStateResult, MassCoupling, PotentialParams, QuantumLabels, RadialGrid,
    RadialWavefunction, SearchOptions, SolverError, SolverResult,
};
use crate::numerics::propagator::{propagate_radial, OriginStart};
use crate::numerics::{count_nodes, simpson_integral};

/// Number of probe energies in the fallback scan when bisection alone never
/// lands on the target node count.
const FALLBACK_SCAN_POINTS: usize = 17;

#[derive(Debug, Clone)]
struct Shot {
    energy: f64,
    wavefunction: RadialWavefunction,
    nodes: usize,
    boundary: f64,
}

fn shoot(
    params: &PotentialParams,
    coupling: MassCoupling,
    l: u32,
    grid: RadialGrid,
    energy: f64,
) -> SolverResult<Shot> {
    let wavefunction = propagate_radial(
        params,
        coupling,
        energy,
        l,
        grid,
        OriginStart::RiccatiBessel,
    )?;
    let nodes = count_nodes(wavefunction.samples());
    let boundary = wavefunction.boundary_fraction();
    Ok(Shot {
        energy,
        wavefunction,
        nodes,
        boundary,
    })
}

/// Searches (bracket or (-V0, 0) by default) for the eigenvalue whose
/// wavefunction carries exactly n - l - 1 interior nodes. A candidate that
/// never reaches the boundary tolerance is still returned, flagged
/// `converged = false`, for diagnostics; an exhausted search with no
/// candidate at the target node count reports `NoBoundStateFound`.
pub fn find_bound_state_energy(
    params: &PotentialParams,
    coupling: MassCoupling,
    labels: QuantumLabels,
    grid: RadialGrid,
    options: &SearchOptions,
) -> SolverResult<BoundStateResult> {
    let target = labels.target_nodes();
    let depth = params.depth_mev();

    let (bracket_low, bracket_high) = options
        .bracket_mev
        .unwrap_or((-depth, -1.0e-9 * depth));
    if !(bracket_low < bracket_high && bracket_high < 0.0) {
        return Err(SolverError::InvalidParameter {
            name: "bracket_mev",
            value: bracket_high,
        });
    }

    let mut attempts = 0_usize;
    let mut bisections = 0_usize;

    // Deep end of the bracket must sit below the target state.
    let mut low = shoot(params, coupling, labels.l(), grid, bracket_low)?;
    while low.nodes > target && attempts < options.max_bracket_retries {
        attempts += 1;
        let deeper = low.energy - depth;
        low = shoot(params, coupling, labels.l(), grid, deeper)?;
    }
    if low.nodes > target {
        return Err(SolverError::NoBoundStateFound {
            l: labels.l(),
            n: labels.n(),
            attempts,
        });
    }

    // Shallow end must already carry more nodes than the target, otherwise
    // the well holds no state with this label.
    let high = shoot(params, coupling, labels.l(), grid, bracket_high)?;
    if high.nodes <= target {
        return Err(SolverError::NoBoundStateFound {
            l: labels.l(),
            n: labels.n(),
            attempts,
        });
    }

    let mut lo = low;
    let mut hi = high;
    for _ in 0..options.max_node_bisections {
        if lo.nodes == target && hi.nodes == target + 1 {
            break;
        }
        bisections += 1;
        let mid = shoot(
            params,
            coupling,
            labels.l(),
            grid,
            0.5 * (lo.energy + hi.energy),
        )?;
        if mid.nodes <= target {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    let mut best: Option<Shot> = if lo.nodes == target {
        Some(lo.clone())
    } else {
        None
    };

    for _ in 0..options.max_refine_bisections {
        let width = hi.energy - lo.energy;
        let boundary_ok = best
            .as_ref()
            .is_some_and(|shot| shot.boundary.abs() <= options.boundary_tolerance);
        if boundary_ok && width <= options.energy_tolerance_mev {
            break;
        }
        if width <= f64::EPSILON * depth {
            break;
        }

        bisections += 1;
        let mid = shoot(
            params,
            coupling,
            labels.l(),
            grid,
            0.5 * (lo.energy + hi.energy),
        )?;
        if mid.nodes == target {
            let better = best
                .as_ref()
                .is_none_or(|shot| mid.boundary.abs() < shot.boundary.abs());
            if better {
                best = Some(mid.clone());
            }
        }
        if mid.nodes <= target {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    // Bisection can step across the target count when the counting threshold
    // swallows a marginal crossing; a bounded scan recovers the candidate.
    if best.is_none() && attempts < options.max_bracket_retries {
        attempts += 1;
        let width = hi.energy - lo.energy;
        for index in 1..FALLBACK_SCAN_POINTS {
            let energy = lo.energy + width * index as f64 / FALLBACK_SCAN_POINTS as f64;
            let probe = shoot(params, coupling, labels.l(), grid, energy)?;
            if probe.nodes == target {
                let better = best
                    .as_ref()
                    .is_none_or(|shot| probe.boundary.abs() < shot.boundary.abs());
                if better {
                    best = Some(probe);
                }
            }
        }
    }

    let Some(best) = best else {
        return Err(SolverError::NoBoundStateFound {
            l: labels.l(),
            n: labels.n(),
            attempts,
        });
    };

    let converged = best.boundary.abs() <= options.boundary_tolerance
        && best.nodes == target
        && best.energy < 0.0;

    Ok(BoundStateResult {
        energy_mev: best.energy,
        raw: best.wavefunction,
        normalized: None,
        node_count: best.nodes,
        boundary_value: best.boundary,
        converged,
        bisections,
    })
}

/// Rescales so the probability integral of u^2 over the grid equals one.
pub fn normalize(wavefunction: &RadialWavefunction) -> SolverResult<RadialWavefunction> {
    let squared: Vec<f64> = wavefunction
        .samples()
        .iter()
        .map(|value| value * value)
        .collect();
    let integral = simpson_integral(&squared, wavefunction.grid().step_fm());

    if !integral.is_finite() || integral <= 0.0 {
        return Err(SolverError::DegenerateNormalization { integral });
    }

    let scale = 1.0 / integral.sqrt();
    let samples: Vec<f64> = wavefunction
        .samples()
        .iter()
        .map(|value| value * scale)
        .collect();
    RadialWavefunction::from_samples(wavefunction.grid(), samples)
}

/// Search plus normalization. External consumers (overlap integrals, form
/// factors) read `normalized` and `energy_mev`; non-converged candidates are
/// passed through without a normalized companion.
pub fn solve_bound_state(
    params: &PotentialParams,
    coupling: MassCoupling,
    labels: QuantumLabels,
    grid: RadialGrid,
    options: &SearchOptions,
) -> SolverResult<BoundStateResult> {
    let mut result = find_bound_state_energy(params, coupling, labels, grid, options)?;
    if result.converged {
        result.normalized = Some(normalize(&result.raw)?);
    }
    Ok(result)
}
