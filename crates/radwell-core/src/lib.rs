//! radwell-core: bound states and elastic-scattering phase shifts for a
//! particle in a central Woods-Saxon well, via fixed-step Numerov integration
//! of the radial Schrödinger equation.
//!
//! Everything is a pure pass over freshly allocated sequences: propagation,
//! node counting, Wronskian monitoring, the shooting-method eigenvalue
//! search, and the asymptotic phase-shift matcher share no mutable state, and
//! the mass-dependent coupling factor is explicit configuration on every
//! entry point. Units are MeV, fm, and radians throughout.

pub mod common;
pub mod domain;
pub mod modules;
pub mod numerics;
pub mod potential;

pub use domain::{
    BoundStateResult, MassCoupling, PhaseShiftResult, PotentialParams, QuantumLabels, RadialGrid,
    RadialWavefunction, SearchOptions, SolverError, SolverResult,
};
pub use modules::{
    asymptotic_region_ok, find_bound_state_energy, normalize, overlap_integral, phase_shift,
    phase_shift_from_wavefunction, solve_bound_state,
};
pub use numerics::{count_nodes, propagate, propagate_radial, wronskian_trace, OriginStart, WronskianTrace};
pub use potential::{radial_coefficient, woods_saxon};
