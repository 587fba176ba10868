#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolverError {
    #[error("parameter '{name}' must be positive and finite, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("quantum labels l={l}, n={n} are unphysical: n - l - 1 must be >= 0")]
    UnphysicalQuantumNumbers { l: u32, n: u32 },
    #[error("wavefunction sample count {actual} does not match the grid ({expected})")]
    SampleCountMismatch { expected: usize, actual: usize },
    #[error("propagated wavefunction is non-finite at index {index} (r = {radius} fm)")]
    NumericalInstability { index: usize, radius: f64 },
    #[error("no bound state found for l={l}, n={n} after {attempts} bracket attempts")]
    NoBoundStateFound { l: u32, n: u32, attempts: usize },
    #[error("wavefunction norm integral is degenerate: {integral}")]
    DegenerateNormalization { integral: f64 },
    #[error(
        "wavefunction grids differ: {left_samples} samples at h={left_step} \
         vs {right_samples} samples at h={right_step}"
    )]
    GridMismatch {
        left_samples: usize,
        left_step: f64,
        right_samples: usize,
        right_step: f64,
    },
}

pub type SolverResult<T> = Result<T, SolverError>;
