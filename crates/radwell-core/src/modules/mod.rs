pub mod bound;
pub mod overlap;
pub mod scattering;

pub use bound::{find_bound_state_energy, normalize, solve_bound_state};
pub use overlap::overlap_integral;
pub use scattering::{asymptotic_region_ok, phase_shift, phase_shift_from_wavefunction};
