//! Woods-Saxon central potential and the effective radial-equation builder.

use crate::domain::{MassCoupling, PotentialParams};

/// V(r) = -V0 / (1 + exp((r - R0) / a0)). Finite for every r >= 0 once the
/// parameters pass validation.
pub fn woods_saxon(r: f64, params: &PotentialParams) -> f64 {
    let exponent = (r - params.radius_fm()) / params.diffuseness_fm();
    -params.depth_mev() / (1.0 + exponent.exp())
}

/// V(0); the origin initializer reads the local wavenumber from this.
pub fn depth_at_origin(params: &PotentialParams) -> f64 {
    woods_saxon(0.0, params)
}

/// Coefficient function f with u''(r) = f(r) * u(r):
/// f(r) = l(l+1)/r^2 + coupling * (V(r) - E).
///
/// At r <= 0 the centrifugal term is replaced by the regularized limit
/// coupling * (V(0) - E); the integration loop never samples r = 0 (index 0
/// is pinned by the boundary condition), so the substitution only has to keep
/// the seeded recurrence finite.
pub fn radial_coefficient(
    params: PotentialParams,
    coupling: MassCoupling,
    energy_mev: f64,
    l: u32,
) -> impl Fn(f64) -> f64 {
    let centrifugal = f64::from(l) * f64::from(l + 1);
    move |r: f64| {
        if r <= 0.0 {
            return coupling.value() * (woods_saxon(0.0, &params) - energy_mev);
        }

        centrifugal / (r * r) + coupling.value() * (woods_saxon(r, &params) - energy_mev)
    }
}

#[cfg(test)]
mod tests {
    use super::{depth_at_origin, radial_coefficient, woods_saxon};
    use crate::domain::{MassCoupling, PotentialParams};

    fn reference_params() -> PotentialParams {
        PotentialParams::new(40.0, 2.0, 0.6).expect("params")
    }

    #[test]
    fn woods_saxon_is_half_depth_at_the_radius() {
        let params = reference_params();
        assert!((woods_saxon(2.0, &params) + 20.0).abs() < 1.0e-12);
    }

    #[test]
    fn woods_saxon_is_attractive_and_monotonically_vanishing() {
        let params = reference_params();
        let mut previous = woods_saxon(0.0, &params);
        assert!(previous < 0.0);
        assert!(previous > -40.0);

        for index in 1..=60 {
            let value = woods_saxon(0.25 * index as f64, &params);
            assert!(value < 0.0);
            assert!(value > previous);
            previous = value;
        }
        assert!(woods_saxon(16.0, &params).abs() < 1.0e-8);
    }

    #[test]
    fn coefficient_regularizes_the_origin() {
        let params = reference_params();
        let coupling = MassCoupling::from_reduced_mass_mev(745.0).expect("coupling");
        let f = radial_coefficient(params, coupling, -10.0, 2);

        let at_origin = f(0.0);
        assert!(at_origin.is_finite());
        assert!((at_origin - coupling.value() * (depth_at_origin(&params) + 10.0)).abs() < 1.0e-12);

        let at_interior = f(1.0);
        assert!((at_interior - (6.0 + coupling.value() * (woods_saxon(1.0, &params) + 10.0))).abs() < 1.0e-12);
    }

    #[test]
    fn coefficient_turns_positive_in_the_forbidden_region() {
        let params = reference_params();
        let coupling = MassCoupling::from_reduced_mass_mev(745.0).expect("coupling");
        let f = radial_coefficient(params, coupling, -10.0, 0);

        assert!(f(1.0) < 0.0);
        assert!(f(12.0) > 0.0);
    }
}
