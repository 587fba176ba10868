use radwell_core::numerics::propagator::{propagate, OriginStart};
use radwell_core::{
    phase_shift, phase_shift_from_wavefunction, MassCoupling, PotentialParams, RadialGrid,
    RadialWavefunction,
};

const COUPLING: f64 = 0.038_121_7;

/// Square-well coefficient for l = 0: f = -q^2 inside, -k^2 outside, with
/// the midpoint value on the edge node.
fn square_well_coefficient(
    coupling: f64,
    depth: f64,
    well_radius: f64,
    energy: f64,
) -> impl Fn(f64) -> f64 {
    move |r: f64| {
        let inside = -coupling * (depth + energy);
        let outside = -coupling * energy;
        if r < well_radius - 1.0e-12 {
            inside
        } else if r > well_radius + 1.0e-12 {
            outside
        } else {
            0.5 * (inside + outside)
        }
    }
}

/// s-wave square-well phase shift from the exact interior solution sin(q r)
/// matched at the well edge.
fn analytic_square_well_delta(coupling: f64, depth: f64, well_radius: f64, energy: f64) -> f64 {
    let k = (coupling * energy).sqrt();
    let q = (coupling * (depth + energy)).sqrt();
    let u = (q * well_radius).sin();
    let du = q * (q * well_radius).cos();
    let x = k * well_radius;

    (k * u * x.cos() - du * x.sin()).atan2(du * x.cos() + k * u * x.sin())
}

fn wrap_phase(difference: f64) -> f64 {
    (difference + std::f64::consts::PI).rem_euclid(2.0 * std::f64::consts::PI)
        - std::f64::consts::PI
}

fn numeric_square_well_delta(step: f64, start: OriginStart) -> f64 {
    let depth = 20.0;
    let well_radius = 2.0;
    let energy = 2.0;
    let r_max = 10.0;
    let coupling = MassCoupling::from_value(COUPLING).expect("coupling");

    let grid = RadialGrid::new(step, r_max).expect("grid");
    let coefficient = square_well_coefficient(COUPLING, depth, well_radius, energy);
    let q_squared = COUPLING * (energy + depth);
    let (u0, u1) = start.seed(step, 0, q_squared);

    let samples = propagate(&coefficient, u0, u1, step, grid.sample_count());
    let wavefunction = RadialWavefunction::from_samples(grid, samples).expect("wavefunction");
    phase_shift_from_wavefunction(&wavefunction, energy, 0, coupling)
        .expect("phase shift")
        .delta_rad
}

#[test]
fn square_well_errors_shrink_with_the_step_and_favor_the_bessel_start() {
    let exact = analytic_square_well_delta(COUPLING, 20.0, 2.0, 2.0);
    let steps = [0.05_f64, 0.02, 0.01];

    let mut naive_errors = Vec::new();
    let mut bessel_errors = Vec::new();
    for step in steps {
        let naive = numeric_square_well_delta(step, OriginStart::PowerLaw);
        let bessel = numeric_square_well_delta(step, OriginStart::RiccatiBessel);
        naive_errors.push(wrap_phase(naive - exact).abs());
        bessel_errors.push(wrap_phase(bessel - exact).abs());
    }

    for index in 1..steps.len() {
        assert!(
            naive_errors[index] < naive_errors[index - 1],
            "naive errors not monotone: {naive_errors:?}"
        );
        assert!(
            bessel_errors[index] < bessel_errors[index - 1],
            "bessel errors not monotone: {bessel_errors:?}"
        );
    }

    for index in 0..steps.len() {
        assert!(
            bessel_errors[index] < naive_errors[index],
            "h={}: bessel {} vs naive {}",
            steps[index],
            bessel_errors[index],
            naive_errors[index]
        );
    }

    // at the finest step the analytic start wins by a wide margin
    assert!(
        bessel_errors[2] * 20.0 < naive_errors[2],
        "bessel {} vs naive {}",
        bessel_errors[2],
        naive_errors[2]
    );
}

#[test]
fn alpha_neutron_p_wave_initializers_agree_at_fine_steps() {
    let params = PotentialParams::new(46.23, 2.0, 0.5).expect("params");
    let coupling = MassCoupling::from_value(COUPLING).expect("coupling");
    let energy = 2.0;
    let fine = RadialGrid::new(0.01, 10.0).expect("grid");
    let coarse = RadialGrid::new(0.1, 10.0).expect("grid");

    let fine_bessel = phase_shift(
        &params,
        coupling,
        energy,
        1,
        fine,
        OriginStart::RiccatiBessel,
    )
    .expect("phase shift")
    .delta_rad;
    let fine_naive = phase_shift(&params, coupling, energy, 1, fine, OriginStart::PowerLaw)
        .expect("phase shift")
        .delta_rad;
    let coarse_bessel = phase_shift(
        &params,
        coupling,
        energy,
        1,
        coarse,
        OriginStart::RiccatiBessel,
    )
    .expect("phase shift")
    .delta_rad;

    assert!(
        wrap_phase(fine_bessel - fine_naive).abs() < 1.0e-4,
        "initializers disagree: {fine_bessel} vs {fine_naive}"
    );

    let step_difference = wrap_phase(fine_bessel - coarse_bessel).abs();
    assert!(
        step_difference > 1.0e-6,
        "step refinement should move the phase shift measurably, got {step_difference}"
    );
    assert!(step_difference < 0.5, "refinement jump suspiciously large");
}
