//! Real spherical Bessel and Riccati-Bessel functions.
//!
//! The asymptotic matcher consumes j_l/y_l and their derivatives at k*r_max;
//! the origin initializer consumes the Riccati-Bessel short-argument series at
//! q*h, including the modified branch for energies below the local potential
//! floor.

const SERIES_CUTOFF: f64 = 1.0;
const SERIES_MAX_ITER: usize = 160;
const SERIES_REL_TOL: f64 = 1.0e-15;

pub fn spherical_j(order: u32, argument: f64) -> f64 {
    assert_supported_argument(argument, "spherical_j");

    if argument == 0.0 {
        return if order == 0 { 1.0 } else { 0.0 };
    }

    // Upward recurrence amplifies the irregular solution once the order
    // exceeds the argument; the convergent series covers that regime.
    if argument < SERIES_CUTOFF || f64::from(order) > argument {
        return series_j(order, argument);
    }

    let j0 = argument.sin() / argument;
    if order == 0 {
        return j0;
    }

    let j1 = argument.sin() / (argument * argument) - argument.cos() / argument;
    if order == 1 {
        return j1;
    }

    let mut previous = j0;
    let mut current = j1;
    for l in 1..order {
        let next = f64::from(2 * l + 1) / argument * current - previous;
        previous = current;
        current = next;
    }

    current
}

pub fn spherical_y(order: u32, argument: f64) -> f64 {
    assert!(
        argument > 0.0 && argument.is_finite(),
        "spherical_y requires a positive finite argument, got {argument}"
    );

    let y0 = -argument.cos() / argument;
    if order == 0 {
        return y0;
    }

    let y1 = -argument.cos() / (argument * argument) - argument.sin() / argument;
    if order == 1 {
        return y1;
    }

    let mut previous = y0;
    let mut current = y1;
    for l in 1..order {
        let next = f64::from(2 * l + 1) / argument * current - previous;
        previous = current;
        current = next;
    }

    current
}

/// d/dx j_l(x) via j_{l-1} - (l+1)/x * j_l.
pub fn spherical_j_derivative(order: u32, argument: f64) -> f64 {
    if order == 0 {
        return -spherical_j(1, argument);
    }

    spherical_j(order - 1, argument) - f64::from(order + 1) / argument * spherical_j(order, argument)
}

/// d/dx y_l(x) via y_{l-1} - (l+1)/x * y_l.
pub fn spherical_y_derivative(order: u32, argument: f64) -> f64 {
    if order == 0 {
        return -spherical_y(1, argument);
    }

    spherical_y(order - 1, argument) - f64::from(order + 1) / argument * spherical_y(order, argument)
}

/// Riccati-Bessel S_l(x) = x j_l(x); the regular free radial solution.
pub fn riccati_j(order: u32, argument: f64) -> f64 {
    if argument == 0.0 {
        return 0.0;
    }

    argument * spherical_j(order, argument)
}

pub fn riccati_j_derivative(order: u32, argument: f64) -> f64 {
    spherical_j(order, argument) + argument * spherical_j_derivative(order, argument)
}

/// Riccati-Neumann C_l(x) = -x y_l(x); the cosine-like irregular companion.
pub fn riccati_c(order: u32, argument: f64) -> f64 {
    -argument * spherical_y(order, argument)
}

pub fn riccati_c_derivative(order: u32, argument: f64) -> f64 {
    -spherical_y(order, argument) - argument * spherical_y_derivative(order, argument)
}

/// Modified Riccati-Bessel x i_l(x), the regular solution when the local
/// wavenumber is imaginary (energy below the potential at the origin).
pub fn riccati_i(order: u32, argument: f64) -> f64 {
    assert_supported_argument(argument, "riccati_i");

    if argument == 0.0 {
        return 0.0;
    }

    argument * series_modified_i(order, argument)
}

fn assert_supported_argument(argument: f64, function: &str) {
    assert!(
        argument >= 0.0 && argument.is_finite(),
        "{function} requires a finite argument >= 0, got {argument}"
    );
}

/// j_l(x) = x^l / (2l+1)!! * sum_k (-x^2/2)^k / (k! (2l+3)(2l+5)...(2l+2k+1)).
fn series_j(order: u32, argument: f64) -> f64 {
    series_sum(order, argument, -1.0)
}

fn series_modified_i(order: u32, argument: f64) -> f64 {
    series_sum(order, argument, 1.0)
}

fn series_sum(order: u32, argument: f64, sign: f64) -> f64 {
    let mut double_factorial = 1.0;
    let mut odd_factor = -1.0;
    for _ in 0..=order {
        odd_factor += 2.0;
        double_factorial *= odd_factor;
    }

    let u = argument * argument * 0.5;
    let mut sum = 1.0;
    let mut nf = 1.0;
    let mut nfac = f64::from(2 * order + 3);
    let mut den = nfac;
    let mut term_sign = sign;
    let mut ux = u;

    for _ in 0..SERIES_MAX_ITER {
        let delta = ux * (term_sign / den);
        sum += delta;
        let rel_delta = if sum == 0.0 {
            delta.abs()
        } else {
            (delta / sum).abs()
        };
        if rel_delta <= SERIES_REL_TOL {
            return sum * argument.powi(order as i32) / double_factorial;
        }

        term_sign *= sign;
        ux *= u;
        nf += 1.0;
        nfac += 2.0;
        den = nf * nfac * den;
    }

    panic!("spherical Bessel series failed to converge for order {order} and argument {argument}");
}
