/// Real roots of `a t^2 + b t + c = 0`.
///
/// A degenerate (linear) equation yields its single root, and a constant
/// equation yields no roots. Roots are not sorted and may lie outside `[0, 1]`.
pub fn solve_quadratic(c: f64, b: f64, a: f64) -> Vec<f64> {
    if a == 0. {
        if b == 0. {
            return vec![];
        }
        return vec![-c / b];
    }

    // From Numerical Recipes, 5.6, Quadratic and Cubic Equations
    let d = b * b - 4. * a * c;
    if d < 0. {
        return vec![];
    }
    let mut d = d.sqrt();
    // choose the sign so that b + d grows in magnitude
    if b < 0. {
        d = -d;
    }
    let q = (b + d) / -2.;
    let mut roots = vec![q / a];
    if q != 0. {
        roots.push(c / q);
    }
    roots
}

/// Step to the next representable f64 above `v`.
pub fn next_up(v: f64) -> f64 {
    f64::from_bits(v.to_bits().wrapping_add(1))
}

/// Step to the next representable f64 below `v`.
pub fn next_down(v: f64) -> f64 {
    f64::from_bits(v.to_bits().wrapping_sub(1))
}

/// Relative closeness test used when deciding two curves coincide.
pub fn fairly_close(v1: f64, v2: f64) -> bool {
    (v1 - v2).abs() < v1.abs().max(v2.abs()) * 1e-10
}
