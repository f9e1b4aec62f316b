//! Type definitions of Float, otherwise constants and functions which
//! can be used almost everywhere else in the code.

pub type Float = f64;

/// Offset used to keep secondary rays from hitting the surface they
/// start on.
pub const RAY_EPSILON: Float = 0.001;
/// Ray direction components below this magnitude count as parallel to
/// a bounding box slab.
pub const PARALLEL_EPSILON: Float = 1e-8;

/// Clamp the given value *val* to lie between the values *low* and *high*.
pub fn clamp_t<T>(val: T, low: T, high: T) -> T
where
    T: PartialOrd,
{
    if val < low {
        low
    } else if val > high {
        high
    } else {
        val
    }
}

/// Is used to write sRGB-compatible 8-bit image files.
pub fn gamma_correct(value: Float) -> Float {
    if value <= 0.003_130_8 {
        12.92 * value
    } else {
        1.055 as Float * value.powf((1.0 / 2.4) as Float) - 0.055
    }
}

/// Find the real roots of *a·t² + b·t + c = 0*, returned in ascending
/// order. Returns `None` for a negative discriminant or a degenerate
/// (zero or non-finite) leading coefficient. Tiny but nonzero leading
/// coefficients are fine: they come from very large ellipsoids.
pub fn quadratic(a: Float, b: Float, c: Float) -> Option<(Float, Float)> {
    if !a.is_finite() || a == 0.0 {
        return None;
    }
    // find quadratic discriminant
    let discrim: Float = b * b - 4.0 * a * c;
    if discrim < 0.0 || discrim.is_nan() {
        return None;
    }
    let root_discrim: Float = discrim.sqrt();
    // compute quadratic _t_ values
    let q: Float = if b < 0.0 {
        -0.5 * (b - root_discrim)
    } else {
        -0.5 * (b + root_discrim)
    };
    if q == 0.0 {
        // b and c both vanish: a double root at the origin
        return Some((0.0, 0.0));
    }
    let mut t0: Float = q / a;
    let mut t1: Float = c / q;
    if t0 > t1 {
        std::mem::swap(&mut t0, &mut t1);
    }
    Some((t0, t1))
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn quadratic_two_roots() {
        // (t - 4) (t - 6)
        let (t0, t1) = quadratic(1.0, -10.0, 24.0).unwrap();
        assert_abs_diff_eq!(t0, 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t1, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn quadratic_negative_discriminant() {
        assert!(quadratic(1.0, 0.0, 1.0).is_none());
    }

    #[test]
    fn quadratic_degenerate_leading_coefficient() {
        assert!(quadratic(0.0, 2.0, 1.0).is_none());
        assert!(quadratic(Float::NAN, 2.0, 1.0).is_none());
        assert!(quadratic(Float::INFINITY, 2.0, 1.0).is_none());
    }

    #[test]
    fn quadratic_tiny_leading_coefficient() {
        // 1e-17 (t - 1) (t + 1)
        let (t0, t1) = quadratic(1e-17, 0.0, -1e-17).unwrap();
        assert_abs_diff_eq!(t0, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t1, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn quadratic_double_root_at_origin() {
        assert_eq!(quadratic(2.0, 0.0, 0.0), Some((0.0, 0.0)));
    }

    #[test]
    fn gamma_correct_is_monotonic() {
        assert_abs_diff_eq!(gamma_correct(0.0), 0.0);
        assert_abs_diff_eq!(gamma_correct(1.0), 1.0, epsilon = 1e-9);
        assert!(gamma_correct(0.5) > 0.5);
    }
}
