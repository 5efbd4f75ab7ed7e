//! Spherical trigonometry primitives shared by the pass search and the
//! footprint generator.

use std::f64::consts::FRAC_PI_2;

/// Solve the spherical triangle with included angle `angle_a` between sides
/// `side_b` and `c`, where side `c` is supplied as `(cos_c, sin_c)` so callers
/// projecting many points around a fixed center pay for its trig only once.
///
/// Returns the cosine of the opposite side `a` and the angle `B` at the far
/// vertex. The cosine is clamped to `[-1, 1]` so floating-point overshoot
/// never reaches an inverse-trig call downstream.
pub fn solve_sphere(angle_a: f64, side_b: f64, cos_c: f64, sin_c: f64) -> (f64, f64) {
    let (sin_b, cos_b) = side_b.sin_cos();
    let cos_side_a = (cos_b * cos_c + sin_b * sin_c * angle_a.cos()).clamp(-1.0, 1.0);
    let sin_side_a = (1.0 - cos_side_a * cos_side_a).sqrt();

    let angle_b = if sin_c.abs() < f64::EPSILON || sin_side_a < f64::EPSILON {
        0.0
    } else {
        let y = angle_a.sin() * sin_b;
        let x = (cos_b - cos_side_a * cos_c) / sin_c;
        y.atan2(x)
    };

    (cos_side_a, angle_b)
}

/// Great-circle distance in radians between two geographic points given in
/// radians.
pub fn angular_separation(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let colat1 = FRAC_PI_2 - lat1;
    let (cos_side_a, _) = solve_sphere(lon1 - lon2, FRAC_PI_2 - lat2, colat1.cos(), colat1.sin());
    cos_side_a.acos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-12;

    #[test]
    fn zero_included_angle_degenerates() {
        let b = 0.4;
        let c = 0.7_f64;
        let (cos_a, angle_b) = solve_sphere(0.0, b, c.cos(), c.sin());
        // Degenerate triangle: a = |b - c|, so cos a = cos b cos c + sin b sin c.
        assert!((cos_a - (b.cos() * c.cos() + b.sin() * c.sin())).abs() < EPS);
        assert!(angle_b.abs() < EPS);
    }

    #[test]
    fn cosine_stays_clamped_near_coincident_sides() {
        let b = 1.0;
        let (cos_a, _) = solve_sphere(0.0, b, b.cos(), b.sin());
        assert!(cos_a <= 1.0);
        assert!(cos_a >= -1.0);
    }

    #[test]
    fn separation_of_identical_points_is_zero() {
        let sep = angular_separation(0.3, -1.2, 0.3, -1.2);
        assert!(sep.abs() < 1e-7);
    }

    #[test]
    fn quarter_turn_along_equator() {
        let sep = angular_separation(0.0, 0.0, 0.0, FRAC_PI_2);
        assert!((sep - FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn pole_to_equator_is_quarter_turn() {
        let sep = angular_separation(FRAC_PI_2, 0.0, 0.0, 1.0);
        assert!((sep - FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn antipodal_points_are_half_turn() {
        let sep = angular_separation(0.0, 0.0, 0.0, PI);
        assert!((sep - PI).abs() < 1e-9);
    }
}
