//! Where two straight curve segments cross.

use glam::DVec2;

/// Intersection of `p1 + t * v1` with `p2 + s * v2` for two lines sharing the
/// same independent variable (both advance one month per unit of `x`).
///
/// Only the y components are solved, so `v1.y == v2.y` (parallel curves) has
/// no answer; callers only ask when the curves swap order inside the interval.
/// Both differences are halved first so opposite-signed values near the `f64`
/// limit don't overflow.
pub fn intersect(p1: DVec2, v1: DVec2, p2: DVec2, v2: DVec2) -> DVec2 {
    let t = (p2.y * 0.5 - p1.y * 0.5) / (v1.y * 0.5 - v2.y * 0.5);
    p1 + v1 * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn crossing_lines_meet_halfway() {
        // 30 → 10 against 10 → 30 over one month
        let p = intersect(dvec2(4.0, 30.0), dvec2(1.0, -20.0), dvec2(4.0, 10.0), dvec2(1.0, 20.0));
        assert_eq!(p, dvec2(4.5, 20.0));
    }

    #[test]
    fn point_lies_on_both_lines() {
        let (p1, v1) = (dvec2(7.0, 12.0), dvec2(1.0, 18.0));
        let (p2, v2) = (dvec2(7.0, 22.0), dvec2(1.0, -2.0));
        let x = intersect(p1, v1, p2, v2);
        let t = x.x - 7.0;
        assert!((p1.y + v1.y * t - x.y).abs() < 1e-9);
        assert!((p2.y + v2.y * t - x.y).abs() < 1e-9);
        assert!(t > 0.0 && t < 1.0);
    }

    #[test]
    fn opposite_slopes_near_the_limit_stay_finite() {
        let p = intersect(
            dvec2(2.0, 0.0),
            dvec2(1.0, 1.5e308),
            dvec2(2.0, 1.5e308),
            dvec2(1.0, -1.5e308),
        );
        assert_eq!(p, dvec2(2.5, 0.75e308));
    }
}
