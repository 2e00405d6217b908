// easing.rs - Shaping curves
//
// Every function clamps its input, so callers can feed raw progress.

use glam::DVec3;
use serde::Serialize;

/// Clamp `v` into `[lo, hi]`. NaN collapses to `lo`.
#[inline]
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v.is_nan() { return lo; }
    v.max(lo).min(hi)
}

#[inline]
pub fn clamp01(v: f64) -> f64 {
    clamp(v, 0.0, 1.0)
}

/// Position of `v` inside `[lo, hi]` as a clamped fraction.
/// A degenerate range acts as a step at `hi`.
#[inline]
pub fn map_range(v: f64, lo: f64, hi: f64) -> f64 {
    let span = hi - lo;
    if span <= 0.0 {
        return if v >= hi { 1.0 } else { 0.0 };
    }
    clamp01((v - lo) / span)
}

/// Exact at both ends: `t = 0` yields `a`, `t = 1` yields `b`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

#[inline]
pub fn lerp_vec(a: DVec3, b: DVec3, t: f64) -> DVec3 {
    a * (1.0 - t) + b * t
}

#[inline]
pub fn ease_out_quart(t: f64) -> f64 {
    let inv = 1.0 - clamp01(t);
    1.0 - inv * inv * inv * inv
}

#[inline]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = clamp01(t);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// Curve selector used by the scene tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    OutQuart,
    InOutCubic,
}

impl Ease {
    #[inline]
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Ease::Linear => clamp01(t),
            Ease::OutQuart => ease_out_quart(t),
            Ease::InOutCubic => ease_in_out_cubic(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_handles_nan_and_bounds() {
        assert_eq!(clamp(f64::NAN, 0.0, 1.0), 0.0);
        assert_eq!(clamp(-3.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(3.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(0.4, 0.0, 1.0), 0.4);
    }

    #[test]
    fn map_range_clamps_and_steps() {
        assert_eq!(map_range(0.5, 0.25, 0.75), 0.5);
        assert_eq!(map_range(-1.0, 0.25, 0.75), 0.0);
        assert_eq!(map_range(2.0, 0.25, 0.75), 1.0);
        // zero-length range never divides by zero
        assert_eq!(map_range(0.49, 0.5, 0.5), 0.0);
        assert_eq!(map_range(0.5, 0.5, 0.5), 1.0);
    }

    #[test]
    fn curves_hit_endpoints_exactly() {
        for ease in [Ease::Linear, Ease::OutQuart, Ease::InOutCubic] {
            assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
            assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
            assert_eq!(ease.apply(-5.0), 0.0, "{ease:?}");
            assert_eq!(ease.apply(5.0), 1.0, "{ease:?}");
        }
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
    }

    #[test]
    fn curves_are_monotonic_in_unit_range() {
        for ease in [Ease::OutQuart, Ease::InOutCubic] {
            let mut prev = 0.0;
            for i in 0..=1000 {
                let v = ease.apply(i as f64 / 1000.0);
                assert!(v >= prev, "{ease:?} decreased at {i}");
                assert!((0.0..=1.0).contains(&v));
                prev = v;
            }
        }
    }

    #[test]
    fn lerp_hits_endpoints_bitwise() {
        let (a, b) = (0.1, 0.7);
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
        let (va, vb) = (DVec3::new(0.1, -3.3, 7.7), DVec3::new(4.4, 0.2, -9.1));
        assert_eq!(lerp_vec(va, vb, 0.0), va);
        assert_eq!(lerp_vec(va, vb, 1.0), vb);
    }

    #[test]
    fn out_quart_front_loads_motion() {
        assert!(ease_out_quart(0.25) > 0.25);
        assert!((ease_out_quart(0.5) - 0.9375).abs() < 1e-12);
    }
}
