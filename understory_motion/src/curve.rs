// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier progress curves for fixed-duration animations.

/// A progress curve mapping linear time in `[0, 1]` to eased progress.
///
/// The named curves use the standard control points for their CSS and
/// platform counterparts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum TimingCurve {
    /// Constant speed.
    Linear,
    /// Slow start: control points `(0.42, 0.0)` and `(1.0, 1.0)`.
    EaseIn,
    /// Slow end: control points `(0.0, 0.0)` and `(0.58, 1.0)`.
    EaseOut,
    /// Slow start and end: control points `(0.42, 0.0)` and `(0.58, 1.0)`.
    #[default]
    EaseInOut,
    /// Custom control points `(x1, y1, x2, y2)`.
    ///
    /// `x1` and `x2` are expected to lie in `[0, 1]`.
    CubicBezier(f64, f64, f64, f64),
}

impl TimingCurve {
    /// Returns the control points `(x1, y1, x2, y2)` for this curve.
    #[must_use]
    pub fn control_points(&self) -> (f64, f64, f64, f64) {
        match *self {
            Self::Linear => (0.0, 0.0, 1.0, 1.0),
            Self::EaseIn => (0.42, 0.0, 1.0, 1.0),
            Self::EaseOut => (0.0, 0.0, 0.58, 1.0),
            Self::EaseInOut => (0.42, 0.0, 0.58, 1.0),
            Self::CubicBezier(x1, y1, x2, y2) => (x1, y1, x2, y2),
        }
    }

    /// Maps linear progress `t` to eased progress.
    ///
    /// `t` is clamped into `[0, 1]`; the endpoints are always exact.
    #[must_use]
    pub fn progress(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        if let Self::Linear = self {
            return t;
        }

        let (x1, y1, x2, y2) = self.control_points();

        // Newton-Raphson on x(p) = t, falling back to bisection on flat slopes.
        let mut p = t;
        for _ in 0..8 {
            let err = bezier_sample(p, x1, x2) - t;
            if err.abs() < 1e-7 {
                return bezier_sample(p, y1, y2);
            }
            let slope = bezier_slope(p, x1, x2);
            if slope.abs() < 1e-7 {
                break;
            }
            p -= err / slope;
        }

        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        p = t;
        for _ in 0..32 {
            let x = bezier_sample(p, x1, x2);
            if (x - t).abs() < 1e-7 {
                break;
            }
            if x < t {
                lo = p;
            } else {
                hi = p;
            }
            p = (lo + hi) * 0.5;
        }
        bezier_sample(p, y1, y2)
    }
}

/// One coordinate of a cubic Bézier anchored at 0 and 1.
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}
