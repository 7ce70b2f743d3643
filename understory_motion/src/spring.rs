// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spring timing described by damping ratio and frequency response.
//!
//! The spring is solved in closed form for a normalized displacement that
//! starts at `1.0` and comes to rest at `0.0`. Callers map that displacement
//! back onto their own `from..to` range, which keeps the solution independent
//! of the distance being animated.

use core::f64::consts::PI;

/// Smallest damping ratio accepted; zero damping never settles.
const MIN_DAMPING_RATIO: f64 = 0.01;

/// Smallest frequency response accepted, in seconds.
const MIN_RESPONSE: f64 = 0.001;

/// Normalized displacement (and velocity, scaled by the natural frequency)
/// under which the spring counts as settled.
const SETTLE_EPSILON: f64 = 1e-3;

/// Sampling step used when searching for the settling time.
const SETTLE_STEP: f64 = 1.0 / 240.0;

/// Upper bound on the settling time, in seconds.
const MAX_SETTLING_DURATION: f64 = 10.0;

/// Tolerance within which a damping ratio is treated as critical.
const CRITICAL_TOLERANCE: f64 = 1e-6;

/// Timing parameters for a spring animation.
///
/// - `damping_ratio` controls overshoot: `1.0` is critically damped (no
///   overshoot), values below `1.0` oscillate around the target, values above
///   `1.0` approach it more slowly.
/// - `response` is the period of the undamped spring in seconds; smaller values
///   make the spring stiffer.
/// - `initial_velocity` is expressed in the animated property's units per
///   second. [`crate::Animator`] converts it into a velocity relative to the
///   animated distance when it starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringTiming {
    damping_ratio: f64,
    response: f64,
    initial_velocity: f64,
}

impl SpringTiming {
    /// Creates spring timing with no initial velocity.
    ///
    /// The damping ratio is clamped to at least `0.01` and the response to at
    /// least one millisecond so that the spring always settles.
    #[must_use]
    pub fn new(damping_ratio: f64, response: f64) -> Self {
        Self {
            damping_ratio: damping_ratio.max(MIN_DAMPING_RATIO),
            response: response.max(MIN_RESPONSE),
            initial_velocity: 0.0,
        }
    }

    /// Returns a copy carrying the given initial velocity (units per second).
    #[must_use]
    pub fn with_initial_velocity(mut self, velocity: f64) -> Self {
        self.initial_velocity = velocity;
        self
    }

    /// Returns the damping ratio.
    #[must_use]
    pub fn damping_ratio(&self) -> f64 {
        self.damping_ratio
    }

    /// Returns the frequency response in seconds.
    #[must_use]
    pub fn response(&self) -> f64 {
        self.response
    }

    /// Returns the initial velocity in units per second.
    #[must_use]
    pub fn initial_velocity(&self) -> f64 {
        self.initial_velocity
    }

    /// Natural angular frequency, `2π / response`.
    #[must_use]
    pub fn angular_frequency(&self) -> f64 {
        2.0 * PI / self.response
    }

    /// Spring stiffness for a unit mass.
    #[must_use]
    pub fn stiffness(&self) -> f64 {
        let omega = self.angular_frequency();
        omega * omega
    }

    /// Damping coefficient for a unit mass.
    #[must_use]
    pub fn damping(&self) -> f64 {
        2.0 * self.damping_ratio * self.angular_frequency()
    }

    /// Solves the normalized oscillator at time `t`.
    ///
    /// The displacement starts at `1.0` and rests at `0.0`. `relative_velocity`
    /// is the initial speed toward the rest point, in distances per second
    /// (a value of `2.0` covers the whole distance twice per second).
    ///
    /// Returns `(displacement, displacement_velocity)`.
    #[must_use]
    pub fn displacement_at(&self, t: f64, relative_velocity: f64) -> (f64, f64) {
        let zeta = self.damping_ratio;
        let omega = self.angular_frequency();
        let x0 = 1.0;
        let v0 = -relative_velocity;

        if (zeta - 1.0).abs() <= CRITICAL_TOLERANCE {
            let c = v0 + omega * x0;
            let decay = libm::exp(-omega * t);
            let x = (x0 + c * t) * decay;
            let v = (c - omega * (x0 + c * t)) * decay;
            (x, v)
        } else if zeta < 1.0 {
            let omega_d = omega * libm::sqrt(1.0 - zeta * zeta);
            let a = zeta * omega;
            let b = (v0 + a * x0) / omega_d;
            let decay = libm::exp(-a * t);
            let (sin, cos) = (libm::sin(omega_d * t), libm::cos(omega_d * t));
            let x = decay * (x0 * cos + b * sin);
            let v = decay * ((b * omega_d - a * x0) * cos - (a * b + x0 * omega_d) * sin);
            (x, v)
        } else {
            let s = omega * libm::sqrt(zeta * zeta - 1.0);
            let r1 = -zeta * omega + s;
            let r2 = -zeta * omega - s;
            let c2 = (v0 - r1 * x0) / (r2 - r1);
            let c1 = x0 - c2;
            let (e1, e2) = (libm::exp(r1 * t), libm::exp(r2 * t));
            (c1 * e1 + c2 * e2, c1 * r1 * e1 + c2 * r2 * e2)
        }
    }

    /// Returns how long the spring takes to settle for the given relative
    /// velocity, in seconds.
    ///
    /// Settled means both the displacement and its velocity (scaled by the
    /// natural frequency) stay within a small tolerance. The result is capped
    /// at ten seconds.
    #[must_use]
    pub fn settling_duration(&self, relative_velocity: f64) -> f64 {
        let omega = self.angular_frequency();
        let mut t = 0.0;
        while t < MAX_SETTLING_DURATION {
            let (x, v) = self.displacement_at(t, relative_velocity);
            if x.abs() < SETTLE_EPSILON && (v / omega).abs() < SETTLE_EPSILON {
                return t;
            }
            t += SETTLE_STEP;
        }
        MAX_SETTLING_DURATION
    }
}

impl Default for SpringTiming {
    /// A critically damped spring with a half-second response.
    fn default() -> Self {
        Self::new(1.0, 0.5)
    }
}
