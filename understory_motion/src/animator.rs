// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scalar property animator advanced by the host's frame clock.

use crate::curve::TimingCurve;
use crate::spring::SpringTiming;

/// How an [`Animator`] moves from its start value to its end value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Timing {
    /// Physically based spring; the duration follows from the parameters.
    Spring(SpringTiming),
    /// Fixed duration along a progress curve.
    Curve {
        /// Duration in seconds.
        duration: f64,
        /// Progress curve.
        curve: TimingCurve,
    },
}

impl Timing {
    /// Fixed-duration ease-in-out timing.
    #[must_use]
    pub fn ease_in_out(duration: f64) -> Self {
        Self::Curve {
            duration,
            curve: TimingCurve::EaseInOut,
        }
    }

    /// Spring timing with the given damping ratio, response and initial velocity.
    #[must_use]
    pub fn spring(damping_ratio: f64, response: f64, initial_velocity: f64) -> Self {
        Self::Spring(SpringTiming::new(damping_ratio, response).with_initial_velocity(initial_velocity))
    }
}

/// Lifecycle of an [`Animator`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnimatorState {
    /// Created but not started.
    #[default]
    Inactive,
    /// Started and advancing on each tick.
    Running,
    /// Stopped before reaching the end value.
    Stopped,
    /// Reached the end value.
    Finished,
}

/// Drives one scalar from `from` to `to`.
///
/// The animator never reads a clock: the host advances it with
/// [`Animator::tick`] and applies the returned value. Once finished, the value
/// is exactly `to`. [`Animator::stop`] freezes it at the current interpolated
/// value instead.
#[derive(Clone, Debug)]
pub struct Animator {
    timing: Timing,
    from: f64,
    to: f64,
    value: f64,
    elapsed: f64,
    duration: f64,
    relative_velocity: f64,
    state: AnimatorState,
}

impl Animator {
    /// Creates an inactive animator with the given timing.
    #[must_use]
    pub fn new(timing: Timing) -> Self {
        Self {
            timing,
            from: 0.0,
            to: 0.0,
            value: 0.0,
            elapsed: 0.0,
            duration: 0.0,
            relative_velocity: 0.0,
            state: AnimatorState::Inactive,
        }
    }

    /// Returns the timing this animator was created with.
    #[must_use]
    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Starts animating from `from` to `to`, restarting if already running.
    ///
    /// A spring's initial velocity is converted into distances per second
    /// relative to `to - from`. When the resolved duration is zero the
    /// animator finishes immediately.
    pub fn start(&mut self, from: f64, to: f64) {
        self.from = from;
        self.to = to;
        self.value = from;
        self.elapsed = 0.0;

        let distance = to - from;
        match self.timing {
            Timing::Spring(spring) => {
                if distance.abs() < f64::EPSILON {
                    self.relative_velocity = 0.0;
                    self.duration = 0.0;
                } else {
                    self.relative_velocity = spring.initial_velocity() / distance;
                    self.duration = spring.settling_duration(self.relative_velocity);
                }
            }
            Timing::Curve { duration, .. } => {
                self.relative_velocity = 0.0;
                self.duration = duration.max(0.0);
            }
        }

        if self.duration <= 0.0 {
            self.value = to;
            self.state = AnimatorState::Finished;
        } else {
            self.state = AnimatorState::Running;
        }
    }

    /// Advances by `dt` seconds and returns the new value.
    ///
    /// Has no effect unless the animator is running.
    pub fn tick(&mut self, dt: f64) -> f64 {
        if self.state != AnimatorState::Running || dt <= 0.0 {
            return self.value;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.value = self.to;
            self.state = AnimatorState::Finished;
            return self.value;
        }

        self.value = match self.timing {
            Timing::Spring(spring) => {
                let (x, _) = spring.displacement_at(self.elapsed, self.relative_velocity);
                self.to - (self.to - self.from) * x
            }
            Timing::Curve { curve, .. } => {
                let p = curve.progress(self.elapsed / self.duration);
                self.from + (self.to - self.from) * p
            }
        };
        self.value
    }

    /// Redirects a running animator to `to`, starting over from its current
    /// value.
    ///
    /// A spring carries its current velocity into the new run, so the motion
    /// stays continuous. A curve spends the time it had left. Has no effect
    /// unless the animator is running.
    pub fn retarget(&mut self, to: f64) {
        if self.state != AnimatorState::Running {
            return;
        }
        let velocity = self.velocity();
        let remaining = self.duration - self.elapsed;
        self.from = self.value;
        self.to = to;
        self.elapsed = 0.0;

        let distance = to - self.from;
        match self.timing {
            Timing::Spring(spring) => {
                if distance.abs() < f64::EPSILON {
                    self.relative_velocity = 0.0;
                    self.duration = 0.0;
                } else {
                    self.relative_velocity = velocity / distance;
                    self.duration = spring.settling_duration(self.relative_velocity);
                }
            }
            Timing::Curve { .. } => {
                self.relative_velocity = 0.0;
                self.duration = remaining.max(0.0);
            }
        }

        if self.duration <= 0.0 {
            self.value = to;
            self.state = AnimatorState::Finished;
        }
    }

    /// Returns the current velocity in units per second, or zero unless
    /// running.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        if self.state != AnimatorState::Running || self.duration <= 0.0 {
            return 0.0;
        }
        let distance = self.to - self.from;
        match self.timing {
            Timing::Spring(spring) => {
                let (_, v) = spring.displacement_at(self.elapsed, self.relative_velocity);
                -distance * v
            }
            Timing::Curve { curve, .. } => {
                // Central difference over the normalized time.
                let t = self.elapsed / self.duration;
                let (a, b) = ((t - 1e-4).max(0.0), (t + 1e-4).min(1.0));
                distance * (curve.progress(b) - curve.progress(a)) / ((b - a) * self.duration)
            }
        }
    }

    /// Stops a running animator at its current value and returns it.
    pub fn stop(&mut self) -> f64 {
        if self.state == AnimatorState::Running {
            self.state = AnimatorState::Stopped;
        }
        self.value
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the start value of the current run.
    #[must_use]
    pub fn from(&self) -> f64 {
        self.from
    }

    /// Returns the end value of the current run.
    #[must_use]
    pub fn to(&self) -> f64 {
        self.to
    }

    /// Returns the resolved duration of the current run, in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Returns the elapsed time as a fraction of the duration.
    #[must_use]
    pub fn fraction_complete(&self) -> f64 {
        if self.duration <= 0.0 {
            if self.state == AnimatorState::Finished {
                1.0
            } else {
                0.0
            }
        } else {
            self.elapsed / self.duration
        }
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> AnimatorState {
        self.state
    }

    /// Returns `true` while the animator is advancing.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == AnimatorState::Running
    }

    /// Returns `true` once the end value has been reached.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == AnimatorState::Finished
    }
}
