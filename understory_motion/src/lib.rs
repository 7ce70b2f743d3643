// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Motion: host-agnostic animation timing.
//!
//! This crate provides the timing half of a property animator without owning a
//! frame clock, a scene graph, or any rendering backend:
//!
//! - [`SpringTiming`]: a damped harmonic oscillator described by a damping
//!   ratio and a frequency response (the period of the undamped spring), with
//!   an optional initial velocity.
//! - [`TimingCurve`]: cubic Bézier progress curves (`ease-in`, `ease-out`,
//!   `ease-in-out`, or custom control points).
//! - [`Timing`]: either a spring or a fixed-duration curve.
//! - [`Animator`]: drives a single scalar from one value to another, advanced by
//!   the host with [`Animator::tick`] and interruptible with [`Animator::stop`].
//!
//! Hosts are expected to call [`Animator::tick`] from their own frame clock and
//! apply the returned value to whatever property they animate.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_motion::{Animator, SpringTiming, Timing};
//!
//! // A critically damped spring that settles in roughly a third of a second.
//! let mut animator = Animator::new(Timing::Spring(SpringTiming::new(1.0, 0.3)));
//! animator.start(0.0, 100.0);
//!
//! let mut value = 0.0;
//! while animator.is_running() {
//!     value = animator.tick(1.0 / 60.0);
//! }
//! assert_eq!(value, 100.0);
//! assert!(animator.is_finished());
//! ```
//!
//! ## Interrupting
//!
//! ```rust
//! use understory_motion::{Animator, Timing};
//!
//! let mut animator = Animator::new(Timing::ease_in_out(0.25));
//! animator.start(0.0, 10.0);
//! animator.tick(0.1);
//!
//! // Stop where we are; the value stays at the interpolated point.
//! let current = animator.stop();
//! assert!(current > 0.0 && current < 10.0);
//! assert!(!animator.is_running());
//! ```
//!
//! This crate is `no_std` and uses `libm` for transcendental functions.

#![no_std]

mod animator;
mod curve;
mod spring;

pub use animator::{Animator, AnimatorState, Timing};
pub use curve::TimingCurve;
pub use spring::SpringTiming;
