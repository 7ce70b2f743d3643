// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Behavior policy: which animators drive each kind of transition.

use alloc::boxed::Box;

use kurbo::Vec2;
use understory_motion::{Animator, Timing};

use crate::position::Position;
use crate::trait_collection::TraitCollection;

/// Duration of the default add, remove and move animations, in seconds.
pub const DEFAULT_TRANSITION_DURATION: f64 = 0.25;

/// Decides how the panel animates.
///
/// Every method returns a fresh, unstarted [`Animator`]; the panel starts it
/// from the surface's current Y. Velocities are in host units per second.
pub trait PanelBehavior {
    /// Animator used to settle after a drag toward `target`.
    fn interaction_animator(&self, target: Position, velocity: Vec2) -> Animator;

    /// Animator used when the panel is added with animation.
    fn add_animator(&self, _to: Position) -> Animator {
        Animator::new(Timing::ease_in_out(DEFAULT_TRANSITION_DURATION))
    }

    /// Animator used when the panel is removed with animation.
    fn remove_animator(&self, _from: Position) -> Animator {
        Animator::new(Timing::ease_in_out(DEFAULT_TRANSITION_DURATION))
    }

    /// Animator used for programmatic moves.
    fn move_animator(&self, _from: Position, _to: Position) -> Animator {
        Animator::new(Timing::ease_in_out(DEFAULT_TRANSITION_DURATION))
    }

    /// Minimum downward release speed that removes the panel when released
    /// below the bottom-most position.
    fn removal_velocity_threshold(&self) -> f64 {
        10.0
    }

    /// Animator used after a drag-to-remove release.
    fn removal_interaction_animator(&self, velocity: Vec2) -> Animator {
        Animator::new(Timing::spring(1.0, 0.3, velocity.y))
    }

    /// Release speed at or above which the target is chosen in the direction
    /// of travel rather than by proximity alone.
    fn redirection_velocity_threshold(&self) -> f64 {
        8.0
    }

    /// Per-millisecond deceleration rate used to project where a release
    /// would come to rest.
    fn momentum_projection_rate(&self) -> f64 {
        0.998
    }
}

/// Spring settling whose damping depends on the release speed.
///
/// Slow releases settle critically damped; fast ones use a damping ratio of
/// 0.7 and carry the release velocity into a slight overshoot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefaultBehavior {
    /// Release speed at or above which the under-damped spring is used.
    pub velocity_threshold: f64,
}

impl Default for DefaultBehavior {
    fn default() -> Self {
        Self {
            velocity_threshold: 8.0,
        }
    }
}

impl DefaultBehavior {
    /// Spring response of the settling animation, in seconds.
    pub const RESPONSE: f64 = 0.3;

    /// Returns a behavior with a custom velocity threshold.
    #[must_use]
    pub fn with_velocity_threshold(velocity_threshold: f64) -> Self {
        Self { velocity_threshold }
    }

    /// Damping ratio for a release with `velocity`.
    #[must_use]
    pub fn damping_for(&self, velocity: Vec2) -> f64 {
        if velocity.y.abs() < self.velocity_threshold {
            1.0
        } else {
            0.7
        }
    }
}

impl PanelBehavior for DefaultBehavior {
    fn interaction_animator(&self, _target: Position, velocity: Vec2) -> Animator {
        Animator::new(Timing::spring(
            self.damping_for(velocity),
            Self::RESPONSE,
            velocity.y,
        ))
    }
}

/// Returns the toolkit default behavior for `traits`.
#[must_use]
pub fn default_behavior_for(_traits: &TraitCollection) -> Box<dyn PanelBehavior> {
    Box::new(DefaultBehavior::default())
}
