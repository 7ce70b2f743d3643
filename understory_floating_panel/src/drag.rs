// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan tracking: recognition threshold, movement deltas, and release velocity.
//!
//! ## Usage
//!
//! 1) Call [`PanTracker::start`] on pointer-down with the location and a
//!    timestamp in seconds.
//! 2) On each move, call [`PanTracker::update`]. It returns `None` until the
//!    pointer has travelled the recognition threshold; the recognizing update
//!    returns the whole offset from the start, later ones the delta since the
//!    previous sample.
//! 3) On release, feed the final sample with [`PanTracker::update`] and read
//!    the release velocity with [`PanTracker::end`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_floating_panel::PanTracker;
//!
//! let mut pan = PanTracker::new(4.0);
//! pan.start(Point::new(0.0, 100.0), 0.0);
//!
//! // Below the threshold: not a pan yet.
//! assert_eq!(pan.update(Point::new(0.0, 102.0), 0.01), None);
//!
//! // Recognized: the whole offset is reported at once.
//! assert_eq!(pan.update(Point::new(0.0, 110.0), 0.02), Some(Vec2::new(0.0, 10.0)));
//!
//! // Release velocity comes from the last segment: 8 units in 10 ms.
//! let velocity = pan.end();
//! assert!((velocity.y - 800.0).abs() < 1e-6);
//! ```

use kurbo::{Point, Vec2};

/// Default distance a pointer travels before a pan is recognized.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 4.0;

/// A pause at least this long (in seconds) between samples without movement
/// resets the velocity to zero.
pub const VELOCITY_RESET_INTERVAL: f64 = 0.1;

/// A timestamped pointer location.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanSample {
    /// Pointer location in container coordinates.
    pub location: Point,
    /// Timestamp in seconds.
    pub time: f64,
}

/// Tracks one pan gesture.
#[derive(Clone, Copy, Debug)]
pub struct PanTracker {
    threshold: f64,
    start: Option<PanSample>,
    last: Option<PanSample>,
    velocity: Vec2,
    recognized: bool,
}

impl Default for PanTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}

impl PanTracker {
    /// Creates an idle tracker with the given recognition threshold.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.max(0.0),
            start: None,
            last: None,
            velocity: Vec2::ZERO,
            recognized: false,
        }
    }

    /// Recognition threshold.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Starts tracking at `location`, discarding any previous gesture.
    pub fn start(&mut self, location: Point, time: f64) {
        let sample = PanSample { location, time };
        self.start = Some(sample);
        self.last = Some(sample);
        self.velocity = Vec2::ZERO;
        self.recognized = false;
    }

    /// Records a new sample.
    ///
    /// Returns `None` while idle or before recognition. The recognizing
    /// sample returns the offset from the start; later samples return the
    /// delta since the previous one.
    pub fn update(&mut self, location: Point, time: f64) -> Option<Vec2> {
        let start = self.start?;
        let last = self.last.unwrap_or(start);

        let dt = time - last.time;
        let delta = location - last.location;
        if dt > 0.0 {
            if delta == Vec2::ZERO {
                if dt >= VELOCITY_RESET_INTERVAL {
                    self.velocity = Vec2::ZERO;
                }
            } else {
                self.velocity = delta / dt;
            }
        }
        self.last = Some(PanSample { location, time });

        if self.recognized {
            return Some(delta);
        }
        let offset = location - start.location;
        if offset.hypot() >= self.threshold {
            self.recognized = true;
            Some(offset)
        } else {
            None
        }
    }

    /// Offset of `location` from the start of the gesture.
    #[must_use]
    pub fn total_offset(&self, location: Point) -> Option<Vec2> {
        self.start.map(|start| location - start.location)
    }

    /// Velocity of the most recent movement, in units per second.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Ends the gesture and returns the release velocity.
    pub fn end(&mut self) -> Vec2 {
        let velocity = self.velocity;
        self.reset();
        velocity
    }

    /// Abandons the gesture.
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Returns `true` between [`start`](Self::start) and the end of the gesture.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Returns `true` once the threshold has been crossed.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        self.recognized
    }

    /// Location where the gesture started.
    #[must_use]
    pub fn start_location(&self) -> Option<Point> {
        self.start.map(|s| s.location)
    }

    fn reset(&mut self) {
        self.start = None;
        self.last = None;
        self.velocity = Vec2::ZERO;
        self.recognized = false;
    }
}
