// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout adapter: turns a [`PanelLayout`] plus container geometry into
//! concrete Y-coordinates and frames.
//!
//! Y grows downward. With container height `h` and safe-area insets `s`:
//!
//! - `top_y = s.top + full_inset` (or `middle_y` when Full is unsupported)
//! - `middle_y = h - (s.bottom + half_inset)`
//! - `bottom_y = h - (s.bottom + tip_inset)` (or `middle_y` when Tip is unsupported)
//! - `off_y = h`
//!
//! Every query is computed from the current layout and geometry, so changing
//! either never leaves a stale coordinate behind.

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Insets, Point, Rect, Size};
use smallvec::SmallVec;
use tracing::debug;

use crate::layout::{LayoutError, PanelLayout, inset_or_zero, validate_positions};
use crate::position::{PanelState, Position};

/// Extra surface height kept below the visible area so overscroll and spring
/// overshoot never reveal a gap.
pub const SURFACE_OVERFLOW: f64 = 88.0;

/// Supported positions paired with their Y, top to bottom.
pub type SnapPoints = SmallVec<[(Position, f64); 3]>;

/// Resolves a [`PanelLayout`] against container geometry.
pub struct LayoutAdapter {
    layout: Box<dyn PanelLayout>,
    container: Size,
    safe_area: Insets,
    active: PanelState,
    surface_height: f64,
}

impl fmt::Debug for LayoutAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutAdapter")
            .field("container", &self.container)
            .field("safe_area", &self.safe_area)
            .field("active", &self.active)
            .field("surface_height", &self.surface_height)
            .finish_non_exhaustive()
    }
}

impl LayoutAdapter {
    /// Creates an adapter with zero geometry.
    ///
    /// The layout is not validated until [`set_layout`](Self::set_layout),
    /// because the geometric rules need a container.
    #[must_use]
    pub fn new(layout: Box<dyn PanelLayout>) -> Self {
        let mut adapter = Self {
            layout,
            container: Size::ZERO,
            safe_area: Insets::ZERO,
            active: PanelState::Off,
            surface_height: 0.0,
        };
        adapter.recompute_height();
        adapter
    }

    /// Returns the installed layout.
    #[must_use]
    pub fn layout(&self) -> &dyn PanelLayout {
        self.layout.as_ref()
    }

    /// Installs a new layout and validates it against the current geometry.
    ///
    /// # Panics
    ///
    /// Panics with the [`LayoutError`] message when the layout is
    /// inconsistent. An inconsistent layout is an integration mistake, not a
    /// runtime condition.
    pub fn set_layout(&mut self, layout: Box<dyn PanelLayout>) {
        self.layout = layout;
        if let Err(error) = self.check_consistency() {
            panic!("invalid floating panel layout: {error}");
        }
        self.recompute_height();
    }

    /// Returns the container size.
    #[must_use]
    pub fn container_size(&self) -> Size {
        self.container
    }

    /// Sets the container size and recomputes the surface height.
    pub fn set_container_size(&mut self, size: Size) {
        self.container = size;
        self.recompute_height();
    }

    /// Returns the safe-area insets.
    #[must_use]
    pub fn safe_area(&self) -> Insets {
        self.safe_area
    }

    /// Sets the safe-area insets and recomputes the surface height.
    pub fn set_safe_area(&mut self, safe_area: Insets) {
        self.safe_area = safe_area;
        self.recompute_height();
    }

    /// Y of [`Position::Full`], or `middle_y` when Full is unsupported.
    #[must_use]
    pub fn top_y(&self) -> f64 {
        if self.layout.supported_positions().has(Position::Full) {
            self.safe_area.y0 + inset_or_zero(self.layout(), Position::Full)
        } else {
            self.middle_y()
        }
    }

    /// Y of [`Position::Half`].
    #[must_use]
    pub fn middle_y(&self) -> f64 {
        self.container.height - (self.safe_area.y1 + inset_or_zero(self.layout(), Position::Half))
    }

    /// Y of [`Position::Tip`], or `middle_y` when Tip is unsupported.
    #[must_use]
    pub fn bottom_y(&self) -> f64 {
        if self.layout.supported_positions().has(Position::Tip) {
            self.container.height - (self.safe_area.y1 + inset_or_zero(self.layout(), Position::Tip))
        } else {
            self.middle_y()
        }
    }

    /// Y of the surface when off screen: the container's bottom edge.
    #[must_use]
    pub fn off_y(&self) -> f64 {
        self.container.height
    }

    /// Y of the bottom edge of the safe area.
    #[must_use]
    pub fn safe_area_bottom_y(&self) -> f64 {
        self.container.height - self.safe_area.y1
    }

    /// Y of `position`.
    #[must_use]
    pub fn position_y(&self, position: Position) -> f64 {
        match position {
            Position::Full => self.top_y(),
            Position::Half => self.middle_y(),
            Position::Tip => self.bottom_y(),
        }
    }

    /// Y of `state`; [`PanelState::Off`] maps to [`off_y`](Self::off_y).
    #[must_use]
    pub fn state_y(&self, state: PanelState) -> f64 {
        match state {
            PanelState::Off => self.off_y(),
            PanelState::Docked(position) => self.position_y(position),
        }
    }

    /// Insets a tracked scroll view needs so its content clears the bottom
    /// safe area.
    #[must_use]
    pub fn adjusted_content_insets(&self) -> Insets {
        Insets::new(0.0, 0.0, 0.0, self.safe_area.y1)
    }

    /// Range the surface may be dragged through.
    #[must_use]
    pub fn interaction_range(&self) -> (f64, f64) {
        (
            self.top_y() - self.layout.top_interaction_buffer(),
            self.bottom_y() + self.layout.bottom_interaction_buffer(),
        )
    }

    /// Supported positions with their Y, top to bottom.
    #[must_use]
    pub fn snap_points(&self) -> SnapPoints {
        self.layout
            .supported_positions()
            .positions()
            .map(|p| (p, self.position_y(p)))
            .collect()
    }

    /// Makes `state` the active state and returns what was activated.
    ///
    /// A position the layout does not support falls back to the layout's
    /// initial position. [`PanelState::Off`] is always accepted.
    pub fn activate(&mut self, state: PanelState) -> PanelState {
        let resolved = match state {
            PanelState::Docked(position) if !self.layout.supported_positions().has(position) => {
                let initial = self.layout.initial_position();
                debug!(?position, ?initial, "unsupported position; activating initial");
                PanelState::Docked(initial)
            }
            other => other,
        };
        self.active = resolved;
        resolved
    }

    /// Returns the active state.
    #[must_use]
    pub fn active(&self) -> PanelState {
        self.active
    }

    /// Y the surface rests at in the active state.
    #[must_use]
    pub fn resting_y(&self) -> f64 {
        self.state_y(self.active)
    }

    /// Recomputes the surface height from the container, the top safe-area
    /// inset and the Full inset, plus [`SURFACE_OVERFLOW`].
    pub fn recompute_height(&mut self) {
        let visible = self.container.height
            - (self.safe_area.y0 + inset_or_zero(self.layout(), Position::Full));
        self.surface_height = visible.max(0.0) + SURFACE_OVERFLOW;
    }

    /// Total surface height, including the overflow below the visible area.
    #[must_use]
    pub fn surface_height(&self) -> f64 {
        self.surface_height
    }

    /// Height kept below the visible area of the surface.
    #[must_use]
    pub fn surface_overflow(&self) -> f64 {
        SURFACE_OVERFLOW
    }

    /// Frame of the surface when its top edge is at `y`.
    #[must_use]
    pub fn surface_frame(&self, y: f64) -> Rect {
        let placement = self
            .layout
            .horizontal_placement(self.container, self.safe_area);
        Rect::new(placement.x0, y, placement.x1, y + self.surface_height)
    }

    /// Frame of the backdrop: the whole container.
    #[must_use]
    pub fn backdrop_frame(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.container)
    }

    /// Backdrop opacity for a surface at `y`.
    ///
    /// Interpolates between the alphas of the snap points around `y` and
    /// holds the end values outside them.
    #[must_use]
    pub fn backdrop_alpha_at(&self, y: f64) -> f64 {
        let points = self.snap_points();
        let Some(&(first, first_y)) = points.first() else {
            return 0.0;
        };
        if y <= first_y {
            return self.layout.backdrop_alpha_for(first);
        }
        for pair in points.windows(2) {
            let (upper, upper_y) = pair[0];
            let (lower, lower_y) = pair[1];
            if y <= lower_y {
                let span = lower_y - upper_y;
                if span <= 0.0 {
                    return self.layout.backdrop_alpha_for(lower);
                }
                let t = (y - upper_y) / span;
                let a = self.layout.backdrop_alpha_for(upper);
                let b = self.layout.backdrop_alpha_for(lower);
                return a + (b - a) * t;
            }
        }
        points
            .last()
            .map_or(0.0, |&(last, _)| self.layout.backdrop_alpha_for(last))
    }

    /// Checks the layout against the current geometry.
    ///
    /// On top of [`validate_positions`], requires Full to sit strictly above
    /// Half and the bottom-most position whenever Full's inset is positive.
    pub fn check_consistency(&self) -> Result<(), LayoutError> {
        validate_positions(self.layout())?;

        if inset_or_zero(self.layout(), Position::Full) > 0.0 {
            let (top_y, middle_y, bottom_y) = (self.top_y(), self.middle_y(), self.bottom_y());
            if !(top_y < middle_y && top_y < bottom_y) {
                return Err(LayoutError::FullNotAbove {
                    top_y,
                    middle_y,
                    bottom_y,
                });
            }
        }
        Ok(())
    }
}
