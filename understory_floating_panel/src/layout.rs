// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout model: supported positions, their insets, and validation.
//!
//! A [`PanelLayout`] describes *where* the panel may rest. The inset for
//! [`Position::Full`] is measured down from the top of the safe area; the
//! insets for [`Position::Half`] and [`Position::Tip`] are measured up from the
//! bottom of the safe area. Positions a layout does not support return `None`
//! from [`PanelLayout::inset_for`].
//!
//! Model-level rules are checked by [`validate_positions`]; the geometric rule
//! that Full sits above the other positions needs a container and is checked
//! by [`LayoutAdapter::check_consistency`](crate::LayoutAdapter::check_consistency).

use alloc::boxed::Box;

use kurbo::{Insets, Size};

use crate::position::{Position, PositionSet};
use crate::trait_collection::TraitCollection;

/// Default extra draggable range past the top and bottom positions.
pub const DEFAULT_INTERACTION_BUFFER: f64 = 6.0;

/// Default backdrop alpha at [`Position::Full`].
pub const DEFAULT_FULL_BACKDROP_ALPHA: f64 = 0.3;

/// Horizontal extent of the surface inside its container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HorizontalPlacement {
    /// Leading edge.
    pub x0: f64,
    /// Trailing edge.
    pub x1: f64,
}

impl HorizontalPlacement {
    /// Edge to edge within the container's side safe-area insets.
    #[must_use]
    pub fn within_safe_area(container: Size, safe_area: Insets) -> Self {
        Self {
            x0: safe_area.x0,
            x1: container.width - safe_area.x1,
        }
    }

    /// Width of the placement.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }
}

/// Describes the snap positions of a floating panel.
///
/// Only [`initial_position`](Self::initial_position) and
/// [`inset_for`](Self::inset_for) are required.
pub trait PanelLayout {
    /// Position the panel rests at after it is added to a container.
    fn initial_position(&self) -> Position;

    /// Positions the panel may rest at. Defaults to all of them.
    fn supported_positions(&self) -> PositionSet {
        PositionSet::all()
    }

    /// Extra draggable range above the top-most position.
    fn top_interaction_buffer(&self) -> f64 {
        DEFAULT_INTERACTION_BUFFER
    }

    /// Extra draggable range below the bottom-most position.
    fn bottom_interaction_buffer(&self) -> f64 {
        DEFAULT_INTERACTION_BUFFER
    }

    /// Inset of `position` from the relevant safe-area edge, or `None` when
    /// the position is not supported.
    fn inset_for(&self, position: Position) -> Option<f64>;

    /// Horizontal extent of the surface. Only the X axis is configurable; the
    /// panel owns the vertical placement.
    fn horizontal_placement(&self, container: Size, safe_area: Insets) -> HorizontalPlacement {
        HorizontalPlacement::within_safe_area(container, safe_area)
    }

    /// Backdrop opacity while resting at `position`, in `[0, 1]`.
    fn backdrop_alpha_for(&self, position: Position) -> f64 {
        if position == Position::Full {
            DEFAULT_FULL_BACKDROP_ALPHA
        } else {
            0.0
        }
    }
}

/// Portrait default: rests at Half, supports every position.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultLayout;

impl PanelLayout for DefaultLayout {
    fn initial_position(&self) -> Position {
        Position::Half
    }

    fn inset_for(&self, position: Position) -> Option<f64> {
        Some(match position {
            Position::Full => 18.0,
            Position::Half => 262.0,
            Position::Tip => 69.0,
        })
    }
}

/// Landscape default: rests at Tip, supports Full and Tip only.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultLandscapeLayout;

impl PanelLayout for DefaultLandscapeLayout {
    fn initial_position(&self) -> Position {
        Position::Tip
    }

    fn supported_positions(&self) -> PositionSet {
        PositionSet::FULL | PositionSet::TIP
    }

    fn inset_for(&self, position: Position) -> Option<f64> {
        match position {
            Position::Full => Some(16.0),
            Position::Tip => Some(69.0),
            Position::Half => None,
        }
    }
}

/// Returns the toolkit default layout for `traits`.
#[must_use]
pub fn default_layout_for(traits: &TraitCollection) -> Box<dyn PanelLayout> {
    if traits.is_vertically_compact() {
        Box::new(DefaultLandscapeLayout)
    } else {
        Box::new(DefaultLayout)
    }
}

/// Inconsistencies in a [`PanelLayout`].
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// The layout supports no position at all.
    #[error("a layout must support at least one position")]
    NoSupportedPositions,
    /// The initial position is not supported.
    #[error("initial position {initial:?} is not in the supported positions {supported:?}")]
    InitialPositionUnsupported {
        /// The layout's initial position.
        initial: Position,
        /// The layout's supported positions.
        supported: PositionSet,
    },
    /// A supported position has no inset.
    #[error("no inset defined for supported position {0:?}")]
    MissingInset(Position),
    /// Half does not sit above Tip.
    #[error("half inset ({half}) must exceed tip inset ({tip})")]
    HalfNotAboveTip {
        /// Inset of Half.
        half: f64,
        /// Inset of Tip.
        tip: f64,
    },
    /// Full does not sit above the other positions.
    #[error(
        "full position (y = {top_y}) must sit above half (y = {middle_y}) and the bottom-most position (y = {bottom_y})"
    )]
    FullNotAbove {
        /// Y of Full.
        top_y: f64,
        /// Y of Half (or its fallback).
        middle_y: f64,
        /// Y of the bottom-most position.
        bottom_y: f64,
    },
}

/// Inset of `position`, treating unsupported positions as zero.
pub(crate) fn inset_or_zero(layout: &dyn PanelLayout, position: Position) -> f64 {
    layout.inset_for(position).unwrap_or(0.0)
}

/// Checks the rules that need no geometry.
///
/// - At least one position is supported.
/// - The initial position is supported.
/// - Every supported position has an inset.
/// - When the Half inset is positive, it exceeds the Tip inset.
pub fn validate_positions(layout: &dyn PanelLayout) -> Result<(), LayoutError> {
    let supported = layout.supported_positions();
    if supported.is_empty() {
        return Err(LayoutError::NoSupportedPositions);
    }

    let initial = layout.initial_position();
    if !supported.has(initial) {
        return Err(LayoutError::InitialPositionUnsupported { initial, supported });
    }

    if let Some(missing) = supported
        .positions()
        .find(|p| layout.inset_for(*p).is_none())
    {
        return Err(LayoutError::MissingInset(missing));
    }

    let half = inset_or_zero(layout, Position::Half);
    let tip = inset_or_zero(layout, Position::Tip);
    if half > 0.0 && half <= tip {
        return Err(LayoutError::HalfNotAboveTip { half, tip });
    }

    Ok(())
}
