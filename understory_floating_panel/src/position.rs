// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snap positions, position sets, and the panel's discrete state.

use bitflags::bitflags;

/// A resting position of the panel, ordered from most to least revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    /// Most revealed; inset from the top of the safe area.
    Full,
    /// Partially revealed; inset from the bottom of the safe area.
    Half,
    /// Least revealed; inset from the bottom of the safe area.
    Tip,
}

impl Position {
    /// All positions, top to bottom.
    pub const ALL: [Self; 3] = [Self::Full, Self::Half, Self::Tip];
}

bitflags! {
    /// A set of [`Position`]s supported by a layout.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PositionSet: u8 {
        /// [`Position::Full`].
        const FULL = 1 << 0;
        /// [`Position::Half`].
        const HALF = 1 << 1;
        /// [`Position::Tip`].
        const TIP = 1 << 2;
    }
}

impl PositionSet {
    /// Returns `true` if `position` is in the set.
    #[must_use]
    pub fn has(self, position: Position) -> bool {
        self.contains(Self::from(position))
    }

    /// Iterates the positions in the set, top to bottom.
    pub fn positions(self) -> impl Iterator<Item = Position> {
        Position::ALL.into_iter().filter(move |p| self.has(*p))
    }

    /// The most revealed position in the set.
    #[must_use]
    pub fn top_most(self) -> Option<Position> {
        self.positions().next()
    }

    /// The least revealed position in the set.
    #[must_use]
    pub fn bottom_most(self) -> Option<Position> {
        self.positions().last()
    }
}

impl From<Position> for PositionSet {
    fn from(position: Position) -> Self {
        match position {
            Position::Full => Self::FULL,
            Position::Half => Self::HALF,
            Position::Tip => Self::TIP,
        }
    }
}

impl FromIterator<Position> for PositionSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, position| set | Self::from(position))
    }
}

/// Discrete state of the panel: docked at a position, or off screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PanelState {
    /// Detached or removed; the surface sits below the container.
    #[default]
    Off,
    /// Resting at a snap position.
    Docked(Position),
}

impl PanelState {
    /// Returns the docked position, if any.
    #[must_use]
    pub fn position(self) -> Option<Position> {
        match self {
            Self::Off => None,
            Self::Docked(position) => Some(position),
        }
    }

    /// Returns `true` when off screen.
    #[must_use]
    pub fn is_off(self) -> bool {
        self == Self::Off
    }
}

impl From<Position> for PanelState {
    fn from(position: Position) -> Self {
        Self::Docked(position)
    }
}

impl From<Option<Position>> for PanelState {
    fn from(position: Option<Position>) -> Self {
        position.map_or(Self::Off, Self::Docked)
    }
}
