// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host environment traits used to pick layouts and behaviors.

/// Coarse size class of one axis of the host container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SizeClass {
    /// Not known yet.
    #[default]
    Unspecified,
    /// Constrained space, e.g. a phone's height in landscape.
    Compact,
    /// Expansive space.
    Regular,
}

/// The host's environment as seen by the panel.
///
/// Layouts and behaviors are resolved per trait collection. A compact vertical
/// size class selects the landscape defaults and hides the backdrop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TraitCollection {
    /// Horizontal size class.
    pub horizontal_size_class: SizeClass,
    /// Vertical size class.
    pub vertical_size_class: SizeClass,
}

impl TraitCollection {
    /// Compact width, regular height.
    pub const PORTRAIT: Self = Self {
        horizontal_size_class: SizeClass::Compact,
        vertical_size_class: SizeClass::Regular,
    };

    /// Compact width, compact height.
    pub const LANDSCAPE: Self = Self {
        horizontal_size_class: SizeClass::Compact,
        vertical_size_class: SizeClass::Compact,
    };

    /// Returns `true` when the vertical size class is compact.
    #[must_use]
    pub fn is_vertically_compact(&self) -> bool {
        self.vertical_size_class == SizeClass::Compact
    }
}
