// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host integration: the container the panel attaches to and the content it
//! presents.

use kurbo::{Insets, Size};

use crate::trait_collection::TraitCollection;

/// Kind of container a panel is attached to.
///
/// Container kinds that manage their own children in ways that conflict with
/// an overlay are rejected by
/// [`FloatingPanel::add_panel`](crate::FloatingPanel::add_panel).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// A plain view container.
    #[default]
    Plain,
    /// A navigation stack.
    Navigation,
    /// A tab bar container.
    TabBar,
    /// A split (master-detail) container.
    SplitView,
    /// A container whose root is a table.
    Table,
    /// A container whose root is a collection.
    Collection,
}

impl ContainerKind {
    /// Why this kind cannot host a panel, or `None` when it can.
    #[must_use]
    pub fn rejection_reason(self) -> Option<&'static str> {
        match self {
            Self::Plain => None,
            Self::Navigation => Some("a navigation container displays only one child at a time"),
            Self::TabBar => {
                Some("a tab bar container shows its children with a radio-style selection interface")
            }
            Self::SplitView => {
                Some("a split container manages two children in a master-detail interface")
            }
            Self::Table => Some("a table container's root view is a table, which cannot host a panel"),
            Self::Collection => Some(
                "a collection container's root view is a collection, which cannot host a panel",
            ),
        }
    }
}

/// The container a panel is attached to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostContainer {
    /// Kind of container.
    pub kind: ContainerKind,
    /// Size of the container's bounds.
    pub size: Size,
    /// Safe-area insets of the container.
    pub safe_area: Insets,
    /// The container's environment traits.
    pub traits: TraitCollection,
}

impl HostContainer {
    /// A plain container with no safe area and portrait traits.
    #[must_use]
    pub fn plain(size: Size) -> Self {
        Self {
            kind: ContainerKind::Plain,
            size,
            safe_area: Insets::ZERO,
            traits: TraitCollection::PORTRAIT,
        }
    }

    /// Replaces the safe-area insets.
    #[must_use]
    pub fn with_safe_area(mut self, safe_area: Insets) -> Self {
        self.safe_area = safe_area;
        self
    }

    /// Replaces the traits.
    #[must_use]
    pub fn with_traits(mut self, traits: TraitCollection) -> Self {
        self.traits = traits;
        self
    }
}

/// Host-defined identifier of a sibling view inside the container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

/// Where the panel's views go among the container's children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Insertion {
    /// In front of every existing child.
    #[default]
    Front,
    /// Directly below the given sibling.
    Below(ViewId),
}

/// Content presented inside the panel's surface.
pub trait PanelContent {
    /// The content was installed in the panel.
    fn did_move_to_panel(&mut self) {}

    /// The content is about to be replaced or dropped.
    fn will_leave_panel(&mut self) {}
}

/// Record of a live attachment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Attachment {
    pub(crate) kind: ContainerKind,
    pub(crate) insertion: Insertion,
    /// Safe-area updates are applied only while this is set.
    pub(crate) observes_safe_area: bool,
}
