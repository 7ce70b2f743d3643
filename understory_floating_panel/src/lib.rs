// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Floating Panel: a headless, draggable bottom sheet.
//!
//! The panel rests at one of three snap positions, `Full`, `Half` and `Tip`,
//! and the user drags it between them. A scroll view embedded in the panel
//! is coupled to the drag, so pulling the panel up hands off to scrolling the
//! content once the panel reaches `Full`, and pulling down on content at its
//! top edge drags the panel again.
//!
//! This crate owns interaction state and geometry only. Hosts provide:
//!
//! - container geometry ([`HostContainer`], safe-area and size updates),
//! - hit-tested pointer samples ([`FloatingPanel::pointer_down`] and friends),
//! - frame ticks ([`FloatingPanel::tick`]),
//!
//! and read back [`FloatingPanel::surface_frame`],
//! [`FloatingPanel::backdrop_alpha`] and [`PanelDelegate`] callbacks.
//!
//! Customization points:
//!
//! - [`PanelLayout`]: supported positions, their insets, interaction buffers,
//!   backdrop opacity and horizontal placement.
//! - [`PanelBehavior`]: the animators used for settling, adding, removing and
//!   moving, and the velocity thresholds of release handling.
//! - [`PanelDelegate`]: notifications, plus per-[`TraitCollection`] layout and
//!   behavior overrides.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Insets, Point, Size};
//! use understory_floating_panel::{
//!     FloatingPanel, HostContainer, Insertion, PanSource, PanelState, Position,
//! };
//!
//! let mut panel = FloatingPanel::new();
//! let container = HostContainer::plain(Size::new(375.0, 812.0))
//!     .with_safe_area(Insets::new(0.0, 44.0, 0.0, 34.0));
//! panel.add_panel(container, Insertion::Front, false);
//!
//! // The default portrait layout rests at Half.
//! assert_eq!(panel.state(), PanelState::Docked(Position::Half));
//! let half_y = panel.surface_y();
//!
//! // Drag the surface up by 300 units over 100 ms, then hold still.
//! panel.pointer_down(Point::new(180.0, half_y + 20.0), 0.0, PanSource::Surface);
//! panel.pointer_moved(Point::new(180.0, half_y - 280.0), 0.1);
//! panel.pointer_up(Point::new(180.0, half_y - 280.0), 0.3);
//!
//! // The release was slow, so the panel settles at the nearest position.
//! while panel.tick(1.0 / 60.0) {}
//! assert_eq!(panel.state(), PanelState::Docked(Position::Full));
//! assert_eq!(panel.surface_y(), panel.origin_y_of_surface(Position::Full));
//! ```
//!
//! ## Geometry
//!
//! Y grows downward. `Full` is inset from the top of the safe area, `Half`
//! and `Tip` from its bottom. See [`LayoutAdapter`] for the exact formulas.
//! The surface is taller than its visible part by [`SURFACE_OVERFLOW`] so
//! spring overshoot never reveals a gap below it.
//!
//! This crate is `no_std` and logs through `tracing`.

#![no_std]

extern crate alloc;

mod adapter;
mod behavior;
mod controller;
mod delegate;
mod drag;
mod host;
mod layout;
mod position;
mod scroll;
mod trait_collection;

pub use adapter::{LayoutAdapter, SURFACE_OVERFLOW, SnapPoints};
pub use behavior::{
    DEFAULT_TRANSITION_DURATION, DefaultBehavior, PanelBehavior, default_behavior_for,
};
pub use controller::{Completion, ContentInsetAdjustment, FloatingPanel, PanSource, PanelOptions};
pub use delegate::{PanelDelegate, ScrollDelegate};
pub use drag::{DEFAULT_DRAG_THRESHOLD, PanSample, PanTracker, VELOCITY_RESET_INTERVAL};
pub use host::{ContainerKind, HostContainer, Insertion, PanelContent, ViewId};
pub use layout::{
    DEFAULT_FULL_BACKDROP_ALPHA, DEFAULT_INTERACTION_BUFFER, DefaultLandscapeLayout,
    DefaultLayout, HorizontalPlacement, LayoutError, PanelLayout, default_layout_for,
    validate_positions,
};
pub use position::{PanelState, Position, PositionSet};
pub use scroll::TrackedScroll;
pub use trait_collection::{SizeClass, TraitCollection};
