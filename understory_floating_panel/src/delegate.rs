// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host callbacks.

use alloc::boxed::Box;

use kurbo::Vec2;

use crate::behavior::PanelBehavior;
use crate::controller::FloatingPanel;
use crate::layout::PanelLayout;
use crate::position::Position;
use crate::scroll::TrackedScroll;
use crate::trait_collection::TraitCollection;

/// Receives panel lifecycle and interaction notifications.
///
/// Every method has a no-op default. The panel is passed by shared reference
/// so implementations can read its state; mutations go through the host after
/// the callback returns.
pub trait PanelDelegate {
    /// Layout for `traits`, or `None` for the default.
    fn layout_for(&mut self, _traits: &TraitCollection) -> Option<Box<dyn PanelLayout>> {
        None
    }

    /// Behavior for `traits`, or `None` for the default.
    fn behavior_for(&mut self, _traits: &TraitCollection) -> Option<Box<dyn PanelBehavior>> {
        None
    }

    /// The surface moved.
    fn did_move(&mut self, _panel: &FloatingPanel) {}

    /// A drag of the panel was recognized.
    fn will_begin_dragging(&mut self, _panel: &FloatingPanel) {}

    /// The drag ended; the panel will settle at `target`.
    fn did_end_dragging(&mut self, _panel: &FloatingPanel, _velocity: Vec2, _target: Position) {}

    /// The settling animation is about to start.
    fn will_begin_decelerating(&mut self, _panel: &FloatingPanel) {}

    /// The settling animation finished or was interrupted.
    fn did_end_decelerating(&mut self, _panel: &FloatingPanel) {}

    /// The drag ended with a removal gesture.
    fn did_end_dragging_to_remove(&mut self, _panel: &FloatingPanel, _velocity: Vec2) {}

    /// The panel finished animating off screen after a removal gesture.
    fn did_end_remove(&mut self, _panel: &FloatingPanel) {}
}

/// Receives scroll notifications from a [`TrackedScroll`].
///
/// While a scroll is tracked the panel holds this delegate and forwards every
/// callback after handling it.
pub trait ScrollDelegate {
    /// The content offset changed.
    fn did_scroll(&mut self, _scroll: &TrackedScroll) {}

    /// A drag inside the scroll began.
    fn will_begin_dragging(&mut self, _scroll: &TrackedScroll) {}

    /// A drag inside the scroll ended with `velocity`.
    fn did_end_dragging(&mut self, _scroll: &TrackedScroll, _velocity: Vec2) {}
}
