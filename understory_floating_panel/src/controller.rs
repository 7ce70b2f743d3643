// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interaction controller.
//!
//! [`FloatingPanel`] owns the discrete [`PanelState`], the live surface Y, the
//! in-flight pan and the running transition. Hosts feed it container geometry,
//! pointer samples and frame ticks, and read back frames and delegate
//! callbacks.
//!
//! A transition's discrete state is committed only when its animator
//! finishes. Interrupting a transition stops its animator at the current
//! value:
//!
//! - an interrupted settle ends with `did_end_decelerating` and commits
//!   nothing;
//! - an interrupted presentation commits its target;
//! - an interrupted programmatic move runs its completion;
//! - removals are never interrupted by pointer input.

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Insets, Point, Rect, Size, Vec2};
use tracing::{debug, trace, warn};
use understory_motion::Animator;

use crate::adapter::{LayoutAdapter, SnapPoints};
use crate::behavior::{DefaultBehavior, PanelBehavior, default_behavior_for};
use crate::delegate::{PanelDelegate, ScrollDelegate};
use crate::drag::{DEFAULT_DRAG_THRESHOLD, PanTracker};
use crate::host::{Attachment, ContainerKind, HostContainer, Insertion, PanelContent};
use crate::layout::{DefaultLayout, PanelLayout, default_layout_for};
use crate::position::{PanelState, Position};
use crate::scroll::TrackedScroll;
use crate::trait_collection::TraitCollection;

/// Callback run when a programmatic move or removal completes.
pub type Completion = Box<dyn FnOnce()>;

const EPSILON: f64 = 1e-6;

/// Whether the panel manages the tracked scroll's insets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContentInsetAdjustment {
    /// Push the bottom safe-area inset into the scroll's content and
    /// indicator insets, and turn off its automatic adjustment.
    #[default]
    Always,
    /// Leave the scroll's insets alone.
    Never,
}

/// Construction-time options of a [`FloatingPanel`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelOptions {
    /// See [`ContentInsetAdjustment`].
    pub content_inset_adjustment: ContentInsetAdjustment,
    /// Whether a fast downward release below the bottom-most position removes
    /// the panel.
    pub removal_interaction_enabled: bool,
    /// Distance the pointer travels before a drag is recognized.
    pub drag_threshold: f64,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            content_inset_adjustment: ContentInsetAdjustment::Always,
            removal_interaction_enabled: false,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
        }
    }
}

/// Where a pan started, as hit-tested by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PanSource {
    /// On the surface outside the tracked scroll.
    #[default]
    Surface,
    /// Inside the tracked scroll.
    Scroll,
}

enum Transition {
    Present {
        target: Position,
    },
    Settle {
        target: Position,
    },
    Move {
        target: Position,
        completion: Option<Completion>,
    },
    Remove {
        by_drag: bool,
        completion: Option<Completion>,
    },
}

impl Transition {
    fn is_removal(&self) -> bool {
        matches!(self, Self::Remove { .. })
    }

    fn target_y(&self, adapter: &LayoutAdapter) -> f64 {
        match self {
            Self::Present { target } | Self::Settle { target } | Self::Move { target, .. } => {
                adapter.position_y(*target)
            }
            Self::Remove { .. } => adapter.off_y(),
        }
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present { target } => f.debug_struct("Present").field("target", target).finish(),
            Self::Settle { target } => f.debug_struct("Settle").field("target", target).finish(),
            Self::Move { target, .. } => f.debug_struct("Move").field("target", target).finish(),
            Self::Remove { by_drag, .. } => {
                f.debug_struct("Remove").field("by_drag", by_drag).finish()
            }
        }
    }
}

#[derive(Debug)]
struct Running {
    animator: Animator,
    transition: Transition,
}

#[derive(Clone, Copy, Debug)]
struct Gesture {
    source: PanSource,
    panel_dragging: bool,
    scroll_dragging: bool,
}

fn chain(first: Option<Completion>, second: Option<Completion>) -> Option<Completion> {
    match (first, second) {
        (None, c) | (c, None) => c,
        (Some(a), Some(b)) => Some(Box::new(move || {
            a();
            b();
        })),
    }
}

/// A draggable bottom sheet.
///
/// See the [crate documentation](crate) for a walkthrough.
pub struct FloatingPanel {
    options: PanelOptions,
    adapter: LayoutAdapter,
    behavior: Box<dyn PanelBehavior>,
    traits: TraitCollection,
    state: PanelState,
    surface_y: f64,
    attachment: Option<Attachment>,
    delegate: Option<Box<dyn PanelDelegate>>,
    content: Option<Box<dyn PanelContent>>,
    scroll: Option<TrackedScroll>,
    host_scroll_delegate: Option<Box<dyn ScrollDelegate>>,
    pan: PanTracker,
    gesture: Option<Gesture>,
    running: Option<Running>,
}

impl fmt::Debug for FloatingPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FloatingPanel")
            .field("options", &self.options)
            .field("adapter", &self.adapter)
            .field("traits", &self.traits)
            .field("state", &self.state)
            .field("surface_y", &self.surface_y)
            .field("attachment", &self.attachment)
            .field("scroll", &self.scroll)
            .field("pan", &self.pan)
            .field("gesture", &self.gesture)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

impl Default for FloatingPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl FloatingPanel {
    /// Creates a detached panel with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(PanelOptions::default())
    }

    /// Creates a detached panel with `options`.
    #[must_use]
    pub fn with_options(options: PanelOptions) -> Self {
        Self {
            options,
            adapter: LayoutAdapter::new(Box::new(DefaultLayout)),
            behavior: Box::new(DefaultBehavior::default()),
            traits: TraitCollection::default(),
            state: PanelState::Off,
            surface_y: 0.0,
            attachment: None,
            delegate: None,
            content: None,
            scroll: None,
            host_scroll_delegate: None,
            pan: PanTracker::new(options.drag_threshold),
            gesture: None,
            running: None,
        }
    }

    /// Installs the delegate, replacing any previous one.
    pub fn set_delegate(&mut self, delegate: Box<dyn PanelDelegate>) {
        self.delegate = Some(delegate);
    }

    /// Removes and returns the delegate.
    pub fn take_delegate(&mut self) -> Option<Box<dyn PanelDelegate>> {
        self.delegate.take()
    }

    // --- Delegate plumbing ---

    fn notify(&mut self, f: impl FnOnce(&mut dyn PanelDelegate, &Self)) {
        if let Some(mut delegate) = self.delegate.take() {
            f(delegate.as_mut(), self);
            if self.delegate.is_none() {
                self.delegate = Some(delegate);
            }
        }
    }

    fn forward_scroll(&mut self, f: impl FnOnce(&mut dyn ScrollDelegate, &TrackedScroll)) {
        if let (Some(delegate), Some(scroll)) =
            (self.host_scroll_delegate.as_mut(), self.scroll.as_ref())
        {
            f(delegate.as_mut(), scroll);
        }
    }

    fn resolve_layout(&mut self, traits: &TraitCollection) -> Box<dyn PanelLayout> {
        self.delegate
            .as_mut()
            .and_then(|d| d.layout_for(traits))
            .unwrap_or_else(|| default_layout_for(traits))
    }

    fn resolve_behavior(&mut self, traits: &TraitCollection) -> Box<dyn PanelBehavior> {
        self.delegate
            .as_mut()
            .and_then(|d| d.behavior_for(traits))
            .unwrap_or_else(|| default_behavior_for(traits))
    }

    // --- Attachment ---

    /// Attaches the panel to `container`.
    ///
    /// Resolves the layout and behavior for the container's traits, installs
    /// its geometry and rests at the layout's initial position, animating up
    /// from below the container when `animated` is set.
    ///
    /// A second attach without a removal in between is ignored with a
    /// warning.
    ///
    /// # Panics
    ///
    /// Panics if the container kind cannot host a panel (see
    /// [`ContainerKind::rejection_reason`]) or if the resolved layout is
    /// inconsistent with the container geometry.
    pub fn add_panel(&mut self, container: HostContainer, insertion: Insertion, animated: bool) {
        if self.attachment.is_some() {
            warn!(kind = ?container.kind, "floating panel is already attached; ignoring add_panel");
            return;
        }
        if let Some(reason) = container.kind.rejection_reason() {
            panic!(
                "cannot attach a floating panel to a {:?} container: {reason}",
                container.kind
            );
        }

        self.attachment = Some(Attachment {
            kind: container.kind,
            insertion,
            observes_safe_area: true,
        });
        self.traits = container.traits;
        self.adapter.set_container_size(container.size);
        self.adapter.set_safe_area(container.safe_area);
        let layout = self.resolve_layout(&container.traits);
        self.adapter.set_layout(layout);
        self.behavior = self.resolve_behavior(&container.traits);
        self.apply_scroll_insets();

        let initial = self.adapter.layout().initial_position();
        debug!(?initial, ?insertion, animated, "attaching floating panel");
        if animated {
            self.surface_y = self.adapter.off_y();
            let animator = self.behavior.add_animator(initial);
            self.run(animator, Transition::Present { target: initial });
        } else {
            self.surface_y = self.adapter.position_y(initial);
            self.finish(Transition::Present { target: initial });
        }
    }

    /// Detaches the panel, animating it off screen when `animated` is set.
    ///
    /// Safe-area updates stop applying immediately. `completion` runs once
    /// the panel is detached; when the panel is not attached it runs right
    /// away.
    pub fn remove_panel_from_parent(&mut self, animated: bool, completion: Option<Completion>) {
        let Some(attachment) = self.attachment.as_mut() else {
            debug!("floating panel is not attached; nothing to remove");
            if let Some(completion) = completion {
                completion();
            }
            return;
        };
        attachment.observes_safe_area = false;
        self.cancel_gesture();

        if let Some(Running {
            mut animator,
            transition:
                Transition::Remove {
                    by_drag,
                    completion: pending,
                },
        }) = self
            .running
            .take_if(|running| running.transition.is_removal())
        {
            let transition = Transition::Remove {
                by_drag,
                completion: chain(pending, completion),
            };
            if animated {
                self.running = Some(Running {
                    animator,
                    transition,
                });
            } else {
                animator.stop();
                self.surface_y = self.adapter.off_y();
                self.finish(transition);
            }
            return;
        }

        self.interrupt();
        let transition = Transition::Remove {
            by_drag: false,
            completion,
        };
        debug!(animated, "removing floating panel");
        if animated {
            let from = self
                .state
                .position()
                .unwrap_or_else(|| self.adapter.layout().initial_position());
            let animator = self.behavior.remove_animator(from);
            self.run(animator, transition);
        } else {
            self.surface_y = self.adapter.off_y();
            self.finish(transition);
        }
    }

    /// Moves to `position`.
    ///
    /// The state updates when the move completes; `did_move` and then
    /// `completion` follow. A move requested while the panel is being removed
    /// or is detached only runs `completion`.
    ///
    /// # Panics
    ///
    /// Panics if the current layout does not support `position`.
    pub fn move_to(&mut self, position: Position, animated: bool, completion: Option<Completion>) {
        let supported = self.adapter.layout().supported_positions();
        assert!(
            supported.has(position),
            "cannot move to {position:?}: the layout supports only {supported:?}"
        );

        let removing = self
            .running
            .as_ref()
            .is_some_and(|running| running.transition.is_removal());
        if removing || self.attachment.is_none() {
            warn!(?position, "floating panel is not presented; ignoring move_to");
            if let Some(completion) = completion {
                completion();
            }
            return;
        }

        self.interrupt();
        self.cancel_gesture();
        let transition = Transition::Move {
            target: position,
            completion,
        };
        debug!(?position, animated, "moving floating panel");
        if animated {
            let from = self.state.position().unwrap_or(position);
            let animator = self.behavior.move_animator(from, position);
            self.run(animator, transition);
        } else {
            self.surface_y = self.adapter.position_y(position);
            self.finish(transition);
        }
    }

    // --- Content and scroll tracking ---

    /// Replaces the presented content and returns the previous one.
    ///
    /// The outgoing content hears `will_leave_panel` before the incoming
    /// content hears `did_move_to_panel`.
    pub fn set_content(
        &mut self,
        content: Option<Box<dyn PanelContent>>,
    ) -> Option<Box<dyn PanelContent>> {
        let mut previous = self.content.take();
        if let Some(previous) = previous.as_mut() {
            previous.will_leave_panel();
        }
        self.content = content;
        if let Some(content) = self.content.as_mut() {
            content.did_move_to_panel();
        }
        previous
    }

    /// The presented content.
    #[must_use]
    pub fn content(&self) -> Option<&dyn PanelContent> {
        self.content.as_deref()
    }

    /// The presented content, mutably.
    pub fn content_mut(&mut self) -> Option<&mut (dyn PanelContent + 'static)> {
        self.content.as_deref_mut()
    }

    /// Starts coupling drags inside `scroll` with the panel.
    ///
    /// The panel takes over the scroll's delegate slot and forwards every
    /// callback to the delegate that was installed on it. Returns the
    /// previously tracked scroll, with its delegate restored.
    pub fn track_scroll_view(&mut self, mut scroll: TrackedScroll) -> Option<TrackedScroll> {
        let previous = self.untrack_scroll_view();
        self.host_scroll_delegate = scroll.take_delegate();
        if self.options.content_inset_adjustment == ContentInsetAdjustment::Always {
            scroll.set_automatic_inset_adjustment(false);
        }
        self.scroll = Some(scroll);
        if self.attachment.is_some() {
            self.apply_scroll_insets();
        }
        previous
    }

    /// Stops tracking the scroll and returns it, with its delegate restored.
    ///
    /// A pan that started in the scroll ends as if cancelled: the panel
    /// settles and both delegates hear the end of the drag.
    pub fn untrack_scroll_view(&mut self) -> Option<TrackedScroll> {
        if self.scroll.is_none() {
            return None;
        }
        if self
            .gesture
            .is_some_and(|gesture| gesture.source == PanSource::Scroll)
        {
            self.pointer_cancelled();
        }
        let mut scroll = self.scroll.take()?;
        scroll.restore_delegate(self.host_scroll_delegate.take());
        Some(scroll)
    }

    /// The tracked scroll.
    #[must_use]
    pub fn tracked_scroll(&self) -> Option<&TrackedScroll> {
        self.scroll.as_ref()
    }

    /// The tracked scroll, mutably, for content size updates.
    pub fn tracked_scroll_mut(&mut self) -> Option<&mut TrackedScroll> {
        self.scroll.as_mut()
    }

    /// Scrolls the tracked content to `offset` and notifies its delegate.
    pub fn scroll_to(&mut self, offset: f64) {
        let Some(scroll) = self.scroll.as_mut() else {
            warn!("no tracked scroll; ignoring scroll_to");
            return;
        };
        let before = scroll.content_offset();
        scroll.set_content_offset(offset);
        if scroll.content_offset() != before {
            self.forward_scroll(|d, s| d.did_scroll(s));
        }
    }

    fn apply_scroll_insets(&mut self) {
        if self.options.content_inset_adjustment != ContentInsetAdjustment::Always {
            return;
        }
        let insets = self.adapter.adjusted_content_insets();
        if let Some(scroll) = self.scroll.as_mut() {
            scroll.set_content_inset(insets);
            scroll.set_indicator_inset(insets);
        }
    }

    // --- Environment ---

    /// Applies new environment traits.
    ///
    /// Re-resolves the layout and behavior, validates the layout, and rests at
    /// the current position, or at the new layout's initial position when the
    /// current one is no longer supported. Nothing animates.
    ///
    /// # Panics
    ///
    /// Panics if the resolved layout is inconsistent with the container.
    pub fn set_traits(&mut self, traits: TraitCollection) {
        self.traits = traits;
        self.behavior = self.resolve_behavior(&traits);
        if self.attachment.is_none() {
            trace!(?traits, "stored traits for a detached panel");
            return;
        }

        let layout = self.resolve_layout(&traits);
        self.adapter.set_layout(layout);

        let removing = self
            .running
            .as_ref()
            .is_some_and(|running| running.transition.is_removal());
        if removing {
            self.retarget();
            return;
        }

        self.interrupt();
        self.cancel_gesture();
        let resolved = self.adapter.activate(self.state);
        debug!(?traits, state = ?resolved, "traits changed");
        self.state = resolved;
        self.surface_y = self.adapter.resting_y();
        self.notify(|d, p| d.did_move(p));
    }

    /// Applies new safe-area insets while attached.
    ///
    /// Ignored once a removal has started or when detached.
    pub fn set_safe_area(&mut self, safe_area: Insets) {
        if !self
            .attachment
            .is_some_and(|attachment| attachment.observes_safe_area)
        {
            trace!("not observing the safe area; ignoring update");
            return;
        }
        self.adapter.set_safe_area(safe_area);
        self.apply_scroll_insets();
        self.relayout();
    }

    /// Applies a new container size while attached.
    pub fn set_container_size(&mut self, size: Size) {
        if self.attachment.is_none() {
            trace!("detached; ignoring container size");
            return;
        }
        self.adapter.set_container_size(size);
        if let Err(error) = self.adapter.check_consistency() {
            warn!(%error, "layout is inconsistent with the new container size");
        }
        self.relayout();
    }

    fn relayout(&mut self) {
        if self.running.is_some() {
            self.retarget();
            return;
        }
        if self.gesture.is_some_and(|gesture| gesture.panel_dragging) {
            return;
        }
        let y = self.adapter.state_y(self.state);
        if y != self.surface_y {
            self.surface_y = y;
            self.notify(|d, p| d.did_move(p));
        }
    }

    /// Points the running animation at its target's new Y, keeping its
    /// velocity.
    fn retarget(&mut self) {
        let Some(running) = self.running.as_mut() else {
            return;
        };
        let to = running.transition.target_y(&self.adapter);
        running.animator.retarget(to);
        if let Some(running) = self.running.take_if(|r| !r.animator.is_running()) {
            self.surface_y = to;
            self.finish(running.transition);
        }
    }

    // --- Pointer input ---

    /// A pointer went down at `location` (container coordinates) at `time`
    /// seconds.
    ///
    /// Stops a running animation where it is and starts tracking. Ignored
    /// while detached or being removed.
    pub fn pointer_down(&mut self, location: Point, time: f64, source: PanSource) {
        if self.attachment.is_none() {
            trace!("detached; ignoring pointer_down");
            return;
        }
        if self
            .running
            .as_ref()
            .is_some_and(|running| running.transition.is_removal())
        {
            debug!("removal in progress; ignoring pointer_down");
            return;
        }
        let source = if source == PanSource::Scroll && self.scroll.is_none() {
            warn!("pan started in a scroll but none is tracked; treating it as a surface pan");
            PanSource::Surface
        } else {
            source
        };

        self.interrupt();
        self.pan.start(location, time);
        self.gesture = Some(Gesture {
            source,
            panel_dragging: false,
            scroll_dragging: false,
        });
    }

    /// The pointer moved.
    pub fn pointer_moved(&mut self, location: Point, time: f64) {
        let Some(gesture) = self.gesture else {
            return;
        };
        let Some(delta) = self.pan.update(location, time) else {
            return;
        };
        match gesture.source {
            PanSource::Surface => {
                self.begin_panel_drag();
                self.move_surface_by(delta.y);
            }
            PanSource::Scroll => self.drag_in_scroll(delta.y),
        }
    }

    /// The pointer went up; the panel settles or is removed.
    pub fn pointer_up(&mut self, location: Point, time: f64) {
        if self.gesture.is_none() {
            debug!("pointer_up without pointer_down");
            return;
        }
        self.pointer_moved(location, time);
        let Some(gesture) = self.gesture.take() else {
            return;
        };
        let velocity = self.pan.end();
        trace!(?velocity, "pointer released");

        if gesture.panel_dragging || !self.is_at_rest() {
            self.end_drag(velocity);
        }
        if gesture.scroll_dragging {
            self.forward_scroll(|d, s| d.did_end_dragging(s, velocity));
        }
    }

    /// The pointer sequence was cancelled; the panel settles without
    /// velocity.
    pub fn pointer_cancelled(&mut self) {
        let Some(gesture) = self.gesture.take() else {
            return;
        };
        self.pan.cancel();
        if gesture.panel_dragging || !self.is_at_rest() {
            self.end_drag(Vec2::ZERO);
        }
        if gesture.scroll_dragging {
            self.forward_scroll(|d, s| d.did_end_dragging(s, Vec2::ZERO));
        }
    }

    fn is_at_rest(&self) -> bool {
        (self.surface_y - self.adapter.state_y(self.state)).abs() < EPSILON
    }

    fn cancel_gesture(&mut self) {
        if self.gesture.take().is_some() {
            trace!("cancelling in-flight pan");
        }
        self.pan.cancel();
    }

    fn begin_panel_drag(&mut self) {
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        if gesture.panel_dragging {
            return;
        }
        gesture.panel_dragging = true;
        debug!(y = self.surface_y, "panel drag began");
        self.notify(|d, p| d.will_begin_dragging(p));
    }

    fn begin_scroll_drag(&mut self) {
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        if gesture.scroll_dragging {
            return;
        }
        gesture.scroll_dragging = true;
        self.forward_scroll(|d, s| d.will_begin_dragging(s));
    }

    fn move_surface_by(&mut self, dy: f64) {
        let (min, max) = self.adapter.interaction_range();
        let y = (self.surface_y + dy).min(max).max(min);
        if y != self.surface_y {
            self.surface_y = y;
            self.notify(|d, p| d.did_move(p));
        }
    }

    /// Splits a drag inside the tracked scroll between the panel and the
    /// content.
    fn drag_in_scroll(&mut self, dy: f64) {
        self.begin_scroll_drag();
        let top_y = self.adapter.top_y();
        let mut remaining = dy;

        if self.surface_y > top_y + EPSILON {
            // Below the top: the panel takes the delta and the content stays
            // pinned.
            self.begin_panel_drag();
            let step = if remaining < 0.0 {
                remaining.max(top_y - self.surface_y)
            } else {
                remaining
            };
            self.move_surface_by(step);
            remaining -= step;
            if remaining >= 0.0 {
                return;
            }
        }

        let content_at_top = self.scroll.as_ref().is_some_and(TrackedScroll::is_at_top);
        if remaining > 0.0 && content_at_top {
            self.begin_panel_drag();
            self.move_surface_by(remaining);
            return;
        }

        let Some(scroll) = self.scroll.as_mut() else {
            return;
        };
        let before = scroll.content_offset();
        let leftover = scroll.scroll_by(-remaining);
        if scroll.content_offset() != before {
            self.forward_scroll(|d, s| d.did_scroll(s));
        }
        // Scrolled back to the top edge mid-delta: the rest pulls the panel.
        if remaining > 0.0 && leftover < 0.0 {
            self.begin_panel_drag();
            self.move_surface_by(-leftover);
        }
    }

    fn end_drag(&mut self, velocity: Vec2) {
        let y = self.surface_y;
        if self.options.removal_interaction_enabled
            && y > self.adapter.bottom_y()
            && velocity.y >= self.behavior.removal_velocity_threshold()
        {
            debug!(y, ?velocity, "released to remove");
            self.notify(|d, p| d.did_end_dragging_to_remove(p, velocity));
            if let Some(attachment) = self.attachment.as_mut() {
                attachment.observes_safe_area = false;
            }
            let animator = self.behavior.removal_interaction_animator(velocity);
            self.run(
                animator,
                Transition::Remove {
                    by_drag: true,
                    completion: None,
                },
            );
            return;
        }

        let target = self.target_position(y, velocity);
        debug!(y, ?velocity, ?target, "released; settling");
        self.notify(|d, p| d.will_begin_decelerating(p));
        self.notify(|d, p| d.did_end_dragging(p, velocity, target));
        let animator = self.behavior.interaction_animator(target, velocity);
        self.run(animator, Transition::Settle { target });
    }

    /// Picks the resting position for a release at `y` with `velocity`.
    fn target_position(&self, y: f64, velocity: Vec2) -> Position {
        let points = self.adapter.snap_points();
        let fallback = self.adapter.layout().initial_position();

        if velocity.y.abs() < self.behavior.redirection_velocity_threshold() {
            return nearest(&points, y).unwrap_or(fallback);
        }

        let rate = self.behavior.momentum_projection_rate().clamp(0.0, 0.999_999);
        let projected = y + velocity.y / 1000.0 * rate / (1.0 - rate);
        let ahead: SnapPoints = points
            .iter()
            .copied()
            .filter(|&(_, py)| {
                if velocity.y > 0.0 {
                    py >= y - EPSILON
                } else {
                    py <= y + EPSILON
                }
            })
            .collect();
        trace!(projected, candidates = ahead.len(), "projected release");

        nearest(&ahead, projected)
            .or_else(|| {
                if velocity.y > 0.0 {
                    points.last().map(|&(p, _)| p)
                } else {
                    points.first().map(|&(p, _)| p)
                }
            })
            .unwrap_or(fallback)
    }

    // --- Animation ---

    fn run(&mut self, mut animator: Animator, transition: Transition) {
        let to = transition.target_y(&self.adapter);
        animator.start(self.surface_y, to);
        if animator.is_running() {
            trace!(?transition, from = self.surface_y, to, "transition started");
            self.running = Some(Running {
                animator,
                transition,
            });
        } else {
            self.surface_y = to;
            self.finish(transition);
        }
    }

    /// Advances the running animation by `dt` seconds.
    ///
    /// Returns `true` while an animation is still running.
    pub fn tick(&mut self, dt: f64) -> bool {
        let Some(running) = self.running.as_mut() else {
            return false;
        };
        let y = running.animator.tick(dt);
        let finished = !running.animator.is_running();
        let moved = y != self.surface_y;
        self.surface_y = y;
        trace!(y, dt, "tick");

        if finished {
            if let Some(running) = self.running.take() {
                self.finish(running.transition);
            }
            false
        } else {
            if moved {
                self.notify(|d, p| d.did_move(p));
            }
            true
        }
    }

    fn finish(&mut self, transition: Transition) {
        trace!(?transition, "transition finished");
        match transition {
            Transition::Present { target } => {
                self.state = self.adapter.activate(target.into());
                self.notify(|d, p| d.did_move(p));
            }
            Transition::Settle { target } => {
                self.state = self.adapter.activate(target.into());
                self.notify(|d, p| d.did_end_decelerating(p));
                self.notify(|d, p| d.did_move(p));
            }
            Transition::Move { target, completion } => {
                self.state = self.adapter.activate(target.into());
                self.notify(|d, p| d.did_move(p));
                if let Some(completion) = completion {
                    completion();
                }
            }
            Transition::Remove {
                by_drag,
                completion,
            } => {
                self.state = self.adapter.activate(PanelState::Off);
                self.attachment = None;
                self.cancel_gesture();
                debug!(by_drag, "floating panel detached");
                self.notify(|d, p| d.did_move(p));
                if by_drag {
                    self.notify(|d, p| d.did_end_remove(p));
                }
                if let Some(completion) = completion {
                    completion();
                }
            }
        }
    }

    /// Stops the running animation at its current value. Removals keep
    /// running.
    fn interrupt(&mut self) {
        let Some(mut running) = self
            .running
            .take_if(|running| !running.transition.is_removal())
        else {
            return;
        };
        self.surface_y = running.animator.stop();
        debug!(transition = ?running.transition, y = self.surface_y, "transition interrupted");
        match running.transition {
            Transition::Present { target } => {
                self.state = self.adapter.activate(target.into());
                self.notify(|d, p| d.did_move(p));
            }
            Transition::Settle { .. } => {
                self.notify(|d, p| d.did_end_decelerating(p));
            }
            Transition::Move { completion, .. } => {
                if let Some(completion) = completion {
                    completion();
                }
            }
            Transition::Remove { .. } => {}
        }
    }

    // --- Accessors ---

    /// Discrete state.
    #[must_use]
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Docked position, if any.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.state.position()
    }

    /// Live Y of the surface's top edge.
    #[must_use]
    pub fn surface_y(&self) -> f64 {
        self.surface_y
    }

    /// Live frame of the surface.
    #[must_use]
    pub fn surface_frame(&self) -> Rect {
        self.adapter.surface_frame(self.surface_y)
    }

    /// Frame of the backdrop.
    #[must_use]
    pub fn backdrop_frame(&self) -> Rect {
        self.adapter.backdrop_frame()
    }

    /// Returns `true` when the backdrop should not be shown: while detached
    /// or in a vertically compact environment.
    #[must_use]
    pub fn is_backdrop_hidden(&self) -> bool {
        self.attachment.is_none() || self.traits.is_vertically_compact()
    }

    /// Backdrop opacity for the live surface Y.
    #[must_use]
    pub fn backdrop_alpha(&self) -> f64 {
        if self.is_backdrop_hidden() {
            0.0
        } else {
            self.adapter.backdrop_alpha_at(self.surface_y)
        }
    }

    /// Insets the tracked scroll needs to clear the bottom safe area.
    #[must_use]
    pub fn adjusted_content_insets(&self) -> Insets {
        self.adapter.adjusted_content_insets()
    }

    /// Y of the surface when resting at `position`.
    #[must_use]
    pub fn origin_y_of_surface(&self, position: Position) -> f64 {
        self.adapter.position_y(position)
    }

    /// The pan tracker.
    #[must_use]
    pub fn pan_tracker(&self) -> &PanTracker {
        &self.pan
    }

    /// The layout adapter.
    #[must_use]
    pub fn layout_adapter(&self) -> &LayoutAdapter {
        &self.adapter
    }

    /// The current behavior.
    #[must_use]
    pub fn behavior(&self) -> &dyn PanelBehavior {
        self.behavior.as_ref()
    }

    /// The current traits.
    #[must_use]
    pub fn traits(&self) -> TraitCollection {
        self.traits
    }

    /// Construction options.
    #[must_use]
    pub fn options(&self) -> PanelOptions {
        self.options
    }

    /// Returns `true` while attached to a container.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// Kind of the container the panel is attached to.
    #[must_use]
    pub fn container_kind(&self) -> Option<ContainerKind> {
        self.attachment.map(|a| a.kind)
    }

    /// Where the panel was inserted in its container.
    #[must_use]
    pub fn insertion(&self) -> Option<Insertion> {
        self.attachment.map(|a| a.insertion)
    }

    /// Returns `true` while an animation is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.running.is_some()
    }

    /// Returns `true` while the user is dragging the panel itself.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some_and(|gesture| gesture.panel_dragging)
    }
}

/// The snap point nearest `y`; ties go to the upper one.
fn nearest(points: &SnapPoints, y: f64) -> Option<Position> {
    points
        .iter()
        .fold(None, |best: Option<(Position, f64)>, &(position, py)| {
            let distance = (py - y).abs();
            match best {
                Some((_, d)) if d <= distance => best,
                _ => Some((position, distance)),
            }
        })
        .map(|(position, _)| position)
}
