// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests for `FloatingPanel`: attachment, drags, scroll handoff,
//! removal and environment changes.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Insets, Point, Size, Vec2};
use understory_motion::{Animator, Timing};
use understory_floating_panel::{
    ContainerKind, ContentInsetAdjustment, DefaultLandscapeLayout, FloatingPanel, HostContainer,
    Insertion, PanSource, PanelBehavior, PanelContent, PanelDelegate, PanelLayout, PanelOptions,
    PanelState, Position, PositionSet, ScrollDelegate, TraitCollection, TrackedScroll, ViewId,
};

#[derive(Clone, Debug, PartialEq)]
enum Event {
    Moved(f64),
    WillBeginDragging,
    DidEndDragging(Position),
    WillBeginDecelerating,
    DidEndDecelerating,
    DidEndDraggingToRemove(Vec2),
    DidEndRemove,
    DidScroll(f64),
    ScrollWillBeginDragging,
    ScrollDidEndDragging,
    ContentAttached(&'static str),
    ContentDetached(&'static str),
    Completed(&'static str),
}

type Log = Rc<RefCell<Vec<Event>>>;

#[derive(Default)]
struct Recorder {
    log: Log,
    landscape_layout: Option<fn() -> Box<dyn PanelLayout>>,
}

impl PanelDelegate for Recorder {
    fn layout_for(&mut self, traits: &TraitCollection) -> Option<Box<dyn PanelLayout>> {
        if traits.is_vertically_compact() {
            self.landscape_layout.map(|make| make())
        } else {
            None
        }
    }

    fn did_move(&mut self, panel: &FloatingPanel) {
        self.log.borrow_mut().push(Event::Moved(panel.surface_y()));
    }

    fn will_begin_dragging(&mut self, _panel: &FloatingPanel) {
        self.log.borrow_mut().push(Event::WillBeginDragging);
    }

    fn did_end_dragging(&mut self, _panel: &FloatingPanel, _velocity: Vec2, target: Position) {
        self.log.borrow_mut().push(Event::DidEndDragging(target));
    }

    fn will_begin_decelerating(&mut self, _panel: &FloatingPanel) {
        self.log.borrow_mut().push(Event::WillBeginDecelerating);
    }

    fn did_end_decelerating(&mut self, _panel: &FloatingPanel) {
        self.log.borrow_mut().push(Event::DidEndDecelerating);
    }

    fn did_end_dragging_to_remove(&mut self, _panel: &FloatingPanel, velocity: Vec2) {
        self.log
            .borrow_mut()
            .push(Event::DidEndDraggingToRemove(velocity));
    }

    fn did_end_remove(&mut self, panel: &FloatingPanel) {
        assert!(!panel.is_attached(), "removal must detach before notifying");
        self.log.borrow_mut().push(Event::DidEndRemove);
    }
}

struct ScrollRecorder {
    log: Log,
}

impl ScrollDelegate for ScrollRecorder {
    fn did_scroll(&mut self, scroll: &TrackedScroll) {
        self.log
            .borrow_mut()
            .push(Event::DidScroll(scroll.content_offset()));
    }

    fn will_begin_dragging(&mut self, _scroll: &TrackedScroll) {
        self.log.borrow_mut().push(Event::ScrollWillBeginDragging);
    }

    fn did_end_dragging(&mut self, _scroll: &TrackedScroll, _velocity: Vec2) {
        self.log.borrow_mut().push(Event::ScrollDidEndDragging);
    }
}

struct Content {
    name: &'static str,
    log: Log,
}

impl PanelContent for Content {
    fn did_move_to_panel(&mut self) {
        self.log.borrow_mut().push(Event::ContentAttached(self.name));
    }

    fn will_leave_panel(&mut self) {
        self.log.borrow_mut().push(Event::ContentDetached(self.name));
    }
}

fn landscape() -> Box<dyn PanelLayout> {
    Box::new(DefaultLandscapeLayout)
}

/// Full at 62, Half at 516, Tip at 709, off at 812.
fn phone() -> HostContainer {
    HostContainer::plain(Size::new(375.0, 812.0)).with_safe_area(Insets::new(0.0, 44.0, 0.0, 34.0))
}

fn attach_with(options: PanelOptions, recorder: Recorder) -> (FloatingPanel, Log) {
    let log = recorder.log.clone();
    let mut panel = FloatingPanel::with_options(options);
    panel.set_delegate(Box::new(recorder));
    panel.add_panel(phone(), Insertion::Front, false);
    log.borrow_mut().clear();
    (panel, log)
}

fn attach() -> (FloatingPanel, Log) {
    attach_with(PanelOptions::default(), Recorder::default())
}

fn settle(panel: &mut FloatingPanel) {
    let mut frames = 0;
    while panel.tick(1.0 / 60.0) {
        frames += 1;
        assert!(frames < 1_000, "animation never settled");
    }
}

fn without_moves(log: &Log) -> Vec<Event> {
    log.borrow()
        .iter()
        .filter(|e| !matches!(e, Event::Moved(_)))
        .cloned()
        .collect()
}

fn completion(log: &Log, name: &'static str) -> Option<Box<dyn FnOnce()>> {
    let log = log.clone();
    Some(Box::new(move || log.borrow_mut().push(Event::Completed(name))))
}

#[test]
fn attach_rests_at_initial_position() {
    let (panel, _) = attach();
    assert!(panel.is_attached());
    assert_eq!(panel.state(), PanelState::Docked(Position::Half));
    assert_eq!(panel.surface_y(), 516.0);
    assert_eq!(panel.origin_y_of_surface(Position::Full), 62.0);
    assert_eq!(panel.origin_y_of_surface(Position::Tip), 709.0);
    assert_eq!(panel.surface_frame().y0, 516.0);
    assert_eq!(panel.backdrop_frame().height(), 812.0);
    assert_eq!(panel.adjusted_content_insets(), Insets::new(0.0, 0.0, 0.0, 34.0));
    assert_eq!(panel.container_kind(), Some(ContainerKind::Plain));
}

#[test]
fn attach_below_sibling_records_insertion() {
    let mut panel = FloatingPanel::new();
    panel.add_panel(phone(), Insertion::Below(ViewId(7)), false);
    assert_eq!(panel.insertion(), Some(Insertion::Below(ViewId(7))));
}

#[test]
fn second_attach_is_ignored() {
    let (mut panel, log) = attach();
    panel.move_to(Position::Tip, false, None);
    panel.add_panel(phone(), Insertion::Front, false);
    assert_eq!(panel.state(), PanelState::Docked(Position::Tip));
    assert_eq!(log.borrow().last(), Some(&Event::Moved(709.0)));
}

#[test]
#[should_panic(expected = "cannot attach a floating panel")]
fn navigation_container_is_rejected() {
    let mut panel = FloatingPanel::new();
    let mut container = phone();
    container.kind = ContainerKind::Navigation;
    panel.add_panel(container, Insertion::Front, false);
}

#[test]
fn moving_to_current_position_is_idempotent() {
    let (mut panel, _) = attach();
    panel.move_to(Position::Half, false, None);
    let frame = panel.surface_frame();
    panel.move_to(Position::Half, false, None);
    assert_eq!(panel.surface_frame(), frame);
    assert_eq!(panel.state(), PanelState::Docked(Position::Half));
}

#[test]
#[should_panic(expected = "cannot move to Half")]
fn moving_to_unsupported_position_panics() {
    let recorder = Recorder {
        landscape_layout: Some(landscape),
        ..Recorder::default()
    };
    let (mut panel, _) = attach_with(PanelOptions::default(), recorder);
    panel.set_traits(TraitCollection::LANDSCAPE);
    panel.move_to(Position::Half, false, None);
}

#[test]
fn animated_move_commits_then_completes() {
    let (mut panel, log) = attach();
    panel.move_to(Position::Full, true, completion(&log, "move"));
    assert!(panel.is_animating());
    panel.tick(0.1);
    assert_eq!(panel.state(), PanelState::Docked(Position::Half));

    settle(&mut panel);
    assert_eq!(panel.state(), PanelState::Docked(Position::Full));
    let events = log.borrow();
    let n = events.len();
    assert_eq!(events[n - 2], Event::Moved(62.0));
    assert_eq!(events[n - 1], Event::Completed("move"));
}

#[test]
fn slow_release_at_bottom_rests_at_tip() {
    let (mut panel, log) = attach();
    panel.move_to(Position::Tip, false, None);
    log.borrow_mut().clear();

    panel.pointer_down(Point::new(100.0, 720.0), 0.0, PanSource::Surface);
    panel.pointer_moved(Point::new(100.0, 710.0), 0.01);
    panel.pointer_moved(Point::new(100.0, 720.0), 0.02);
    assert!(panel.is_dragging());
    assert_eq!(panel.surface_y(), 709.0);
    panel.pointer_up(Point::new(100.0, 720.0), 0.5);
    settle(&mut panel);

    assert_eq!(panel.state(), PanelState::Docked(Position::Tip));
    assert_eq!(
        without_moves(&log),
        [
            Event::WillBeginDragging,
            Event::WillBeginDecelerating,
            Event::DidEndDragging(Position::Tip),
            Event::DidEndDecelerating,
        ]
    );
}

#[test]
fn taps_below_threshold_do_not_drag() {
    let (mut panel, log) = attach();
    panel.pointer_down(Point::new(100.0, 530.0), 0.0, PanSource::Surface);
    panel.pointer_moved(Point::new(100.0, 532.0), 0.05);
    panel.pointer_up(Point::new(100.0, 532.0), 0.1);
    assert_eq!(panel.surface_y(), 516.0);
    assert!(log.borrow().is_empty());
}

#[test]
fn fast_downward_release_above_tip_heads_to_tip() {
    let (mut panel, log) = attach();
    panel.pointer_down(Point::new(100.0, 600.0), 0.0, PanSource::Surface);
    panel.pointer_moved(Point::new(100.0, 763.0), 0.1);
    panel.pointer_moved(Point::new(100.0, 773.0), 0.2);
    assert_eq!(panel.surface_y(), 689.0);
    panel.pointer_up(Point::new(100.0, 773.0), 0.2);

    assert!(without_moves(&log).contains(&Event::DidEndDragging(Position::Tip)));
    settle(&mut panel);
    assert_eq!(panel.state(), PanelState::Docked(Position::Tip));
    assert_eq!(panel.surface_y(), 709.0);
}

#[test]
fn drag_is_clamped_to_interaction_buffers() {
    let (mut panel, _) = attach();
    panel.pointer_down(Point::new(100.0, 530.0), 0.0, PanSource::Surface);
    panel.pointer_moved(Point::new(100.0, -500.0), 0.1);
    assert_eq!(panel.surface_y(), 56.0);
    panel.pointer_moved(Point::new(100.0, 2000.0), 0.2);
    assert_eq!(panel.surface_y(), 715.0);
    panel.pointer_cancelled();
    settle(&mut panel);
    assert_eq!(panel.state(), PanelState::Docked(Position::Tip));
}

fn drag_below_tip(panel: &mut FloatingPanel, seconds: f64) {
    panel.move_to(Position::Tip, false, None);
    panel.pointer_down(Point::new(100.0, 720.0), 0.0, PanSource::Surface);
    panel.pointer_moved(Point::new(100.0, 726.0), seconds);
    assert_eq!(panel.surface_y(), 715.0);
    panel.pointer_up(Point::new(100.0, 726.0), seconds);
}

#[test]
fn fast_release_below_tip_removes_when_enabled() {
    let options = PanelOptions {
        removal_interaction_enabled: true,
        ..PanelOptions::default()
    };
    let (mut panel, log) = attach_with(options, Recorder::default());
    drag_below_tip(&mut panel, 0.1);
    assert!(matches!(
        without_moves(&log).last(),
        Some(Event::DidEndDraggingToRemove(v)) if v.y >= 10.0
    ));
    assert!(panel.is_attached());

    // Removal animations ignore new pointers.
    panel.pointer_down(Point::new(100.0, 730.0), 0.2, PanSource::Surface);
    assert!(panel.is_animating());

    settle(&mut panel);
    assert_eq!(panel.state(), PanelState::Off);
    assert!(!panel.is_attached());
    assert_eq!(panel.surface_y(), 812.0);
    assert_eq!(without_moves(&log).last(), Some(&Event::DidEndRemove));
}

#[test]
fn slow_release_below_tip_snaps_back() {
    let options = PanelOptions {
        removal_interaction_enabled: true,
        ..PanelOptions::default()
    };
    let (mut panel, log) = attach_with(options, Recorder::default());
    drag_below_tip(&mut panel, 1.0);
    settle(&mut panel);
    assert_eq!(panel.state(), PanelState::Docked(Position::Tip));
    assert!(panel.is_attached());
    assert!(!without_moves(&log).contains(&Event::DidEndRemove));
}

#[test]
fn removal_gesture_is_off_by_default() {
    let (mut panel, _) = attach();
    drag_below_tip(&mut panel, 0.1);
    settle(&mut panel);
    assert_eq!(panel.state(), PanelState::Docked(Position::Tip));
}

#[test]
fn pointer_down_interrupts_settle_without_commit() {
    let (mut panel, log) = attach();
    panel.pointer_down(Point::new(100.0, 530.0), 0.0, PanSource::Surface);
    panel.pointer_moved(Point::new(100.0, 230.0), 0.1);
    panel.pointer_up(Point::new(100.0, 230.0), 0.4);
    panel.tick(1.0 / 60.0);
    let mid = panel.surface_y();
    assert!(mid < 216.0 && mid > 62.0, "mid-flight at {mid}");

    panel.pointer_down(Point::new(100.0, 300.0), 0.5, PanSource::Surface);
    assert!(!panel.is_animating());
    assert_eq!(panel.surface_y(), mid);
    assert_eq!(panel.state(), PanelState::Docked(Position::Half));
    assert_eq!(without_moves(&log).last(), Some(&Event::DidEndDecelerating));

    // Releasing without moving settles from where the surface stopped.
    panel.pointer_up(Point::new(100.0, 300.0), 0.6);
    settle(&mut panel);
    assert_eq!(panel.state(), PanelState::Docked(Position::Full));
}

fn tracked(log: &Log) -> TrackedScroll {
    TrackedScroll::new(2000.0, 600.0).with_delegate(Box::new(ScrollRecorder { log: log.clone() }))
}

#[test]
fn upward_scroll_drag_moves_panel_then_content() {
    let (mut panel, log) = attach();
    panel.track_scroll_view(tracked(&log));
    assert!(!panel.tracked_scroll().is_some_and(TrackedScroll::has_delegate));

    panel.pointer_down(Point::new(100.0, 700.0), 0.0, PanSource::Scroll);
    panel.pointer_moved(Point::new(100.0, 200.0), 0.1);
    assert_eq!(panel.surface_y(), 62.0);
    let scroll = panel.tracked_scroll().map(TrackedScroll::content_offset);
    assert_eq!(scroll, Some(46.0));

    // At the top, a downward drag scrolls the content first ...
    panel.pointer_moved(Point::new(100.0, 220.0), 0.2);
    assert_eq!(panel.surface_y(), 62.0);
    assert_eq!(panel.tracked_scroll().map(TrackedScroll::content_offset), Some(26.0));

    // ... and pulls the panel once the content reaches its top edge.
    panel.pointer_moved(Point::new(100.0, 260.0), 0.3);
    assert_eq!(panel.tracked_scroll().map(TrackedScroll::content_offset), Some(0.0));
    assert_eq!(panel.surface_y(), 76.0);

    panel.pointer_up(Point::new(100.0, 260.0), 0.6);
    settle(&mut panel);
    assert_eq!(panel.state(), PanelState::Docked(Position::Full));

    let events = without_moves(&log);
    assert_eq!(events[0], Event::ScrollWillBeginDragging);
    assert_eq!(events[1], Event::WillBeginDragging);
    assert!(events.contains(&Event::DidScroll(46.0)));
    assert!(events.contains(&Event::DidScroll(0.0)));
    assert!(events.contains(&Event::ScrollDidEndDragging));
}

#[test]
fn content_stays_pinned_while_panel_is_below_top() {
    let (mut panel, _) = attach();
    panel.track_scroll_view(TrackedScroll::new(2000.0, 600.0));
    panel.pointer_down(Point::new(100.0, 700.0), 0.0, PanSource::Scroll);
    panel.pointer_moved(Point::new(100.0, 600.0), 0.1);
    panel.pointer_moved(Point::new(100.0, 650.0), 0.2);
    assert_eq!(panel.surface_y(), 466.0);
    assert_eq!(panel.tracked_scroll().map(TrackedScroll::content_offset), Some(0.0));
}

#[test]
fn untracking_restores_scroll_delegate() {
    let (mut panel, log) = attach();
    panel.track_scroll_view(tracked(&log));
    panel.scroll_to(100.0);
    assert_eq!(without_moves(&log), [Event::DidScroll(100.0)]);

    let scroll = panel.untrack_scroll_view();
    assert!(scroll.is_some_and(|s| s.has_delegate()));
    assert!(panel.tracked_scroll().is_none());
}

#[test]
fn content_insets_follow_safe_area() {
    let (mut panel, _) = attach();
    panel.track_scroll_view(TrackedScroll::new(2000.0, 600.0));
    let scroll = panel.tracked_scroll().map(|s| (s.content_inset(), s.automatic_inset_adjustment()));
    assert_eq!(scroll, Some((Insets::new(0.0, 0.0, 0.0, 34.0), false)));

    panel.set_safe_area(Insets::new(0.0, 44.0, 0.0, 20.0));
    assert_eq!(
        panel.tracked_scroll().map(TrackedScroll::indicator_inset),
        Some(Insets::new(0.0, 0.0, 0.0, 20.0))
    );
    // The resting surface follows the new safe area.
    assert_eq!(panel.surface_y(), 530.0);
}

#[test]
fn never_adjustment_leaves_scroll_insets_alone() {
    let options = PanelOptions {
        content_inset_adjustment: ContentInsetAdjustment::Never,
        ..PanelOptions::default()
    };
    let (mut panel, _) = attach_with(options, Recorder::default());
    panel.track_scroll_view(TrackedScroll::new(2000.0, 600.0));
    let scroll = panel.tracked_scroll().map(|s| (s.content_inset(), s.automatic_inset_adjustment()));
    assert_eq!(scroll, Some((Insets::ZERO, true)));
}

#[test]
fn trait_change_falls_back_to_new_initial_position() {
    let recorder = Recorder {
        landscape_layout: Some(landscape),
        ..Recorder::default()
    };
    let (mut panel, _) = attach_with(PanelOptions::default(), recorder);
    assert!(!panel.is_backdrop_hidden());

    panel.set_traits(TraitCollection::LANDSCAPE);
    assert_eq!(panel.state(), PanelState::Docked(Position::Tip));
    assert_eq!(
        panel.layout_adapter().layout().supported_positions(),
        PositionSet::FULL | PositionSet::TIP
    );
    assert!(panel.is_backdrop_hidden());
    assert_eq!(panel.backdrop_alpha(), 0.0);

    // Tip is still supported going back, so the panel stays there.
    panel.set_traits(TraitCollection::PORTRAIT);
    assert_eq!(panel.state(), PanelState::Docked(Position::Tip));
}

struct Upside;

impl PanelLayout for Upside {
    fn initial_position(&self) -> Position {
        Position::Half
    }

    fn inset_for(&self, position: Position) -> Option<f64> {
        Some(match position {
            Position::Full => 18.0,
            Position::Half => 60.0,
            Position::Tip => 200.0,
        })
    }
}

fn upside_down() -> Box<dyn PanelLayout> {
    Box::new(Upside)
}

#[test]
#[should_panic(expected = "invalid floating panel layout")]
fn trait_change_validates_layout() {
    let recorder = Recorder {
        landscape_layout: Some(upside_down),
        ..Recorder::default()
    };
    let (mut panel, _) = attach_with(PanelOptions::default(), recorder);
    panel.set_traits(TraitCollection::LANDSCAPE);
}

#[test]
fn backdrop_alpha_tracks_surface() {
    let (mut panel, _) = attach();
    assert_eq!(panel.backdrop_alpha(), 0.0);
    panel.move_to(Position::Full, false, None);
    assert_eq!(panel.backdrop_alpha(), 0.3);

    panel.pointer_down(Point::new(100.0, 70.0), 0.0, PanSource::Surface);
    panel.pointer_moved(Point::new(100.0, 297.0), 0.1);
    assert_eq!(panel.surface_y(), 289.0);
    assert!((panel.backdrop_alpha() - 0.15).abs() < 1e-9);
}

#[test]
fn animated_removal_detaches_then_completes() {
    let (mut panel, log) = attach();
    panel.remove_panel_from_parent(true, completion(&log, "removed"));
    assert!(panel.is_attached());

    // Safe-area updates stop applying once removal starts.
    panel.set_safe_area(Insets::ZERO);
    assert_eq!(panel.adjusted_content_insets(), Insets::new(0.0, 0.0, 0.0, 34.0));

    // Programmatic moves during removal only run their completion.
    panel.move_to(Position::Full, true, completion(&log, "move"));
    assert_eq!(without_moves(&log), [Event::Completed("move")]);

    settle(&mut panel);
    assert!(!panel.is_attached());
    assert_eq!(panel.state(), PanelState::Off);
    assert_eq!(without_moves(&log).last(), Some(&Event::Completed("removed")));

    // Reattaching works after a removal.
    panel.add_panel(phone(), Insertion::Front, false);
    assert_eq!(panel.state(), PanelState::Docked(Position::Half));
}

#[test]
fn removal_when_detached_completes_immediately() {
    let log = Log::default();
    let mut panel = FloatingPanel::new();
    panel.remove_panel_from_parent(true, completion(&log, "noop"));
    assert_eq!(*log.borrow(), [Event::Completed("noop")]);
}

#[test]
fn content_replacement_runs_hooks_in_order() {
    let (mut panel, log) = attach();
    panel.set_content(Some(Box::new(Content {
        name: "first",
        log: log.clone(),
    })));
    let previous = panel.set_content(Some(Box::new(Content {
        name: "second",
        log: log.clone(),
    })));
    assert!(previous.is_some());
    assert!(panel.content().is_some());
    assert_eq!(
        *log.borrow(),
        [
            Event::ContentAttached("first"),
            Event::ContentDetached("first"),
            Event::ContentAttached("second"),
        ]
    );
}

#[test]
fn custom_behavior_is_resolved_per_traits() {
    struct Stiff;

    impl PanelBehavior for Stiff {
        fn interaction_animator(&self, _target: Position, _velocity: Vec2) -> Animator {
            Animator::new(Timing::ease_in_out(0.04))
        }
    }

    struct Custom;

    impl PanelDelegate for Custom {
        fn behavior_for(&mut self, _traits: &TraitCollection) -> Option<Box<dyn PanelBehavior>> {
            Some(Box::new(Stiff))
        }
    }

    let mut panel = FloatingPanel::new();
    panel.set_delegate(Box::new(Custom));
    panel.add_panel(phone(), Insertion::Front, false);
    panel.pointer_down(Point::new(100.0, 530.0), 0.0, PanSource::Surface);
    panel.pointer_moved(Point::new(100.0, 560.0), 0.1);
    panel.pointer_up(Point::new(100.0, 560.0), 0.5);

    // 40 ms at 60 fps settles on the third frame.
    assert!(panel.tick(1.0 / 60.0));
    assert!(panel.tick(1.0 / 60.0));
    assert!(!panel.tick(1.0 / 60.0));
    assert_eq!(panel.state(), PanelState::Docked(Position::Half));
}

/// Flings up from Tip and ticks until the surface is about to reach Full.
fn fling_up_from_tip(panel: &mut FloatingPanel) {
    panel.move_to(Position::Tip, false, None);
    panel.pointer_down(Point::new(100.0, 720.0), 0.0, PanSource::Surface);
    panel.pointer_moved(Point::new(100.0, 696.0), 0.01);
    panel.pointer_moved(Point::new(100.0, 672.0), 0.02);
    panel.pointer_up(Point::new(100.0, 672.0), 0.02);

    let mut frames = 0;
    while panel.surface_y() > 70.0 {
        assert!(panel.tick(1.0 / 60.0), "settled before reaching Full");
        frames += 1;
        assert!(frames < 1_000, "never approached Full");
    }
}

fn min_y_until_settled(panel: &mut FloatingPanel) -> f64 {
    let mut min_y = panel.surface_y();
    let mut frames = 0;
    while panel.tick(1.0 / 60.0) {
        min_y = min_y.min(panel.surface_y());
        frames += 1;
        assert!(frames < 1_000, "animation never settled");
    }
    min_y
}

#[test]
fn safe_area_change_mid_settle_keeps_momentum() {
    let (mut baseline, _) = attach();
    fling_up_from_tip(&mut baseline);
    let baseline_min = min_y_until_settled(&mut baseline);
    assert!(baseline_min < 62.0, "fling should overshoot Full");

    let (mut panel, _) = attach();
    fling_up_from_tip(&mut panel);
    panel.set_safe_area(Insets::new(0.0, 45.0, 0.0, 34.0));
    assert!(panel.is_animating());

    // Moving the target by one unit must not relaunch the fling.
    let min_y = min_y_until_settled(&mut panel);
    assert!(
        min_y >= baseline_min - 1.0,
        "overshot to {min_y}, undisturbed overshoot {baseline_min}"
    );
    assert_eq!(panel.state(), PanelState::Docked(Position::Full));
    assert_eq!(panel.surface_y(), 63.0);
}

#[test]
fn untracking_mid_drag_settles_the_panel() {
    let (mut panel, log) = attach();
    panel.track_scroll_view(tracked(&log));
    panel.pointer_down(Point::new(100.0, 700.0), 0.0, PanSource::Scroll);
    panel.pointer_moved(Point::new(100.0, 580.0), 0.1);
    assert_eq!(panel.surface_y(), 396.0);

    let scroll = panel.untrack_scroll_view();
    assert!(scroll.is_some_and(|s| s.has_delegate()));
    assert!(!panel.is_dragging());
    assert!(panel.is_animating());

    // The release no longer belongs to a gesture.
    panel.pointer_up(Point::new(100.0, 580.0), 0.2);
    settle(&mut panel);
    assert_eq!(panel.state(), PanelState::Docked(Position::Half));
    assert_eq!(panel.surface_y(), 516.0);
    assert_eq!(
        without_moves(&log),
        [
            Event::ScrollWillBeginDragging,
            Event::WillBeginDragging,
            Event::WillBeginDecelerating,
            Event::DidEndDragging(Position::Half),
            Event::ScrollDidEndDragging,
            Event::DidEndDecelerating,
        ]
    );
}

#[test]
fn container_resize_at_rest_moves_surface() {
    let (mut panel, log) = attach();
    panel.set_container_size(Size::new(375.0, 700.0));
    assert_eq!(panel.surface_y(), 404.0);
    assert_eq!(panel.origin_y_of_surface(Position::Tip), 597.0);
    assert_eq!(panel.backdrop_frame().height(), 700.0);
    assert_eq!(*log.borrow(), [Event::Moved(404.0)]);
}

#[test]
fn container_resize_mid_move_lands_on_new_target() {
    let (mut panel, log) = attach();
    panel.move_to(Position::Tip, true, completion(&log, "move"));
    panel.tick(0.1);
    assert!(panel.is_animating());

    panel.set_container_size(Size::new(375.0, 700.0));
    assert!(panel.is_animating());
    settle(&mut panel);
    assert_eq!(panel.state(), PanelState::Docked(Position::Tip));
    assert_eq!(panel.surface_y(), 597.0);
    assert_eq!(without_moves(&log), [Event::Completed("move")]);
}

#[test]
fn inconsistent_resize_keeps_panel_attached() {
    let (mut panel, _) = attach();
    // Half would sit above Full.
    panel.set_container_size(Size::new(375.0, 200.0));
    assert!(panel.is_attached());
    assert!(panel.layout_adapter().check_consistency().is_err());
    assert_eq!(panel.state(), PanelState::Docked(Position::Half));
    assert_eq!(panel.surface_y(), panel.origin_y_of_surface(Position::Half));
}

#[test]
fn zero_tick_does_not_report_movement() {
    let (mut panel, log) = attach();
    panel.move_to(Position::Full, true, None);
    assert!(panel.tick(0.0));
    assert!(log.borrow().is_empty());

    panel.tick(1.0 / 60.0);
    assert!(matches!(log.borrow().last(), Some(Event::Moved(_))));
}

#[test]
fn interrupted_presentation_commits_and_reports() {
    let log = Log::default();
    let mut panel = FloatingPanel::new();
    panel.set_delegate(Box::new(Recorder {
        log: log.clone(),
        ..Recorder::default()
    }));
    panel.add_panel(phone(), Insertion::Front, true);
    panel.tick(1.0 / 60.0);
    log.borrow_mut().clear();

    let y = panel.surface_y();
    panel.pointer_down(Point::new(100.0, y + 10.0), 0.1, PanSource::Surface);
    assert!(!panel.is_animating());
    assert_eq!(panel.state(), PanelState::Docked(Position::Half));
    assert_eq!(*log.borrow(), [Event::Moved(y)]);
}
