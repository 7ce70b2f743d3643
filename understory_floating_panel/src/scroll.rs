// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless model of the scroll view embedded in the panel.

use alloc::boxed::Box;
use core::fmt;

use kurbo::Insets;

use crate::delegate::ScrollDelegate;

/// Vertical scroll state of the panel's content.
///
/// Offsets follow the usual convention: `0` shows the first row directly below
/// the top content inset, and the offset grows as content scrolls up.
pub struct TrackedScroll {
    content_offset: f64,
    content_height: f64,
    viewport_height: f64,
    content_inset: Insets,
    indicator_inset: Insets,
    automatic_inset_adjustment: bool,
    delegate: Option<Box<dyn ScrollDelegate>>,
}

impl fmt::Debug for TrackedScroll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedScroll")
            .field("content_offset", &self.content_offset)
            .field("content_height", &self.content_height)
            .field("viewport_height", &self.viewport_height)
            .field("content_inset", &self.content_inset)
            .field("indicator_inset", &self.indicator_inset)
            .field("automatic_inset_adjustment", &self.automatic_inset_adjustment)
            .field("has_delegate", &self.delegate.is_some())
            .finish()
    }
}

impl TrackedScroll {
    /// Creates a scroll at its top edge.
    #[must_use]
    pub fn new(content_height: f64, viewport_height: f64) -> Self {
        Self {
            content_offset: 0.0,
            content_height: content_height.max(0.0),
            viewport_height: viewport_height.max(0.0),
            content_inset: Insets::ZERO,
            indicator_inset: Insets::ZERO,
            automatic_inset_adjustment: true,
            delegate: None,
        }
    }

    /// Installs the host's own scroll delegate.
    #[must_use]
    pub fn with_delegate(mut self, delegate: Box<dyn ScrollDelegate>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// Current content offset.
    #[must_use]
    pub fn content_offset(&self) -> f64 {
        self.content_offset
    }

    /// Sets the content offset, clamped to the scrollable range.
    pub fn set_content_offset(&mut self, offset: f64) {
        self.content_offset = offset.clamp(self.min_offset(), self.max_offset());
    }

    /// Height of the content.
    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    /// Sets the content height, re-clamping the offset.
    pub fn set_content_height(&mut self, height: f64) {
        self.content_height = height.max(0.0);
        self.set_content_offset(self.content_offset);
    }

    /// Height of the visible viewport.
    #[must_use]
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Sets the viewport height, re-clamping the offset.
    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height.max(0.0);
        self.set_content_offset(self.content_offset);
    }

    /// Content insets.
    #[must_use]
    pub fn content_inset(&self) -> Insets {
        self.content_inset
    }

    /// Sets the content insets, re-clamping the offset.
    pub fn set_content_inset(&mut self, inset: Insets) {
        self.content_inset = inset;
        self.set_content_offset(self.content_offset);
    }

    /// Scroll indicator insets.
    #[must_use]
    pub fn indicator_inset(&self) -> Insets {
        self.indicator_inset
    }

    /// Sets the scroll indicator insets.
    pub fn set_indicator_inset(&mut self, inset: Insets) {
        self.indicator_inset = inset;
    }

    /// Whether the scroll adjusts its own insets for the safe area.
    #[must_use]
    pub fn automatic_inset_adjustment(&self) -> bool {
        self.automatic_inset_adjustment
    }

    /// Enables or disables automatic inset adjustment.
    pub fn set_automatic_inset_adjustment(&mut self, enabled: bool) {
        self.automatic_inset_adjustment = enabled;
    }

    /// Smallest offset: the top edge of the content.
    #[must_use]
    pub fn min_offset(&self) -> f64 {
        -self.content_inset.y0
    }

    /// Largest offset: the bottom edge of the content.
    #[must_use]
    pub fn max_offset(&self) -> f64 {
        let bottom = self.content_height + self.content_inset.y1 - self.viewport_height;
        bottom.max(self.min_offset())
    }

    /// Returns `true` when the content is scrolled to its top edge.
    #[must_use]
    pub fn is_at_top(&self) -> bool {
        self.content_offset <= self.min_offset() + 1e-6
    }

    /// Scrolls by `delta` within range and returns the part that did not fit.
    pub fn scroll_by(&mut self, delta: f64) -> f64 {
        let target = self.content_offset + delta;
        self.set_content_offset(target);
        target - self.content_offset
    }

    pub(crate) fn take_delegate(&mut self) -> Option<Box<dyn ScrollDelegate>> {
        self.delegate.take()
    }

    pub(crate) fn restore_delegate(&mut self, delegate: Option<Box<dyn ScrollDelegate>>) {
        self.delegate = delegate;
    }

    /// Returns `true` when a host delegate is installed on this scroll.
    #[must_use]
    pub fn has_delegate(&self) -> bool {
        self.delegate.is_some()
    }
}
