//! Sticky header that hides while scrolling down and comes back on the
//! way up.

use crate::models::{HeaderPhase, HeaderState};
use crate::page::{NodeId, Page};
use tracing::debug;

pub const SCROLL_DOWN_CLASS: &str = "scroll-down";
pub const SCROLL_UP_CLASS: &str = "scroll-up";
pub const SCROLLED_CLASS: &str = "scrolled";

/// Per-session header state. Direction is decided from the raw delta to
/// the previous sample; there is no smoothing.
#[derive(Debug, Clone, Default)]
pub struct HeaderTracker {
    last_offset: f64,
    state: HeaderState,
    scrolled_threshold: f64,
}

impl HeaderTracker {
    pub fn new(scrolled_threshold: f64) -> Self {
        Self {
            scrolled_threshold,
            ..Self::default()
        }
    }

    pub fn state(&self) -> HeaderState {
        self.state
    }

    pub fn last_offset(&self) -> f64 {
        self.last_offset
    }

    /// Feeds one scroll sample and returns the resulting state.
    pub fn observe(&mut self, offset: f64) -> HeaderState {
        let previous = self.state;

        if offset <= 0.0 {
            self.state = HeaderState {
                phase: HeaderPhase::AtTop,
                scrolled: false,
            };
        } else {
            let phase = self.state.phase;
            if offset > self.last_offset && phase != HeaderPhase::ScrollingDown {
                self.state.phase = HeaderPhase::ScrollingDown;
            } else if offset < self.last_offset && phase == HeaderPhase::ScrollingDown {
                self.state.phase = HeaderPhase::ScrollingUp;
            }
            self.state.scrolled = offset > self.scrolled_threshold;
        }

        if self.state != previous {
            debug!(offset, from = ?previous, to = ?self.state, "header state changed");
        }
        self.last_offset = offset;
        self.state
    }
}

/// Mirrors `state` onto the header's class list.
pub fn apply_header(page: &dyn Page, header: NodeId, state: HeaderState) {
    page.set_class(
        header,
        SCROLL_DOWN_CLASS,
        state.phase == HeaderPhase::ScrollingDown,
    );
    page.set_class(header, SCROLL_UP_CLASS, state.phase == HeaderPhase::ScrollingUp);
    page.set_class(header, SCROLLED_CLASS, state.scrolled);
}
