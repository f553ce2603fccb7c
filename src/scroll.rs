use crate::constants::{BOTTOM_PROXIMITY_PX, SCROLL_TOP_THRESHOLD_PX};

/// Viewport geometry reported by the host on each scroll event, in pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollPosition {
    /// Distance scrolled from the top of the content.
    pub offset: f64,
    /// Height of the viewport.
    pub viewport: f64,
    /// Total height of the content.
    pub content: f64,
}

// Live only while auto mode is active; detached triggers ignore events.
#[derive(Debug, Default)]
pub(crate) struct ScrollTrigger {
    active: bool,
    past_threshold: bool,
}

impl ScrollTrigger {
    pub(crate) fn attach(&mut self) {
        self.active = true;
    }

    pub(crate) fn detach(&mut self) {
        self.active = false;
        self.past_threshold = false;
    }

    pub(crate) fn is_past_threshold(&self) -> bool {
        self.past_threshold
    }

    /// Returns true when the viewport bottom is close enough to the content
    /// bottom to warrant the next page.
    pub(crate) fn observe(&mut self, position: ScrollPosition) -> bool {
        if !self.active {
            return false;
        }
        self.past_threshold = position.offset > SCROLL_TOP_THRESHOLD_PX;
        position.content - (position.offset + position.viewport) <= BOTTOM_PROXIMITY_PX
    }

    pub(crate) fn reset_top(&mut self) {
        self.past_threshold = false;
    }
}
