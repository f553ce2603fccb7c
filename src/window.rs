use crate::constants::{MIN_VISIBLE, WINDOW_STEP};

// How many leading rows of the ordered view manual mode shows. Steps by 5,
// floored at 5, capped at the cached collection size.
#[derive(Debug, Clone, Copy)]
pub(crate) struct VisibleWindow {
    visible: usize,
}

impl Default for VisibleWindow {
    fn default() -> Self {
        Self {
            visible: MIN_VISIBLE,
        }
    }
}

impl VisibleWindow {
    pub(crate) fn visible(&self) -> usize {
        self.visible
    }

    pub(crate) fn grow(&mut self, len: usize) {
        self.visible = (self.visible + WINDOW_STEP).min(len).max(MIN_VISIBLE);
    }

    pub(crate) fn shrink(&mut self) {
        self.visible = self.visible.saturating_sub(WINDOW_STEP).max(MIN_VISIBLE);
    }
}
