use serde::{Deserialize, Serialize};

/// Fixed-height layout constants for a virtualized list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowLayout {
    pub container_height: f64,
    pub item_height: f64,
    /// Extra rows rendered on each side of the visible range
    pub overscan: usize,
}

impl WindowLayout {
    pub fn new(container_height: f64, item_height: f64, overscan: usize) -> Self {
        Self {
            container_height,
            item_height,
            overscan,
        }
    }

    fn is_renderable(&self) -> bool {
        self.item_height.is_finite() && self.item_height > 0.0
    }

    /// Rows needed to fill the container
    pub fn visible_count(&self) -> usize {
        if !self.is_renderable() || !(self.container_height > 0.0) {
            return 0;
        }
        (self.container_height / self.item_height).ceil() as usize
    }

    /// Index of the row under a scroll offset (not clamped to a list length)
    pub fn index_at(&self, scroll_offset: f64) -> usize {
        if !self.is_renderable() || !(scroll_offset > 0.0) {
            return 0;
        }
        (scroll_offset / self.item_height).floor() as usize
    }

    /// Scroll offset that puts `index` at the top of the container
    pub fn offset_of(&self, index: usize) -> f64 {
        if !self.is_renderable() {
            return 0.0;
        }
        index as f64 * self.item_height
    }
}

/// Renderable slice handed to the drawing layer every scroll frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VirtualWindow {
    pub start_index: usize,
    /// Exclusive
    pub end_index: usize,
    pub total_height: f64,
    pub render_offset: f64,
}

impl VirtualWindow {
    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start_index..self.end_index
    }
}

/// Compute the rows to render for one scroll position.
///
/// Constant time: depends only on the count and layout, never on the items
/// themselves. Offsets are clamped to the last full screen, so the window
/// ends at the final row and does not jump as the offset crosses the end.
pub fn compute_window(item_count: usize, layout: WindowLayout, scroll_offset: f64) -> VirtualWindow {
    if item_count == 0 || !layout.is_renderable() {
        return VirtualWindow::default();
    }

    let total_height = item_count as f64 * layout.item_height;
    let max_offset = (total_height - layout.container_height.max(0.0)).max(0.0);
    let scroll_offset = if scroll_offset > 0.0 {
        scroll_offset.min(max_offset)
    } else {
        0.0
    };

    let span = layout
        .visible_count()
        .saturating_add(layout.overscan.saturating_mul(2));
    let start_index = layout
        .index_at(scroll_offset)
        .saturating_sub(layout.overscan)
        .min(item_count.saturating_sub(1));
    let end_index = item_count.min(start_index.saturating_add(span));

    VirtualWindow {
        start_index,
        end_index,
        total_height,
        render_offset: layout.offset_of(start_index),
    }
}
