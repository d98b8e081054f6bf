//! Where the dialogue box and its choice rows sit, for pointer hit-testing.

use tm_core::Rect;

/// Dialogue box width.
pub const BOX_WIDTH: f32 = 600.0;
/// Dialogue box height.
pub const BOX_HEIGHT: f32 = 200.0;
/// Height of one choice row.
pub const ROW_HEIGHT: f32 = 25.0;
/// Distance from the box bottom to the first choice row.
pub const ROWS_OFFSET: f32 = 80.0;
/// Inner margin of the box.
pub const MARGIN: f32 = 20.0;

/// Geometry of the dialogue box, centered in the drawable area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialogueLayout {
    frame: Rect,
}

impl DialogueLayout {
    /// Lay the box out inside a `width` x `height` area.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            frame: Rect::new(
                (width - BOX_WIDTH) / 2.0,
                (height - BOX_HEIGHT) / 2.0,
                BOX_WIDTH,
                BOX_HEIGHT,
            ),
        }
    }

    /// The whole box.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// The area above the choice rows, for the node text.
    pub fn text_area(&self) -> Rect {
        let inner = self.frame.inset(MARGIN);
        Rect::new(
            inner.x,
            inner.y,
            inner.width,
            (BOX_HEIGHT - ROWS_OFFSET - MARGIN * 2.0).max(0.0),
        )
    }

    /// The row of the visible choice at `index`.
    pub fn choice_rect(&self, index: usize) -> Rect {
        Rect::new(
            self.frame.x + MARGIN,
            self.frame.bottom() - ROWS_OFFSET + index as f32 * ROW_HEIGHT,
            BOX_WIDTH - MARGIN * 2.0,
            ROW_HEIGHT,
        )
    }

    /// Rows for `count` visible choices.
    pub fn choice_regions(&self, count: usize) -> Vec<Rect> {
        (0..count).map(|i| self.choice_rect(i)).collect()
    }

    /// The visible choice under a point, if any.
    pub fn hit_test(&self, x: f32, y: f32, count: usize) -> Option<usize> {
        (0..count).find(|&i| self.choice_rect(i).contains(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_is_centered() {
        let layout = DialogueLayout::new(1024.0, 768.0);
        assert_eq!(layout.frame(), Rect::new(212.0, 284.0, 600.0, 200.0));
    }

    #[test]
    fn rows_stack_from_offset() {
        let layout = DialogueLayout::new(1024.0, 768.0);
        assert_eq!(layout.choice_rect(0), Rect::new(232.0, 404.0, 560.0, 25.0));
        assert_eq!(layout.choice_rect(1).y, 429.0);
        assert_eq!(layout.choice_regions(3).len(), 3);
    }

    #[test]
    fn hit_test_rows() {
        let layout = DialogueLayout::new(1024.0, 768.0);
        assert_eq!(layout.hit_test(300.0, 410.0, 2), Some(0));
        assert_eq!(layout.hit_test(300.0, 440.0, 2), Some(1));
        assert_eq!(layout.hit_test(300.0, 440.0, 1), None);
        assert_eq!(layout.hit_test(100.0, 410.0, 2), None);
    }
}
