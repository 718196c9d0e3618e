/// The vertical window of rows a list-like widget shows.
///
/// `offset` is the first visible row; it is clamped so the window never scrolls past the end
/// of the content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowViewport {
    offset: usize,
    height: usize,
    len: usize,
}

impl RowViewport {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height;
        self.clamp();
    }

    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.clamp();
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.offset = self.offset.saturating_add_signed(delta);
        self.clamp();
    }

    pub fn to_top(&mut self) {
        self.offset = 0;
    }

    /// Scrolls the minimum amount needed for `row` to be inside the window.
    pub fn ensure_visible(&mut self, row: usize) {
        if self.height == 0 {
            return;
        }
        if row < self.offset {
            self.offset = row;
        } else if row >= self.offset + self.height {
            self.offset = row + 1 - self.height;
        }
        self.clamp();
    }

    /// Visible row indices.
    pub fn visible(&self) -> std::ops::Range<usize> {
        let end = (self.offset + self.height).min(self.len);
        self.offset.min(end)..end
    }

    /// Maps a screen row (relative to the top of the window) to a content row.
    pub fn row_at(&self, screen_row: usize) -> Option<usize> {
        let row = self.offset + screen_row;
        (screen_row < self.height && row < self.len).then_some(row)
    }

    fn clamp(&mut self) {
        let max = self.len.saturating_sub(self.height);
        self.offset = self.offset.min(max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(height: usize, len: usize) -> RowViewport {
        let mut vp = RowViewport::default();
        vp.set_height(height);
        vp.set_len(len);
        vp
    }

    #[test]
    fn ensure_visible_scrolls_minimally() {
        let mut vp = viewport(3, 10);
        vp.ensure_visible(4);
        assert_eq!(vp.offset(), 2);
        assert_eq!(vp.visible(), 2..5);
        vp.ensure_visible(3);
        assert_eq!(vp.offset(), 2);
        vp.ensure_visible(0);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn shrinking_content_clamps_offset() {
        let mut vp = viewport(3, 10);
        vp.ensure_visible(9);
        assert_eq!(vp.offset(), 7);
        vp.set_len(4);
        assert_eq!(vp.offset(), 1);
        vp.set_len(0);
        assert_eq!(vp.offset(), 0);
        assert!(vp.visible().is_empty());
    }

    #[test]
    fn row_at_maps_only_existing_rows() {
        let mut vp = viewport(4, 6);
        vp.scroll_by(2);
        assert_eq!(vp.row_at(0), Some(2));
        assert_eq!(vp.row_at(3), Some(5));
        assert_eq!(vp.row_at(4), None);
        vp.scroll_by(-10);
        assert_eq!(vp.offset(), 0);
    }
}
