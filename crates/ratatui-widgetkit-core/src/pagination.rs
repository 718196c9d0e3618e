//! Page bookkeeping: the current page, derived page count, and the page window a paginator
//! shows.
//!
//! Invariants held by [`Pagination`] after every operation:
//!
//! - `page_size >= 1`
//! - `max_page == ceil(total_items / page_size)` (`0` when there are no items)
//! - `current_page < max(max_page, 1)`

use std::ops::Range;

use serde::Deserialize;
use serde::Serialize;

use crate::error::PaginationError;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 15];
/// Pages shown on each side of the current page.
pub const DEFAULT_WINDOW_RADIUS: usize = 2;

/// One slot in a page window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Emitted whenever the visible page changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEvent {
    pub page_index: usize,
    pub previous_page_index: Option<usize>,
    pub page_size: usize,
    /// Total item count at the time of the event.
    pub length: usize,
}

/// Number of pages needed for `total_items`.
pub fn max_page(total_items: usize, page_size: usize) -> usize {
    if total_items == 0 {
        0
    } else {
        total_items.div_ceil(page_size.max(1))
    }
}

/// The pages a paginator shows around `current`.
///
/// The first and last pages are always present, the pages within `radius` of `current` fill the
/// middle, and each run of omitted pages collapses into a single [`PageItem::Ellipsis`].
pub fn page_window(current: usize, max_page: usize, radius: usize) -> Vec<PageItem> {
    if max_page <= 1 {
        return vec![PageItem::Page(0)];
    }

    let last = max_page - 1;
    let current = current.min(last);
    let start = current.saturating_sub(radius);
    let end = current.saturating_add(radius).min(last);

    let capacity = radius
        .saturating_mul(2)
        .saturating_add(5)
        .min(max_page.saturating_add(2));
    let mut pages = Vec::with_capacity(capacity);
    pages.push(PageItem::Page(0));
    if start > 1 {
        pages.push(PageItem::Ellipsis);
    }
    pages.extend(
        (start..=end)
            .filter(|&i| i != 0 && i != last)
            .map(PageItem::Page),
    );
    if end + 1 < last {
        pages.push(PageItem::Ellipsis);
    }
    pages.push(PageItem::Page(last));
    pages
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pagination {
    current: usize,
    page_size: usize,
    total_items: usize,
    max_page: usize,
    radius: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(total_items: usize, page_size: usize) -> Self {
        let page_size = sanitize_page_size(page_size);
        Self {
            current: 0,
            page_size,
            total_items,
            max_page: max_page(total_items, page_size),
            radius: DEFAULT_WINDOW_RADIUS,
        }
    }

    /// Starts on `page`, clamped into range.
    pub fn with_page(total_items: usize, page_size: usize, page: usize) -> Self {
        let mut p = Self::new(total_items, page_size);
        p.current = page.min(p.last_index());
        p
    }

    pub fn with_window_radius(mut self, radius: usize) -> Self {
        self.radius = radius;
        self
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn max_page(&self) -> usize {
        self.max_page
    }

    pub fn window_radius(&self) -> usize {
        self.radius
    }

    pub fn is_first_page(&self) -> bool {
        self.current == 0
    }

    pub fn is_last_page(&self) -> bool {
        self.current + 1 >= self.max_page
    }

    pub fn next_page(&mut self) -> Option<PageEvent> {
        self.go_to_page(self.current.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> Option<PageEvent> {
        if self.is_first_page() {
            return None;
        }
        self.go_to_page(self.current - 1)
    }

    pub fn first_page(&mut self) -> Option<PageEvent> {
        self.go_to_page(0)
    }

    pub fn last_page(&mut self) -> Option<PageEvent> {
        self.go_to_page(self.last_index())
    }

    /// Moves to `page` (clamped). Emits only if the page actually changed.
    pub fn go_to_page(&mut self, page: usize) -> Option<PageEvent> {
        let target = page.min(self.last_index());
        if target == self.current {
            return None;
        }
        let previous = self.current;
        self.current = target;
        Some(self.event(Some(previous)))
    }

    /// Changes the page size and returns to the first page. A zero size falls back to `1`.
    /// Always emits, since the items on screen change even when the index does not.
    pub fn set_page_size(&mut self, page_size: usize) -> PageEvent {
        let previous = self.current;
        self.page_size = sanitize_page_size(page_size);
        self.recalculate();
        self.current = 0;
        self.event(Some(previous))
    }

    pub fn try_set_page_size(&mut self, page_size: usize) -> Result<PageEvent, PaginationError> {
        if page_size == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        Ok(self.set_page_size(page_size))
    }

    /// Updates the item count, keeping the current page if it still exists.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.recalculate();
    }

    /// Adopts the page index and size carried by `event`. Returns whether anything changed.
    pub fn apply(&mut self, event: &PageEvent) -> bool {
        let before = (self.current, self.page_size);
        let page_size = sanitize_page_size(event.page_size);
        if page_size != self.page_size {
            self.page_size = page_size;
            self.recalculate();
        }
        self.current = event.page_index.min(self.last_index());
        before != (self.current, self.page_size)
    }

    /// Item range of the current page, clamped to the item count.
    pub fn range(&self) -> Range<usize> {
        let start = self
            .current
            .saturating_mul(self.page_size)
            .min(self.total_items);
        let end = start.saturating_add(self.page_size).min(self.total_items);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        let end = range.end.min(items.len());
        &items[range.start.min(end)..end]
    }

    pub fn window(&self) -> Vec<PageItem> {
        page_window(self.current, self.max_page, self.radius)
    }

    /// A snapshot event for the current state, with no previous page.
    pub fn snapshot(&self) -> PageEvent {
        self.event(None)
    }

    fn event(&self, previous_page_index: Option<usize>) -> PageEvent {
        PageEvent {
            page_index: self.current,
            previous_page_index,
            page_size: self.page_size,
            length: self.total_items,
        }
    }

    fn last_index(&self) -> usize {
        self.max_page.saturating_sub(1)
    }

    fn recalculate(&mut self) {
        self.max_page = max_page(self.total_items, self.page_size);
        self.current = self.current.min(self.last_index());
    }
}

fn sanitize_page_size(page_size: usize) -> usize {
    if page_size == 0 {
        log::warn!("page size 0 is invalid, falling back to 1");
        1
    } else {
        page_size
    }
}
