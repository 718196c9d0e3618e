use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;

use crate::input::InputEvent;
use crate::input::MouseEvent;
use crate::keymap::PagerAction;
use crate::keymap::PagerBindings;
use crate::option_item::OptionItem;
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::pagination::DEFAULT_PAGE_SIZE_OPTIONS;
use crate::pagination::PageEvent;
use crate::pagination::PageItem;
use crate::pagination::Pagination;
use crate::render;
use crate::select::Select;
use crate::select::SelectAction;
use crate::theme::Theme;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaginatorAction {
    None,
    Redraw,
    PageChanged(PageEvent),
}

#[derive(Clone, Debug)]
pub struct PaginatorOptions {
    pub previous_label: String,
    pub next_label: String,
    pub page_size_label: String,
    /// Appended to each page size in the select, e.g. `10 items`.
    pub page_size_suffix: String,
    pub style: Style,
    pub active_style: Style,
    pub bindings: PagerBindings,
}

impl Default for PaginatorOptions {
    fn default() -> Self {
        Self {
            previous_label: "‹ Prev".to_string(),
            next_label: "Next ›".to_string(),
            page_size_label: "Items".to_string(),
            page_size_suffix: "items".to_string(),
            style: Style::default(),
            active_style: Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
            bindings: PagerBindings::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Target {
    Previous,
    Next,
    Page(usize),
}

/// Page navigation: previous/next buttons, the page window, and a page-size select.
///
/// Every page change is reported as [`PaginatorAction::PageChanged`]; changing the page size
/// always returns to the first page.
#[derive(Clone, Debug)]
pub struct Paginator {
    pagination: Pagination,
    page_size_options: Vec<usize>,
    select: Select,
    focused: bool,
    options: PaginatorOptions,
    targets: Vec<(Rect, Target)>,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    pub fn new(total_items: usize, page_size: usize) -> Self {
        Self::with_options(total_items, page_size, PaginatorOptions::default())
    }

    pub fn with_options(total_items: usize, page_size: usize, options: PaginatorOptions) -> Self {
        let mut p = Self {
            pagination: Pagination::new(total_items, page_size),
            page_size_options: Vec::new(),
            select: Select::new(options.page_size_label.clone()),
            focused: false,
            options,
            targets: Vec::new(),
        };
        p.set_page_size_options(DEFAULT_PAGE_SIZE_OPTIONS.to_vec());
        p
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page()
    }

    pub fn page_size(&self) -> usize {
        self.pagination.page_size()
    }

    pub fn max_page(&self) -> usize {
        self.pagination.max_page()
    }

    pub fn total_items(&self) -> usize {
        self.pagination.total_items()
    }

    pub fn is_first_page(&self) -> bool {
        self.pagination.is_first_page()
    }

    pub fn is_last_page(&self) -> bool {
        self.pagination.is_last_page()
    }

    pub fn page_window(&self) -> Vec<PageItem> {
        self.pagination.window()
    }

    pub fn set_window_radius(&mut self, radius: usize) {
        self.pagination = self.pagination.clone().with_window_radius(radius);
    }

    pub fn set_total_items(&mut self, total_items: usize) {
        self.pagination.set_total_items(total_items);
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    pub fn set_page_size_options(&mut self, options: Vec<usize>) {
        self.page_size_options = options;
        let suffix = &self.options.page_size_suffix;
        self.select.set_items(
            self.page_size_options
                .iter()
                .map(|n| OptionItem::new(n.to_string(), format!("{n} {suffix}")))
                .collect(),
        );
        self.sync_select();
    }

    pub fn set_page_size(&mut self, page_size: usize) -> PageEvent {
        let event = self.pagination.set_page_size(page_size);
        self.sync_select();
        event
    }

    pub fn go_to_page(&mut self, page: usize) -> Option<PageEvent> {
        self.pagination.go_to_page(page)
    }

    pub fn next_page(&mut self) -> Option<PageEvent> {
        self.pagination.next_page()
    }

    pub fn previous_page(&mut self) -> Option<PageEvent> {
        self.pagination.previous_page()
    }

    /// Adopts index/size from a parent without emitting. Returns whether anything changed.
    pub fn apply(&mut self, event: &PageEvent) -> bool {
        let changed = self.pagination.apply(event);
        self.sync_select();
        changed
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        self.select.set_focused(focused);
        if !focused {
            self.select.set_open(false);
        }
    }

    pub fn is_page_size_open(&self) -> bool {
        self.select.is_open()
    }

    /// Rows needed, including the open page-size list.
    pub fn height(&self) -> u16 {
        self.select.height()
    }

    pub fn handle_event(&mut self, event: InputEvent) -> PaginatorAction {
        match event {
            InputEvent::Key(key) if self.focused => {
                if self.select.is_open() {
                    let action = self.select.handle_event(InputEvent::Key(key));
                    return self.on_select(action);
                }
                match self.options.bindings.action_for(&key) {
                    Some(PagerAction::Previous) => emit(self.pagination.previous_page()),
                    Some(PagerAction::Next) => emit(self.pagination.next_page()),
                    Some(PagerAction::First) => emit(self.pagination.first_page()),
                    Some(PagerAction::Last) => emit(self.pagination.last_page()),
                    Some(PagerAction::TogglePageSize) => {
                        self.select.toggle();
                        PaginatorAction::Redraw
                    }
                    None => PaginatorAction::None,
                }
            }
            InputEvent::Mouse(m) => self.handle_mouse(m),
            _ => PaginatorAction::None,
        }
    }

    pub fn render_ref(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        self.targets.clear();
        if area.is_empty() {
            return;
        }

        let base = theme.text_primary.patch(self.options.style);
        let active = base.patch(self.options.active_style);
        let y = area.y;
        let right = area.right();
        let mut x = area.x;

        let nav_style = |disabled: bool| if disabled { theme.disabled } else { base };

        let prev_style = nav_style(self.pagination.is_first_page());
        x = self.put(buf, x, y, right, &self.options.previous_label.clone(), prev_style, Some(Target::Previous));
        x = x.saturating_add(1).min(right);

        for item in self.pagination.window() {
            x = match item {
                PageItem::Page(p) => {
                    let style = if p == self.pagination.current_page() {
                        active
                    } else {
                        base
                    };
                    self.put(buf, x, y, right, &format!(" {} ", p + 1), style, Some(Target::Page(p)))
                }
                PageItem::Ellipsis => {
                    self.put(buf, x, y, right, &format!(" {} ", render::ELLIPSIS), theme.text_muted, None)
                }
            };
        }

        x = x.saturating_add(1).min(right);
        let next_style = nav_style(self.pagination.is_last_page());
        x = self.put(buf, x, y, right, &self.options.next_label.clone(), next_style, Some(Target::Next));
        x = x.saturating_add(2).min(right);

        let select_area = Rect::new(x, y, right - x, area.height);
        self.select.render_ref(select_area, buf, theme);
    }

    #[allow(clippy::too_many_arguments)]
    fn put(
        &mut self,
        buf: &mut Buffer,
        x: u16,
        y: u16,
        right: u16,
        text: &str,
        style: Style,
        target: Option<Target>,
    ) -> u16 {
        let written = render::render_str_clipped(x, y, 0, right.saturating_sub(x), buf, text, style);
        if let Some(target) = target
            && written > 0
        {
            self.targets.push((Rect::new(x, y, written, 1), target));
        }
        x + written
    }

    fn handle_mouse(&mut self, m: MouseEvent) -> PaginatorAction {
        let select_action = self.select.handle_event(InputEvent::Mouse(m));
        if select_action != SelectAction::None {
            return self.on_select(select_action);
        }
        if !m.is_left_click() {
            return PaginatorAction::None;
        }
        let Some(target) = self
            .targets
            .iter()
            .find(|(rect, _)| m.is_inside(*rect))
            .map(|(_, t)| *t)
        else {
            return PaginatorAction::None;
        };
        emit(match target {
            Target::Previous => self.pagination.previous_page(),
            Target::Next => self.pagination.next_page(),
            Target::Page(p) => self.pagination.go_to_page(p),
        })
    }

    fn on_select(&mut self, action: SelectAction) -> PaginatorAction {
        match action {
            SelectAction::Changed(value) => match value.parse::<usize>() {
                Ok(size) => PaginatorAction::PageChanged(self.set_page_size(size)),
                Err(err) => {
                    log::warn!("ignoring page size {value:?}: {err}");
                    PaginatorAction::Redraw
                }
            },
            SelectAction::Opened | SelectAction::Closed => PaginatorAction::Redraw,
            SelectAction::None => PaginatorAction::None,
        }
    }

    fn sync_select(&mut self) {
        self.select
            .set_value(Some(self.pagination.page_size().to_string()));
    }
}

fn emit(event: Option<PageEvent>) -> PaginatorAction {
    match event {
        Some(event) => {
            log::debug!(
                "page {} -> {} (size {})",
                event.previous_page_index.unwrap_or(event.page_index),
                event.page_index,
                event.page_size
            );
            PaginatorAction::PageChanged(event)
        }
        None => PaginatorAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    use crate::input::KeyCode;
    use crate::render::buffer_line;

    fn draw(p: &mut Paginator, w: u16, h: u16) -> Buffer {
        let mut buf = Buffer::empty(Rect::new(0, 0, w, h));
        p.render_ref(buf.area, &mut buf, &Theme::default());
        buf
    }

    fn focused(total: usize, size: usize) -> Paginator {
        let mut p = Paginator::new(total, size);
        p.set_focused(true);
        p
    }

    #[test]
    fn renders_window_with_ellipsis_and_select() {
        let mut p = Paginator::new(200, 10);
        let buf = draw(&mut p, 60, 1);
        assert_eq!(
            buffer_line(&buf, 0),
            "‹ Prev  1  2  3  …  20  Next ›  Items: 10 items ▾"
        );
    }

    #[test]
    fn keys_move_pages_and_emit() {
        let mut p = focused(45, 10);
        assert_eq!(p.handle_event(InputEvent::key(KeyCode::Left)), PaginatorAction::None);
        let PaginatorAction::PageChanged(ev) = p.handle_event(InputEvent::key(KeyCode::Right))
        else {
            panic!("expected a page change");
        };
        assert_eq!((ev.page_index, ev.previous_page_index), (1, Some(0)));
        assert_eq!(ev.length, 45);
        p.handle_event(InputEvent::key(KeyCode::End));
        assert_eq!(p.current_page(), 4);
        assert!(p.is_last_page());
        assert_eq!(p.handle_event(InputEvent::key(KeyCode::Right)), PaginatorAction::None);
    }

    #[test]
    fn unfocused_paginator_ignores_keys() {
        let mut p = Paginator::new(45, 10);
        assert_eq!(p.handle_event(InputEvent::key(KeyCode::Right)), PaginatorAction::None);
        assert_eq!(p.current_page(), 0);
    }

    #[test]
    fn page_size_select_resets_to_first_page() {
        let mut p = focused(100, 10);
        p.go_to_page(4);
        assert_eq!(
            p.handle_event(InputEvent::key(KeyCode::Char('s'))),
            PaginatorAction::Redraw
        );
        assert!(p.is_page_size_open());
        assert_eq!(p.height(), 4);
        p.handle_event(InputEvent::key(KeyCode::Down));
        let PaginatorAction::PageChanged(ev) = p.handle_event(InputEvent::key(KeyCode::Enter))
        else {
            panic!("expected a page change");
        };
        assert_eq!(ev.page_size, 15);
        assert_eq!(ev.page_index, 0);
        assert_eq!(p.max_page(), 7);
        assert!(!p.is_page_size_open());
    }

    #[test]
    fn clicking_a_page_number_jumps_there() {
        let mut p = Paginator::new(200, 10);
        draw(&mut p, 60, 1);
        // " 20 " starts at column 19.
        let PaginatorAction::PageChanged(ev) = p.handle_event(InputEvent::click(20, 0)) else {
            panic!("expected a page change");
        };
        assert_eq!(ev.page_index, 19);
        draw(&mut p, 60, 1);
        assert_eq!(
            p.handle_event(InputEvent::click(1, 0)),
            PaginatorAction::PageChanged(PageEvent {
                page_index: 18,
                previous_page_index: Some(19),
                page_size: 10,
                length: 200,
            })
        );
    }

    #[test]
    fn focus_reaches_page_size_select() {
        let mut p = Paginator::new(200, 10);
        let buf = draw(&mut p, 60, 1);
        // "Items: " starts at column 32, the value at 39.
        assert_ne!(buf[(39, 0)].fg, Color::Cyan);

        p.set_focused(true);
        let buf = draw(&mut p, 60, 1);
        assert_eq!(buf[(39, 0)].fg, Color::Cyan);
    }

    #[test]
    fn single_page_shows_only_page_one() {
        let mut p = Paginator::new(3, 10);
        assert_eq!(p.page_window(), vec![PageItem::Page(0)]);
        assert!(p.is_first_page() && p.is_last_page());
        let buf = draw(&mut p, 40, 1);
        assert!(buffer_line(&buf, 0).starts_with("‹ Prev  1  Next ›"));
    }
}
