use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;

use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::MouseEvent;
use crate::keymap::NavBindings;
use crate::option_item::OptionAction;
use crate::option_item::OptionItem;
use crate::render;
use crate::theme::Theme;
use crate::viewport::RowViewport;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectAction {
    None,
    Opened,
    Closed,
    /// An option was chosen; carries its value.
    Changed(String),
}

#[derive(Clone, Debug)]
pub struct SelectOptions {
    pub style: Style,
    /// Rows of the open list shown at once.
    pub max_visible: u16,
    pub placeholder: String,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            style: Style::default(),
            max_visible: 6,
            placeholder: "-".to_string(),
        }
    }
}

/// A drop-down: one display line, plus the option list below it while open.
///
/// The options' `selected` flags always mirror `value`.
#[derive(Clone, Debug)]
pub struct Select {
    display_name: String,
    value: Option<String>,
    items: Vec<OptionItem>,
    open: bool,
    close_when_click_outside: bool,
    focused: bool,
    highlight: usize,
    list: RowViewport,
    nav: NavBindings,
    options: SelectOptions,
    display_area: Rect,
    list_area: Rect,
}

impl Default for Select {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            value: None,
            items: Vec::new(),
            open: false,
            close_when_click_outside: true,
            focused: false,
            highlight: 0,
            list: RowViewport::default(),
            nav: NavBindings::default(),
            options: SelectOptions::default(),
            display_area: Rect::default(),
            list_area: Rect::default(),
        }
    }
}

impl Select {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    pub fn with_options(display_name: impl Into<String>, options: SelectOptions) -> Self {
        Self {
            options,
            ..Self::new(display_name)
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.display_name = display_name.into();
    }

    pub fn items(&self) -> &[OptionItem] {
        &self.items
    }

    pub fn set_items(&mut self, items: Vec<OptionItem>) {
        self.items = items;
        self.list.set_len(self.items.len());
        self.sync_items_with_value();
    }

    pub fn push_item(&mut self, item: OptionItem) {
        self.items.push(item);
        self.list.set_len(self.items.len());
        self.sync_items_with_value();
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
        self.sync_items_with_value();
    }

    pub fn selected_item(&self) -> Option<&OptionItem> {
        self.items.iter().find(|o| o.is_selected())
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
        if open {
            self.highlight = self
                .items
                .iter()
                .position(|o| o.is_selected())
                .unwrap_or(0);
            self.list.ensure_visible(self.highlight);
        }
        self.sync_highlight();
    }

    pub fn toggle(&mut self) {
        self.set_open(!self.open);
    }

    pub fn close_when_click_outside(&self) -> bool {
        self.close_when_click_outside
    }

    pub fn set_close_when_click_outside(&mut self, close: bool) {
        self.close_when_click_outside = close;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Rows the select occupies with its current open state.
    pub fn height(&self) -> u16 {
        if self.open {
            1 + (self.items.len() as u16).min(self.options.max_visible)
        } else {
            1
        }
    }

    /// Width of the closed display line.
    pub fn display_width(&self) -> u16 {
        render::display_width(&self.display_text()).min(u16::MAX as usize) as u16
    }

    pub fn handle_event(&mut self, event: InputEvent) -> SelectAction {
        match event {
            InputEvent::Key(key) if self.focused || self.open => self.handle_key(key),
            InputEvent::Mouse(m) => self.handle_mouse(m),
            _ => SelectAction::None,
        }
    }

    pub fn render_ref(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.is_empty() {
            self.display_area = Rect::default();
            self.list_area = Rect::default();
            return;
        }

        let base = theme.text_primary.patch(self.options.style);
        let display_style = if self.focused { theme.focus } else { base };
        self.display_area = Rect { height: 1, ..area };
        let spans = [
            Span::styled(format!("{}: ", self.display_name), theme.text_muted),
            Span::styled(self.value_label(), display_style),
            Span::styled(format!(" {}", self.indicator()), theme.text_muted),
        ];
        render::render_spans(area.x, area.y, area.width, buf, &spans, base);

        let list_h = if self.open {
            (self.height() - 1).min(area.height - 1)
        } else {
            0
        };
        self.list_area = Rect::new(area.x, area.y + 1, area.width, list_h);
        self.list.set_height(list_h as usize);
        self.list.ensure_visible(self.highlight);

        let visible = self.list.visible();
        for (row, idx) in visible.enumerate() {
            let row_area = Rect::new(area.x, area.y + 1 + row as u16, area.width, 1);
            self.items[idx].render_ref(row_area, buf, theme);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> SelectAction {
        if !self.open {
            let opens = key.is_activate() || key.code == KeyCode::Down;
            if opens && !self.items.is_empty() {
                self.set_open(true);
                return SelectAction::Opened;
            }
            return SelectAction::None;
        }

        if key.code == KeyCode::Esc {
            self.set_open(false);
            return SelectAction::Closed;
        }
        if key.is_activate() {
            let value = self.items.get(self.highlight).map(|o| o.value().to_string());
            return value.map_or(SelectAction::None, |value| self.choose(value));
        }
        if let Some(action) = self.nav.action_for(&key) {
            let page = self.options.max_visible as usize;
            self.highlight = NavBindings::apply(action, self.highlight, self.items.len(), page);
            self.list.ensure_visible(self.highlight);
            self.sync_highlight();
        }
        SelectAction::None
    }

    fn handle_mouse(&mut self, m: MouseEvent) -> SelectAction {
        if !m.is_left_click() {
            return SelectAction::None;
        }
        if m.is_inside(self.display_area) {
            self.toggle();
            return if self.open {
                SelectAction::Opened
            } else {
                SelectAction::Closed
            };
        }
        if !self.open {
            return SelectAction::None;
        }
        if m.is_inside(self.list_area) {
            let hit = self.list.visible().find_map(|idx| {
                match self.items[idx].handle_event(InputEvent::Mouse(m)) {
                    OptionAction::Selected { value } => Some(value),
                    OptionAction::None => None,
                }
            });
            return hit.map_or(SelectAction::None, |value| self.choose(value));
        }
        if self.close_when_click_outside {
            self.set_open(false);
            return SelectAction::Closed;
        }
        SelectAction::None
    }

    fn choose(&mut self, value: String) -> SelectAction {
        log::debug!("select {:?}: chose {value:?}", self.display_name);
        self.value = Some(value.clone());
        self.sync_items_with_value();
        self.set_open(false);
        SelectAction::Changed(value)
    }

    fn sync_items_with_value(&mut self) {
        let value = self.value.as_deref();
        for item in &mut self.items {
            item.set_selected(Some(item.value()) == value);
        }
    }

    fn sync_highlight(&mut self) {
        let (open, highlight) = (self.open, self.highlight);
        for (i, item) in self.items.iter_mut().enumerate() {
            item.set_highlighted(open && i == highlight);
        }
    }

    fn value_label(&self) -> String {
        self.selected_item()
            .map(|o| o.label().to_string())
            .or_else(|| self.value.clone())
            .unwrap_or_else(|| self.options.placeholder.clone())
    }

    fn indicator(&self) -> &'static str {
        if self.open { "▴" } else { "▾" }
    }

    fn display_text(&self) -> String {
        format!("{}: {} {}", self.display_name, self.value_label(), self.indicator())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::buffer_line;

    fn sizes() -> Select {
        let mut s = Select::new("Items");
        s.set_items(
            ["5", "10", "15"]
                .into_iter()
                .map(|v| OptionItem::new(v, format!("{v} items")))
                .collect(),
        );
        s
    }

    fn draw(s: &mut Select, w: u16, h: u16) -> Buffer {
        let mut buf = Buffer::empty(Rect::new(0, 0, w, h));
        s.render_ref(buf.area, &mut buf, &Theme::default());
        buf
    }

    #[test]
    fn set_value_syncs_selected_flags() {
        let mut s = sizes();
        s.set_value(Some("10".to_string()));
        let flags: Vec<bool> = s.items().iter().map(OptionItem::is_selected).collect();
        assert_eq!(flags, vec![false, true, false]);
        s.set_value(None);
        assert!(s.items().iter().all(|o| !o.is_selected()));
    }

    #[test]
    fn toggle_flips_open() {
        let mut s = sizes();
        assert!(!s.is_open());
        s.toggle();
        assert!(s.is_open());
        s.toggle();
        assert!(!s.is_open());
    }

    #[test]
    fn keyboard_selection_changes_value_and_closes() {
        let mut s = sizes();
        s.set_focused(true);
        s.set_value(Some("5".to_string()));
        assert_eq!(s.handle_event(InputEvent::key(KeyCode::Enter)), SelectAction::Opened);
        s.handle_event(InputEvent::key(KeyCode::Down));
        s.handle_event(InputEvent::key(KeyCode::Down));
        assert_eq!(
            s.handle_event(InputEvent::key(KeyCode::Enter)),
            SelectAction::Changed("15".to_string())
        );
        assert!(!s.is_open());
        assert_eq!(s.value(), Some("15"));
        assert_eq!(s.selected_item().map(OptionItem::label), Some("15 items"));
    }

    #[test]
    fn esc_closes_without_changing() {
        let mut s = sizes();
        s.set_open(true);
        assert_eq!(s.handle_event(InputEvent::key(KeyCode::Esc)), SelectAction::Closed);
        assert_eq!(s.value(), None);
    }

    #[test]
    fn click_on_option_selects_it() {
        let mut s = sizes();
        draw(&mut s, 20, 4);
        assert_eq!(s.handle_event(InputEvent::click(0, 0)), SelectAction::Opened);
        let buf = draw(&mut s, 20, 4);
        assert_eq!(buffer_line(&buf, 2), "  10 items");
        assert_eq!(
            s.handle_event(InputEvent::click(4, 2)),
            SelectAction::Changed("10".to_string())
        );
    }

    #[test]
    fn click_outside_closes_only_when_enabled() {
        let mut s = sizes();
        s.set_open(true);
        draw(&mut s, 20, 4);
        assert_eq!(s.handle_event(InputEvent::click(30, 30)), SelectAction::Closed);

        s.set_close_when_click_outside(false);
        s.set_open(true);
        draw(&mut s, 20, 4);
        assert_eq!(s.handle_event(InputEvent::click(30, 30)), SelectAction::None);
        assert!(s.is_open());
    }

    #[test]
    fn closed_select_renders_display_line() {
        let mut s = sizes();
        s.set_value(Some("10".to_string()));
        let buf = draw(&mut s, 30, 1);
        assert_eq!(buffer_line(&buf, 0), "Items: 10 items ▾");
        assert_eq!(s.height(), 1);
    }
}
