use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::input::InputEvent;
use crate::render;
use crate::theme::Theme;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionAction {
    None,
    Selected { value: String },
}

/// One choice inside a [`crate::select::Select`], also usable on its own.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OptionItem {
    value: String,
    label: String,
    selected: bool,
    highlighted: bool,
    area: Rect,
}

impl OptionItem {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Keyboard highlight (the "hovered" row of an open select).
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    pub fn handle_event(&mut self, event: InputEvent) -> OptionAction {
        let chosen = match event {
            InputEvent::Key(key) => self.highlighted && key.is_activate(),
            InputEvent::Mouse(m) => m.clicked(self.area),
            InputEvent::Paste(_) => false,
        };
        if chosen {
            OptionAction::Selected {
                value: self.value.clone(),
            }
        } else {
            OptionAction::None
        }
    }

    pub fn render_ref(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let area = Rect {
            height: area.height.min(1),
            ..area
        };
        self.area = area;
        if area.is_empty() {
            return;
        }

        let mut style = if self.selected {
            theme.accent
        } else {
            theme.text_primary
        };
        if self.highlighted {
            style = style.patch(theme.selected);
        }
        let marker = if self.selected { "● " } else { "  " };
        buf.set_style(area, style);
        let used = render::render_str_clipped(area.x, area.y, 0, area.width, buf, marker, style);
        render::render_str_clipped(
            area.x + used,
            area.y,
            0,
            area.width - used,
            buf,
            &self.label,
            style,
        );
    }
}
