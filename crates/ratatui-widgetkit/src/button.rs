use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::input::InputEvent;
use crate::render;
use crate::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    None,
    Pressed,
}

#[derive(Clone, Debug, Default)]
pub struct ButtonOptions {
    /// Patched over the theme's primary style.
    pub style: Style,
    /// Replaces the theme's focus style when not default.
    pub focus_style: Style,
}

/// A push button rendered as `[ label ]`.
///
/// Activated by Enter/Space while focused or by a left click on the last rendered area.
/// A disabled button swallows both.
#[derive(Clone, Debug, Default)]
pub struct Button {
    label: String,
    disabled: bool,
    focused: bool,
    options: ButtonOptions,
    area: Rect,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_options(label: impl Into<String>, options: ButtonOptions) -> Self {
        Self {
            options,
            ..Self::new(label)
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Columns needed to draw the button without truncation.
    pub fn width(&self) -> u16 {
        (render::display_width(&self.label) + 4).min(u16::MAX as usize) as u16
    }

    pub fn handle_event(&mut self, event: InputEvent) -> ButtonAction {
        if self.disabled {
            return ButtonAction::None;
        }
        let pressed = match event {
            InputEvent::Key(key) => self.focused && key.is_activate(),
            InputEvent::Mouse(m) => m.clicked(self.area),
            InputEvent::Paste(_) => false,
        };
        if pressed {
            ButtonAction::Pressed
        } else {
            ButtonAction::None
        }
    }

    pub fn render_ref(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let area = Rect {
            height: area.height.min(1),
            width: area.width.min(self.width()),
            ..area
        };
        self.area = area;
        if area.is_empty() {
            return;
        }

        let style = if self.disabled {
            theme.disabled
        } else if self.focused {
            if self.options.focus_style == Style::default() {
                theme.focus
            } else {
                self.options.focus_style
            }
        } else {
            theme.text_primary.patch(self.options.style)
        };

        let text = format!(
            "[ {} ]",
            render::truncate_to_width(&self.label, (area.width as usize).saturating_sub(4))
        );
        buf.set_style(area, style);
        render::render_str_clipped(area.x, area.y, 0, area.width, buf, &text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;
    use crate::render::buffer_line;

    fn rendered(button: &mut Button, width: u16) -> Buffer {
        let mut buf = Buffer::empty(Rect::new(0, 0, width, 1));
        button.render_ref(Rect::new(0, 0, width, 1), &mut buf, &Theme::default());
        buf
    }

    #[test]
    fn renders_bracketed_label() {
        let mut b = Button::new("Search");
        let buf = rendered(&mut b, 20);
        assert_eq!(buffer_line(&buf, 0), "[ Search ]");
    }

    #[test]
    fn narrow_area_truncates_label() {
        let mut b = Button::new("Search");
        let buf = rendered(&mut b, 7);
        assert_eq!(buffer_line(&buf, 0), "[ Se… ]");
    }

    #[test]
    fn enter_presses_only_when_focused_and_enabled() {
        let mut b = Button::new("Go");
        assert_eq!(b.handle_event(InputEvent::key(KeyCode::Enter)), ButtonAction::None);
        b.set_focused(true);
        assert_eq!(b.handle_event(InputEvent::key(KeyCode::Enter)), ButtonAction::Pressed);
        b.set_disabled(true);
        assert_eq!(b.handle_event(InputEvent::key(KeyCode::Enter)), ButtonAction::None);
    }

    #[test]
    fn click_inside_rendered_area_presses() {
        let mut b = Button::new("Go");
        rendered(&mut b, 20);
        assert_eq!(b.handle_event(InputEvent::click(2, 0)), ButtonAction::Pressed);
        assert_eq!(b.handle_event(InputEvent::click(15, 0)), ButtonAction::None);
    }
}
