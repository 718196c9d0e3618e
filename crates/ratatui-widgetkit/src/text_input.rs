use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::render;
use crate::theme::Theme;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputAction {
    None,
    /// The value was edited; carries the new value.
    Changed(String),
    /// Enter was pressed; carries the current value.
    Submitted(String),
}

#[derive(Clone, Debug, Default)]
pub struct TextInputOptions {
    pub style: Style,
    /// Replaces the theme's muted style for the placeholder when not default.
    pub placeholder_style: Style,
}

/// Single-line text field with a placeholder.
#[derive(Clone, Debug, Default)]
pub struct TextInput {
    value: String,
    placeholder: String,
    disabled: bool,
    focused: bool,
    /// Char index of the caret within `value`.
    cursor: usize,
    /// First visible display column.
    scroll_x: usize,
    width: u16,
    options: TextInputOptions,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TextInputOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the value and moves the caret to its end. Newlines are dropped.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = single_line(&value.into());
        self.cursor = self.char_len();
        self.ensure_cursor_visible();
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
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

    /// Caret position as a char index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Terminal position of the caret for `Frame::set_cursor_position`, if it is on screen.
    pub fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        if area.is_empty() || !self.focused || self.disabled {
            return None;
        }
        let x = self.cursor_display_x().checked_sub(self.scroll_x)?;
        if x >= area.width as usize {
            return None;
        }
        Some((area.x + x as u16, area.y))
    }

    pub fn handle_event(&mut self, event: InputEvent) -> InputAction {
        if self.disabled {
            return InputAction::None;
        }
        match event {
            InputEvent::Paste(s) => {
                let s = single_line(&s);
                if s.is_empty() {
                    return InputAction::None;
                }
                for ch in s.chars() {
                    self.insert_char(ch);
                }
                self.changed()
            }
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(_) => InputAction::None,
        }
    }

    pub fn render_ref(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.is_empty() {
            return;
        }
        self.width = area.width;
        self.ensure_cursor_visible();

        let line = Rect { height: 1, ..area };
        let base = if self.disabled {
            theme.disabled
        } else {
            theme.text_primary.patch(self.options.style)
        };
        buf.set_style(line, base);

        if self.value.is_empty() {
            let style = if self.options.placeholder_style == Style::default() {
                theme.text_muted
            } else {
                self.options.placeholder_style
            };
            render::render_str_clipped(
                line.x,
                line.y,
                0,
                line.width,
                buf,
                &self.placeholder,
                style,
            );
        } else {
            render::render_str_clipped(
                line.x,
                line.y,
                self.scroll_x as u32,
                line.width,
                buf,
                &self.value,
                base,
            );
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> InputAction {
        match key.code {
            KeyCode::Char(c) => {
                if key.modifiers.is_command() {
                    return InputAction::None;
                }
                self.insert_char(c);
                self.changed()
            }
            KeyCode::Enter => InputAction::Submitted(self.value.clone()),
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return InputAction::None;
                }
                self.cursor -= 1;
                self.remove_at_cursor();
                self.changed()
            }
            KeyCode::Delete => {
                if self.cursor >= self.char_len() {
                    return InputAction::None;
                }
                self.remove_at_cursor();
                self.changed()
            }
            KeyCode::Left => self.move_to(self.cursor.saturating_sub(1)),
            KeyCode::Right => self.move_to((self.cursor + 1).min(self.char_len())),
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(self.char_len()),
            _ => InputAction::None,
        }
    }

    fn changed(&mut self) -> InputAction {
        self.ensure_cursor_visible();
        InputAction::Changed(self.value.clone())
    }

    fn move_to(&mut self, cursor: usize) -> InputAction {
        self.cursor = cursor;
        self.ensure_cursor_visible();
        InputAction::None
    }

    fn insert_char(&mut self, ch: char) {
        let at = byte_index(&self.value, self.cursor);
        self.value.insert(at, ch);
        self.cursor += 1;
    }

    fn remove_at_cursor(&mut self) {
        let start = byte_index(&self.value, self.cursor);
        let end = byte_index(&self.value, self.cursor + 1);
        self.value.replace_range(start..end, "");
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn cursor_display_x(&self) -> usize {
        self.value
            .chars()
            .take(self.cursor)
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
            .sum()
    }

    fn ensure_cursor_visible(&mut self) {
        if self.width == 0 {
            return;
        }
        let cx = self.cursor_display_x();
        let w = self.width as usize;
        if cx < self.scroll_x {
            self.scroll_x = cx;
        } else if cx >= self.scroll_x + w {
            self.scroll_x = cx + 1 - w;
        }
    }
}

fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}

fn single_line(s: &str) -> String {
    s.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyModifiers;
    use crate::render::buffer_line;

    fn type_str(input: &mut TextInput, s: &str) {
        for ch in s.chars() {
            input.handle_event(InputEvent::key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn typing_emits_value_changes() {
        let mut input = TextInput::new();
        assert_eq!(
            input.handle_event(InputEvent::key(KeyCode::Char('a'))),
            InputAction::Changed("a".to_string())
        );
        type_str(&mut input, "bc");
        assert_eq!(input.value(), "abc");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn editing_in_the_middle() {
        let mut input = TextInput::new();
        input.set_value("héllo");
        input.handle_event(InputEvent::key(KeyCode::Home));
        input.handle_event(InputEvent::key(KeyCode::Right));
        input.handle_event(InputEvent::key(KeyCode::Delete));
        assert_eq!(input.value(), "hllo");
        input.handle_event(InputEvent::key(KeyCode::Char('e')));
        assert_eq!(input.value(), "hello");
        input.handle_event(InputEvent::key(KeyCode::End));
        input.handle_event(InputEvent::key(KeyCode::Backspace));
        assert_eq!(input.value(), "hell");
        assert_eq!(
            input.handle_event(InputEvent::key(KeyCode::Delete)),
            InputAction::None
        );
    }

    #[test]
    fn enter_submits_current_value() {
        let mut input = TextInput::new();
        input.set_value("query");
        assert_eq!(
            input.handle_event(InputEvent::key(KeyCode::Enter)),
            InputAction::Submitted("query".to_string())
        );
        assert_eq!(input.value(), "query");
    }

    #[test]
    fn paste_strips_newlines_and_ctrl_chords_are_ignored() {
        let mut input = TextInput::new();
        input.handle_event(InputEvent::Paste("a\r\nb\nc".to_string()));
        assert_eq!(input.value(), "abc");
        let ctrl_a = KeyEvent::new(KeyCode::Char('a')).with_modifiers(KeyModifiers {
            ctrl: true,
            ..KeyModifiers::none()
        });
        assert_eq!(input.handle_event(InputEvent::Key(ctrl_a)), InputAction::None);
    }

    #[test]
    fn disabled_input_ignores_events() {
        let mut input = TextInput::new();
        input.set_disabled(true);
        assert_eq!(
            input.handle_event(InputEvent::key(KeyCode::Char('x'))),
            InputAction::None
        );
        assert_eq!(input.value(), "");
    }

    #[test]
    fn renders_placeholder_when_empty_and_scrolls_long_values() {
        let theme = Theme::default();
        let mut input = TextInput::new();
        input.set_placeholder("Search...");
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 1));
        input.render_ref(buf.area, &mut buf, &theme);
        assert_eq!(buffer_line(&buf, 0), "Searc");

        type_str(&mut input, "abcdefgh");
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 1));
        input.render_ref(buf.area, &mut buf, &theme);
        assert_eq!(buffer_line(&buf, 0), "efgh");
        input.set_focused(true);
        assert_eq!(input.cursor_pos(buf.area), Some((4, 0)));
    }
}
