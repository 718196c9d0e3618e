use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::button::Button;
use crate::button::ButtonAction;
use crate::input::InputEvent;
use crate::text_input::InputAction;
use crate::text_input::TextInput;
use crate::theme::Theme;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchBarAction {
    None,
    /// The input's value changed (not yet submitted).
    ValueChanged(String),
    /// A search was requested; carries the term.
    Search(String),
}

#[derive(Clone, Debug)]
pub struct SearchBarOptions {
    pub button_label: String,
    /// Shown on the button while the bar is disabled (e.g. a search is in flight).
    pub busy_label: String,
}

impl Default for SearchBarOptions {
    fn default() -> Self {
        Self {
            button_label: "Search".to_string(),
            busy_label: "Searching...".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Part {
    #[default]
    Input,
    Button,
}

/// A text input and a search button on one line.
#[derive(Clone, Debug)]
pub struct SearchBar {
    input: TextInput,
    button: Button,
    value: String,
    focused: bool,
    part: Part,
    options: SearchBarOptions,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::with_options(SearchBarOptions::default())
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SearchBarOptions) -> Self {
        Self {
            input: TextInput::new(),
            button: Button::new(options.button_label.clone()),
            value: String::new(),
            focused: false,
            part: Part::Input,
            options,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.input.set_value(self.value.clone());
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.input.set_placeholder(placeholder);
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn button(&self) -> &Button {
        &self.button
    }

    pub fn is_disabled(&self) -> bool {
        self.button.is_disabled()
    }

    /// Disables both parts; the button switches to the busy label.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.input.set_disabled(disabled);
        self.button.set_disabled(disabled);
        self.button.set_label(if disabled {
            self.options.busy_label.clone()
        } else {
            self.options.button_label.clone()
        });
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.part = Part::Input;
        }
        self.sync_focus();
    }

    /// Moves focus between the input and the button. Returns `false` when focus should leave
    /// the bar (stepping past either end).
    pub fn focus_step(&mut self, forward: bool) -> bool {
        let next = match (self.part, forward) {
            (Part::Input, true) => Some(Part::Button),
            (Part::Button, false) => Some(Part::Input),
            _ => None,
        };
        match next {
            Some(part) => {
                self.part = part;
                self.sync_focus();
                true
            }
            None => false,
        }
    }

    /// Terminal cursor position while the input has focus.
    pub fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        self.input.cursor_pos(self.input_area(area))
    }

    pub fn handle_event(&mut self, event: InputEvent) -> SearchBarAction {
        if let InputEvent::Mouse(_) = &event {
            if self.button.handle_event(event.clone()) == ButtonAction::Pressed {
                return self.search();
            }
            return SearchBarAction::None;
        }
        if !self.focused {
            return SearchBarAction::None;
        }

        match self.part {
            Part::Input => match self.input.handle_event(event) {
                InputAction::Changed(value) => {
                    self.value = value.clone();
                    SearchBarAction::ValueChanged(value)
                }
                InputAction::Submitted(_) => self.search(),
                InputAction::None => SearchBarAction::None,
            },
            Part::Button => match self.button.handle_event(event) {
                ButtonAction::Pressed => self.search(),
                ButtonAction::None => SearchBarAction::None,
            },
        }
    }

    pub fn render_ref(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.is_empty() {
            return;
        }
        let input_area = self.input_area(area);
        self.input.render_ref(input_area, buf, theme);
        let button_area = Rect::new(
            input_area.right().saturating_add(1).min(area.right()),
            area.y,
            area.width.saturating_sub(input_area.width + 1),
            1,
        );
        self.button.render_ref(button_area, buf, theme);
    }

    fn input_area(&self, area: Rect) -> Rect {
        let button_w = self.button.width().min(area.width);
        Rect::new(
            area.x,
            area.y,
            area.width.saturating_sub(button_w + 1),
            area.height.min(1),
        )
    }

    fn search(&mut self) -> SearchBarAction {
        if self.button.is_disabled() {
            return SearchBarAction::None;
        }
        log::debug!("search requested: {:?}", self.value);
        SearchBarAction::Search(self.value.clone())
    }

    fn sync_focus(&mut self) {
        self.input.set_focused(self.focused && self.part == Part::Input);
        self.button.set_focused(self.focused && self.part == Part::Button);
    }
}
