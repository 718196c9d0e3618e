use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Widget;

use crate::button::Button;
use crate::button::ButtonAction;
use crate::input::InputEvent;
use crate::render;
use crate::theme::Theme;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardAction {
    None,
    /// The follow button was pressed; carries the card's username.
    Follow(String),
}

#[derive(Clone, Debug)]
pub struct CardOptions {
    pub follow_label: String,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            follow_label: "Follow".to_string(),
        }
    }
}

/// A bordered user card: avatar (or initials), free-form body lines and a follow button.
#[derive(Clone, Debug)]
pub struct Card {
    username: String,
    avatar: String,
    body: Vec<String>,
    follow: Button,
}

impl Default for Card {
    fn default() -> Self {
        Self::with_options(CardOptions::default())
    }
}

impl Card {
    pub fn new(username: impl Into<String>) -> Self {
        let mut card = Self::default();
        card.set_username(username);
        card
    }

    pub fn with_options(options: CardOptions) -> Self {
        Self {
            username: "User".to_string(),
            avatar: String::new(),
            body: Vec::new(),
            follow: Button::new(options.follow_label),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn avatar(&self) -> &str {
        &self.avatar
    }

    /// Sets the avatar reference (a path or URL); it is shown as text.
    pub fn set_avatar(&mut self, avatar: impl Into<String>) {
        self.avatar = avatar.into();
    }

    pub fn body(&self) -> &[String] {
        &self.body
    }

    pub fn set_body<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body = lines.into_iter().map(Into::into).collect();
    }

    pub fn is_focused(&self) -> bool {
        self.follow.is_focused()
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.follow.set_focused(focused);
    }

    /// Rows needed to show everything: borders, avatar line, body, button.
    pub fn height(&self) -> u16 {
        (self.body.len() + 4).min(u16::MAX as usize) as u16
    }

    pub fn handle_event(&mut self, event: InputEvent) -> CardAction {
        match self.follow.handle_event(event) {
            ButtonAction::Pressed => {
                log::debug!("follow {:?}", self.username);
                CardAction::Follow(self.username.clone())
            }
            ButtonAction::None => CardAction::None,
        }
    }

    pub fn render_ref(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.is_empty() {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_for(self.follow.is_focused()))
            .title(format!(" {} ", self.username));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return;
        }

        let mut y = inner.y;
        let bottom = inner.bottom();
        if self.avatar.is_empty() {
            let badge = format!("({})", initials(&self.username));
            let style = theme.accent.add_modifier(Modifier::BOLD);
            render::render_str_clipped(inner.x, y, 0, inner.width, buf, &badge, style);
        } else {
            render::render_str_clipped(inner.x, y, 0, inner.width, buf, &self.avatar, theme.text_muted);
        }
        y += 1;

        // The last inner row belongs to the button when there is room for it.
        let body_end = if inner.height >= 2 { bottom - 1 } else { bottom };
        for line in &self.body {
            if y >= body_end {
                break;
            }
            render::render_str_clipped(inner.x, y, 0, inner.width, buf, line, theme.text_primary);
            y += 1;
        }

        if inner.height >= 2 {
            let button_area = Rect::new(inner.x, bottom - 1, inner.width, 1);
            self.follow.render_ref(button_area, buf, theme);
        }
    }
}

/// Up to two uppercase initials from the first two words of `name`.
pub fn initials(name: &str) -> String {
    let out: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if out.is_empty() { "?".to_string() } else { out }
}
