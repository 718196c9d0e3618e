use ratatui::style::Modifier;
use ratatui::style::Style;

/// Palette shared by every widget. Per-widget `*Options` styles are patched on top of it.
#[derive(Clone, Debug)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub danger: Style,
    pub border: Style,
    pub focus: Style,
    pub disabled: Style,
    pub selected: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().cyan(),
            danger: Style::default().red(),
            border: Style::default().gray(),
            focus: Style::default().cyan().add_modifier(Modifier::BOLD),
            disabled: Style::default().dark_gray().add_modifier(Modifier::DIM),
            selected: Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}

impl Theme {
    /// Border style for a container, highlighted while it holds focus.
    pub fn border_for(&self, focused: bool) -> Style {
        if focused { self.focus } else { self.border }
    }
}
