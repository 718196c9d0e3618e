use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    pattern.code == event.code && pattern.modifiers == event.modifiers
}

pub fn any_matches(patterns: &[KeyEvent], event: &KeyEvent) -> bool {
    patterns.iter().any(|p| key_event_matches(p, event))
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code)
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

pub fn key_ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers {
        ctrl: true,
        ..KeyModifiers::none()
    })
}

/// Row-cursor movement for list-like widgets (tables, open selects).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavAction {
    Up,
    Down,
    PageUp,
    PageDown,
    First,
    Last,
}

#[derive(Clone, Debug)]
pub struct NavBindings {
    pub up: Vec<KeyEvent>,
    pub down: Vec<KeyEvent>,
    pub page_up: Vec<KeyEvent>,
    pub page_down: Vec<KeyEvent>,
    pub first: Vec<KeyEvent>,
    pub last: Vec<KeyEvent>,
}

impl Default for NavBindings {
    fn default() -> Self {
        Self {
            up: vec![key(KeyCode::Up), key_char('k')],
            down: vec![key(KeyCode::Down), key_char('j')],
            page_up: vec![key(KeyCode::PageUp), key_ctrl('u')],
            page_down: vec![key(KeyCode::PageDown), key_ctrl('d')],
            first: vec![key(KeyCode::Home), key_char('g')],
            last: vec![key(KeyCode::End), key_char('G')],
        }
    }
}

impl NavBindings {
    pub fn action_for(&self, key: &KeyEvent) -> Option<NavAction> {
        [
            (&self.up, NavAction::Up),
            (&self.down, NavAction::Down),
            (&self.page_up, NavAction::PageUp),
            (&self.page_down, NavAction::PageDown),
            (&self.first, NavAction::First),
            (&self.last, NavAction::Last),
        ]
        .into_iter()
        .find(|(keys, _)| any_matches(keys, key))
        .map(|(_, action)| action)
    }

    /// Applies `action` to a cursor over `len` items, `page` rows per page.
    pub fn apply(action: NavAction, cursor: usize, len: usize, page: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let last = len - 1;
        let page = page.max(1);
        match action {
            NavAction::Up => cursor.saturating_sub(1),
            NavAction::Down => (cursor + 1).min(last),
            NavAction::PageUp => cursor.saturating_sub(page),
            NavAction::PageDown => cursor.saturating_add(page).min(last),
            NavAction::First => 0,
            NavAction::Last => last,
        }
    }
}

/// Page movement for paginators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PagerAction {
    Previous,
    Next,
    First,
    Last,
    TogglePageSize,
}

#[derive(Clone, Debug)]
pub struct PagerBindings {
    pub previous: Vec<KeyEvent>,
    pub next: Vec<KeyEvent>,
    pub first: Vec<KeyEvent>,
    pub last: Vec<KeyEvent>,
    pub page_size: Vec<KeyEvent>,
}

impl Default for PagerBindings {
    fn default() -> Self {
        Self {
            previous: vec![key(KeyCode::Left), key_char('h')],
            next: vec![key(KeyCode::Right), key_char('l')],
            first: vec![key(KeyCode::Home)],
            last: vec![key(KeyCode::End)],
            page_size: vec![key_char('s')],
        }
    }
}

impl PagerBindings {
    pub fn action_for(&self, key: &KeyEvent) -> Option<PagerAction> {
        [
            (&self.previous, PagerAction::Previous),
            (&self.next, PagerAction::Next),
            (&self.first, PagerAction::First),
            (&self.last, PagerAction::Last),
            (&self.page_size, PagerAction::TogglePageSize),
        ]
        .into_iter()
        .find(|(keys, _)| any_matches(keys, key))
        .map(|(_, action)| action)
    }
}
