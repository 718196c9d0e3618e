//! `ratatui-widgetkit` is a small set of interactive ratatui widgets, from a button up to a
//! searchable, sortable, paginated data table.
//!
//! Every widget follows the same shape:
//!
//! - build it with `new(..)` or `with_options(..)`, then set properties through setters;
//! - feed it [`input::InputEvent`]s with `handle_event`, which returns a per-widget `*Action`
//!   describing what happened (a page change, a search, a row click, ...);
//! - draw it with `render_ref(area, buf, &theme)`, which also records the areas used for mouse
//!   hit-testing.
//!
//! Composite widgets ([`search_bar::SearchBar`], [`paginator::Paginator`],
//! [`data_table::DataTable`], [`card::Card`]) own their children and translate child actions
//! into their own.
//!
//! With the `crossterm` feature, [`crossterm_input::input_event_from_crossterm`] converts
//! terminal events into [`input::InputEvent`]s.
pub use ratatui_widgetkit_core::error;
pub use ratatui_widgetkit_core::filter;
pub use ratatui_widgetkit_core::input;
pub use ratatui_widgetkit_core::keymap;
pub use ratatui_widgetkit_core::pagination;
pub use ratatui_widgetkit_core::record;
pub use ratatui_widgetkit_core::render;
pub use ratatui_widgetkit_core::sort;
pub use ratatui_widgetkit_core::theme;
pub use ratatui_widgetkit_core::viewport;

#[cfg(feature = "crossterm")]
pub use ratatui_widgetkit_core::crossterm_input;

pub mod button;
pub mod option_item;
pub mod text_input;

pub mod paginator;
pub mod search_bar;
pub mod select;
pub mod table;

pub mod card;
pub mod data_table;
