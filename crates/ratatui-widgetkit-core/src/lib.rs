//! `ratatui-widgetkit-core` holds the UI-agnostic pieces behind the `ratatui-widgetkit` widgets.
//!
//! Nothing in this crate draws a complete widget. It provides the input model, the drawing
//! helpers, and the data logic that the table widgets are built on, so the logic can be used
//! (and tested) without a terminal.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime: everything runs synchronously on the caller's thread.
//! - Logging goes through the `log` facade; installing a logger is up to the application.
//!
//! Useful entry points:
//! - [`pagination::Pagination`]: page index/size bookkeeping with clamping.
//! - [`pagination::page_window`]: the page list a paginator shows, with ellipses.
//! - [`filter::filter_indices`]: case-insensitive search over [`record::Row`]s.
//! - [`sort::sort_indices`]: column sorting for sortable columns.
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod error;
pub mod input;
pub mod keymap;
pub mod render;
pub mod viewport;

pub mod filter;
pub mod pagination;
pub mod record;
pub mod sort;
