//! Search, sortable table, pagination and stats composed into one widget.
//!
//! [`DataTable`] owns the full data set and derives two views from it: the filtered indices
//! (search term plus sort order) and the current page, which is what the inner table shows.

use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;
use crate::filter;
use crate::input::FocusStep;
use crate::input::InputEvent;
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::pagination::DEFAULT_PAGE_SIZE_OPTIONS;
use crate::pagination::DEFAULT_WINDOW_RADIUS;
use crate::pagination::PageEvent;
use crate::pagination::Pagination;
use crate::paginator::Paginator;
use crate::paginator::PaginatorAction;
use crate::paginator::PaginatorOptions;
use crate::record::Column;
use crate::record::Row;
use crate::render;
use crate::search_bar::SearchBar;
use crate::search_bar::SearchBarAction;
use crate::search_bar::SearchBarOptions;
use crate::sort;
use crate::sort::SortConfig;
use crate::table::Table;
use crate::table::TableAction;
use crate::table::TableOptions;
use crate::theme::Theme;

/// User-facing strings. `stats` may use `{shown}` and `{total}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataTableLabels {
    pub search: String,
    pub searching: String,
    pub loading: String,
    pub empty: String,
    pub previous: String,
    pub next: String,
    pub page_size: String,
    pub page_size_suffix: String,
    pub stats: String,
}

impl Default for DataTableLabels {
    fn default() -> Self {
        Self {
            search: "Search".to_string(),
            searching: "Searching...".to_string(),
            loading: "Loading data...".to_string(),
            empty: "No results".to_string(),
            previous: "‹ Prev".to_string(),
            next: "Next ›".to_string(),
            page_size: "Items".to_string(),
            page_size_suffix: "items".to_string(),
            stats: "Showing {shown} of {total} results".to_string(),
        }
    }
}

/// Data-only settings of a [`DataTable`]; every field has a default.
///
/// ```
/// use ratatui_widgetkit::data_table::DataTableConfig;
///
/// let config = DataTableConfig::from_json_str(r#"{ "page_size": 5 }"#).unwrap();
/// assert_eq!(config.page_size_options, vec![5, 10, 15]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataTableConfig {
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    pub placeholder: String,
    pub show_stats: bool,
    pub window_radius: usize,
    pub labels: DataTableLabels,
}

impl Default for DataTableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            placeholder: "Search...".to_string(),
            show_stats: true,
            window_radius: DEFAULT_WINDOW_RADIUS,
            labels: DataTableLabels::default(),
        }
    }
}

impl DataTableConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.page_size_options.is_empty() {
            return Err(ConfigError::EmptyPageSizeOptions);
        }
        if self.page_size_options.contains(&0) {
            return Err(ConfigError::ZeroPageSizeOption);
        }
        if !self.page_size_options.contains(&self.page_size) {
            return Err(ConfigError::PageSizeNotOffered {
                page_size: self.page_size,
                options: self.page_size_options.clone(),
            });
        }
        Ok(())
    }

    /// Parses and validates a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataTableAction {
    None,
    Redraw,
    /// A search ran; carries the term.
    Searched(String),
    PageChanged(PageEvent),
    /// A row of the current page was activated; carries a copy of it.
    RowClicked(Row),
    SortChanged(SortConfig),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DataTableFocus {
    #[default]
    Search,
    Table,
    Paginator,
}

#[derive(Clone, Debug)]
pub struct DataTable {
    config: DataTableConfig,
    data: Vec<Row>,
    filtered: Vec<usize>,
    search_term: String,
    sort: Option<SortConfig>,
    loading: bool,
    focus: DataTableFocus,
    search_bar: SearchBar,
    table: Table,
    paginator: Paginator,
    search_area: Rect,
}

impl DataTable {
    pub fn new(columns: Vec<Column>) -> Self {
        Self::build(columns, DataTableConfig::default())
    }

    pub fn with_config(columns: Vec<Column>, config: DataTableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(columns, config))
    }

    fn build(columns: Vec<Column>, config: DataTableConfig) -> Self {
        let labels = &config.labels;

        let mut search_bar = SearchBar::with_options(SearchBarOptions {
            button_label: labels.search.clone(),
            busy_label: labels.searching.clone(),
        });
        search_bar.set_placeholder(config.placeholder.clone());

        let table = Table::with_options(
            columns,
            TableOptions {
                loading_text: labels.loading.clone(),
                empty_text: labels.empty.clone(),
                ..TableOptions::default()
            },
        );

        let mut paginator = Paginator::with_options(
            0,
            config.page_size,
            PaginatorOptions {
                previous_label: labels.previous.clone(),
                next_label: labels.next.clone(),
                page_size_label: labels.page_size.clone(),
                page_size_suffix: labels.page_size_suffix.clone(),
                ..PaginatorOptions::default()
            },
        );
        paginator.set_page_size_options(config.page_size_options.clone());
        paginator.set_window_radius(config.window_radius);

        let mut dt = Self {
            config,
            data: Vec::new(),
            filtered: Vec::new(),
            search_term: String::new(),
            sort: None,
            loading: false,
            focus: DataTableFocus::Search,
            search_bar,
            table,
            paginator,
            search_area: Rect::default(),
        };
        dt.sync_focus();
        dt
    }

    pub fn config(&self) -> &DataTableConfig {
        &self.config
    }

    pub fn columns(&self) -> &[Column] {
        self.table.columns()
    }

    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.table.set_columns(columns);
    }

    pub fn data(&self) -> &[Row] {
        &self.data
    }

    /// Replaces the data set, re-applies the current search and sort, and returns to the
    /// first page.
    pub fn set_data(&mut self, data: Vec<Row>) {
        log::debug!("data table: {} rows", data.len());
        self.data = data;
        self.refilter();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Filters by `term` (case-insensitive substring over every field) and returns to the
    /// first page.
    pub fn search(&mut self, term: impl Into<String>) -> DataTableAction {
        self.search_term = term.into();
        if self.search_bar.value() != self.search_term {
            self.search_bar.set_value(self.search_term.clone());
        }
        self.refilter();
        log::debug!(
            "search {:?}: {} of {} rows",
            self.search_term,
            self.filtered.len(),
            self.data.len()
        );
        DataTableAction::Searched(self.search_term.clone())
    }

    pub fn sort(&self) -> Option<&SortConfig> {
        self.sort.as_ref()
    }

    /// Sorts by `column`, ascending first and flipping on repeat.
    pub fn sort_by(&mut self, column: &str) -> DataTableAction {
        let config = sort::toggle(self.sort.as_ref(), column);
        self.set_sort(Some(config.clone()));
        log::debug!("sort {} {:?}", config.column, config.direction);
        DataTableAction::SortChanged(config)
    }

    pub fn set_sort(&mut self, sort: Option<SortConfig>) {
        self.sort = sort;
        self.table.set_sort(self.sort.clone());
        self.refilter();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// While loading the table shows the loading message, searching is disabled and the
    /// paginator is hidden.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.table.set_loading(loading);
        self.search_bar.set_disabled(loading);
        if loading && self.focus == DataTableFocus::Paginator {
            self.set_focus(DataTableFocus::Search);
        }
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// The filtered rows in display order.
    pub fn filtered(&self) -> impl Iterator<Item = &Row> {
        self.filtered.iter().map(|&i| &self.data[i])
    }

    /// The rows of the current page.
    pub fn paginated(&self) -> &[Row] {
        self.table.rows()
    }

    pub fn pagination(&self) -> &Pagination {
        self.paginator.pagination()
    }

    pub fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    pub fn page_size(&self) -> usize {
        self.paginator.page_size()
    }

    /// Adopts the page index and size of `event`, clamped to the filtered rows, and re-slices.
    ///
    /// The returned event describes the page actually shown. Nothing is emitted when the
    /// page and size stay the same.
    pub fn apply_page_event(&mut self, event: PageEvent) -> DataTableAction {
        let previous = self.paginator.current_page();
        if !self.paginator.apply(&event) {
            log::trace!("page event left page {previous} unchanged");
            return DataTableAction::None;
        }
        let adopted = PageEvent {
            previous_page_index: Some(previous),
            ..self.paginator.pagination().snapshot()
        };
        self.page_changed(adopted)
    }

    pub fn stats_text(&self) -> String {
        self.config
            .labels
            .stats
            .replace("{shown}", &self.paginated().len().to_string())
            .replace("{total}", &self.filtered.len().to_string())
    }

    pub fn shows_paginator(&self) -> bool {
        !self.loading && !self.filtered.is_empty()
    }

    pub fn focus(&self) -> DataTableFocus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: DataTableFocus) {
        self.focus = focus;
        self.sync_focus();
    }

    /// Terminal cursor position while the search input has focus.
    pub fn cursor_pos(&self) -> Option<(u16, u16)> {
        self.search_bar.cursor_pos(self.search_area)
    }

    pub fn search_bar(&self) -> &SearchBar {
        &self.search_bar
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn handle_event(&mut self, event: InputEvent) -> DataTableAction {
        match event {
            InputEvent::Key(key) => {
                if let Some(step) = key.focus_step()
                    && !self.paginator.is_page_size_open()
                {
                    return self.step_focus(step);
                }
                match self.focus {
                    DataTableFocus::Search => self.on_search_bar(InputEvent::Key(key)),
                    DataTableFocus::Table => self.on_table(InputEvent::Key(key)),
                    DataTableFocus::Paginator => self.on_paginator(InputEvent::Key(key)),
                }
            }
            InputEvent::Paste(_) if self.focus == DataTableFocus::Search => {
                self.on_search_bar(event)
            }
            InputEvent::Paste(_) => DataTableAction::None,
            InputEvent::Mouse(_) => {
                if self.shows_paginator() {
                    let action = self.on_paginator(event.clone());
                    if action != DataTableAction::None {
                        self.set_focus(DataTableFocus::Paginator);
                        return action;
                    }
                }
                let action = self.on_search_bar(event.clone());
                if action != DataTableAction::None {
                    return action;
                }
                let action = self.on_table(event);
                if matches!(action, DataTableAction::RowClicked(_)) {
                    self.set_focus(DataTableFocus::Table);
                }
                action
            }
        }
    }

    pub fn render_ref(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.is_empty() {
            return;
        }

        let paginator_h = if self.shows_paginator() {
            self.paginator.height()
        } else {
            0
        };
        let stats_h = u16::from(self.config.show_stats && !self.loading);
        let [search, _, table, paginator, stats] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(paginator_h),
            Constraint::Length(stats_h),
        ])
        .areas(area);

        self.search_area = search;
        self.search_bar.render_ref(search, buf, theme);
        self.table.render_ref(table, buf, theme);
        if paginator_h > 0 {
            self.paginator.render_ref(paginator, buf, theme);
        }
        if stats_h > 0 {
            render::render_str_clipped(
                stats.x,
                stats.y,
                0,
                stats.width,
                buf,
                &self.stats_text(),
                theme.text_muted,
            );
        }
    }

    fn on_search_bar(&mut self, event: InputEvent) -> DataTableAction {
        match self.search_bar.handle_event(event) {
            SearchBarAction::Search(term) => self.search(term),
            SearchBarAction::ValueChanged(_) => DataTableAction::Redraw,
            SearchBarAction::None => DataTableAction::None,
        }
    }

    fn on_table(&mut self, event: InputEvent) -> DataTableAction {
        match self.table.handle_event(event) {
            TableAction::RowClicked(i) => self
                .table
                .row(i)
                .cloned()
                .map_or(DataTableAction::None, DataTableAction::RowClicked),
            TableAction::SortRequested(column) => self.sort_by(&column),
            TableAction::Redraw => DataTableAction::Redraw,
            TableAction::None => DataTableAction::None,
        }
    }

    fn on_paginator(&mut self, event: InputEvent) -> DataTableAction {
        match self.paginator.handle_event(event) {
            PaginatorAction::PageChanged(event) => self.page_changed(event),
            PaginatorAction::Redraw => DataTableAction::Redraw,
            PaginatorAction::None => DataTableAction::None,
        }
    }

    fn page_changed(&mut self, event: PageEvent) -> DataTableAction {
        self.reslice();
        log::debug!(
            "page {} (size {}) of {} rows",
            event.page_index,
            event.page_size,
            self.filtered.len()
        );
        DataTableAction::PageChanged(event)
    }

    fn step_focus(&mut self, step: FocusStep) -> DataTableAction {
        let forward = step == FocusStep::Next;
        if self.focus == DataTableFocus::Search && self.search_bar.focus_step(forward) {
            return DataTableAction::Redraw;
        }

        let mut order = vec![DataTableFocus::Search, DataTableFocus::Table];
        if self.shows_paginator() {
            order.push(DataTableFocus::Paginator);
        }
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (pos + 1) % order.len()
        } else {
            (pos + order.len() - 1) % order.len()
        };
        self.set_focus(order[next]);
        // Stepping back into the search bar lands on its last part, the button.
        if !forward && self.focus == DataTableFocus::Search {
            self.search_bar.focus_step(true);
        }
        DataTableAction::Redraw
    }

    fn sync_focus(&mut self) {
        self.search_bar
            .set_focused(self.focus == DataTableFocus::Search);
        self.table.set_focused(self.focus == DataTableFocus::Table);
        self.paginator
            .set_focused(self.focus == DataTableFocus::Paginator);
    }

    fn refilter(&mut self) {
        self.filtered = filter::filter_indices(&self.data, &self.search_term);
        if let Some(config) = &self.sort {
            sort::sort_indices(&self.data, &mut self.filtered, config);
        }
        self.paginator.set_total_items(self.filtered.len());
        self.paginator.go_to_page(0);
        if self.focus == DataTableFocus::Paginator && !self.shows_paginator() {
            self.set_focus(DataTableFocus::Search);
        }
        self.reslice();
    }

    fn reslice(&mut self) {
        let rows = self
            .paginator
            .pagination()
            .slice(&self.filtered)
            .iter()
            .map(|&i| self.data[i].clone())
            .collect();
        self.table.set_rows(rows);
    }
}
