use ratatui::buffer::Buffer;
use ratatui::layout::Alignment;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;

use crate::input::InputEvent;
use crate::input::KeyEvent;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::keymap::NavBindings;
use crate::record::Column;
use crate::record::Row;
use crate::render;
use crate::sort::SortConfig;
use crate::theme::Theme;
use crate::viewport::RowViewport;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableAction {
    None,
    Redraw,
    /// A body row was activated (Enter or click); carries its index into `rows()`.
    RowClicked(usize),
    /// A sortable header was clicked; carries the column key.
    SortRequested(String),
}

#[derive(Clone, Debug)]
pub struct TableOptions {
    pub show_header: bool,
    pub show_scrollbar: bool,
    pub col_gap: u16,
    pub style: Style,
    pub header_style: Style,
    pub cursor_style: Style,
    pub loading_text: String,
    pub empty_text: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            show_header: true,
            show_scrollbar: true,
            col_gap: 1,
            style: Style::default(),
            header_style: Style::default().add_modifier(Modifier::BOLD),
            cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            loading_text: "Loading data...".to_string(),
            empty_text: "No results".to_string(),
        }
    }
}

/// A column/row table over [`Row`] records with a row cursor.
///
/// Cells show the column's custom render output, or the field's string form. The body scrolls
/// vertically to keep the cursor in view; columns never scroll, they are sized to fit.
#[derive(Clone, Debug, Default)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Row>,
    loading: bool,
    focused: bool,
    cursor: Option<usize>,
    sort: Option<SortConfig>,
    viewport: RowViewport,
    nav: NavBindings,
    options: TableOptions,
    header_area: Rect,
    body_area: Rect,
    /// `(x, width)` of each column from the last render.
    col_spans: Vec<(u16, u16)>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    pub fn with_options(columns: Vec<Column>, options: TableOptions) -> Self {
        Self {
            options,
            ..Self::new(columns)
        }
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: TableOptions) {
        self.options = options;
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns = columns;
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Replaces the rows. The cursor is kept if it still points at a row.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.viewport.set_len(self.rows.len());
        self.cursor = match self.cursor {
            _ if self.rows.is_empty() => None,
            Some(c) => Some(c.min(self.rows.len() - 1)),
            None => None,
        };
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if focused && self.cursor.is_none() && !self.rows.is_empty() {
            self.cursor = Some(0);
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Option<usize>) {
        self.cursor = cursor
            .filter(|_| !self.rows.is_empty())
            .map(|c| c.min(self.rows.len() - 1));
        if let Some(c) = self.cursor {
            self.viewport.ensure_visible(c);
        }
    }

    pub fn sort(&self) -> Option<&SortConfig> {
        self.sort.as_ref()
    }

    /// Sets the sort shown in the header. Ordering the rows is up to the caller.
    pub fn set_sort(&mut self, sort: Option<SortConfig>) {
        self.sort = sort;
    }

    pub fn viewport(&self) -> &RowViewport {
        &self.viewport
    }

    pub fn handle_event(&mut self, event: InputEvent) -> TableAction {
        if self.loading {
            return TableAction::None;
        }
        match event {
            InputEvent::Key(key) if self.focused => self.handle_key(key),
            InputEvent::Mouse(m) => self.handle_mouse(m),
            _ => TableAction::None,
        }
    }

    pub fn render_ref(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.is_empty() {
            self.header_area = Rect::default();
            self.body_area = Rect::default();
            self.col_spans.clear();
            return;
        }

        let (content, scrollbar_x) = if self.options.show_scrollbar && area.width >= 2 {
            (
                Rect::new(area.x, area.y, area.width - 1, area.height),
                Some(area.x + area.width - 1),
            )
        } else {
            (area, None)
        };

        let header_h = u16::from(self.options.show_header).min(content.height);
        self.header_area = Rect::new(content.x, content.y, content.width, header_h);
        self.body_area = Rect::new(
            content.x,
            content.y + header_h,
            content.width,
            content.height - header_h,
        );

        let base = theme.text_primary.patch(self.options.style);
        buf.set_style(content, base);

        let widths = column_widths(&self.columns, content.width, self.options.col_gap);
        self.col_spans.clear();
        let mut x = content.x;
        for w in &widths {
            self.col_spans.push((x, *w));
            x = x.saturating_add(*w).saturating_add(self.options.col_gap);
        }

        if header_h > 0 {
            self.render_header(buf, theme, base);
        }

        self.viewport.set_height(self.body_area.height as usize);
        self.viewport.set_len(self.rows.len());
        if let Some(c) = self.cursor {
            self.viewport.ensure_visible(c);
        }
        self.render_body(buf, theme, base);

        if let Some(sb_x) = scrollbar_x {
            render::render_scrollbar(
                Rect::new(sb_x, self.body_area.y, 1, self.body_area.height),
                buf,
                &self.viewport,
                theme.border,
            );
        }
    }

    fn render_header(&self, buf: &mut Buffer, theme: &Theme, base: Style) {
        let style = base.patch(self.options.header_style);
        let y = self.header_area.y;
        buf.set_style(self.header_area, style);
        for (col, &(x, w)) in self.columns.iter().zip(&self.col_spans) {
            let label = match &self.sort {
                Some(sort) if sort.column == col.key => {
                    format!("{} {}", col.label, sort.direction.indicator())
                }
                _ => col.label.clone(),
            };
            let text = render::align_in_width(&label, w as usize, col.align);
            let max = self.max_cols_from(x, self.header_area);
            render::render_str_clipped(x, y, 0, max, buf, &text, style);
            self.render_separator(buf, x + w, y, self.header_area, theme);
        }
    }

    fn render_body(&self, buf: &mut Buffer, theme: &Theme, base: Style) {
        let area = self.body_area;
        if area.is_empty() {
            return;
        }

        let message = if self.loading {
            Some(&self.options.loading_text)
        } else if self.rows.is_empty() {
            Some(&self.options.empty_text)
        } else {
            None
        };
        if let Some(message) = message {
            let text = render::align_in_width(message, area.width as usize, Alignment::Center);
            render::render_str_clipped(area.x, area.y, 0, area.width, buf, &text, theme.text_muted);
            return;
        }

        for (screen_row, idx) in self.viewport.visible().enumerate() {
            let y = area.y + screen_row as u16;
            let is_cursor = self.focused && self.cursor == Some(idx);
            let row_style = if is_cursor {
                base.patch(self.options.cursor_style)
            } else {
                base
            };
            buf.set_style(Rect::new(area.x, y, area.width, 1), row_style);

            let row = &self.rows[idx];
            for (col, &(x, w)) in self.columns.iter().zip(&self.col_spans) {
                let text = render::align_in_width(&col.cell_text(row), w as usize, col.align);
                let max = self.max_cols_from(x, area);
                render::render_str_clipped(x, y, 0, max, buf, &text, row_style.patch(col.style));
                self.render_separator(buf, x + w, y, area, theme);
            }
        }
    }

    fn render_separator(&self, buf: &mut Buffer, x: u16, y: u16, area: Rect, theme: &Theme) {
        if self.options.col_gap == 0 || x >= area.right() {
            return;
        }
        let is_last = self.col_spans.last().is_some_and(|&(lx, lw)| lx + lw == x);
        if !is_last {
            buf.set_stringn(x, y, "│", 1, theme.border);
        }
    }

    fn max_cols_from(&self, x: u16, area: Rect) -> u16 {
        area.right().saturating_sub(x)
    }

    fn handle_key(&mut self, key: KeyEvent) -> TableAction {
        if self.rows.is_empty() {
            return TableAction::None;
        }
        if key.is_activate() {
            return self
                .cursor
                .map_or(TableAction::None, TableAction::RowClicked);
        }
        let Some(nav) = self.nav.action_for(&key) else {
            log::trace!("table ignored key {:?}", key.code);
            return TableAction::None;
        };
        let page = self.viewport.height().saturating_sub(1).max(1);
        let next = match self.cursor {
            Some(c) => NavBindings::apply(nav, c, self.rows.len(), page),
            None => 0,
        };
        if Some(next) == self.cursor {
            return TableAction::None;
        }
        self.set_cursor(Some(next));
        TableAction::Redraw
    }

    fn handle_mouse(&mut self, m: MouseEvent) -> TableAction {
        if !m.is_inside(self.header_area) && !m.is_inside(self.body_area) {
            return TableAction::None;
        }
        match m.kind {
            MouseEventKind::ScrollUp => {
                self.viewport.scroll_by(-1);
                TableAction::Redraw
            }
            MouseEventKind::ScrollDown => {
                self.viewport.scroll_by(1);
                TableAction::Redraw
            }
            _ if m.clicked(self.header_area) => self
                .column_at(m.x)
                .filter(|&i| self.columns[i].sortable)
                .map_or(TableAction::None, |i| {
                    TableAction::SortRequested(self.columns[i].key.clone())
                }),
            _ if m.clicked(self.body_area) => {
                match self.viewport.row_at((m.y - self.body_area.y) as usize) {
                    Some(row) => {
                        self.cursor = Some(row);
                        TableAction::RowClicked(row)
                    }
                    None => TableAction::None,
                }
            }
            _ => TableAction::None,
        }
    }

    fn column_at(&self, x: u16) -> Option<usize> {
        self.col_spans
            .iter()
            .position(|&(cx, w)| x >= cx && x < cx.saturating_add(w))
    }
}

/// Splits `total` columns between `columns`: fixed widths first, the rest shared equally
/// (remainder to the leftmost flexible columns).
pub fn column_widths(columns: &[Column], total: u16, gap: u16) -> Vec<u16> {
    if columns.is_empty() {
        return Vec::new();
    }
    let gaps = gap.saturating_mul(columns.len() as u16 - 1);
    let fixed: u16 = columns
        .iter()
        .filter_map(|c| c.width)
        .fold(0u16, u16::saturating_add);
    let flex = columns.iter().filter(|c| c.width.is_none()).count() as u16;
    let leftover = total.saturating_sub(gaps).saturating_sub(fixed);
    let (share, mut extra) = if flex == 0 {
        (0, 0)
    } else {
        (leftover / flex, leftover % flex)
    };

    columns
        .iter()
        .map(|c| match c.width {
            Some(w) => w,
            None => {
                let bump = u16::from(extra > 0);
                extra -= bump;
                share + bump
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;
    use crate::render::buffer_line;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("id", "ID").width(3).align(Alignment::Right),
            Column::new("name", "Name").sortable(),
        ]
    }

    fn rows(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| Row::new().with("id", i).with("name", format!("user{i}")))
            .collect()
    }

    fn table(n: usize) -> Table {
        let mut t = Table::with_options(
            columns(),
            TableOptions {
                show_scrollbar: false,
                ..Default::default()
            },
        );
        t.set_rows(rows(n));
        t
    }

    fn draw(t: &mut Table, w: u16, h: u16) -> Buffer {
        let mut buf = Buffer::empty(Rect::new(0, 0, w, h));
        t.render_ref(buf.area, &mut buf, &Theme::default());
        buf
    }

    #[test]
    fn widths_share_leftover_space() {
        let cols = vec![
            Column::new("a", "A").width(4),
            Column::new("b", "B"),
            Column::new("c", "C"),
        ];
        assert_eq!(column_widths(&cols, 15, 1), vec![4, 5, 4]);
        assert_eq!(column_widths(&cols, 3, 1), vec![4, 0, 0]);
        assert!(column_widths(&[], 10, 1).is_empty());
    }

    #[test]
    fn renders_header_and_rows() {
        let mut t = table(3);
        let buf = draw(&mut t, 12, 4);
        assert_eq!(buffer_line(&buf, 0), " ID│Name");
        assert_eq!(buffer_line(&buf, 1), "  0│user0");
        assert_eq!(buffer_line(&buf, 3), "  2│user2");
    }

    #[test]
    fn custom_render_and_sort_indicator() {
        let mut t = table(1);
        t.set_columns(vec![
            Column::new("name", "Name").sortable(),
            Column::new("shout", "Loud").render(|r| r.display("name").to_uppercase()),
        ]);
        t.set_sort(Some(SortConfig::desc("name")));
        let buf = draw(&mut t, 17, 2);
        assert_eq!(buffer_line(&buf, 0), "Name ▼  │Loud");
        assert_eq!(buffer_line(&buf, 1), "user0   │USER0");
    }

    #[test]
    fn loading_replaces_body_and_blocks_events() {
        let mut t = table(2);
        t.set_loading(true);
        let buf = draw(&mut t, 21, 3);
        assert_eq!(buffer_line(&buf, 1), "   Loading data...");
        t.set_focused(true);
        assert_eq!(t.handle_event(InputEvent::key(KeyCode::Enter)), TableAction::None);
    }

    #[test]
    fn empty_rows_show_empty_text() {
        let mut t = table(0);
        let buf = draw(&mut t, 14, 2);
        assert_eq!(buffer_line(&buf, 1), "  No results");
    }

    #[test]
    fn cursor_scrolls_and_enter_clicks_row() {
        let mut t = table(10);
        t.set_focused(true);
        draw(&mut t, 12, 4);
        for _ in 0..5 {
            t.handle_event(InputEvent::key(KeyCode::Down));
        }
        assert_eq!(t.cursor(), Some(5));
        assert_eq!(t.viewport().offset(), 3);
        assert_eq!(t.handle_event(InputEvent::key(KeyCode::Enter)), TableAction::RowClicked(5));
        t.handle_event(InputEvent::key(KeyCode::End));
        assert_eq!(t.cursor(), Some(9));
    }

    #[test]
    fn clicks_hit_rows_and_sortable_headers() {
        let mut t = table(5);
        draw(&mut t, 12, 4);
        assert_eq!(t.handle_event(InputEvent::click(6, 2)), TableAction::RowClicked(1));
        assert_eq!(t.cursor(), Some(1));
        assert_eq!(
            t.handle_event(InputEvent::click(6, 0)),
            TableAction::SortRequested("name".to_string())
        );
        assert_eq!(t.handle_event(InputEvent::click(1, 0)), TableAction::None);
    }

    #[test]
    fn shrinking_rows_clamps_cursor() {
        let mut t = table(5);
        t.set_cursor(Some(4));
        t.set_rows(rows(2));
        assert_eq!(t.cursor(), Some(1));
        t.set_rows(Vec::new());
        assert_eq!(t.cursor(), None);
    }
}
