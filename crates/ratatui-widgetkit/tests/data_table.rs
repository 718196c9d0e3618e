use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui_widgetkit::data_table::DataTable;
use ratatui_widgetkit::data_table::DataTableAction;
use ratatui_widgetkit::input::InputEvent;
use ratatui_widgetkit::input::KeyCode;
use ratatui_widgetkit::record::Column;
use ratatui_widgetkit::record::rows_from_json;
use ratatui_widgetkit::render::buffer_line;
use ratatui_widgetkit::sort::SortDirection;
use ratatui_widgetkit::theme::Theme;

const W: u16 = 40;
const H: u16 = 16;
// Row layout for a 40x16 area: search bar, gap, table (12 rows), paginator, stats.
const HEADER_Y: u16 = 2;
const PAGINATOR_Y: u16 = 14;
const STATS_Y: u16 = 15;

fn people(n: usize) -> String {
    let rows: Vec<String> = (0..n)
        .map(|i| {
            let name = if i % 2 == 0 { "Ada" } else { "Bob" };
            format!(r#"{{ "id": {i}, "name": "{name} {i}" }}"#)
        })
        .collect();
    format!("[{}]", rows.join(","))
}

fn data_table(n: usize) -> DataTable {
    let mut dt = DataTable::new(vec![
        Column::new("id", "ID").width(4).sortable(),
        Column::new("name", "Name"),
    ]);
    dt.set_data(rows_from_json(&people(n)).unwrap());
    dt
}

fn draw(dt: &mut DataTable) -> Buffer {
    let mut buf = Buffer::empty(Rect::new(0, 0, W, H));
    dt.render_ref(buf.area, &mut buf, &Theme::default());
    buf
}

fn lines(buf: &Buffer) -> Vec<String> {
    (0..buf.area.height).map(|y| buffer_line(buf, y)).collect()
}

#[test]
fn renders_search_table_paginator_and_stats() {
    let mut dt = data_table(12);
    let buf = draw(&mut dt);

    assert_eq!(
        buffer_line(&buf, 0),
        format!("Search...{}[ Search ]", " ".repeat(21))
    );
    assert_eq!(buffer_line(&buf, HEADER_Y), "ID  │Name");
    assert_eq!(buffer_line(&buf, HEADER_Y + 1), "0   │Ada 0");
    assert_eq!(buffer_line(&buf, HEADER_Y + 10), "9   │Bob 9");
    assert_eq!(buffer_line(&buf, HEADER_Y + 11), "");
    assert_eq!(
        buffer_line(&buf, PAGINATOR_Y),
        "‹ Prev  1  2  Next ›  Items: 10 items ▾"
    );
    assert_eq!(buffer_line(&buf, STATS_Y), "Showing 10 of 12 results");
}

#[test]
fn clicking_a_page_shows_its_rows() {
    let mut dt = data_table(12);
    draw(&mut dt);

    // " 2 " spans columns 10..13 of the paginator row.
    let action = dt.handle_event(InputEvent::click(11, PAGINATOR_Y));
    let DataTableAction::PageChanged(event) = action else {
        panic!("expected a page change, got {action:?}");
    };
    assert_eq!(event.page_index, 1);
    assert_eq!(event.previous_page_index, Some(0));
    assert_eq!(event.length, 12);

    let buf = draw(&mut dt);
    assert_eq!(buffer_line(&buf, HEADER_Y + 1), "10  │Ada 10");
    assert_eq!(buffer_line(&buf, HEADER_Y + 2), "11  │Bob 11");
    assert_eq!(buffer_line(&buf, STATS_Y), "Showing 2 of 12 results");
}

#[test]
fn search_narrows_rows_and_pages() {
    let mut dt = data_table(12);
    for ch in "ADA".chars() {
        dt.handle_event(InputEvent::key(KeyCode::Char(ch)));
    }
    assert_eq!(
        dt.handle_event(InputEvent::key(KeyCode::Enter)),
        DataTableAction::Searched("ADA".to_string())
    );

    let buf = draw(&mut dt);
    assert!(buffer_line(&buf, 0).starts_with("ADA "));
    assert_eq!(buffer_line(&buf, HEADER_Y + 6), "10  │Ada 10");
    assert_eq!(
        buffer_line(&buf, PAGINATOR_Y),
        "‹ Prev  1  Next ›  Items: 10 items ▾"
    );
    assert_eq!(buffer_line(&buf, STATS_Y), "Showing 6 of 6 results");
}

#[test]
fn empty_result_hides_paginator() {
    let mut dt = data_table(12);
    dt.search("nobody");
    let buf = draw(&mut dt);
    let lines = lines(&buf);

    assert_eq!(lines[HEADER_Y as usize + 1].trim(), "No results");
    assert!(lines.iter().all(|l| !l.contains("Next ›")));
    assert_eq!(buffer_line(&buf, STATS_Y), "Showing 0 of 0 results");
}

#[test]
fn loading_shows_message_and_busy_button() {
    let mut dt = data_table(12);
    dt.set_loading(true);
    let buf = draw(&mut dt);
    let lines = lines(&buf);

    assert!(lines[0].ends_with("[ Searching... ]"));
    assert_eq!(lines[HEADER_Y as usize + 1].trim(), "Loading data...");
    assert!(lines.iter().all(|l| !l.contains("Next ›")));
    assert!(lines.iter().all(|l| !l.starts_with("Showing")));

    dt.set_loading(false);
    let buf = draw(&mut dt);
    assert_eq!(buffer_line(&buf, STATS_Y), "Showing 10 of 12 results");
}

#[test]
fn header_click_sorts_and_row_click_reports_row() {
    let mut dt = data_table(12);
    draw(&mut dt);

    let action = dt.handle_event(InputEvent::click(1, HEADER_Y));
    assert!(matches!(action, DataTableAction::SortChanged(ref s) if s.direction == SortDirection::Asc));
    draw(&mut dt);
    let action = dt.handle_event(InputEvent::click(1, HEADER_Y));
    assert!(matches!(action, DataTableAction::SortChanged(ref s) if s.direction == SortDirection::Desc));

    let buf = draw(&mut dt);
    assert_eq!(buffer_line(&buf, HEADER_Y), "ID ▼│Name");
    assert_eq!(buffer_line(&buf, HEADER_Y + 1), "11  │Bob 11");

    let DataTableAction::RowClicked(row) = dt.handle_event(InputEvent::click(8, HEADER_Y + 2))
    else {
        panic!("expected a row click");
    };
    assert_eq!(row.display("name"), "Ada 10");
    assert_eq!(row.get("id").and_then(|v| v.as_u64()), Some(10));
}

#[test]
fn page_size_change_returns_to_first_page() {
    let mut dt = data_table(12);
    dt.handle_event(InputEvent::key(KeyCode::Tab));
    dt.handle_event(InputEvent::key(KeyCode::Tab));
    dt.handle_event(InputEvent::key(KeyCode::Tab));
    dt.handle_event(InputEvent::key(KeyCode::End));
    assert_eq!(dt.current_page(), 1);

    dt.handle_event(InputEvent::key(KeyCode::Char('s')));
    dt.handle_event(InputEvent::key(KeyCode::Up));
    let action = dt.handle_event(InputEvent::key(KeyCode::Enter));
    let DataTableAction::PageChanged(event) = action else {
        panic!("expected a page change, got {action:?}");
    };
    assert_eq!((event.page_index, event.page_size), (0, 5));
    assert_eq!(dt.paginated().len(), 5);
    assert_eq!(dt.pagination().max_page(), 3);
}
