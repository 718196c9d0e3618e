use std::fs::File;
use std::io;
use std::time::Duration;

use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyModifiers;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Alignment;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_widgetkit::card::Card;
use ratatui_widgetkit::card::CardAction;
use ratatui_widgetkit::crossterm_input::input_event_from_crossterm;
use ratatui_widgetkit::data_table::DataTable;
use ratatui_widgetkit::data_table::DataTableAction;
use ratatui_widgetkit::data_table::DataTableConfig;
use ratatui_widgetkit::data_table::DataTableFocus;
use ratatui_widgetkit::record::Column;
use ratatui_widgetkit::record::Row;
use ratatui_widgetkit::theme::Theme;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

const FIRST: [&str; 8] = ["Ada", "Grace", "Alan", "Edsger", "Barbara", "Ken", "Margaret", "Linus"];
const LAST: [&str; 6] = ["Lovelace", "Hopper", "Turing", "Dijkstra", "Liskov", "Thompson"];
const ROLES: [&str; 4] = ["admin", "editor", "viewer", "owner"];

fn main() -> io::Result<()> {
    let log_file = File::create("data_table.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file).map_err(io::Error::other)?;

    let config = DataTableConfig::from_json_str(r#"{ "page_size": 5, "window_radius": 1 }"#)
        .map_err(io::Error::other)?;
    let columns = vec![
        Column::new("id", "ID").width(6).align(Alignment::Right).sortable(),
        Column::new("name", "Name").sortable(),
        Column::new("role", "Role").sortable(),
        Column::new("active", "Active")
            .width(8)
            .render(|row| match row.get("active").and_then(|v| v.as_bool()) {
                Some(true) => "yes".to_string(),
                _ => "no".to_string(),
            }),
    ];
    let mut table = DataTable::with_config(columns, config).map_err(io::Error::other)?;
    table.set_data(sample_rows(137));

    let mut card = Card::default();
    card.set_body(["Enter or click a row", "to show it here."]);

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, &Theme::default(), &mut table, &mut card);

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    res
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    theme: &Theme,
    table: &mut DataTable,
    card: &mut Card,
) -> io::Result<()> {
    let mut status = String::from("Tab: focus  Enter: search/open  s: page size  F5: loading  q/Ctrl+C: quit");
    loop {
        terminal.draw(|f| {
            let [main, side] =
                Layout::horizontal([Constraint::Min(40), Constraint::Length(28)]).areas(f.area());
            let [main, status_area] =
                Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(main);

            let block = Block::default().title("DataTable").borders(Borders::ALL);
            let inner = block.inner(main);
            f.render_widget(block, main);

            let buf = f.buffer_mut();
            table.render_ref(inner, buf, theme);
            let card_h = card.height().min(side.height);
            card.render_ref(Rect { height: card_h, ..side }, buf, theme);
            buf.set_span(
                status_area.x,
                status_area.y,
                &Span::styled(status.as_str(), theme.text_muted),
                status_area.width,
            );

            if let Some((x, y)) = table.cursor_pos() {
                f.set_cursor_position((x, y));
            }
        })?;

        if !crossterm::event::poll(Duration::from_millis(100))? {
            continue;
        }
        let ev = crossterm::event::read()?;
        if let Event::Key(key) = &ev {
            let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
                && key.code == KeyCode::Char('c');
            let quit = key.code == KeyCode::Char('q')
                && table.focus() != DataTableFocus::Search;
            if ctrl_c || quit {
                return Ok(());
            }
            if key.code == KeyCode::F(5) {
                table.set_loading(!table.is_loading());
                continue;
            }
        }

        let Some(ev) = input_event_from_crossterm(ev) else {
            continue;
        };
        if let CardAction::Follow(name) = card.handle_event(ev.clone()) {
            status = format!("following {name}");
            continue;
        }
        match table.handle_event(ev) {
            DataTableAction::RowClicked(row) => show_row(card, &row),
            DataTableAction::Searched(term) => {
                status = format!("search {term:?}: {}", table.stats_text());
            }
            DataTableAction::PageChanged(page) => {
                status = format!("page {} (size {})", page.page_index + 1, page.page_size);
            }
            DataTableAction::SortChanged(sort) => {
                status = format!("sorted by {} {}", sort.column, sort.direction.indicator());
            }
            DataTableAction::Redraw | DataTableAction::None => {}
        }
    }
}

fn show_row(card: &mut Card, row: &Row) {
    card.set_username(row.display("name"));
    card.set_body([
        format!("id: {}", row.display("id")),
        format!("role: {}", row.display("role")),
    ]);
}

fn sample_rows(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| {
            Row::new()
                .with("id", i as u64 + 1)
                .with("name", format!("{} {}", FIRST[i % FIRST.len()], LAST[i % LAST.len()]))
                .with("role", ROLES[i % ROLES.len()])
                .with("active", i % 3 != 0)
        })
        .collect()
}

