// Table rendering for list views.
// Header sort arrows, selection checkboxes, and empty states.

use ratatui::{prelude::*, widgets::*};

use crate::domain::{DocumentField, LegalDocument, Trip};
use crate::state::table::TableField;
use crate::state::{HeaderCheckbox, Record, Session, SortDirection, TableView, TripReport};

fn highlight() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

fn header_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, title: String, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(text, area);
}

fn checkbox(header: HeaderCheckbox) -> &'static str {
    if header.checked {
        "[x]"
    } else if header.indeterminate {
        "[-]"
    } else {
        "[ ]"
    }
}

/// Block title with row counts, the search term, and active filters.
fn table_title<R: Record>(view: &TableView<R>, title: &str, visible: usize, total: usize) -> String {
    let query = view.engine.query();
    let mut parts = vec![format!(" {} ({}/{})", title, visible, total)];
    if !query.search_term.is_empty() {
        parts.push(format!("/{}", query.search_term));
    }
    let mut filters: Vec<String> = query
        .filters
        .iter()
        .map(|(field, value)| format!("{}={}", field.label(), value))
        .collect();
    filters.sort();
    parts.extend(filters);
    if !query.selection.is_empty() {
        parts.push(format!("{} selected", query.selection.len()));
    }
    format!("{} ", parts.join("  "))
}

/// Render the derived view of `records` as a table.
///
/// `selectable` adds a checkbox column whose header shows the tri-state
/// header checkbox.
pub fn render_records<R: Record>(
    frame: &mut Frame,
    view: &mut TableView<R>,
    records: &[R],
    columns: &[(R::Field, Constraint)],
    title: &str,
    selectable: bool,
    area: Rect,
) {
    let rows = view.engine.derived_view(records);
    let block_title = table_title(view, title, rows.len(), records.len());
    if rows.is_empty() {
        let message = if records.is_empty() {
            format!("No {} yet", R::ENTITY)
        } else {
            format!("No {} match the current search", R::ENTITY)
        };
        render_empty(frame, area, block_title, &message);
        return;
    }

    let sort = view.engine.sort();
    let mut header_cells: Vec<Cell> = Vec::new();
    if selectable {
        header_cells.push(Cell::from(checkbox(view.engine.header_checkbox(records))));
    }
    for (field, _) in columns {
        let arrow = match sort {
            Some(current) if current.key == *field => match current.direction {
                SortDirection::Ascending => " ▲",
                SortDirection::Descending => " ▼",
            },
            _ => "",
        };
        header_cells.push(Cell::from(format!("{}{}", field.label(), arrow)));
    }

    let table_rows: Vec<Row> = rows
        .iter()
        .map(|record| {
            let mut cells: Vec<Cell> = Vec::new();
            if selectable {
                let mark = if view.engine.is_selected(record.id()) {
                    "[x]"
                } else {
                    "[ ]"
                };
                cells.push(Cell::from(mark));
            }
            cells.extend(
                columns
                    .iter()
                    .map(|(field, _)| Cell::from(record.value(*field).to_string())),
            );
            Row::new(cells)
        })
        .collect();

    let mut widths: Vec<Constraint> = Vec::new();
    if selectable {
        widths.push(Constraint::Length(3));
    }
    widths.extend(columns.iter().map(|(_, width)| *width));

    let table = Table::new(table_rows, widths)
        .header(Row::new(header_cells).style(header_style()))
        .block(Block::default().borders(Borders::ALL).title(block_title))
        .row_highlight_style(highlight())
        .highlight_symbol("> ");

    frame.render_stateful_widget(table, area, &mut view.table_state);
}

/// Trips with their participant counts.
pub fn render_dashboard(
    frame: &mut Frame,
    trips: &mut TableView<Trip>,
    session: &Session,
    area: Rect,
) {
    let records = session.trips.records();
    if records.is_empty() {
        render_empty(frame, area, " Trips ".to_string(), "No trips yet. Press n to create one");
        return;
    }

    let rows: Vec<Row> = trips
        .engine
        .derived_view(records)
        .iter()
        .map(|trip| {
            Row::new(vec![
                Cell::from(Span::styled(trip.name.clone(), Style::default().fg(Color::Cyan))),
                Cell::from(trip.destination.clone()),
                Cell::from(format!(
                    "{} → {}",
                    trip.start_date.format("%d %b"),
                    trip.end_date.format("%d %b %Y")
                )),
                Cell::from(session.participant_count(&trip.name).to_string()),
                Cell::from(Span::styled(
                    session.unregistered_count(&trip.name).to_string(),
                    Style::default().fg(Color::Yellow),
                )),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(25),
            Constraint::Length(22),
            Constraint::Length(12),
            Constraint::Length(12),
        ],
    )
    .header(
        Row::new(vec!["Trip", "Destination", "Dates", "Participants", "Pending"])
            .style(header_style()),
    )
    .block(Block::default().borders(Borders::ALL).title(" Upcoming trips "))
    .row_highlight_style(highlight())
    .highlight_symbol("> ");

    frame.render_stateful_widget(table, area, &mut trips.table_state);
}

/// Legal documents with the body of the highlighted one below.
pub fn render_documents(
    frame: &mut Frame,
    view: &mut TableView<LegalDocument>,
    records: &[LegalDocument],
    title: &str,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Min(3)])
        .split(area);

    render_records(
        frame,
        view,
        records,
        &[
            (DocumentField::Kind, Constraint::Length(20)),
            (DocumentField::Title, Constraint::Min(10)),
        ],
        title,
        false,
        chunks[0],
    );

    let body = view
        .cursor_record(records)
        .map(|doc| doc.body.as_str())
        .unwrap_or("");
    let text = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Text "));
    frame.render_widget(text, chunks[1]);
}

/// Participant status counts per trip.
pub fn render_reports(frame: &mut Frame, reports: &[TripReport], area: Rect) {
    if reports.is_empty() {
        render_empty(frame, area, " Reports ".to_string(), "No trips to report on");
        return;
    }

    let rows: Vec<Row> = reports
        .iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(r.trip.clone()),
                Cell::from(Span::styled(
                    r.registered.to_string(),
                    Style::default().fg(Color::Green),
                )),
                Cell::from(Span::styled(
                    r.invited.to_string(),
                    Style::default().fg(Color::Blue),
                )),
                Cell::from(Span::styled(
                    r.incomplete.to_string(),
                    Style::default().fg(Color::Red),
                )),
                Cell::from(r.total().to_string()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(8),
        ],
    )
    .header(
        Row::new(vec!["Trip", "Registered", "Invited", "Incomplete", "Total"])
            .style(header_style()),
    )
    .block(Block::default().borders(Borders::ALL).title(" Participants by status "));

    frame.render_widget(table, area);
}
