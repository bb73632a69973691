// UI module for rendering the TUI.
// Sidebar, header, active surface, status bar, and the overlay stack on top.

mod editor;
mod modal;
mod sidebar;
mod table;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, InputMode};
use crate::domain::{
    CommunicationField, ContactField, FormField, InviteField, ParticipantField,
    TripField, UsefulInfoField,
};
use crate::state::{NoticeLevel, Surface, ViewId};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Sidebar + content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(1)])
        .split(rows[1]);

    draw_header(frame, app, rows[0]);
    sidebar::draw_sidebar(frame, app.active_view(), body[0]);
    draw_content(frame, app, body[1]);
    draw_status_bar(frame, app, rows[2]);

    // Overlays last, in opening order
    modal::draw_overlays(frame, app);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" tripdesk ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    let mut spans = vec![Span::styled(
        app.surface_title(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];
    if let Surface::Editor { parent, .. } = app.orchestrator.active_surface() {
        spans.push(Span::styled(
            format!("  (from {})", parent.title()),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(header, area);
}

/// Draw the active surface.
fn draw_content(frame: &mut Frame, app: &mut App, area: Rect) {
    if let Some(editor) = &app.editor {
        editor::draw_editor(frame, editor, &app.surface_title(), area);
        return;
    }

    let view = app.active_view();
    let searching = app.input_mode == InputMode::Search;
    let (area, search_area) = if searching {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let ws = &mut app.workspace;
    let s = &ws.session;
    match view {
        ViewId::Dashboard => table::render_dashboard(frame, &mut ws.trips, s, area),
        ViewId::ManageTrip => table::render_records(
            frame,
            &mut ws.trips,
            s.trips.records(),
            &[
                (TripField::Name, Constraint::Percentage(30)),
                (TripField::Destination, Constraint::Percentage(30)),
                (TripField::Start, Constraint::Length(12)),
                (TripField::End, Constraint::Length(12)),
            ],
            view.title(),
            false,
            area,
        ),
        ViewId::ManageParticipants => table::render_records(
            frame,
            &mut ws.participants,
            s.participants.records(),
            &[
                (ParticipantField::Name, Constraint::Percentage(20)),
                (ParticipantField::Email, Constraint::Percentage(25)),
                (ParticipantField::Trip, Constraint::Percentage(25)),
                (ParticipantField::Group, Constraint::Length(10)),
                (ParticipantField::Status, Constraint::Length(12)),
            ],
            view.title(),
            true,
            area,
        ),
        ViewId::ManageContacts => table::render_records(
            frame,
            &mut ws.contacts,
            s.contacts.records(),
            &[
                (ContactField::Name, Constraint::Percentage(20)),
                (ContactField::Category, Constraint::Percentage(20)),
                (ContactField::Email, Constraint::Percentage(25)),
                (ContactField::Phone, Constraint::Length(16)),
                (ContactField::Notes, Constraint::Min(10)),
            ],
            view.title(),
            false,
            area,
        ),
        ViewId::Invites => table::render_records(
            frame,
            &mut ws.invites,
            s.invites.records(),
            &[
                (InviteField::Trip, Constraint::Percentage(30)),
                (InviteField::Subject, Constraint::Min(10)),
            ],
            view.title(),
            false,
            area,
        ),
        ViewId::Communications => table::render_records(
            frame,
            &mut ws.communications,
            s.communications.records(),
            &[
                (CommunicationField::Kind, Constraint::Length(12)),
                (CommunicationField::Title, Constraint::Percentage(30)),
                (CommunicationField::Message, Constraint::Min(10)),
            ],
            view.title(),
            false,
            area,
        ),
        ViewId::UsefulInformations => table::render_records(
            frame,
            &mut ws.useful_informations,
            s.useful_informations.records(),
            &[
                (UsefulInfoField::Title, Constraint::Percentage(30)),
                (UsefulInfoField::Content, Constraint::Min(10)),
            ],
            view.title(),
            false,
            area,
        ),
        ViewId::Forms => table::render_records(
            frame,
            &mut ws.forms,
            s.forms.records(),
            &[
                (FormField::Name, Constraint::Percentage(40)),
                (FormField::Trip, Constraint::Percentage(35)),
                (FormField::Responses, Constraint::Length(10)),
            ],
            view.title(),
            false,
            area,
        ),
        ViewId::PrivacyPolicy | ViewId::TermsConditions | ViewId::Documents => {
            let list = match view {
                ViewId::PrivacyPolicy => &mut ws.privacy,
                ViewId::TermsConditions => &mut ws.terms,
                _ => &mut ws.documents,
            };
            table::render_documents(frame, list, s.documents.records(), view.title(), area);
        }
        ViewId::Reports => table::render_reports(frame, &s.trip_reports(), area),
    }

    draw_search_line(frame, app, search_area);
}

/// Render the search input below the table while typing.
fn draw_search_line(frame: &mut Frame, app: &App, area: Option<Rect>) {
    let Some(area) = area else {
        return;
    };
    let term = app.workspace.search_term(app.active_view()).unwrap_or_default();
    let search_line = Line::from(vec![
        Span::styled("/", Style::default().fg(Color::Yellow)),
        Span::raw(term),
        Span::styled("█", Style::default().fg(Color::Yellow)),
    ]);
    let search_widget = Paragraph::new(search_line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(search_widget, area);
}

/// Key hints for what currently receives input.
fn hints(app: &App) -> Vec<(&'static str, &'static str)> {
    if app.orchestrator.top_overlay().is_some() {
        return vec![("Tab", "Field"), ("↵", "Confirm"), ("Esc", "Dismiss")];
    }
    if app.editor.is_some() {
        let mut hints = vec![("Tab", "Field"), ("^S", "Save"), ("Esc", "Cancel")];
        if matches!(
            app.orchestrator.active_surface(),
            Surface::Editor {
                editor: crate::state::EditorKind::Communication,
                ..
            }
        ) {
            hints.push(("^T", "Type"));
        }
        return hints;
    }
    if app.input_mode == InputMode::Search {
        return vec![("↵", "Apply"), ("Esc", "Clear")];
    }

    let mut hints = vec![("↑↓", "Move"), ("Tab", "View")];
    hints.extend_from_slice(match app.active_view() {
        ViewId::Dashboard => &[
            ("n", "New trip"),
            ("m", "Message"),
            ("i", "Invite"),
            ("r", "Remind"),
        ][..],
        ViewId::ManageTrip => &[("n", "New"), ("e", "Edit"), ("d", "Delete")],
        ViewId::ManageParticipants => &[
            ("/", "Search"),
            ("t/s", "Filter"),
            ("1-5", "Sort"),
            ("␣/a", "Select"),
            ("r", "Remind"),
            ("i", "Invite"),
            ("x", "Export"),
        ],
        ViewId::ManageContacts => &[("/", "Search"), ("1-3", "Sort"), ("x", "Export"), ("d", "Delete")],
        ViewId::Invites => &[("/", "Search"), ("x", "Export"), ("d", "Delete")],
        ViewId::Communications => &[("n", "New"), ("a", "Alert")],
        ViewId::UsefulInformations | ViewId::PrivacyPolicy | ViewId::TermsConditions => {
            &[("d", "Delete")]
        }
        ViewId::Forms => &[("n", "New"), ("e", "Edit"), ("/", "Search"), ("x", "Export")],
        ViewId::Documents | ViewId::Reports => &[],
    });
    hints.push(("q", "Quit"));
    hints
}

/// Draw the status bar with key hints and the latest notice.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    for (key, label) in hints(app) {
        spans.push(Span::raw(format!(" {} ", key)));
        spans.push(Span::styled(
            format!("{} ", label),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if let Some(notice) = app.workspace.notices.latest() {
        let color = match notice.level {
            NoticeLevel::Info => Color::Cyan,
            NoticeLevel::Warn => Color::Yellow,
            NoticeLevel::Error => Color::Red,
        };
        spans.push(Span::styled(
            format!(" │ {} ", notice.timestamp.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ));
        spans.push(Span::styled(
            notice.message.clone(),
            Style::default().fg(color),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
