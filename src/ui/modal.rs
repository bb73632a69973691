// Modal UI components.
// Reminder and invite confirmation dialogs, stacked in opening order.

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::state::editor::OverlayField;
use crate::state::{OverlayInput, OverlayPayload};

const MODAL_WIDTH: u16 = 64;
const MODAL_HEIGHT: u16 = 16;

/// Centered modal area, nudged down-right for each overlay beneath it.
fn modal_area(area: Rect, depth: u16) -> Rect {
    let width = MODAL_WIDTH.min(area.width);
    let height = MODAL_HEIGHT.min(area.height);
    let x = (area.width.saturating_sub(width)) / 2 + depth * 2;
    let y = (area.height.saturating_sub(height)) / 2 + depth;
    Rect::new(x, y, width, height).intersection(area)
}

/// Draw every open overlay, the most recently opened on top.
pub fn draw_overlays(frame: &mut Frame, app: &App) {
    let count = app.orchestrator.overlays().count();
    for (depth, overlay) in app.orchestrator.overlays().enumerate() {
        let active = depth + 1 == count;
        let input = app.overlay_inputs.get(&overlay.kind());
        draw_overlay(frame, overlay.payload(), input, active, depth as u16);
    }
}

fn input_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let mut spans = vec![
        Span::styled(format!("{:<9}", label), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

fn draw_overlay(
    frame: &mut Frame,
    payload: &OverlayPayload,
    input: Option<&OverlayInput>,
    active: bool,
    depth: u16,
) {
    let area = modal_area(frame.area(), depth);

    // Clear the area behind the modal
    frame.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Fields
            Constraint::Length(1), // Instructions
        ])
        .split(area);

    let focus = input.filter(|_| active).map(|i| i.focus);
    let subject = input.map_or("", |i| i.subject.as_str());
    let body = input.map_or("", |i| i.body.as_str());

    let (title, mut lines) = match payload {
        OverlayPayload::Reminder { count } => (
            " Send Reminder ",
            vec![
                Line::from(Span::styled(
                    format!("Reminder to {} participant(s)", count),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                input_line("Subject", subject, focus == Some(OverlayField::Subject)),
            ],
        ),
        OverlayPayload::Invite {
            trip_name,
            invitee_count,
            ..
        } => (
            " Send Invites ",
            vec![Line::from(vec![
                Span::styled(
                    trip_name.as_str(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  {} invitee(s)", invitee_count)),
            ])],
        ),
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Message",
        Style::default().fg(Color::DarkGray),
    )));
    let body_focused = focus == Some(OverlayField::Body);
    let mut body_lines: Vec<Line> = body.lines().map(Line::from).collect();
    if body.is_empty() || body.ends_with('\n') {
        body_lines.push(Line::from(""));
    }
    if body_focused {
        if let Some(last) = body_lines.last_mut() {
            last.push_span(Span::styled("█", Style::default().fg(Color::Yellow)));
        }
    }
    lines.extend(body_lines);

    let border = if active { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title);
    let fields = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(fields, chunks[0]);

    let instructions = Line::from(vec![
        Span::styled(" Enter", Style::default().fg(Color::Yellow)),
        Span::styled(" = Send  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::styled(" = Field  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" = Cancel ", Style::default().fg(Color::DarkGray)),
    ]);
    let instructions_widget = Paragraph::new(instructions)
        .alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(instructions_widget, chunks[1]);
}
