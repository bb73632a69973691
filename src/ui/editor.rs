// Editor surface rendering.
// One labelled input per draft field, with its validation message underneath.

use ratatui::{prelude::*, widgets::*};

use crate::state::{Editor, EditorDraft};

/// Draw the open editor in the content area.
pub fn draw_editor(frame: &mut Frame, editor: &Editor, title: &str, area: Rect) {
    let mut lines: Vec<Line> = vec![Line::from("")];

    if let EditorDraft::Communication(draft) = &editor.draft {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<12} ", "Type"), Style::default().fg(Color::DarkGray)),
            Span::styled(draft.kind.as_str(), Style::default().fg(Color::Magenta)),
            Span::styled("  (Ctrl-T to switch)", Style::default().fg(Color::DarkGray)),
        ]));
        lines.push(Line::from(""));
    }

    for (index, label) in editor.draft.labels().iter().enumerate() {
        let focused = index == editor.focus;
        let label_style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut spans = vec![
            Span::styled(format!("  {:<12} ", label), label_style),
            Span::raw(editor.draft.value(index).to_string()),
        ];
        if focused {
            spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
        }
        lines.push(Line::from(spans));

        if let Some(message) = editor.error_for(index) {
            lines.push(Line::from(Span::styled(
                format!("  {:<12} {}", "", message),
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::from(""));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", title));

    let form = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(form, area);
}
