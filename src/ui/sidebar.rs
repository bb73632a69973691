// Sidebar rendering.
// Lists every primary view and highlights the active one.

use ratatui::{prelude::*, widgets::*};

use crate::state::ViewId;

/// Draw the navigation sidebar.
pub fn draw_sidebar(frame: &mut Frame, active: ViewId, area: Rect) {
    let items: Vec<ListItem> = ViewId::ALL
        .iter()
        .map(|view| {
            let style = if *view == active {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(view.title(), style)))
        })
        .collect();

    let selected_index = ViewId::ALL.iter().position(|v| *v == active);
    let mut list_state = ListState::default();
    list_state.select(selected_index);

    let list_widget = List::new(items)
        .block(
            Block::default()
                .borders(Borders::RIGHT)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_symbol("▌ ");

    frame.render_stateful_widget(list_widget, area, &mut list_state);
}
