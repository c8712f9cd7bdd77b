//! Empty-state screen for a category with no questions yet.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::models::Category;

pub fn render(frame: &mut Frame, area: Rect, category: &Category) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(9),
        Constraint::Fill(1),
    ])
    .split(area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "NO QUESTIONS YET",
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(""),
        Line::from(category.name.clone().fg(Color::White)),
        Line::from(""),
        Line::from(
            "There are no questions available for this category yet. Please check back later."
                .fg(Color::DarkGray),
        ),
        Line::from(""),
        Line::from("esc back  ·  q quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray),
        );

    frame.render_widget(widget, chunks[1]);
}
