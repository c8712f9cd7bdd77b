//! Completion screen: score summary and leaderboard.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::models::{format_seconds, AttemptResult};
use crate::store::LeaderboardEntry;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.session() else {
        return;
    };
    let Ok(attempt) = session.result() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3), // Title
        Constraint::Length(4), // Stat tiles
        Constraint::Length(1), // Save warning
        Constraint::Min(7),    // Leaderboard
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    render_title(frame, chunks[0]);
    render_stats(frame, chunks[1], attempt);
    render_save_warning(frame, chunks[2], session.submit_error().is_some());
    render_leaderboard(frame, chunks[3], app, app.leaderboard());
    render_controls(frame, chunks[4]);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "QUIZ COMPLETE",
            Style::default().fg(Color::Cyan).bold(),
        )),
    ];
    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_stats(frame: &mut Frame, area: Rect, attempt: &AttemptResult) {
    let columns = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ])
    .split(area);

    let accuracy = attempt.accuracy();
    let grade_color = match accuracy as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    };

    render_stat(
        frame,
        columns[0],
        "Score",
        format!("{} / {}", attempt.score, attempt.total_questions),
        grade_color,
    );
    render_stat(
        frame,
        columns[1],
        "Accuracy",
        format!("{:.0}%", accuracy),
        Color::Cyan,
    );
    render_stat(
        frame,
        columns[2],
        "Time",
        attempt.formatted_time(),
        Color::Magenta,
    );
}

fn render_stat(frame: &mut Frame, area: Rect, label: &str, value: String, color: Color) {
    let content = vec![
        Line::from(Span::styled(label, Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(value, Style::default().fg(color).bold())),
    ];
    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_save_warning(frame: &mut Frame, area: Rect, save_failed: bool) {
    if !save_failed {
        return;
    }

    let widget = Paragraph::new("Could not save this attempt. Your result is shown locally.")
        .alignment(Alignment::Center)
        .fg(Color::Yellow);
    frame.render_widget(widget, area);
}

fn render_leaderboard(frame: &mut Frame, area: Rect, app: &App, entries: &[LeaderboardEntry]) {
    let lines: Vec<Line> = if entries.is_empty() {
        vec![Line::from("No attempts recorded yet.".fg(Color::DarkGray))]
    } else {
        entries
            .iter()
            .map(|entry| {
                let rank_style = match entry.rank {
                    1 => Style::default().fg(Color::Yellow).bold(),
                    2 => Style::default().fg(Color::White),
                    3 => Style::default().fg(Color::LightRed),
                    _ => Style::default().fg(Color::DarkGray),
                };

                let you_marker = if entry.is_you { " <- You" } else { "" };

                Line::from(vec![
                    Span::styled(format!(" {:2}. ", entry.rank), rank_style),
                    Span::styled(
                        format!("{:<16}", entry.player),
                        if entry.is_you {
                            Style::default().fg(Color::Green).bold()
                        } else {
                            Style::default().fg(Color::White)
                        },
                    ),
                    Span::styled(
                        format!("{:<18}", app.category_name(&entry.category_id)),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(
                        format!("{}/{}  ", entry.score, entry.total),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        format_seconds(entry.time_taken_secs),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(you_marker, Style::default().fg(Color::Green)),
                ])
            })
            .collect()
    };

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Leaderboard ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("r play again  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
