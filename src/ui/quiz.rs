//! Live quiz screen: countdown, question, options, and feedback.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{OptionLabel, Question};
use crate::session::{FeedbackView, QuizSession};

/// Seconds left at which the countdown turns red.
const LOW_TIME_SECS: u32 = 5;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.session() else {
        return;
    };
    let Ok(question) = session.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1), // Status line
        Constraint::Length(6), // Question text
        Constraint::Min(10),   // Options
        Constraint::Length(1), // Feedback banner
        Constraint::Length(1), // Controls
    ])
    .margin(1)
    .split(area);

    render_status(frame, chunks[0], app, session);
    render_question_text(frame, chunks[1], &question.prompt);
    render_options(
        frame,
        chunks[2],
        question,
        app.selected_option(),
        session.feedback(),
    );
    render_feedback_banner(frame, chunks[3], question, session.feedback());
    render_controls(frame, chunks[4], session.feedback().is_some());
}

fn render_status(frame: &mut Frame, area: Rect, app: &App, session: &QuizSession) {
    let columns = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ])
    .split(area);

    let category = Paragraph::new(app.category_name(session.category_id()).to_string())
        .alignment(Alignment::Left)
        .fg(Color::Cyan);
    frame.render_widget(category, columns[0]);

    let progress = Paragraph::new(format!(
        "Question {} of {}",
        session.question_number(),
        session.total_questions()
    ))
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);
    frame.render_widget(progress, columns[1]);

    let remaining = session.remaining_secs();
    let timer_color = if remaining <= LOW_TIME_SECS {
        Color::Red
    } else {
        Color::White
    };
    let timer = Paragraph::new(format!("{:2}s", remaining))
        .alignment(Alignment::Right)
        .style(Style::default().fg(timer_color).bold());
    frame.render_widget(timer, columns[2]);
}

fn render_question_text(frame: &mut Frame, area: Rect, prompt: &str) {
    let widget = Paragraph::new(prompt)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    selected: usize,
    feedback: Option<FeedbackView>,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let label = OptionLabel::ALL[index];
        let (prefix, style) = option_presentation(question, label, index == selected, feedback);

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", prefix), style),
            Span::styled(format!("{}) ", label), style),
            Span::styled(option.clone(), style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Options ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

/// Marker and style for one option row.
///
/// While answering, the highlighted row is emphasized. During feedback
/// the correct option goes green, a wrong selection goes red, and the
/// rest are dimmed.
fn option_presentation(
    question: &Question,
    label: OptionLabel,
    is_highlighted: bool,
    feedback: Option<FeedbackView>,
) -> (&'static str, Style) {
    match feedback {
        None => {
            if is_highlighted {
                (">", Style::default().fg(Color::Yellow).bold())
            } else {
                (" ", Style::default().fg(Color::White))
            }
        }
        Some(view) => {
            if question.is_correct(label) {
                ("+", Style::default().fg(Color::Green).bold())
            } else if view.selected == Some(label) {
                ("-", Style::default().fg(Color::Red).bold())
            } else {
                (" ", Style::default().fg(Color::DarkGray))
            }
        }
    }
}

fn render_feedback_banner(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    feedback: Option<FeedbackView>,
) {
    let Some(view) = feedback else {
        return;
    };

    let (text, color) = match (view.selected, view.was_correct) {
        (Some(_), true) => ("Correct!".to_string(), Color::Green),
        (Some(_), false) => (
            format!("Wrong! The answer was {}", question.correct),
            Color::Red,
        ),
        (None, _) => (
            format!("Time's up! The answer was {}", question.correct),
            Color::Red,
        ),
    };

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).bold());
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, in_feedback: bool) {
    let text = if in_feedback {
        "next question coming up..."
    } else {
        "j/k or arrows to select  ·  enter to answer  ·  esc leave  ·  q quit"
    };

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
