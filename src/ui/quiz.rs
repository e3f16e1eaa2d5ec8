use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};

use crate::round::RoundPlay;
use crate::ui::{bold_style, dim_style, legend, HORIZONTAL_MARGIN, VERTICAL_MARGIN};
use crate::App;

/// Countdown color: green with time to spare, then yellow, then red.
pub fn countdown_color(remaining_secs: u64) -> Color {
    if remaining_secs <= 10 {
        Color::Red
    } else if remaining_secs <= 20 {
        Color::Yellow
    } else {
        Color::Green
    }
}

fn badge(text: String, color: Color) -> Span<'static> {
    Span::styled(
        format!(" {text} "),
        Style::default()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD),
    )
}

/// Actions the player can take right now on this question.
pub fn quiz_legend(round: &RoundPlay, is_last_round: bool) -> &'static str {
    match (round.answered(), round.is_last_question()) {
        (false, false) => "(1-4) answer / (s)kip / (esc)ape",
        (false, true) => "(1-4) answer / (esc)ape",
        (true, false) => "(n)ext / (esc)ape",
        (true, true) if is_last_round => "(n) finish / (esc)ape",
        (true, true) => "(n)ext round / (esc)ape",
    }
}

pub(crate) fn render_quiz(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(round) = app.round.as_ref() else {
        return;
    };
    let session = &app.session;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // badges
            Constraint::Length(1), // padding
            Constraint::Length(1), // countdown
            Constraint::Length(1), // padding
            Constraint::Min(2),    // question
            Constraint::Length(round.current_options().len() as u16),
            Constraint::Length(1), // padding
            Constraint::Length(1), // footer
        ])
        .split(area);

    Paragraph::new(Line::from(vec![
        badge(session.current_round.name.clone(), Color::Cyan),
        Span::raw(" "),
        badge(session.level.to_string(), Color::Magenta),
        Span::raw(" "),
        Span::styled(
            format!(
                "{}   round {}/{}",
                session.player, session.current_round.id, session.total_rounds
            ),
            dim_style(),
        ),
    ]))
    .render(chunks[0], buf);

    let countdown = round.countdown();
    let remaining = countdown.remaining_secs();
    let ratio = if countdown.budget_ms() == 0 {
        0.0
    } else {
        countdown.remaining_ms() as f64 / countdown.budget_ms() as f64
    };
    Gauge::default()
        .gauge_style(Style::default().fg(countdown_color(remaining)))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(Span::styled(format!("{remaining}s"), bold_style()))
        .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        round.current_question().question.clone(),
        bold_style(),
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(chunks[4], buf);

    let question = round.current_question();
    let options: Vec<Line> = round
        .current_options()
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let marker = if !round.answered() && idx == app.option_index {
                ">"
            } else {
                " "
            };
            let style = if round.answered() && question.is_correct(option) {
                bold_style().fg(Color::Green)
            } else if round.selected() == Some(option.as_str()) {
                bold_style().fg(Color::Red)
            } else if !round.answered() && idx == app.option_index {
                bold_style()
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!("{marker} {}. {option}", idx + 1), style))
        })
        .collect();
    Paragraph::new(options).render(chunks[5], buf);

    let footer = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(8)])
        .split(chunks[7]);
    legend(quiz_legend(round, session.is_last_round())).render(footer[0], buf);
    Paragraph::new(Span::styled(
        format!("{}/{}", round.index() + 1, round.len()),
        bold_style(),
    ))
    .alignment(Alignment::Right)
    .render(footer[1], buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{GameSetup, Level};
    use crate::trivia::{Question, QuestionKind};
    use crate::ui::tests::{render_to_string, test_app};
    use crate::AppState;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(text: &str) -> Question {
        Question {
            category: "History".to_string(),
            kind: QuestionKind::Multiple,
            difficulty: Level::Easy,
            question: text.to_string(),
            correct_answer: "1066".to_string(),
            incorrect_answers: vec!["1215".to_string(), "1492".to_string(), "1776".to_string()],
        }
    }

    fn quiz_app(total_rounds: u32) -> App {
        let mut app = test_app();
        app.session = app
            .session
            .start_game(&GameSetup {
                player: "alice1".to_string(),
                level: Level::Easy,
                total_rounds,
                questions_per_round: 2,
            })
            .unwrap()
            .set_category_for_round("History", 23)
            .unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        app.round = Some(RoundPlay::new(
            vec![question("Battle of Hastings?"), question("Norman conquest?")],
            &app.session,
            &mut rng,
        ));
        app.state = AppState::Quiz;
        app
    }

    #[test]
    fn test_countdown_color_thresholds() {
        assert_eq!(countdown_color(90), Color::Green);
        assert_eq!(countdown_color(21), Color::Green);
        assert_eq!(countdown_color(20), Color::Yellow);
        assert_eq!(countdown_color(11), Color::Yellow);
        assert_eq!(countdown_color(10), Color::Red);
        assert_eq!(countdown_color(0), Color::Red);
    }

    #[test]
    fn test_quiz_screen_shows_question_and_badges() {
        let app = quiz_app(2);
        let rendered = render_to_string(&app, 80, 24);
        assert!(rendered.contains("History"));
        assert!(rendered.contains("easy"));
        assert!(rendered.contains("Battle of Hastings?"));
        assert!(rendered.contains("90s"));
        assert!(rendered.contains("1/2"));
        assert!(rendered.contains("1066"));
        assert!(rendered.contains("(s)kip"));
    }

    #[test]
    fn test_legend_follows_round_position() {
        let mut app = quiz_app(1);
        let mut round = app.round.take().unwrap();
        assert_eq!(
            quiz_legend(&round, true),
            "(1-4) answer / (s)kip / (esc)ape"
        );

        round.select_answer(&mut app.session, "1066").unwrap();
        assert_eq!(quiz_legend(&round, true), "(n)ext / (esc)ape");

        round.next(&mut app.session).unwrap();
        assert_eq!(quiz_legend(&round, true), "(1-4) answer / (esc)ape");

        round.select_answer(&mut app.session, "1215").unwrap();
        assert_eq!(quiz_legend(&round, true), "(n) finish / (esc)ape");
        assert_eq!(quiz_legend(&round, false), "(n)ext round / (esc)ape");
    }

    #[test]
    fn test_answered_question_renders() {
        let mut app = quiz_app(1);
        let mut round = app.round.take().unwrap();
        round.select_answer(&mut app.session, "1492").unwrap();
        app.round = Some(round);

        let rendered = render_to_string(&app, 80, 24);
        assert!(rendered.contains("1492"));
        assert!(rendered.contains("(n)ext"));
    }
}
