use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
        Widget,
    },
};

use crate::scoring::{
    format_duration, per_round_summary, question_time_stats, question_times_secs, total_questions,
    total_score, RoundSummary,
};
use crate::ui::charting::{compute_chart_params, format_label, time_coords};
use crate::ui::{bold_style, legend, HORIZONTAL_MARGIN, VERTICAL_MARGIN};
use crate::App;

fn round_group(summary: &RoundSummary) -> BarGroup<'static> {
    BarGroup::default()
        .label(Line::from(format!("R{}", summary.round)))
        .bars(&[
            Bar::default()
                .value(u64::from(summary.correct))
                .style(Style::default().fg(Color::Green))
                .value_style(Style::default().fg(Color::Black).bg(Color::Green)),
            Bar::default()
                .value(u64::from(summary.missed()))
                .style(Style::default().fg(Color::Red))
                .value_style(Style::default().fg(Color::Black).bg(Color::Red)),
        ])
}

pub(crate) fn render_summary(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let score = total_score(session);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // player + time
            Constraint::Length(1), // score
            Constraint::Length(1), // breakdown
            Constraint::Length(1), // padding
            Constraint::Min(6),    // charts
            Constraint::Length(1), // average
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
        ])
        .split(area);

    let started = app
        .started_at
        .map(|at| format!("   started {}", at.format("%H:%M")))
        .unwrap_or_default();
    Paragraph::new(Line::from(vec![
        Span::styled(session.player.clone(), bold_style().fg(Color::Magenta)),
        Span::raw(format!(
            "   {}{started}",
            format_duration(session.elapsed_duration_ms)
        )),
    ]))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    Paragraph::new(Span::styled(
        format!("Score: {}/{}", score.correct, total_questions(session)),
        bold_style(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Line::from(vec![
        Span::styled(format!("{} correct", score.correct), Style::default().fg(Color::Green)),
        Span::raw("   "),
        Span::styled(format!("{} wrong", score.wrong), Style::default().fg(Color::Red)),
        Span::raw("   "),
        Span::styled(format!("{} skipped", score.skipped), Style::default().fg(Color::Yellow)),
    ]))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[4]);

    let mut bars = BarChart::default()
        .block(Block::default().title("correct / missed").borders(Borders::ALL))
        .bar_width(3)
        .bar_gap(0)
        .group_gap(2)
        .max(u64::from(session.questions_per_round.max(1)));
    for summary in per_round_summary(session) {
        bars = bars.data(round_group(&summary));
    }
    bars.render(charts[0], buf);

    let coords = time_coords(&question_times_secs(session));
    let (question_count, highest_secs) = compute_chart_params(&coords);
    let datasets = vec![Dataset::default()
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(Color::Magenta))
        .graph_type(GraphType::Line)
        .data(&coords)];
    Chart::new(datasets)
        .block(Block::default().title("time per question").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title("question")
                .bounds([1.0, question_count])
                .labels(vec![
                    Span::styled("1", bold_style()),
                    Span::styled(format_label(question_count), bold_style()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("secs")
                .bounds([0.0, highest_secs])
                .labels(vec![
                    Span::styled("0", bold_style()),
                    Span::styled(format_label(highest_secs), bold_style()),
                ]),
        )
        .render(charts[1], buf);

    let average = match question_time_stats(session) {
        Some((mean, sd)) => format!("{mean:.1} secs per question   {sd:.2} sd"),
        None => "no questions answered".to_string(),
    };
    Paragraph::new(Span::styled(average, bold_style()))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);

    legend("(n)ew game / (esc)ape").render(chunks[7], buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{GameSetup, Level, Outcome};
    use crate::ui::tests::{render_to_string, test_app};
    use crate::AppState;

    fn finished_app() -> App {
        let mut app = test_app();
        app.session = app
            .session
            .start_game(&GameSetup {
                player: "alice1".to_string(),
                level: Level::Easy,
                total_rounds: 1,
                questions_per_round: 2,
            })
            .unwrap()
            .set_category_for_round("History", 23)
            .unwrap()
            .record_answer_outcome(Outcome::Correct)
            .unwrap()
            .record_question_elapsed(12_000)
            .unwrap()
            .record_answer_outcome(Outcome::Skipped)
            .unwrap()
            .record_question_elapsed(90_000)
            .unwrap()
            .finish_game()
            .unwrap();
        app.state = AppState::Summary;
        app
    }

    #[test]
    fn test_summary_shows_score_and_breakdown() {
        let app = finished_app();
        let rendered = render_to_string(&app, 100, 30);
        assert!(rendered.contains("alice1"));
        assert!(rendered.contains("2 mins"));
        assert!(rendered.contains("Score: 1/2"));
        assert!(rendered.contains("1 correct"));
        assert!(rendered.contains("0 wrong"));
        assert!(rendered.contains("1 skipped"));
        assert!(rendered.contains("51.0 secs per question"));
        assert!(rendered.contains("(n)ew game"));
    }

    #[test]
    fn test_round_group_splits_correct_and_missed() {
        let group = round_group(&RoundSummary {
            round: 2,
            correct: 3,
            wrong: 1,
            skipped: 1,
        });
        let rendered_area = Rect::new(0, 0, 20, 10);
        let mut buffer = Buffer::empty(rendered_area);
        BarChart::default()
            .bar_width(3)
            .data(group)
            .render(rendered_area, &mut buffer);
        let rendered = buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(rendered.contains("R2"));
    }

    #[test]
    fn test_empty_summary_renders() {
        let mut app = test_app();
        app.state = AppState::Summary;
        let rendered = render_to_string(&app, 80, 24);
        assert!(rendered.contains("Score: 0/15"));
        assert!(rendered.contains("no questions answered"));
    }
}
