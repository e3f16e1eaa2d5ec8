pub mod charting;
pub mod quiz;
pub mod screen;
pub mod summary;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::setup::{SetupField, SetupForm};
use crate::ui::screen::current_screen;
use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        current_screen(&self.state).render(self, area, buf);
    }
}

pub(crate) fn bold_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub(crate) fn dim_style() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub(crate) fn italic_style() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

pub(crate) fn legend(text: &str) -> Paragraph<'_> {
    Paragraph::new(Span::styled(text, italic_style()))
}

pub(crate) fn render_setup(app: &App, area: Rect, buf: &mut Buffer) {
    let form = &app.setup;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(1),    // fields
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled(
        "New Game",
        bold_style().fg(Color::Magenta),
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM))
    .render(chunks[0], buf);

    Paragraph::new(setup_lines(form))
        .wrap(Wrap { trim: false })
        .render(chunks[1], buf);

    legend("(tab) next field / (enter) start / (esc)ape").render(chunks[2], buf);
}

fn setup_lines(form: &SetupForm) -> Vec<Line<'static>> {
    let label_width = SetupField::ALL
        .iter()
        .map(|f| f.label().width())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    for field in SetupField::ALL {
        let focused = form.focus == field;
        let label = field.label();
        let padding = " ".repeat(label_width - label.width());
        let value_style = if focused {
            bold_style().add_modifier(Modifier::UNDERLINED)
        } else {
            bold_style()
        };

        lines.push(Line::from(vec![
            Span::raw(if focused { "> " } else { "  " }),
            Span::styled(format!("{label}{padding}  "), bold_style()),
            Span::styled(form.value(field), value_style),
            Span::styled(if focused { "_" } else { "" }, dim_style()),
        ]));

        let indent = " ".repeat(label_width + 4);
        match form.error_for(field) {
            Some(error) => lines.push(Line::from(Span::styled(
                format!("{indent}{error}"),
                Style::default().fg(Color::Red),
            ))),
            None if focused => lines.push(Line::from(Span::styled(
                format!("{indent}{}", SetupForm::hint(field)),
                dim_style(),
            ))),
            None => lines.push(Line::default()),
        }
    }
    lines
}

pub(crate) fn render_loading(app: &App, area: Rect, buf: &mut Buffer) {
    let what = match app.state {
        crate::AppState::LoadingCategories => "Loading question categories...",
        _ => "Loading questions...",
    };
    render_centered(
        vec![Line::from(Span::styled(
            what,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        ))],
        area,
        buf,
    );
}

pub(crate) fn render_category_select(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(1),    // menu
            Constraint::Length(1), // notice
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled(
        format!(
            "Round {}/{}: choose a category",
            session.current_round.id, session.total_rounds
        ),
        bold_style().fg(Color::Magenta),
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM))
    .render(chunks[0], buf);

    // keep the highlighted entry on screen in short terminals
    let visible = chunks[1].height.max(1) as usize;
    let first = app.menu_index.saturating_sub(visible - 1);
    let lines: Vec<Line> = app
        .menu
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .map(|(idx, category)| {
            if idx == app.menu_index {
                Line::from(Span::styled(
                    format!("> {}", category.name),
                    bold_style().fg(Color::Cyan),
                ))
            } else {
                Line::from(Span::raw(format!("  {}", category.name)))
            }
        })
        .collect();
    Paragraph::new(lines).render(chunks[1], buf);

    if let Some(notice) = &app.notice {
        Paragraph::new(Span::styled(
            notice.as_str(),
            Style::default().fg(Color::Yellow),
        ))
        .render(chunks[2], buf);
    }

    legend("(↑/↓) move / (enter) choose / (esc)ape").render(chunks[3], buf);
}

pub(crate) fn render_error(app: &App, area: Rect, buf: &mut Buffer) {
    let message = app
        .error_message
        .as_deref()
        .unwrap_or("Something went wrong!");
    render_centered(
        vec![
            Line::from(Span::styled(
                message,
                bold_style().fg(Color::Red),
            )),
            Line::default(),
            Line::from(Span::styled("(r) try again / (esc)ape", italic_style())),
        ],
        area,
        buf,
    );
}

fn render_centered(lines: Vec<Line>, area: Rect, buf: &mut Buffer) {
    let height = lines.len() as u16;
    let top = area.height.saturating_sub(height) / 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(top),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);
}
