use ratatui::{buffer::Buffer, layout::Rect};

use crate::ui::{
    quiz::render_quiz, render_category_select, render_error, render_loading, render_setup,
    summary::render_summary,
};
use crate::{App, AppState};

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

pub struct SetupScreen;

impl Screen for SetupScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_setup(app, area, buf);
    }
}

/// Shared by both fetches; the text depends on which one is pending
pub struct LoadingScreen;

impl Screen for LoadingScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_loading(app, area, buf);
    }
}

pub struct CategoryScreen;

impl Screen for CategoryScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_category_select(app, area, buf);
    }
}

pub struct QuizScreen;

impl Screen for QuizScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_quiz(app, area, buf);
    }
}

pub struct SummaryScreen;

impl Screen for SummaryScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_summary(app, area, buf);
    }
}

pub struct ErrorScreen;

impl Screen for ErrorScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_error(app, area, buf);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Setup => Box::new(SetupScreen),
        AppState::LoadingCategories | AppState::LoadingQuestions => Box::new(LoadingScreen),
        AppState::CategorySelect => Box::new(CategoryScreen),
        AppState::Quiz => Box::new(QuizScreen),
        AppState::Summary => Box::new(SummaryScreen),
        AppState::Error => Box::new(ErrorScreen),
    }
}
