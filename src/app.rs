use std::sync::mpsc::Sender;
use std::sync::Arc;

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, error, info, warn};

use crate::config::{Config, ConfigStore};
use crate::error::{FetchError, GameResult};
use crate::round::{RoundPlay, RoundStep};
use crate::runtime::{spawn_fetch, TriviaEvent};
use crate::session::GameSession;
use crate::setup::SetupForm;
use crate::trivia::{
    category_menu, fetch_round_questions, resolve_choice, Category, Question, QuestionRequest,
    TriviaSource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Setup,
    LoadingCategories,
    CategorySelect,
    LoadingQuestions,
    Quiz,
    Summary,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Owns the game session and moves between screens in response to events.
pub struct App {
    pub session: GameSession,
    pub state: AppState,
    pub setup: SetupForm,
    pub menu: Vec<Category>,
    pub menu_index: usize,
    pub round: Option<RoundPlay>,
    pub option_index: usize,
    pub error_message: Option<String>,
    pub notice: Option<String>,
    pub started_at: Option<DateTime<Local>>,
    categories: Vec<Category>,
    config: Config,
    store: Option<Box<dyn ConfigStore>>,
    source: Arc<dyn TriviaSource>,
    events: Sender<TriviaEvent>,
}

impl App {
    pub fn new(config: Config, source: Arc<dyn TriviaSource>, events: Sender<TriviaEvent>) -> Self {
        Self {
            session: GameSession::new(),
            state: AppState::Setup,
            setup: SetupForm::from_config(&config),
            menu: Vec::new(),
            menu_index: 0,
            round: None,
            option_index: 0,
            error_message: None,
            notice: None,
            started_at: None,
            categories: Vec::new(),
            config,
            store: None,
            source,
            events,
        }
    }

    /// Persist the last used setup through `store` whenever a game starts.
    pub fn with_store(mut self, store: Box<dyn ConfigStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn handle_event(&mut self, event: TriviaEvent) -> GameResult<Control> {
        match event {
            TriviaEvent::Key(key) => return self.on_key(key),
            TriviaEvent::Resize => {}
            TriviaEvent::Tick => self.on_tick()?,
            TriviaEvent::Categories(result) => self.on_categories(result),
            TriviaEvent::Questions { round, result } => self.on_questions(round, result),
        }
        Ok(Control::Continue)
    }

    fn on_key(&mut self, key: KeyEvent) -> GameResult<Control> {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            self.leave_round();
            return Ok(Control::Quit);
        }

        match self.state {
            AppState::Setup => {
                if self.setup.on_key(key) {
                    self.start_game()?;
                }
            }
            AppState::CategorySelect => match key.code {
                KeyCode::Up => self.menu_index = self.menu_index.saturating_sub(1),
                KeyCode::Down => {
                    if self.menu_index + 1 < self.menu.len() {
                        self.menu_index += 1;
                    }
                }
                KeyCode::Enter => self.choose_category()?,
                _ => {}
            },
            AppState::Quiz => self.on_quiz_key(key)?,
            AppState::Summary => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char('n')) {
                    self.new_game();
                }
            }
            AppState::Error => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char('r')) {
                    self.new_game();
                }
            }
            AppState::LoadingCategories | AppState::LoadingQuestions => {}
        }
        Ok(Control::Continue)
    }

    fn on_quiz_key(&mut self, key: KeyEvent) -> GameResult<()> {
        let Some(round) = self.round.as_mut() else {
            return Ok(());
        };

        let step = match key.code {
            KeyCode::Up => {
                self.option_index = self.option_index.saturating_sub(1);
                RoundStep::Stay
            }
            KeyCode::Down => {
                if self.option_index + 1 < round.current_options().len() {
                    self.option_index += 1;
                }
                RoundStep::Stay
            }
            KeyCode::Char(c @ '1'..='9') => {
                let option = c as usize - '1' as usize;
                round.select_option(&mut self.session, option)?
            }
            KeyCode::Enter | KeyCode::Char(' ') if !round.answered() => {
                round.select_option(&mut self.session, self.option_index)?
            }
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('n') => {
                round.next(&mut self.session)?
            }
            KeyCode::Char('s') => round.skip(&mut self.session)?,
            _ => RoundStep::Ignored,
        };
        self.apply_step(step);
        Ok(())
    }

    fn on_tick(&mut self) -> GameResult<()> {
        if self.state != AppState::Quiz {
            return Ok(());
        }
        if let Some(round) = self.round.as_mut() {
            let step = round.on_tick(&mut self.session)?;
            self.apply_step(step);
        }
        Ok(())
    }

    fn apply_step(&mut self, step: RoundStep) {
        match step {
            RoundStep::Ignored | RoundStep::Stay => {}
            RoundStep::NextQuestion => self.option_index = 0,
            RoundStep::NextRound { round } => {
                self.leave_round();
                self.show_category_menu();
                debug!("choosing category for round {round}");
            }
            RoundStep::Finished => {
                self.leave_round();
                self.state = AppState::Summary;
            }
        }
    }

    /// Drop the active round, cancelling its countdown.
    fn leave_round(&mut self) {
        if let Some(mut round) = self.round.take() {
            round.cancel();
        }
        self.option_index = 0;
    }

    fn start_game(&mut self) -> GameResult<()> {
        let Some(setup) = self.setup.submit() else {
            return Ok(());
        };

        self.session = self.session.start_game(&setup)?;
        self.started_at = Some(Local::now());
        info!(
            "{} started a game: {} rounds x {} questions, {}",
            setup.player, setup.total_rounds, setup.questions_per_round, setup.level
        );

        self.config.remember(&setup);
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&self.config) {
                warn!("could not save config: {e}");
            }
        }

        self.request_categories();
        Ok(())
    }

    fn request_categories(&mut self) {
        if !self.categories.is_empty() {
            self.show_category_menu();
            return;
        }

        self.state = AppState::LoadingCategories;
        let source = Arc::clone(&self.source);
        spawn_fetch(self.events.clone(), move || {
            TriviaEvent::Categories(source.categories())
        });
    }

    fn on_categories(&mut self, result: Result<Vec<Category>, FetchError>) {
        if self.state != AppState::LoadingCategories {
            debug!("dropping categories that arrived after leaving the loading screen");
            return;
        }

        match result {
            Ok(categories) => {
                self.categories = categories;
                self.show_category_menu();
            }
            Err(e) => self.show_error("Failed to load question categories!", &e),
        }
    }

    fn show_category_menu(&mut self) {
        self.menu = category_menu(&self.categories, &self.session.crossed_category_ids);
        self.menu_index = 0;
        self.notice = None;
        self.state = AppState::CategorySelect;
    }

    fn choose_category(&mut self) -> GameResult<()> {
        let Some(choice) = self.menu.get(self.menu_index).cloned() else {
            return Ok(());
        };

        let mut rng = rand::thread_rng();
        match resolve_choice(&choice, &self.session.crossed_category_ids, &mut rng) {
            Some(category_id) => {
                self.session = self
                    .session
                    .set_category_for_round(&choice.name, category_id)?;
                info!(
                    "round {}: category {} ({category_id})",
                    self.session.current_round.id, choice.name
                );
                self.request_questions();
            }
            None => {
                self.notice = Some("No unplayed categories left to pick from".to_string());
            }
        }
        Ok(())
    }

    fn request_questions(&mut self) {
        self.state = AppState::LoadingQuestions;
        let round = self.session.current_round.id;
        let request = QuestionRequest {
            amount: self.session.questions_per_round,
            category_id: self.session.current_round.category_id,
            difficulty: self.session.level,
        };
        let source = Arc::clone(&self.source);
        spawn_fetch(self.events.clone(), move || TriviaEvent::Questions {
            round,
            result: fetch_round_questions(source.as_ref(), &request),
        });
    }

    fn on_questions(&mut self, round: u32, result: Result<Vec<Question>, FetchError>) {
        if self.state != AppState::LoadingQuestions || round != self.session.current_round.id {
            debug!("dropping stale questions for round {round}");
            return;
        }

        match result {
            Ok(questions) => {
                let mut rng = rand::thread_rng();
                self.round = Some(RoundPlay::new(questions, &self.session, &mut rng));
                self.option_index = 0;
                self.state = AppState::Quiz;
            }
            Err(e) => self.show_error("Failed to load questions for this round!", &e),
        }
    }

    fn show_error(&mut self, message: &str, cause: &FetchError) {
        error!("{message} ({cause})");
        self.leave_round();
        self.error_message = Some(message.to_string());
        self.state = AppState::Error;
    }

    /// Throw the current game away and go back to the setup form.
    pub fn new_game(&mut self) {
        self.leave_round();
        self.session = self.session.reset_game();
        self.setup = SetupForm::from_config(&self.config);
        self.menu.clear();
        self.menu_index = 0;
        self.error_message = None;
        self.notice = None;
        self.started_at = None;
        self.state = AppState::Setup;
    }
}
