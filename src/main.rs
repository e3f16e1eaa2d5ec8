use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::{error, info, LevelFilter};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    sync::Arc,
    time::Duration,
};

use trivik::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    runtime::{CrosstermEventSource, FixedTicker, Runner, TriviaEvent},
    session::Level,
    timer_policy::TICK_MS,
    trivia::OpenTdbClient,
    App, Control,
};

/// multi-round terminal trivia with timed questions and charted results
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal trivia game: pick a category each round, answer against the clock, and review your score and answer times at the end."
)]
pub struct Cli {
    /// player name to pre-fill (4 to 20 characters)
    #[clap(short = 'p', long)]
    player: Option<String>,

    /// difficulty; sets the time allowed per question
    #[clap(short = 'l', long, value_enum)]
    level: Option<Level>,

    /// number of rounds (1 to 5)
    #[clap(short = 'r', long)]
    rounds: Option<u32>,

    /// questions per round (1 to 10)
    #[clap(short = 'q', long)]
    questions: Option<u32>,

    /// base url of the Open Trivia DB compatible service
    #[clap(long = "api-url")]
    api_url: Option<String>,

    /// request timeout in seconds
    #[clap(long)]
    timeout: Option<u64>,
}

impl Cli {
    /// Flags win over the stored config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(player) = &self.player {
            config.player = player.clone();
        }
        if let Some(level) = self.level {
            config.level = level;
        }
        if let Some(rounds) = self.rounds {
            config.rounds = rounds;
        }
        if let Some(questions) = self.questions {
            config.questions_per_round = questions;
        }
        if let Some(url) = &self.api_url {
            config.api_base_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_secs = timeout;
        }
        config
    }
}

/// The terminal belongs to the TUI, so logs go to a file or nowhere.
fn init_logging() {
    let Some(path) = AppDirs::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let _ = env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_logging();

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    let client = OpenTdbClient::new(
        &config.api_base_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;

    let mut runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_MS)),
    );
    let mut app = App::new(config, Arc::new(client), runner.sender()).with_store(Box::new(store));

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("trivik started");
    let result = start_tui(&mut terminal, &mut runner, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!("game stopped: {e}");
    }
    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    runner: &mut Runner<CrosstermEventSource, FixedTicker>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        let event = runner.step();
        let redraw = !matches!(event, TriviaEvent::Tick) || app.round.is_some();

        if app.handle_event(event)? == Control::Quit {
            break;
        }

        if redraw {
            terminal.draw(|f| f.render_widget(&*app, f.area()))?;
        }
    }

    Ok(())
}
