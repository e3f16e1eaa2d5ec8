// Library surface for the binary, headless/integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod round;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod setup;
pub mod timer_policy;
pub mod trivia;
pub mod ui;

pub use app::{App, AppState, Control};
pub use error::{FetchError, GameError, GameResult};
