//! Error types shared by the game core and the trivia data sources.

use thiserror::Error;

use crate::session::Phase;

/// A session command was issued out of sequence.
///
/// None of these are expected during normal play; seeing one means the
/// progression logic called the session in the wrong order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid game configuration: {0}")]
    InvalidConfiguration(String),

    #[error("category {0} has already been played this game")]
    DuplicateCategory(u32),

    #[error("no active round (current round is {round})")]
    NoActiveRound { round: u32 },

    #[error("round {round} already has an outcome for every question")]
    RoundComplete { round: u32 },

    #[error("cannot move from round {from} to round {to}")]
    InvalidRoundTransition { from: u32, to: u32 },

    #[error("cannot finish: round {round} has {resolved} of {expected} questions resolved")]
    PrematureFinish {
        round: u32,
        resolved: u32,
        expected: u32,
    },

    #[error("{command} is not valid while the game is {phase}")]
    WrongPhase { command: &'static str, phase: Phase },
}

/// Failure to obtain categories or questions from the trivia service.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response text is not valid UTF-8 once decoded: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("trivia service returned response code {code}")]
    Api { code: u8 },

    #[error("expected {expected} questions, got {got}")]
    ShortResult { expected: usize, got: usize },
}

pub type GameResult<T> = Result<T, GameError>;
