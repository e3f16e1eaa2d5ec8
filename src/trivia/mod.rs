//! Trivia data: questions, categories, and the sources that supply them.

pub mod api;
pub mod category;
pub mod question;

pub use api::OpenTdbClient;
pub use category::{category_menu, resolve_choice, Category};
pub use question::{Question, QuestionKind};

use crate::error::FetchError;
use crate::session::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionRequest {
    pub amount: u32,
    pub category_id: u32,
    pub difficulty: Level,
}

pub trait CategorySource: Send + Sync {
    /// Every category the service offers, in no particular order.
    fn categories(&self) -> Result<Vec<Category>, FetchError>;
}

pub trait QuestionSource: Send + Sync {
    fn questions(&self, request: &QuestionRequest) -> Result<Vec<Question>, FetchError>;
}

/// Both halves of the trivia service.
pub trait TriviaSource: CategorySource + QuestionSource {}

impl<T: CategorySource + QuestionSource> TriviaSource for T {}

/// Fetch questions for one round, refusing anything shorter than requested.
pub fn fetch_round_questions<S: QuestionSource + ?Sized>(
    source: &S,
    request: &QuestionRequest,
) -> Result<Vec<Question>, FetchError> {
    let mut questions = source.questions(request)?;
    let expected = request.amount as usize;
    if questions.len() < expected {
        return Err(FetchError::ShortResult {
            expected,
            got: questions.len(),
        });
    }
    questions.truncate(expected);
    Ok(questions)
}
