use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::session::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Multiple,
    Boolean,
}

/// One trivia question as served by the question source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    pub category: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub difficulty: Level,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

impl Question {
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct_answer
    }

    /// Correct answer followed by the incorrect ones, in source order.
    pub fn options(&self) -> Vec<String> {
        std::iter::once(self.correct_answer.clone())
            .chain(self.incorrect_answers.iter().cloned())
            .collect()
    }

    pub fn shuffled_options<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        let mut options = self.options();
        options.shuffle(rng);
        options
    }

    /// Percent-decode every text field (the service is asked for RFC 3986 encoding).
    pub(crate) fn decoded(self) -> Result<Self, std::string::FromUtf8Error> {
        let decode = |s: &str| urlencoding::decode(s).map(|c| c.into_owned());
        Ok(Self {
            category: decode(&self.category)?,
            kind: self.kind,
            difficulty: self.difficulty,
            question: decode(&self.question)?,
            correct_answer: decode(&self.correct_answer)?,
            incorrect_answers: self
                .incorrect_answers
                .iter()
                .map(|a| decode(a))
                .collect::<Result<_, _>>()?,
        })
    }
}
