use log::{debug, info};
use rand::Rng;

use crate::error::GameResult;
use crate::session::{GameSession, Outcome};
use crate::timer_policy::{Countdown, TickOutcome};
use crate::trivia::Question;

/// What the caller should show after an event was applied to the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundStep {
    /// The event is not allowed right now (already answered, no skip on the
    /// last question, round over, ...). Nothing changed.
    Ignored,
    /// Still on the same question.
    Stay,
    NextQuestion,
    /// Round over; a category must be chosen for `round`.
    NextRound { round: u32 },
    /// Last round over; the game is finished.
    Finished,
}

/// Drives one round: the questions in order, the per-question countdown and
/// the outcome of each question.
#[derive(Debug)]
pub struct RoundPlay {
    questions: Vec<Question>,
    options: Vec<Vec<String>>,
    current: usize,
    countdown: Countdown,
    answered: bool,
    selected: Option<String>,
    done: bool,
}

impl RoundPlay {
    /// `questions` must be non-empty; answer options are shuffled once here.
    pub fn new<R: Rng + ?Sized>(
        questions: Vec<Question>,
        session: &GameSession,
        rng: &mut R,
    ) -> Self {
        let options = questions.iter().map(|q| q.shuffled_options(rng)).collect();
        Self {
            questions,
            options,
            current: 0,
            countdown: Countdown::new(session.level),
            answered: false,
            selected: None,
            done: false,
        }
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    pub fn current_options(&self) -> &[String] {
        &self.options[self.current]
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn is_last_question(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    pub fn answered(&self) -> bool {
        self.answered
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Stop the countdown; any further tick is ignored.
    pub fn cancel(&mut self) {
        self.countdown.cancel();
        self.done = true;
    }

    pub fn select_answer(&mut self, session: &mut GameSession, answer: &str) -> GameResult<RoundStep> {
        if self.done || self.answered {
            return Ok(RoundStep::Ignored);
        }

        let outcome = if self.current_question().is_correct(answer) {
            Outcome::Correct
        } else {
            Outcome::Wrong
        };
        *session = session.record_answer_outcome(outcome)?;
        debug!(
            "round {} question {}: {:?}",
            session.current_round.id,
            self.current + 1,
            outcome
        );

        self.answered = true;
        self.selected = Some(answer.to_string());
        Ok(RoundStep::Stay)
    }

    pub fn select_option(&mut self, session: &mut GameSession, option: usize) -> GameResult<RoundStep> {
        match self.current_options().get(option).cloned() {
            Some(answer) => self.select_answer(session, &answer),
            None => Ok(RoundStep::Ignored),
        }
    }

    pub fn skip(&mut self, session: &mut GameSession) -> GameResult<RoundStep> {
        if self.done || self.answered || self.is_last_question() {
            return Ok(RoundStep::Ignored);
        }

        *session = session.record_answer_outcome(Outcome::Skipped)?;
        self.advance_question(session)
    }

    /// "Next", "Next Round" or "Finish", depending on where we are.
    pub fn next(&mut self, session: &mut GameSession) -> GameResult<RoundStep> {
        if self.done || !self.answered {
            return Ok(RoundStep::Ignored);
        }

        if self.is_last_question() {
            self.end_round(session)
        } else {
            self.advance_question(session)
        }
    }

    pub fn on_tick(&mut self, session: &mut GameSession) -> GameResult<RoundStep> {
        if self.done {
            return Ok(RoundStep::Ignored);
        }

        match self.countdown.on_tick() {
            TickOutcome::Ignored => Ok(RoundStep::Ignored),
            TickOutcome::Running => Ok(RoundStep::Stay),
            // Already answered: wait at zero for the player to move on.
            TickOutcome::Expired if self.answered => Ok(RoundStep::Stay),
            TickOutcome::Expired => {
                info!(
                    "round {} question {} timed out",
                    session.current_round.id,
                    self.current + 1
                );
                // The skip must be recorded before the round can end.
                *session = session.record_answer_outcome(Outcome::Skipped)?;
                if self.is_last_question() {
                    self.end_round(session)
                } else {
                    self.advance_question(session)
                }
            }
        }
    }

    fn advance_question(&mut self, session: &mut GameSession) -> GameResult<RoundStep> {
        *session = session.record_question_elapsed(self.countdown.elapsed_ms())?;
        self.current += 1;
        self.answered = false;
        self.selected = None;
        self.countdown.restart();
        Ok(RoundStep::NextQuestion)
    }

    fn end_round(&mut self, session: &mut GameSession) -> GameResult<RoundStep> {
        let elapsed = self.countdown.elapsed_ms();
        self.cancel();
        *session = session.record_question_elapsed(elapsed)?;

        if session.is_last_round() {
            *session = session.finish_game()?;
            info!("game finished for {}", session.player);
            Ok(RoundStep::Finished)
        } else {
            let round = session.current_round.id + 1;
            *session = session.advance_round(round)?;
            info!("advancing to round {round}");
            Ok(RoundStep::NextRound { round })
        }
    }
}
