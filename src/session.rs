use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

pub const PLAYER_NAME_LEN: RangeInclusive<usize> = 4..=20;
pub const ROUNDS: RangeInclusive<u32> = 1..=5;
pub const QUESTIONS_PER_ROUND: RangeInclusive<u32> = 1..=10;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Level {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Level {
    pub fn next(self) -> Self {
        match self {
            Level::Easy => Level::Medium,
            Level::Medium => Level::Hard,
            Level::Hard => Level::Easy,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Level::Easy => Level::Hard,
            Level::Medium => Level::Easy,
            Level::Hard => Level::Medium,
        }
    }
}

/// Coarse lifecycle of a session, derived from its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    #[strum(serialize = "not started")]
    NotStarted,
    #[strum(serialize = "in progress")]
    InProgress,
    #[strum(serialize = "finished")]
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Wrong,
    Skipped,
}

/// The round being played, with the category chosen for it (empty until chosen).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundRef {
    pub id: u32,
    pub name: String,
    pub category_id: u32,
}

impl RoundRef {
    pub fn has_category(&self) -> bool {
        self.category_id != 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundTally {
    pub wrong: u32,
    pub correct: u32,
    pub skipped: u32,
}

impl RoundTally {
    pub fn resolved(&self) -> u32 {
        self.wrong + self.correct + self.skipped
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Correct => self.correct += 1,
            Outcome::Wrong => self.wrong += 1,
            Outcome::Skipped => self.skipped += 1,
        }
    }
}

/// Parameters chosen on the setup screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSetup {
    pub player: String,
    pub level: Level,
    pub total_rounds: u32,
    pub questions_per_round: u32,
}

impl GameSetup {
    pub fn check(&self) -> GameResult<()> {
        let name_len = self.player.chars().count();
        if !PLAYER_NAME_LEN.contains(&name_len) {
            return Err(GameError::InvalidConfiguration(format!(
                "player name must be {} to {} characters, got {name_len}",
                PLAYER_NAME_LEN.start(),
                PLAYER_NAME_LEN.end()
            )));
        }
        if !ROUNDS.contains(&self.total_rounds) {
            return Err(GameError::InvalidConfiguration(format!(
                "rounds must be {} to {}, got {}",
                ROUNDS.start(),
                ROUNDS.end(),
                self.total_rounds
            )));
        }
        if !QUESTIONS_PER_ROUND.contains(&self.questions_per_round) {
            return Err(GameError::InvalidConfiguration(format!(
                "questions per round must be {} to {}, got {}",
                QUESTIONS_PER_ROUND.start(),
                QUESTIONS_PER_ROUND.end(),
                self.questions_per_round
            )));
        }
        Ok(())
    }
}

/// Snapshot of one game. Every command returns a fresh snapshot and leaves
/// `self` untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub player: String,
    pub level: Level,
    pub total_rounds: u32,
    pub questions_per_round: u32,
    pub current_round: RoundRef,
    pub crossed_category_ids: BTreeSet<u32>,
    pub finished: bool,
    pub elapsed_duration_ms: u64,
    pub per_question_elapsed_ms: Vec<u64>,
    pub round_tallies: BTreeMap<u32, RoundTally>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            player: String::new(),
            level: Level::Easy,
            total_rounds: 3,
            questions_per_round: 5,
            current_round: RoundRef::default(),
            crossed_category_ids: BTreeSet::new(),
            finished: false,
            elapsed_duration_ms: 0,
            per_question_elapsed_ms: Vec::new(),
            round_tallies: BTreeMap::new(),
        }
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.finished {
            Phase::Finished
        } else if self.current_round.id == 0 {
            Phase::NotStarted
        } else {
            Phase::InProgress
        }
    }

    pub fn is_last_round(&self) -> bool {
        self.current_round.id == self.total_rounds
    }

    pub fn current_tally(&self) -> Option<&RoundTally> {
        self.round_tallies.get(&self.current_round.id)
    }

    fn require(&self, command: &'static str, phase: Phase) -> GameResult<()> {
        let current = self.phase();
        if current == phase {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                command,
                phase: current,
            })
        }
    }

    pub fn start_game(&self, setup: &GameSetup) -> GameResult<GameSession> {
        self.require("start_game", Phase::NotStarted)?;
        setup.check()?;

        let round_tallies = (1..=setup.total_rounds)
            .map(|id| (id, RoundTally::default()))
            .collect();

        Ok(GameSession {
            player: setup.player.clone(),
            level: setup.level,
            total_rounds: setup.total_rounds,
            questions_per_round: setup.questions_per_round,
            current_round: RoundRef {
                id: 1,
                name: String::new(),
                category_id: 0,
            },
            crossed_category_ids: BTreeSet::new(),
            finished: false,
            elapsed_duration_ms: 0,
            per_question_elapsed_ms: Vec::new(),
            round_tallies,
        })
    }

    /// Category id 8 ("Random") must already be resolved to a concrete id by the caller.
    pub fn set_category_for_round(&self, name: &str, category_id: u32) -> GameResult<GameSession> {
        self.require("set_category_for_round", Phase::InProgress)?;
        if self.crossed_category_ids.contains(&category_id) {
            return Err(GameError::DuplicateCategory(category_id));
        }

        let mut next = self.clone();
        next.crossed_category_ids.insert(category_id);
        next.current_round.name = name.to_string();
        next.current_round.category_id = category_id;
        Ok(next)
    }

    pub fn record_answer_outcome(&self, outcome: Outcome) -> GameResult<GameSession> {
        self.require("record_answer_outcome", Phase::InProgress)?;
        let round = self.current_round.id;
        if round == 0 || round > self.total_rounds {
            return Err(GameError::NoActiveRound { round });
        }

        let mut next = self.clone();
        let tally = next.round_tallies.entry(round).or_default();
        if tally.resolved() >= self.questions_per_round {
            return Err(GameError::RoundComplete { round });
        }
        tally.record(outcome);
        Ok(next)
    }

    pub fn advance_round(&self, new_round_id: u32) -> GameResult<GameSession> {
        self.require("advance_round", Phase::InProgress)?;
        let from = self.current_round.id;
        if new_round_id != from + 1 || new_round_id > self.total_rounds {
            return Err(GameError::InvalidRoundTransition {
                from,
                to: new_round_id,
            });
        }

        let mut next = self.clone();
        next.current_round = RoundRef {
            id: new_round_id,
            name: String::new(),
            category_id: 0,
        };
        Ok(next)
    }

    pub fn record_question_elapsed(&self, ms: u64) -> GameResult<GameSession> {
        self.require("record_question_elapsed", Phase::InProgress)?;

        let mut next = self.clone();
        next.per_question_elapsed_ms.push(ms);
        next.elapsed_duration_ms += ms;
        Ok(next)
    }

    pub fn finish_game(&self) -> GameResult<GameSession> {
        self.require("finish_game", Phase::InProgress)?;
        let round = self.current_round.id;
        let resolved = self.current_tally().map_or(0, RoundTally::resolved);
        if round != self.total_rounds || resolved != self.questions_per_round {
            return Err(GameError::PrematureFinish {
                round,
                resolved,
                expected: self.questions_per_round,
            });
        }

        let mut next = self.clone();
        next.finished = true;
        Ok(next)
    }

    pub fn reset_game(&self) -> GameSession {
        GameSession::new()
    }
}
