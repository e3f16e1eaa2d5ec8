use crate::session::Level;

/// Countdown step applied on every tick.
pub const TICK_MS: u64 = 1_000;

/// Time allowed to answer one question at the given level.
pub fn time_budget_ms(level: Level) -> u64 {
    match level {
        Level::Easy => 90_000,
        Level::Medium => 60_000,
        Level::Hard => 30_000,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Countdown is cancelled or already at zero; nothing changed.
    Ignored,
    Running,
    Expired,
}

/// Per-question countdown driven by external ticks.
///
/// A cancelled countdown ignores ticks until it is restarted, so a tick that
/// was already queued when a round ended cannot act on the next round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    budget_ms: u64,
    remaining_ms: u64,
    armed: bool,
}

impl Countdown {
    pub fn new(level: Level) -> Self {
        let budget_ms = time_budget_ms(level);
        Self {
            budget_ms,
            remaining_ms: budget_ms,
            armed: true,
        }
    }

    pub fn on_tick(&mut self) -> TickOutcome {
        if !self.armed || self.remaining_ms == 0 {
            return TickOutcome::Ignored;
        }

        self.remaining_ms = self.remaining_ms.saturating_sub(TICK_MS);
        if self.remaining_ms == 0 {
            TickOutcome::Expired
        } else {
            TickOutcome::Running
        }
    }

    pub fn restart(&mut self) {
        self.remaining_ms = self.budget_ms;
        self.armed = true;
    }

    pub fn cancel(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn budget_ms(&self) -> u64 {
        self.budget_ms
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_ms / 1_000
    }

    /// Time spent on the current question so far.
    pub fn elapsed_ms(&self) -> u64 {
        self.budget_ms - self.remaining_ms
    }
}
