use crossterm::event::{KeyCode, KeyEvent};

use crate::config::Config;
use crate::session::{GameSetup, Level, PLAYER_NAME_LEN, QUESTIONS_PER_ROUND, ROUNDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupField {
    Player,
    Rounds,
    Questions,
    Level,
}

impl SetupField {
    pub const ALL: [SetupField; 4] = [
        SetupField::Player,
        SetupField::Rounds,
        SetupField::Questions,
        SetupField::Level,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SetupField::Player => "Player",
            SetupField::Rounds => "Number of Rounds",
            SetupField::Questions => "Questions Per Round",
            SetupField::Level => "Level",
        }
    }

    fn next(self) -> Self {
        match self {
            SetupField::Player => SetupField::Rounds,
            SetupField::Rounds => SetupField::Questions,
            SetupField::Questions => SetupField::Level,
            SetupField::Level => SetupField::Player,
        }
    }

    fn prev(self) -> Self {
        match self {
            SetupField::Player => SetupField::Level,
            SetupField::Rounds => SetupField::Player,
            SetupField::Questions => SetupField::Rounds,
            SetupField::Level => SetupField::Questions,
        }
    }
}

/// New game form. Numbers are kept as typed so half-edited values can be shown.
#[derive(Debug, Clone)]
pub struct SetupForm {
    pub player: String,
    pub rounds: String,
    pub questions: String,
    pub level: Level,
    pub focus: SetupField,
    errors: Vec<(SetupField, String)>,
}

impl SetupForm {
    pub fn from_config(config: &Config) -> Self {
        Self {
            player: config.player.clone(),
            rounds: config.rounds.to_string(),
            questions: config.questions_per_round.to_string(),
            level: config.level,
            focus: SetupField::Player,
            errors: Vec::new(),
        }
    }

    pub fn value(&self, field: SetupField) -> String {
        match field {
            SetupField::Player => self.player.clone(),
            SetupField::Rounds => self.rounds.clone(),
            SetupField::Questions => self.questions.clone(),
            SetupField::Level => self.level.to_string(),
        }
    }

    pub fn hint(field: SetupField) -> String {
        match field {
            SetupField::Player => format!(
                "Must be between {} and {} characters",
                PLAYER_NAME_LEN.start(),
                PLAYER_NAME_LEN.end()
            ),
            SetupField::Rounds => {
                format!("Must be between {} and {}", ROUNDS.start(), ROUNDS.end())
            }
            SetupField::Questions => format!(
                "Must be between {} and {}",
                QUESTIONS_PER_ROUND.start(),
                QUESTIONS_PER_ROUND.end()
            ),
            SetupField::Level => "←/→ to change".to_string(),
        }
    }

    pub fn error_for(&self, field: SetupField) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, msg)| msg.as_str())
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns true when the key asks to submit the form.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter => return true,
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Left if self.focus == SetupField::Level => self.level = self.level.prev(),
            KeyCode::Right if self.focus == SetupField::Level => self.level = self.level.next(),
            KeyCode::Backspace => {
                if let Some(buf) = self.buffer_mut() {
                    buf.pop();
                }
            }
            KeyCode::Char(c) => self.input_char(c),
            _ => {}
        }
        false
    }

    fn buffer_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            SetupField::Player => Some(&mut self.player),
            SetupField::Rounds => Some(&mut self.rounds),
            SetupField::Questions => Some(&mut self.questions),
            SetupField::Level => None,
        }
    }

    fn input_char(&mut self, c: char) {
        match self.focus {
            SetupField::Player => {
                if !c.is_control() {
                    self.player.push(c);
                }
            }
            SetupField::Rounds | SetupField::Questions => {
                if let Some(buf) = self.buffer_mut() {
                    if c.is_ascii_digit() && buf.len() < 2 {
                        buf.push(c);
                    }
                }
            }
            SetupField::Level => match c {
                'e' => self.level = Level::Easy,
                'm' => self.level = Level::Medium,
                'h' => self.level = Level::Hard,
                _ => {}
            },
        }
    }

    /// Validate every field; on success the form's values become a `GameSetup`.
    pub fn submit(&mut self) -> Option<GameSetup> {
        self.errors.clear();

        let player = self.player.trim().to_string();
        if !PLAYER_NAME_LEN.contains(&player.chars().count()) {
            self.errors
                .push((SetupField::Player, Self::hint(SetupField::Player)));
        }

        let rounds = self.rounds.parse::<u32>().ok().filter(|r| ROUNDS.contains(r));
        if rounds.is_none() {
            self.errors
                .push((SetupField::Rounds, Self::hint(SetupField::Rounds)));
        }

        let questions = self
            .questions
            .parse::<u32>()
            .ok()
            .filter(|q| QUESTIONS_PER_ROUND.contains(q));
        if questions.is_none() {
            self.errors
                .push((SetupField::Questions, Self::hint(SetupField::Questions)));
        }

        match (rounds, questions) {
            (Some(total_rounds), Some(questions_per_round)) if self.errors.is_empty() => {
                Some(GameSetup {
                    player,
                    level: self.level,
                    total_rounds,
                    questions_per_round,
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(form: &mut SetupForm, s: &str) {
        for c in s.chars() {
            form.on_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_defaults_from_config() {
        let form = SetupForm::from_config(&Config::default());
        assert_eq!(form.player, "");
        assert_eq!(form.rounds, "3");
        assert_eq!(form.questions, "3");
        assert_eq!(form.level, Level::Easy);
        assert_eq!(form.focus, SetupField::Player);
    }

    #[test]
    fn test_valid_submission() {
        let mut form = SetupForm::from_config(&Config::default());
        type_str(&mut form, "alice1");
        assert!(form.on_key(key(KeyCode::Enter)));

        let setup = form.submit().unwrap();
        assert_eq!(setup.player, "alice1");
        assert_eq!(setup.total_rounds, 3);
        assert_eq!(setup.questions_per_round, 3);
        assert!(!form.has_errors());
    }

    #[test]
    fn test_short_name_rejected() {
        let mut form = SetupForm::from_config(&Config::default());
        type_str(&mut form, "abc");
        assert!(form.submit().is_none());
        assert_eq!(
            form.error_for(SetupField::Player),
            Some("Must be between 4 and 20 characters")
        );
    }

    #[test]
    fn test_numeric_fields_only_take_digits() {
        let mut form = SetupForm::from_config(&Config::default());
        form.on_key(key(KeyCode::Tab));
        assert_eq!(form.focus, SetupField::Rounds);
        form.on_key(key(KeyCode::Backspace));
        type_str(&mut form, "x9z12");
        assert_eq!(form.rounds, "91");
    }

    #[test]
    fn test_out_of_range_numbers_rejected() {
        let mut form = SetupForm::from_config(&Config::default());
        type_str(&mut form, "alice1");
        form.rounds = "6".to_string();
        form.questions = "0".to_string();
        assert!(form.submit().is_none());
        assert_eq!(
            form.error_for(SetupField::Rounds),
            Some("Must be between 1 and 5")
        );
        assert_eq!(
            form.error_for(SetupField::Questions),
            Some("Must be between 1 and 10")
        );

        form.rounds = String::new();
        form.questions = "10".to_string();
        assert!(form.submit().is_none());
        assert!(form.error_for(SetupField::Questions).is_none());
    }

    #[test]
    fn test_level_cycles_with_arrows() {
        let mut form = SetupForm::from_config(&Config::default());
        form.on_key(key(KeyCode::BackTab));
        assert_eq!(form.focus, SetupField::Level);
        form.on_key(key(KeyCode::Right));
        assert_eq!(form.level, Level::Medium);
        form.on_key(key(KeyCode::Left));
        form.on_key(key(KeyCode::Left));
        assert_eq!(form.level, Level::Hard);
        form.on_key(key(KeyCode::Char('e')));
        assert_eq!(form.level, Level::Easy);
    }
}
