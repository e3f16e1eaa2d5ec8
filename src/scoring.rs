use crate::session::GameSession;

/// Totals across every round recorded so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub correct: u32,
    pub wrong: u32,
    pub skipped: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    pub round: u32,
    pub correct: u32,
    pub wrong: u32,
    pub skipped: u32,
}

impl RoundSummary {
    /// Wrong and skipped answers together, as the per-round chart shows them.
    pub fn missed(&self) -> u32 {
        self.wrong + self.skipped
    }
}

pub fn total_score(session: &GameSession) -> Score {
    session
        .round_tallies
        .values()
        .fold(Score::default(), |acc, tally| Score {
            correct: acc.correct + tally.correct,
            wrong: acc.wrong + tally.wrong,
            skipped: acc.skipped + tally.skipped,
        })
}

/// One entry per round, ascending by round id.
pub fn per_round_summary(session: &GameSession) -> Vec<RoundSummary> {
    session
        .round_tallies
        .iter()
        .map(|(&round, tally)| RoundSummary {
            round,
            correct: tally.correct,
            wrong: tally.wrong,
            skipped: tally.skipped,
        })
        .collect()
}

pub fn total_questions(session: &GameSession) -> u32 {
    session.total_rounds * session.questions_per_round
}

/// Per-question elapsed times in seconds, in the order they were resolved.
pub fn question_times_secs(session: &GameSession) -> Vec<f64> {
    session
        .per_question_elapsed_ms
        .iter()
        .map(|&ms| ms as f64 / 1_000.0)
        .collect()
}

/// Average and standard deviation of question times, in seconds.
pub fn question_time_stats(session: &GameSession) -> Option<(f64, f64)> {
    let secs = question_times_secs(session);
    Some((mean(&secs)?, std_dev(&secs)?))
}

fn mean(data: &[f64]) -> Option<f64> {
    match data.len() {
        0 => None,
        count => Some(data.iter().sum::<f64>() / count as f64),
    }
}

fn std_dev(data: &[f64]) -> Option<f64> {
    let data_mean = mean(data)?;
    let variance = data
        .iter()
        .map(|value| {
            let diff = data_mean - *value;

            diff * diff
        })
        .sum::<f64>()
        / data.len() as f64;

    Some(variance.sqrt())
}

/// Coarse, human friendly duration: "42 secs" under a minute, otherwise
/// whole minutes rounded to the nearest.
pub fn format_duration(ms: u64) -> String {
    let total_secs = (ms + 500) / 1_000;
    let minutes = (total_secs + 30) / 60;
    let seconds = total_secs % 60;

    if minutes == 0 {
        format!("{seconds} secs")
    } else {
        format!("{minutes} mins")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{GameSetup, Level, Outcome};

    fn started(rounds: u32, questions: u32) -> GameSession {
        GameSession::new()
            .start_game(&GameSetup {
                player: "alice1".to_string(),
                level: Level::Easy,
                total_rounds: rounds,
                questions_per_round: questions,
            })
            .unwrap()
    }

    #[test]
    fn test_empty_session_scores_zero() {
        let session = GameSession::new();
        assert_eq!(total_score(&session), Score::default());
        assert!(per_round_summary(&session).is_empty());
        assert_eq!(question_time_stats(&session), None);
    }

    #[test]
    fn test_total_score_sums_all_rounds() {
        let session = started(2, 3)
            .record_answer_outcome(Outcome::Correct)
            .unwrap()
            .record_answer_outcome(Outcome::Wrong)
            .unwrap()
            .advance_round(2)
            .unwrap()
            .record_answer_outcome(Outcome::Correct)
            .unwrap()
            .record_answer_outcome(Outcome::Skipped)
            .unwrap();

        assert_eq!(
            total_score(&session),
            Score {
                correct: 2,
                wrong: 1,
                skipped: 1
            }
        );
    }

    #[test]
    fn test_per_round_summary_merges_every_increment() {
        let outcomes = [
            Outcome::Skipped,
            Outcome::Correct,
            Outcome::Wrong,
            Outcome::Correct,
            Outcome::Correct,
        ];
        let session = outcomes.iter().fold(started(3, 5), |s, &o| {
            s.record_answer_outcome(o).unwrap()
        });

        let summary = per_round_summary(&session);
        assert_eq!(summary.len(), 3);
        assert_eq!(
            summary[0],
            RoundSummary {
                round: 1,
                correct: 3,
                wrong: 1,
                skipped: 1
            }
        );
        assert_eq!(summary[0].missed(), 2);
        assert_eq!(summary[1].round, 2);
        assert_eq!(summary[2].round, 3);
        assert_eq!(summary[2].correct, 0);
    }

    #[test]
    fn test_per_round_summary_is_order_independent() {
        let a = [Outcome::Correct, Outcome::Wrong, Outcome::Skipped];
        let b = [Outcome::Skipped, Outcome::Correct, Outcome::Wrong];
        let run = |outcomes: &[Outcome]| {
            let session = outcomes.iter().fold(started(1, 3), |s, &o| {
                s.record_answer_outcome(o).unwrap()
            });
            per_round_summary(&session)
        };
        assert_eq!(run(&a), run(&b));
    }

    #[test]
    fn test_total_questions() {
        assert_eq!(total_questions(&started(3, 4)), 12);
        assert_eq!(total_questions(&GameSession::new()), 15);
    }

    #[test]
    fn test_question_time_stats() {
        let session = started(1, 2)
            .record_question_elapsed(2_000)
            .unwrap()
            .record_question_elapsed(4_000)
            .unwrap();
        assert_eq!(question_times_secs(&session), vec![2.0, 4.0]);
        assert_eq!(question_time_stats(&session), Some((3.0, 1.0)));
    }

    #[test]
    fn test_mean_and_std_dev() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[10., 20., 30., 15., 22.]), Some(19.4));
        assert_eq!(std_dev(&[]), None);
        assert_eq!(std_dev(&[5.0, 5.0, 5.0]), Some(0.0));
        assert_eq!(std_dev(&[15., 7., 55.]), Some(20.997354330698162));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0 secs");
        assert_eq!(format_duration(12_400), "12 secs");
        assert_eq!(format_duration(29_000), "29 secs");
        assert_eq!(format_duration(45_000), "1 mins");
        assert_eq!(format_duration(150_000), "3 mins");
        assert_eq!(format_duration(600_000), "10 mins");
    }
}
