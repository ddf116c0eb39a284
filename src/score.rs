use std::collections::HashMap;

use crate::question::{Category, Questionnaire};
use crate::Error;

/// (lower bound, label) pairs, sorted by descending bound.
pub type Thresholds = [(u32, &'static str)];

/// Banding of the combined competitive + single-player score (max 60).
pub const OVERALL: &Thresholds = &[
    (
        50,
        "Severe psychological distress. Professional support may be needed.",
    ),
    (
        38,
        "High stress levels. You show signs of psychological strain.",
    ),
    (
        26,
        "Moderate psychological state. Some stress is present but manageable.",
    ),
    (
        14,
        "Stable psychological state. Occasional stress but generally healthy.",
    ),
    (
        0,
        "Very healthy psychological state. No significant stress detected.",
    ),
];

/// Banding of the competitive score (max 32).
pub const COMPETITIVE: &Thresholds = &[
    (
        28,
        "Severe psychological distress due to competitive online games.",
    ),
    (24, "High stress levels due to competitive online games."),
    (15, "Moderate psychological state."),
    (10, "Stable psychological state."),
    (0, "Very healthy psychological state."),
];

/// Banding of the single-player score (max 28).
pub const SINGLE_PLAYER: &Thresholds = &[
    (26, "Severe psychological distress due to single player games."),
    (22, "High stress levels due to single player games."),
    (16, "Moderate psychological state."),
    (8, "Stable psychological state."),
    (0, "Very healthy psychological state."),
];

pub const NOT_CONDUCTED: &str = "Survey not conducted (user does not play video games).";
pub const NOT_APPLICABLE: &str = "N/A";

/// Label of the first band whose bound is <= `score`, falling back to the last band.
pub fn interpret<'a>(score: u32, thresholds: &[(u32, &'a str)]) -> &'a str {
    thresholds
        .iter()
        .find(|(bound, _)| score >= *bound)
        .or_else(|| thresholds.last())
        .map_or("", |(_, label)| *label)
}

/// Sum of the first `question_count` responses; unanswered questions count as 0.
pub fn score_category(responses: &[Option<u8>], question_count: usize) -> u32 {
    (0..question_count)
        .map(|index| responses.get(index).copied().flatten().unwrap_or(0))
        .map(u32::from)
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scores {
    pub competitive: u32,
    pub single_player: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub overall: &'static str,
    pub competitive: &'static str,
    pub single_player: &'static str,
    /// `None` when the survey was not conducted.
    pub scores: Option<Scores>,
}

pub fn compute_results(
    competitive: &[Option<u8>],
    single_player: &[Option<u8>],
    plays_games: bool,
) -> Interpretation {
    if !plays_games {
        return Interpretation {
            overall: NOT_CONDUCTED,
            competitive: NOT_APPLICABLE,
            single_player: NOT_APPLICABLE,
            scores: None,
        };
    }

    let comp_score = score_category(competitive, competitive.len());
    let single_score = score_category(single_player, single_player.len());
    let scores = Scores {
        competitive: comp_score,
        single_player: single_score,
        total: comp_score + single_score,
    };
    tracing::debug!(?scores, "computed survey scores");

    Interpretation {
        overall: interpret(scores.total, OVERALL),
        competitive: interpret(scores.competitive, COMPETITIVE),
        single_player: interpret(scores.single_player, SINGLE_PLAYER),
        scores: Some(scores),
    }
}

/// Answer weights of one respondent, one slot per question of each category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerStore {
    competitive: Vec<Option<u8>>,
    single_player: Vec<Option<u8>>,
}

impl AnswerStore {
    pub fn new(questionnaire: &Questionnaire) -> Self {
        Self {
            competitive: vec![None; questionnaire.len(Category::Competitive)],
            single_player: vec![None; questionnaire.len(Category::SinglePlayer)],
        }
    }

    /// Lenient form parsing: missing, non-numeric or out-of-range fields stay unanswered.
    pub fn from_fields(fields: &HashMap<String, String>, questionnaire: &Questionnaire) -> Self {
        let mut store = Self::new(questionnaire);
        for category in Category::ALL {
            for (index, slot) in store.slots_mut(category).iter_mut().enumerate() {
                let name = category.field_name(index);
                let Some(raw) = fields.get(&name) else {
                    continue;
                };
                match raw.trim().parse::<u8>() {
                    Ok(weight) if weight <= 4 => *slot = Some(weight),
                    Ok(weight) => {
                        tracing::warn!("ignoring {name}={weight}: weight is outside 0..=4");
                    }
                    Err(_) if raw.trim().is_empty() => {}
                    Err(_) => tracing::warn!("ignoring {name}={raw:?}: not a number"),
                }
            }
        }
        store
    }

    /// Store the weight of the 1-based `question_no`-th question of `category`.
    pub fn insert(&mut self, category: Category, question_no: usize, weight: u8) -> Result<(), Error> {
        if weight > 4 {
            return Err(Error::IllegalAnswer(format!(
                "weight {weight} is outside 0..=4"
            )));
        }
        let slot = match question_no.checked_sub(1) {
            Some(index) => self.slots_mut(category).get_mut(index),
            None => None,
        };
        let slot = slot.ok_or_else(|| {
            Error::IllegalQuestion(format!("{category} question {question_no} does not exist"))
        })?;
        *slot = Some(weight);
        Ok(())
    }

    pub fn answers(&self, category: Category) -> &[Option<u8>] {
        match category {
            Category::Competitive => &self.competitive,
            Category::SinglePlayer => &self.single_player,
        }
    }

    pub fn score(&self, category: Category) -> u32 {
        let answers = self.answers(category);
        score_category(answers, answers.len())
    }

    pub fn is_complete(&self) -> bool {
        Category::ALL
            .into_iter()
            .all(|category| self.answers(category).iter().all(Option::is_some))
    }

    fn slots_mut(&mut self, category: Category) -> &mut Vec<Option<u8>> {
        match category {
            Category::Competitive => &mut self.competitive,
            Category::SinglePlayer => &mut self.single_player,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::question::QUESTIONS;

    fn responses(weights: &[u8]) -> Vec<Option<u8>> {
        weights.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_interpret_picks_greatest_bound_not_above_score() {
        assert_eq!(interpret(0, COMPETITIVE), "Very healthy psychological state.");
        assert_eq!(interpret(9, COMPETITIVE), "Very healthy psychological state.");
        assert_eq!(interpret(10, COMPETITIVE), "Stable psychological state.");
        assert_eq!(interpret(15, COMPETITIVE), "Moderate psychological state.");
        assert_eq!(
            interpret(27, COMPETITIVE),
            "High stress levels due to competitive online games."
        );
        assert_eq!(
            interpret(32, COMPETITIVE),
            "Severe psychological distress due to competitive online games."
        );

        for table in [OVERALL, COMPETITIVE, SINGLE_PLAYER] {
            for score in 0..=60 {
                let expected = table
                    .iter()
                    .filter(|(bound, _)| *bound <= score)
                    .max_by_key(|(bound, _)| *bound)
                    .map(|(_, label)| *label)
                    .unwrap();
                assert_eq!(interpret(score, table), expected);
            }
        }
    }

    #[test]
    fn test_interpret_falls_back_to_last_band() {
        let table = [(20, "high"), (10, "low")];
        assert_eq!(interpret(5, &table), "low");
        assert_eq!(interpret(10, &table), "low");
        assert_eq!(interpret(25, &table), "high");
        assert_eq!(interpret(5, &[]), "");
    }

    #[test]
    fn test_score_category() {
        assert_eq!(score_category(&responses(&[0; 8]), 8), 0);
        assert_eq!(score_category(&responses(&[4; 8]), 8), 32);
        assert_eq!(score_category(&responses(&[4; 7]), 7), 28);
        assert_eq!(score_category(&[Some(3), None, Some(2)], 3), 5);
        // missing trailing responses count as 0
        assert_eq!(score_category(&responses(&[1, 1]), 5), 2);
        assert_eq!(score_category(&responses(&[1, 1, 1]), 2), 2);
    }

    #[test]
    fn test_compute_results_not_playing() {
        let result = compute_results(&responses(&[4; 8]), &responses(&[4; 7]), false);
        assert_eq!(result.overall, NOT_CONDUCTED);
        assert_eq!(result.competitive, NOT_APPLICABLE);
        assert_eq!(result.single_player, NOT_APPLICABLE);
        assert_eq!(result.scores, None);
    }

    #[test]
    fn test_compute_results() {
        // 30 + 10 = 40
        let result = compute_results(
            &responses(&[4, 4, 4, 4, 4, 4, 3, 3]),
            &responses(&[2, 2, 2, 2, 2, 0, 0]),
            true,
        );
        assert_eq!(
            result.scores,
            Some(Scores {
                competitive: 30,
                single_player: 10,
                total: 40
            })
        );
        assert_eq!(
            result.overall,
            "High stress levels. You show signs of psychological strain."
        );
        assert_eq!(
            result.competitive,
            "Severe psychological distress due to competitive online games."
        );
        assert_eq!(result.single_player, "Stable psychological state.");
    }

    #[test]
    fn test_compute_results_all_unanswered() {
        let store = AnswerStore::new(&QUESTIONS);
        let result = compute_results(
            store.answers(Category::Competitive),
            store.answers(Category::SinglePlayer),
            true,
        );
        assert_eq!(
            result.overall,
            "Very healthy psychological state. No significant stress detected."
        );
        assert_eq!(result.scores.map(|s| s.total), Some(0));
    }

    #[test]
    fn test_answer_store_from_fields() {
        let fields = [
            ("comp_0", "4"),
            ("comp_1", " 3 "),
            ("comp_2", "abc"),
            ("comp_3", "7"),
            ("comp_7", "2"),
            ("comp_8", "4"),
            ("single_0", "1"),
            ("single_6", ""),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<HashMap<_, _>>();

        let store = AnswerStore::from_fields(&fields, &QUESTIONS);
        assert_eq!(
            store.answers(Category::Competitive),
            &[Some(4), Some(3), None, None, None, None, None, Some(2)]
        );
        assert_eq!(store.score(Category::Competitive), 9);
        assert_eq!(store.score(Category::SinglePlayer), 1);
        assert!(!store.is_complete());
    }

    #[test]
    fn test_insert() {
        let mut store = AnswerStore::new(&QUESTIONS);
        assert!(matches!(
            store.insert(Category::Competitive, 0, 1),
            Err(Error::IllegalQuestion(_))
        ));
        assert!(store.insert(Category::Competitive, 1, 1).is_ok());
        assert!(store.insert(Category::Competitive, 8, 1).is_ok());
        assert!(matches!(
            store.insert(Category::Competitive, 9, 1),
            Err(Error::IllegalQuestion(_))
        ));
        assert!(store.insert(Category::SinglePlayer, 7, 4).is_ok());
        assert!(matches!(
            store.insert(Category::SinglePlayer, 8, 4),
            Err(Error::IllegalQuestion(_))
        ));
        assert!(matches!(
            store.insert(Category::SinglePlayer, 1, 5),
            Err(Error::IllegalAnswer(_))
        ));
        assert_eq!(store.score(Category::Competitive), 2);
        assert_eq!(store.score(Category::SinglePlayer), 4);
    }

    #[test]
    fn test_answer_store_complete() {
        let mut store = AnswerStore::new(&QUESTIONS);
        for category in Category::ALL {
            for question_no in 1..=QUESTIONS.len(category) {
                assert!(store.insert(category, question_no, 4).is_ok());
            }
        }
        assert!(store.is_complete());
        assert_eq!(store.score(Category::Competitive), 32);
        assert_eq!(store.score(Category::SinglePlayer), 28);
    }
}
