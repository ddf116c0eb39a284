use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::birth_date::BirthDate;
use crate::question::{Category, Questionnaire};
use crate::score::{compute_results, AnswerStore, Scores};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaysGames {
    Yes,
    No,
}

impl PlaysGames {
    /// `"yes"` / `"no"`, ignoring case and surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" => Some(PlaysGames::Yes),
            "no" => Some(PlaysGames::No),
            _ => None,
        }
    }
}

/// One filled-in questionnaire, before scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: Option<String>,
    pub student_id: Option<String>,
    pub birth_date: Option<String>,
    pub plays_games: Option<PlaysGames>,
    pub answers: AnswerStore,
}

/// The persisted record of a scored submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub name: Option<String>,
    pub student_id: Option<String>,
    pub birth_date: Option<String>,
    pub age: Option<i32>,
    pub plays_games: Option<PlaysGames>,
    pub overall: String,
    pub competitive: String,
    pub single_player: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub result: SubmissionResult,
    pub scores: Option<Scores>,
}

impl Submission {
    /// Build a submission from form-style fields (`name`, `student_id`,
    /// `birth_date`, `plays_games`, `comp_0`.., `single_0`..). Blank values count as missing.
    pub fn from_fields(fields: &HashMap<String, String>, questionnaire: &Questionnaire) -> Self {
        let text = |key: &str| {
            fields
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        let plays_games = text("plays_games").and_then(|raw| {
            let parsed = PlaysGames::parse(&raw);
            if parsed.is_none() {
                tracing::warn!("unrecognised plays_games value {raw:?}, scoring anyway");
            }
            parsed
        });

        Self {
            name: text("name"),
            student_id: text("student_id"),
            birth_date: text("birth_date"),
            plays_games,
            answers: AnswerStore::from_fields(fields, questionnaire),
        }
    }

    /// Only an explicit "no" skips scoring.
    pub fn plays_games(&self) -> bool {
        self.plays_games != Some(PlaysGames::No)
    }

    pub fn evaluate(&self, today: NaiveDate) -> Evaluation {
        let birth_date = self.birth_date.as_deref().map(BirthDate::parse);
        if self.plays_games() && !self.answers.is_complete() {
            tracing::debug!("unanswered questions count as 0");
        }
        let interpretation = compute_results(
            self.answers.answers(Category::Competitive),
            self.answers.answers(Category::SinglePlayer),
            self.plays_games(),
        );

        Evaluation {
            result: SubmissionResult {
                name: self.name.clone(),
                student_id: self.student_id.clone(),
                birth_date: birth_date.as_ref().map(BirthDate::to_string),
                age: birth_date.and_then(|birth| birth.age_on(today)),
                plays_games: self.plays_games,
                overall: interpretation.overall.to_string(),
                competitive: interpretation.competitive.to_string(),
                single_player: interpretation.single_player.to_string(),
            },
            scores: interpretation.scores,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::question::QUESTIONS;
    use crate::score::{NOT_APPLICABLE, NOT_CONDUCTED};

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    #[test]
    fn test_plays_games_parse() {
        assert_eq!(PlaysGames::parse("yes"), Some(PlaysGames::Yes));
        assert_eq!(PlaysGames::parse(" NO "), Some(PlaysGames::No));
        assert_eq!(PlaysGames::parse("sometimes"), None);
    }

    #[test]
    fn test_evaluate() {
        let mut pairs = vec![
            ("name", "Ada"),
            ("student_id", "s-001"),
            ("birth_date", "15031999"),
            ("plays_games", "yes"),
        ];
        let comp = ["4", "4", "4", "4", "4", "4", "3", "3"];
        let single = ["2", "2", "2", "2", "2", "0", "0"];
        let comp_names = (0..8).map(|i| format!("comp_{i}")).collect::<Vec<_>>();
        let single_names = (0..7).map(|i| format!("single_{i}")).collect::<Vec<_>>();
        pairs.extend(comp_names.iter().map(String::as_str).zip(comp));
        pairs.extend(single_names.iter().map(String::as_str).zip(single));

        let submission = Submission::from_fields(&fields(&pairs), &QUESTIONS);
        let evaluation = submission.evaluate(today());

        assert_eq!(evaluation.scores.map(|s| s.total), Some(40));
        assert_eq!(
            evaluation.result,
            SubmissionResult {
                name: Some("Ada".to_string()),
                student_id: Some("s-001".to_string()),
                birth_date: Some("15.03.1999".to_string()),
                age: Some(24),
                plays_games: Some(PlaysGames::Yes),
                overall: "High stress levels. You show signs of psychological strain."
                    .to_string(),
                competitive: "Severe psychological distress due to competitive online games."
                    .to_string(),
                single_player: "Stable psychological state.".to_string(),
            }
        );
    }

    #[test]
    fn test_evaluate_not_playing() {
        let submission = Submission::from_fields(
            &fields(&[
                ("student_id", "s-002"),
                ("birth_date", "1.1.2001"),
                ("plays_games", "no"),
                ("comp_0", "4"),
                ("single_0", "4"),
            ]),
            &QUESTIONS,
        );
        let evaluation = submission.evaluate(today());

        assert_eq!(evaluation.scores, None);
        assert_eq!(evaluation.result.overall, NOT_CONDUCTED);
        assert_eq!(evaluation.result.competitive, NOT_APPLICABLE);
        assert_eq!(evaluation.result.single_player, NOT_APPLICABLE);
        assert_eq!(evaluation.result.birth_date.as_deref(), Some("1.1.2001"));
        assert_eq!(evaluation.result.age, None);
        assert_eq!(evaluation.result.name, None);
    }

    #[test]
    fn test_unknown_plays_games_is_scored() {
        let submission = Submission::from_fields(
            &fields(&[("student_id", "s-003"), ("plays_games", "maybe")]),
            &QUESTIONS,
        );
        assert_eq!(submission.plays_games, None);
        assert!(submission.plays_games());
        let evaluation = submission.evaluate(today());
        assert_eq!(evaluation.scores.map(|s| s.total), Some(0));
    }

    #[test]
    fn test_result_json_shape() {
        let result = SubmissionResult {
            name: Some("Ada".to_string()),
            student_id: Some("s-001".to_string()),
            birth_date: Some("15.03.1999".to_string()),
            age: None,
            plays_games: Some(PlaysGames::No),
            overall: NOT_CONDUCTED.to_string(),
            competitive: NOT_APPLICABLE.to_string(),
            single_player: NOT_APPLICABLE.to_string(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["plays_games"], "no");
        assert_eq!(value["age"], serde_json::Value::Null);
        assert_eq!(value["single_player"], "N/A");
        assert_eq!(value.as_object().unwrap().len(), 8);
    }
}
