use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Built-in question banks: 8 competitive and 7 single-player items.
pub static QUESTIONS: Lazy<Questionnaire> = Lazy::new(Questionnaire::builtin);

const FORWARD: [u8; 5] = [0, 1, 2, 3, 4];
const REVERSE: [u8; 5] = [4, 3, 2, 1, 0];

const COMPETITIVE_BANK: [(&str, [u8; 5]); 8] = [
    (
        "I feel overwhelmed when playing competitive online games.",
        FORWARD,
    ),
    ("Competitive gaming makes me feel nervous or angry.", FORWARD),
    (
        "I experience physical symptoms (e.g., headaches, muscle tension) during competitive matches.",
        FORWARD,
    ),
    (
        "I feel emotionally drained after long competitive gaming sessions.",
        FORWARD,
    ),
    (
        "I worry about my performance or ranking in competitive games.",
        FORWARD,
    ),
    (
        "Toxic interactions (e.g., insults, blame) in competitive games increase my stress levels.",
        FORWARD,
    ),
    ("I lose track of time when playing competitive games.", FORWARD),
    (
        "I often delay my bedtime due to playing competitive games.",
        FORWARD,
    ),
];

// Items 3 and 7 share their wording.
const SINGLE_PLAYER_BANK: [(&str, [u8; 5]); 7] = [
    ("I feel relaxed when playing single player games.", REVERSE),
    ("Single player games make me feel nervous or angry.", REVERSE),
    (
        "I worry about my performance or ranking in single player games.",
        FORWARD,
    ),
    (
        "I feel in control of my emotions when playing single player games.",
        REVERSE,
    ),
    (
        "Playing single player games improves my mood after a difficult day.",
        REVERSE,
    ),
    (
        "I often delay my bedtime due to playing single player games.",
        FORWARD,
    ),
    (
        "I worry about my performance or ranking in single player games.",
        FORWARD,
    ),
];

/// Five-point frequency scale shared by every question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Choice {
    Never,
    Rarely,
    Sometimes,
    Often,
    Always,
}

impl Choice {
    pub const ALL: [Choice; 5] = [
        Choice::Never,
        Choice::Rarely,
        Choice::Sometimes,
        Choice::Often,
        Choice::Always,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Choice::Never => "Never",
            Choice::Rarely => "Rarely",
            Choice::Sometimes => "Sometimes",
            Choice::Often => "Often",
            Choice::Always => "Always",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts a label (case-insensitive) or its 1-based position on the scale.
impl FromStr for Choice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(position) = s.parse::<usize>() {
            return position
                .checked_sub(1)
                .and_then(|index| Choice::ALL.get(index).copied())
                .ok_or_else(|| Error::IllegalAnswer(s.to_string()));
        }
        Choice::ALL
            .into_iter()
            .find(|choice| choice.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::IllegalAnswer(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub options: BTreeMap<Choice, u8>,
}

impl Question {
    fn from_bank((text, weights): (&str, [u8; 5])) -> Self {
        Self {
            text: text.to_string(),
            options: Choice::ALL.into_iter().zip(weights).collect(),
        }
    }

    pub fn weight(&self, choice: Choice) -> Option<u8> {
        self.options.get(&choice).copied()
    }

    /// Reverse-scored items weigh "Never" above "Always".
    pub fn is_reverse(&self) -> bool {
        self.weight(Choice::Never) > self.weight(Choice::Always)
    }

    fn validate(&self) -> Result<(), Error> {
        for choice in Choice::ALL {
            match self.weight(choice) {
                Some(weight) if weight <= 4 => {}
                Some(weight) => {
                    return Err(Error::IllegalQuestion(format!(
                        "{:?}: weight {} for {} is outside 0..=4",
                        self.text, weight, choice
                    )))
                }
                None => {
                    return Err(Error::IllegalQuestion(format!(
                        "{:?}: no weight for {}",
                        self.text, choice
                    )))
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Competitive,
    SinglePlayer,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Competitive, Category::SinglePlayer];

    /// Form field name of the 0-based `index`-th answer, e.g. `comp_3`.
    pub fn field_name(self, index: usize) -> String {
        let prefix = match self {
            Category::Competitive => "comp",
            Category::SinglePlayer => "single",
        };
        format!("{prefix}_{index}")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Competitive => f.write_str("competitive"),
            Category::SinglePlayer => f.write_str("single-player"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    pub competitive: Vec<Question>,
    pub single_player: Vec<Question>,
}

impl Questionnaire {
    pub fn builtin() -> Self {
        Self {
            competitive: COMPETITIVE_BANK.into_iter().map(Question::from_bank).collect(),
            single_player: SINGLE_PLAYER_BANK
                .into_iter()
                .map(Question::from_bank)
                .collect(),
        }
    }

    /// Load a replacement bank from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, Error> {
        let questionnaire: Questionnaire = serde_json::from_str(text)?;
        for question in questionnaire
            .competitive
            .iter()
            .chain(&questionnaire.single_player)
        {
            question.validate()?;
        }
        Ok(questionnaire)
    }

    pub fn questions(&self, category: Category) -> &[Question] {
        match category {
            Category::Competitive => &self.competitive,
            Category::SinglePlayer => &self.single_player,
        }
    }

    /// Look up a question by its 1-based number within `category`.
    pub fn question(&self, category: Category, question_no: usize) -> Option<&Question> {
        question_no
            .checked_sub(1)
            .and_then(|index| self.questions(category).get(index))
    }

    pub fn len(&self, category: Category) -> usize {
        self.questions(category).len()
    }
}
