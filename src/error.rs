use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
    /// Question index out of range, or a malformed question bank
    #[error("illegal question: {0}")]
    IllegalQuestion(String),
    /// Answer weight outside 0..=4
    #[error("illegal answer: {0}")]
    IllegalAnswer(String),
    #[error("submission has no student id")]
    MissingStudentId,
    #[error("invalid student id: {0:?}")]
    InvalidStudentId(String),
}
