//! Gaming stress check: a short questionnaire on competitive and single-player
//! gaming, scored against fixed bands and stored as JSON records.

pub mod birth_date;
pub mod bulk;
pub mod config;
mod error;
pub mod logging;
pub mod question;
pub mod score;
pub mod store;
pub mod submission;

pub use birth_date::BirthDate;
pub use bulk::read_bulk;
pub use config::Config;
pub use error::Error;
pub use question::{Category, Choice, Question, Questionnaire, QUESTIONS};
pub use score::{compute_results, interpret, score_category, AnswerStore, Interpretation, Scores};
pub use store::{FileStore, MemoryStore, ResultStore};
pub use submission::{Evaluation, PlaysGames, Submission, SubmissionResult};
