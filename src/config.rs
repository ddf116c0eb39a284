use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::question::Questionnaire;
use crate::store::FileStore;
use crate::Error;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "stresscheck.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub survey: SurveyConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub results_dir: PathBuf,
    pub aggregate_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("results"),
            aggregate_file: PathBuf::from("all_results.json"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    /// JSON question bank replacing the built-in one.
    pub questions: Option<PathBuf>,
}

impl Config {
    /// An explicit path must exist; otherwise `stresscheck.toml` is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(path) => Self::from_path(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_path(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)?;
        let config = toml::from_str(&text)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn questionnaire(&self) -> Result<Questionnaire, Error> {
        match &self.survey.questions {
            Some(path) => Questionnaire::from_path(path),
            None => Ok(Questionnaire::builtin()),
        }
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(&self.storage.results_dir, &self.storage.aggregate_file)
    }
}
