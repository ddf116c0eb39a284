use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::submission::SubmissionResult;
use crate::Error;

/// Where scored submissions go: a record per respondent plus an append-only log of all of them.
pub trait ResultStore {
    /// Overwrite the respondent's record and append the result to the aggregate log.
    fn save(&mut self, result: &SubmissionResult) -> Result<(), Error>;
    fn load(&self, student_id: &str) -> Result<Option<SubmissionResult>, Error>;
    /// Every saved result, oldest first.
    fn all(&self) -> Result<Vec<SubmissionResult>, Error>;
}

/// Student ids become file names, so they must not be able to leave the results directory.
pub fn validate_student_id(student_id: Option<&str>) -> Result<&str, Error> {
    let student_id = student_id.ok_or(Error::MissingStudentId)?;
    if student_id.trim().is_empty() {
        return Err(Error::MissingStudentId);
    }
    if student_id.starts_with('.')
        || student_id.contains(['/', '\\'])
        || student_id.chars().any(char::is_control)
    {
        return Err(Error::InvalidStudentId(student_id.to_string()));
    }
    Ok(student_id)
}

/// JSON files on disk: `<results_dir>/<student_id>.json` and one aggregate array.
///
/// The aggregate is read, extended and rewritten on every save. The rewrite goes
/// through a temporary file and a rename, but concurrent writers can still lose
/// each other's appends.
#[derive(Debug, Clone)]
pub struct FileStore {
    results_dir: PathBuf,
    aggregate_file: PathBuf,
}

impl FileStore {
    pub fn new(results_dir: impl Into<PathBuf>, aggregate_file: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
            aggregate_file: aggregate_file.into(),
        }
    }

    pub fn aggregate_file(&self) -> &Path {
        &self.aggregate_file
    }

    pub fn record_path(&self, student_id: &str) -> PathBuf {
        self.results_dir.join(format!("{student_id}.json"))
    }

    /// A record must never share its path with the aggregate file.
    fn checked_record_path(&self, student_id: &str) -> Result<PathBuf, Error> {
        let path = self.record_path(student_id);
        if path == self.aggregate_file {
            return Err(Error::InvalidStudentId(student_id.to_string()));
        }
        Ok(path)
    }

    fn read_aggregate(&self) -> Result<Vec<SubmissionResult>, Error> {
        if !self.aggregate_file.exists() {
            return Ok(Vec::new());
        }
        let bytes = fs::read(&self.aggregate_file)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn write_aggregate(&self, results: &[SubmissionResult]) -> Result<(), Error> {
        create_parent(&self.aggregate_file)?;
        let tmp = tmp_path(&self.aggregate_file);
        write_pretty(&tmp, results)?;
        fs::rename(&tmp, &self.aggregate_file)?;
        Ok(())
    }
}

impl ResultStore for FileStore {
    fn save(&mut self, result: &SubmissionResult) -> Result<(), Error> {
        let student_id = validate_student_id(result.student_id.as_deref())?;
        let path = self.checked_record_path(student_id)?;

        let mut results = self.read_aggregate()?;

        // The record is staged first and only moved into place once the
        // aggregate holds the new entry.
        fs::create_dir_all(&self.results_dir)?;
        let staged = tmp_path(&path);
        write_pretty(&staged, result)?;

        results.push(result.clone());
        if let Err(err) = self.write_aggregate(&results) {
            let _ = fs::remove_file(&staged);
            return Err(err);
        }
        fs::rename(&staged, &path)?;

        tracing::info!(
            "saved result for {student_id} to {} ({} in {})",
            path.display(),
            results.len(),
            self.aggregate_file.display()
        );
        Ok(())
    }

    fn load(&self, student_id: &str) -> Result<Option<SubmissionResult>, Error> {
        let student_id = validate_student_id(Some(student_id))?;
        let path = self.checked_record_path(student_id)?;
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn all(&self) -> Result<Vec<SubmissionResult>, Error> {
        self.read_aggregate()
    }
}

/// In-process store with the same semantics as [`FileStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, SubmissionResult>,
    log: Vec<SubmissionResult>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultStore for MemoryStore {
    fn save(&mut self, result: &SubmissionResult) -> Result<(), Error> {
        let student_id = validate_student_id(result.student_id.as_deref())?;
        self.records.insert(student_id.to_string(), result.clone());
        self.log.push(result.clone());
        Ok(())
    }

    fn load(&self, student_id: &str) -> Result<Option<SubmissionResult>, Error> {
        let student_id = validate_student_id(Some(student_id))?;
        Ok(self.records.get(student_id).cloned())
    }

    fn all(&self) -> Result<Vec<SubmissionResult>, Error> {
        Ok(self.log.clone())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

fn create_parent(path: &Path) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// JSON with 4-space indentation, matching the records the survey has always written.
fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    let mut file = fs::File::create(path)?;
    file.write_all(&buf)?;
    Ok(())
}
