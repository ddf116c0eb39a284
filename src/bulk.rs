use std::collections::HashMap;
use std::io::Read;

use crate::question::Questionnaire;
use crate::submission::Submission;
use crate::Error;

/// Read form submissions exported as CSV.
///
/// The header row names the form fields (`name`, `student_id`, `birth_date`,
/// `plays_games`, `comp_0`.., `single_0`..). Each row yields one submission, or
/// the error that made the row unreadable. Fails up front if the header row
/// cannot be read.
pub fn read_bulk<'q, R: Read + 'q>(
    reader: R,
    questionnaire: &'q Questionnaire,
) -> Result<impl Iterator<Item = Result<Submission, Error>> + 'q, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    Ok(reader
        .into_records()
        .map(move |record| -> Result<Submission, Error> {
            let record = record?;
            // short rows leave the trailing fields missing
            let fields = headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.to_string(), value.to_string()))
                .collect::<HashMap<_, _>>();
            Ok(Submission::from_fields(&fields, questionnaire))
        }))
}
