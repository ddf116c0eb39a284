use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process;

use chrono::Local;
use clap::Parser;
use gaming_stresscheck::{logging, read_bulk, Config, Error, ResultStore};

/// Score and save every submission of a CSV export.
#[derive(Parser)]
struct Args {
    path: PathBuf,

    /// Config file (default: ./stresscheck.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    logging::init();
    let args = Args::parse();

    let exit_code = match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            2
        }
    };
    process::exit(exit_code);
}

/// Row errors are reported and skipped; the exit code is 1 if any row failed.
fn run(args: Args) -> Result<i32, Error> {
    let config = Config::load(args.config.as_deref())?;
    let questionnaire = config.questionnaire()?;
    let mut store = config.store();
    let today = Local::now().date_naive();

    let reader = BufReader::new(File::open(&args.path)?);
    let mut failed = 0;
    for (line, row) in read_bulk(reader, &questionnaire)?.enumerate() {
        // header is row 1
        let row_no = line + 2;
        let saved = row.and_then(|submission| {
            let evaluation = submission.evaluate(today);
            store.save(&evaluation.result)?;
            Ok(evaluation)
        });
        match saved {
            Ok(evaluation) => {
                let id = evaluation.result.student_id.as_deref().unwrap_or("-");
                match evaluation.scores {
                    Some(scores) => println!(
                        "id = {}, scores = ({}, {}, {}), overall = {}",
                        id,
                        scores.competitive,
                        scores.single_player,
                        scores.total,
                        evaluation.result.overall
                    ),
                    None => println!("id = {}, overall = {}", id, evaluation.result.overall),
                }
            }
            Err(err) => {
                failed += 1;
                tracing::warn!("skipping row {row_no}: {err}");
            }
        }
    }

    Ok(if failed == 0 { 0 } else { 1 })
}
