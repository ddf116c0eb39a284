use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use chrono::Local;
use clap::{Parser, Subcommand};
use gaming_stresscheck::store::validate_student_id;
use gaming_stresscheck::{
    logging, AnswerStore, Category, Choice, Config, Error, Evaluation, PlaysGames, Questionnaire,
    ResultStore, Submission, SubmissionResult,
};

#[derive(Parser)]
#[command(
    name = "gaming-stresscheck",
    version,
    about = "Gaming stress questionnaire"
)]
struct Cli {
    /// Config file (default: ./stresscheck.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in the questionnaire on the terminal and save the result
    Survey,
    /// Print the saved result of one respondent
    Show { student_id: String },
    /// Print every saved result, oldest first
    List,
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            2
        }
    };
    process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32, Error> {
    let config = Config::load(cli.config.as_deref())?;
    let mut store = config.store();

    match cli.command {
        Commands::Survey => {
            let questionnaire = config.questionnaire()?;
            let stdin = io::stdin();
            let stdout = io::stdout();
            let submission = run_survey(&mut stdin.lock(), &mut stdout.lock(), &questionnaire)?;
            let evaluation = submission.evaluate(Local::now().date_naive());
            store.save(&evaluation.result)?;
            print_evaluation(&evaluation);
            Ok(0)
        }
        Commands::Show { student_id } => match store.load(&student_id)? {
            Some(result) => {
                print_result(&result);
                Ok(0)
            }
            None => {
                eprintln!("no result for student id {student_id}");
                Ok(1)
            }
        },
        Commands::List => {
            for result in store.all()? {
                println!(
                    "{}\t{}\t{}",
                    result.student_id.as_deref().unwrap_or("-"),
                    result.name.as_deref().unwrap_or("-"),
                    result.overall
                );
            }
            Ok(0)
        }
    }
}

fn run_survey(
    input: &mut impl BufRead,
    out: &mut impl Write,
    questionnaire: &Questionnaire,
) -> Result<Submission, Error> {
    let name = ask(input, out, "Name: ")?;
    let student_id = loop {
        let answer = ask(input, out, "Student ID: ")?;
        match validate_student_id(Some(answer.as_str())) {
            Ok(_) => break answer,
            Err(err) => writeln!(out, "{err}")?,
        }
    };
    let birth_date = ask(input, out, "Birth date (DDMMYYYY): ")?;
    let plays_games = loop {
        let answer = ask(input, out, "Do you play video games? (yes/no): ")?;
        match PlaysGames::parse(&answer) {
            Some(plays_games) => break plays_games,
            None => writeln!(out, "Please answer yes or no.")?,
        }
    };

    let mut answers = AnswerStore::new(questionnaire);
    if plays_games == PlaysGames::Yes {
        for category in Category::ALL {
            writeln!(out, "\n[{category}]")?;
            for (index, question) in questionnaire.questions(category).iter().enumerate() {
                writeln!(out, "{}. {}", index + 1, question.text)?;
                for (position, choice) in Choice::ALL.into_iter().enumerate() {
                    write!(out, "  {} => {}", position + 1, choice)?;
                }
                writeln!(out)?;
                loop {
                    let answer = ask(input, out, "> ")?;
                    let stored = answer.parse::<Choice>().and_then(|choice| {
                        let weight = question
                            .weight(choice)
                            .ok_or_else(|| Error::IllegalAnswer(choice.to_string()))?;
                        answers.insert(category, index + 1, weight)
                    });
                    match stored {
                        Ok(()) => break,
                        Err(_) => writeln!(
                            out,
                            "Answer with 1-5 or Never/Rarely/Sometimes/Often/Always."
                        )?,
                    }
                }
            }
        }
    }

    Ok(Submission {
        name: Some(name).filter(|name| !name.is_empty()),
        student_id: Some(student_id),
        birth_date: Some(birth_date).filter(|birth_date| !birth_date.is_empty()),
        plays_games: Some(plays_games),
        answers,
    })
}

/// One trimmed line of input; end of input is an error so prompts cannot loop forever.
fn ask(input: &mut impl BufRead, out: &mut impl Write, prompt: &str) -> Result<String, Error> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut buffer = String::new();
    if input.read_line(&mut buffer)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input ended mid-survey").into());
    }
    Ok(buffer.trim().to_string())
}

fn print_evaluation(evaluation: &Evaluation) {
    println!();
    print_result(&evaluation.result);
    if let Some(scores) = evaluation.scores {
        println!(
            "Scores:        competitive {}, single-player {}, total {}",
            scores.competitive, scores.single_player, scores.total
        );
    }
}

fn print_result(result: &SubmissionResult) {
    println!("Name:          {}", result.name.as_deref().unwrap_or("-"));
    println!("Student ID:    {}", result.student_id.as_deref().unwrap_or("-"));
    println!("Birth date:    {}", result.birth_date.as_deref().unwrap_or("-"));
    match result.age {
        Some(age) => println!("Age:           {age}"),
        None => println!("Age:           -"),
    }
    println!("Overall:       {}", result.overall);
    println!("Competitive:   {}", result.competitive);
    println!("Single player: {}", result.single_player);
}
