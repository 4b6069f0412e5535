use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use dotenv::dotenv;
use study_agent::agent::{self, ChatClient};
use study_agent::pdf;
use study_agent::quiz::{self, Question, QuestionKind, QuizSession, ScoreReport, Verdict};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

struct Config {
    api_base: String,
    api_key: String,
    model: String,
    pdf_path: Option<PathBuf>,
}

fn parse_config(mut args: impl Iterator<Item = String>) -> anyhow::Result<Config> {
    let api_key = env::var("GEMINI_API_KEY")
        .context("GEMINI_API_KEY is not set, add it to your environment or .env file")?;
    let api_base = env::var("GEMINI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
    let model = env::var("STUDY_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

    Ok(Config {
        api_base,
        api_key,
        model,
        pdf_path: args.next().map(PathBuf::from),
    })
}

/// One processed document: extracted text plus whatever the summarizer made
/// of it. Replaced wholesale when a new file name comes in.
struct Document {
    file_name: String,
    full_text: String,
    summary: Option<String>,
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    pretty_env_logger::init();

    let config = parse_config(env::args().skip(1))?;
    let client = ChatClient::new(
        config.api_base.as_str(),
        config.api_key.as_str(),
        config.model.as_str(),
    );
    log::info!("using model {}", client.model());

    println!("{BOLD}PDF Study Agent{RESET}");
    println!("Load a PDF and the agent will summarize it and create a quiz for you.");

    let stdin = io::stdin();
    let mut document: Option<Document> = None;
    let mut session: Option<QuizSession> = None;

    if let Some(path) = &config.pdf_path {
        process_document(&client, path, &mut document, &mut session);
    }

    loop {
        if document.is_none() {
            let Some(line) = read_line(&stdin, "\nPath to a PDF file (x to quit): ")? else {
                break;
            };
            match line.as_str() {
                "" => {}
                "x" => break,
                path => process_document(&client, Path::new(path), &mut document, &mut session),
            }
            continue;
        }

        let Some(line) = read_line(
            &stdin,
            "\n[q] create quiz  [s] summary  [o] open another PDF  [x] quit > ",
        )?
        else {
            break;
        };

        match line.as_str() {
            "q" => {
                let created = document
                    .as_ref()
                    .map(|doc| create_quiz(&client, doc, &mut session))
                    .unwrap_or(false);
                if created {
                    if let Some(active) = session.as_mut() {
                        run_quiz(&stdin, active)?;
                    }
                }
            }
            "s" => {
                if let Some(doc) = document.as_mut() {
                    match &doc.summary {
                        Some(summary) => println!("\n{BOLD}Summary{RESET}\n{}", summary),
                        None => summarize_document(&client, doc),
                    }
                }
            }
            "o" => {
                let Some(path) = read_line(&stdin, "Path to a PDF file: ")? else {
                    break;
                };
                if !path.is_empty() {
                    process_document(&client, Path::new(&path), &mut document, &mut session);
                }
            }
            "x" => break,
            "" => {}
            _ => println!("Please choose one of the options."),
        }
    }

    Ok(())
}

/// Runs the extract → summarize stages for one file. A path whose file name
/// matches the loaded document is not reprocessed; a new name discards the
/// previous document, quiz and answers before extraction starts.
fn process_document(
    client: &ChatClient,
    path: &Path,
    document: &mut Option<Document>,
    session: &mut Option<QuizSession>,
) {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    if document.as_ref().is_some_and(|d| d.file_name == file_name) {
        println!("{} is already loaded.", file_name);
        return;
    }

    *document = None;
    *session = None;

    println!("Extracting text from {}...", file_name);
    let full_text = match pdf::extract_text(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{RED}Error extracting text from PDF: {e}{RESET}");
            return;
        }
    };
    println!("{GREEN}PDF processed successfully!{RESET}");

    let mut doc = Document {
        file_name,
        full_text,
        summary: None,
    };
    summarize_document(client, &mut doc);
    *document = Some(doc);
}

fn summarize_document(client: &ChatClient, document: &mut Document) {
    println!("Asking the summarizer agent for a summary...");
    match agent::summarize(client, &document.full_text) {
        Ok(summary) => {
            println!("\n{BOLD}Summary{RESET}\n{}", summary);
            document.summary = Some(summary);
        }
        // An existing summary stays in place for a failed re-run.
        Err(e) => eprintln!("{RED}The summarizer agent failed to generate a summary: {e}{RESET}"),
    }
}

/// Generation → parse → session install. Returns whether a fresh quiz is in
/// place; on any failure the previous quiz (if any) is left untouched.
fn create_quiz(
    client: &ChatClient,
    document: &Document,
    session: &mut Option<QuizSession>,
) -> bool {
    println!("Asking the quiz creator agent for a quiz...");
    let raw = match agent::generate_quiz(client, &document.full_text) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("{RED}The quiz creator agent failed to generate a quiz: {e}{RESET}");
            return false;
        }
    };

    let set = match quiz::parse(&raw) {
        Ok(set) => set,
        Err(e) => {
            eprintln!("{RED}Error parsing quiz data: {e}{RESET}");
            return false;
        }
    };

    if set.is_empty() {
        println!("The model produced no questions this time, try again.");
        return false;
    }

    match session {
        Some(existing) => existing.load_quiz(set),
        None => *session = Some(QuizSession::new(set)),
    }
    println!("{GREEN}Quiz created!{RESET}");
    true
}

fn run_quiz(stdin: &io::Stdin, session: &mut QuizSession) -> anyhow::Result<()> {
    println!("\n{BOLD}Quiz Time!{RESET}");
    println!("Test your knowledge based on the document. Press Enter to skip a question.\n");

    let questions: Vec<Question> = session.quiz().iter().cloned().collect();
    for (index, question) in questions.iter().enumerate() {
        println!("{BOLD}Question {}: {}{RESET}", index + 1, question.prompt);

        let submitted = match &question.kind {
            QuestionKind::MultipleChoice { options } => ask_multiple_choice(stdin, options)?,
            QuestionKind::TrueFalse => ask_true_false(stdin)?,
            QuestionKind::FillInBlank => ask_free_text(stdin)?,
        };

        if let Some(value) = submitted {
            session
                .record_answer(index, value)
                .context("failed to record answer")?;
        }
        println!();
    }

    let report = session.check();
    print_report(&report);
    Ok(())
}

fn ask_multiple_choice(stdin: &io::Stdin, options: &[String]) -> anyhow::Result<Option<String>> {
    for (i, option) in options.iter().enumerate() {
        println!("  {}. {}", i + 1, option);
    }

    loop {
        let Some(line) = read_line(stdin, "Your answer (number or text): ")? else {
            return Ok(None);
        };
        if line.is_empty() {
            return Ok(None);
        }
        if let Ok(n) = line.parse::<usize>() {
            if (1..=options.len()).contains(&n) {
                return Ok(Some(options[n - 1].clone()));
            }
            println!("Pick a number between 1 and {}.", options.len());
            continue;
        }
        return Ok(Some(line));
    }
}

fn ask_true_false(stdin: &io::Stdin) -> anyhow::Result<Option<String>> {
    loop {
        let Some(line) = read_line(stdin, "Your answer (true/false): ")? else {
            return Ok(None);
        };
        if line.is_empty() {
            return Ok(None);
        }
        match line.to_lowercase().as_str() {
            "t" | "true" => return Ok(Some("True".to_string())),
            "f" | "false" => return Ok(Some("False".to_string())),
            _ => println!("Answer true or false."),
        }
    }
}

fn ask_free_text(stdin: &io::Stdin) -> anyhow::Result<Option<String>> {
    let Some(line) = read_line(stdin, "Your answer: ")? else {
        return Ok(None);
    };
    Ok(if line.is_empty() { None } else { Some(line) })
}

fn print_report(report: &ScoreReport) {
    println!("{BOLD}Results{RESET}");
    for (index, verdict) in report.verdicts.iter().enumerate() {
        match verdict {
            Verdict::Correct => println!("{GREEN}Question {}: Correct!{RESET}", index + 1),
            Verdict::Incorrect { submitted, expected } => {
                println!("{RED}Question {}: Incorrect.{RESET}", index + 1);
                println!("  Your answer: {}", submitted);
                println!("  Correct answer: {}", expected);
            }
            Verdict::Indeterminate => println!(
                "{YELLOW}Question {}: Could not determine the result.{RESET}",
                index + 1
            ),
        }
    }
    println!(
        "\n{BOLD}Your final score: {}/{}{RESET}",
        report.score, report.total
    );
}

/// Reads one trimmed line, `None` on end of input.
fn read_line(stdin: &io::Stdin, label: &str) -> anyhow::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush().context("failed to flush stdout")?;

    let mut line = String::new();
    let read = stdin
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
