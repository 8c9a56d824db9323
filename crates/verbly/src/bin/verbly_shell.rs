//! verbly shell: interactive lookups against a verbly database.
//!
//! Usage: verbly_shell [config.toml]

use rustyline::{Config as EditorConfig, Editor, error::ReadlineError, history::DefaultHistory};
use std::{path::Path, process::ExitCode};
use tracing_subscriber::{EnvFilter, fmt};
use verbly::{Config, Database, Error, VERSION, metrics_report, prelude::*};

const PROMPT: &str = "verbly> ";
const DEFAULT_CONFIG: &str = "verbly.toml";

///
/// Command
///

#[derive(Debug, Eq, PartialEq)]
enum Command<'a> {
    Synonyms(&'a str),
    Antonyms(&'a str),
    Hypernyms(&'a str),
    Rhymes(&'a str),
    Explain(Box<Command<'a>>),
    Metrics,
    Help,
    Quit,
    Empty,
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        let (head, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(head, rest)| (head, rest.trim()));

        match (head, rest) {
            ("", _) => Self::Empty,
            ("synonyms", word) if !word.is_empty() => Self::Synonyms(word),
            ("antonyms", word) if !word.is_empty() => Self::Antonyms(word),
            ("hypernyms", word) if !word.is_empty() => Self::Hypernyms(word),
            ("rhymes", word) if !word.is_empty() => Self::Rhymes(word),
            ("explain", inner) => match Self::parse(inner) {
                cmd @ (Self::Synonyms(_)
                | Self::Antonyms(_)
                | Self::Hypernyms(_)
                | Self::Rhymes(_)) => Self::Explain(Box::new(cmd)),
                _ => Self::Unknown(line),
            },
            ("metrics", "") => Self::Metrics,
            ("help" | "?", _) => Self::Help,
            ("quit" | "exit", _) => Self::Quit,
            _ => Self::Unknown(line),
        }
    }
}

///
/// Shell
///

struct Shell {
    db: Database,
    limit: Option<u32>,
}

impl Shell {
    /// Returns false once the shell should exit.
    fn run(&self, command: Command<'_>) -> Result<bool, Error> {
        match command {
            Command::Empty => {}
            Command::Quit => return Ok(false),
            Command::Help => print_help(),
            Command::Metrics => {
                let report = metrics_report();
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{json}"),
                    Err(err) => eprintln!("cannot render metrics: {err}"),
                }
            }
            Command::Unknown(line) => eprintln!("unknown command: {line} (try `help`)"),
            Command::Explain(inner) => {
                let Some((kind, filter)) = self.filter_for(&inner)? else {
                    println!("  (nothing to look up)");
                    return Ok(true);
                };
                let explain = match kind {
                    ObjectKind::Form => self
                        .db
                        .query::<Form>(&filter, Order::Random, self.limit)?
                        .explain(),
                    _ => self
                        .db
                        .query::<Word>(&filter, Order::Random, self.limit)?
                        .explain(),
                };
                match serde_json::to_string_pretty(&explain) {
                    Ok(json) => println!("{json}"),
                    Err(err) => eprintln!("cannot render statement: {err}"),
                }
            }
            Command::Rhymes(_) => {
                let Some((_, filter)) = self.filter_for(&command)? else {
                    print_texts(std::iter::empty());
                    return Ok(true);
                };
                let mut query = self.db.query::<Form>(&filter, Order::Random, self.limit)?;
                print_texts(query.all()?.iter().map(Form::text));
            }
            Command::Synonyms(_) | Command::Antonyms(_) | Command::Hypernyms(_) => {
                let Some((_, filter)) = self.filter_for(&command)? else {
                    return Ok(true);
                };
                let mut query = self.db.query::<Word>(&filter, Order::Random, self.limit)?;
                let words = query.all()?;

                let mut texts = Vec::with_capacity(words.len());
                for word in &words {
                    texts.push(word.base_form()?.text().to_string());
                }
                print_texts(texts.iter().map(String::as_str));
            }
        }

        Ok(true)
    }

    /// Kind queried by `command` and the filter selecting its answers;
    /// `None` when no answer can exist.
    fn filter_for(&self, command: &Command<'_>) -> Result<Option<(ObjectKind, Filter)>, Error> {
        let filter = match *command {
            Command::Synonyms(text) => word::SYNONYMS.matches(form::TEXT.eq(text)?)?,
            Command::Antonyms(text) => word::ANTONYMS.matches(form::TEXT.eq(text)?)?,
            Command::Hypernyms(text) => {
                notion::HYPONYMS.matches(notion::WORDS.matches(form::TEXT.eq(text)?)?)?
            }
            Command::Rhymes(text) => {
                return Ok(self
                    .rhymes_filter(text)?
                    .map(|filter| (ObjectKind::Form, filter)));
            }
            _ => return Ok(None),
        };

        Ok(Some((ObjectKind::Word, filter)))
    }

    fn rhymes_filter(&self, text: &str) -> Result<Option<Filter>, Error> {
        let spelled = form::TEXT.eq(text)?;
        let mut query =
            self.db
                .query::<Pronunciation>(&spelled, Order::ascending(pronunciation::ID), None)?;

        let mut alternatives = Vec::new();
        for pronunciation in &query.all()? {
            if let Some(rhymes) = pronunciation.rhymes_filter()? {
                alternatives.push(rhymes);
            }
        }

        Ok((!alternatives.is_empty()).then(|| Filter::or(alternatives)))
    }
}

fn print_texts<'a>(texts: impl Iterator<Item = &'a str>) {
    let mut any = false;
    for text in texts {
        println!("  {text}");
        any = true;
    }
    if !any {
        println!("  (no results)");
    }
}

fn print_help() {
    println!("Commands:");
    println!("  synonyms WORD          words listed as synonyms of WORD");
    println!("  antonyms WORD          words listed as antonyms of WORD");
    println!("  hypernyms WORD         words for the direct hypernyms of WORD");
    println!("  rhymes WORD            forms rhyming with WORD");
    println!("  explain <command>      show the compiled SQL instead of running it");
    println!("  metrics                print query metrics as JSON");
    println!("  help                   show this help");
    println!("  quit                   exit");
}

fn load_config(arg: Option<String>) -> Result<Config, Error> {
    match arg {
        Some(path) => Ok(Config::load(path)?),
        None if Path::new(DEFAULT_CONFIG).exists() => Ok(Config::load(DEFAULT_CONFIG)?),
        None => Ok(Config::default()),
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = match load_config(std::env::args().nth(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err.display_with_class());
            return ExitCode::FAILURE;
        }
    };

    let db = match config.open_database() {
        Ok(db) => db,
        Err(err) => {
            eprintln!("{}", err.display_with_class());
            return ExitCode::FAILURE;
        }
    };

    println!("verbly v{VERSION} - {}", config.database.path.display());
    println!("Type `help` for help, `quit` to exit\n");

    let editor_config = EditorConfig::builder().auto_add_history(true).build();
    let mut rl: Editor<(), DefaultHistory> = match Editor::with_config(editor_config) {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("cannot start line editor: {err}");
            return ExitCode::FAILURE;
        }
    };

    let shell = Shell {
        db,
        limit: config.query.default_limit,
    };

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => match shell.run(Command::parse(&line)) {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => eprintln!("{}", err.display_with_class()),
            },
            Err(ReadlineError::Interrupted) => println!("Use `quit` or Ctrl-D to exit"),
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {err:?}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

///
/// TESTS
///
