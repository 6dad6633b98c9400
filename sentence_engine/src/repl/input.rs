//! Terminal input handling for the REPL.
//!
//! Wraps rustyline configuration and completion tailored to the front end's
//! command set, with a plain stdin fallback for pipes and scripts.

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use log::{info, warn};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Helper};

use crate::command::MenuCommand;
use crate::config::SHORT_NAME;

/// Outcome of reading a line from the REPL input.
pub enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

lazy_static! {
    static ref COMMAND_TERMS: Vec<String> = build_command_terms();
}

const BASE_COMMANDS: &[&str] = &[
    "click", "hover", "tool", "hand", "combine", "use", "inventory", "tick", "draw", "close", "look", "help",
    "quit",
];

const DEV_COMMANDS: &[&str] = &[":state", ":scene", ":port"];

pub type ReplEditor = rustyline::Editor<SentenceHelper, DefaultHistory>;

#[derive(Default)]
pub struct SentenceHelper;

impl Helper for SentenceHelper {}

impl Completer for SentenceHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let (start, prefix) = current_prefix(line, pos);
        if prefix.is_empty() {
            return Ok((start, Vec::new()));
        }
        let lower = prefix.to_lowercase();
        let pairs = COMMAND_TERMS
            .iter()
            .filter(|term| term.starts_with(&lower))
            .map(|term| Pair {
                display: term.clone(),
                replacement: term.clone(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for SentenceHelper {
    type Hint = String;
}

impl Highlighter for SentenceHelper {}

impl Validator for SentenceHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        let _ = ctx;
        Ok(ValidationResult::Valid(None))
    }
}

fn current_prefix(line: &str, pos: usize) -> (usize, String) {
    let slice = &line[..pos];
    let trimmed = slice.trim_start_matches(char::is_whitespace);
    let start = pos - trimmed.len();
    (start, trimmed.to_string())
}

fn build_command_terms() -> Vec<String> {
    let mut terms: Vec<String> = BASE_COMMANDS.iter().map(ToString::to_string).collect();
    terms.extend(MenuCommand::TABLE.iter().map(|(label, _)| format!("menu {label}")));
    terms.extend(DEV_COMMANDS.iter().map(ToString::to_string));
    terms.sort_unstable();
    terms.dedup();
    terms
}

/// Where the REPL's commands come from.
///
/// A terminal gets a rustyline editor with completion and a history file that
/// survives between sessions. Piped or scripted input is read line by line.
pub enum InputManager {
    Editor {
        editor: Box<ReplEditor>,
        history: Option<PathBuf>,
    },
    Piped,
}

impl InputManager {
    pub fn new() -> Self {
        if !io::stdin().is_terminal() {
            info!("stdin is not a terminal; reading commands line by line");
            return Self::Piped;
        }
        let mut editor = match ReplEditor::new() {
            Ok(editor) => editor,
            Err(err) => {
                warn!("line editor unavailable ({err}); reading commands line by line");
                return Self::Piped;
            },
        };
        editor.set_helper(Some(SentenceHelper));
        let history = dirs::data_dir().or_else(dirs::data_local_dir).map(|base| history_path_in(&base));
        if let Some(path) = &history {
            load_history(&mut editor, path);
        }
        Self::Editor {
            editor: Box::new(editor),
            history,
        }
    }

    pub fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        match self {
            Self::Editor { editor, history } => match editor.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        remember(editor, history.as_deref(), &line);
                    }
                    Ok(InputEvent::Line(line))
                },
                Err(err) => readline_event(err),
            },
            Self::Piped => {
                print!("{prompt}");
                io::stdout().flush()?;
                let mut line = String::new();
                if io::stdin().read_line(&mut line)? == 0 {
                    return Ok(InputEvent::Eof);
                }
                Ok(InputEvent::Line(strip_line_end(&line).to_string()))
            },
        }
    }
}

fn load_history(editor: &mut ReplEditor, path: &Path) {
    if let Some(dir) = path.parent()
        && let Err(err) = fs::create_dir_all(dir)
    {
        warn!("can't create history directory {}: {err}", dir.display());
    }
    match editor.load_history(path) {
        Ok(()) => info!("command history loaded from {}", path.display()),
        Err(ReadlineError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {},
        Err(err) => warn!("can't load command history from {}: {err}", path.display()),
    }
}

fn remember(editor: &mut ReplEditor, history: Option<&Path>, line: &str) {
    if let Err(err) = editor.add_history_entry(line) {
        warn!("can't add '{line}' to command history: {err}");
    }
    if let Some(path) = history
        && let Err(err) = editor.save_history(path)
    {
        warn!("can't save command history to {}: {err}", path.display());
    }
}

/// Ctrl-C cancels the line, Ctrl-D leaves the game.
fn readline_event(err: ReadlineError) -> io::Result<InputEvent> {
    match err {
        ReadlineError::Interrupted => Ok(InputEvent::Interrupted),
        ReadlineError::Eof => Ok(InputEvent::Eof),
        ReadlineError::Io(err) => Err(err),
        other => Err(io::Error::other(other)),
    }
}

fn strip_line_end(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

fn history_path_in(base: &Path) -> PathBuf {
    base.join(SHORT_NAME).join("history.txt")
}
