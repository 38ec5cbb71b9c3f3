// src/terminal.rs

//! Line-oriented front end: parses typed commands and prints view updates.

use std::io::Write;
use std::str::FromStr;

use crate::{
    models::{question::Prompt, session::QuizMode},
    state::Screen,
    utils::html::to_plain_text,
    view::{QuizView, ViewUpdate},
};

pub const HELP: &str = "\
Commands:
  login <name>      sign in
  register <name>   create an account and sign in
  definition        start a Guess the Definition quiz
  blank             start a Fill in the Blank quiz
  <number>          choose an option
  next              next question
  examples          example sentences for the current word
  stats             refresh the mastery dashboard
  new               back to the quiz menu
  logout            sign out
  quit              exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login(String),
    Register(String),
    Start(QuizMode),
    /// 1-based option number as typed.
    Choose(usize),
    Next,
    Examples,
    Stats,
    NewQuiz,
    Logout,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        if let Ok(number) = word.parse::<usize>() {
            return if number == 0 || !rest.is_empty() {
                Err(format!("invalid option `{}`", line))
            } else {
                Ok(Command::Choose(number))
            };
        }

        match word.to_ascii_lowercase().as_str() {
            "login" => Ok(Command::Login(rest.to_string())),
            "register" => Ok(Command::Register(rest.to_string())),
            "definition" | "guess" => Ok(Command::Start(QuizMode::GuessDefinition)),
            "blank" | "fill" => Ok(Command::Start(QuizMode::FillInBlank)),
            "next" => Ok(Command::Next),
            "examples" => Ok(Command::Examples),
            "stats" => Ok(Command::Stats),
            "new" => Ok(Command::NewQuiz),
            "logout" => Ok(Command::Logout),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command `{}` (type `help`)", other)),
        }
    }
}

/// Text lines printed for one update. Updates with nothing to say yield no lines.
pub fn format_update(update: &ViewUpdate) -> Vec<String> {
    match update {
        ViewUpdate::Screen(Screen::LoggedOut) => {
            vec!["Log in with `login <name>` or `register <name>`.".to_string()]
        }
        ViewUpdate::Screen(Screen::ModeSelect) => {
            vec!["Choose a quiz: `definition` or `blank`.".to_string()]
        }
        ViewUpdate::Screen(Screen::Summary) => vec!["Type `new` to play again.".to_string()],
        ViewUpdate::Screen(Screen::Failed) => {
            vec!["Type `new` to go back to the quiz menu.".to_string()]
        }
        ViewUpdate::Screen(_) => Vec::new(),
        ViewUpdate::LoginMessage(msg) if msg.is_empty() => Vec::new(),
        ViewUpdate::LoginMessage(msg) | ViewUpdate::Welcome(msg) => vec![msg.clone()],
        ViewUpdate::Loading { number, total } => {
            vec![format!("Loading question {} of {}...", number, total)]
        }
        ViewUpdate::Question(question) => {
            let mut lines = match &question.prompt {
                Prompt::Word(word) => vec![String::new(), format!("  {}", word)],
                Prompt::Sentence(sentence) => {
                    vec![String::new(), format!("  {}", to_plain_text(sentence))]
                }
            };
            if let Some(reason) = &question.reason {
                lines.push(format!("  ({})", reason));
            }
            lines.extend(
                question
                    .options
                    .iter()
                    .enumerate()
                    .map(|(i, option)| format!("  {}. {}", i + 1, option)),
            );
            lines
        }
        ViewUpdate::QuestionError(msg) => vec!["Error".to_string(), msg.clone()],
        ViewUpdate::Feedback(feedback) => vec![feedback.to_string()],
        ViewUpdate::NextAvailable(true) => vec!["Type `next` for the next question.".to_string()],
        ViewUpdate::Stats(rows) if rows.is_empty() => vec!["Stats: nothing yet".to_string()],
        ViewUpdate::Stats(rows) => {
            let cells: Vec<String> = rows
                .iter()
                .map(|row| format!("{}: {}", row.label, row.count))
                .collect();
            vec![format!("Stats: {}", cells.join(" | "))]
        }
        ViewUpdate::StatsUnavailable => vec!["Could not load stats.".to_string()],
        ViewUpdate::Summary { score, total } => {
            vec![format!("Your Score: {} out of {}", score, total)]
        }
        ViewUpdate::ExamplesMessage(msg) | ViewUpdate::ExamplesError(msg) => vec![msg.clone()],
        ViewUpdate::Examples(sentences) => sentences
            .iter()
            .map(|s| format!("  - {}", to_plain_text(s)))
            .collect(),
        ViewUpdate::OptionsEnabled(_)
        | ViewUpdate::NextAvailable(false)
        | ViewUpdate::StatsLoading
        | ViewUpdate::ExamplesCleared
        | ViewUpdate::ExamplesEnabled(_) => Vec::new(),
    }
}

/// Prints updates to stdout.
#[derive(Debug, Default)]
pub struct TerminalView;

impl QuizView for TerminalView {
    fn render(&self, update: ViewUpdate) {
        let lines = format_update(&update);
        if lines.is_empty() {
            return;
        }
        let mut out = std::io::stdout().lock();
        for line in lines {
            if writeln!(out, "{}", line).is_err() {
                return;
            }
        }
        let _ = out.flush();
    }
}
