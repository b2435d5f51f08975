//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations (child processes,
//! operator prompts, the wall clock), allowing commands and services to be
//! tested with scripted implementations.

use std::io::{self, BufRead, IsTerminal, Write};
use std::process::Output;

use chrono::Timelike;

/// External command runner abstraction.
pub trait CommandRunner: Send + Sync {
    /// Run a command with arguments.
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output>;
}

/// Operator prompts.
pub trait Prompter: Send + Sync {
    /// Whether a human can answer.
    fn is_interactive(&self) -> bool;

    /// Show `prompt` and read one line; an empty answer yields `default`.
    fn ask(&self, prompt: &str, default: Option<&str>) -> Option<String>;

    /// Yes/no question. Appends `[Y/n]` or `[y/N]` unless the prompt already
    /// carries one; only the first letter of the reply counts.
    fn confirm(&self, prompt: &str, default: bool) -> bool {
        let mut question = prompt.trim().trim_matches(':').trim().to_string();
        let lowered = question.to_lowercase();
        if !["[y/n]", "[n/y]"].iter().any(|hint| lowered.contains(hint)) {
            question.push_str(if default { " [Y/n]" } else { " [y/N]" });
        }
        question.push_str(": ");

        match self
            .ask(&question, None)
            .and_then(|reply| reply.trim().chars().next())
            .map(|c| c.to_ascii_lowercase())
        {
            Some('y') => true,
            Some('n') => false,
            _ => default,
        }
    }
}

/// Source of the current wall-clock hour.
pub trait Clock: Send + Sync {
    /// Hour of the day, 0-23, local time.
    fn hour(&self) -> u32;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real command runner using std::process.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        std::process::Command::new(cmd).args(args).output()
    }
}

/// Prompts on stderr, answers from stdin.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    /// True when stdin is attached to a terminal.
    pub fn stdin_is_terminal() -> bool {
        io::stdin().is_terminal()
    }
}

impl Prompter for TerminalPrompter {
    fn is_interactive(&self) -> bool {
        true
    }

    fn ask(&self, prompt: &str, default: Option<&str>) -> Option<String> {
        let mut stderr = io::stderr();
        let _ = write!(stderr, "{}", prompt);
        let _ = stderr.flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => {
                let answer = line.trim_end_matches(['\r', '\n']);
                if answer.is_empty() {
                    default.map(str::to_string)
                } else {
                    Some(answer.to_string())
                }
            }
            Err(_) => default.map(str::to_string),
        }
    }
}

/// Never asks; every prompt takes its default.
#[derive(Debug, Default)]
pub struct NonInteractivePrompter;

impl Prompter for NonInteractivePrompter {
    fn is_interactive(&self) -> bool {
        false
    }

    fn ask(&self, _prompt: &str, default: Option<&str>) -> Option<String> {
        default.map(str::to_string)
    }
}

/// Local wall clock.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn hour(&self) -> u32 {
        chrono::Local::now().hour()
    }
}
