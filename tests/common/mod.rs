//! Test doubles for the I/O boundary traits.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Output};
use std::sync::{Arc, Mutex};

use worklog::config::Settings;
use worklog::infrastructure::di::ServiceContainer;
use worklog::infrastructure::traits::{Clock, CommandRunner, Prompter};

/// Records every invocation and answers from a script keyed by argument prefix.
#[derive(Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<Vec<String>>>,
    script: Mutex<Vec<(Vec<String>, i32, String)>>,
}

impl RecordingRunner {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Answer calls whose arguments start with `prefix`.
    pub fn respond(&self, prefix: &[&str], code: i32, stdout: &str) {
        self.script.lock().unwrap().push((
            prefix.iter().map(|s| s.to_string()).collect(),
            code,
            stdout.to_string(),
        ));
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls with a leading `-C <dir>` removed.
    pub fn git_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|args| {
                let args = if args.first().map(String::as_str) == Some("-C") {
                    args[2..].to_vec()
                } else {
                    args
                };
                args.join(" ")
            })
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, _cmd: &str, args: &[&str]) -> io::Result<Output> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        self.calls.lock().unwrap().push(args.clone());

        let effective = if args.first().map(String::as_str) == Some("-C") {
            &args[2..]
        } else {
            &args[..]
        };
        let script = self.script.lock().unwrap();
        let (code, stdout) = script
            .iter()
            .find(|(prefix, _, _)| effective.starts_with(prefix))
            .map(|(_, code, stdout)| (*code, stdout.clone()))
            .unwrap_or((0, String::new()));

        Ok(Output {
            status: ExitStatus::from_raw(code << 8),
            stdout: stdout.into_bytes(),
            stderr: if code == 0 { Vec::new() } else { b"scripted failure".to_vec() },
        })
    }
}

/// Answers prompts from a queue and records the questions.
pub struct ScriptedPrompter {
    interactive: bool,
    replies: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn interactive(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            interactive: true,
            replies: Mutex::new(replies.iter().map(|s| s.to_string()).collect()),
            asked: Mutex::new(Vec::new()),
        })
    }

    pub fn silent() -> Arc<Self> {
        Arc::new(Self {
            interactive: false,
            replies: Mutex::new(VecDeque::new()),
            asked: Mutex::new(Vec::new()),
        })
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn ask(&self, prompt: &str, default: Option<&str>) -> Option<String> {
        self.asked.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .or_else(|| default.map(str::to_string))
    }
}

pub struct FixedClock(pub u32);

impl Clock for FixedClock {
    fn hour(&self) -> u32 {
        self.0
    }
}

/// Container with a silent prompter, a 9 o'clock clock and a recording runner.
pub fn services() -> Arc<ServiceContainer> {
    services_with(Settings::default(), RecordingRunner::new(), ScriptedPrompter::silent(), 9)
}

pub fn services_with(
    settings: Settings,
    runner: Arc<RecordingRunner>,
    prompter: Arc<ScriptedPrompter>,
    hour: u32,
) -> Arc<ServiceContainer> {
    Arc::new(ServiceContainer::with_deps(
        settings,
        runner,
        prompter,
        Arc::new(FixedClock(hour)),
    ))
}

pub fn tokens(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
