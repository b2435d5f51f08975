//! Parsed options and positional arguments of one command invocation.
//!
//! Tokenizing is delegated to clap: `scan` builds a `clap::Command` from the
//! descriptor's option table at run time.

use std::collections::{BTreeMap, HashSet};

use clap::{Arg, ArgAction};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DataValue, OptionSpec};

const POSITIONAL: &str = "__positional";

/// Option table, collected option values and positional arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    command: String,
    specs: Vec<OptionSpec>,
    values: BTreeMap<String, DataValue>,
    args: Vec<String>,
}

impl Options {
    pub fn new(command: &str, specs: Vec<OptionSpec>) -> Self {
        Self {
            command: command.to_string(),
            specs,
            values: BTreeMap::new(),
            args: Vec::new(),
        }
    }

    /// Declared option by name.
    pub fn spec(&self, name: &str) -> Option<&OptionSpec> {
        self.specs.iter().find(|s| s.flag == name)
    }

    /// True when the option was supplied.
    pub fn exist(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Supplied value of a value-taking option.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(DataValue::as_str)
    }

    /// Positional tokens in order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Every supplied option; flags map to `true`.
    pub fn all(&self) -> &BTreeMap<String, DataValue> {
        &self.values
    }

    pub fn get_argument(&self, offset: usize) -> Option<&str> {
        self.args.get(offset).map(String::as_str)
    }

    /// Replace the argument at `offset`, or append when `offset` is past the end.
    pub fn set_argument(&mut self, offset: usize, value: &str) {
        match self.args.get_mut(offset) {
            Some(slot) => *slot = value.to_string(),
            None => self.args.push(value.to_string()),
        }
    }

    pub fn unset_argument(&mut self, offset: usize) -> Option<String> {
        (offset < self.args.len()).then(|| self.args.remove(offset))
    }

    pub fn get_option(&self, name: &str) -> Option<&DataValue> {
        self.values.get(name)
    }

    pub fn set_option(&mut self, name: &str, value: impl Into<DataValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn unset_option(&mut self, name: &str) -> Option<DataValue> {
        self.values.remove(name)
    }

    /// Tokenize `tokens` (command name already removed) against the option table.
    pub fn scan(&mut self, tokens: &[String]) -> ApplicationResult<()> {
        validate_specs(&self.command, &self.specs)?;
        let parser = self.parser();
        let matches = parser
            .try_get_matches_from(tokens)
            .map_err(|e| ApplicationError::invalid_input(clap_message(&e)))?;

        self.values.clear();
        for spec in &self.specs {
            if spec.is_flag() {
                if matches.get_flag(&spec.flag) {
                    self.values.insert(spec.flag.clone(), DataValue::Bool(true));
                }
            } else if let Some(value) = matches.get_one::<String>(&spec.flag) {
                self.values
                    .insert(spec.flag.clone(), DataValue::Text(value.clone()));
            }
        }
        self.args = matches
            .get_many::<String>(POSITIONAL)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        debug!(
            "scan: {} options={:?} args={:?}",
            self.command, self.values, self.args
        );
        Ok(())
    }

    fn parser(&self) -> clap::Command {
        let mut parser = clap::Command::new(self.command.clone())
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true);

        for spec in &self.specs {
            let mut arg = Arg::new(spec.flag.clone()).help(spec.description.clone());
            arg = match spec.flag.chars().next() {
                Some(c) if spec.is_short() => arg.short(c),
                _ => arg.long(spec.flag.clone()),
            };
            arg = match spec.required {
                None => arg.action(ArgAction::SetTrue),
                Some(true) => arg.action(ArgAction::Set).num_args(1),
                Some(false) => arg
                    .action(ArgAction::Set)
                    .num_args(0..=1)
                    .default_missing_value(""),
            };
            parser = parser.arg(arg);
        }

        parser.arg(
            Arg::new(POSITIONAL)
                .action(ArgAction::Append)
                .num_args(1..)
                .allow_negative_numbers(true),
        )
    }
}

/// Reject option tables the tokenizer cannot be built from: empty names,
/// names starting with `-` or holding whitespace or `=`, the reserved
/// positional id, and duplicates.
pub fn validate_specs(command: &str, specs: &[OptionSpec]) -> ApplicationResult<()> {
    let mut seen = HashSet::new();
    for spec in specs {
        let flag = spec.flag.as_str();
        let malformed = flag.is_empty()
            || flag.starts_with('-')
            || flag.contains('=')
            || flag.chars().any(char::is_whitespace);
        if malformed || flag == POSITIONAL {
            return Err(ApplicationError::configuration(format!(
                "{}: invalid option name \"{}\"",
                command, flag
            )));
        }
        if !seen.insert(flag) {
            return Err(ApplicationError::configuration(format!(
                "{}: option \"{}\" declared twice",
                command, flag
            )));
        }
    }
    Ok(())
}

/// First line of a clap error without its `error: ` prefix.
fn clap_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.trim_start_matches("error: ").to_string()
}
