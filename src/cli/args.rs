//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

/// Personal work log: time entries, reports and version management
#[derive(Parser, Debug)]
#[command(name = "wlog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Debug level: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Project directory holding .worklog.toml (default: cwd)
    #[arg(short = 'C', long, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Never prompt; ambiguous times take the computed default
    #[arg(long)]
    pub non_interactive: bool,

    /// Print shell completions and exit
    #[arg(long = "generate", value_enum)]
    pub generator: Option<clap_complete::Shell>,

    /// Command, options and arguments, e.g. `parse time 3pm`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub tokens: Vec<String>,
}
