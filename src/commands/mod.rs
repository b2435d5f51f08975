//! Built-in commands and the registry that binds them.

mod config;
mod help;
mod parse;
mod version;

pub use config::ConfigCommand;
pub use help::HelpCommand;
pub use parse::ParseCommand;
pub use version::VersionCommand;

use crate::application::{ApplicationResult, Binding, Registration, Registry};

/// Registry with every built-in command and its aliases.
pub fn builtin_registry() -> ApplicationResult<Registry> {
    let mut registry = Registry::new();
    registry.bind(
        &["help", "usage", "h"],
        Registration::new(Binding::of::<HelpCommand>()),
    )?;
    registry.bind(
        &["version", "v"],
        Registration::new(Binding::of::<VersionCommand>()),
    )?;
    registry.bind(
        &["config", "conf"],
        Registration::new(Binding::of::<ConfigCommand>()),
    )?;
    registry.bind(
        &["parse", "p"],
        Registration::new(Binding::of::<ParseCommand>()),
    )?;
    Ok(registry)
}
