use itertools::Itertools;

use crate::application::usage::usage_lines;
use crate::application::{ApplicationError, Command, CommandResult, Context, Declare};
use crate::domain::Declarations;

/// Menu of every command, or the long usage of one.
#[derive(Debug, Default)]
pub struct HelpCommand;

impl Declare for HelpCommand {
    fn declarations() -> Declarations {
        Declarations::new()
            .arguments(&["command"])
            .description("Show available commands, or usage for one command")
            .usage("%s [command]")
            .menu(true)
    }
}

impl Command for HelpCommand {
    fn run(&mut self, ctx: &mut Context) -> CommandResult {
        let registry = ctx
            .registry()
            .cloned()
            .ok_or_else(|| ApplicationError::configuration("no command registry installed"))?;
        let script = ctx.services().settings.script_name.clone();

        if let Some(name) = ctx.text("command") {
            let descriptor = registry
                .alias(&name)
                .and_then(|canonical| registry.descriptor(canonical))
                .ok_or_else(|| ApplicationError::invalid_command(&name))?;

            let mut lines = usage_lines(descriptor, &script, true, false);
            let aliases = registry.aliases_for(&descriptor.name);
            if !aliases.is_empty() {
                lines.push(format!("Aliases: {}", aliases.iter().join(", ")));
            }
            return Ok(Some(lines.join("\n")));
        }

        let mut lines = vec![format!("Usage: {} <command> [options] [arguments]", script), String::new()];
        lines.extend(
            registry
                .descriptors()
                .filter(|d| d.menu)
                .flat_map(|d| usage_lines(d, &script, false, false)),
        );
        Ok(Some(lines.join("\n")))
    }
}
