//! Normalize a time or date the way time entries are normalized.

use crate::application::{
    ApplicationResult, Command, CommandResult, Context, Declare, Dispatch, Subcommands,
};
use crate::domain::{to_twelve_hour, Declarations, OptionSpec};

#[derive(Debug, Default)]
pub struct ParseCommand {
    subcommands: Subcommands<Self>,
}

impl Declare for ParseCommand {
    fn declarations() -> Declarations {
        Declarations::new()
            .arguments(&["subcommand", "input"])
            .description("Normalize a time of day or a date")
            .options(vec![OptionSpec::flag("t", "Print times in twelve-hour form")])
            .usage("%s [-t] time|date <input>")
            .menu(true)
    }
}

impl ParseCommand {
    fn time(&mut self, ctx: &mut Context) -> CommandResult {
        let input = Self::input(ctx)?;
        let normalized = ctx.parse_time(&input)?;
        if ctx.flag("t") {
            return Ok(Some(to_twelve_hour(&normalized)?));
        }
        Ok(Some(normalized))
    }

    fn date(&mut self, ctx: &mut Context) -> CommandResult {
        let input = Self::input(ctx)?;
        Ok(Some(ctx.parse_date(&input)?))
    }

    /// Everything after the verb, re-joined so `3 pm` works unquoted.
    fn input(ctx: &mut Context) -> ApplicationResult<String> {
        ctx.data_mut().expect_all(&["input"])?;
        let value = ctx.data().expect("input")?;
        Ok(value.to_strings().join(" "))
    }
}

impl Dispatch for ParseCommand {
    fn subcommands(&mut self) -> &mut Subcommands<Self> {
        &mut self.subcommands
    }
}

impl Command for ParseCommand {
    fn init(&mut self, _ctx: &mut Context) -> ApplicationResult<()> {
        self.subcommands.method("time", Self::time)?;
        self.subcommands.method("date", Self::date)?;
        Ok(())
    }

    fn run(&mut self, ctx: &mut Context) -> CommandResult {
        let verb = ctx.text("subcommand").unwrap_or_else(|| "time".to_string());
        self.dispatch(ctx, &verb)
    }
}
