//! Inspect and create configuration files.

use crate::application::{
    ApplicationError, ApplicationResult, Command, CommandResult, Context, Declare, Dispatch,
    IoResultExt, Subcommands,
};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{Declarations, OptionSpec};

#[derive(Debug, Default)]
pub struct ConfigCommand {
    subcommands: Subcommands<Self>,
}

impl Declare for ConfigCommand {
    fn declarations() -> Declarations {
        Declarations::new()
            .arguments(&["subcommand"])
            .description("Show, locate or create configuration")
            .options(vec![OptionSpec::flag("g", "Use the global config file")])
            .usage("%s [-g] show|path|init")
            .menu(true)
    }
}

impl ConfigCommand {
    fn show(&mut self, ctx: &mut Context) -> CommandResult {
        Ok(Some(ctx.services().settings.to_toml()?))
    }

    fn path(&mut self, ctx: &mut Context) -> CommandResult {
        let global = global_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(unavailable)".to_string());
        let local = local_config_path(&ctx.services().project_dir);
        Ok(Some(format!(
            "global: {}\nlocal:  {}",
            global,
            local.display()
        )))
    }

    fn init_file(&mut self, ctx: &mut Context) -> CommandResult {
        let path = if ctx.flag("g") {
            global_config_path()
                .ok_or_else(|| ApplicationError::configuration("no global config directory"))?
        } else {
            local_config_path(&ctx.services().project_dir)
        };

        if path.exists() {
            let question = format!("Overwrite {}?", path.display());
            if !ctx.services().prompter.confirm(&question, false) {
                return Err(ApplicationError::Config {
                    message: format!("{} already exists", path.display()),
                });
            }
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_path_context("create directory", parent)?;
        }
        std::fs::write(&path, Settings::template()).with_path_context("write config", &path)?;
        Ok(Some(format!("Created {}", path.display())))
    }
}

impl Dispatch for ConfigCommand {
    fn subcommands(&mut self) -> &mut Subcommands<Self> {
        &mut self.subcommands
    }
}

impl Command for ConfigCommand {
    fn init(&mut self, _ctx: &mut Context) -> ApplicationResult<()> {
        self.subcommands.method("show", Self::show)?;
        self.subcommands.method("path", Self::path)?;
        self.subcommands.method("init", Self::init_file)?;
        Ok(())
    }

    fn run(&mut self, ctx: &mut Context) -> CommandResult {
        let verb = ctx.text("subcommand").unwrap_or_else(|| "show".to_string());
        self.dispatch(ctx, &verb)
    }
}
