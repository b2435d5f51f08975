//! Report, check and switch the installed release (git tags).

use std::cmp::Ordering;

use tracing::{debug, info};

use crate::application::{
    ApplicationError, ApplicationResult, Command, CommandResult, Context, Declare, Dispatch,
    Subcommands,
};
use crate::domain::version::{compare_versions, latest};
use crate::domain::Declarations;

const DETACHED_HEAD: &str = "Your local repository is not synced with a particular version";
const INVALID_TAG: &str = "The supplied version does not exist";
const UP_TO_DATE: &str = "You have the most up to date version";

#[derive(Debug, Default)]
pub struct VersionCommand {
    subcommands: Subcommands<Self>,
}

impl Declare for VersionCommand {
    fn declarations() -> Declarations {
        Declarations::new()
            .arguments(&["subcommand", "version"])
            .description("Display application version")
            .usage("%s [check|switch] [version]")
            .menu(true)
    }
}

impl VersionCommand {
    fn check(&mut self, ctx: &mut Context) -> CommandResult {
        let service = ctx.services().version_service();
        let tags = service.tags()?;
        let current = match ctx.text("version") {
            Some(tag) => Self::known(&tags, tag)?,
            None => Self::head_tag(ctx)?,
        };

        let newest = latest(tags.iter().map(String::as_str));
        debug!("check: current={} newest={:?}", current, newest);
        match newest {
            Some(newest) if compare_versions(newest, &current) == Ordering::Greater => {
                Ok(Some(format!("Later version {} available", newest)))
            }
            _ => Ok(Some(UP_TO_DATE.to_string())),
        }
    }

    fn switch(&mut self, ctx: &mut Context) -> CommandResult {
        let service = ctx.services().version_service();
        let tags = service.tags()?;
        let target = match ctx.text("version") {
            Some(tag) => Self::known(&tags, tag)?,
            None => match latest(tags.iter().map(String::as_str)) {
                Some(newest) => newest.to_string(),
                None => return Ok(Some(UP_TO_DATE.to_string())),
            },
        };

        if service.tag_for("HEAD")?.as_deref() == Some(target.as_str()) {
            return Ok(Some(UP_TO_DATE.to_string()));
        }

        let hash = service.hash_for_tag(&target)?;
        service.checkout(&hash)?;
        info!("switch: checked out {} ({})", target, hash);
        Ok(Some(format!("Switched to version {}", target)))
    }

    fn known(tags: &[String], tag: String) -> ApplicationResult<String> {
        if tags.contains(&tag) {
            Ok(tag)
        } else {
            Err(ApplicationError::invalid_input(INVALID_TAG))
        }
    }

    fn head_tag(ctx: &Context) -> ApplicationResult<String> {
        ctx.services()
            .version_service()
            .tag_for("HEAD")?
            .ok_or_else(|| ApplicationError::Repository {
                message: DETACHED_HEAD.to_string(),
            })
    }
}

impl Dispatch for VersionCommand {
    fn subcommands(&mut self) -> &mut Subcommands<Self> {
        &mut self.subcommands
    }
}

impl Command for VersionCommand {
    fn init(&mut self, _ctx: &mut Context) -> ApplicationResult<()> {
        self.subcommands.method("check", Self::check)?;
        self.subcommands.method("switch", Self::switch)?;
        Ok(())
    }

    fn run(&mut self, ctx: &mut Context) -> CommandResult {
        match ctx.text("subcommand") {
            Some(verb) => self.dispatch(ctx, &verb),
            None => Ok(Some(Self::head_tag(ctx)?)),
        }
    }
}
