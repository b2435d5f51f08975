//! Per-command verb table and dispatch.
//!
//! Handlers are typed values fixed at registration time: either a method of
//! the owning command or a closure over it. Nothing is looked up by name at
//! dispatch time.

use std::fmt;
use std::rc::Rc;

use itertools::Itertools;
use tracing::debug;

use crate::application::command::{CommandResult, Context};
use crate::application::{ApplicationError, ApplicationResult};

/// Method-style handler on the owning command.
pub type HandlerFn<C> = fn(&mut C, &mut Context) -> CommandResult;

/// What a verb runs.
pub enum Handler<C> {
    Method(HandlerFn<C>),
    Closure(Rc<dyn Fn(&mut C, &mut Context) -> CommandResult>),
}

impl<C> Handler<C> {
    pub fn invoke(&self, command: &mut C, ctx: &mut Context) -> CommandResult {
        match self {
            Handler::Method(f) => f(command, ctx),
            Handler::Closure(f) => f(command, ctx),
        }
    }
}

impl<C> Clone for Handler<C> {
    fn clone(&self) -> Self {
        match self {
            Handler::Method(f) => Handler::Method(*f),
            Handler::Closure(f) => Handler::Closure(Rc::clone(f)),
        }
    }
}

impl<C> fmt::Debug for Handler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Method(_) => write!(f, "Handler::Method"),
            Handler::Closure(_) => write!(f, "Handler::Closure"),
        }
    }
}

/// Verb table of one command instance plus the verb currently dispatched.
pub struct Subcommands<C> {
    handlers: Vec<(String, Handler<C>)>,
    current: Option<String>,
}

impl<C> Default for Subcommands<C> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
            current: None,
        }
    }
}

impl<C> fmt::Debug for Subcommands<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subcommands")
            .field("verbs", &self.verbs())
            .field("current", &self.current)
            .finish()
    }
}

impl<C> Subcommands<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `verb`. A verb can only be registered once per instance.
    pub fn register(&mut self, verb: &str, handler: Handler<C>) -> ApplicationResult<()> {
        if verb.is_empty() || verb.starts_with('_') {
            return Err(ApplicationError::configuration(format!(
                "{}: invalid sub-command, verbs may not be empty or start with '_'",
                verb
            )));
        }
        if self.is_registered(verb) {
            return Err(ApplicationError::DuplicateSubcommand {
                verb: verb.to_string(),
            });
        }
        debug!("register: {} -> {:?}", verb, handler);
        self.handlers.push((verb.to_string(), handler));
        Ok(())
    }

    /// Register a method of the owning command.
    pub fn method(&mut self, verb: &str, handler: HandlerFn<C>) -> ApplicationResult<()> {
        self.register(verb, Handler::Method(handler))
    }

    /// Register a closure.
    pub fn register_fn<F>(&mut self, verb: &str, handler: F) -> ApplicationResult<()>
    where
        F: Fn(&mut C, &mut Context) -> CommandResult + 'static,
    {
        self.register(verb, Handler::Closure(Rc::new(handler)))
    }

    /// Registered verbs in registration order.
    pub fn verbs(&self) -> Vec<&str> {
        self.handlers.iter().map(|(verb, _)| verb.as_str()).collect()
    }

    pub fn is_registered(&self, verb: &str) -> bool {
        self.handlers.iter().any(|(v, _)| v == verb)
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Mark `verb` current and hand back its handler.
    pub fn select(&mut self, verb: &str) -> ApplicationResult<Handler<C>> {
        let handler = self
            .handlers
            .iter()
            .find(|(v, _)| v == verb)
            .map(|(_, h)| h.clone())
            .ok_or_else(|| ApplicationError::InvalidSubcommand {
                verb: verb.to_string(),
                valid: self.handlers.iter().map(|(v, _)| v.clone()).collect(),
            })?;
        self.current = Some(verb.to_string());
        Ok(handler)
    }
}

/// Commands that route to verb handlers.
pub trait Dispatch: Sized {
    fn subcommands(&mut self) -> &mut Subcommands<Self>;

    /// Run the handler registered for `verb`.
    fn dispatch(&mut self, ctx: &mut Context, verb: &str) -> CommandResult {
        let handler = self.subcommands().select(verb)?;
        debug!(
            "dispatch: {} {} (valid: {})",
            ctx.name(),
            verb,
            self.subcommands().verbs().iter().join(", ")
        );
        handler.invoke(self, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ErrorKind;

    struct Probe;

    fn noop(_: &mut Probe, _: &mut Context) -> CommandResult {
        Ok(None)
    }

    #[test]
    fn given_verb_registered_twice_when_registering_then_configuration_error() {
        let mut table = Subcommands::<Probe>::new();
        table.method("show", noop).unwrap();

        let err = table.method("show", noop).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.to_string(), "Error: subcommand show is already registered");
    }

    #[test]
    fn given_reserved_verb_when_registering_then_rejected() {
        let mut table = Subcommands::<Probe>::new();
        let err = table.method("__internal", noop).unwrap_err();
        assert!(err.to_string().starts_with("__internal: invalid sub-command"));
        assert!(table.method("", noop).is_err());
    }

    #[test]
    fn given_unknown_verb_when_selected_then_lists_registered_verbs() {
        let mut table = Subcommands::<Probe>::new();
        table.method("show", noop).unwrap();
        table.register_fn("path", |_, _| Ok(None)).unwrap();

        let err = table.select("bogus").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            err.to_string(),
            "bogus: invalid sub-command, Valid subcommands: show, path"
        );
        assert_eq!(table.current(), None);
    }

    #[test]
    fn given_known_verb_when_selected_then_current() {
        let mut table = Subcommands::<Probe>::new();
        table.method("show", noop).unwrap();
        table.method("path", noop).unwrap();

        table.select("path").unwrap();
        assert_eq!(table.current(), Some("path"));
        table.select("show").unwrap();
        assert_eq!(table.current(), Some("show"));
    }
}
