//! Token sequence → canonical command name → built command instance.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::command::{CommandInstance, Context};
use crate::application::registry::{self, BuildParams, Registry};
use crate::application::{ApplicationError, ApplicationResult};
use crate::infrastructure::di::ServiceContainer;

/// Resolves tokens against a registry and builds command instances.
pub struct Resolver {
    registry: Option<Arc<Registry>>,
    services: Arc<ServiceContainer>,
    default_command: String,
}

impl Resolver {
    /// Resolver over an explicit registry; `None` means no registry is set.
    pub fn new(registry: Option<Arc<Registry>>, services: Arc<ServiceContainer>) -> Self {
        let default_command = services.settings.default_command.clone();
        Self {
            registry,
            services,
            default_command,
        }
    }

    /// Resolver over the process-wide registry.
    pub fn installed(services: Arc<ServiceContainer>) -> Self {
        Self::new(registry::installed(), services)
    }

    pub fn registry(&self) -> Option<&Arc<Registry>> {
        self.registry.as_ref()
    }

    pub fn default_command(&self) -> &str {
        &self.default_command
    }

    /// Find the command token in `tokens`.
    ///
    /// Exact canonical keys win over aliases regardless of position. The
    /// matched token is replaced by its canonical name in place.
    #[instrument(level = "debug", skip(self))]
    pub fn infer(&self, tokens: &mut [String]) -> ApplicationResult<String> {
        let registry = match &self.registry {
            Some(registry) if !tokens.is_empty() => registry,
            _ => {
                debug!("infer: falling back to {}", self.default_command);
                return Ok(self.default_command.clone());
            }
        };

        let exact = tokens.iter().position(|t| registry.is_canonical(t));
        let found = exact.or_else(|| tokens.iter().position(|t| registry.validate_command(t)));

        let Some(index) = found else {
            return Err(ApplicationError::invalid_command(&tokens[0]));
        };
        let canonical = registry
            .alias(&tokens[index])
            .map(str::to_string)
            .ok_or_else(|| ApplicationError::invalid_command(&tokens[index]))?;

        debug!(
            "infer: token {} ({}) -> {} via {}",
            index,
            tokens[index],
            canonical,
            if exact.is_some() { "key" } else { "alias" }
        );
        tokens[index] = canonical.clone();
        Ok(canonical)
    }

    /// Build the command bound to `name` (canonical or alias).
    #[instrument(level = "debug", skip(self))]
    pub fn instance(&self, name: &str) -> ApplicationResult<CommandInstance> {
        if name.is_empty() {
            return Err(ApplicationError::invalid_input("No command specified"));
        }
        let registry = self
            .registry
            .as_ref()
            .ok_or_else(|| ApplicationError::invalid_command(name))?;
        let entry = registry
            .alias(name)
            .and_then(|canonical| registry.get(canonical))
            .ok_or_else(|| ApplicationError::invalid_command(name))?;

        let canonical = entry.descriptor.name.as_str();
        let command = entry.binding.build(&BuildParams::named(canonical));
        let context = Context::new(
            entry.descriptor.clone(),
            Some(Arc::clone(registry)),
            Arc::clone(&self.services),
        );
        debug!("instance: built {}", canonical);
        Ok(CommandInstance::new(command, context))
    }

    /// Infer, build, seed static defaults, scan options and map arguments.
    pub fn resolve(&self, tokens: &[String]) -> ApplicationResult<CommandInstance> {
        let mut tokens = tokens.to_vec();
        let name = self.infer(&mut tokens)?;
        let mut instance = self.instance(&name)?;

        if let Some(index) = tokens.iter().position(|t| *t == name) {
            tokens.remove(index);
        }

        let ctx = instance.context_mut();
        ctx.seed_static_data();
        ctx.options_mut().scan(&tokens)?;
        ctx.map_arguments();
        Ok(instance)
    }
}
