//! Command registry and alias table.
//!
//! The registry maps canonical command names to their descriptor and
//! implementation binding; the alias table maps alternate names onto
//! canonical ones. Both are filled once at startup through [`Registry::bind`]
//! and are read-only afterwards. A process-wide copy can be installed with
//! [`install`] and dropped again with [`reset`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::application::command::{Command, Declare};
use crate::application::options::validate_specs;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{CommandDescriptor, DataValue, Declarations};

/// Fixed parameter set handed to every constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildParams {
    pub name: String,
    pub args: Vec<String>,
}

impl BuildParams {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            args: Vec::new(),
        }
    }
}

/// How to build a `T`.
///
/// Generic so the same builder serves commands and any helper object.
pub enum Constructor<T: ?Sized> {
    /// Type without constructor parameters
    Nullary(fn() -> Box<T>),
    /// Constructor taking the parameter set
    Params(fn(&BuildParams) -> Box<T>),
    /// First-class constructor value, invoked directly
    Closure(Arc<dyn Fn(&BuildParams) -> Box<T> + Send + Sync>),
}

impl<T: ?Sized> Constructor<T> {
    pub fn build(&self, params: &BuildParams) -> Box<T> {
        match self {
            Constructor::Nullary(f) => f(),
            Constructor::Params(f) => f(params),
            Constructor::Closure(f) => f(params),
        }
    }
}

impl<T: ?Sized> Clone for Constructor<T> {
    fn clone(&self) -> Self {
        match self {
            Constructor::Nullary(f) => Constructor::Nullary(*f),
            Constructor::Params(f) => Constructor::Params(*f),
            Constructor::Closure(f) => Constructor::Closure(Arc::clone(f)),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Constructor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = match self {
            Constructor::Nullary(_) => "Nullary",
            Constructor::Params(_) => "Params",
            Constructor::Closure(_) => "Closure",
        };
        write!(f, "Constructor::{}", variant)
    }
}

fn boxed_default<T: Command + Default + 'static>() -> Box<dyn Command> {
    Box::new(T::default())
}

/// A command implementation plus the metadata it declares about itself.
#[derive(Debug, Clone)]
pub struct Binding {
    constructor: Constructor<dyn Command>,
    declared: Declarations,
}

impl Binding {
    /// Bind a `Default`-constructible command type.
    pub fn of<T: Command + Declare + Default + 'static>() -> Self {
        Self {
            constructor: Constructor::Nullary(boxed_default::<T>),
            declared: T::declarations(),
        }
    }

    /// Bind a command type built from the parameter set.
    pub fn with_params<T: Command + Declare>(build: fn(&BuildParams) -> Box<dyn Command>) -> Self {
        Self {
            constructor: Constructor::Params(build),
            declared: T::declarations(),
        }
    }

    /// Bind a closure; it declares nothing.
    pub fn closure<F>(build: F) -> Self
    where
        F: Fn(&BuildParams) -> Box<dyn Command> + Send + Sync + 'static,
    {
        Self {
            constructor: Constructor::Closure(Arc::new(build)),
            declared: Declarations::default(),
        }
    }

    pub fn constructor(&self) -> &Constructor<dyn Command> {
        &self.constructor
    }

    pub fn declarations(&self) -> &Declarations {
        &self.declared
    }

    pub fn build(&self, params: &BuildParams) -> Box<dyn Command> {
        self.constructor.build(params)
    }
}

/// Input to [`Registry::bind`]: descriptor fields plus the binding.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub binding: Option<Binding>,
    pub descriptor: CommandDescriptor,
}

impl Registration {
    pub fn new(binding: Binding) -> Self {
        Self {
            binding: Some(binding),
            descriptor: CommandDescriptor::default(),
        }
    }

    /// A registration without implementation; binding it is a setup error.
    pub fn unbound() -> Self {
        Self::default()
    }

    pub fn description(mut self, text: &str) -> Self {
        self.descriptor.description = text.to_string();
        self
    }

    pub fn menu(mut self, visible: bool) -> Self {
        self.descriptor.menu = visible;
        self
    }

    /// Static default copied into each instance's data.
    pub fn data(mut self, key: &str, value: impl Into<DataValue>) -> Self {
        self.descriptor.data.insert(key.to_string(), value.into());
        self
    }
}

/// A bound command: descriptor and implementation.
#[derive(Debug, Clone)]
pub struct Entry {
    pub descriptor: CommandDescriptor,
    pub binding: Binding,
}

/// Canonical command table plus alias table.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    commands: BTreeMap<String, Entry>,
    aliases: BTreeMap<String, String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under `names[0]`; the remaining names become aliases.
    ///
    /// Declarations made by the implementation override the registration's
    /// own descriptor fields. Re-binding a name or alias replaces the old
    /// entry.
    pub fn bind(&mut self, names: &[&str], registration: Registration) -> ApplicationResult<()> {
        let (canonical, aliases) = names
            .split_first()
            .ok_or_else(|| ApplicationError::configuration("bind requires at least one command name"))?;
        let binding = registration.binding.ok_or_else(|| {
            ApplicationError::configuration(format!(
                "command configuration for \"{}\" requires an implementation binding",
                canonical
            ))
        })?;

        let mut descriptor = registration.descriptor;
        descriptor.name = canonical.to_string();
        descriptor.apply(binding.declarations());
        validate_specs(canonical, &descriptor.options)?;

        if self.commands.contains_key(*canonical) {
            warn!("bind: command {} already registered, replacing", canonical);
        }
        debug!("bind: {} ({:?})", canonical, binding.constructor());
        self.commands
            .insert(canonical.to_string(), Entry { descriptor, binding });

        for alias in aliases {
            self.register_alias(canonical, alias);
        }
        Ok(())
    }

    /// Map `alias` onto `command`. Last write wins.
    pub fn register_alias(&mut self, command: &str, alias: &str) {
        if let Some(previous) = self.aliases.insert(alias.to_string(), command.to_string()) {
            if previous != command {
                warn!("register_alias: {} moved from {} to {}", alias, previous, command);
            }
        }
        debug!("register_alias: {} -> {}", alias, command);
    }

    /// Canonical name for `name`: itself when canonical, the target when an alias.
    pub fn alias(&self, name: &str) -> Option<&str> {
        if let Some((key, _)) = self.commands.get_key_value(name) {
            return Some(key.as_str());
        }
        self.aliases.get(name).map(String::as_str)
    }

    /// True when `name` is canonical or a known alias.
    pub fn validate_command(&self, name: &str) -> bool {
        self.alias(name).is_some()
    }

    pub fn is_canonical(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.commands.get(name)
    }

    pub fn descriptor(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(name).map(|e| &e.descriptor)
    }

    /// Canonical names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.values().map(|e| &e.descriptor)
    }

    /// Aliases pointing at `command`, sorted.
    pub fn aliases_for(&self, command: &str) -> Vec<&str> {
        self.aliases
            .iter()
            .filter(|(_, target)| target.as_str() == command)
            .map(|(alias, _)| alias.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

static INSTALLED: RwLock<Option<Arc<Registry>>> = RwLock::new(None);

/// Make `registry` the process-wide registry, replacing any previous one.
pub fn install(registry: Registry) -> Arc<Registry> {
    let registry = Arc::new(registry);
    *INSTALLED.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&registry));
    debug!("install: {} commands", registry.len());
    registry
}

/// The process-wide registry, if one was installed.
pub fn installed() -> Option<Arc<Registry>> {
    INSTALLED
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Forget the process-wide registry. Meant for test isolation.
pub fn reset() {
    *INSTALLED.write().unwrap_or_else(PoisonError::into_inner) = None;
}
