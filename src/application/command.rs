//! Command trait, per-invocation context and the built instance.

use std::any::Any;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::data::DataStore;
use crate::application::options::Options;
use crate::application::registry::Registry;
use crate::application::usage::usage_lines;
use crate::application::ApplicationResult;
use crate::domain::{self, CommandDescriptor, DataValue, Declarations, Disambiguate, TimeNormalizer};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::Prompter;

/// What a command run produces for the driver to print.
pub type CommandResult = ApplicationResult<Option<String>>;

/// Lets a `&dyn Command` be downcast to its concrete type.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Static metadata a command type declares (arguments, options, usage...).
pub trait Declare {
    fn declarations() -> Declarations {
        Declarations::default()
    }
}

/// A runnable command implementation.
pub trait Command: AsAny {
    /// One-time setup before the first run; register subcommands here.
    fn init(&mut self, _ctx: &mut Context) -> ApplicationResult<()> {
        Ok(())
    }

    fn run(&mut self, ctx: &mut Context) -> CommandResult;
}

/// Everything a command can reach during one invocation.
pub struct Context {
    name: String,
    descriptor: CommandDescriptor,
    data: DataStore,
    options: Options,
    registry: Option<Arc<Registry>>,
    services: Arc<ServiceContainer>,
}

impl Context {
    pub fn new(
        descriptor: CommandDescriptor,
        registry: Option<Arc<Registry>>,
        services: Arc<ServiceContainer>,
    ) -> Self {
        let options = Options::new(&descriptor.name, descriptor.options.clone());
        Self {
            name: descriptor.name.clone(),
            descriptor,
            data: DataStore::new(),
            options,
            registry,
            services,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    pub fn data(&self) -> &DataStore {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut DataStore {
        &mut self.data
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    pub fn registry(&self) -> Option<&Arc<Registry>> {
        self.registry.as_ref()
    }

    pub fn services(&self) -> &Arc<ServiceContainer> {
        &self.services
    }

    /// Data value as text; a list yields its first item.
    pub fn text(&self, key: &str) -> Option<String> {
        self.data
            .get(key)
            .and_then(|v| v.to_strings().into_iter().next())
    }

    /// Option value; flags report presence as a boolean.
    pub fn option(&self, name: &str) -> Option<DataValue> {
        let name = name.trim_start_matches('-');
        let spec = self.options.spec(name)?;
        if spec.is_flag() {
            Some(DataValue::Bool(self.options.exist(name)))
        } else {
            self.options.value(name).map(DataValue::from)
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        self.options.exist(name.trim_start_matches('-'))
    }

    /// Positional argument by index (command token excluded).
    pub fn argument(&self, index: usize) -> Option<&str> {
        self.options.get_argument(index)
    }

    pub fn arguments(&self) -> &[String] {
        self.options.args()
    }

    /// Normalize a time-of-day string, prompting only when interactive.
    #[instrument(level = "debug", skip(self))]
    pub fn parse_time(&self, input: &str) -> ApplicationResult<String> {
        let normalizer = TimeNormalizer::new(self.services.clock.hour());
        let prompter = self.services.prompter.as_ref();
        let normalized = if prompter.is_interactive() {
            normalizer.normalize(input, Some(&PromptDisambiguator(prompter)))?
        } else {
            normalizer.normalize(input, None)?
        };
        Ok(normalized)
    }

    pub fn parse_date(&self, input: &str) -> ApplicationResult<String> {
        Ok(domain::parse_date(input)?)
    }

    /// Usage lines for this command.
    pub fn usage(&self, long: bool, short: bool) -> Vec<String> {
        usage_lines(
            &self.descriptor,
            &self.services.settings.script_name,
            long,
            short,
        )
    }

    /// Copy the descriptor's static defaults into instance data.
    pub(crate) fn seed_static_data(&mut self) {
        for (key, value) in &self.descriptor.data {
            self.data.set(key, value.clone());
        }
    }

    /// Map positional arguments onto the descriptor's argument names.
    ///
    /// With matching counts names and values pair up. Otherwise surplus
    /// values accumulate under the last name; without names the index is
    /// the key.
    pub(crate) fn map_arguments(&mut self) {
        let keys = &self.descriptor.arguments;
        let args = self.options.args();
        if args.is_empty() {
            return;
        }

        if args.len() == keys.len() {
            for (key, value) in keys.iter().zip(args) {
                self.data.add(key, value.as_str());
            }
            return;
        }

        let mut name = String::new();
        for (index, value) in args.iter().enumerate() {
            if let Some(key) = keys.get(index) {
                name = key.clone();
            }
            if name.is_empty() {
                self.data.add(&index.to_string(), value.as_str());
            } else {
                self.data.add(&name, value.as_str());
            }
        }
    }
}

struct PromptDisambiguator<'a>(&'a dyn Prompter);

impl Disambiguate for PromptDisambiguator<'_> {
    fn ask(&self, question: &str) -> Option<String> {
        self.0.ask(question, None)
    }
}

/// A command built for one invocation, tagged with its canonical name.
pub struct CommandInstance {
    command: Box<dyn Command>,
    context: Context,
    initialized: bool,
}

impl CommandInstance {
    pub fn new(command: Box<dyn Command>, context: Context) -> Self {
        Self {
            command,
            context,
            initialized: false,
        }
    }

    pub fn name(&self) -> &str {
        self.context.name()
    }

    pub fn command(&self) -> &dyn Command {
        &*self.command
    }

    /// Concrete command, if it is a `T`.
    pub fn downcast_ref<T: Command + 'static>(&self) -> Option<&T> {
        self.command().as_any().downcast_ref::<T>()
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    /// Run `init` once, then the command itself.
    pub fn run(&mut self) -> CommandResult {
        let Self {
            command,
            context,
            initialized,
        } = self;
        if !*initialized {
            command.init(context)?;
            *initialized = true;
        }
        debug!("run: {}", context.name());
        command.run(context)
    }
}
