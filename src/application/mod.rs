//! Application layer: the command resolution and dispatch engine
//!
//! Registry, resolver, layered data, subcommand dispatch and services.
//! Depends on the domain layer and on I/O boundary traits only.

pub mod command;
pub mod data;
pub mod error;
pub mod error_ext;
pub mod options;
pub mod registry;
pub mod resolver;
pub mod services;
pub mod subcommand;
pub mod usage;

pub use command::{AsAny, Command, CommandInstance, CommandResult, Context, Declare};
pub use data::DataStore;
pub use error::{ApplicationError, ApplicationResult, ErrorKind};
pub use error_ext::IoResultExt;
pub use options::Options;
pub use registry::{Binding, BuildParams, Constructor, Registration, Registry};
pub use resolver::Resolver;
pub use subcommand::{Dispatch, Handler, Subcommands};
