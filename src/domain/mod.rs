//! Domain layer: values, descriptors and the pure input normalizers
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod date;
pub mod descriptor;
pub mod error;
pub mod time;
pub mod value;
pub mod version;

pub use date::parse_date;
pub use descriptor::{CommandDescriptor, Declarations, OptionSpec};
pub use error::{DomainError, DomainResult};
pub use time::{to_twelve_hour, Disambiguate, Meridiem, TimeNormalizer};
pub use value::DataValue;

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
