//! Application services
//!
//! Concrete services that orchestrate domain logic over the I/O boundary
//! traits (CommandRunner). Services are concrete structs, not traits.

mod version;

pub use version::VersionService;
