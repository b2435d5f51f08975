//! worklog: command resolution and dispatch for a personal work-log CLI.
//!
//! Layers, innermost first: [`domain`] (values, descriptors, time and date
//! normalizers), [`application`] (registry, resolver, layered data,
//! subcommand dispatch), [`infrastructure`] (I/O boundary), [`commands`]
//! (built-ins) and [`cli`] (the `wlog` driver).

pub mod application;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
