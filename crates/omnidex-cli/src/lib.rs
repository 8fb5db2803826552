//! # omnidex-cli
//!
//! Command-line front end for an Omnidex search index.
//!
//! - `index` / `drop`: write or remove one entry
//! - `search` / `count`: query the index, as a table or JSON
//! - `config init` / `config show`: manage the TOML configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod output;

pub use cli::{Cli, Command, ConfigAction};
pub use commands::run;
