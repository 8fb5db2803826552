//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use omnidex_core::{EntryRef, IndexOptions, Keywords, NewEntry};

/// Omnidex - unified search index for content modules
#[derive(Parser, Debug)]
#[command(name = "omnidex", version)]
#[command(about = "Index, drop and search content entries", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "OMNIDEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Index directory, overriding `index_path` from the configuration
    #[arg(long, global = true, env = "OMNIDEX_INDEX")]
    pub index: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Log filter directive for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Index an entry, replacing its previous record
    Index(IndexArgs),

    /// Remove an entry from the index
    Drop(EntryArgs),

    /// Ranked search
    Search(SearchArgs),

    /// Count records matching a query
    Count {
        /// Query text
        query: String,
    },

    /// Configuration file operations
    Config {
        /// Config operation
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Identity of an indexed entry.
#[derive(Args, Debug, Clone)]
pub struct EntryArgs {
    /// Owning module
    #[arg(long)]
    pub module: String,

    /// Singular entry type
    #[arg(long)]
    pub entry_key: String,

    /// Entry id within the module
    #[arg(long)]
    pub id: u64,
}

impl EntryArgs {
    /// The entry reference these arguments name.
    pub fn entry_ref(&self) -> EntryRef {
        EntryRef::new(self.module.as_str(), self.entry_key.as_str(), self.id)
    }
}

/// Arguments for `index`.
#[derive(Args, Debug, Clone)]
pub struct IndexArgs {
    /// Entry identity
    #[command(flatten)]
    pub entry: EntryArgs,

    /// Plural entry type, used by search filters
    #[arg(long)]
    pub plural: String,

    /// Canonical link
    #[arg(long)]
    pub uri: String,

    /// Title (markup is stripped)
    #[arg(long)]
    pub title: String,

    /// Body text (markup is stripped)
    #[arg(long)]
    pub description: Option<String>,

    /// Raw keyword source passed through the keyword normalizer
    #[arg(long, conflicts_with = "keyword")]
    pub keywords: Option<String>,

    /// Literal keyword, stored verbatim (repeatable)
    #[arg(long)]
    pub keyword: Vec<String>,

    /// Administrative edit link
    #[arg(long)]
    pub edit_uri: Option<String>,

    /// Administrative delete link
    #[arg(long)]
    pub delete_uri: Option<String>,
}

impl IndexArgs {
    /// Build the indexing input.
    pub fn into_entry(self) -> NewEntry {
        let mut options = IndexOptions::default();
        if let Some(source) = self.keywords {
            options = options.with_keywords(Keywords::source(source));
        } else if !self.keyword.is_empty() {
            options = options.with_keywords(Keywords::List(self.keyword));
        }
        if let Some(uri) = self.edit_uri {
            options = options.with_cp_edit_uri(uri);
        }
        if let Some(uri) = self.delete_uri {
            options = options.with_cp_delete_uri(uri);
        }

        NewEntry {
            module: self.entry.module,
            entry_key: self.entry.entry_key,
            entry_plural: self.plural,
            entry_id: self.entry.id,
            uri: self.uri,
            title: self.title,
            description: self.description,
            options,
        }
    }
}

/// Arguments for `search`.
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Query text
    pub query: String,

    /// Maximum number of hits (default from configuration)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Hits to skip
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Restrict to `module=plural[,plural...]` (repeatable)
    #[arg(short, long)]
    pub filter: Vec<String>,

    /// Print hits as JSON
    #[arg(long)]
    pub json: bool,
}

/// Config subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init {
        /// Target file (default: platform config directory)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration as TOML
    Show,
}

// ============================================================================
// Tests
// ============================================================================
