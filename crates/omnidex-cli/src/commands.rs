//! Command handlers.
//!
//! Every handler returns the text to print so it can be tested without
//! capturing stdout.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use omnidex_core::{IndexConfig, InlineKeywords};
use omnidex_query::{FilterSpec, SearchIndex, SearchParams};

use crate::cli::{Cli, Command, ConfigAction, EntryArgs, IndexArgs, SearchArgs};
use crate::{config, output};

/// Run a parsed command line.
pub async fn run(cli: Cli) -> Result<String> {
    let config_path = cli.config.as_deref();
    let index_dir = cli.index.as_deref();

    if let Command::Config { action } = &cli.command {
        return configure(config_path, index_dir, action);
    }

    let config = config::load(config_path, index_dir)?;
    let index = open_index(&config).await?;

    match cli.command {
        Command::Index(args) => index_entry(&index, args).await,
        Command::Drop(args) => drop_entry(&index, &args).await,
        Command::Search(args) => search(&index, &args).await,
        Command::Count { query } => count(&index, &query).await,
        Command::Config { action } => configure(config_path, index_dir, &action),
    }
}

/// Open the configured index with inline keyword normalization.
pub async fn open_index(config: &IndexConfig) -> Result<SearchIndex> {
    Ok(SearchIndex::from_config(config, Arc::new(InlineKeywords)).await?)
}

/// `index`
pub async fn index_entry(index: &SearchIndex, args: IndexArgs) -> Result<String> {
    let entry = args.into_entry();
    let entry_ref = entry.entry_ref();
    let id = index.index(entry).await?;
    Ok(format!("Indexed {entry_ref} as record {id}"))
}

/// `drop`
pub async fn drop_entry(index: &SearchIndex, args: &EntryArgs) -> Result<String> {
    let entry_ref = args.entry_ref();
    let removed = index.drop_index(&entry_ref).await?;
    Ok(format!("Dropped {removed} record(s) for {entry_ref}"))
}

/// `search`
pub async fn search(index: &SearchIndex, args: &SearchArgs) -> Result<String> {
    let mut params = SearchParams::new(args.query.as_str()).with_offset(args.offset);
    if let Some(limit) = args.limit {
        params = params.with_limit(limit);
    }
    if !args.filter.is_empty() {
        params = params.with_filter(FilterSpec::parse_pairs(&args.filter)?);
    }

    let hits = index.search(&params).await?;
    if args.json {
        output::format_json(&args.query, &hits)
    } else {
        Ok(output::format_table(&args.query, &hits))
    }
}

/// `count`
pub async fn count(index: &SearchIndex, query: &str) -> Result<String> {
    Ok(index.count(query).await?.to_string())
}

/// `config init` / `config show`
pub fn configure(
    config_path: Option<&Path>,
    index_dir: Option<&Path>,
    action: &ConfigAction,
) -> Result<String> {
    match action {
        ConfigAction::Init { file, force } => {
            let target = file.as_deref().or(config_path);
            let path = config::init(target, *force)?;
            Ok(format!("Config file created at {}", path.display()))
        }
        ConfigAction::Show => {
            let config = config::load(config_path, index_dir)?;
            Ok(config.to_toml_string()?.trim_end().to_string())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
