//! Filter specifications.
//!
//! A [`FilterSpec`] is what callers write: a map from module name to one
//! plural or a list of plurals. The planner turns it into the store's
//! [`EntryFilter`].
//!
//! ```rust
//! use omnidex_query::FilterSpec;
//!
//! let spec: FilterSpec = serde_json::from_str(
//!     r#"{"blog": "blog:posts", "pages": ["pages:pages", "pages:drafts"]}"#,
//! ).unwrap();
//!
//! let filter = spec.to_entry_filter();
//! assert!(filter.matches("blog", "blog:posts"));
//! assert!(filter.matches("pages", "pages:drafts"));
//! assert!(!filter.matches("blog", "blog:categories"));
//! ```

use std::collections::BTreeMap;

use omnidex_core::{Error, Result};
use omnidex_store::EntryFilter;
use serde::{Deserialize, Serialize};

/// One plural or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Plurals {
    /// A single plural identifier.
    One(String),
    /// A set of plural identifiers; empty matches nothing.
    Many(Vec<String>),
}

impl Plurals {
    /// The plurals as a slice-like iterator.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let items: &[String] = match self {
            Plurals::One(plural) => std::slice::from_ref(plural),
            Plurals::Many(plurals) => plurals,
        };
        items.iter().map(String::as_str)
    }
}

impl From<&str> for Plurals {
    fn from(plural: &str) -> Self {
        Plurals::One(plural.to_string())
    }
}

impl From<String> for Plurals {
    fn from(plural: String) -> Self {
        Plurals::One(plural)
    }
}

impl From<Vec<String>> for Plurals {
    fn from(plurals: Vec<String>) -> Self {
        Plurals::Many(plurals)
    }
}

impl From<Vec<&str>> for Plurals {
    fn from(plurals: Vec<&str>) -> Self {
        Plurals::Many(plurals.into_iter().map(str::to_string).collect())
    }
}

/// Module → plural(s) filter specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSpec(BTreeMap<String, Plurals>);

impl FilterSpec {
    /// An empty spec, matching every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the plurals allowed for `module`.
    pub fn with(mut self, module: impl Into<String>, plurals: impl Into<Plurals>) -> Self {
        self.0.insert(module.into(), plurals.into());
        self
    }

    /// Parse `module=plural[,plural...]` pairs, as given on a command line.
    ///
    /// Repeating a module adds to its plurals. `module=` yields an empty
    /// plural list for that module.
    pub fn parse_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for pair in pairs {
            let pair = pair.as_ref();
            let (module, plurals) = pair.split_once('=').ok_or_else(|| {
                Error::query(format!("filter '{pair}' must look like module=plural"))
            })?;
            let module = module.trim();
            if module.is_empty() {
                return Err(Error::query(format!("filter '{pair}' has no module")));
            }
            map.entry(module.to_string()).or_default().extend(
                plurals
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string),
            );
        }

        Ok(Self(
            map.into_iter()
                .map(|(module, plurals)| (module, Plurals::Many(plurals)))
                .collect(),
        ))
    }

    /// True when no module is constrained.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build the store-level filter.
    pub fn to_entry_filter(&self) -> EntryFilter {
        self.0
            .iter()
            .fold(EntryFilter::all(), |filter, (module, plurals)| {
                filter.with_plurals(module.as_str(), plurals.iter())
            })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_spec_matches_everything() {
        let filter = FilterSpec::new().to_entry_filter();
        assert!(filter.is_unrestricted());
        assert!(filter.matches("anything", "at:all"));
    }

    #[test]
    fn test_single_plural() {
        let filter = FilterSpec::new().with("blog", "blog:posts").to_entry_filter();
        assert!(filter.matches("blog", "blog:posts"));
        assert!(!filter.matches("blog", "blog:categories"));
        assert!(!filter.matches("pages", "pages:pages"));
    }

    #[test]
    fn test_many_plurals() {
        let filter = FilterSpec::new()
            .with("blog", vec!["blog:posts", "blog:categories"])
            .to_entry_filter();
        assert!(filter.matches("blog", "blog:categories"));
    }

    #[test]
    fn test_empty_list_matches_nothing() {
        let filter = FilterSpec::new()
            .with("blog", Vec::<String>::new())
            .to_entry_filter();
        assert!(filter.is_unsatisfiable());
        assert!(!filter.matches("blog", "blog:posts"));
    }

    #[test]
    fn test_deserialize_mixed() {
        let spec: FilterSpec =
            serde_json::from_str(r#"{"blog": "blog:posts", "pages": []}"#).unwrap();
        assert_eq!(
            spec,
            FilterSpec::new()
                .with("blog", "blog:posts")
                .with("pages", Vec::<String>::new())
        );
    }

    #[test]
    fn test_parse_pairs() {
        let spec =
            FilterSpec::parse_pairs(["blog=blog:posts,blog:categories", "pages=pages:pages"])
                .unwrap();
        let filter = spec.to_entry_filter();
        assert!(filter.matches("blog", "blog:categories"));
        assert!(filter.matches("pages", "pages:pages"));

        let repeated = FilterSpec::parse_pairs(["blog=blog:posts", "blog=blog:tags"]).unwrap();
        assert!(repeated.to_entry_filter().matches("blog", "blog:tags"));
    }

    #[test]
    fn test_parse_pairs_rejects_malformed() {
        assert!(FilterSpec::parse_pairs(["blog"]).is_err());
        assert!(FilterSpec::parse_pairs(["=blog:posts"]).is_err());
    }
}
