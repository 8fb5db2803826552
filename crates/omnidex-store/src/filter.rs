//! Module/plural filter predicate.
//!
//! An [`EntryFilter`] is a disjunction of clauses, one per module: a record
//! passes when, for some clause, the record's module equals the clause's
//! module and its plural is in the clause's plural set. A filter with no
//! clauses passes every record. A clause with an empty plural set passes
//! nothing, but still makes the filter restrictive.

use std::collections::{BTreeMap, BTreeSet};

use omnidex_core::IndexRecord;

/// Filter over (module, entry_plural) pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    clauses: BTreeMap<String, BTreeSet<String>>,
}

impl EntryFilter {
    /// The filter that passes every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Add (or extend) the clause for `module`.
    pub fn with_plurals<I, S>(mut self, module: impl Into<String>, plurals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clauses
            .entry(module.into())
            .or_default()
            .extend(plurals.into_iter().map(Into::into));
        self
    }

    /// True when no restriction applies.
    pub fn is_unrestricted(&self) -> bool {
        self.clauses.is_empty()
    }

    /// True when the filter is restrictive but no clause can match anything.
    pub fn is_unsatisfiable(&self) -> bool {
        !self.clauses.is_empty() && self.clauses.values().all(BTreeSet::is_empty)
    }

    /// Whether a (module, plural) pair passes.
    pub fn matches(&self, module: &str, entry_plural: &str) -> bool {
        if self.clauses.is_empty() {
            return true;
        }
        self.clauses
            .get(module)
            .is_some_and(|plurals| plurals.contains(entry_plural))
    }

    /// Whether a record passes.
    pub fn matches_record(&self, record: &IndexRecord) -> bool {
        self.matches(&record.module, &record.entry_plural)
    }

    /// Iterate clauses in module order.
    pub fn clauses(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.clauses.iter().map(|(m, p)| (m.as_str(), p))
    }
}
