use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path,
    sync::atomic::{AtomicBool, Ordering},
};

use crate::{
    suppression::{file, Suppression},
    Result,
};

#[derive(Debug)]
struct SuppressionEntry {
    suppression: Suppression,
    matched: AtomicBool,
    accepted: bool,
}

impl SuppressionEntry {
    fn new(suppression: Suppression, accepted: bool) -> Self {
        Self {
            suppression,
            matched: AtomicBool::new(accepted),
            accepted,
        }
    }

    fn is_used(&self) -> bool {
        self.accepted || self.matched.load(Ordering::Relaxed)
    }
}

/// Thread-safe store of suppressions.
///
/// Entries are bucketed by diagnostic id, so a lookup only scans the suppressions that share
/// the queried id. Lookups take the read lock for their whole duration and record which
/// entries they matched; insertions check for an existing equal entry under an upgradable
/// read and only upgrade to the write lock when something is actually inserted.
///
/// The store is owned by the caller; there is no process-wide instance.
///
/// # Examples
///
/// ```rust
/// use apicompat::suppression::{Suppression, SuppressionEngine};
///
/// let engine = SuppressionEngine::new();
/// engine.add(Suppression::new("CP0002").with_target("M:Lib.Widget.Foo(System.Int32)"));
///
/// let observed = Suppression::new("CP0002")
///     .with_target("M:Lib.Widget.Foo(System.Int32)")
///     .with_left("lib/net8.0/Lib.dll")
///     .with_right("lib/net9.0/Lib.dll");
/// assert!(engine.is_suppressed(&observed));
/// assert!(engine.unmatched_suppressions().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct SuppressionEngine {
    suppressions: RwLock<HashMap<String, Vec<SuppressionEntry>>>,
    no_warn: HashSet<String>,
}

impl SuppressionEngine {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress whole diagnostic ids, given as a `;` or `,` separated list.
    ///
    /// These ids never reach the log and do not take part in unnecessary-suppression
    /// bookkeeping.
    #[must_use]
    pub fn with_no_warn(mut self, no_warn: &str) -> Self {
        self.no_warn.extend(
            no_warn
                .split([';', ','])
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_ascii_uppercase),
        );
        self
    }

    /// Build a store from a suppression file.
    ///
    /// A missing or unreadable file yields an empty store; parse failures are logged.
    #[must_use]
    pub fn load_from_file(path: impl AsRef<Path>) -> Self {
        Self::load_from_files([path])
    }

    /// Build a store from several suppression files, merging their contents.
    ///
    /// Each file that is missing or cannot be parsed contributes nothing.
    #[must_use]
    pub fn load_from_files<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let engine = Self::new();
        for path in paths {
            let path = path.as_ref();
            match engine.merge_file(path) {
                Ok(count) => {
                    log::debug!("Loaded {} suppressions from {}", count, path.display());
                }
                Err(error) => {
                    log::warn!(
                        "Ignoring suppression file {}: {}",
                        path.display(),
                        error
                    );
                }
            }
        }
        engine
    }

    /// Add every suppression from `path` to this store.
    ///
    /// A file that does not exist adds nothing and is not an error.
    ///
    /// # Returns
    ///
    /// The number of suppressions that were not already present.
    ///
    /// # Errors
    /// Returns an I/O error if the file exists but cannot be read, and
    /// [`crate::Error::Malformed`] if it cannot be parsed. Nothing is added in either case.
    pub fn merge_file(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(0);
        }

        let content = fs::read_to_string(path)?;
        let parsed = file::parse(&content)?;
        Ok(parsed
            .into_iter()
            .map(|suppression| self.add(suppression))
            .filter(|inserted| *inserted)
            .count())
    }

    /// Returns `true` if the difference described by `query` is suppressed.
    ///
    /// `query` is a concrete description of an observed difference. Every stored suppression
    /// that covers it is marked as used.
    pub fn is_suppressed(&self, query: &Suppression) -> bool {
        let id = query.id_key();
        if self.no_warn.contains(&id) {
            return true;
        }

        let suppressions = self.suppressions.read();
        let Some(bucket) = suppressions.get(&id) else {
            return false;
        };

        let mut found = false;
        for entry in bucket.iter().filter(|e| e.suppression.matches(query)) {
            entry.matched.store(true, Ordering::Relaxed);
            found = true;
        }
        found
    }

    /// Convenience form of [`SuppressionEngine::is_suppressed`].
    pub fn is_diagnostic_suppressed(
        &self,
        diagnostic_id: &str,
        target: Option<&str>,
        left: Option<&str>,
        right: Option<&str>,
    ) -> bool {
        let query = Suppression {
            diagnostic_id: diagnostic_id.to_string(),
            target: target.map(str::to_string),
            left: left.map(str::to_string),
            right: right.map(str::to_string),
            is_baseline_suppression: false,
        };
        self.is_suppressed(&query.normalized())
    }

    /// Add a suppression unless an equal one is already stored.
    ///
    /// # Returns
    ///
    /// `true` if the suppression was inserted.
    pub fn add(&self, suppression: Suppression) -> bool {
        self.insert(suppression.normalized(), false)
    }

    /// Add a suppression for a difference observed during this run.
    ///
    /// Accepted suppressions count as used and are always written by
    /// [`SuppressionEngine::write_to_file`].
    ///
    /// # Returns
    ///
    /// `true` if the suppression was inserted; an existing equal entry is marked accepted.
    pub fn add_accepted(&self, suppression: Suppression) -> bool {
        self.insert(suppression.normalized(), true)
    }

    fn insert(&self, suppression: Suppression, accepted: bool) -> bool {
        let id = suppression.id_key();

        let guard = self.suppressions.upgradable_read();
        let existing = guard
            .get(&id)
            .and_then(|bucket| bucket.iter().position(|e| e.suppression == suppression));
        if existing.is_some() && !accepted {
            return false;
        }

        let mut suppressions = RwLockUpgradableReadGuard::upgrade(guard);
        let bucket = suppressions.entry(id).or_default();
        match existing {
            Some(index) => {
                let entry = &mut bucket[index];
                entry.accepted = true;
                entry.matched.store(true, Ordering::Relaxed);
                false
            }
            None => {
                bucket.push(SuppressionEntry::new(suppression, accepted));
                true
            }
        }
    }

    /// Number of stored suppressions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.suppressions.read().values().map(Vec::len).sum()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every stored suppression, in file order.
    #[must_use]
    pub fn suppressions(&self) -> Vec<Suppression> {
        self.snapshot(|_| true)
    }

    /// Stored suppressions that no lookup has matched so far, in file order.
    ///
    /// Accepted suppressions are never reported here.
    #[must_use]
    pub fn unmatched_suppressions(&self) -> Vec<Suppression> {
        self.snapshot(|entry| !entry.is_used())
    }

    fn snapshot(&self, filter: impl Fn(&SuppressionEntry) -> bool) -> Vec<Suppression> {
        let suppressions = self.suppressions.read();
        let mut result: Vec<Suppression> = suppressions
            .values()
            .flatten()
            .filter(|entry| filter(entry))
            .map(|entry| entry.suppression.clone())
            .collect();
        result.sort();
        result
    }

    /// Write the stored suppressions to `path`, sorted.
    ///
    /// # Arguments
    ///
    /// * `path` - Destination file, overwritten if it exists
    /// * `preserve_unused` - Keep suppressions that never matched
    ///
    /// # Returns
    ///
    /// `false` if there was nothing to write; the file is left untouched in that case.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be written.
    pub fn write_to_file(&self, path: impl AsRef<Path>, preserve_unused: bool) -> Result<bool> {
        let path = path.as_ref();
        let suppressions = self.snapshot(|entry| preserve_unused || entry.is_used());
        if suppressions.is_empty() {
            log::info!(
                "No suppressions to write, leaving {} untouched",
                path.display()
            );
            return Ok(false);
        }

        let bytes = file::serialize(&suppressions)?;
        fs::write(path, bytes)?;
        log::info!(
            "Wrote {} suppressions to {}",
            suppressions.len(),
            path.display()
        );
        Ok(true)
    }
}
