use std::{fmt, sync::Arc};

use crate::{
    rules::{CompatDifference, DiagnosticId},
    suppression::{Suppression, SuppressionEngine},
    symbols::MetadataInformation,
    Error, Result,
};

/// Receives everything a run wants to report.
///
/// The runner decides what to report and when; implementations decide how. An error
/// returned from any method aborts the run.
pub trait CompatLog: Send + Sync {
    /// Emitted once per left/right pair, before its first unsuppressed difference.
    ///
    /// # Errors
    /// Returns an error if the log cannot be written.
    fn log_header(
        &self,
        left: &MetadataInformation,
        right: &MetadataInformation,
        is_baseline: bool,
    ) -> Result<()>;

    /// An unsuppressed difference between `left` and `right`.
    ///
    /// `suppression` is the record that would silence this difference.
    ///
    /// # Errors
    /// Returns an error if the log cannot be written.
    fn log_difference(
        &self,
        left: &MetadataInformation,
        right: &MetadataInformation,
        suppression: &Suppression,
        difference: &CompatDifference,
    ) -> Result<()>;

    /// Loading `input` failed; the work item it belongs to was skipped.
    ///
    /// # Errors
    /// Returns an error if the log cannot be written.
    fn log_load_failure(&self, input: &MetadataInformation, error: &Error) -> Result<()>;

    /// A stored suppression that matched nothing during the run.
    ///
    /// # Errors
    /// Returns an error if the log cannot be written.
    fn log_unnecessary_suppression(&self, suppression: &Suppression) -> Result<()>;
}

/// One entry recorded by [`CollectingLog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    /// A pair header.
    Header {
        /// AssemblyId of the left input
        left: String,
        /// AssemblyId of the right input
        right: String,
        /// The pair belongs to a baseline comparison
        is_baseline: bool,
    },
    /// An unsuppressed difference.
    Difference {
        /// AssemblyId of the left input
        left: String,
        /// AssemblyId of the right input
        right: String,
        /// The reported difference
        difference: CompatDifference,
    },
    /// A failed input load.
    LoadFailure {
        /// Code matching the failure
        diagnostic_id: DiagnosticId,
        /// AssemblyId of the input
        input: String,
        /// Failure description
        message: String,
    },
    /// A suppression that was never used.
    UnnecessarySuppression(Suppression),
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEntry::Header {
                left,
                right,
                is_baseline,
            } => {
                let kind = if *is_baseline { "baseline " } else { "" };
                write!(f, "Compatibility {}differences between '{}' and '{}':", kind, left, right)
            }
            LogEntry::Difference { difference, .. } => write!(f, "{}", difference),
            LogEntry::LoadFailure {
                diagnostic_id,
                input,
                message,
            } => write!(f, "{}: Could not load '{}': {}", diagnostic_id, input, message),
            LogEntry::UnnecessarySuppression(suppression) => {
                write!(f, "Unnecessary suppression: {}", suppression)
            }
        }
    }
}

/// Thread-safe log that keeps every entry in memory.
#[derive(Debug, Default)]
pub struct CollectingLog {
    entries: boxcar::Vec<LogEntry>,
}

impl CollectingLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded entries, in recording order.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.iter().map(|(_, entry)| entry.clone()).collect()
    }

    /// The recorded differences, in recording order.
    #[must_use]
    pub fn differences(&self) -> Vec<CompatDifference> {
        self.entries
            .iter()
            .filter_map(|(_, entry)| match entry {
                LogEntry::Difference { difference, .. } => Some(difference.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded headers.
    #[must_use]
    pub fn header_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, entry)| matches!(entry, LogEntry::Header { .. }))
            .count()
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.count()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

impl CompatLog for CollectingLog {
    fn log_header(
        &self,
        left: &MetadataInformation,
        right: &MetadataInformation,
        is_baseline: bool,
    ) -> Result<()> {
        self.entries.push(LogEntry::Header {
            left: left.assembly_id.clone(),
            right: right.assembly_id.clone(),
            is_baseline,
        });
        Ok(())
    }

    fn log_difference(
        &self,
        left: &MetadataInformation,
        right: &MetadataInformation,
        _suppression: &Suppression,
        difference: &CompatDifference,
    ) -> Result<()> {
        self.entries.push(LogEntry::Difference {
            left: left.assembly_id.clone(),
            right: right.assembly_id.clone(),
            difference: difference.clone(),
        });
        Ok(())
    }

    fn log_load_failure(&self, input: &MetadataInformation, error: &Error) -> Result<()> {
        self.entries.push(LogEntry::LoadFailure {
            diagnostic_id: DiagnosticId::for_load_failure(error),
            input: input.assembly_id.clone(),
            message: error.to_string(),
        });
        Ok(())
    }

    fn log_unnecessary_suppression(&self, suppression: &Suppression) -> Result<()> {
        self.entries
            .push(LogEntry::UnnecessarySuppression(suppression.clone()));
        Ok(())
    }
}

/// Forwards every report to the [`log`] crate.
///
/// Differences and load failures are logged as errors, headers and unnecessary
/// suppressions as warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacade;

impl CompatLog for LogFacade {
    fn log_header(
        &self,
        left: &MetadataInformation,
        right: &MetadataInformation,
        is_baseline: bool,
    ) -> Result<()> {
        let entry = LogEntry::Header {
            left: left.display_string().to_string(),
            right: right.display_string().to_string(),
            is_baseline,
        };
        log::warn!("{}", entry);
        Ok(())
    }

    fn log_difference(
        &self,
        _left: &MetadataInformation,
        _right: &MetadataInformation,
        _suppression: &Suppression,
        difference: &CompatDifference,
    ) -> Result<()> {
        log::error!("{}", difference);
        Ok(())
    }

    fn log_load_failure(&self, input: &MetadataInformation, error: &Error) -> Result<()> {
        log::error!(
            "{}: Could not load '{}': {}",
            DiagnosticId::for_load_failure(error),
            input.display_string(),
            error
        );
        Ok(())
    }

    fn log_unnecessary_suppression(&self, suppression: &Suppression) -> Result<()> {
        log::warn!("Unnecessary suppression: {}", suppression);
        Ok(())
    }
}

/// Accepts every difference into a suppression store instead of reporting it.
///
/// Used to (re)generate a suppression file. Load failures and unnecessary suppressions are
/// passed through to the wrapped log.
pub struct SuppressionGeneratingLog {
    engine: Arc<SuppressionEngine>,
    inner: Arc<dyn CompatLog>,
}

impl SuppressionGeneratingLog {
    /// Wrap `inner`, accepting differences into `engine`.
    #[must_use]
    pub fn new(engine: Arc<SuppressionEngine>, inner: Arc<dyn CompatLog>) -> Self {
        Self { engine, inner }
    }
}

impl CompatLog for SuppressionGeneratingLog {
    fn log_header(
        &self,
        _left: &MetadataInformation,
        _right: &MetadataInformation,
        _is_baseline: bool,
    ) -> Result<()> {
        Ok(())
    }

    fn log_difference(
        &self,
        _left: &MetadataInformation,
        _right: &MetadataInformation,
        suppression: &Suppression,
        _difference: &CompatDifference,
    ) -> Result<()> {
        self.engine.add_accepted(suppression.clone());
        Ok(())
    }

    fn log_load_failure(&self, input: &MetadataInformation, error: &Error) -> Result<()> {
        self.inner.log_load_failure(input, error)
    }

    fn log_unnecessary_suppression(&self, suppression: &Suppression) -> Result<()> {
        self.inner.log_unnecessary_suppression(suppression)
    }
}

impl fmt::Debug for SuppressionGeneratingLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuppressionGeneratingLog")
            .field("suppressions", &self.engine.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{rules::DifferenceType, test::metadata};

    fn difference() -> CompatDifference {
        CompatDifference::new(
            DiagnosticId::TypeMustExist,
            DifferenceType::Removed,
            "Type 'Lib.Widget' exists on v1 but not on v2",
            "T:Lib.Widget",
        )
    }

    #[test]
    fn test_collecting_log() {
        let log = CollectingLog::new();
        let (left, right) = (metadata("v1"), metadata("v2"));
        let key = difference().suppression_key(&left, &right, false);

        log.log_header(&left, &right, false).unwrap();
        log.log_difference(&left, &right, &key, &difference()).unwrap();
        log.log_load_failure(&metadata("v3"), &Error::AssemblyNotFound("v3".to_string()))
            .unwrap();

        assert_eq!(log.count(), 3);
        assert_eq!(log.header_count(), 1);
        assert_eq!(log.differences(), vec![difference()]);
        assert!(matches!(
            &log.entries()[2],
            LogEntry::LoadFailure { diagnostic_id: DiagnosticId::AssemblyNotFound, input, .. } if input == "v3"
        ));
        assert_eq!(
            log.entries()[0].to_string(),
            "Compatibility differences between 'v1' and 'v2':"
        );
    }

    #[test]
    fn test_generating_log_accepts_differences() {
        let engine = Arc::new(SuppressionEngine::new());
        let inner = Arc::new(CollectingLog::new());
        let log = SuppressionGeneratingLog::new(engine.clone(), inner.clone());
        let (left, right) = (metadata("v1"), metadata("v2"));
        let key = difference().suppression_key(&left, &right, false);

        log.log_header(&left, &right, false).unwrap();
        log.log_difference(&left, &right, &key, &difference()).unwrap();

        assert!(inner.is_empty());
        assert_eq!(engine.suppressions(), vec![key]);
        assert!(engine.unmatched_suppressions().is_empty());
    }
}
