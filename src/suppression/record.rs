use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

/// A persisted decision to ignore a diagnostic.
///
/// `target`, `left` and `right` are optional. When a stored suppression is matched against a
/// concrete difference, an absent field matches any value. Text fields are compared trimmed
/// and ASCII case-insensitively, and empty text is the same as absent. Equality and hashing
/// follow the same normalization, with absent equal only to absent.
#[derive(Debug, Clone)]
pub struct Suppression {
    /// Diagnostic id such as `CP0002`.
    pub diagnostic_id: String,
    /// Documentation id of the affected symbol.
    pub target: Option<String>,
    /// AssemblyId of the left input.
    pub left: Option<String>,
    /// AssemblyId of the right input.
    pub right: Option<String>,
    /// Applies to baseline comparisons instead of regular ones.
    pub is_baseline_suppression: bool,
}

fn normalize(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == v.len() {
            Some(v)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn field_eq(a: &Option<String>, b: &Option<String>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

fn field_matches(stored: &Option<String>, query: &Option<String>) -> bool {
    match (stored, query) {
        (None, _) => true,
        (Some(stored), Some(query)) => stored.eq_ignore_ascii_case(query),
        (Some(_), None) => false,
    }
}

fn field_key(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

impl Suppression {
    /// Create a suppression for every occurrence of `diagnostic_id`.
    #[must_use]
    pub fn new(diagnostic_id: impl Into<String>) -> Self {
        Self {
            diagnostic_id: diagnostic_id.into().trim().to_string(),
            target: None,
            left: None,
            right: None,
            is_baseline_suppression: false,
        }
    }

    /// Restricts the suppression to one target.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = normalize(Some(target.into()));
        self
    }

    /// Restricts the suppression to one left input.
    #[must_use]
    pub fn with_left(mut self, left: impl Into<String>) -> Self {
        self.left = normalize(Some(left.into()));
        self
    }

    /// Restricts the suppression to one right input.
    #[must_use]
    pub fn with_right(mut self, right: impl Into<String>) -> Self {
        self.right = normalize(Some(right.into()));
        self
    }

    /// Marks the suppression as applying to baseline comparisons.
    #[must_use]
    pub fn with_baseline(mut self, is_baseline: bool) -> Self {
        self.is_baseline_suppression = is_baseline;
        self
    }

    /// Returns this suppression with every text field trimmed and empty fields cleared.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            diagnostic_id: self.diagnostic_id.trim().to_string(),
            target: normalize(self.target),
            left: normalize(self.left),
            right: normalize(self.right),
            is_baseline_suppression: self.is_baseline_suppression,
        }
    }

    /// Returns `true` if this stored suppression covers the concrete `query`.
    ///
    /// Absent fields on `self` match anything; absent fields on `query` only match absent
    /// fields on `self`.
    #[must_use]
    pub fn matches(&self, query: &Suppression) -> bool {
        self.is_baseline_suppression == query.is_baseline_suppression
            && self
                .diagnostic_id
                .trim()
                .eq_ignore_ascii_case(query.diagnostic_id.trim())
            && field_matches(&self.target, &query.target)
            && field_matches(&self.left, &query.left)
            && field_matches(&self.right, &query.right)
    }

    /// Normalized diagnostic id used for indexing.
    pub(crate) fn id_key(&self) -> String {
        self.diagnostic_id.trim().to_ascii_uppercase()
    }

    fn sort_key(&self) -> (String, String, String, String, bool) {
        (
            self.id_key(),
            field_key(&self.left),
            field_key(&self.right),
            field_key(&self.target),
            self.is_baseline_suppression,
        )
    }
}

impl PartialEq for Suppression {
    fn eq(&self, other: &Self) -> bool {
        self.is_baseline_suppression == other.is_baseline_suppression
            && self.id_key() == other.id_key()
            && field_eq(&self.target, &other.target)
            && field_eq(&self.left, &other.left)
            && field_eq(&self.right, &other.right)
    }
}

impl Eq for Suppression {}

impl Hash for Suppression {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id_key().hash(state);
        self.target.as_ref().map(|t| t.to_ascii_lowercase()).hash(state);
        self.left.as_ref().map(|l| l.to_ascii_lowercase()).hash(state);
        self.right.as_ref().map(|r| r.to_ascii_lowercase()).hash(state);
        self.is_baseline_suppression.hash(state);
    }
}

impl PartialOrd for Suppression {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders by diagnostic id, left, right, then target; the order used when writing files.
impl Ord for Suppression {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for Suppression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diagnostic_id)?;
        if let Some(target) = &self.target {
            write!(f, " target '{}'", target)?;
        }
        if let Some(left) = &self.left {
            write!(f, " left '{}'", left)?;
        }
        if let Some(right) = &self.right {
            write!(f, " right '{}'", right)?;
        }
        if self.is_baseline_suppression {
            write!(f, " (baseline)")?;
        }
        Ok(())
    }
}
