use std::{collections::HashSet, fmt};

use crate::{runner::ApiCompatRunnerOptions, symbols::MetadataInformation, Error, Result};

/// One unit of comparison: a set of left inputs against a list of right inputs.
///
/// Two work items have the same identity when their left inputs are equal as a set and
/// their options are equal. Enqueuing an item with an existing identity merges its rights
/// into the queued item instead of adding a second item.
#[derive(Debug, Clone)]
pub struct ApiCompatRunnerWorkItem {
    lefts: Vec<MetadataInformation>,
    rights: Vec<MetadataInformation>,
    options: ApiCompatRunnerOptions,
}

impl ApiCompatRunnerWorkItem {
    /// Create a work item.
    ///
    /// Duplicate right inputs are dropped, keeping the first occurrence.
    ///
    /// # Errors
    /// Returns [`Error::InvalidWorkItem`] if `lefts` is empty.
    pub fn new(
        lefts: Vec<MetadataInformation>,
        rights: Vec<MetadataInformation>,
        options: ApiCompatRunnerOptions,
    ) -> Result<Self> {
        if lefts.is_empty() {
            return Err(Error::InvalidWorkItem(
                "a work item needs at least one left input".to_string(),
            ));
        }

        let mut item = Self {
            lefts,
            rights: Vec::with_capacity(rights.len()),
            options,
        };
        item.merge_rights(rights);
        Ok(item)
    }

    /// The left inputs; only the first one is compared.
    #[must_use]
    pub fn lefts(&self) -> &[MetadataInformation] {
        &self.lefts
    }

    /// The right inputs, in comparison order.
    #[must_use]
    pub fn rights(&self) -> &[MetadataInformation] {
        &self.rights
    }

    /// The options of this item.
    #[must_use]
    pub fn options(&self) -> &ApiCompatRunnerOptions {
        &self.options
    }

    /// Returns `true` if `other` has the same left set and options.
    #[must_use]
    pub fn has_same_identity(&self, other: &Self) -> bool {
        if self.options != other.options {
            return false;
        }

        let ours: HashSet<&MetadataInformation> = self.lefts.iter().collect();
        let theirs: HashSet<&MetadataInformation> = other.lefts.iter().collect();
        ours == theirs
    }

    pub(crate) fn merge_rights(&mut self, rights: impl IntoIterator<Item = MetadataInformation>) {
        for right in rights {
            if !self.rights.contains(&right) {
                self.rights.push(right);
            }
        }
    }
}

impl fmt::Display for ApiCompatRunnerWorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |inputs: &[MetadataInformation]| {
            inputs
                .iter()
                .map(MetadataInformation::display_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(f, "[{}] -> [{}]", join(&self.lefts), join(&self.rights))
    }
}
