use std::fmt;

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use crate::{suppression::Suppression, symbols::MetadataInformation, Error};

/// Stable diagnostic codes emitted by the built-in rules and the runner.
///
/// The string form (`CP0001`, ...) is what suppression files and `no_warn` lists refer to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    AsRefStr,
    IntoStaticStr,
    EnumString,
    EnumIter,
)]
pub enum DiagnosticId {
    /// A type exists on one side only.
    #[strum(serialize = "CP0001")]
    TypeMustExist,
    /// A member exists on one side only.
    #[strum(serialize = "CP0002")]
    MemberMustExist,
    /// Assembly name, culture, public key token or version changed.
    #[strum(serialize = "CP0003")]
    AssemblyIdentityMustMatch,
    /// An abstract member was added to an unsealed class.
    #[strum(serialize = "CP0005")]
    CannotAddAbstractMember,
    /// A member without a default implementation was added to an interface.
    #[strum(serialize = "CP0006")]
    CannotAddMemberToInterface,
    /// A type lost one of its base types.
    #[strum(serialize = "CP0007")]
    CannotRemoveBaseType,
    /// A type lost one of its interfaces.
    #[strum(serialize = "CP0008")]
    CannotRemoveInterface,
    /// A previously derivable class became sealed.
    #[strum(serialize = "CP0009")]
    CannotSealType,
    /// A parameter was renamed.
    #[strum(serialize = "CP0017")]
    CannotChangeParameterName,
    /// A type or member became less visible.
    #[strum(serialize = "CP0019")]
    CannotReduceVisibility,
    /// An input could not be found or loaded.
    #[strum(serialize = "CP1001")]
    AssemblyNotFound,
    /// A reference of an input could not be resolved.
    #[strum(serialize = "CP1002")]
    ReferenceNotFound,
}

impl DiagnosticId {
    /// The diagnostic code as a static string.
    #[must_use]
    pub fn code(self) -> &'static str {
        self.into()
    }

    /// The code reported when loading an input fails with `error`.
    #[must_use]
    pub fn for_load_failure(error: &Error) -> Self {
        match error {
            Error::ReferenceNotFound { .. } => DiagnosticId::ReferenceNotFound,
            _ => DiagnosticId::AssemblyNotFound,
        }
    }
}

/// Direction of an incompatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
pub enum DifferenceType {
    /// Present on the left, missing on the right.
    Removed,
    /// Present on the right, missing on the left.
    Added,
    /// Present on both sides with incompatible shape.
    Changed,
}

/// One incompatibility found by a rule for a single left/right pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatDifference {
    /// Diagnostic code of the rule that produced this difference.
    pub diagnostic_id: DiagnosticId,
    /// Direction of the incompatibility.
    pub difference_type: DifferenceType,
    /// Human readable description.
    pub message: String,
    /// Documentation id of the offending symbol; the suppression target.
    pub reference_id: String,
}

impl CompatDifference {
    /// Create a difference.
    #[must_use]
    pub fn new(
        diagnostic_id: DiagnosticId,
        difference_type: DifferenceType,
        message: impl Into<String>,
        reference_id: impl Into<String>,
    ) -> Self {
        Self {
            diagnostic_id,
            difference_type,
            message: message.into(),
            reference_id: reference_id.into(),
        }
    }

    /// The suppression record that would silence this difference for `left` against `right`.
    #[must_use]
    pub fn suppression_key(
        &self,
        left: &MetadataInformation,
        right: &MetadataInformation,
        is_baseline: bool,
    ) -> Suppression {
        Suppression::new(self.diagnostic_id.code())
            .with_target(self.reference_id.as_str())
            .with_left(left.assembly_id.as_str())
            .with_right(right.assembly_id.as_str())
            .with_baseline(is_baseline)
    }
}

impl fmt::Display for CompatDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.diagnostic_id, self.message)
    }
}
