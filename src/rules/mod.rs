//! Compatibility rules and the engine that drives them over a mapper tree.
//!
//! A rule inspects one left/right pair at one level of the tree and appends
//! [`CompatDifference`]s for every incompatibility it finds. The [`RuleRunner`] walks an
//! [`crate::mapping::AssemblyMapper`] in tree order and calls every registered rule for every
//! active pair, keeping the results of each right input apart.
//!
//! # Built-in Rules
//!
//! | Code | Rule | Level |
//! |------|------|-------|
//! | `CP0001` | [`TypeMustExist`] | type |
//! | `CP0002` | [`MemberMustExist`] | member |
//! | `CP0003` | [`AssemblyIdentityMustMatch`] | assembly |
//! | `CP0005` | [`CannotAddAbstractMember`] | member |
//! | `CP0006` | [`CannotAddMemberToInterface`] | member |
//! | `CP0007`, `CP0008` | [`CannotRemoveBaseTypeOrInterface`] | type |
//! | `CP0009` | [`CannotSealType`] | type |
//! | `CP0017` | [`CannotChangeParameterName`] (opt-in) | member |
//! | `CP0019` | [`CannotReduceVisibility`] | type, member |
//!
//! # Traversal
//!
//! Members and nested types of a type are only visited for the pairs in which the type exists
//! on both sides. A type that is missing on one side produces a single type-level difference
//! instead of one difference per member.

mod assembly_identity_must_match;
mod cannot_add_abstract_member;
mod cannot_add_member_to_interface;
mod cannot_change_parameter_name;
mod cannot_reduce_visibility;
mod cannot_remove_base_type;
mod cannot_seal_type;
mod difference;
mod factory;
mod member_must_exist;
mod runner;
mod settings;
mod type_must_exist;

pub use assembly_identity_must_match::AssemblyIdentityMustMatch;
pub use cannot_add_abstract_member::CannotAddAbstractMember;
pub use cannot_add_member_to_interface::CannotAddMemberToInterface;
pub use cannot_change_parameter_name::CannotChangeParameterName;
pub use cannot_reduce_visibility::CannotReduceVisibility;
pub use cannot_remove_base_type::CannotRemoveBaseTypeOrInterface;
pub use cannot_seal_type::CannotSealType;
pub use difference::{CompatDifference, DiagnosticId, DifferenceType};
pub use factory::RuleFactory;
pub use member_must_exist::MemberMustExist;
pub use runner::RuleRunner;
pub use settings::{ComparisonOptions, RuleSettings};
pub use type_must_exist::TypeMustExist;

use crate::{
    mapping::ElementPair,
    symbols::{AssemblySymbol, MemberSymbol, MetadataInformation, TypeSymbol},
};

/// Everything a rule knows about the pair it is looking at, besides the symbols.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// The left input.
    pub left: &'a MetadataInformation,
    /// The right input of this pair.
    pub right: &'a MetadataInformation,
    /// Index of the right input.
    pub right_index: usize,
    /// Switches of the current run.
    pub options: ComparisonOptions,
}

impl<'a> RuleContext<'a> {
    /// Create a context for `left` against right `right_index`.
    #[must_use]
    pub fn new(
        left: &'a MetadataInformation,
        right: &'a MetadataInformation,
        right_index: usize,
        options: ComparisonOptions,
    ) -> Self {
        Self {
            left,
            right,
            right_index,
            options,
        }
    }

    /// Name of the left side in messages.
    #[must_use]
    pub fn left_name(&self) -> &'a str {
        self.left.display_string()
    }

    /// Name of the right side in messages.
    #[must_use]
    pub fn right_name(&self) -> &'a str {
        self.right.display_string()
    }

    /// Shorthand for `options.strict_mode`.
    #[must_use]
    pub fn strict_mode(&self) -> bool {
        self.options.strict_mode
    }

    /// Shorthand for `options.include_internal_symbols`.
    #[must_use]
    pub fn include_internals(&self) -> bool {
        self.options.include_internal_symbols
    }
}

/// A compatibility rule.
///
/// Rules are stateless and shared; every method has a no-op default so a rule only
/// implements the levels it cares about. Rules append to `differences` and never remove
/// entries added by other rules.
pub trait Rule: Send + Sync {
    /// Unique name for logging and debugging.
    fn name(&self) -> &'static str;

    /// Compare the root assemblies of a pair.
    fn compare_assemblies(
        &self,
        _pair: ElementPair<'_, AssemblySymbol>,
        _context: &RuleContext<'_>,
        _differences: &mut Vec<CompatDifference>,
    ) {
    }

    /// Compare one type position of a pair. Either side may be absent.
    fn compare_types(
        &self,
        _pair: ElementPair<'_, TypeSymbol>,
        _context: &RuleContext<'_>,
        _differences: &mut Vec<CompatDifference>,
    ) {
    }

    /// Compare one member position of a pair.
    ///
    /// Only called when the containing type exists on both sides; either member may be
    /// absent.
    fn compare_members(
        &self,
        _pair: ElementPair<'_, MemberSymbol>,
        _containing: ElementPair<'_, TypeSymbol>,
        _context: &RuleContext<'_>,
        _differences: &mut Vec<CompatDifference>,
    ) {
    }
}
