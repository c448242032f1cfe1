use crate::{
    mapping::ElementPair,
    rules::{CompatDifference, DiagnosticId, DifferenceType, Rule, RuleContext},
    symbols::{MemberSymbol, TypeSymbol},
};

/// Reports members that exist on the left but not on the right.
///
/// In strict mode members that only exist on the right are reported as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemberMustExist;

impl Rule for MemberMustExist {
    fn name(&self) -> &'static str {
        "MemberMustExist"
    }

    fn compare_members(
        &self,
        pair: ElementPair<'_, MemberSymbol>,
        containing: ElementPair<'_, TypeSymbol>,
        context: &RuleContext<'_>,
        differences: &mut Vec<CompatDifference>,
    ) {
        match (pair.left, pair.right, containing.left, containing.right) {
            (Some(left), None, Some(left_type), _) => {
                let doc_id = left.doc_id(left_type);
                differences.push(CompatDifference::new(
                    DiagnosticId::MemberMustExist,
                    DifferenceType::Removed,
                    format!(
                        "Member '{}' exists on {} but not on {}",
                        doc_id,
                        context.left_name(),
                        context.right_name()
                    ),
                    doc_id,
                ));
            }
            (None, Some(right), _, Some(right_type)) if context.strict_mode() => {
                let doc_id = right.doc_id(right_type);
                differences.push(CompatDifference::new(
                    DiagnosticId::MemberMustExist,
                    DifferenceType::Added,
                    format!(
                        "Member '{}' exists on {} but not on {}",
                        doc_id,
                        context.right_name(),
                        context.left_name()
                    ),
                    doc_id,
                ));
            }
            _ => {}
        }
    }
}
