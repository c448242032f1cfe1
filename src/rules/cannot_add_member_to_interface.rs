use crate::{
    mapping::ElementPair,
    rules::{CompatDifference, DiagnosticId, DifferenceType, Rule, RuleContext},
    symbols::{MemberSymbol, TypeSymbol},
};

/// Reports members without a default implementation added to an existing interface.
///
/// Static members and members with a default implementation do not affect implementers.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannotAddMemberToInterface;

impl Rule for CannotAddMemberToInterface {
    fn name(&self) -> &'static str {
        "CannotAddMemberToInterface"
    }

    fn compare_members(
        &self,
        pair: ElementPair<'_, MemberSymbol>,
        containing: ElementPair<'_, TypeSymbol>,
        context: &RuleContext<'_>,
        differences: &mut Vec<CompatDifference>,
    ) {
        let (None, Some(member)) = (pair.left, pair.right) else {
            return;
        };
        let Some((left_type, right_type)) = containing.both() else {
            return;
        };
        if !left_type.is_interface() || !right_type.is_interface() {
            return;
        }

        if member.is_abstract() && !member.is_static() {
            let doc_id = member.doc_id(right_type);
            differences.push(CompatDifference::new(
                DiagnosticId::CannotAddMemberToInterface,
                DifferenceType::Added,
                format!(
                    "Cannot add member '{}' to {} because it does not exist on {}",
                    doc_id,
                    context.right_name(),
                    context.left_name()
                ),
                doc_id,
            ));
        }
    }
}
