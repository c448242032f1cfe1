use crate::{
    mapping::ElementPair,
    rules::{CompatDifference, DiagnosticId, DifferenceType, Rule, RuleContext},
    symbols::{MemberSymbol, TypeKind, TypeSymbol},
};

/// Reports abstract members added to a class that consumers can derive from.
///
/// Existing derived classes do not implement the new member and stop compiling.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannotAddAbstractMember;

impl Rule for CannotAddAbstractMember {
    fn name(&self) -> &'static str {
        "CannotAddAbstractMember"
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

        // Sealed on the left means nobody could have derived from it.
        if left_type.kind != TypeKind::Class || left_type.is_effectively_sealed() {
            return;
        }

        if member.is_abstract() {
            let doc_id = member.doc_id(right_type);
            differences.push(CompatDifference::new(
                DiagnosticId::CannotAddAbstractMember,
                DifferenceType::Added,
                format!(
                    "Cannot add abstract member '{}' to {} because it does not exist on {}",
                    doc_id,
                    context.right_name(),
                    context.left_name()
                ),
                doc_id,
            ));
        }
    }
}
