use crate::{
    mapping::ElementPair,
    rules::{CompatDifference, DiagnosticId, DifferenceType, Rule, RuleContext},
    symbols::TypeSymbol,
};

/// Reports types that exist on the left but not on the right.
///
/// In strict mode types that only exist on the right are reported as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeMustExist;

impl Rule for TypeMustExist {
    fn name(&self) -> &'static str {
        "TypeMustExist"
    }

    fn compare_types(
        &self,
        pair: ElementPair<'_, TypeSymbol>,
        context: &RuleContext<'_>,
        differences: &mut Vec<CompatDifference>,
    ) {
        match (pair.left, pair.right) {
            (Some(left), None) => differences.push(CompatDifference::new(
                DiagnosticId::TypeMustExist,
                DifferenceType::Removed,
                format!(
                    "Type '{}' exists on {} but not on {}",
                    left.full_name(),
                    context.left_name(),
                    context.right_name()
                ),
                left.doc_id(),
            )),
            (None, Some(right)) if context.strict_mode() => {
                differences.push(CompatDifference::new(
                    DiagnosticId::TypeMustExist,
                    DifferenceType::Added,
                    format!(
                        "Type '{}' exists on {} but not on {}",
                        right.full_name(),
                        context.right_name(),
                        context.left_name()
                    ),
                    right.doc_id(),
                ));
            }
            _ => {}
        }
    }
}
