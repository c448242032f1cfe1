use crate::{
    mapping::ElementPair,
    rules::{CompatDifference, DiagnosticId, DifferenceType, Rule, RuleContext},
    symbols::{TypeKind, TypeSymbol},
};

/// Reports classes that could be derived from on the left but are sealed on the right.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannotSealType;

impl Rule for CannotSealType {
    fn name(&self) -> &'static str {
        "CannotSealType"
    }

    fn compare_types(
        &self,
        pair: ElementPair<'_, TypeSymbol>,
        context: &RuleContext<'_>,
        differences: &mut Vec<CompatDifference>,
    ) {
        let Some((left, right)) = pair.both() else {
            return;
        };
        if left.kind != TypeKind::Class || right.kind != TypeKind::Class {
            return;
        }

        if !left.is_effectively_sealed() && right.is_effectively_sealed() {
            differences.push(CompatDifference::new(
                DiagnosticId::CannotSealType,
                DifferenceType::Changed,
                format!(
                    "Type '{}' is sealed on {} but not sealed on {}",
                    right.full_name(),
                    context.right_name(),
                    context.left_name()
                ),
                left.doc_id(),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{rules::ComparisonOptions, symbols::TypeFlags, test::metadata};

    fn run(left: &TypeSymbol, right: &TypeSymbol) -> Vec<CompatDifference> {
        let (left_info, right_info) = (metadata("v1"), metadata("v2"));
        let context = RuleContext::new(&left_info, &right_info, 0, ComparisonOptions::default());
        let mut differences = Vec::new();
        CannotSealType.compare_types(
            ElementPair::new(Some(left), Some(right)),
            &context,
            &mut differences,
        );
        differences
    }

    #[test]
    fn test_sealing_and_unsealing() {
        let open = TypeSymbol::new("Lib", "Widget", TypeKind::Class);
        let sealed = TypeSymbol::new("Lib", "Widget", TypeKind::Class).with_flags(TypeFlags::SEALED);
        let static_class =
            TypeSymbol::new("Lib", "Widget", TypeKind::Class).with_flags(TypeFlags::STATIC);

        let differences = run(&open, &sealed);
        assert_eq!(differences.len(), 1);
        assert_eq!(
            differences[0].message,
            "Type 'Lib.Widget' is sealed on v2 but not sealed on v1"
        );

        assert_eq!(run(&open, &static_class).len(), 1);
        assert!(run(&sealed, &open).is_empty());
        assert!(run(&sealed, &sealed).is_empty());
    }
}
