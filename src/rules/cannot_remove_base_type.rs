use crate::{
    mapping::ElementPair,
    rules::{CompatDifference, DiagnosticId, DifferenceType, Rule, RuleContext},
    symbols::TypeSymbol,
};

/// Reports base types and interfaces that a type no longer derives from or implements.
///
/// Base types are compared for every kind but interfaces, whose `base_types` are empty.
/// In strict mode, base types and interfaces that only appear on the right are reported too.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannotRemoveBaseTypeOrInterface;

impl CannotRemoveBaseTypeOrInterface {
    fn report_missing(
        ty: &TypeSymbol,
        present: &[String],
        absent_from: &[String],
        id: DiagnosticId,
        difference_type: DifferenceType,
        (has_name, lacks_name): (&str, &str),
        differences: &mut Vec<CompatDifference>,
    ) {
        let verb = match id {
            DiagnosticId::CannotRemoveInterface => "implement interface",
            _ => "inherit from base type",
        };

        for missing in present.iter().filter(|name| !absent_from.contains(name)) {
            differences.push(CompatDifference::new(
                id,
                difference_type,
                format!(
                    "Type '{}' does not {} '{}' on {} but it does on {}",
                    ty.full_name(),
                    verb,
                    missing,
                    lacks_name,
                    has_name
                ),
                ty.doc_id(),
            ));
        }
    }
}

impl Rule for CannotRemoveBaseTypeOrInterface {
    fn name(&self) -> &'static str {
        "CannotRemoveBaseTypeOrInterface"
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
        let sides = (context.left_name(), context.right_name());
        let reversed = (context.right_name(), context.left_name());

        if !left.is_interface() {
            Self::report_missing(
                left,
                &left.base_types,
                &right.base_types,
                DiagnosticId::CannotRemoveBaseType,
                DifferenceType::Removed,
                sides,
                differences,
            );
        }
        Self::report_missing(
            left,
            &left.interfaces,
            &right.interfaces,
            DiagnosticId::CannotRemoveInterface,
            DifferenceType::Removed,
            sides,
            differences,
        );

        if context.strict_mode() {
            if !right.is_interface() {
                Self::report_missing(
                    right,
                    &right.base_types,
                    &left.base_types,
                    DiagnosticId::CannotRemoveBaseType,
                    DifferenceType::Added,
                    reversed,
                    differences,
                );
            }
            Self::report_missing(
                right,
                &right.interfaces,
                &left.interfaces,
                DiagnosticId::CannotRemoveInterface,
                DifferenceType::Added,
                reversed,
                differences,
            );
        }
    }
}
