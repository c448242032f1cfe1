use crate::{
    mapping::ElementPair,
    rules::{CompatDifference, DiagnosticId, DifferenceType, Rule, RuleContext},
    symbols::{Accessibility, MemberSymbol, TypeSymbol},
};

/// Reports types and members whose accessibility went down.
///
/// In strict mode any accessibility change is reported. When internal symbols are compared,
/// access lost by friend assemblies counts as a reduction too.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannotReduceVisibility;

impl CannotReduceVisibility {
    fn compare(
        doc_id: String,
        left: Accessibility,
        right: Accessibility,
        context: &RuleContext<'_>,
        differences: &mut Vec<CompatDifference>,
    ) {
        let verb = if left.is_reduced_to(right, context.include_internals()) {
            "reduced"
        } else if context.strict_mode() && right != left {
            "expanded"
        } else {
            return;
        };

        differences.push(CompatDifference::new(
            DiagnosticId::CannotReduceVisibility,
            DifferenceType::Changed,
            format!(
                "Visibility of '{}' {} from '{}' on {} to '{}' on {}",
                doc_id,
                verb,
                left,
                context.left_name(),
                right,
                context.right_name()
            ),
            doc_id,
        ));
    }
}

impl Rule for CannotReduceVisibility {
    fn name(&self) -> &'static str {
        "CannotReduceVisibility"
    }

    fn compare_types(
        &self,
        pair: ElementPair<'_, TypeSymbol>,
        context: &RuleContext<'_>,
        differences: &mut Vec<CompatDifference>,
    ) {
        if let Some((left, right)) = pair.both() {
            Self::compare(
                left.doc_id(),
                left.accessibility,
                right.accessibility,
                context,
                differences,
            );
        }
    }

    fn compare_members(
        &self,
        pair: ElementPair<'_, MemberSymbol>,
        containing: ElementPair<'_, TypeSymbol>,
        context: &RuleContext<'_>,
        differences: &mut Vec<CompatDifference>,
    ) {
        if let (Some((left, right)), Some(left_type)) = (pair.both(), containing.left) {
            Self::compare(
                left.doc_id(left_type),
                left.accessibility,
                right.accessibility,
                context,
                differences,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{rules::ComparisonOptions, symbols::TypeKind, test::metadata};

    fn run_member(
        left: Accessibility,
        right: Accessibility,
        options: ComparisonOptions,
    ) -> Vec<CompatDifference> {
        let (left_info, right_info) = (metadata("v1"), metadata("v2"));
        let context = RuleContext::new(&left_info, &right_info, 0, options);
        let ty = TypeSymbol::new("Lib", "Widget", TypeKind::Class);
        let l = MemberSymbol::method("Foo").with_accessibility(left);
        let r = MemberSymbol::method("Foo").with_accessibility(right);

        let mut differences = Vec::new();
        CannotReduceVisibility.compare_members(
            ElementPair::new(Some(&l), Some(&r)),
            ElementPair::new(Some(&ty), Some(&ty)),
            &context,
            &mut differences,
        );
        differences
    }

    #[test]
    fn test_reduced_member_visibility() {
        let differences = run_member(
            Accessibility::Public,
            Accessibility::Protected,
            ComparisonOptions::default(),
        );
        assert_eq!(differences.len(), 1);
        assert_eq!(
            differences[0].message,
            "Visibility of 'M:Lib.Widget.Foo' reduced from 'public' on v1 to 'protected' on v2"
        );
    }

    #[test]
    fn test_expanded_visibility_only_in_strict_mode() {
        let relaxed = run_member(
            Accessibility::Protected,
            Accessibility::Public,
            ComparisonOptions::default(),
        );
        assert!(relaxed.is_empty());

        let strict = run_member(
            Accessibility::Protected,
            Accessibility::Public,
            ComparisonOptions::strict(),
        );
        assert_eq!(strict.len(), 1);
        assert!(strict[0].message.contains("expanded"));
    }

    #[test]
    fn test_internal_to_protected_with_internals() {
        let public_surface = run_member(
            Accessibility::Internal,
            Accessibility::Protected,
            ComparisonOptions::default(),
        );
        assert!(public_surface.is_empty());

        let options = ComparisonOptions {
            include_internal_symbols: true,
            ..ComparisonOptions::default()
        };
        let with_internals = run_member(Accessibility::Internal, Accessibility::Protected, options);
        assert_eq!(with_internals.len(), 1);
        assert_eq!(
            with_internals[0].message,
            "Visibility of 'M:Lib.Widget.Foo' reduced from 'internal' on v1 to 'protected' on v2"
        );

        let widened = run_member(
            Accessibility::Internal,
            Accessibility::ProtectedInternal,
            options,
        );
        assert!(widened.is_empty());
    }

    #[test]
    fn test_reduced_type_visibility() {
        let (left_info, right_info) = (metadata("v1"), metadata("v2"));
        let context = RuleContext::new(&left_info, &right_info, 0, ComparisonOptions::default());
        let left = TypeSymbol::new("Lib", "Widget", TypeKind::Class);
        let right = TypeSymbol::new("Lib", "Widget", TypeKind::Class)
            .with_accessibility(Accessibility::Internal);

        let mut differences = Vec::new();
        CannotReduceVisibility.compare_types(
            ElementPair::new(Some(&left), Some(&right)),
            &context,
            &mut differences,
        );
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].reference_id, "T:Lib.Widget");
    }
}
