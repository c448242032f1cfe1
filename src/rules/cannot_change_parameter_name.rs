use crate::{
    mapping::ElementPair,
    rules::{CompatDifference, DiagnosticId, DifferenceType, Rule, RuleContext},
    symbols::{MemberSymbol, TypeSymbol},
};

/// Reports renamed parameters, which break callers that use named arguments.
///
/// Each renamed parameter produces its own difference; the reference id is the member's
/// documentation id followed by `$` and the zero-based parameter index.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannotChangeParameterName;

impl Rule for CannotChangeParameterName {
    fn name(&self) -> &'static str {
        "CannotChangeParameterName"
    }

    fn compare_members(
        &self,
        pair: ElementPair<'_, MemberSymbol>,
        containing: ElementPair<'_, TypeSymbol>,
        _context: &RuleContext<'_>,
        differences: &mut Vec<CompatDifference>,
    ) {
        let (Some((left, right)), Some(left_type)) = (pair.both(), containing.left) else {
            return;
        };

        let renamed = left
            .parameters
            .iter()
            .zip(&right.parameters)
            .enumerate()
            .filter(|(_, (l, r))| l.name != r.name);

        for (index, (l, r)) in renamed {
            let doc_id = left.doc_id(left_type);
            differences.push(CompatDifference::new(
                DiagnosticId::CannotChangeParameterName,
                DifferenceType::Changed,
                format!(
                    "Parameter name on member '{}' changed from '{}' to '{}'",
                    doc_id, l.name, r.name
                ),
                format!("{}${}", doc_id, index),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{rules::ComparisonOptions, symbols::TypeKind, test::metadata};

    #[test]
    fn test_renamed_parameter() {
        let (left_info, right_info) = (metadata("v1"), metadata("v2"));
        let context = RuleContext::new(&left_info, &right_info, 0, ComparisonOptions::default());
        let ty = TypeSymbol::new("Lib", "Widget", TypeKind::Class);
        let left = MemberSymbol::method("Resize")
            .with_parameter("width", "System.Int32")
            .with_parameter("height", "System.Int32");
        let right = MemberSymbol::method("Resize")
            .with_parameter("width", "System.Int32")
            .with_parameter("h", "System.Int32");

        let mut differences = Vec::new();
        CannotChangeParameterName.compare_members(
            ElementPair::new(Some(&left), Some(&right)),
            ElementPair::new(Some(&ty), Some(&ty)),
            &context,
            &mut differences,
        );

        assert_eq!(differences.len(), 1);
        assert_eq!(
            differences[0].reference_id,
            "M:Lib.Widget.Resize(System.Int32,System.Int32)$1"
        );
        assert_eq!(
            differences[0].message,
            "Parameter name on member 'M:Lib.Widget.Resize(System.Int32,System.Int32)' changed from 'height' to 'h'"
        );
    }
}
