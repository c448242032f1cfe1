use crate::{
    mapping::ElementPair,
    rules::{CompatDifference, DiagnosticId, DifferenceType, Rule, RuleContext},
    symbols::AssemblySymbol,
};

/// Reports binding identity changes between the left and right assembly.
///
/// Name, culture and public key token must match; a strong-named left requires the same
/// token on the right, while gaining a token is only reported in strict mode. The right
/// version may not be lower than the left one, and in strict mode it may not differ at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssemblyIdentityMustMatch;

impl Rule for AssemblyIdentityMustMatch {
    fn name(&self) -> &'static str {
        "AssemblyIdentityMustMatch"
    }

    fn compare_assemblies(
        &self,
        pair: ElementPair<'_, AssemblySymbol>,
        context: &RuleContext<'_>,
        differences: &mut Vec<CompatDifference>,
    ) {
        let Some((left, right)) = pair.both() else {
            return;
        };
        let (left_id, right_id) = (&left.identity, &right.identity);
        let reference_id = left_id.display_name();
        let mut report = |message: String| {
            differences.push(CompatDifference::new(
                DiagnosticId::AssemblyIdentityMustMatch,
                DifferenceType::Changed,
                message,
                reference_id.clone(),
            ));
        };

        if !left_id.name.eq_ignore_ascii_case(&right_id.name) {
            report(format!(
                "Assembly name '{}' on {} does not match '{}' on {}",
                left_id.name,
                context.left_name(),
                right_id.name,
                context.right_name()
            ));
        }

        let same_culture = match (&left_id.culture, &right_id.culture) {
            (Some(l), Some(r)) => l.eq_ignore_ascii_case(r),
            (None, None) => true,
            _ => false,
        };
        if !same_culture {
            report(format!(
                "Assembly culture '{}' on {} does not match '{}' on {}",
                left_id.culture.as_deref().unwrap_or("neutral"),
                context.left_name(),
                right_id.culture.as_deref().unwrap_or("neutral"),
                context.right_name()
            ));
        }

        let token_changed = match left_id.public_key_token {
            Some(_) => left_id.public_key_token != right_id.public_key_token,
            None => context.strict_mode() && right_id.public_key_token.is_some(),
        };
        if token_changed {
            report(format!(
                "Assembly public key token '{}' on {} does not match '{}' on {}",
                left_id.public_key_token_string(),
                context.left_name(),
                right_id.public_key_token_string(),
                context.right_name()
            ));
        }

        if right_id.version < left_id.version {
            report(format!(
                "Assembly version '{}' on {} is lower than '{}' on {}",
                right_id.version,
                context.right_name(),
                left_id.version,
                context.left_name()
            ));
        } else if context.strict_mode() && right_id.version != left_id.version {
            report(format!(
                "Assembly version '{}' on {} does not match '{}' on {}",
                left_id.version,
                context.left_name(),
                right_id.version,
                context.right_name()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        rules::ComparisonOptions,
        symbols::{AssemblyIdentity, AssemblyVersion},
        test::{assembly, metadata},
    };

    fn run(left: &AssemblySymbol, right: &AssemblySymbol, options: ComparisonOptions) -> Vec<String> {
        let (left_info, right_info) = (metadata("v1"), metadata("v2"));
        let context = RuleContext::new(&left_info, &right_info, 0, options);
        let mut differences = Vec::new();
        AssemblyIdentityMustMatch.compare_assemblies(
            ElementPair::new(Some(left), Some(right)),
            &context,
            &mut differences,
        );
        differences.into_iter().map(|d| d.message).collect()
    }

    #[test]
    fn test_matching_identity() {
        let left = assembly("Lib", "1.0");
        let right = assembly("lib", "1.0");
        assert!(run(&left, &right, ComparisonOptions::strict()).is_empty());
    }

    #[test]
    fn test_version_rules() {
        let lower = assembly("Lib", "1.0");
        let higher = assembly("Lib", "2.0");

        assert!(run(&lower, &higher, ComparisonOptions::default()).is_empty());
        assert_eq!(
            run(&higher, &lower, ComparisonOptions::default()),
            vec!["Assembly version '1.0.0.0' on v2 is lower than '2.0.0.0' on v1"]
        );
        assert_eq!(run(&lower, &higher, ComparisonOptions::strict()).len(), 1);
    }

    #[test]
    fn test_name_culture_and_token() {
        let token = [0xb0, 0x3f, 0x5f, 0x7f, 0x11, 0xd5, 0x0a, 0x3a];
        let left = AssemblySymbol::new(
            AssemblyIdentity::new("Lib", AssemblyVersion::new(1, 0, 0, 0)).with_public_key_token(token),
        );
        let right = AssemblySymbol::new(
            AssemblyIdentity::new("Other", AssemblyVersion::new(1, 0, 0, 0)).with_culture("de-DE"),
        );

        let messages = run(&left, &right, ComparisonOptions::default());
        assert_eq!(messages.len(), 3);
        assert!(messages[0].starts_with("Assembly name 'Lib'"));
        assert!(messages[1].starts_with("Assembly culture 'neutral'"));
        assert!(messages[2].contains("'b03f5f7f11d50a3a'"));
    }

    #[test]
    fn test_gaining_token_is_strict_only() {
        let left = assembly("Lib", "1.0");
        let right = AssemblySymbol::new(
            AssemblyIdentity::new("Lib", AssemblyVersion::new(1, 0, 0, 0)).with_public_key_token([1; 8]),
        );

        assert!(run(&left, &right, ComparisonOptions::default()).is_empty());
        assert_eq!(run(&left, &right, ComparisonOptions::strict()).len(), 1);
    }
}
