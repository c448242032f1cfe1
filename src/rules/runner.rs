use crate::{
    mapping::{AssemblyMapper, ElementSide, TypeMapper},
    rules::{CompatDifference, ComparisonOptions, Rule, RuleContext, RuleFactory, RuleSettings},
};

/// Walks a mapper tree and applies every registered rule to every active pair.
pub struct RuleRunner {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRunner {
    /// Runner with the built-in rules enabled by `settings`.
    #[must_use]
    pub fn new(settings: &RuleSettings) -> Self {
        Self::with_rules(RuleFactory::create_rules(settings))
    }

    /// Runner with an explicit rule set.
    #[must_use]
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Names of the registered rules, in invocation order.
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name())
    }

    /// Run every rule over `mapper`.
    ///
    /// # Returns
    ///
    /// One list of differences per right input, in right order. Within a list, differences
    /// follow tree order: assembly, then each type followed by its members and nested types.
    #[must_use]
    pub fn run(
        &self,
        mapper: &AssemblyMapper<'_>,
        options: ComparisonOptions,
    ) -> Vec<Vec<CompatDifference>> {
        let right_count = mapper.right_count();
        let mut differences = vec![Vec::new(); right_count];

        let Some(left) = mapper.element().slot(ElementSide::Left) else {
            return differences;
        };

        let contexts: Vec<Option<RuleContext<'_>>> = (0..right_count)
            .map(|index| {
                mapper
                    .element()
                    .slot(ElementSide::Right(index))
                    .map(|right| RuleContext::new(left.metadata, right.metadata, index, options))
            })
            .collect();
        let active: Vec<bool> = contexts.iter().map(Option::is_some).collect();

        for (index, context) in contexts.iter().enumerate() {
            let Some(context) = context else {
                continue;
            };
            for rule in &self.rules {
                rule.compare_assemblies(mapper.pair(index), context, &mut differences[index]);
            }
        }

        for namespace in mapper.namespaces() {
            for ty in namespace.types() {
                self.visit_type(ty, &contexts, &active, &mut differences);
            }
        }

        differences
    }

    fn visit_type(
        &self,
        ty: &TypeMapper<'_>,
        contexts: &[Option<RuleContext<'_>>],
        active: &[bool],
        differences: &mut [Vec<CompatDifference>],
    ) {
        let mut descend = vec![false; active.len()];

        for (index, context) in contexts.iter().enumerate() {
            let Some(context) = context.as_ref().filter(|_| active[index]) else {
                continue;
            };

            let pair = ty.pair(index);
            for rule in &self.rules {
                rule.compare_types(pair, context, &mut differences[index]);
            }
            descend[index] = ty.should_diff_members(index);
        }

        if !descend.contains(&true) {
            return;
        }

        for member in ty.members() {
            for (index, context) in contexts.iter().enumerate() {
                let Some(context) = context.as_ref().filter(|_| descend[index]) else {
                    continue;
                };

                let pair = member.pair(index);
                let containing = ty.pair(index);
                for rule in &self.rules {
                    rule.compare_members(pair, containing, context, &mut differences[index]);
                }
            }
        }

        for nested in ty.nested_types() {
            self.visit_type(nested, contexts, &descend, differences);
        }
    }
}

impl std::fmt::Debug for RuleRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRunner")
            .field("rules", &self.rule_names().collect::<Vec<_>>())
            .finish()
    }
}
