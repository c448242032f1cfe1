use crate::rules::{
    AssemblyIdentityMustMatch, CannotAddAbstractMember, CannotAddMemberToInterface,
    CannotChangeParameterName, CannotReduceVisibility, CannotRemoveBaseTypeOrInterface,
    CannotSealType, MemberMustExist, Rule, RuleSettings, TypeMustExist,
};

/// Creates the built-in rule set.
pub struct RuleFactory;

impl RuleFactory {
    /// Every rule enabled by `settings`, in reporting order.
    #[must_use]
    pub fn create_rules(settings: &RuleSettings) -> Vec<Box<dyn Rule>> {
        let mut rules: Vec<Box<dyn Rule>> = vec![
            Box::new(AssemblyIdentityMustMatch),
            Box::new(TypeMustExist),
            Box::new(MemberMustExist),
            Box::new(CannotAddAbstractMember),
            Box::new(CannotAddMemberToInterface),
            Box::new(CannotRemoveBaseTypeOrInterface),
            Box::new(CannotSealType),
            Box::new(CannotReduceVisibility),
        ];

        if settings.enable_rule_cannot_change_parameter_name {
            rules.push(Box::new(CannotChangeParameterName));
        }

        rules
    }
}
