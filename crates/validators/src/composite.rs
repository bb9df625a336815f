use crate::Validator;
use models::ValidationIssue;
use serde_yaml::Value;

/// Runs several validators over the same value and concatenates their
/// issues in validator order. Field paths are left untouched and nothing is
/// deduplicated.
#[derive(Debug, Default)]
pub struct CompositeValidator {
    strict: bool,
    validators: Vec<Box<dyn Validator>>,
}

impl CompositeValidator {
    pub fn new(validators: Vec<Box<dyn Validator>>) -> Self {
        CompositeValidator {
            strict: false,
            validators,
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Validator for CompositeValidator {
    fn is_strict(&self) -> bool {
        self.strict
    }

    fn check(&self, data: &Value, issues: &mut Vec<ValidationIssue>) {
        for validator in &self.validators {
            issues.extend(validator.validate(data).into_issues());
        }
    }
}
