use crate::value::has_duplicates;
use crate::Validator;
use models::{value_type, Severity, ValidationIssue};
use serde_yaml::Value;

/// Checks a sequence's length and uniqueness, and optionally every element.
#[derive(Debug)]
pub struct ListValidator {
    strict: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
    element_validator: Option<Box<dyn Validator>>,
    allow_empty: bool,
    unique_elements: bool,
}

impl Default for ListValidator {
    fn default() -> Self {
        ListValidator {
            strict: false,
            min_length: None,
            max_length: None,
            element_validator: None,
            allow_empty: true,
            unique_elements: false,
        }
    }
}

impl ListValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    pub fn unique_elements(mut self, unique: bool) -> Self {
        self.unique_elements = unique;
        self
    }

    /// Validator run against every element; its issues are re-rooted at `[i]`.
    pub fn element_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.element_validator = Some(Box::new(validator));
        self
    }
}

impl Validator for ListValidator {
    fn is_strict(&self) -> bool {
        self.strict
    }

    fn check(&self, data: &Value, issues: &mut Vec<ValidationIssue>) {
        let items = match data {
            Value::Sequence(items) => items,
            other => {
                issues.push(
                    ValidationIssue::new(
                        Severity::Error,
                        format!("Expected sequence, got {}", value_type(other)),
                    )
                    .with_value(other.clone())
                    .with_suggestion("Use a list")
                    .with_code("list.type"),
                );
                return;
            }
        };

        let length = items.len();

        if !self.allow_empty && length == 0 {
            issues.push(
                ValidationIssue::new(Severity::Error, "Empty list not allowed")
                    .with_value(data.clone())
                    .with_suggestion("Provide at least one element")
                    .with_code("list.empty"),
            );
        }

        if let Some(min) = self.min_length {
            if length < min {
                issues.push(
                    ValidationIssue::new(
                        Severity::Warning,
                        format!("List length {} below minimum {}", length, min),
                    )
                    .with_value(data.clone())
                    .with_suggestion(format!("Provide at least {} elements", min))
                    .with_code("list.too_short"),
                );
            }
        }

        if let Some(max) = self.max_length {
            if length > max {
                issues.push(
                    ValidationIssue::new(
                        Severity::Warning,
                        format!("List length {} above maximum {}", length, max),
                    )
                    .with_value(data.clone())
                    .with_suggestion(format!("Use at most {} elements", max))
                    .with_code("list.too_long"),
                );
            }
        }

        if self.unique_elements && has_duplicates(items) {
            issues.push(
                ValidationIssue::new(Severity::Warning, "List contains duplicate elements")
                    .with_value(data.clone())
                    .with_suggestion("Remove duplicate elements")
                    .with_code("list.duplicates"),
            );
        }

        if let Some(validator) = &self.element_validator {
            for (i, item) in items.iter().enumerate() {
                let prefix = format!("[{}]", i);
                issues.extend(
                    validator
                        .validate(item)
                        .into_issues()
                        .into_iter()
                        .map(|issue| issue.nested_under(&prefix)),
                );
            }
        }
    }
}
