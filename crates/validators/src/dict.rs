use crate::Validator;
use indexmap::IndexMap;
use models::{key_label, value_type, Severity, ValidationIssue};
use serde_yaml::Value;

/// Checks a mapping's keys and delegates selected values to nested validators.
///
/// Missing required fields, unexpected fields, and per-field validation are
/// three independent passes over the same mapping. A field validator whose
/// key is absent is skipped; absence is only reported through
/// `required_fields`.
#[derive(Debug)]
pub struct DictValidator {
    strict: bool,
    required_fields: Vec<String>,
    optional_fields: Vec<String>,
    field_validators: IndexMap<String, Box<dyn Validator>>,
    allow_extra_fields: bool,
}

impl Default for DictValidator {
    fn default() -> Self {
        DictValidator {
            strict: false,
            required_fields: Vec::new(),
            optional_fields: Vec::new(),
            field_validators: IndexMap::new(),
            allow_extra_fields: true,
        }
    }
}

impl DictValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn required_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn optional_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.optional_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Registers `validator` for the value under `field`. Validators run in
    /// registration order; registering a field twice replaces the validator.
    pub fn field_validator(
        mut self,
        field: impl Into<String>,
        validator: impl Validator + 'static,
    ) -> Self {
        self.field_validators.insert(field.into(), Box::new(validator));
        self
    }

    pub fn allow_extra_fields(mut self, allow: bool) -> Self {
        self.allow_extra_fields = allow;
        self
    }

    fn is_declared(&self, key: &Value) -> bool {
        match key.as_str() {
            Some(key) => self
                .required_fields
                .iter()
                .chain(&self.optional_fields)
                .any(|field| field == key),
            None => false,
        }
    }
}

impl Validator for DictValidator {
    fn is_strict(&self) -> bool {
        self.strict
    }

    fn check(&self, data: &Value, issues: &mut Vec<ValidationIssue>) {
        let mapping = match data {
            Value::Mapping(mapping) => mapping,
            other => {
                issues.push(
                    ValidationIssue::new(
                        Severity::Error,
                        format!("Expected mapping, got {}", value_type(other)),
                    )
                    .with_value(other.clone())
                    .with_suggestion("Use a mapping of field names to values")
                    .with_code("dict.type"),
                );
                return;
            }
        };

        for field in &self.required_fields {
            if !mapping.contains_key(field.as_str()) {
                issues.push(
                    ValidationIssue::new(
                        Severity::Error,
                        format!("Required field '{}' missing", field),
                    )
                    .with_field(field.clone())
                    .with_suggestion(format!("Add '{}' field to mapping", field))
                    .with_code("dict.missing_field"),
                );
            }
        }

        if !self.allow_extra_fields {
            for (key, value) in mapping {
                if self.is_declared(key) {
                    continue;
                }
                let label = key_label(key);
                issues.push(
                    ValidationIssue::new(
                        Severity::Warning,
                        format!("Unexpected field '{}'", label),
                    )
                    .with_field(label)
                    .with_value(value.clone())
                    .with_suggestion("Remove unexpected field or add to optional_fields")
                    .with_code("dict.unexpected_field"),
                );
            }
        }

        for (field, validator) in &self.field_validators {
            if let Some(value) = mapping.get(field.as_str()) {
                issues.extend(
                    validator
                        .validate(value)
                        .into_issues()
                        .into_iter()
                        .map(|issue| issue.nested_under(field)),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ListValidator, NumericValidator, PositionValidator};

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    fn fields(validator: &DictValidator, data: &str) -> Vec<String> {
        validator
            .validate(&yaml(data))
            .into_issues()
            .into_iter()
            .filter_map(|issue| issue.field)
            .collect()
    }

    #[test]
    fn test_nested_critical_is_rooted_at_key() {
        let validator = DictValidator::new()
            .required_fields(["type", "position"])
            .field_validator("position", PositionValidator::new());
        let result = validator.validate(&yaml("{type: tank, position: [1, 2]}"));

        assert!(!result.is_valid());
        assert_eq!(result.critical_count(), 1);
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.issues()[0].field.as_deref(), Some("position"));
    }

    #[test]
    fn test_missing_required_fields_one_issue_each() {
        let validator = DictValidator::new().required_fields(["type", "position", "heading"]);
        assert_eq!(fields(&validator, "{type: tank}"), vec!["position", "heading"]);

        let result = validator.validate(&yaml("{}"));
        assert_eq!(result.errors_count(), 3);
        assert_eq!(result.issues()[0].message, "Required field 'type' missing");
    }

    #[test]
    fn test_missing_field_with_validator_not_duplicated() {
        let validator = DictValidator::new()
            .required_fields(["heading"])
            .field_validator("heading", NumericValidator::new());
        let result = validator.validate(&yaml("{}"));
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.issues()[0].code.as_deref(), Some("dict.missing_field"));
    }

    #[test]
    fn test_extra_fields_warn_when_disallowed() {
        let validator = DictValidator::new()
            .required_fields(["type"])
            .optional_fields(["skill"])
            .allow_extra_fields(false);
        let result = validator.validate(&yaml("{type: tank, skill: 1, colour: green, 7: x}"));

        assert!(result.is_valid());
        assert_eq!(result.warnings_count(), 2);
        assert_eq!(result.issues()[0].field.as_deref(), Some("colour"));
        assert_eq!(result.issues()[0].value, Some(yaml("green")));
        assert_eq!(result.issues()[1].field.as_deref(), Some("7"));
    }

    #[test]
    fn test_extra_fields_allowed_by_default() {
        let validator = DictValidator::new().required_fields(["type"]);
        assert!(validator
            .validate(&yaml("{type: tank, colour: green}"))
            .issues()
            .is_empty());
    }

    #[test]
    fn test_not_a_mapping_stops() {
        let validator = DictValidator::new().required_fields(["type"]);
        let result = validator.validate(&yaml("[type]"));
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.issues()[0].message, "Expected mapping, got sequence");
        assert_eq!(result.issues()[0].field, None);
    }

    #[test]
    fn test_all_passes_run_in_order() {
        let validator = DictValidator::new()
            .required_fields(["type", "fuel"])
            .optional_fields(["waypoints"])
            .allow_extra_fields(false)
            .field_validator("fuel", NumericValidator::new().range(0, 1))
            .field_validator(
                "waypoints",
                ListValidator::new().element_validator(PositionValidator::new()),
            );
        let found = fields(
            &validator,
            "{fuel: 2, waypoints: [[0, 0, 0], [1, 1]], extra: true}",
        );
        assert_eq!(found, vec!["type", "extra", "fuel", "waypoints.[1]"]);
    }
}
