use crate::Validator;
use models::{value_type, Severity, ValidationIssue};
use serde_yaml::Value;

/// Range and sign checks for a single number.
///
/// Only a non-number or a non-finite number stops evaluation; every other
/// rule is checked independently, so one value can collect several issues.
#[derive(Debug, Clone)]
pub struct NumericValidator {
    strict: bool,
    min_value: Option<f64>,
    max_value: Option<f64>,
    allow_negative: bool,
    allow_zero: bool,
    integer_only: bool,
}

impl Default for NumericValidator {
    fn default() -> Self {
        NumericValidator {
            strict: false,
            min_value: None,
            max_value: None,
            allow_negative: true,
            allow_zero: true,
            integer_only: false,
        }
    }
}

impl NumericValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn min_value(mut self, min: impl Into<f64>) -> Self {
        self.min_value = Some(min.into());
        self
    }

    pub fn max_value(mut self, max: impl Into<f64>) -> Self {
        self.max_value = Some(max.into());
        self
    }

    /// Shorthand for an inclusive `[min, max]` range.
    pub fn range(self, min: impl Into<f64>, max: impl Into<f64>) -> Self {
        self.min_value(min).max_value(max)
    }

    pub fn allow_negative(mut self, allow: bool) -> Self {
        self.allow_negative = allow;
        self
    }

    pub fn allow_zero(mut self, allow: bool) -> Self {
        self.allow_zero = allow;
        self
    }

    pub fn integer_only(mut self, integer_only: bool) -> Self {
        self.integer_only = integer_only;
        self
    }
}

impl Validator for NumericValidator {
    fn is_strict(&self) -> bool {
        self.strict
    }

    fn check(&self, data: &Value, issues: &mut Vec<ValidationIssue>) {
        let (number, value) = match data {
            // Unrepresentable numbers fall through to the finiteness check
            Value::Number(n) => (n, n.as_f64().unwrap_or(f64::NAN)),
            other => {
                issues.push(
                    ValidationIssue::new(
                        Severity::Error,
                        format!("Value must be numeric, got {}", value_type(other)),
                    )
                    .with_value(other.clone())
                    .with_suggestion("Use a numeric value (integer or float)")
                    .with_code("numeric.type"),
                );
                return;
            }
        };

        if !value.is_finite() {
            issues.push(
                ValidationIssue::new(Severity::Error, format!("Value must be finite, got {}", value))
                    .with_value(data.clone())
                    .with_suggestion("Use a finite numeric value")
                    .with_code("numeric.not_finite"),
            );
            return;
        }

        if self.integer_only && number.is_f64() && value.fract() != 0.0 {
            issues.push(
                ValidationIssue::new(
                    Severity::Warning,
                    format!("Expected integer value, got float {}", value),
                )
                .with_value(data.clone())
                .with_suggestion("Use an integer value")
                .with_code("numeric.not_integer"),
            );
        }

        if !self.allow_negative && value < 0.0 {
            issues.push(
                ValidationIssue::new(
                    Severity::Error,
                    format!("Negative values not allowed, got {}", value),
                )
                .with_value(data.clone())
                .with_suggestion("Use a non-negative value")
                .with_code("numeric.negative"),
            );
        }

        if !self.allow_zero && value == 0.0 {
            issues.push(
                ValidationIssue::new(Severity::Error, "Zero value not allowed")
                    .with_value(data.clone())
                    .with_suggestion("Use a non-zero value")
                    .with_code("numeric.zero"),
            );
        }

        if let Some(min) = self.min_value {
            if value < min {
                issues.push(
                    ValidationIssue::new(
                        Severity::Warning,
                        format!("Value {} below minimum {}", value, min),
                    )
                    .with_value(data.clone())
                    .with_suggestion(format!("Use value >= {}", min))
                    .with_code("numeric.below_min"),
                );
            }
        }

        if let Some(max) = self.max_value {
            if value > max {
                issues.push(
                    ValidationIssue::new(
                        Severity::Warning,
                        format!("Value {} above maximum {}", value, max),
                    )
                    .with_value(data.clone())
                    .with_suggestion(format!("Use value <= {}", max))
                    .with_code("numeric.above_max"),
                );
            }
        }
    }
}
