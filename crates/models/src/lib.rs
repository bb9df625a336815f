use serde::{Serialize, Serializer};
use serde_yaml::value::TaggedValue;
use serde_yaml::Value;
use std::fmt;

/// How serious a single finding is.
///
/// The ordering only helps humans triage a report; validity is decided by
/// counting errors and critical issues, never by comparing severities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Info => "ℹ",
            Severity::Warning => "⚠",
            Severity::Error => "✗",
            Severity::Critical => "🔥",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One problem found while inspecting a value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,

    /// Human-readable description of the problem
    pub message: String,

    /// Location inside the inspected value, e.g. `objectives[0].position.x`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// The offending value, kept for diagnostics
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_value"
    )]
    pub value: Option<Value>,

    /// How to fix it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Stable machine-readable identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ValidationIssue {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        ValidationIssue {
            severity,
            message: message.into(),
            field: None,
            value: None,
            suggestion: None,
            code: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Re-roots the issue beneath `prefix`.
    ///
    /// An issue without a field ends up located at `prefix` itself; otherwise
    /// the existing path is appended after a dot. Everything else is kept.
    pub fn nested_under(mut self, prefix: &str) -> Self {
        self.field = Some(match self.field.take() {
            None => prefix.to_string(),
            Some(field) => format!("{}.{}", prefix, field),
        });
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity.label())?;
        if let Some(field) = &self.field {
            write!(f, " [{}]", field)?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Outcome of one `validate` call.
///
/// Counts reflect strict mode, the stored issues do not: in strict mode every
/// warning is counted as an error, but each issue keeps the severity it was
/// raised with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    is_valid: bool,
    issues: Vec<ValidationIssue>,
    warnings_count: usize,
    errors_count: usize,
    critical_count: usize,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::from_issues(Vec::new(), false)
    }
}

impl ValidationResult {
    pub fn from_issues(issues: Vec<ValidationIssue>, strict: bool) -> Self {
        let count = |severity: Severity| issues.iter().filter(|i| i.severity == severity).count();

        let mut warnings_count = count(Severity::Warning);
        let mut errors_count = count(Severity::Error);
        let critical_count = count(Severity::Critical);

        if strict {
            errors_count += warnings_count;
            warnings_count = 0;
        }

        ValidationResult {
            is_valid: errors_count == 0 && critical_count == 0,
            issues,
            warnings_count,
            errors_count,
            critical_count,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Issues in the order they were discovered.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }

    pub fn warnings_count(&self) -> usize {
        self.warnings_count
    }

    pub fn errors_count(&self) -> usize {
        self.errors_count
    }

    pub fn critical_count(&self) -> usize {
        self.critical_count
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings_count > 0
    }

    pub fn has_errors(&self) -> bool {
        self.errors_count > 0
    }

    pub fn has_critical(&self) -> bool {
        self.critical_count > 0
    }

    /// Issues raised with exactly `severity`, ignoring strict promotion.
    pub fn issues_by_severity(&self, severity: Severity) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .collect()
    }

    pub fn summary(&self) -> String {
        if self.is_valid {
            return "✓ Validation passed".to_string();
        }

        let mut parts = Vec::new();
        if self.critical_count > 0 {
            parts.push(format!("{} critical", self.critical_count));
        }
        if self.errors_count > 0 {
            parts.push(format!("{} errors", self.errors_count));
        }
        if self.warnings_count > 0 {
            parts.push(format!("{} warnings", self.warnings_count));
        }

        format!("✗ Validation failed: {}", parts.join(", "))
    }
}

/// Renders a mapping key for use in messages and field paths.
pub fn key_label(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| "<key>".to_string()),
    }
}

// Copy of `value` whose mapping keys are all strings, so that formats which
// only accept string keys (JSON) can still write it.
fn with_string_keys(value: &Value) -> Value {
    match value {
        Value::Sequence(items) => Value::Sequence(items.iter().map(with_string_keys).collect()),
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .iter()
                .map(|(key, value)| (Value::String(key_label(key)), with_string_keys(value)))
                .collect(),
        ),
        Value::Tagged(tagged) => Value::Tagged(Box::new(TaggedValue {
            tag: tagged.tag.clone(),
            value: with_string_keys(&tagged.value),
        })),
        other => other.clone(),
    }
}

fn serialize_value<S: Serializer>(value: &Option<Value>, serializer: S) -> Result<S::Ok, S::Error> {
    value.as_ref().map(with_string_keys).serialize(serializer)
}

/// Short type name of a dynamic value, used in "got <type>" messages.
pub fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(severity: Severity) -> ValidationIssue {
        ValidationIssue::new(severity, format!("{} issue", severity))
    }

    #[test]
    fn test_counts_and_validity() {
        let result = ValidationResult::from_issues(
            vec![
                issue(Severity::Info),
                issue(Severity::Warning),
                issue(Severity::Warning),
                issue(Severity::Error),
            ],
            false,
        );

        assert!(!result.is_valid());
        assert_eq!(result.warnings_count(), 2);
        assert_eq!(result.errors_count(), 1);
        assert_eq!(result.critical_count(), 0);
        assert!(result.has_warnings());
        assert!(result.has_errors());
        assert!(!result.has_critical());
    }

    #[test]
    fn test_warnings_alone_are_valid() {
        let result = ValidationResult::from_issues(vec![issue(Severity::Warning)], false);
        assert!(result.is_valid());
        assert_eq!(result.summary(), "✓ Validation passed");
    }

    #[test]
    fn test_strict_promotes_counts_only() {
        let issues = vec![issue(Severity::Warning), issue(Severity::Warning)];
        let result = ValidationResult::from_issues(issues.clone(), true);

        assert!(!result.is_valid());
        assert_eq!(result.warnings_count(), 0);
        assert_eq!(result.errors_count(), 2);
        assert_eq!(result.issues(), issues.as_slice());
        assert_eq!(result.issues_by_severity(Severity::Warning).len(), 2);
        assert!(result.issues_by_severity(Severity::Error).is_empty());
    }

    #[test]
    fn test_summary_lists_nonzero_buckets() {
        let result = ValidationResult::from_issues(
            vec![
                issue(Severity::Critical),
                issue(Severity::Warning),
                issue(Severity::Warning),
            ],
            false,
        );
        assert_eq!(
            result.summary(),
            "✗ Validation failed: 1 critical, 2 warnings"
        );
    }

    #[test]
    fn test_nested_under() {
        let bare = issue(Severity::Error).nested_under("position");
        assert_eq!(bare.field.as_deref(), Some("position"));

        let located = issue(Severity::Error)
            .with_field("position.x")
            .with_code("position.coordinate_type")
            .nested_under("[2]");
        assert_eq!(located.field.as_deref(), Some("[2].position.x"));
        assert_eq!(located.code.as_deref(), Some("position.coordinate_type"));
    }

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue::new(Severity::Critical, "Position must be a sequence")
            .with_field("units[1].position");
        assert_eq!(
            issue.to_string(),
            "CRITICAL [units[1].position]: Position must be a sequence"
        );
    }

    #[test]
    fn test_serialization_skips_empty_options() {
        let issue = ValidationIssue::new(Severity::Warning, "List contains duplicate elements");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["severity"], "warning");
        assert!(json.get("field").is_none());
        assert!(json.get("code").is_none());
    }

    #[test]
    fn test_value_with_non_string_keys_serializes_to_json() {
        let position: Value = serde_yaml::from_str("{~: 1, 7: {true: 3}, x: 2}").unwrap();
        let issue = ValidationIssue::new(Severity::Critical, "Position must be a sequence, got mapping")
            .with_value(position.clone());

        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["value"]["null"], 1);
        assert_eq!(json["value"]["7"]["true"], 3);
        assert_eq!(json["value"]["x"], 2);
        assert_eq!(issue.value, Some(position));
    }

    #[test]
    fn test_key_label() {
        assert_eq!(key_label(&Value::from("heading")), "heading");
        assert_eq!(key_label(&Value::from(42)), "42");
        assert_eq!(key_label(&Value::from(true)), "true");
        assert_eq!(key_label(&Value::Null), "null");
    }

    #[test]
    fn test_value_type_names() {
        assert_eq!(value_type(&Value::from(3)), "integer");
        assert_eq!(value_type(&Value::from(3.5)), "float");
        assert_eq!(value_type(&Value::from("x")), "string");
        assert_eq!(value_type(&Value::Null), "null");
    }
}
