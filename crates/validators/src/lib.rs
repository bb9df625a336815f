// validators crate

mod composite;
mod dict;
mod list;
mod numeric;
mod position;
pub mod presets;
mod value;

pub use composite::CompositeValidator;
pub use dict::DictValidator;
pub use list::ListValidator;
pub use numeric::NumericValidator;
pub use position::{Bounds, PositionValidator};
pub use presets::{airbase_validator, mission_validator, unit_validator, RecordKind};

use models::{ValidationIssue, ValidationResult};
use serde_yaml::Value;
use std::fmt;

/// Common contract of every validator.
///
/// Implementors only describe their checks in [`Validator::check`]; the
/// provided [`Validator::validate`] collects the issues of one call into a
/// fresh buffer and turns them into a [`ValidationResult`]. Validators hold
/// no per-call state, so one instance can be shared freely.
pub trait Validator: fmt::Debug + Send + Sync {
    /// Whether warnings count as errors in results built by this validator.
    fn is_strict(&self) -> bool;

    /// Appends every issue found in `data` to `issues`, in discovery order.
    fn check(&self, data: &Value, issues: &mut Vec<ValidationIssue>);

    fn validate(&self, data: &Value) -> ValidationResult {
        let mut issues = Vec::new();
        self.check(data, &mut issues);
        ValidationResult::from_issues(issues, self.is_strict())
    }
}
