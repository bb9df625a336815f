use crate::value::as_number;
use crate::Validator;
use models::{value_type, Severity, ValidationIssue};
use serde_yaml::Value;

const AXES: [&str; 3] = ["x", "y", "z"];

/// Advisory box that positions are expected to fall within (inclusive).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Bounds {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64, min_z: f64, max_z: f64) -> Self {
        Bounds {
            min_x,
            max_x,
            min_y,
            max_y,
            min_z,
            max_z,
        }
    }

    fn axis(&self, index: usize) -> (f64, f64) {
        match index {
            0 => (self.min_x, self.max_x),
            1 => (self.min_y, self.max_y),
            _ => (self.min_z, self.max_z),
        }
    }
}

impl From<(f64, f64, f64, f64, f64, f64)> for Bounds {
    fn from(b: (f64, f64, f64, f64, f64, f64)) -> Self {
        Bounds::new(b.0, b.1, b.2, b.3, b.4, b.5)
    }
}

/// Checks that a value is an `[x, y, z]` point of finite numbers.
#[derive(Debug, Clone, Default)]
pub struct PositionValidator {
    strict: bool,
    bounds: Option<Bounds>,
}

impl PositionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn bounds(mut self, bounds: impl Into<Bounds>) -> Self {
        self.bounds = Some(bounds.into());
        self
    }
}

impl Validator for PositionValidator {
    fn is_strict(&self) -> bool {
        self.strict
    }

    fn check(&self, data: &Value, issues: &mut Vec<ValidationIssue>) {
        let coords = match data {
            Value::Sequence(coords) => coords,
            other => {
                issues.push(
                    ValidationIssue::new(
                        Severity::Critical,
                        format!("Position must be a sequence, got {}", value_type(other)),
                    )
                    .with_value(other.clone())
                    .with_suggestion("Use [x, y, z] format")
                    .with_code("position.type"),
                );
                return;
            }
        };

        if coords.len() != 3 {
            issues.push(
                ValidationIssue::new(
                    Severity::Critical,
                    format!(
                        "Position must have exactly 3 coordinates, got {}",
                        coords.len()
                    ),
                )
                .with_value(data.clone())
                .with_suggestion("Use [x, y, z] format with 3 coordinates")
                .with_code("position.arity"),
            );
            return;
        }

        // Finite coordinates, filled in as each one passes its checks
        let mut finite = [None; 3];

        for (i, coord) in coords.iter().enumerate() {
            let name = AXES[i];
            let number = match as_number(coord) {
                Some(number) => number,
                None => {
                    issues.push(
                        ValidationIssue::new(
                            Severity::Error,
                            format!(
                                "Coordinate {} must be numeric, got {}",
                                name,
                                value_type(coord)
                            ),
                        )
                        .with_field(format!("position.{}", name))
                        .with_value(coord.clone())
                        .with_suggestion("Use numeric values for coordinates")
                        .with_code("position.coordinate_type"),
                    );
                    continue;
                }
            };

            if number.is_finite() {
                finite[i] = Some(number);
            } else {
                issues.push(
                    ValidationIssue::new(
                        Severity::Error,
                        format!("Coordinate {} must be finite, got {}", name, number),
                    )
                    .with_field(format!("position.{}", name))
                    .with_value(coord.clone())
                    .with_suggestion("Use finite numeric values")
                    .with_code("position.coordinate_not_finite"),
                );
            }
        }

        let (Some(bounds), [Some(x), Some(y), Some(z)]) = (self.bounds, finite) else {
            return;
        };

        for (i, number) in [x, y, z].into_iter().enumerate() {
            let (min, max) = bounds.axis(i);
            if min <= number && number <= max {
                continue;
            }

            let name = AXES[i];
            issues.push(
                ValidationIssue::new(
                    Severity::Warning,
                    format!(
                        "{} coordinate {} outside bounds [{}, {}]",
                        name.to_uppercase(),
                        number,
                        min,
                        max
                    ),
                )
                .with_field(format!("position.{}", name))
                .with_value(coords[i].clone())
                .with_suggestion(format!(
                    "Use {} coordinate between {} and {}",
                    name.to_uppercase(),
                    min,
                    max
                ))
                .with_code("position.out_of_bounds"),
            );
        }
    }
}
