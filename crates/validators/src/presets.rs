//! Ready-made validators for the record shapes consumed downstream.

use crate::{CompositeValidator, DictValidator, ListValidator, NumericValidator, PositionValidator};
use std::fmt;
use std::str::FromStr;

const MISSION_REQUIRED: &[&str] = &["map_name", "objectives"];
const MISSION_OPTIONAL: &[&str] = &["units", "weather", "time"];
const OBJECTIVE_REQUIRED: &[&str] = &["type", "position"];

const UNIT_REQUIRED: &[&str] = &["type", "position", "heading"];
const UNIT_OPTIONAL: &[&str] = &["fuel", "ammo", "skill"];

const AIRBASE_REQUIRED: &[&str] = &["position", "runway_heading", "runway_length"];
const AIRBASE_OPTIONAL: &[&str] = &["elevation", "facilities"];

pub fn mission_validator() -> CompositeValidator {
    let objective = DictValidator::new()
        .required_fields(OBJECTIVE_REQUIRED.iter().copied())
        .field_validator("position", PositionValidator::new());

    CompositeValidator::default().with(
        DictValidator::new()
            .required_fields(MISSION_REQUIRED.iter().copied())
            .optional_fields(MISSION_OPTIONAL.iter().copied())
            .field_validator(
                "objectives",
                ListValidator::new()
                    .min_length(1)
                    .element_validator(objective),
            ),
    )
}

pub fn unit_validator() -> CompositeValidator {
    CompositeValidator::default().with(
        DictValidator::new()
            .required_fields(UNIT_REQUIRED.iter().copied())
            .optional_fields(UNIT_OPTIONAL.iter().copied())
            .field_validator("position", PositionValidator::new())
            .field_validator("heading", NumericValidator::new().range(0, 360))
            .field_validator("fuel", NumericValidator::new().range(0, 1))
            .field_validator("skill", NumericValidator::new().range(0, 1)),
    )
}

pub fn airbase_validator() -> CompositeValidator {
    CompositeValidator::default().with(
        DictValidator::new()
            .required_fields(AIRBASE_REQUIRED.iter().copied())
            .optional_fields(AIRBASE_OPTIONAL.iter().copied())
            .field_validator("position", PositionValidator::new())
            .field_validator("runway_heading", NumericValidator::new().range(0, 360))
            .field_validator(
                "runway_length",
                NumericValidator::new()
                    .range(500, 5000)
                    .allow_negative(false),
            )
            .field_validator("elevation", NumericValidator::new().range(-500, 5000)),
    )
}

/// The record shapes with a preset validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Mission,
    Unit,
    Airbase,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [RecordKind::Mission, RecordKind::Unit, RecordKind::Airbase];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Mission => "mission",
            RecordKind::Unit => "unit",
            RecordKind::Airbase => "airbase",
        }
    }

    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            RecordKind::Mission => MISSION_REQUIRED,
            RecordKind::Unit => UNIT_REQUIRED,
            RecordKind::Airbase => AIRBASE_REQUIRED,
        }
    }

    pub fn optional_fields(&self) -> &'static [&'static str] {
        match self {
            RecordKind::Mission => MISSION_OPTIONAL,
            RecordKind::Unit => UNIT_OPTIONAL,
            RecordKind::Airbase => AIRBASE_OPTIONAL,
        }
    }

    pub fn validator(&self) -> CompositeValidator {
        match self {
            RecordKind::Mission => mission_validator(),
            RecordKind::Unit => unit_validator(),
            RecordKind::Airbase => airbase_validator(),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown record kind '{}', expected one of: mission, unit, airbase",
                    s
                )
            })
    }
}
