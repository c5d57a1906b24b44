use serde::{Deserialize, Serialize};

use super::field::Field;

/// A vehicle template: a travel range class and a maximum passenger count.
///
/// Launches reference a rocket by `id` and derive their seat count from its
/// `capacity`. The rocket itself tracks no back-references to those launches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rocket {
    pub id: String,
    pub name: String,
    pub range: RocketRange,
    pub capacity: u32,
}

/// How far a rocket can travel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RocketRange {
    Suborbital,
    Orbital,
    Moon,
    Mars,
}

impl RocketRange {
    pub const ALL: [Self; 4] = [Self::Suborbital, Self::Orbital, Self::Moon, Self::Mars];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Suborbital => "suborbital",
            Self::Orbital => "orbital",
            Self::Moon => "moon",
            Self::Mars => "mars",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "suborbital" => Some(Self::Suborbital),
            "orbital" => Some(Self::Orbital),
            "moon" => Some(Self::Moon),
            "mars" => Some(Self::Mars),
            _ => None,
        }
    }
}

/// Request body for creating or updating a rocket.
///
/// On create every field is required. On update, omitted fields keep their
/// stored value and the merged result is validated as a whole. The range is
/// taken as a raw string so unknown values produce a field error rather than
/// a body-parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RocketInput {
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub range: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub capacity: Field<f64>,
}

impl RocketInput {
    /// A fully populated input, mainly for callers building requests in code.
    pub fn new(name: impl Into<String>, range: RocketRange, capacity: u32) -> Self {
        Self {
            name: Field::Value(name.into()),
            range: Field::Value(range.as_str().to_string()),
            capacity: Field::Value(f64::from(capacity)),
        }
    }
}
