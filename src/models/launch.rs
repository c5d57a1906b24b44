use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::field::Field;

/// A scheduled flight of one rocket.
///
/// `available_seats` is a snapshot of the referenced rocket's capacity taken
/// whenever the launch is created or updated. It is not kept in sync if the
/// rocket changes later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Launch {
    pub id: String,
    pub rocket_id: String,
    pub launch_date_time: DateTime<Utc>,
    pub price: f64,
    pub min_passengers: u32,
    pub available_seats: u32,
}

/// Request body for creating or updating a launch.
///
/// `rocket_id` may be changed on update; the launch is then re-validated
/// against the new rocket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchInput {
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub rocket_id: Field<String>,
    /// RFC 3339, or an offset-less `YYYY-MM-DDTHH:MM:SS` read as UTC.
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub launch_date_time: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub price: Field<f64>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub min_passengers: Field<f64>,
}

impl LaunchInput {
    pub fn new(
        rocket_id: impl Into<String>,
        launch_date_time: DateTime<Utc>,
        price: f64,
        min_passengers: u32,
    ) -> Self {
        Self {
            rocket_id: Field::Value(rocket_id.into()),
            launch_date_time: Field::Value(launch_date_time.to_rfc3339()),
            price: Field::Value(price),
            min_passengers: Field::Value(f64::from(min_passengers)),
        }
    }
}
