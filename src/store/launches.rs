use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{ResourceKind, ServiceError};
use crate::models::*;

use super::ids::IdGenerator;
use super::repository::{lock, Repository};
use super::rockets::{next_free_id, RocketCatalog};

/// Owns the launch records and reads rockets from a [`RocketCatalog`].
///
/// Every write locks the rocket records first and the launch records second,
/// and holds both until the change is committed.
#[derive(Clone)]
pub struct LaunchSchedule {
    rockets: RocketCatalog,
    launches: Arc<Mutex<Repository<Launch>>>,
    ids: Arc<dyn IdGenerator>,
}

impl LaunchSchedule {
    pub fn new(rockets: RocketCatalog, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            rockets,
            launches: Arc::new(Mutex::new(Repository::new())),
            ids,
        }
    }

    pub fn create(&self, input: LaunchInput) -> Result<Launch, ValidationErrors> {
        tracing::info!(rocket_id = input.rocket_id.as_value().map(String::as_str), "Creating launch");
        let rockets = self.rockets.lock();
        let mut launches = lock(&self.launches);

        let draft = LaunchDraft {
            rocket_id: input.rocket_id.into_option(),
            launch_date_time: input.launch_date_time.into_option(),
            price: input.price.into_option(),
            min_passengers: input.min_passengers.into_option(),
        };
        let fields = validate(&draft, &rockets, Utc::now())
            .inspect_err(|errors| tracing::warn!(%errors, "Launch validation failed"))?;

        let id = next_free_id(self.ids.as_ref(), &launches);
        let launch = fields.into_launch(id);
        launches.insert(launch.id.clone(), launch.clone());

        tracing::info!(id = %launch.id, rocket_id = %launch.rocket_id, "Launch created");
        Ok(launch)
    }

    pub fn list(&self) -> Vec<Launch> {
        let launches = lock(&self.launches).values();
        tracing::debug!(count = launches.len(), "Listed launches");
        launches
    }

    pub fn get_by_id(&self, id: &str) -> Option<Launch> {
        let launch = lock(&self.launches).get(id).cloned();
        if launch.is_none() {
            tracing::warn!(id, "Launch not found");
        }
        launch
    }

    /// Merge `input` over the stored launch and re-validate the result.
    ///
    /// `available_seats` is recomputed from the current capacity of the
    /// (possibly different) rocket the merged launch points at.
    pub fn update(&self, id: &str, input: LaunchInput) -> Result<Launch, ServiceError> {
        tracing::info!(id, "Updating launch");
        let rockets = self.rockets.lock();
        let mut launches = lock(&self.launches);

        let Some(existing) = launches.get(id).cloned() else {
            tracing::warn!(id, "Launch not found for update");
            return Err(ServiceError::NotFound(ResourceKind::Launch));
        };

        let draft = LaunchDraft {
            rocket_id: input.rocket_id.merge(existing.rocket_id),
            launch_date_time: input
                .launch_date_time
                .merge(existing.launch_date_time.to_rfc3339()),
            price: input.price.merge(existing.price),
            min_passengers: input
                .min_passengers
                .merge(f64::from(existing.min_passengers)),
        };
        let fields = validate(&draft, &rockets, Utc::now())
            .inspect_err(|errors| tracing::warn!(id, %errors, "Launch validation failed on update"))?;

        let launch = fields.into_launch(existing.id);
        launches.insert(launch.id.clone(), launch.clone());

        tracing::info!(id, available_seats = launch.available_seats, "Launch updated");
        Ok(launch)
    }

    pub fn delete(&self, id: &str) -> bool {
        let deleted = lock(&self.launches).remove(id).is_some();
        if deleted {
            tracing::info!(id, "Launch deleted");
        } else {
            tracing::warn!(id, "Launch not found for deletion");
        }
        deleted
    }
}

/// Parse an RFC 3339 timestamp, or an offset-less one taken as UTC.
pub fn parse_launch_date_time(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

struct LaunchDraft {
    rocket_id: Option<String>,
    launch_date_time: Option<String>,
    price: Option<f64>,
    min_passengers: Option<f64>,
}

struct ValidLaunch {
    rocket_id: String,
    launch_date_time: DateTime<Utc>,
    price: f64,
    min_passengers: u32,
    capacity: u32,
}

impl ValidLaunch {
    fn into_launch(self, id: String) -> Launch {
        Launch {
            id,
            rocket_id: self.rocket_id,
            launch_date_time: self.launch_date_time,
            price: self.price,
            min_passengers: self.min_passengers,
            available_seats: self.capacity,
        }
    }
}

fn validate(
    draft: &LaunchDraft,
    rockets: &Repository<Rocket>,
    now: DateTime<Utc>,
) -> Result<ValidLaunch, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let rocket = match draft.rocket_id.as_deref().filter(|id| non_blank(id).is_some()) {
        None => {
            errors.push("rocketId", "Rocket ID is required");
            None
        }
        Some(id) => {
            let rocket = rockets.get(id);
            if rocket.is_none() {
                errors.push("rocketId", "Rocket reference is invalid");
            }
            rocket
        }
    };

    let launch_date_time = match draft.launch_date_time.as_deref().and_then(non_blank) {
        None => {
            errors.push("launchDateTime", "Launch date and time is required");
            None
        }
        Some(raw) => match parse_launch_date_time(raw) {
            None => {
                errors.push(
                    "launchDateTime",
                    "Launch date and time must be a valid ISO 8601 format",
                );
                None
            }
            Some(dt) if dt <= now => {
                errors.push("launchDateTime", "Launch date and time must be in the future");
                None
            }
            Some(dt) => Some(dt),
        },
    };

    let price = match draft.price {
        None => {
            errors.push("price", "Price is required");
            None
        }
        Some(p) if p.is_finite() && p > 0.0 => Some(p),
        Some(_) => {
            errors.push("price", "Price must be a positive number");
            None
        }
    };

    let min_passengers = match (draft.min_passengers, rocket) {
        (None, _) => {
            errors.push("minPassengers", "Minimum passengers is required");
            None
        }
        (Some(m), Some(rocket)) => {
            if is_integer(m) && m >= 1.0 && m <= f64::from(rocket.capacity) {
                Some(m as u32)
            } else {
                errors.push(
                    "minPassengers",
                    format!(
                        "Minimum passengers must be an integer between 1 and {} (rocket capacity)",
                        rocket.capacity
                    ),
                );
                None
            }
        }
        // No capacity to bound against; only the rocket-independent checks apply.
        (Some(m), None) => {
            if !is_integer(m) {
                errors.push("minPassengers", "Minimum passengers must be an integer");
            } else if m < 1.0 {
                errors.push("minPassengers", "Minimum passengers must be at least 1");
            }
            None
        }
    };

    match (rocket, launch_date_time, price, min_passengers) {
        (Some(rocket), Some(launch_date_time), Some(price), Some(min_passengers)) => {
            Ok(ValidLaunch {
                rocket_id: rocket.id.clone(),
                launch_date_time,
                price,
                min_passengers,
                capacity: rocket.capacity,
            })
        }
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn rockets() -> Repository<Rocket> {
        let mut repo = Repository::new();
        repo.insert(
            "rocket-1".to_string(),
            Rocket {
                id: "rocket-1".to_string(),
                name: "Falcon".to_string(),
                range: RocketRange::Orbital,
                capacity: 5,
            },
        );
        repo
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap()
    }

    fn draft(rocket_id: Option<&str>, min_passengers: Option<f64>) -> LaunchDraft {
        LaunchDraft {
            rocket_id: rocket_id.map(str::to_string),
            launch_date_time: Some((now() + Duration::days(1)).to_rfc3339()),
            price: Some(199.99),
            min_passengers,
        }
    }

    fn messages(errors: &ValidationErrors) -> Vec<(&str, &str)> {
        errors
            .errors()
            .iter()
            .map(|e| (e.field.as_str(), e.message.as_str()))
            .collect()
    }

    #[test]
    fn seats_come_from_rocket_capacity() {
        let launch = validate(&draft(Some("rocket-1"), Some(5.0)), &rockets(), now()).unwrap();
        assert_eq!(launch.min_passengers, 5);
        assert_eq!(launch.capacity, 5);
    }

    #[test]
    fn min_passengers_above_capacity_names_the_bound() {
        let errors = validate(&draft(Some("rocket-1"), Some(6.0)), &rockets(), now())
            .err()
            .unwrap();
        assert_eq!(
            messages(&errors),
            vec![(
                "minPassengers",
                "Minimum passengers must be an integer between 1 and 5 (rocket capacity)"
            )]
        );
    }

    #[test]
    fn zero_passengers_with_a_resolved_rocket_is_a_single_error() {
        let errors = validate(&draft(Some("rocket-1"), Some(0.0)), &rockets(), now())
            .err()
            .unwrap();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn unknown_rocket_skips_the_capacity_check() {
        let errors = validate(&draft(Some("rocket-9"), Some(50.0)), &rockets(), now())
            .err()
            .unwrap();
        assert_eq!(
            messages(&errors),
            vec![("rocketId", "Rocket reference is invalid")]
        );
    }

    #[test]
    fn unknown_rocket_still_reports_one_min_passengers_error() {
        let errors = validate(&draft(Some("rocket-9"), Some(0.0)), &rockets(), now())
            .err()
            .unwrap();
        assert_eq!(
            messages(&errors),
            vec![
                ("rocketId", "Rocket reference is invalid"),
                ("minPassengers", "Minimum passengers must be at least 1"),
            ]
        );

        let errors = validate(&draft(Some("rocket-9"), Some(1.5)), &rockets(), now())
            .err()
            .unwrap();
        assert_eq!(errors.errors()[1].message, "Minimum passengers must be an integer");
    }

    #[test]
    fn empty_draft_reports_every_field_in_order() {
        let empty = LaunchDraft {
            rocket_id: None,
            launch_date_time: None,
            price: None,
            min_passengers: None,
        };
        let errors = validate(&empty, &rockets(), now()).err().unwrap();
        let fields: Vec<_> = errors.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["rocketId", "launchDateTime", "price", "minPassengers"]);
    }

    #[test]
    fn launch_time_must_be_strictly_in_the_future() {
        let mut at_now = draft(Some("rocket-1"), Some(1.0));
        at_now.launch_date_time = Some(now().to_rfc3339());
        let errors = validate(&at_now, &rockets(), now()).err().unwrap();
        assert_eq!(
            messages(&errors),
            vec![("launchDateTime", "Launch date and time must be in the future")]
        );
    }

    #[test]
    fn unparseable_launch_time_is_a_format_error() {
        let mut bad = draft(Some("rocket-1"), Some(1.0));
        bad.launch_date_time = Some("next tuesday".to_string());
        let errors = validate(&bad, &rockets(), now()).err().unwrap();
        assert_eq!(
            errors.errors()[0].message,
            "Launch date and time must be a valid ISO 8601 format"
        );
    }

    #[test]
    fn price_must_be_positive() {
        let mut free = draft(Some("rocket-1"), Some(1.0));
        free.price = Some(0.0);
        let errors = validate(&free, &rockets(), now()).err().unwrap();
        assert_eq!(
            messages(&errors),
            vec![("price", "Price must be a positive number")]
        );
    }

    #[test]
    fn parses_offsetless_timestamps_as_utc() {
        let parsed = parse_launch_date_time("2030-06-01T10:30:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2030, 6, 1, 10, 30, 0).unwrap());

        let parsed = parse_launch_date_time("2030-06-01T10:30:00.250Z").unwrap();
        assert_eq!(parsed.timestamp_subsec_millis(), 250);

        let parsed = parse_launch_date_time("2030-06-01T12:30:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2030, 6, 1, 10, 30, 0).unwrap());

        assert!(parse_launch_date_time("2030-13-01T10:30:00Z").is_none());
        assert!(parse_launch_date_time("2030-06-01").is_none());
    }
}
