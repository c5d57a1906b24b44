use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{ResourceKind, ServiceError};
use crate::models::*;

use super::ids::{IdGenerator, SequentialIds};
use super::repository::{lock, Repository};

const MIN_CAPACITY: u32 = 1;
const MAX_CAPACITY: u32 = 10;

/// Owns the rocket records. Cloning yields another handle to the same data.
#[derive(Clone)]
pub struct RocketCatalog {
    rockets: Arc<Mutex<Repository<Rocket>>>,
    ids: Arc<dyn IdGenerator>,
}

impl Default for RocketCatalog {
    fn default() -> Self {
        Self::new(Arc::new(SequentialIds::new("rocket")))
    }
}

impl RocketCatalog {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            rockets: Arc::new(Mutex::new(Repository::new())),
            ids,
        }
    }

    /// Exclusive access to the rocket records.
    ///
    /// Held by [`LaunchSchedule`](super::LaunchSchedule) across validation
    /// and commit so a rocket's capacity cannot change underneath it.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Repository<Rocket>> {
        lock(&self.rockets)
    }

    pub fn create(&self, input: RocketInput) -> Result<Rocket, ValidationErrors> {
        tracing::info!(name = input.name.as_value().map(String::as_str), "Creating rocket");
        let fields = validate(RocketDraft {
            name: input.name.into_option(),
            range: input.range.into_option(),
            capacity: input.capacity.into_option(),
        })
        .inspect_err(|errors| tracing::warn!(%errors, "Rocket validation failed"))?;

        let mut rockets = self.lock();
        let id = next_free_id(self.ids.as_ref(), &rockets);
        let rocket = fields.into_rocket(id);
        rockets.insert(rocket.id.clone(), rocket.clone());

        tracing::info!(id = %rocket.id, "Rocket created");
        Ok(rocket)
    }

    pub fn list(&self) -> Vec<Rocket> {
        let rockets = self.lock().values();
        tracing::debug!(count = rockets.len(), "Listed rockets");
        rockets
    }

    pub fn get_by_id(&self, id: &str) -> Option<Rocket> {
        let rocket = self.lock().get(id).cloned();
        if rocket.is_none() {
            tracing::warn!(id, "Rocket not found");
        }
        rocket
    }

    pub fn update(&self, id: &str, input: RocketInput) -> Result<Rocket, ServiceError> {
        tracing::info!(id, "Updating rocket");
        let mut rockets = self.lock();
        let Some(existing) = rockets.get(id).cloned() else {
            tracing::warn!(id, "Rocket not found for update");
            return Err(ServiceError::NotFound(ResourceKind::Rocket));
        };

        let fields = validate(RocketDraft {
            name: input.name.merge(existing.name),
            range: input.range.merge(existing.range.as_str().to_string()),
            capacity: input.capacity.merge(f64::from(existing.capacity)),
        })
        .inspect_err(|errors| tracing::warn!(id, %errors, "Rocket validation failed on update"))?;

        let rocket = fields.into_rocket(existing.id);
        rockets.insert(rocket.id.clone(), rocket.clone());

        tracing::info!(id, "Rocket updated");
        Ok(rocket)
    }

    /// Remove a rocket. Launches that reference it are left in place and
    /// fail validation on their next update.
    pub fn delete(&self, id: &str) -> bool {
        let deleted = self.lock().remove(id).is_some();
        if deleted {
            tracing::info!(id, "Rocket deleted");
        } else {
            tracing::warn!(id, "Rocket not found for deletion");
        }
        deleted
    }
}

/// Draw ids until one is not already in use.
pub(crate) fn next_free_id<V: Clone>(ids: &dyn IdGenerator, repo: &Repository<V>) -> String {
    loop {
        let id = ids.next_id();
        if !repo.contains(&id) {
            return id;
        }
    }
}

/// A create request or a merged update, before validation.
struct RocketDraft {
    name: Option<String>,
    range: Option<String>,
    capacity: Option<f64>,
}

struct ValidRocket {
    name: String,
    range: RocketRange,
    capacity: u32,
}

impl ValidRocket {
    fn into_rocket(self, id: String) -> Rocket {
        Rocket {
            id,
            name: self.name,
            range: self.range,
            capacity: self.capacity,
        }
    }
}

fn validate(draft: RocketDraft) -> Result<ValidRocket, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = draft.name.as_deref().and_then(non_blank).map(str::to_string);
    if name.is_none() {
        errors.push("name", "Name is required");
    }

    let range = match draft.range.as_deref() {
        None => {
            errors.push("range", "Range is required");
            None
        }
        Some(raw) => {
            let range = RocketRange::from_str(raw);
            if range.is_none() {
                let valid: Vec<_> = RocketRange::ALL.iter().map(RocketRange::as_str).collect();
                errors.push("range", format!("Range must be one of: {}", valid.join(", ")));
            }
            range
        }
    };

    let capacity = match draft.capacity {
        None => {
            errors.push("capacity", "Capacity is required");
            None
        }
        Some(c)
            if is_integer(c)
                && c >= f64::from(MIN_CAPACITY)
                && c <= f64::from(MAX_CAPACITY) =>
        {
            Some(c as u32)
        }
        Some(_) => {
            errors.push(
                "capacity",
                format!(
                    "Capacity must be an integer between {} and {} (inclusive)",
                    MIN_CAPACITY, MAX_CAPACITY
                ),
            );
            None
        }
    };

    match (name, range, capacity) {
        (Some(name), Some(range), Some(capacity)) => Ok(ValidRocket {
            name,
            range,
            capacity,
        }),
        _ => Err(errors),
    }
}
