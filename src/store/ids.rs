use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use uuid::Uuid;

/// Source of record identifiers.
///
/// Identifiers must be unique for the life of the process and never reused,
/// even after the record that carried one is deleted.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// `prefix-1`, `prefix-2`, ... from a monotonic counter.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}

/// Random v4 UUIDs.
#[derive(Debug, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Which [`IdGenerator`] the services are built with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdStrategy {
    Sequential,
    #[default]
    Uuid,
}

impl IdStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Uuid => "uuid",
        }
    }

    /// Build a generator. `prefix` is only used by sequential ids.
    pub fn generator(&self, prefix: &str) -> Arc<dyn IdGenerator> {
        match self {
            Self::Sequential => Arc::new(SequentialIds::new(prefix)),
            Self::Uuid => Arc::new(RandomIds),
        }
    }
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "uuid" => Ok(Self::Uuid),
            other => Err(format!(
                "unknown id strategy '{}', expected 'sequential' or 'uuid'",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_count_up_per_prefix() {
        let ids = SequentialIds::new("rocket");
        assert_eq!(ids.next_id(), "rocket-1");
        assert_eq!(ids.next_id(), "rocket-2");
    }

    #[test]
    fn random_ids_are_uuids() {
        let id = RandomIds.next_id();
        assert!(Uuid::parse_str(&id).is_ok());
        assert_ne!(id, RandomIds.next_id());
    }

    #[test]
    fn strategy_parses_case_insensitively() {
        assert_eq!("Sequential".parse::<IdStrategy>(), Ok(IdStrategy::Sequential));
        assert_eq!(" uuid ".parse::<IdStrategy>(), Ok(IdStrategy::Uuid));
        assert!("counter".parse::<IdStrategy>().is_err());
    }
}
