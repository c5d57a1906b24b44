use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// An insertion-ordered, string-keyed collection of records.
///
/// Overwriting an existing key keeps its position; [`Repository::rekey`]
/// moves the record to the end, as a remove followed by an insert would.
#[derive(Debug)]
pub struct Repository<V> {
    records: HashMap<String, V>,
    order: Vec<String>,
}

impl<V> Default for Repository<V> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<V: Clone> Repository<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.records.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Insert or overwrite the record under `key`.
    pub fn insert(&mut self, key: String, value: V) {
        if self.records.insert(key.clone(), value).is_none() {
            self.order.push(key);
        }
    }

    /// Replace the record under `old` with `value` stored under `new`.
    pub fn rekey(&mut self, old: &str, new: String, value: V) {
        self.remove(old);
        self.insert(new, value);
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        let removed = self.records.remove(key)?;
        self.order.retain(|k| k != key);
        Some(removed)
    }

    /// All records in insertion order.
    pub fn values(&self) -> Vec<V> {
        self.order
            .iter()
            .filter_map(|k| self.records.get(k))
            .cloned()
            .collect()
    }
}

/// Lock a repository, recovering the data if a previous holder panicked.
pub(crate) fn lock<V>(repo: &Mutex<Repository<V>>) -> MutexGuard<'_, Repository<V>> {
    repo.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo_with(keys: &[&str]) -> Repository<String> {
        let mut repo = Repository::new();
        for k in keys {
            repo.insert(k.to_string(), k.to_uppercase());
        }
        repo
    }

    #[test]
    fn values_follow_insertion_order() {
        let repo = repo_with(&["b", "a", "c"]);
        assert_eq!(repo.values(), vec!["B", "A", "C"]);
    }

    #[test]
    fn overwrite_keeps_position() {
        let mut repo = repo_with(&["a", "b"]);
        repo.insert("a".to_string(), "A2".to_string());

        assert_eq!(repo.values(), vec!["A2", "B"]);
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn rekey_moves_record_to_the_end() {
        let mut repo = repo_with(&["a", "b"]);
        repo.rekey("a", "z".to_string(), "Z".to_string());

        assert!(!repo.contains("a"));
        assert_eq!(repo.get("z"), Some(&"Z".to_string()));
        assert_eq!(repo.values(), vec!["B", "Z"]);
    }

    #[test]
    fn remove_reports_whether_anything_was_removed() {
        let mut repo = repo_with(&["a"]);

        assert_eq!(repo.remove("a"), Some("A".to_string()));
        assert_eq!(repo.remove("a"), None);
        assert!(repo.is_empty());
    }
}
