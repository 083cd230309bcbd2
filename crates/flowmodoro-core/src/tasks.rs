//! Ordered, user-reorderable task list.
//!
//! Persisted as a JSON array of strings under the `tasks` key.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::storage::{load_json, save_json, KvStore, TASKS_KEY};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the persisted list as stored. Missing or malformed data gives an
    /// empty list.
    pub fn load(store: &impl KvStore) -> Self {
        let texts: Vec<String> = load_json(store, TASKS_KEY).unwrap_or_default();
        Self {
            tasks: texts.into_iter().map(|text| Task { text }).collect(),
        }
    }

    /// # Errors
    /// Returns an error if the store rejects the write.
    pub fn save(&self, store: &impl KvStore) -> Result<()> {
        let texts: Vec<&str> = self.tasks.iter().map(|t| t.text.as_str()).collect();
        save_json(store, TASKS_KEY, &texts)
    }

    /// Append a task. Blank text is ignored; returns whether a task was added.
    pub fn add(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.tasks.push(Task { text: text.into() });
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<Task> {
        if index < self.tasks.len() {
            Some(self.tasks.remove(index))
        } else {
            None
        }
    }

    /// Rearrange so that position `i` holds the task previously at `order[i]`.
    ///
    /// # Errors
    /// Returns an error, leaving the list untouched, unless `order` is a
    /// permutation of `0..len`.
    pub fn reorder(&mut self, order: &[usize]) -> Result<(), ValidationError> {
        let len = self.tasks.len();
        let mut seen = vec![false; len];
        let is_permutation = order.len() == len
            && order.iter().all(|&i| match seen.get_mut(i) {
                Some(slot) if !*slot => {
                    *slot = true;
                    true
                }
                _ => false,
            });
        if !is_permutation {
            return Err(ValidationError::NotAPermutation {
                collection: "tasks".into(),
                len,
            });
        }
        let reordered = order.iter().map(|&i| self.tasks[i].clone()).collect();
        self.tasks = reordered;
        Ok(())
    }

    /// Drag one task from `from` to `to`.
    ///
    /// # Errors
    /// Returns an error if either index is out of bounds.
    pub fn move_task(&mut self, from: usize, to: usize) -> Result<(), ValidationError> {
        let len = self.tasks.len();
        for index in [from, to] {
            if index >= len {
                return Err(ValidationError::OutOfBounds {
                    collection: "tasks".into(),
                    index,
                    len,
                });
            }
        }
        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        Ok(())
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn texts(list: &TaskList) -> Vec<&str> {
        list.tasks().iter().map(|t| t.text.as_str()).collect()
    }

    fn list_of(items: &[&str]) -> TaskList {
        let mut list = TaskList::new();
        for item in items {
            list.add(item);
        }
        list
    }

    #[test]
    fn add_trims_and_ignores_blank() {
        let mut list = TaskList::new();
        assert!(list.add("  write report  "));
        assert!(!list.add("   "));
        assert!(!list.add(""));
        assert_eq!(texts(&list), vec!["write report"]);
    }

    #[test]
    fn duplicates_allowed() {
        let list = list_of(&["a", "a"]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn remove_by_index() {
        let mut list = list_of(&["a", "b", "c"]);
        assert_eq!(list.remove(1).map(|t| t.text), Some("b".to_string()));
        assert!(list.remove(5).is_none());
        assert_eq!(texts(&list), vec!["a", "c"]);
    }

    #[test]
    fn reorder_applies_permutation() {
        let mut list = list_of(&["a", "b", "c"]);
        list.reorder(&[2, 0, 1]).unwrap();
        assert_eq!(texts(&list), vec!["c", "a", "b"]);
    }

    #[test]
    fn reorder_rejects_non_permutation() {
        let mut list = list_of(&["a", "b", "c"]);
        assert!(list.reorder(&[0, 0, 1]).is_err());
        assert!(list.reorder(&[0, 1]).is_err());
        assert!(list.reorder(&[0, 1, 3]).is_err());
        assert_eq!(texts(&list), vec!["a", "b", "c"]);
    }

    #[test]
    fn move_task_drags() {
        let mut list = list_of(&["a", "b", "c"]);
        list.move_task(0, 2).unwrap();
        assert_eq!(texts(&list), vec!["b", "c", "a"]);
        assert_eq!(
            list.move_task(3, 0),
            Err(ValidationError::OutOfBounds {
                collection: "tasks".into(),
                index: 3,
                len: 3
            })
        );
    }

    #[test]
    fn persist_roundtrip() {
        let store = MemoryStore::new();
        let list = list_of(&["b", "a", "b"]);
        list.save(&store).unwrap();
        assert_eq!(
            store.get(TASKS_KEY).unwrap().as_deref(),
            Some(r#"["b","a","b"]"#)
        );
        assert_eq!(TaskList::load(&store), list);
    }

    #[test]
    fn load_keeps_stored_text_verbatim() {
        let store = MemoryStore::new();
        store.set(TASKS_KEY, r#"["  padded  ",""]"#).unwrap();
        let list = TaskList::load(&store);
        assert_eq!(texts(&list), vec!["  padded  ", ""]);
        list.save(&store).unwrap();
        assert_eq!(
            store.get(TASKS_KEY).unwrap().as_deref(),
            Some(r#"["  padded  ",""]"#)
        );
    }

    #[test]
    fn malformed_tasks_load_empty() {
        let store = MemoryStore::new();
        store.set(TASKS_KEY, "[1, 2").unwrap();
        assert!(TaskList::load(&store).is_empty());
    }
}
