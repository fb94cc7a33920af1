//! Today's ordered work plan.
//!
//! The schedule only stores task ids; every read resolves them against the
//! [`TaskStore`] and silently drops ids that no longer name an open task.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::task::{Task, TaskStore};

/// Ordered, duplicate-free sequence of task ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scheduler {
    order: Vec<String>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a persisted id list as-is. Call [`Scheduler::prune`] to drop
    /// stale entries.
    pub fn from_ids(order: Vec<String>) -> Self {
        Self { order }
    }

    pub fn ids(&self) -> &[String] {
        &self.order
    }

    pub fn contains(&self, id: &str) -> bool {
        self.order.iter().any(|s| s == id)
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Append an open task to the end of the schedule.
    ///
    /// Returns `false` when it was already scheduled.
    pub fn add(&mut self, id: &str, store: &TaskStore) -> Result<bool, ValidationError> {
        if !store.is_active(id) {
            return Err(ValidationError::TaskNotFound { id: id.to_string() });
        }
        if self.contains(id) {
            return Ok(false);
        }
        self.order.push(id.to_string());
        Ok(true)
    }

    /// Replace the whole order, keeping only the first occurrence of each
    /// open task id.
    pub fn set_order<I>(&mut self, ids: I, store: &TaskStore)
    where
        I: IntoIterator<Item = String>,
    {
        self.order = ids.into_iter().collect();
        self.prune(store);
    }

    /// Remove an id. Removing an absent id is fine.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.order.len();
        self.order.retain(|s| s != id);
        before != self.order.len()
    }

    /// Drop ids that are duplicated or no longer name an open task.
    pub fn prune(&mut self, store: &TaskStore) {
        let mut seen = HashSet::new();
        let before = self.order.len();
        self.order
            .retain(|id| store.is_active(id) && seen.insert(id.clone()));
        if before != self.order.len() {
            tracing::debug!(dropped = before - self.order.len(), "pruned stale schedule entries");
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// The task to work on now: the head of the schedule, if it is still open.
    pub fn current_task<'a>(&self, store: &'a TaskStore) -> Option<&'a Task> {
        self.order.first().and_then(|id| store.active_task(id))
    }

    /// Everything after the head, resolved.
    pub fn upcoming<'a>(&self, store: &'a TaskStore) -> Vec<&'a Task> {
        self.order
            .iter()
            .skip(1)
            .filter_map(|id| store.active_task(id))
            .collect()
    }

    /// The whole schedule, resolved.
    pub fn scheduled_tasks<'a>(&self, store: &'a TaskStore) -> Vec<&'a Task> {
        self.order
            .iter()
            .filter_map(|id| store.active_task(id))
            .collect()
    }

    /// Open tasks that are not on the schedule.
    pub fn pool_tasks<'a>(&self, store: &'a TaskStore) -> Vec<&'a Task> {
        store
            .active_tasks()
            .filter(|t| !self.contains(&t.id))
            .collect()
    }
}
