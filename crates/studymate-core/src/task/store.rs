//! Task store: owner of tasks, long-term goals, history and the streak.

use chrono::{DateTime, NaiveDate, Utc};

use super::{Grade, HistoryEntry, LongTermTask, Task, DEFAULT_SUBJECT};
use crate::error::ValidationError;
use crate::schedule::Scheduler;

/// Owns every task entity and the completion log.
///
/// Completed tasks stay in `tasks` flagged `completed`; the active pool is
/// the uncompleted subset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskStore {
    tasks: Vec<Task>,
    long_term: Vec<LongTermTask>,
    history: Vec<HistoryEntry>,
    streak: u64,
}

/// Lenient slot-count parsing: leading integer, anything else yields 0.
///
/// `"3"` → 3, `" 2 slots"` → 2, `"-1"` → -1, `"abc"` → 0.
pub fn parse_planned_slots(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(())
}

fn subject_or_default(subject: &str) -> &str {
    let subject = subject.trim();
    if subject.is_empty() {
        DEFAULT_SUBJECT
    } else {
        subject
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted parts.
    pub fn from_parts(
        tasks: Vec<Task>,
        long_term: Vec<LongTermTask>,
        history: Vec<HistoryEntry>,
        streak: u64,
    ) -> Self {
        Self {
            tasks,
            long_term,
            history,
            streak,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Every task, completed ones included, in creation order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Uncompleted tasks in creation order.
    pub fn active_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.is_open())
    }

    /// Look up an uncompleted task.
    pub fn active_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id && t.is_open())
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active_task(id).is_some()
    }

    pub fn long_term_tasks(&self) -> &[LongTermTask] {
        &self.long_term
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn streak(&self) -> u64 {
        self.streak
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Add a task to the active pool. It is not scheduled.
    ///
    /// `planned_slots` below 1 falls back to 1.
    pub fn create_task(
        &mut self,
        subject: &str,
        content: &str,
        planned_slots: i64,
    ) -> Result<Task, ValidationError> {
        required("content", content)?;
        let slots = u32::try_from(planned_slots).ok().filter(|n| *n > 0).unwrap_or(1);
        let task = Task::new(subject_or_default(subject), content.trim(), slots, Utc::now());
        tracing::debug!(id = %task.id, slots, "task created");
        self.tasks.push(task.clone());
        Ok(task)
    }

    pub fn create_long_term_task(
        &mut self,
        subject: &str,
        content: &str,
        deadline: NaiveDate,
    ) -> Result<LongTermTask, ValidationError> {
        required("content", content)?;
        let goal = LongTermTask::new(subject_or_default(subject), content.trim(), deadline, Utc::now());
        tracing::debug!(id = %goal.id, %deadline, "long-term goal created");
        self.long_term.push(goal.clone());
        Ok(goal)
    }

    /// Remove a long-term goal. Returns whether anything was removed.
    pub fn delete_long_term_task(&mut self, id: &str) -> bool {
        let before = self.long_term.len();
        self.long_term.retain(|g| g.id != id);
        before != self.long_term.len()
    }

    /// Remove an open task from the pool and the schedule.
    ///
    /// Completed tasks are archived and cannot be deleted this way.
    pub fn delete_task(&mut self, id: &str, schedule: &mut Scheduler) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| !(t.id == id && t.is_open()));
        let removed = before != self.tasks.len();
        if removed {
            schedule.remove(id);
            tracing::debug!(id, "task deleted");
        }
        removed
    }

    /// Complete an open task with a grade, stamped now.
    pub fn complete_task(
        &mut self,
        id: &str,
        grade: Grade,
        schedule: &mut Scheduler,
    ) -> Result<HistoryEntry, ValidationError> {
        self.complete_task_at(id, grade, schedule, Utc::now())
    }

    /// Complete an open task with an explicit completion time.
    ///
    /// Marks the task, appends its snapshot to history, drops it from the
    /// schedule and bumps the streak. Nothing changes when the id does not
    /// name an open task.
    pub fn complete_task_at(
        &mut self,
        id: &str,
        grade: Grade,
        schedule: &mut Scheduler,
        at: DateTime<Utc>,
    ) -> Result<HistoryEntry, ValidationError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id && t.is_open())
            .ok_or_else(|| ValidationError::TaskNotFound { id: id.to_string() })?;

        task.mark_completed(grade, at);
        let snapshot = task.clone();
        self.history.push(snapshot.clone());
        schedule.remove(id);
        self.streak += 1;

        tracing::debug!(id, %grade, streak = self.streak, "task completed");
        Ok(snapshot)
    }
}
