//! Task types: schedulable study tasks, long-term goals and the grade scale.
//!
//! A [`Task`] lives in the active pool until it is completed, at which point a
//! snapshot of it (carrying grade, score and completion time) is appended to
//! history. Long-term goals are never scheduled or completed; they are only
//! created and deleted.

mod store;

pub use store::{parse_planned_slots, TaskStore};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Subject used when a task is created without one.
pub const DEFAULT_SUBJECT: &str = "other";

/// Self-assessment grade recorded when a task is completed.
///
/// The scale is closed: each grade pairs with exactly one score.
///
/// | Grade | Score |
/// |-------|-------|
/// | AA    | 4     |
/// | A     | 3     |
/// | B     | 2     |
/// | C     | 1     |
/// | D     | 0     |
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    AA,
    A,
    B,
    C,
    D,
}

impl Grade {
    /// All grades, best first.
    pub const ALL: [Grade; 5] = [Grade::AA, Grade::A, Grade::B, Grade::C, Grade::D];

    /// Highest score on the scale.
    pub const MAX_SCORE: u8 = 4;

    /// Score paired with this grade.
    pub fn score(&self) -> u8 {
        match self {
            Grade::AA => 4,
            Grade::A => 3,
            Grade::B => 2,
            Grade::C => 1,
            Grade::D => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::AA => "AA",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }

    /// Grade for a score, the inverse of [`Grade::score`].
    pub fn from_score(score: u8) -> Option<Grade> {
        Grade::ALL.into_iter().find(|g| g.score() == score)
    }

    /// Parse an optional grade selection.
    ///
    /// `None` or a blank string means the user never picked a grade.
    pub fn parse_selection(selection: Option<&str>) -> Result<Grade, ValidationError> {
        match selection.map(str::trim) {
            None | Some("") => Err(ValidationError::MissingGrade),
            Some(raw) => raw.parse(),
        }
    }
}

impl FromStr for Grade {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "AA" => Ok(Grade::AA),
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "" => Err(ValidationError::MissingGrade),
            other => Err(ValidationError::InvalidGrade(other.to_string())),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_planned_slots() -> u32 {
    1
}

/// A short-term, schedulable unit of study work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, assigned at creation
    pub id: String,
    /// Free-text category label
    #[serde(default)]
    pub subject: String,
    /// What to study
    pub content: String,
    /// Planned number of work units
    #[serde(default = "default_planned_slots")]
    pub planned_slots: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
    /// Set once, at completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Set once, at completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,
    /// Set once, at completion; always `grade.score()`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}

/// A completed task as archived in history.
pub type HistoryEntry = Task;

impl Task {
    pub(crate) fn new(subject: &str, content: &str, planned_slots: u32, now: DateTime<Utc>) -> Self {
        Task {
            id: format!("task-{}-{}", now.timestamp_millis(), uuid::Uuid::new_v4()),
            subject: subject.to_string(),
            content: content.to_string(),
            planned_slots,
            created_at: now,
            completed: false,
            completed_at: None,
            grade: None,
            score: None,
        }
    }

    /// Open tasks are the ones that can still be scheduled and completed.
    pub fn is_open(&self) -> bool {
        !self.completed
    }

    /// Stamp completion. Only called on open tasks.
    pub(crate) fn mark_completed(&mut self, grade: Grade, at: DateTime<Utc>) {
        self.completed = true;
        self.completed_at = Some(at);
        self.grade = Some(grade);
        self.score = Some(grade.score());
    }
}

/// A deadline-bound goal that never enters the daily schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongTermTask {
    pub id: String,
    #[serde(default)]
    pub subject: String,
    pub content: String,
    /// Due date (YYYY-MM-DD)
    pub deadline: NaiveDate,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
}

impl LongTermTask {
    pub(crate) fn new(subject: &str, content: &str, deadline: NaiveDate, now: DateTime<Utc>) -> Self {
        LongTermTask {
            id: format!("goal-{}-{}", now.timestamp_millis(), uuid::Uuid::new_v4()),
            subject: subject.to_string(),
            content: content.to_string(),
            deadline,
            created_at: now,
            completed: false,
        }
    }

    /// Whole days from `today` until the deadline; negative once overdue.
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.deadline - today).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn grade_score_table() {
        assert_eq!(Grade::AA.score(), 4);
        assert_eq!(Grade::A.score(), 3);
        assert_eq!(Grade::B.score(), 2);
        assert_eq!(Grade::C.score(), 1);
        assert_eq!(Grade::D.score(), 0);
    }

    #[test]
    fn grade_parse_rejects_unknown_and_missing() {
        assert_eq!("E".parse::<Grade>(), Err(ValidationError::InvalidGrade("E".into())));
        assert_eq!("aa".parse::<Grade>(), Err(ValidationError::InvalidGrade("aa".into())));
        assert_eq!(Grade::parse_selection(None), Err(ValidationError::MissingGrade));
        assert_eq!(Grade::parse_selection(Some("  ")), Err(ValidationError::MissingGrade));
        assert_eq!(Grade::parse_selection(Some("B")), Ok(Grade::B));
    }

    #[test]
    fn grade_serializes_as_letters() {
        assert_eq!(serde_json::to_string(&Grade::AA).unwrap(), "\"AA\"");
        let g: Grade = serde_json::from_str("\"C\"").unwrap();
        assert_eq!(g, Grade::C);
    }

    #[test]
    fn task_reads_original_blob_shape() {
        let json = r#"{
            "id": "1718000000000",
            "subject": "Math",
            "content": "pp1-10",
            "createdAt": "2024-06-10T06:13:20.000Z",
            "completed": true,
            "plannedSlots": 2,
            "completedAt": "2024-06-10T08:00:00.000Z",
            "grade": "A",
            "score": 3
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.planned_slots, 2);
        assert_eq!(task.grade, Some(Grade::A));
        assert_eq!(task.score, Some(3));
        assert!(!task.is_open());
    }

    #[test]
    fn open_task_omits_completion_fields() {
        let task = Task::new("Math", "pp1-10", 2, Utc::now());
        let value = serde_json::to_value(&task).unwrap();
        assert!(value.get("completedAt").is_none());
        assert!(value.get("grade").is_none());
        assert_eq!(value["plannedSlots"], 2);
    }

    #[test]
    fn long_term_days_left() {
        let goal = LongTermTask::new(
            "English",
            "TOEIC 800",
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            Utc::now(),
        );
        assert_eq!(goal.days_left(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()), 9);
        assert_eq!(goal.days_left(NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()), -2);
    }

    proptest! {
        #[test]
        fn score_round_trips_through_grade(idx in 0usize..5) {
            let grade = Grade::ALL[idx];
            prop_assert_eq!(Grade::from_score(grade.score()), Some(grade));
            prop_assert_eq!(grade.as_str().parse::<Grade>(), Ok(grade));
        }
    }
}
