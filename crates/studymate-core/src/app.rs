//! Application controller.
//!
//! [`StudyApp`] is the single owner of the state tree. The presentation layer
//! calls its named operations and renders its views; it never touches the
//! store or the blob directly. Every successful mutation of durable state is
//! saved through the persistence gateway before the operation returns.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::error::ValidationError;
use crate::events::Event;
use crate::schedule::Scheduler;
use crate::state::{PersistedState, Settings};
use crate::stats::{AverageScore, DailyStats, GoalProgress, Statistics};
use crate::storage::{BlobStore, PersistenceGateway};
use crate::task::{Grade, HistoryEntry, LongTermTask, Task, TaskStore};
use crate::timer::{Phase, TimerEngine, TimerState};

/// Days shown in the dashboard trend chart.
pub const TREND_DAYS: u32 = 7;

/// Timer as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerView {
    pub state: TimerState,
    pub phase: Phase,
    pub display: String,
    pub remaining_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub current_task: Option<Task>,
    pub upcoming: Vec<Task>,
    pub timer: TimerView,
    pub goal: GoalProgress,
    pub today_average_score: AverageScore,
    /// `-` or one decimal
    pub today_average_display: String,
    pub streak: u64,
    pub trend: Vec<DailyStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskEditorView {
    pub daily_goal_slots: u32,
    pub pool: Vec<Task>,
    pub schedule: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalsView {
    pub long_term_tasks: Vec<LongTermTask>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryView {
    /// Newest first
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsView {
    pub settings: Settings,
}

fn positive(field: &'static str, value: i64) -> Result<u32, ValidationError> {
    u32::try_from(value)
        .ok()
        .filter(|n| *n > 0)
        .ok_or(ValidationError::NonPositive { field, value })
}

pub struct StudyApp<S: BlobStore> {
    tasks: TaskStore,
    schedule: Scheduler,
    daily_goal_slots: u32,
    settings: Settings,
    timer: TimerEngine,
    gateway: PersistenceGateway<S>,
}

impl<S: BlobStore> StudyApp<S> {
    /// Load saved state (or defaults) and start with an idle work timer.
    pub fn open(gateway: PersistenceGateway<S>) -> Self {
        let saved = gateway.load();
        let tasks = TaskStore::from_parts(saved.tasks, saved.long_term_tasks, saved.history, saved.streak);
        let mut schedule = Scheduler::from_ids(saved.schedule);
        schedule.prune(&tasks);
        let timer = TimerEngine::new(saved.settings.durations());
        Self {
            tasks,
            schedule,
            daily_goal_slots: saved.daily_goal_slots,
            settings: saved.settings,
            timer,
            gateway,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    pub fn schedule(&self) -> &Scheduler {
        &self.schedule
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn daily_goal_slots(&self) -> u32 {
        self.daily_goal_slots
    }

    pub fn streak(&self) -> u64 {
        self.tasks.streak()
    }

    pub fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    /// Mutable access for a clock driver.
    pub fn timer_mut(&mut self) -> &mut TimerEngine {
        &mut self.timer
    }

    pub fn gateway(&self) -> &PersistenceGateway<S> {
        &self.gateway
    }

    /// Statistics over history in local time.
    pub fn statistics(&self) -> Statistics<'_, Local> {
        Statistics::local(self.tasks.history())
    }

    /// The durable subset of the current state.
    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            tasks: self.tasks.tasks().to_vec(),
            long_term_tasks: self.tasks.long_term_tasks().to_vec(),
            history: self.tasks.history().to_vec(),
            schedule: self.schedule.ids().to_vec(),
            daily_goal_slots: self.daily_goal_slots,
            settings: self.settings.clone(),
            streak: self.tasks.streak(),
        }
    }

    fn persist(&mut self) {
        let state = self.snapshot();
        self.gateway.save(&state);
    }

    // ── Views ────────────────────────────────────────────────────────

    pub fn dashboard(&self) -> DashboardView {
        let stats = self.statistics();
        let today_average_score = stats.today_average_score();
        DashboardView {
            current_task: self.schedule.current_task(&self.tasks).cloned(),
            upcoming: self.schedule.upcoming(&self.tasks).into_iter().cloned().collect(),
            timer: TimerView {
                state: self.timer.state(),
                phase: self.timer.phase(),
                display: self.timer.format_remaining(),
                remaining_secs: self.timer.remaining_secs(),
            },
            goal: stats.goal_progress(self.daily_goal_slots),
            today_average_display: today_average_score.to_string(),
            today_average_score,
            streak: self.tasks.streak(),
            trend: stats.last_n_days(TREND_DAYS),
        }
    }

    pub fn task_editor(&self) -> TaskEditorView {
        TaskEditorView {
            daily_goal_slots: self.daily_goal_slots,
            pool: self.schedule.pool_tasks(&self.tasks).into_iter().cloned().collect(),
            schedule: self.schedule.scheduled_tasks(&self.tasks).into_iter().cloned().collect(),
        }
    }

    pub fn goals(&self) -> GoalsView {
        GoalsView {
            long_term_tasks: self.tasks.long_term_tasks().to_vec(),
        }
    }

    pub fn history_log(&self) -> HistoryView {
        HistoryView {
            entries: self.tasks.history().iter().rev().cloned().collect(),
        }
    }

    pub fn settings_view(&self) -> SettingsView {
        SettingsView {
            settings: self.settings.clone(),
        }
    }

    // ── Task operations ──────────────────────────────────────────────

    pub fn create_task(
        &mut self,
        subject: &str,
        content: &str,
        planned_slots: i64,
    ) -> Result<Task, ValidationError> {
        let task = self.tasks.create_task(subject, content, planned_slots)?;
        self.persist();
        Ok(task)
    }

    pub fn create_long_term_task(
        &mut self,
        subject: &str,
        content: &str,
        deadline: NaiveDate,
    ) -> Result<LongTermTask, ValidationError> {
        let goal = self.tasks.create_long_term_task(subject, content, deadline)?;
        self.persist();
        Ok(goal)
    }

    pub fn delete_long_term_task(&mut self, id: &str) -> bool {
        let removed = self.tasks.delete_long_term_task(id);
        if removed {
            self.persist();
        }
        removed
    }

    pub fn delete_task(&mut self, id: &str) -> bool {
        let removed = self.tasks.delete_task(id, &mut self.schedule);
        if removed {
            self.persist();
        }
        removed
    }

    /// Complete a task from a grade selection (`None` = nothing picked).
    pub fn complete_task(&mut self, id: &str, grade: Option<&str>) -> Result<Event, ValidationError> {
        let grade = Grade::parse_selection(grade)?;
        let entry = self.tasks.complete_task(id, grade, &mut self.schedule)?;
        self.persist();
        Ok(Event::TaskCompleted {
            task_id: entry.id,
            grade,
            score: grade.score(),
            streak: self.tasks.streak(),
            at: entry.completed_at.unwrap_or_else(chrono::Utc::now),
        })
    }

    // ── Schedule operations ──────────────────────────────────────────

    pub fn add_to_schedule(&mut self, id: &str) -> Result<bool, ValidationError> {
        let added = self.schedule.add(id, &self.tasks)?;
        if added {
            self.persist();
        }
        Ok(added)
    }

    pub fn remove_from_schedule(&mut self, id: &str) -> bool {
        let removed = self.schedule.remove(id);
        if removed {
            self.persist();
        }
        removed
    }

    pub fn set_schedule_order<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.schedule.set_order(ids, &self.tasks);
        self.persist();
    }

    // ── Settings ─────────────────────────────────────────────────────

    pub fn set_daily_goal(&mut self, slots: i64) -> Result<(), ValidationError> {
        self.daily_goal_slots = positive("dailyGoalSlots", slots)?;
        self.persist();
        Ok(())
    }

    /// New phase lengths; the running countdown keeps its current value.
    pub fn update_settings(&mut self, pomodoro_time: i64, break_time: i64) -> Result<(), ValidationError> {
        let pomodoro_time = positive("pomodoroTime", pomodoro_time)?;
        let break_time = positive("breakTime", break_time)?;
        self.settings.pomodoro_time = pomodoro_time;
        self.settings.break_time = break_time;
        self.timer.apply_durations(self.settings.durations());
        self.persist();
        Ok(())
    }

    pub fn set_media_url(&mut self, url: &str) {
        self.settings.youtube_url = url.trim().to_string();
        self.persist();
    }

    /// Delete all saved data and return to defaults.
    pub fn reset_all(&mut self) {
        self.gateway.wipe();
        let defaults = PersistedState::default();
        self.tasks = TaskStore::new();
        self.schedule = Scheduler::new();
        self.daily_goal_slots = defaults.daily_goal_slots;
        self.timer = TimerEngine::new(defaults.settings.durations());
        self.settings = defaults.settings;
        tracing::info!("all data reset");
    }

    // ── Timer ────────────────────────────────────────────────────────

    pub fn start_timer(&mut self) -> Option<Event> {
        self.timer.start()
    }

    pub fn stop_timer(&mut self) -> Option<Event> {
        self.timer.stop()
    }

    pub fn toggle_timer(&mut self) -> Option<Event> {
        self.timer.toggle()
    }

    pub fn tick_timer(&mut self) -> Option<Event> {
        self.timer.tick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn app() -> StudyApp<MemoryStore> {
        StudyApp::open(PersistenceGateway::new(MemoryStore::new()))
    }

    #[test]
    fn fresh_app_has_default_views() {
        let app = app();
        let dash = app.dashboard();
        assert!(dash.current_task.is_none());
        assert_eq!(dash.timer.display, "25:00");
        assert_eq!(dash.goal.target, 4);
        assert_eq!(dash.today_average_display, "-");
        assert_eq!(dash.trend.len(), TREND_DAYS as usize);
        assert!(app.history_log().entries.is_empty());
    }

    #[test]
    fn complete_requires_grade_and_changes_nothing_without_one() {
        let mut app = app();
        let task = app.create_task("Math", "pp1-10", 2).unwrap();
        app.add_to_schedule(&task.id).unwrap();

        assert_eq!(app.complete_task(&task.id, None), Err(ValidationError::MissingGrade));
        assert_eq!(
            app.complete_task(&task.id, Some("S")),
            Err(ValidationError::InvalidGrade("S".into()))
        );
        assert_eq!(app.streak(), 0);
        assert_eq!(app.schedule().ids().len(), 1);
    }

    #[test]
    fn every_mutation_is_saved() {
        let mut app = app();
        let task = app.create_task("Math", "pp1-10", 2).unwrap();
        app.add_to_schedule(&task.id).unwrap();
        app.set_daily_goal(6).unwrap();

        let saved = app.gateway().load();
        assert_eq!(saved.tasks.len(), 1);
        assert_eq!(saved.schedule, vec![task.id.clone()]);
        assert_eq!(saved.daily_goal_slots, 6);
    }

    #[test]
    fn non_positive_numbers_are_rejected() {
        let mut app = app();
        assert!(app.set_daily_goal(0).is_err());
        assert!(app.update_settings(-5, 5).is_err());
        assert!(app.update_settings(25, 0).is_err());
        assert_eq!(app.daily_goal_slots(), 4);
        assert_eq!(app.settings(), &Settings::default());
    }

    #[test]
    fn settings_apply_to_next_phase_only() {
        let mut app = app();
        app.start_timer();
        app.tick_timer();
        app.update_settings(30, 10).unwrap();
        assert_eq!(app.timer().format_remaining(), "24:59");
        app.stop_timer();
        assert_eq!(app.settings_view().settings.pomodoro_time, 30);
    }

    #[test]
    fn reset_all_wipes_store_and_memory() {
        let mut app = app();
        let task = app.create_task("Math", "pp1-10", 2).unwrap();
        app.complete_task(&task.id, Some("AA")).unwrap();
        app.reset_all();

        assert_eq!(app.snapshot(), PersistedState::default());
        assert!(app.gateway().try_load().unwrap().is_none());
    }

    #[test]
    fn one_bad_saved_goal_does_not_erase_the_rest_on_save() {
        let mut store = MemoryStore::new();
        store
            .set(
                crate::storage::DEFAULT_BLOB_KEY,
                r#"{
                    "tasks": [
                        {"id": "t1", "content": "ok", "createdAt": "2024-06-10T06:00:00Z", "plannedSlots": 1},
                        {"id": "t2", "content": "bad", "createdAt": "2024-06-10T06:00:00Z", "plannedSlots": "3"}
                    ],
                    "longTermTasks": [
                        {"id": "g1", "content": "Mock", "createdAt": "2024-06-10T06:00:00Z", "deadline": "2024-09-01"},
                        {"id": "g2", "content": "Cleared", "createdAt": "2024-06-10T06:00:00Z", "deadline": ""}
                    ]
                }"#,
            )
            .unwrap();
        let mut app = StudyApp::open(PersistenceGateway::new(store));
        assert_eq!(app.goals().long_term_tasks.len(), 1);
        assert_eq!(app.tasks().tasks().len(), 1);

        app.set_daily_goal(5).unwrap();
        let blob = app
            .gateway()
            .store()
            .get(crate::storage::DEFAULT_BLOB_KEY)
            .unwrap()
            .unwrap();
        assert!(blob.contains("Mock"));
        assert!(blob.contains("\"ok\""));
    }

    #[test]
    fn history_log_is_newest_first() {
        let mut app = app();
        let first = app.create_task("", "first", 1).unwrap();
        let second = app.create_task("", "second", 1).unwrap();
        app.complete_task(&first.id, Some("B")).unwrap();
        app.complete_task(&second.id, Some("C")).unwrap();
        let log = app.history_log();
        assert_eq!(log.entries[0].id, second.id);
        assert_eq!(log.entries[1].id, first.id);
    }
}
