//! Statistics module for Study Mate
//!
//! Pure derivations over the completion history: per-day counts, average
//! self-assessment score and the trend series behind the dashboard chart.
//! Nothing is cached; every call re-reads history. Days are calendar days in
//! the statistics' timezone (local time by default), not rolling 24h windows.

use chrono::{DateTime, Days, Local, NaiveDate, TimeZone, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::task::HistoryEntry;

/// Longest trend series a caller can ask for.
pub const MAX_TREND_DAYS: u32 = 366;

/// Mean score of a day's completions, rounded to one decimal.
///
/// `NoData` is distinct from a real average of 0.0 (all D grades).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AverageScore {
    NoData,
    Score(f64),
}

impl AverageScore {
    fn from_scores<I: IntoIterator<Item = u8>>(scores: I) -> Self {
        let (sum, count) = scores
            .into_iter()
            .fold((0u64, 0u64), |(sum, count), s| (sum + u64::from(s), count + 1));
        if count == 0 {
            return AverageScore::NoData;
        }
        let mean = sum as f64 / count as f64;
        AverageScore::Score((mean * 10.0).round() / 10.0)
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            AverageScore::NoData => None,
            AverageScore::Score(v) => Some(*v),
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, AverageScore::NoData)
    }
}

/// `-` for no data, otherwise one decimal (`3.0`).
impl fmt::Display for AverageScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AverageScore::NoData => f.write_str("-"),
            AverageScore::Score(v) => write!(f, "{v:.1}"),
        }
    }
}

/// Serialized as `null` or a number.
impl Serialize for AverageScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AverageScore::NoData => serializer.serialize_none(),
            AverageScore::Score(v) => serializer.serialize_f64(*v),
        }
    }
}

/// One point of the trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    /// Short weekday label (`Mon`)
    pub weekday: String,
    pub completed: usize,
    pub average_score: AverageScore,
}

/// Today's completions against the daily target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalProgress {
    pub completed: usize,
    pub target: u32,
    pub met: bool,
}

impl GoalProgress {
    pub fn remaining(&self) -> usize {
        (self.target as usize).saturating_sub(self.completed)
    }
}

/// Read-only view of history in a given timezone.
pub struct Statistics<'a, Tz: TimeZone> {
    history: &'a [HistoryEntry],
    tz: Tz,
}

impl<'a> Statistics<'a, Local> {
    /// Statistics bucketed by the machine's local calendar.
    pub fn local(history: &'a [HistoryEntry]) -> Self {
        Self { history, tz: Local }
    }
}

impl<'a, Tz: TimeZone> Statistics<'a, Tz> {
    pub fn with_timezone(history: &'a [HistoryEntry], tz: Tz) -> Self {
        Self { history, tz }
    }

    /// Current calendar date in this timezone.
    pub fn today(&self) -> NaiveDate {
        self.day_of(&Utc::now())
    }

    fn day_of(&self, at: &DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.tz).date_naive()
    }

    fn entries_on(&self, date: NaiveDate) -> impl Iterator<Item = &'a HistoryEntry> + '_ {
        self.history.iter().filter(move |entry| {
            entry
                .completed_at
                .as_ref()
                .is_some_and(|at| self.day_of(at) == date)
        })
    }

    pub fn completed_count_on(&self, date: NaiveDate) -> usize {
        self.entries_on(date).count()
    }

    /// Entries missing a score count as 0.
    pub fn average_score_on(&self, date: NaiveDate) -> AverageScore {
        AverageScore::from_scores(self.entries_on(date).map(|e| e.score.unwrap_or(0)))
    }

    pub fn today_completed_count(&self) -> usize {
        self.completed_count_on(self.today())
    }

    pub fn today_average_score(&self) -> AverageScore {
        self.average_score_on(self.today())
    }

    /// One entry per day for the last `n` days, oldest first, ending today.
    pub fn last_n_days(&self, n: u32) -> Vec<DailyStats> {
        self.last_n_days_ending(self.today(), n)
    }

    /// `n` is capped at [`MAX_TREND_DAYS`].
    pub fn last_n_days_ending(&self, end: NaiveDate, n: u32) -> Vec<DailyStats> {
        (0..u64::from(n.min(MAX_TREND_DAYS)))
            .rev()
            .filter_map(|back| end.checked_sub_days(Days::new(back)))
            .map(|date| DailyStats {
                date,
                weekday: date.format("%a").to_string(),
                completed: self.completed_count_on(date),
                average_score: self.average_score_on(date),
            })
            .collect()
    }

    pub fn goal_progress_on(&self, date: NaiveDate, target: u32) -> GoalProgress {
        let completed = self.completed_count_on(date);
        GoalProgress {
            completed,
            target,
            met: completed >= target as usize,
        }
    }

    pub fn goal_progress(&self, target: u32) -> GoalProgress {
        self.goal_progress_on(self.today(), target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Grade, Task};
    use chrono::Duration;

    fn entry(grade: Grade, at: DateTime<Utc>) -> HistoryEntry {
        let mut task = Task {
            id: format!("h-{}", at.timestamp_nanos_opt().unwrap_or_default()),
            subject: "Math".into(),
            content: "drill".into(),
            planned_slots: 1,
            created_at: at,
            completed: false,
            completed_at: None,
            grade: None,
            score: None,
        };
        task.mark_completed(grade, at);
        task
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn average_of_four_three_two_is_three() {
        let history = vec![
            entry(Grade::AA, at(2025, 5, 1, 9)),
            entry(Grade::A, at(2025, 5, 1, 12)),
            entry(Grade::B, at(2025, 5, 1, 20)),
        ];
        let stats = Statistics::with_timezone(&history, Utc);
        assert_eq!(stats.completed_count_on(date(2025, 5, 1)), 3);
        assert_eq!(stats.average_score_on(date(2025, 5, 1)).to_string(), "3.0");
    }

    #[test]
    fn empty_day_is_no_data_not_zero() {
        let history = vec![entry(Grade::D, at(2025, 5, 1, 9))];
        let stats = Statistics::with_timezone(&history, Utc);
        let empty = stats.average_score_on(date(2025, 5, 2));
        assert!(empty.is_no_data());
        assert_eq!(empty.to_string(), "-");

        let zero = stats.average_score_on(date(2025, 5, 1));
        assert_eq!(zero.value(), Some(0.0));
        assert_eq!(zero.to_string(), "0.0");
    }

    #[test]
    fn average_rounds_to_one_decimal() {
        let history = vec![
            entry(Grade::AA, at(2025, 5, 1, 9)),
            entry(Grade::A, at(2025, 5, 1, 10)),
            entry(Grade::A, at(2025, 5, 1, 11)),
        ];
        let stats = Statistics::with_timezone(&history, Utc);
        assert_eq!(stats.average_score_on(date(2025, 5, 1)).value(), Some(3.3));
    }

    #[test]
    fn today_uses_current_date() {
        let history = vec![
            entry(Grade::AA, Utc::now()),
            entry(Grade::B, Utc::now() - Duration::days(3)),
        ];
        let stats = Statistics::with_timezone(&history, Utc);
        assert_eq!(stats.today_completed_count(), 1);
        assert_eq!(stats.today_average_score().value(), Some(4.0));
    }

    #[test]
    fn day_boundaries_follow_the_timezone() {
        let history = vec![entry(Grade::A, at(2025, 5, 1, 23))];
        let tokyo = chrono::FixedOffset::east_opt(9 * 3600).unwrap();
        let stats = Statistics::with_timezone(&history, tokyo);
        assert_eq!(stats.completed_count_on(date(2025, 5, 1)), 0);
        assert_eq!(stats.completed_count_on(date(2025, 5, 2)), 1);
    }

    #[test]
    fn last_n_days_is_oldest_first_and_includes_empty_days() {
        let history = vec![
            entry(Grade::AA, at(2025, 5, 7, 8)),
            entry(Grade::C, at(2025, 5, 7, 9)),
            entry(Grade::B, at(2025, 5, 3, 9)),
            entry(Grade::A, at(2025, 4, 20, 9)),
        ];
        let stats = Statistics::with_timezone(&history, Utc);
        let week = stats.last_n_days_ending(date(2025, 5, 7), 7);

        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, date(2025, 5, 1));
        assert_eq!(week[6].date, date(2025, 5, 7));
        assert_eq!(week[6].completed, 2);
        assert_eq!(week[6].average_score.value(), Some(2.5));
        assert_eq!(week[2].completed, 1);
        assert!(week[1].average_score.is_no_data());
        assert_eq!(week[0].weekday, "Thu");
        assert_eq!(week.iter().map(|d| d.completed).sum::<usize>(), 3);
    }

    #[test]
    fn trend_length_is_capped() {
        let history = vec![entry(Grade::A, at(2025, 5, 7, 9))];
        let stats = Statistics::with_timezone(&history, Utc);
        let series = stats.last_n_days_ending(date(2025, 5, 7), 4_000_000_000);
        assert_eq!(series.len(), MAX_TREND_DAYS as usize);
        assert_eq!(series.last().map(|d| d.date), Some(date(2025, 5, 7)));
        assert_eq!(series.iter().map(|d| d.completed).sum::<usize>(), 1);
    }

    #[test]
    fn goal_progress_tracks_target() {
        let history = vec![
            entry(Grade::A, at(2025, 5, 1, 9)),
            entry(Grade::A, at(2025, 5, 1, 10)),
        ];
        let stats = Statistics::with_timezone(&history, Utc);
        let progress = stats.goal_progress_on(date(2025, 5, 1), 4);
        assert_eq!(progress.completed, 2);
        assert!(!progress.met);
        assert_eq!(progress.remaining(), 2);
        assert!(stats.goal_progress_on(date(2025, 5, 1), 2).met);
    }

    #[test]
    fn average_serializes_as_number_or_null() {
        assert_eq!(serde_json::to_string(&AverageScore::NoData).unwrap(), "null");
        assert_eq!(serde_json::to_string(&AverageScore::Score(3.5)).unwrap(), "3.5");
    }
}
