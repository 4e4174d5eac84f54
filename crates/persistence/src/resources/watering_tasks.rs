use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{normalize_text, require_sortable_date, require_text};
use crate::cursor::{FilterSnapshot, Paginated, SortKey};
use crate::error::ValidationError;
use crate::owner::OwnerId;
use crate::types::{
    ColumnValues, FilterValue, Predicate, Sort, SortValueKind, date_sort_value, is_sortable_date,
    timestamp_sort_value,
};

/// The watering-task listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct WateringTasks;

/// Lifecycle state of a watering task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not done yet.
    #[default]
    Pending,
    /// Watered.
    Completed,
    /// Deliberately not watered.
    Skipped,
}

impl TaskStatus {
    /// Stored and wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
            TaskStatus::Skipped => "skipped",
        }
    }

    /// Parses a stored name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TaskStatus::Pending),
            "completed" => Some(TaskStatus::Completed),
            "skipped" => Some(TaskStatus::Skipped),
            _ => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a watering task came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskSource {
    /// Generated from a watering plan.
    #[default]
    Scheduled,
    /// Added by hand.
    Adhoc,
}

impl TaskSource {
    /// Stored and wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskSource::Scheduled => "scheduled",
            TaskSource::Adhoc => "adhoc",
        }
    }

    /// Parses a stored name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "scheduled" => Some(TaskSource::Scheduled),
            "adhoc" => Some(TaskSource::Adhoc),
            _ => None,
        }
    }
}

impl fmt::Display for TaskSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A watering task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WateringTask {
    /// Record id.
    pub id: String,
    /// Owning user.
    pub owner_id: OwnerId,
    /// Plant to water.
    pub plant_id: String,
    /// Day the watering is due.
    pub due_on: NaiveDate,
    /// Lifecycle state.
    pub status: TaskStatus,
    /// Origin.
    pub source: TaskSource,
    /// When the task was completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Free-form note.
    pub note: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a watering task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWateringTask {
    /// Plant to water.
    pub plant_id: String,
    /// Day the watering is due.
    pub due_on: NaiveDate,
    /// Initial state. Completed tasks are stamped with the creation time.
    #[serde(default)]
    pub status: TaskStatus,
    /// Origin.
    #[serde(default)]
    pub source: TaskSource,
    /// Free-form note.
    #[serde(default)]
    pub note: Option<String>,
}

impl NewWateringTask {
    /// A pending scheduled task.
    pub fn new(plant_id: impl Into<String>, due_on: NaiveDate) -> Self {
        Self {
            plant_id: plant_id.into(),
            due_on,
            status: TaskStatus::default(),
            source: TaskSource::default(),
            note: None,
        }
    }

    /// Sets the status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the source.
    pub fn with_source(mut self, source: TaskSource) -> Self {
        self.source = source;
        self
    }

    /// Checks required fields and that the due date is sortable.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("plantId", &self.plant_id)?;
        require_sortable_date("dueOn", &self.due_on)
    }
}

/// Sortable task columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSortField {
    /// Due date.
    DueOn,
    /// Creation time.
    CreatedAt,
}

impl SortKey for TaskSortField {
    fn column(self) -> &'static str {
        match self {
            TaskSortField::DueOn => "due_on",
            TaskSortField::CreatedAt => "created_at",
        }
    }

    fn value_kind(self) -> SortValueKind {
        match self {
            TaskSortField::DueOn => SortValueKind::Date,
            TaskSortField::CreatedAt => SortValueKind::Timestamp,
        }
    }
}

/// Watering-task list filters. The due-date range is inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskFilters {
    /// Lifecycle state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,

    /// Origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<TaskSource>,

    /// Only tasks for this plant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant_id: Option<String>,

    /// Earliest due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_from: Option<NaiveDate>,

    /// Latest due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_to: Option<NaiveDate>,
}

impl TaskFilters {
    /// Restricts to one plant.
    pub fn for_plant(mut self, plant_id: impl Into<String>) -> Self {
        self.plant_id = normalize_text(Some(plant_id.into()));
        self
    }

    /// Restricts to a status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to a source.
    pub fn with_source(mut self, source: TaskSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Restricts to an inclusive due-date range. Either end may be open.
    pub fn due_between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.due_from = from;
        self.due_to = to;
        self
    }
}

impl FilterSnapshot for TaskFilters {
    fn is_unset(&self) -> bool {
        self.status.is_none()
            && self.source.is_none()
            && self.plant_id.is_none()
            && self.due_from.is_none()
            && self.due_to.is_none()
    }

    fn predicates(&self) -> Vec<Predicate> {
        let mut clauses = Vec::new();
        if let Some(status) = self.status {
            clauses.push(Predicate::eq("status", status.as_str()));
        }
        if let Some(source) = self.source {
            clauses.push(Predicate::eq("source", source.as_str()));
        }
        if let Some(plant_id) = &self.plant_id {
            clauses.push(Predicate::eq("plant_id", plant_id.as_str()));
        }
        if let Some(from) = &self.due_from {
            clauses.push(Predicate::gte("due_on", date_sort_value(from)));
        }
        if let Some(to) = &self.due_to {
            clauses.push(Predicate::lte("due_on", date_sort_value(to)));
        }
        clauses
    }

    fn validate(&self) -> Result<(), ValidationError> {
        for (filter, date) in [("due_from", self.due_from), ("due_to", self.due_to)] {
            if let Some(date) = date
                && !is_sortable_date(&date)
            {
                return Err(ValidationError::InvalidFilter {
                    filter: filter.to_string(),
                    message: format!("{} is outside years 0000-9999", date),
                });
            }
        }

        if let (Some(from), Some(to)) = (self.due_from, self.due_to)
            && from > to
        {
            return Err(ValidationError::InvalidFilter {
                filter: "due_from".to_string(),
                message: format!("{} is after due_to {}", from, to),
            });
        }
        Ok(())
    }
}

impl Paginated for WateringTasks {
    const RESOURCE: &'static str = "watering_tasks";
    type SortField = TaskSortField;
    type Filters = TaskFilters;
    type Row = WateringTask;

    fn default_sort() -> Sort<TaskSortField> {
        Sort::asc(TaskSortField::DueOn)
    }

    fn sort_value(row: &WateringTask, field: TaskSortField) -> String {
        match field {
            TaskSortField::DueOn => date_sort_value(&row.due_on),
            TaskSortField::CreatedAt => timestamp_sort_value(&row.created_at),
        }
    }

    fn record_id(row: &WateringTask) -> &str {
        &row.id
    }
}

impl ColumnValues for WateringTask {
    fn column(&self, name: &str) -> Option<FilterValue> {
        match name {
            "id" => Some(FilterValue::text(&self.id)),
            "owner_id" => Some(FilterValue::text(self.owner_id.as_str())),
            "plant_id" => Some(FilterValue::text(&self.plant_id)),
            "due_on" => Some(FilterValue::text(date_sort_value(&self.due_on))),
            "status" => Some(FilterValue::text(self.status.as_str())),
            "source" => Some(FilterValue::text(self.source.as_str())),
            "completed_at" => self
                .completed_at
                .as_ref()
                .map(|ts| FilterValue::text(timestamp_sort_value(ts))),
            "note" => self.note.as_deref().map(FilterValue::text),
            "created_at" => Some(FilterValue::text(timestamp_sort_value(&self.created_at))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(due_on: NaiveDate, status: TaskStatus) -> WateringTask {
        WateringTask {
            id: "t1".to_string(),
            owner_id: OwnerId::new("u"),
            plant_id: "p1".to_string(),
            due_on,
            status,
            source: TaskSource::Scheduled,
            completed_at: None,
            note: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let filters =
            TaskFilters::default().due_between(Some(date(2024, 6, 1)), Some(date(2024, 6, 3)));
        let predicate = Predicate::all(filters.predicates()).unwrap();

        assert!(predicate.matches(&task(date(2024, 6, 1), TaskStatus::Pending)));
        assert!(predicate.matches(&task(date(2024, 6, 3), TaskStatus::Pending)));
        assert!(!predicate.matches(&task(date(2024, 6, 4), TaskStatus::Pending)));
        assert!(!predicate.matches(&task(date(2024, 5, 31), TaskStatus::Pending)));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let filters =
            TaskFilters::default().due_between(Some(date(2024, 6, 3)), Some(date(2024, 6, 1)));
        let err = filters.validate().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFilter { ref filter, .. } if filter == "due_from"));
    }

    #[test]
    fn test_five_digit_years_are_rejected() {
        let far = date(10000, 1, 1);

        let err = NewWateringTask::new("p1", far).validate().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { ref field, .. } if field == "dueOn"));

        let err = TaskFilters::default()
            .due_between(Some(date(9000, 1, 1)), Some(far))
            .validate()
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFilter { ref filter, .. } if filter == "due_to"));

        let err = TaskFilters::default()
            .due_between(Some(date(-1, 12, 31)), None)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFilter { ref filter, .. } if filter == "due_from"));
    }

    #[test]
    fn test_status_and_plant_filters() {
        let filters = TaskFilters::default()
            .with_status(TaskStatus::Completed)
            .for_plant("p1");
        assert!(!filters.is_unset());

        let predicate = Predicate::all(filters.predicates()).unwrap();
        assert!(predicate.matches(&task(date(2024, 6, 1), TaskStatus::Completed)));
        assert!(!predicate.matches(&task(date(2024, 6, 1), TaskStatus::Skipped)));
    }

    #[test]
    fn test_snapshot_serializes_dates_canonically() {
        let filters = TaskFilters::default()
            .with_source(TaskSource::Adhoc)
            .due_between(Some(date(2024, 6, 1)), None);
        let json = serde_json::to_string(&filters).unwrap();
        assert_eq!(json, r#"{"source":"adhoc","due_from":"2024-06-01"}"#);
    }

    #[test]
    fn test_status_names_round_trip() {
        for status in [TaskStatus::Pending, TaskStatus::Completed, TaskStatus::Skipped] {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TaskSource::parse("adhoc"), Some(TaskSource::Adhoc));
        assert_eq!(TaskSource::parse("manual"), None);
    }
}
