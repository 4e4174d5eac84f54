//! The paginated listings of the watering tracker.
//!
//! Each listing is a marker type implementing
//! [`Paginated`](crate::cursor::Paginated):
//!
//! | Listing            | Row              | Sort fields                              |
//! |--------------------|------------------|------------------------------------------|
//! | [`Plants`]         | [`Plant`]        | `created_at`, `species_name`, `nickname` |
//! | [`WateringTasks`]  | [`WateringTask`] | `due_on`, `created_at`                   |
//! | [`PlanHistory`]    | [`WateringPlan`] | `valid_from`, `created_at`               |

mod plan_history;
mod plants;
mod watering_tasks;

pub use plan_history::{NewWateringPlan, PlanHistory, PlanHistoryFilters, PlanSortField, WateringPlan};
pub use plants::{NewPlant, Plant, PlantFilters, PlantSortField, Plants};
pub use watering_tasks::{
    NewWateringTask, TaskFilters, TaskSortField, TaskSource, TaskStatus, WateringTask,
    WateringTasks,
};

/// Trims a free-text parameter, treating blank input as unset.
pub(crate) fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Rejects a blank required text field.
pub(crate) fn require_text(
    field: &str,
    value: &str,
) -> Result<(), crate::error::ValidationError> {
    if value.trim().is_empty() {
        return Err(crate::error::ValidationError::MissingRequiredField {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Rejects a date whose `%Y-%m-%d` form does not sort chronologically.
pub(crate) fn require_sortable_date(
    field: &str,
    date: &chrono::NaiveDate,
) -> Result<(), crate::error::ValidationError> {
    if !crate::types::is_sortable_date(date) {
        return Err(crate::error::ValidationError::InvalidField {
            field: field.to_string(),
            message: format!("{} is outside years 0000-9999", date),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text(None), None);
        assert_eq!(normalize_text(Some("   ".into())), None);
        assert_eq!(normalize_text(Some(" fern ".into())), Some("fern".into()));
    }

    #[test]
    fn test_require_sortable_date() {
        let ok = chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let far = chrono::NaiveDate::from_ymd_opt(10000, 1, 1).unwrap();
        assert!(require_sortable_date("dueOn", &ok).is_ok());
        assert!(matches!(
            require_sortable_date("dueOn", &far),
            Err(crate::error::ValidationError::InvalidField { ref field, .. }) if field == "dueOn"
        ));
    }

    #[test]
    fn test_require_text() {
        assert!(require_text("nickname", "Fern").is_ok());
        assert!(require_text("nickname", " ").is_err());
    }
}
