use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{normalize_text, require_sortable_date, require_text};
use crate::cursor::{FilterSnapshot, Paginated, SortKey};
use crate::error::ValidationError;
use crate::owner::OwnerId;
use crate::types::{
    ColumnValues, FilterValue, Predicate, Sort, SortValueKind, date_sort_value,
    timestamp_sort_value,
};

/// The watering-plan history listing of a plant.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanHistory;

/// One version of a plant's watering plan.
///
/// A plan is in effect from `valid_from` until `valid_to`, or indefinitely
/// when `valid_to` is unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WateringPlan {
    /// Record id.
    pub id: String,
    /// Owning user.
    pub owner_id: OwnerId,
    /// The plant this plan waters.
    pub plant_id: String,
    /// Days between waterings.
    pub interval_days: u32,
    /// First day the plan applies.
    pub valid_from: NaiveDate,
    /// Last day the plan applies.
    pub valid_to: Option<NaiveDate>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Input for recording a watering plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWateringPlan {
    /// The plant this plan waters.
    pub plant_id: String,
    /// Days between waterings.
    pub interval_days: u32,
    /// First day the plan applies.
    pub valid_from: NaiveDate,
    /// Last day the plan applies.
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
}

impl NewWateringPlan {
    /// An open-ended plan.
    pub fn new(plant_id: impl Into<String>, interval_days: u32, valid_from: NaiveDate) -> Self {
        Self {
            plant_id: plant_id.into(),
            interval_days,
            valid_from,
            valid_to: None,
        }
    }

    /// Closes the plan on `valid_to`.
    pub fn until(mut self, valid_to: NaiveDate) -> Self {
        self.valid_to = Some(valid_to);
        self
    }

    /// Checks required fields and the validity window.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("plantId", &self.plant_id)?;

        if self.interval_days == 0 {
            return Err(ValidationError::InvalidField {
                field: "intervalDays".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        require_sortable_date("validFrom", &self.valid_from)?;
        if let Some(to) = &self.valid_to {
            require_sortable_date("validTo", to)?;
        }

        if let Some(to) = self.valid_to
            && to < self.valid_from
        {
            return Err(ValidationError::InvalidField {
                field: "validTo".to_string(),
                message: format!("{} is before validFrom {}", to, self.valid_from),
            });
        }

        Ok(())
    }
}

/// Sortable plan columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSortField {
    /// Start of the validity window.
    ValidFrom,
    /// Creation time.
    CreatedAt,
}

impl SortKey for PlanSortField {
    fn column(self) -> &'static str {
        match self {
            PlanSortField::ValidFrom => "valid_from",
            PlanSortField::CreatedAt => "created_at",
        }
    }

    fn value_kind(self) -> SortValueKind {
        match self {
            PlanSortField::ValidFrom => SortValueKind::Date,
            PlanSortField::CreatedAt => SortValueKind::Timestamp,
        }
    }
}

/// Plan history filters.
///
/// The plant is part of the snapshot, so a cursor minted for one plant's
/// history cannot resume another's.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanHistoryFilters {
    /// The plant whose history is listed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant_id: Option<String>,
}

impl PlanHistoryFilters {
    /// History of one plant.
    pub fn for_plant(plant_id: impl Into<String>) -> Self {
        Self {
            plant_id: normalize_text(Some(plant_id.into())),
        }
    }
}

impl FilterSnapshot for PlanHistoryFilters {
    fn is_unset(&self) -> bool {
        self.plant_id.is_none()
    }

    fn predicates(&self) -> Vec<Predicate> {
        self.plant_id
            .iter()
            .map(|id| Predicate::eq("plant_id", id.as_str()))
            .collect()
    }
}

impl Paginated for PlanHistory {
    const RESOURCE: &'static str = "watering_plans";
    type SortField = PlanSortField;
    type Filters = PlanHistoryFilters;
    type Row = WateringPlan;

    fn default_sort() -> Sort<PlanSortField> {
        Sort::desc(PlanSortField::ValidFrom)
    }

    fn sort_value(row: &WateringPlan, field: PlanSortField) -> String {
        match field {
            PlanSortField::ValidFrom => date_sort_value(&row.valid_from),
            PlanSortField::CreatedAt => timestamp_sort_value(&row.created_at),
        }
    }

    fn record_id(row: &WateringPlan) -> &str {
        &row.id
    }
}

impl ColumnValues for WateringPlan {
    fn column(&self, name: &str) -> Option<FilterValue> {
        match name {
            "id" => Some(FilterValue::text(&self.id)),
            "owner_id" => Some(FilterValue::text(self.owner_id.as_str())),
            "plant_id" => Some(FilterValue::text(&self.plant_id)),
            "interval_days" => Some(FilterValue::Integer(i64::from(self.interval_days))),
            "valid_from" => Some(FilterValue::text(date_sort_value(&self.valid_from))),
            "valid_to" => self
                .valid_to
                .as_ref()
                .map(|d| FilterValue::text(date_sort_value(d))),
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

    #[test]
    fn test_plant_is_always_part_of_snapshot() {
        let filters = PlanHistoryFilters::for_plant("p1");
        assert!(!filters.is_unset());
        assert_eq!(filters.predicates(), vec![Predicate::eq("plant_id", "p1")]);
        assert!(PlanHistoryFilters::for_plant("  ").is_unset());
    }

    #[test]
    fn test_new_plan_validation() {
        let from = date(2024, 4, 1);
        assert!(NewWateringPlan::new("p1", 7, from).validate().is_ok());
        assert!(NewWateringPlan::new("p1", 0, from).validate().is_err());
        assert!(
            NewWateringPlan::new("p1", 7, from)
                .until(date(2024, 3, 1))
                .validate()
                .is_err()
        );
        assert!(
            NewWateringPlan::new("p1", 7, from)
                .until(from)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_plan_dates_must_have_four_digit_years() {
        let err = NewWateringPlan::new("p1", 7, date(10000, 1, 1))
            .validate()
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { ref field, .. } if field == "validFrom"));

        let err = NewWateringPlan::new("p1", 7, date(2024, 1, 1))
            .until(date(12000, 1, 1))
            .validate()
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { ref field, .. } if field == "validTo"));
    }

    #[test]
    fn test_sort_value_and_columns() {
        let plan = WateringPlan {
            id: "w1".to_string(),
            owner_id: OwnerId::new("u"),
            plant_id: "p1".to_string(),
            interval_days: 5,
            valid_from: date(2024, 4, 1),
            valid_to: None,
            created_at: Utc::now(),
        };

        assert_eq!(
            PlanHistory::sort_value(&plan, PlanSortField::ValidFrom),
            "2024-04-01"
        );
        assert_eq!(plan.column("interval_days"), Some(FilterValue::Integer(5)));
        assert_eq!(plan.column("valid_to"), None);
    }
}
