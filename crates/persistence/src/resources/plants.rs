use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{normalize_text, require_text};
use crate::cursor::{FilterSnapshot, Paginated, SortKey};
use crate::error::ValidationError;
use crate::owner::OwnerId;
use crate::types::{
    ColumnValues, FilterValue, Predicate, Sort, SortValueKind, timestamp_sort_value,
};

/// The plant listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plants;

/// A plant record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    /// Record id.
    pub id: String,
    /// Owning user.
    pub owner_id: OwnerId,
    /// Name the owner gave the plant.
    pub nickname: String,
    /// Species name.
    pub species_name: String,
    /// Where the plant lives.
    pub location: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a plant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlant {
    /// Name the owner gives the plant.
    pub nickname: String,
    /// Species name.
    pub species_name: String,
    /// Where the plant lives.
    #[serde(default)]
    pub location: Option<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewPlant {
    /// Creates the input with the required fields.
    pub fn new(nickname: impl Into<String>, species_name: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            species_name: species_name.into(),
            location: None,
            notes: None,
        }
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Checks required fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("nickname", &self.nickname)?;
        require_text("speciesName", &self.species_name)
    }
}

/// Sortable plant columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantSortField {
    /// Creation time.
    CreatedAt,
    /// Species name.
    SpeciesName,
    /// Nickname.
    Nickname,
}

impl SortKey for PlantSortField {
    fn column(self) -> &'static str {
        match self {
            PlantSortField::CreatedAt => "created_at",
            PlantSortField::SpeciesName => "species_name",
            PlantSortField::Nickname => "nickname",
        }
    }

    fn value_kind(self) -> SortValueKind {
        match self {
            PlantSortField::CreatedAt => SortValueKind::Timestamp,
            PlantSortField::SpeciesName | PlantSortField::Nickname => SortValueKind::Text,
        }
    }
}

/// Plant list filters.
///
/// `q` matches nickname or species name as a case-insensitive substring;
/// `species` matches the species name exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlantFilters {
    /// Free-text search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,

    /// Exact species name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
}

impl PlantFilters {
    /// Normalizes raw query parameters.
    pub fn new(q: Option<String>, species: Option<String>) -> Self {
        Self {
            q: normalize_text(q),
            species: normalize_text(species),
        }
    }
}

impl FilterSnapshot for PlantFilters {
    fn is_unset(&self) -> bool {
        self.q.is_none() && self.species.is_none()
    }

    fn predicates(&self) -> Vec<Predicate> {
        let mut clauses = Vec::new();
        if let Some(q) = &self.q {
            clauses.push(Predicate::Or(vec![
                Predicate::contains_ci("nickname", q.as_str()),
                Predicate::contains_ci("species_name", q.as_str()),
            ]));
        }
        if let Some(species) = &self.species {
            clauses.push(Predicate::eq("species_name", species.as_str()));
        }
        clauses
    }
}

impl Paginated for Plants {
    const RESOURCE: &'static str = "plants";
    type SortField = PlantSortField;
    type Filters = PlantFilters;
    type Row = Plant;

    fn default_sort() -> Sort<PlantSortField> {
        Sort::desc(PlantSortField::CreatedAt)
    }

    fn sort_value(row: &Plant, field: PlantSortField) -> String {
        match field {
            PlantSortField::CreatedAt => timestamp_sort_value(&row.created_at),
            PlantSortField::SpeciesName => row.species_name.clone(),
            PlantSortField::Nickname => row.nickname.clone(),
        }
    }

    fn record_id(row: &Plant) -> &str {
        &row.id
    }
}

impl ColumnValues for Plant {
    fn column(&self, name: &str) -> Option<FilterValue> {
        match name {
            "id" => Some(FilterValue::text(&self.id)),
            "owner_id" => Some(FilterValue::text(self.owner_id.as_str())),
            "nickname" => Some(FilterValue::text(&self.nickname)),
            "species_name" => Some(FilterValue::text(&self.species_name)),
            "location" => self.location.as_deref().map(FilterValue::text),
            "notes" => self.notes.as_deref().map(FilterValue::text),
            "created_at" => Some(FilterValue::text(timestamp_sort_value(&self.created_at))),
            _ => None,
        }
    }
}
