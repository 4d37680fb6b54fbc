use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::entities::{cases, clients};

/// Procedural status of a case. Stored as its display string; transitions
/// between the two values are unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStatus {
    Active,
    Closed,
}

impl CaseStatus {
    pub const DEFAULT: Self = Self::Active;
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Closed => write!(f, "Closed"),
        }
    }
}

impl FromStr for CaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Closed" => Ok(Self::Closed),
            other => Err(format!("Unknown case status: {other}")),
        }
    }
}

/// A case row together with its owning client.
#[derive(Debug, Clone)]
pub struct CaseWithClient {
    pub case: cases::Model,
    pub client: Option<clients::Model>,
}

/// Fields accepted when opening a case. The client reference is validated
/// by the caller against the client registry.
#[derive(Debug, Clone)]
pub struct CaseInput {
    pub case_number: String,
    pub court_name: Option<String>,
    pub case_title: Option<String>,
    pub case_type: Option<String>,
    pub client_id: i32,
    pub opponent_name: Option<String>,
    pub opponent_advocate: Option<String>,
    pub filing_date: Option<NaiveDate>,
    pub current_stage: Option<String>,
    pub next_hearing_date: Option<NaiveDate>,
    pub status: CaseStatus,
    pub notes: Option<String>,
}

/// Partial update; only present fields are overwritten.
#[derive(Debug, Clone, Default)]
pub struct CaseUpdate {
    pub case_number: Option<String>,
    pub court_name: Option<String>,
    pub case_title: Option<String>,
    pub case_type: Option<String>,
    pub client_id: Option<i32>,
    pub opponent_name: Option<String>,
    pub opponent_advocate: Option<String>,
    pub filing_date: Option<NaiveDate>,
    pub current_stage: Option<String>,
    pub next_hearing_date: Option<NaiveDate>,
    pub status: Option<CaseStatus>,
    pub notes: Option<String>,
}

pub struct CaseRepository {
    conn: DatabaseConnection,
}

impl CaseRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_rows(rows: Vec<(cases::Model, Option<clients::Model>)>) -> Vec<CaseWithClient> {
        rows.into_iter()
            .map(|(case, client)| CaseWithClient { case, client })
            .collect()
    }

    /// List all cases, or those where case number, court name, status or the
    /// linked client's name contain the search term. Substring OR semantics:
    /// searching "Active" matches the status column but also any literal
    /// occurrence in the other fields.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<CaseWithClient>> {
        let mut query = cases::Entity::find()
            .find_also_related(clients::Entity)
            .order_by_asc(cases::Column::Id);

        if let Some(term) = search {
            query = query.filter(
                Condition::any()
                    .add(cases::Column::CaseNumber.contains(term))
                    .add(cases::Column::CourtName.contains(term))
                    .add(cases::Column::Status.contains(term))
                    .add(clients::Column::Name.contains(term)),
            );
        }

        let rows = query.all(&self.conn).await.context("Failed to list cases")?;
        Ok(Self::map_rows(rows))
    }

    pub async fn get(&self, id: i32) -> Result<Option<CaseWithClient>> {
        let row = cases::Entity::find_by_id(id)
            .find_also_related(clients::Entity)
            .one(&self.conn)
            .await
            .context("Failed to query case by ID")?;

        Ok(row.map(|(case, client)| CaseWithClient { case, client }))
    }

    pub async fn create(&self, input: CaseInput) -> Result<cases::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = cases::ActiveModel {
            case_number: Set(input.case_number),
            court_name: Set(input.court_name),
            case_title: Set(input.case_title),
            case_type: Set(input.case_type),
            client_id: Set(input.client_id),
            opponent_name: Set(input.opponent_name),
            opponent_advocate: Set(input.opponent_advocate),
            filing_date: Set(input.filing_date),
            current_stage: Set(input.current_stage),
            next_hearing_date: Set(input.next_hearing_date),
            status: Set(input.status.to_string()),
            notes: Set(input.notes),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert case")?;

        info!("Added case {} ({})", model.case_number, model.id);
        Ok(model)
    }

    /// Overwrite the provided fields. Returns `None` if the id is absent.
    pub async fn update(&self, id: i32, update: CaseUpdate) -> Result<Option<cases::Model>> {
        let Some(existing) = cases::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query case for update")?
        else {
            return Ok(None);
        };

        let mut active: cases::ActiveModel = existing.into();
        if let Some(v) = update.case_number {
            active.case_number = Set(v);
        }
        if let Some(v) = update.court_name {
            active.court_name = Set(Some(v));
        }
        if let Some(v) = update.case_title {
            active.case_title = Set(Some(v));
        }
        if let Some(v) = update.case_type {
            active.case_type = Set(Some(v));
        }
        if let Some(v) = update.client_id {
            active.client_id = Set(v);
        }
        if let Some(v) = update.opponent_name {
            active.opponent_name = Set(Some(v));
        }
        if let Some(v) = update.opponent_advocate {
            active.opponent_advocate = Set(Some(v));
        }
        if let Some(v) = update.filing_date {
            active.filing_date = Set(Some(v));
        }
        if let Some(v) = update.current_stage {
            active.current_stage = Set(Some(v));
        }
        if let Some(v) = update.next_hearing_date {
            active.next_hearing_date = Set(Some(v));
        }
        if let Some(v) = update.status {
            active.status = Set(v.to_string());
        }
        if let Some(v) = update.notes {
            active.notes = Set(Some(v));
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update case")?;

        Ok(Some(model))
    }

    /// Cases with a hearing in `[from, to]` inclusive, earliest first.
    pub async fn upcoming(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<CaseWithClient>> {
        let rows = cases::Entity::find()
            .find_also_related(clients::Entity)
            .filter(cases::Column::NextHearingDate.between(from, to))
            .order_by_asc(cases::Column::NextHearingDate)
            .all(&self.conn)
            .await
            .context("Failed to query upcoming hearings")?;

        Ok(Self::map_rows(rows))
    }

    /// Cases whose hearing date equals `date` exactly.
    pub async fn due_on(&self, date: NaiveDate) -> Result<Vec<CaseWithClient>> {
        let rows = cases::Entity::find()
            .find_also_related(clients::Entity)
            .filter(cases::Column::NextHearingDate.eq(date))
            .order_by_asc(cases::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query hearings due on date")?;

        Ok(Self::map_rows(rows))
    }

    pub async fn count_by_status(&self, status: CaseStatus) -> Result<u64> {
        cases::Entity::find()
            .filter(cases::Column::Status.eq(status.to_string()))
            .count(&self.conn)
            .await
            .context("Failed to count cases by status")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_display() {
        assert_eq!(CaseStatus::from_str("Active"), Ok(CaseStatus::Active));
        assert_eq!(CaseStatus::from_str("Closed"), Ok(CaseStatus::Closed));
        assert_eq!(CaseStatus::Active.to_string(), "Active");
        assert_eq!(CaseStatus::Closed.to_string(), "Closed");
    }

    #[test]
    fn status_rejects_unknown_values() {
        assert!(CaseStatus::from_str("Pending").is_err());
        assert!(CaseStatus::from_str("active").is_err());
        assert!(CaseStatus::from_str("").is_err());
    }
}
