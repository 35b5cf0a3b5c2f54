//! Equipment DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::equipment::{EquipmentInput, ServiceInput};
use crate::domain::equipment::{Equipment, EquipmentQuery, EquipmentStatus, MaintenanceRecord};
use crate::domain::incident::TaskPriority;
use crate::interfaces::http::common::{parse_date, ApiError};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentDto {
    pub id: i64,
    pub name: String,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub installation_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub status: String,
    pub last_maintenance_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Equipment> for EquipmentDto {
    fn from(e: Equipment) -> Self {
        Self {
            id: e.id,
            name: e.name,
            model: e.model,
            serial_number: e.serial_number,
            installation_date: e.installation_date,
            location: e.location,
            status: e.status.to_string(),
            last_maintenance_date: e.last_maintenance_date,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecordDto {
    pub id: i64,
    pub equipment_id: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub estimated_hours: i32,
    pub priority: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<MaintenanceRecord> for MaintenanceRecordDto {
    fn from(r: MaintenanceRecord) -> Self {
        Self {
            id: r.id,
            equipment_id: r.equipment_id,
            start_date: r.start_date,
            end_date: r.end_date,
            estimated_hours: r.estimated_hours,
            priority: r.priority.to_string(),
            description: r.description,
            created_at: r.created_at,
        }
    }
}

/// Create or partial update; absent fields are left alone
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentRequest {
    pub name: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    /// `YYYY-MM-DD`
    pub installation_date: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
}

impl EquipmentRequest {
    pub fn into_input(self) -> Result<EquipmentInput, ApiError> {
        let status = match self.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => Some(EquipmentStatus::parse(s)?),
            None => None,
        };
        Ok(EquipmentInput {
            installation_date: parse_date(self.installation_date.as_deref(), "installationDate")?,
            name: self.name,
            model: self.model,
            serial_number: self.serial_number,
            location: self.location,
            status,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EquipmentStatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    /// `YYYY-MM-DD`, defaults to today
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub estimated_hours: Option<i32>,
    /// LOW, MEDIUM or HIGH
    pub priority: Option<String>,
    pub description: Option<String>,
}

impl MaintenanceRequest {
    pub fn into_input(self) -> Result<ServiceInput, ApiError> {
        let priority = match self.priority.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(p) => Some(TaskPriority::parse(p)?),
            None => None,
        };
        Ok(ServiceInput {
            start_date: parse_date(self.start_date.as_deref(), "startDate")?,
            end_date: parse_date(self.end_date.as_deref(), "endDate")?,
            estimated_hours: self.estimated_hours,
            priority,
            description: self.description,
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct HistoryParams {
    /// `YYYY-MM-DD`, inclusive
    pub from: Option<String>,
    /// `YYYY-MM-DD`, inclusive
    pub to: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct EquipmentSearchParams {
    pub name: Option<String>,
    pub model: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
}

impl EquipmentSearchParams {
    pub fn into_query(self) -> Result<EquipmentQuery, ApiError> {
        let status = match self.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => Some(EquipmentStatus::parse(s)?),
            None => None,
        };
        Ok(EquipmentQuery {
            name: self.name,
            model: self.model,
            location: self.location,
            status,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReliabilityDto {
    pub equipment_id: i64,
    /// 0.0 to 1.0
    pub reliability: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_reject_unknown_enums_and_dates() {
        let bad_status = EquipmentRequest { status: Some("BROKEN".into()), ..Default::default() };
        assert!(bad_status.into_input().is_err());

        let bad_date = EquipmentRequest {
            installation_date: Some("yesterday".into()),
            ..Default::default()
        };
        assert!(bad_date.into_input().is_err());

        let input = MaintenanceRequest {
            start_date: Some("2025-03-01".into()),
            priority: Some("high".into()),
            description: Some("Seals".into()),
            ..Default::default()
        }
        .into_input()
        .unwrap();
        assert_eq!(input.priority, Some(TaskPriority::High));
        assert_eq!(input.start_date, NaiveDate::from_ymd_opt(2025, 3, 1));

        let urgent = MaintenanceRequest { priority: Some("URGENT".into()), ..Default::default() };
        assert!(urgent.into_input().is_err());
    }
}
