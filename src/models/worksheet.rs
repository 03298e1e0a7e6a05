//! Worksheet models.

use chrono::{DateTime, SecondsFormat, Utc};
use sea_orm::FromQueryResult;
use serde::Serialize;
use utoipa::ToSchema;

use super::{PageInfo, PhotoResponse};
use crate::entity::worksheet;

/// Values written by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksheetInput {
    pub number: String,
    pub name: String,
    pub zone_id: Option<i32>,
    pub team_id: Option<i32>,
}

/// A worksheet joined with its zone and team names.
#[derive(Debug, Clone, FromQueryResult)]
pub struct WorksheetDetail {
    pub id: i32,
    pub number: String,
    pub name: String,
    pub zone_id: Option<i32>,
    pub team_id: Option<i32>,
    pub created: DateTime<Utc>,
    pub zone_name: Option<String>,
    pub team_name: Option<String>,
}

/// Worksheet row in API listings.
#[derive(Debug, Serialize, ToSchema)]
pub struct WorksheetSummary {
    pub id: i32,
    pub number: String,
    pub name: String,
    pub created: String,
}

impl From<&worksheet::Model> for WorksheetSummary {
    fn from(m: &worksheet::Model) -> Self {
        WorksheetSummary {
            id: m.id,
            number: m.number.clone(),
            name: m.name.clone(),
            created: m.created.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Response body of worksheet listings.
#[derive(Debug, Serialize, ToSchema)]
pub struct WorksheetListResponse {
    pub worksheets: Vec<WorksheetSummary>,
}

/// Worksheet with assignment names, as returned by the JSON API.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetView {
    pub id: i32,
    pub number: String,
    pub name: String,
    pub zone_id: Option<i32>,
    pub zone_name: Option<String>,
    pub team_id: Option<i32>,
    pub team_name: Option<String>,
    pub created: String,
}

impl From<&WorksheetDetail> for WorksheetView {
    fn from(d: &WorksheetDetail) -> Self {
        WorksheetView {
            id: d.id,
            number: d.number.clone(),
            name: d.name.clone(),
            zone_id: d.zone_id,
            zone_name: d.zone_name.clone(),
            team_id: d.team_id,
            team_name: d.team_name.clone(),
            created: d.created.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Response body of `GET /api/worksheet/{id}`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetShowResponse {
    pub worksheet: WorksheetView,
    pub photos: Vec<PhotoResponse>,
    pub page_info: PageInfo,
}
