//! Photo models.

use chrono::SecondsFormat;
use serde::Serialize;
use utoipa::ToSchema;

use crate::entity::photo;

/// Public URL path of a stored photo, `/store/{worksheet_id}/{file_name}`.
pub fn store_path(worksheet_id: i32, file_name: &str) -> String {
    format!("/store/{}/{}", worksheet_id, urlencoding::encode(file_name))
}

/// Photo as returned by the JSON API.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoResponse {
    pub id: i32,
    pub running_number: i32,
    /// Absolute URL built from the request host
    #[serde(rename = "fileURL")]
    pub file_url: String,
    pub created: String,
}

impl PhotoResponse {
    pub fn from_model(m: &photo::Model, host: &str) -> Self {
        PhotoResponse {
            id: m.id,
            running_number: m.running_number,
            file_url: format!("http://{}{}", host, store_path(m.worksheet_id, &m.file_name)),
            created: m.created.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}
