//! Posted form bodies.
//!
//! Only the login form carries field-level validation. The other forms only
//! decode; a blank or missing numeric field reads as 0.

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

use crate::models::WorksheetInput;

/// Field-level validation failures, keyed by field name.
pub type Failures = BTreeMap<&'static str, String>;

/// `POST /user/login` and `POST /api/user/login`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    /// Both fields must be non-blank.
    pub fn validate(&self) -> Failures {
        let mut failures = Failures::new();
        if self.username.trim().is_empty() {
            failures.insert("Username", "Username is required".to_string());
        }
        if self.password.trim().is_empty() {
            failures.insert("Password", "Password is required".to_string());
        }
        failures
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TeamForm {
    pub team_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ZoneForm {
    pub zone_name: String,
}

/// Worksheet create and edit form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorksheetForm {
    pub worksheet_number: String,
    pub worksheet_name: String,
    #[serde(deserialize_with = "blank_as_zero")]
    pub worksheet_zone_id: i32,
    #[serde(deserialize_with = "blank_as_zero")]
    pub worksheet_team_id: i32,
}

impl WorksheetForm {
    /// Values to store; an id of 0 stores no assignment.
    pub fn to_input(&self) -> WorksheetInput {
        WorksheetInput {
            number: self.worksheet_number.trim().to_string(),
            name: self.worksheet_name.clone(),
            zone_id: Some(self.worksheet_zone_id).filter(|id| *id > 0),
            team_id: Some(self.worksheet_team_id).filter(|id| *id > 0),
        }
    }
}

/// Decode an integer form value, reading a blank value as 0.
fn blank_as_zero<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<i32>()
        .map_err(|_| serde::de::Error::custom(format!("invalid number: {}", raw)))
}
