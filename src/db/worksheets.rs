//! Database queries for worksheets.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, NotSet, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set,
};

use crate::entity::worksheet::{self, ActiveModel, Entity as Worksheet};
use crate::entity::{team, zone};
use crate::error::{AppError, AppResult};
use crate::models::{ListQuery, WorksheetDetail, WorksheetInput};

use super::DbPool;

impl DbPool {
    /// Paginated worksheets, newest first, filtered by number substring.
    pub async fn list_worksheets(
        &self,
        query: &ListQuery,
    ) -> AppResult<(Vec<worksheet::Model>, u64)> {
        let mut select = Worksheet::find();

        if !query.q.is_empty() {
            select = select.filter(worksheet::Column::Number.contains(&query.q));
        }

        // Count total before pagination
        let total = select
            .clone()
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count worksheets: {}", e)))?;

        let worksheets = select
            .order_by_desc(worksheet::Column::Created)
            .order_by_desc(worksheet::Column::Id)
            .offset(query.start)
            .limit(query.max_results)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list worksheets: {}", e)))?;

        Ok((worksheets, total))
    }

    /// Distinct creation dates (`YYYY-MM-DD`, UTC), newest first.
    pub async fn list_distinct_dates(&self) -> AppResult<Vec<String>> {
        let created: Vec<DateTime<Utc>> = Worksheet::find()
            .select_only()
            .column(worksheet::Column::Created)
            .order_by_desc(worksheet::Column::Created)
            .into_tuple()
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list worksheet dates: {}", e)))?;

        let mut dates: Vec<String> = Vec::new();
        for ts in created {
            let day = ts.format("%Y-%m-%d").to_string();
            if dates.last() != Some(&day) {
                dates.push(day);
            }
        }

        Ok(dates)
    }

    /// Worksheets created on the given UTC day.
    pub async fn list_worksheets_by_date(
        &self,
        date: NaiveDate,
    ) -> AppResult<Vec<worksheet::Model>> {
        let Some(midnight) = date.and_hms_opt(0, 0, 0) else {
            return Ok(Vec::new());
        };
        let day_start = midnight.and_utc();
        let day_end = day_start + Duration::days(1);

        Worksheet::find()
            .filter(worksheet::Column::Created.gte(day_start))
            .filter(worksheet::Column::Created.lt(day_end))
            .order_by_desc(worksheet::Column::Created)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list worksheets by date: {}", e)))
    }

    /// Worksheets assigned to a zone.
    pub async fn list_worksheets_by_zone(&self, zone_id: i32) -> AppResult<Vec<worksheet::Model>> {
        Worksheet::find()
            .filter(worksheet::Column::ZoneId.eq(zone_id))
            .order_by_desc(worksheet::Column::Created)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list worksheets by zone: {}", e)))
    }

    /// Worksheets assigned to a team.
    pub async fn list_worksheets_by_team(&self, team_id: i32) -> AppResult<Vec<worksheet::Model>> {
        Worksheet::find()
            .filter(worksheet::Column::TeamId.eq(team_id))
            .order_by_desc(worksheet::Column::Created)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list worksheets by team: {}", e)))
    }

    /// Get a worksheet with its zone and team names.
    ///
    /// When assignments are required, a worksheet whose zone or team does not
    /// resolve reads as absent.
    pub async fn get_worksheet(&self, id: i32) -> AppResult<Option<WorksheetDetail>> {
        let detail = Worksheet::find_by_id(id)
            .join(
                sea_orm::JoinType::LeftJoin,
                worksheet::Relation::Zone.def(),
            )
            .join(
                sea_orm::JoinType::LeftJoin,
                worksheet::Relation::Team.def(),
            )
            .column_as(zone::Column::Name, "zone_name")
            .column_as(team::Column::Name, "team_name")
            .into_model::<WorksheetDetail>()
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get worksheet: {}", e)))?;

        if self.require_assignment() {
            return Ok(detail.filter(|d| d.zone_name.is_some() && d.team_name.is_some()));
        }

        Ok(detail)
    }

    /// Insert a new worksheet.
    pub async fn insert_worksheet(&self, input: &WorksheetInput) -> AppResult<worksheet::Model> {
        let model = ActiveModel {
            id: NotSet,
            number: Set(input.number.clone()),
            name: Set(input.name.clone()),
            zone_id: Set(input.zone_id),
            team_id: Set(input.team_id),
            created: Set(Utc::now()),
        };

        model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert worksheet: {}", e)))
    }

    /// Overwrite every mutable column. A missing id updates nothing.
    pub async fn update_worksheet(&self, id: i32, input: &WorksheetInput) -> AppResult<()> {
        Worksheet::update_many()
            .set(ActiveModel {
                id: NotSet,
                number: Set(input.number.clone()),
                name: Set(input.name.clone()),
                zone_id: Set(input.zone_id),
                team_id: Set(input.team_id),
                created: NotSet,
            })
            .filter(worksheet::Column::Id.eq(id))
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update worksheet: {}", e)))?;

        Ok(())
    }

    /// Delete a worksheet row. Photos and stored files are left in place.
    pub async fn delete_worksheet(&self, id: i32) -> AppResult<bool> {
        let result = Worksheet::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete worksheet: {}", e)))?;

        Ok(result.rows_affected > 0)
    }
}
