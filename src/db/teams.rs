//! Database queries for teams.

use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};

use crate::entity::team::{self, ActiveModel, Entity as Team};
use crate::error::{AppError, AppResult};

use super::DbPool;

impl DbPool {
    /// All teams ordered by name.
    pub async fn list_teams(&self) -> AppResult<Vec<team::Model>> {
        Team::find()
            .order_by_asc(team::Column::Name)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list teams: {}", e)))
    }

    /// Get a team by ID.
    pub async fn get_team(&self, id: i32) -> AppResult<Option<team::Model>> {
        Team::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get team: {}", e)))
    }

    /// Insert a new team.
    pub async fn insert_team(&self, name: &str) -> AppResult<team::Model> {
        let model = ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
        };

        model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert team: {}", e)))
    }

    /// Overwrite a team's name. A missing id updates nothing.
    pub async fn update_team(&self, id: i32, name: &str) -> AppResult<()> {
        Team::update_many()
            .set(ActiveModel {
                id: NotSet,
                name: Set(name.to_string()),
            })
            .filter(team::Column::Id.eq(id))
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update team: {}", e)))?;

        Ok(())
    }
}
