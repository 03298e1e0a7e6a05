//! Database queries for zones.

use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};

use crate::entity::zone::{self, ActiveModel, Entity as Zone};
use crate::error::{AppError, AppResult};

use super::DbPool;

impl DbPool {
    /// All zones ordered by name.
    pub async fn list_zones(&self) -> AppResult<Vec<zone::Model>> {
        Zone::find()
            .order_by_asc(zone::Column::Name)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list zones: {}", e)))
    }

    /// Get a zone by ID.
    pub async fn get_zone(&self, id: i32) -> AppResult<Option<zone::Model>> {
        Zone::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get zone: {}", e)))
    }

    /// Insert a new zone.
    pub async fn insert_zone(&self, name: &str) -> AppResult<zone::Model> {
        let model = ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
        };

        model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert zone: {}", e)))
    }

    /// Overwrite a zone's name. A missing id updates nothing.
    pub async fn update_zone(&self, id: i32, name: &str) -> AppResult<()> {
        Zone::update_many()
            .set(ActiveModel {
                id: NotSet,
                name: Set(name.to_string()),
            })
            .filter(zone::Column::Id.eq(id))
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update zone: {}", e)))?;

        Ok(())
    }
}
