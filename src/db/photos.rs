//! Database queries for photos.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::warn;

use crate::entity::photo::{self, ActiveModel, Entity as Photo};
use crate::error::{AppError, AppResult};
use crate::models::ListQuery;

use super::{DbPool, is_unique_violation};

/// How many times an auto-assigned running number is recomputed after a collision.
const RUNNING_NUMBER_ATTEMPTS: usize = 3;

/// `max(running_number) + 1` for a worksheet, 1 when it has no photos.
async fn next_running_number<C: ConnectionTrait>(conn: &C, worksheet_id: i32) -> AppResult<i32> {
    let max: Option<Option<i32>> = Photo::find()
        .select_only()
        .column_as(photo::Column::RunningNumber.max(), "max_running_number")
        .filter(photo::Column::WorksheetId.eq(worksheet_id))
        .into_tuple()
        .one(conn)
        .await
        .map_err(|e| AppError::Database(format!("Failed to read running numbers: {}", e)))?;

    Ok(max.flatten().unwrap_or(0) + 1)
}

impl DbPool {
    /// Paginated photos of a worksheet in upload order, filtered by file name substring.
    pub async fn list_photos(
        &self,
        worksheet_id: i32,
        query: &ListQuery,
    ) -> AppResult<(Vec<photo::Model>, u64)> {
        let mut select = Photo::find().filter(photo::Column::WorksheetId.eq(worksheet_id));

        if !query.q.is_empty() {
            select = select.filter(photo::Column::FileName.contains(&query.q));
        }

        let total = select
            .clone()
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count photos: {}", e)))?;

        let photos = select
            .order_by_asc(photo::Column::Id)
            .offset(query.start)
            .limit(query.max_results)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list photos: {}", e)))?;

        Ok((photos, total))
    }

    /// Insert a photo row.
    ///
    /// A running number below 1 (or none) is auto-assigned as `max + 1` inside a
    /// transaction. The unique `(worksheet_id, running_number)` index turns a
    /// concurrent collision into a retry; an explicit number that collides is
    /// rejected as invalid input.
    pub async fn insert_photo(
        &self,
        worksheet_id: i32,
        running_number: Option<i32>,
        file_name: &str,
    ) -> AppResult<photo::Model> {
        let explicit = running_number.filter(|n| *n >= 1);

        for attempt in 1..=RUNNING_NUMBER_ATTEMPTS {
            let txn = self
                .connection()
                .begin()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            let number = match explicit {
                Some(n) => n,
                None => next_running_number(&txn, worksheet_id).await?,
            };

            let model = ActiveModel {
                id: NotSet,
                worksheet_id: Set(worksheet_id),
                running_number: Set(number),
                file_name: Set(file_name.to_string()),
                location: Set(format!("{}/{}", worksheet_id, file_name)),
                created: Set(Utc::now()),
            };

            match model.insert(&txn).await {
                Ok(inserted) => {
                    txn.commit().await.map_err(|e| {
                        AppError::Database(format!("Failed to commit photo insert: {}", e))
                    })?;
                    return Ok(inserted);
                }
                Err(e) if is_unique_violation(&e) => {
                    txn.rollback().await.map_err(|e| {
                        AppError::Database(format!("Failed to roll back photo insert: {}", e))
                    })?;

                    if explicit.is_some() {
                        return Err(AppError::InvalidInput(format!(
                            "Running number {} is already used in this worksheet",
                            number
                        )));
                    }

                    warn!(
                        worksheet_id,
                        running_number = number,
                        attempt,
                        "Running number collision, retrying"
                    );
                }
                Err(e) => {
                    return Err(AppError::Database(format!("Failed to insert photo: {}", e)));
                }
            }
        }

        Err(AppError::Database(format!(
            "Failed to assign a running number for worksheet {} after {} attempts",
            worksheet_id, RUNNING_NUMBER_ATTEMPTS
        )))
    }

    /// Delete a photo row; false when it did not exist.
    pub async fn delete_photo(&self, id: i32) -> AppResult<bool> {
        let result = Photo::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete photo: {}", e)))?;
        Ok(result.rows_affected > 0)
    }
}
