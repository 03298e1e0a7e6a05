//! Database operations for users.

use chrono::Utc;
use sea_orm::*;

use crate::auth::password;
use crate::entity::user::{self, Entity as User};
use crate::error::{AppError, AppResult};

use super::is_unique_violation;

/// Errors from user provisioning and login.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("A user with this name already exists")]
    DuplicateName,

    /// Unknown name and wrong password both land here.
    #[error("Username or Password is incorrect")]
    InvalidCredentials,

    #[error("Name and password are required")]
    MissingFields,

    #[error("User {0} not found")]
    NotFound(String),

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DuplicateName | UserError::MissingFields => {
                AppError::InvalidInput(err.to_string())
            }
            UserError::InvalidCredentials => AppError::Unauthorized(err.to_string()),
            UserError::NotFound(name) => AppError::NotFound(format!("User {}", name)),
            UserError::Hash(msg) => AppError::Internal(msg),
            UserError::Database(e) => AppError::Database(e.to_string()),
        }
    }
}

/// Create a user with an Argon2id password hash.
pub async fn insert_user(
    db: &DatabaseConnection,
    name: &str,
    plain_password: &str,
) -> Result<user::Model, UserError> {
    let name = name.trim();
    if name.is_empty() || plain_password.trim().is_empty() {
        return Err(UserError::MissingFields);
    }

    let hash = password::hash_password(plain_password).map_err(|e| UserError::Hash(e.to_string()))?;

    let model = user::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        password_hash: Set(hash),
        created: Set(Utc::now()),
    };

    match model.insert(db).await {
        Ok(m) => Ok(m),
        Err(e) if is_unique_violation(&e) => Err(UserError::DuplicateName),
        Err(e) => Err(UserError::Database(e)),
    }
}

/// Replace the password of an existing user.
pub async fn change_password(
    db: &DatabaseConnection,
    name: &str,
    plain_password: &str,
) -> Result<(), UserError> {
    if plain_password.trim().is_empty() {
        return Err(UserError::MissingFields);
    }

    let existing = User::find()
        .filter(user::Column::Name.eq(name.trim()))
        .one(db)
        .await?
        .ok_or_else(|| UserError::NotFound(name.to_string()))?;

    let hash = password::hash_password(plain_password).map_err(|e| UserError::Hash(e.to_string()))?;

    let mut active: user::ActiveModel = existing.into();
    active.password_hash = Set(hash);
    active.update(db).await?;

    Ok(())
}

/// Check a name/password pair and return the user id.
pub async fn verify_user(
    db: &DatabaseConnection,
    name: &str,
    plain_password: &str,
) -> Result<i32, UserError> {
    let existing = User::find()
        .filter(user::Column::Name.eq(name.trim()))
        .one(db)
        .await?;

    let Some(m) = existing else {
        password::verify_without_user(plain_password);
        return Err(UserError::InvalidCredentials);
    };

    match password::verify_password(plain_password, &m.password_hash) {
        Ok(true) => Ok(m.id),
        Ok(false) => Err(UserError::InvalidCredentials),
        Err(e) => Err(UserError::Hash(e.to_string())),
    }
}

/// Find a user by ID.
pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> AppResult<Option<user::Model>> {
    let result = User::find_by_id(id).one(db).await?;
    Ok(result)
}

/// All users ordered by name.
pub async fn list_all(db: &DatabaseConnection) -> AppResult<Vec<user::Model>> {
    let users = User::find()
        .order_by_asc(user::Column::Name)
        .all(db)
        .await?;
    Ok(users)
}
