use crate::{
    db::{DbPool, tables::UserTable},
    error::{AppError, Result},
    models::user::{NewUser, User},
};

/// User store for database operations
pub struct UserStore {
    pool: DbPool,
}

impl UserStore {
    /// Create a new UserStore with the provided database pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a user. A taken username yields `AppError::Duplicate`.
    pub async fn insert(&self, user: &NewUser) -> Result<User> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (
                username, hashed_password, can_search, can_download, can_upload,
                user_group, token_start_time, token_api_interactions,
                password_salt, password_rounds
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.username)
        .bind(&user.hashed_password)
        .bind(user.permissions.can_search)
        .bind(user.permissions.can_download)
        .bind(user.permissions.can_upload)
        .bind(&user.user_group)
        .bind(user.token_start_time)
        .bind(user.token_api_interactions)
        .bind(&user.password_salt)
        .bind(user.password_rounds)
        .execute(&self.pool)
        .await
        .map_err(|e| duplicate_or(e, &user.username))?;

        tracing::debug!("Inserted user {}", user.username);
        self.get_user_by_id(result.last_insert_rowid()).await
    }

    /// Get a user by ID
    pub async fn get_user_by_id(&self, id: i64) -> Result<User> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }
}

fn duplicate_or(err: sqlx::Error, username: &str) -> AppError {
    if matches!(&err, sqlx::Error::Database(db) if db.is_unique_violation()) {
        AppError::Duplicate {
            table: UserTable::TABLE_NAME,
            key: username.to_string(),
        }
    } else {
        AppError::Database(err)
    }
}
