//! PostgreSQL implementation of the ProfileRepository trait.
//!
//! Profiles live in the `user_profile` table. Phone-number uniqueness is
//! backed by the `user_profile_phone_number_key` constraint; violations are
//! reported as `DomainError::UniqueViolation` so the service can classify
//! them as conflicts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

use ps_core::domain::entities::{NewProfile, Profile};
use ps_core::errors::DomainError;
use ps_core::repositories::{ProfileRepository, ProfileTransaction};

const SELECT_BY_ID: &str = r#"
    SELECT id, full_name, phone_number, password, success_count, created_at, updated_at
    FROM user_profile
    WHERE id = $1
"#;

const SELECT_BY_PHONE: &str = r#"
    SELECT id, full_name, phone_number, password, success_count, created_at, updated_at
    FROM user_profile
    WHERE phone_number = $1
"#;

const INSERT_PROFILE: &str = r#"
    INSERT INTO user_profile (full_name, phone_number, password, created_at, updated_at)
    VALUES ($1, $2, $3, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
    RETURNING id
"#;

const UPDATE_PROFILE: &str = r#"
    UPDATE user_profile
    SET full_name = $1, phone_number = $2, updated_at = CURRENT_TIMESTAMP
    WHERE id = $3
"#;

const INCREMENT_LOGIN_COUNT: &str = r#"
    UPDATE user_profile
    SET success_count = success_count + 1, updated_at = CURRENT_TIMESTAMP
    WHERE id = $1
"#;

/// PostgreSQL implementation of ProfileRepository
#[derive(Clone)]
pub struct PgProfileRepository {
    /// Database connection pool
    pool: PgPool,
}

impl PgProfileRepository {
    /// Create a new PostgreSQL profile repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    type Tx = PgProfileTransaction;

    async fn begin(&self) -> Result<Self::Tx, DomainError> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(PgProfileTransaction { tx })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Profile>, DomainError> {
        // Ids that are not UUIDs cannot exist in the table
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let row = sqlx::query(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_profile).transpose()
    }

    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<Profile>, DomainError> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx_error)?;
        fetch_by_phone(&mut conn, phone_number).await
    }
}

/// Transaction handle; dropping it without commit rolls back
pub struct PgProfileTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl ProfileTransaction for PgProfileTransaction {
    async fn find_by_phone(&mut self, phone_number: &str) -> Result<Option<Profile>, DomainError> {
        fetch_by_phone(&mut self.tx, phone_number).await
    }

    async fn insert_profile(&mut self, profile: NewProfile) -> Result<String, DomainError> {
        let id: Uuid = sqlx::query_scalar(INSERT_PROFILE)
            .bind(&profile.full_name)
            .bind(&profile.phone_number)
            .bind(&profile.password_hash)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(id.to_string())
    }

    async fn update_profile_by_id(
        &mut self,
        id: &str,
        full_name: &str,
        phone_number: &str,
    ) -> Result<bool, DomainError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(false);
        };

        let result = sqlx::query(UPDATE_PROFILE)
            .bind(full_name)
            .bind(phone_number)
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_login_count(&mut self, id: &str) -> Result<(), DomainError> {
        let id = Uuid::parse_str(id).map_err(|e| DomainError::Database {
            message: format!("Invalid profile id: {}", e),
        })?;

        sqlx::query(INCREMENT_LOGIN_COUNT)
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn commit(self) -> Result<(), DomainError> {
        self.tx.commit().await.map_err(map_sqlx_error)
    }

    async fn rollback(self) -> Result<(), DomainError> {
        self.tx.rollback().await.map_err(map_sqlx_error)
    }
}

async fn fetch_by_phone(
    conn: &mut PgConnection,
    phone_number: &str,
) -> Result<Option<Profile>, DomainError> {
    let row = sqlx::query(SELECT_BY_PHONE)
        .bind(phone_number)
        .fetch_optional(conn)
        .await
        .map_err(map_sqlx_error)?;

    row.as_ref().map(row_to_profile).transpose()
}

/// Convert a `user_profile` row to a Profile entity
fn row_to_profile(row: &PgRow) -> Result<Profile, DomainError> {
    let column = |name: &str, e: sqlx::Error| DomainError::Database {
        message: format!("Failed to get {}: {}", name, e),
    };

    Ok(Profile {
        id: row
            .try_get::<Uuid, _>("id")
            .map_err(|e| column("id", e))?
            .to_string(),
        full_name: row.try_get("full_name").map_err(|e| column("full_name", e))?,
        phone_number: row
            .try_get("phone_number")
            .map_err(|e| column("phone_number", e))?,
        password_hash: row.try_get("password").map_err(|e| column("password", e))?,
        success_login_count: row
            .try_get("success_count")
            .map_err(|e| column("success_count", e))?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| column("created_at", e))?,
        updated_at: row
            .try_get::<DateTime<Utc>, _>("updated_at")
            .map_err(|e| column("updated_at", e))?,
    })
}

/// Unique-constraint violations keep their constraint name; everything else
/// becomes a generic database error
pub(crate) fn map_sqlx_error(error: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.is_unique_violation() {
            return DomainError::UniqueViolation {
                constraint: db_error.constraint().unwrap_or("unknown").to_string(),
            };
        }
    }
    tracing::error!(error = %error, "Database query failed");
    DomainError::Database {
        message: error.to_string(),
    }
}
