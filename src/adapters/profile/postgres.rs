//! PostgreSQL adapter for ProfileStore
//!
//! Each user is one row in `user_profiles`; the scored traits are kept as a
//! JSONB document in the same shape the HTTP API returns.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::survey::TraitProfile;
use crate::domain::user::{PhoneNumber, Profile};
use crate::ports::ProfileStore;

/// PostgreSQL implementation of ProfileStore
#[derive(Clone)]
pub struct PostgresProfileStore {
    pool: PgPool,
}

impl PostgresProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply embedded migrations.
    pub async fn migrate(&self) -> Result<(), DomainError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Migration failed: {}", e)))
    }

    fn from_row(row: &sqlx::postgres::PgRow) -> Result<Profile, DomainError> {
        let user_id: String = row.try_get("user_id").map_err(db_error)?;
        let phone_number: Option<String> = row.try_get("phone_number").map_err(db_error)?;
        let traits: Json<TraitProfile> = row.try_get("mbti_traits").map_err(db_error)?;
        let scored_at: chrono::DateTime<chrono::Utc> = row.try_get("scored_at").map_err(db_error)?;

        let user_id = UserId::new(user_id)
            .map_err(|e| DomainError::storage(format!("Invalid stored user id: {}", e)))?;
        let phone_number = phone_number
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|e| DomainError::storage(format!("Invalid stored phone number: {}", e)))?;

        Ok(Profile::new(
            user_id,
            phone_number,
            traits.0,
            Timestamp::from_datetime(scored_at),
        ))
    }
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::storage(format!("Database error: {}", e))
}

#[async_trait]
impl ProfileStore for PostgresProfileStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, phone_number, mbti_traits, scored_at
            FROM user_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn upsert(&self, profile: &Profile) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO user_profiles (user_id, phone_number, mbti_traits, scored_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE
            SET phone_number = EXCLUDED.phone_number,
                mbti_traits = EXCLUDED.mbti_traits,
                scored_at = EXCLUDED.scored_at
            "#,
        )
        .bind(profile.user_id().as_str())
        .bind(profile.phone_number().map(|p| p.as_str()))
        .bind(Json(profile.traits()))
        .bind(*profile.scored_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(user_id = %profile.user_id(), error = %e, "Profile upsert failed");
            db_error(e)
        })?;

        Ok(())
    }
}
