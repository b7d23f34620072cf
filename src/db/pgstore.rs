use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

use super::store::{LifecycleMode, StoreError};
use crate::models::{Document, NewDocument};

const SCHEMA_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS documents (
        uid        TEXT PRIMARY KEY,
        owner_id   TEXT NOT NULL,
        name       TEXT NOT NULL,
        payload    JSONB NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        cloned     BOOLEAN NOT NULL DEFAULT FALSE,
        active     BOOLEAN NOT NULL DEFAULT TRUE
    )
"#;

/// Postgres-backed document store
pub struct PgDocStore {
    pool: PgPool,
    lifecycle: LifecycleMode,
}

impl PgDocStore {
    /// Create the connection pool and make sure the documents table exists
    pub async fn connect(database_url: &str, lifecycle: LifecycleMode) -> Result<Self, StoreError> {
        info!("Connecting to database...");

        let pool = PgPoolOptions::new()
            .max_connections(20)
            .min_connections(2)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .connect(database_url)
            .await?;

        sqlx::query(SCHEMA_SQL).execute(&pool).await?;

        info!("Database connection pool created successfully");

        Ok(Self { pool, lifecycle })
    }

    pub fn lifecycle(&self) -> LifecycleMode {
        self.lifecycle
    }

    pub async fn find_by_id(&self, uid: &str) -> Result<Option<Document>, StoreError> {
        let document = sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE uid = $1")
            .bind(uid)
            .fetch_optional(&self.pool)
            .await?;
        Ok(document)
    }

    pub async fn find_by_id_and_owner(
        &self,
        uid: &str,
        owner_id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let document = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE uid = $1 AND owner_id = $2",
        )
        .bind(uid)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(document)
    }

    pub async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Document>, StoreError> {
        let documents = if self.lifecycle == LifecycleMode::Soft {
            sqlx::query_as::<_, Document>(
                "SELECT * FROM documents WHERE owner_id = $1 AND active = TRUE ORDER BY created_at",
            )
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Document>(
                "SELECT * FROM documents WHERE owner_id = $1 ORDER BY created_at",
            )
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?
        };
        Ok(documents)
    }

    pub async fn find_active_by_name(&self, name: &str) -> Result<Option<Document>, StoreError> {
        let document = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE name = $1 AND active = TRUE LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(document)
    }

    pub async fn create(&self, new: NewDocument) -> Result<Document, StoreError> {
        let document = sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents (uid, owner_id, name, payload, cloned)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&new.uid)
        .bind(&new.owner_id)
        .bind(&new.name)
        .bind(&new.payload)
        .bind(new.cloned)
        .fetch_one(&self.pool)
        .await?;

        info!("Document created: {}", document.uid);
        Ok(document)
    }

    pub async fn create_if_absent(&self, new: NewDocument) -> Result<Document, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO documents (uid, owner_id, name, payload, cloned)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (uid) DO NOTHING
            "#,
        )
        .bind(&new.uid)
        .bind(&new.owner_id)
        .bind(&new.name)
        .bind(&new.payload)
        .bind(new.cloned)
        .execute(&self.pool)
        .await?;

        // The row exists now, either ours or a concurrent first-joiner's
        let document = sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE uid = $1")
            .bind(&new.uid)
            .fetch_one(&self.pool)
            .await?;
        Ok(document)
    }

    pub async fn rename(&self, uid: &str, name: &str) -> Result<(), StoreError> {
        sqlx::query("UPDATE documents SET name = $2 WHERE uid = $1")
            .bind(uid)
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn update_payload(
        &self,
        uid: &str,
        payload: serde_json::Value,
    ) -> Result<(), StoreError> {
        sqlx::query("UPDATE documents SET payload = $2 WHERE uid = $1")
            .bind(uid)
            .bind(payload)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn soft_delete(&self, uid: &str) -> Result<(), StoreError> {
        sqlx::query("UPDATE documents SET active = FALSE WHERE uid = $1")
            .bind(uid)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn hard_delete(&self, uid: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM documents WHERE uid = $1")
            .bind(uid)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
