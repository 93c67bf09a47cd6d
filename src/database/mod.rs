use std::time::Duration;

use crate::models::Dato;
use sqlx::{postgres::PgPoolOptions, PgPool, Result};

/// Connects to a PostgreSQL database with the given `db_url`, returning a connection pool for accessing it
pub async fn connect_sqlx(db_url: &str) -> sqlx::PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(2))
        .idle_timeout(Duration::from_secs(30))
        .max_connections(32)
        .min_connections(4)
        .connect(db_url)
        .await
        .expect("Could not connect to the database")
}

pub struct PostgresDatabase {
    sqlx_db: PgPool,
}

impl PostgresDatabase {
    pub fn new(sqlx_db: PgPool) -> Self {
        PostgresDatabase { sqlx_db }
    }

    /// Creates the `datos` table on first start.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS datos (
                id SERIAL PRIMARY KEY,
                nombre TEXT NOT NULL,
                descripcion TEXT NOT NULL,
                "timestamp" TEXT NOT NULL,
                client_id BIGINT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.sqlx_db)
        .await?;
        Ok(())
    }

    /// All datos, newest first
    pub async fn list_datos(&self) -> Result<Vec<Dato>> {
        sqlx::query_as::<_, Dato>(
            r#"
            SELECT id, nombre, descripcion, "timestamp", client_id, created_at
            FROM datos
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.sqlx_db)
        .await
    }

    /// Create a new dato using a reference to a `Dato` struct
    pub async fn create_dato(&self, new_dato: &Dato) -> Result<Dato> {
        sqlx::query_as::<_, Dato>(
            r#"
            INSERT INTO datos (nombre, descripcion, "timestamp", client_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, nombre, descripcion, "timestamp", client_id, created_at
            "#,
        )
        .bind(&new_dato.nombre)
        .bind(&new_dato.descripcion)
        .bind(&new_dato.timestamp)
        .bind(new_dato.client_id)
        .fetch_one(&self.sqlx_db)
        .await
    }

    /// Get a dato by ID
    pub async fn get_dato_by_id(&self, id: i32) -> Result<Option<Dato>> {
        sqlx::query_as::<_, Dato>(
            r#"
            SELECT id, nombre, descripcion, "timestamp", client_id, created_at
            FROM datos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.sqlx_db)
        .await
    }

    /// Overwrite `nombre` and `descripcion` of an existing dato, leaving every
    /// other field untouched. An unknown id surfaces as a row-not-found error.
    pub async fn update_dato(
        &self,
        id: i32,
        nombre: Option<&str>,
        descripcion: Option<&str>,
    ) -> Result<Dato> {
        sqlx::query_as::<_, Dato>(
            r#"
            UPDATE datos
            SET nombre = $1,
                descripcion = $2
            WHERE id = $3
            RETURNING id, nombre, descripcion, "timestamp", client_id, created_at
            "#,
        )
        .bind(nombre)
        .bind(descripcion)
        .bind(id)
        .fetch_one(&self.sqlx_db)
        .await
    }

    /// Delete a dato by ID; deleting an absent id still succeeds.
    pub async fn delete_dato(&self, id: i32) -> Result<()> {
        sqlx::query("DELETE FROM datos WHERE id = $1")
            .bind(id)
            .execute(&self.sqlx_db)
            .await?;
        Ok(())
    }
}
