use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;

use crate::models::CatalogRecord;
use crate::services::normalize::{normalize_products, ProductRow};

/// Errors that can occur when loading the catalog from PostgreSQL
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Which product rows to load
#[derive(Debug, Clone)]
pub struct CatalogQuery {
    pub partner_id: i64,
    pub category: String,
    pub min_quantity: i64,
}

/// PostgreSQL client for reading the product catalog
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    /// Create a new repository from a connection string
    ///
    /// When `schema` is given it is placed on every connection's search path.
    pub async fn new(
        database_url: &str,
        schema: Option<String>,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_secs: u64,
    ) -> Result<Self, RepositoryError> {
        let search_path = match schema {
            Some(schema) => Some(quote_identifier(&schema)?),
            None => None,
        };

        let pool = PgPoolOptions::new()
            .max_connections(max_connections.max(1))
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs.max(1)))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .after_connect(move |conn, _meta| {
                let search_path = search_path.clone();
                Box::pin(async move {
                    if let Some(schema) = search_path {
                        let statement = format!("SET search_path TO {}", schema);
                        sqlx::query(&statement).execute(&mut *conn).await?;
                    }
                    Ok(())
                })
            })
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a new repository from settings
    pub async fn from_settings(
        url: &str,
        schema: Option<String>,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
    ) -> Result<Self, RepositoryError> {
        tracing::info!("Connecting to PostgreSQL (schema: {:?})", schema);

        Self::new(
            url,
            schema,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            acquire_timeout_secs.unwrap_or(5),
        )
        .await
    }

    /// Load the raw product rows that make up the shoe catalog
    ///
    /// JSON columns are read as text so that both `json` and `text` column
    /// types decode the same way.
    pub async fn load_products(&self, query: &CatalogQuery) -> Result<Vec<ProductRow>, RepositoryError> {
        let sql = r#"
            SELECT product_id::text AS product_id,
                   COALESCE(product_name, '') AS product_name,
                   vendor,
                   quantity::bigint AS quantity,
                   size::text AS size,
                   color::text AS color,
                   options::text AS options,
                   metadata::text AS metadata
            FROM Products
            WHERE partner_id = $1 AND category = $2 AND quantity >= $3
            ORDER BY product_id
        "#;

        let rows: Vec<ProductRow> = sqlx::query_as(sql)
            .bind(query.partner_id)
            .bind(&query.category)
            .bind(query.min_quantity)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(
            "Loaded {} product rows for partner {} in {:?}",
            rows.len(),
            query.partner_id,
            query.category
        );

        Ok(rows)
    }

    /// Load and normalize the catalog
    pub async fn load_catalog(&self, query: &CatalogQuery) -> Result<Vec<CatalogRecord>, RepositoryError> {
        let rows = self.load_products(query).await?;
        Ok(normalize_products(&rows))
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, RepositoryError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

/// Quote a schema name for use as a SQL identifier
fn quote_identifier(name: &str) -> Result<String, RepositoryError> {
    let name = name.trim();
    if name.is_empty() || name.contains('\0') {
        return Err(RepositoryError::InvalidInput(format!("invalid schema name {:?}", name)));
    }
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}
