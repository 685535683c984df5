// src/database.rs
// Store client: parameterized Postgres queries for the posts table

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::ServiceError;
use crate::models::Post;

/// Read/write access to the posts table. The trait seam exists so the
/// service layer can be exercised against an in-memory fake.
#[async_trait]
pub trait PostStore: Send + Sync + 'static {
    /// All posts, newest first (id descending). Unbounded.
    async fn list_posts(&self) -> Result<Vec<Post>, ServiceError>;

    /// A single post by id; `None` when no row matches.
    async fn get_post(&self, id: i32) -> Result<Option<Post>, ServiceError>;

    /// Insert a post and return the fully populated record, including the
    /// generated id and timestamp.
    async fn create_post(&self, title: &str, content: &str) -> Result<Post, ServiceError>;

    async fn ping(&self) -> Result<(), ServiceError>;
}

#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Create the posts table if it does not exist yet.
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS posts (
                id SERIAL PRIMARY KEY,
                title VARCHAR(255) NOT NULL,
                content TEXT NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn list_posts(&self) -> Result<Vec<Post>, ServiceError> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT id, title, content, created_at FROM posts ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(operation = "list_posts", error = %e, "Database query failed");
            ServiceError::from(e)
        })?;
        Ok(posts)
    }

    async fn get_post(&self, id: i32) -> Result<Option<Post>, ServiceError> {
        let post = sqlx::query_as::<_, Post>(
            "SELECT id, title, content, created_at FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(operation = "get_post", post_id = id, error = %e, "Database query failed");
            ServiceError::from(e)
        })?;
        Ok(post)
    }

    async fn create_post(&self, title: &str, content: &str) -> Result<Post, ServiceError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, content)
            VALUES ($1, $2)
            RETURNING id, title, content, created_at
            "#,
        )
        .bind(title)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(operation = "create_post", error = %e, "Database insert failed");
            ServiceError::from(e)
        })?;
        Ok(post)
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
