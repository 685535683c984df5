// src/cache.rs
// Cache client: get/set/delete against Redis

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use crate::error::ServiceError;

/// Cache key for the full post list.
pub const POSTS_LIST_KEY: &str = "posts:all";

/// Cache key for a single post.
pub fn post_key(id: i32) -> String {
    format!("posts:{}", id)
}

/// Key-value access to the cache store. Values are JSON strings; no TTL is
/// applied, entries live until explicitly deleted.
#[async_trait]
pub trait PostCache: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<String>, ServiceError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), ServiceError>;

    /// Idempotent: deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), ServiceError>;

    async fn ping(&self) -> Result<(), ServiceError>;
}

#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    pub async fn connect(redis_url: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl PostCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, ServiceError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await.map_err(|e| {
            tracing::error!(operation = "cache_get", key = key, error = %e, "Cache read failed");
            ServiceError::from(e)
        })?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ServiceError> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value).await.map_err(|e| {
            tracing::error!(operation = "cache_set", key = key, error = %e, "Cache write failed");
            ServiceError::from(e)
        })?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), ServiceError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await.map_err(|e| {
            tracing::error!(operation = "cache_delete", key = key, error = %e, "Cache delete failed");
            ServiceError::from(e)
        })?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        let mut conn = self.conn.clone();
        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await?;
        Ok(())
    }
}
