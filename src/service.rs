// src/service.rs
// Cache-aside reads and invalidate-on-write over the store and cache clients

use crate::cache::{post_key, PostCache, POSTS_LIST_KEY};
use crate::database::PostStore;
use crate::error::ServiceError;
use crate::models::{NewPost, Post, Source, Sourced};

pub struct PostService<S, C> {
    store: S,
    cache: C,
}

impl<S: PostStore, C: PostCache> PostService<S, C> {
    pub fn new(store: S, cache: C) -> Self {
        Self { store, cache }
    }

    /// All posts, newest first. Cache-aside: serve `posts:all` when present,
    /// otherwise query the store and populate the key. Concurrent misses may
    /// both query and both set; last write wins.
    pub async fn list(&self) -> Result<Sourced<Vec<Post>>, ServiceError> {
        if let Some(cached) = self.cache.get(POSTS_LIST_KEY).await? {
            tracing::info!(key = POSTS_LIST_KEY, "Cache HIT: posts list");
            let posts: Vec<Post> = serde_json::from_str(&cached)?;
            return Ok(Sourced {
                source: Source::Cache,
                data: posts,
            });
        }

        tracing::info!(key = POSTS_LIST_KEY, "Cache MISS: posts list");
        let posts = self.store.list_posts().await?;
        // An empty list is still a cacheable value.
        self.cache
            .set(POSTS_LIST_KEY, &serde_json::to_string(&posts)?)
            .await?;
        Ok(Sourced {
            source: Source::Database,
            data: posts,
        })
    }

    /// Single post by id, same cache-aside protocol on `posts:{id}`. A store
    /// miss is a NotFound and never populates the cache.
    pub async fn get(&self, id: i32) -> Result<Sourced<Post>, ServiceError> {
        let key = post_key(id);
        if let Some(cached) = self.cache.get(&key).await? {
            tracing::info!(key = %key, "Cache HIT: post");
            let post: Post = serde_json::from_str(&cached)?;
            return Ok(Sourced {
                source: Source::Cache,
                data: post,
            });
        }

        tracing::info!(key = %key, "Cache MISS: post");
        match self.store.get_post(id).await? {
            Some(post) => {
                self.cache.set(&key, &serde_json::to_string(&post)?).await?;
                Ok(Sourced {
                    source: Source::Database,
                    data: post,
                })
            }
            None => Err(ServiceError::NotFound("Post not found".to_string())),
        }
    }

    /// Validate, insert, then invalidate. Insert and invalidation are not
    /// atomic: a failed invalidation leaves the list cache stale until the
    /// next write.
    pub async fn create(&self, request: &NewPost) -> Result<Post, ServiceError> {
        request.validate()?;

        let post = self
            .store
            .create_post(&request.title, &request.content)
            .await?;

        tracing::info!(post_id = post.id, "Invalidating post caches");
        self.cache.delete(POSTS_LIST_KEY).await?;
        // A fresh id cannot be cached yet, but delete is idempotent.
        self.cache.delete(&post_key(post.id)).await?;

        Ok(post)
    }

    #[cfg(test)]
    pub(crate) fn store_ref(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn cache_ref(&self) -> &C {
        &self.cache
    }

    pub async fn ping_store(&self) -> Result<(), ServiceError> {
        self.store.ping().await
    }

    pub async fn ping_cache(&self) -> Result<(), ServiceError> {
        self.cache.ping().await
    }
}
