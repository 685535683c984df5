// src/test_support.rs
// In-memory fakes for the store and cache traits

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::cache::PostCache;
use crate::database::PostStore;
use crate::error::ServiceError;
use crate::models::Post;

/// In-memory stand-in for the Postgres store. Assigns serial ids and keeps
/// rows in insertion order; `set_failing` makes every operation return a
/// storage failure, as a broken connection would.
pub struct MemoryStore {
    posts: Mutex<Vec<Post>>,
    next_id: AtomicI32,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn post_count(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), ServiceError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(ServiceError::Storage("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn list_posts(&self) -> Result<Vec<Post>, ServiceError> {
        self.check()?;
        let mut posts = self.posts.lock().unwrap().clone();
        posts.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(posts)
    }

    async fn get_post(&self, id: i32) -> Result<Option<Post>, ServiceError> {
        self.check()?;
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn create_post(&self, title: &str, content: &str) -> Result<Post, ServiceError> {
        self.check()?;
        let post = Post {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: title.to_string(),
            content: content.to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        };
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        self.check()
    }
}

/// In-memory stand-in for Redis.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
    failing: AtomicBool,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn check(&self) -> Result<(), ServiceError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(ServiceError::Cache("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PostCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, ServiceError> {
        self.check()?;
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ServiceError> {
        self.check()?;
        self.insert(key, value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), ServiceError> {
        self.check()?;
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        self.check()
    }
}
