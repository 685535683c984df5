// src/models.rs
// Post record and HTTP request/response envelopes

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewPost {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl NewPost {
    /// Both fields must be present and non-empty (whitespace-only counts as
    /// empty). Runs before any storage or cache call.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.title.trim().is_empty() {
            return Err(ServiceError::Validation("title is required".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(ServiceError::Validation("content is required".to_string()));
        }
        Ok(())
    }
}

/// Whether a read was answered from the cache or from the database.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    Database,
}

/// Read response envelope: the payload plus its provenance tag.
#[derive(Debug, Serialize, Deserialize)]
pub struct Sourced<T> {
    pub source: Source,
    pub data: T,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    pub data: Post,
}
