use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

/// Post author, always a composite of two name parts. Persisting a bare
/// author string is not supported.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    /// Display form used in rendered records.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A stored blog post. `id` and `created` are assigned by the store at
/// insertion and never change afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub author: Author,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

pub fn validate_title(title: &str) -> Result<(), ModelError> {
    if title.trim().is_empty() {
        return Err(ModelError::Validation("title is required".into()));
    }
    Ok(())
}

pub fn validate_content(content: &str) -> Result<(), ModelError> {
    if content.trim().is_empty() {
        return Err(ModelError::Validation("content is required".into()));
    }
    Ok(())
}

pub fn validate_author(author: &Author) -> Result<(), ModelError> {
    if author.first_name.trim().is_empty() || author.last_name.trim().is_empty() {
        return Err(ModelError::Validation(
            "author requires firstName and lastName".into(),
        ));
    }
    Ok(())
}
