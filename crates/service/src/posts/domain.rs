use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::post::{Author, BlogPost};

use crate::errors::ServiceError;

/// Input for creating a post or fully overwriting an existing one.
/// `id` is never client-supplied; `created` defaults to insertion time when
/// absent and is ignored on update.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub author: Author,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

impl PostDraft {
    /// Required-field checks shared by create and update, run before any
    /// store interaction.
    pub fn validate(&self) -> Result<(), ServiceError> {
        models::post::validate_title(&self.title)?;
        models::post::validate_content(&self.content)?;
        models::post::validate_author(&self.author)?;
        Ok(())
    }
}

/// Full-overwrite update payload. The body id must match the path id; the
/// check lives in the service so a missing id is a client error rather than
/// a deserialization failure.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PostUpdate {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(flatten)]
    pub draft: PostDraft,
}

/// Rendered record: the external representation with the author flattened to
/// a single display string.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PostView {
    pub id: Uuid,
    pub author: String,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl From<&BlogPost> for PostView {
    fn from(post: &BlogPost) -> Self {
        Self {
            id: post.id,
            author: post.author.full_name(),
            title: post.title.clone(),
            content: post.content.clone(),
            created: post.created,
        }
    }
}
