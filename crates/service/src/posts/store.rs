use std::{path::PathBuf, sync::Arc};

use chrono::Utc;
use uuid::Uuid;

use models::post::BlogPost;

use crate::errors::ServiceError;
use crate::posts::domain::PostDraft;
use crate::storage::JsonCollection;

/// File-backed record store for blog posts.
///
/// Owns one JSON document collection keyed by post id. Identifier and
/// timestamp assignment happen inside the collection's write lock, so
/// concurrent creates cannot collide on ids.
pub struct PostStore {
    posts: Arc<JsonCollection<Uuid, BlogPost>>,
}

impl PostStore {
    /// Open the store at `path`, creating an empty collection when missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let posts = JsonCollection::open(path).await?;
        Ok(Arc::new(Self { posts }))
    }

    /// Insert a batch of drafts, assigning ids and creation timestamps to
    /// records lacking them. The whole batch validates before anything is
    /// written.
    pub async fn insert_many(&self, drafts: Vec<PostDraft>) -> Result<Vec<BlogPost>, ServiceError> {
        for draft in &drafts {
            draft.validate()?;
        }
        self.posts
            .mutate(|map| {
                let mut stored = Vec::with_capacity(drafts.len());
                for draft in drafts {
                    let post = BlogPost {
                        id: Uuid::new_v4(),
                        author: draft.author,
                        title: draft.title,
                        content: draft.content,
                        created: draft.created.unwrap_or_else(Utc::now),
                    };
                    map.insert(post.id, post.clone());
                    stored.push(post);
                }
                Ok(stored)
            })
            .await
    }

    /// Single-record insert used by create.
    pub async fn insert(&self, draft: PostDraft) -> Result<BlogPost, ServiceError> {
        let mut stored = self.insert_many(vec![draft]).await?;
        Ok(stored.pop().expect("insert_many stored one record"))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<BlogPost> {
        self.posts.get(&id).await
    }

    /// An arbitrary stored record, `None` when the collection is empty.
    pub async fn find_one(&self) -> Option<BlogPost> {
        self.posts.first().await
    }

    pub async fn list(&self) -> Vec<BlogPost> {
        self.posts
            .snapshot()
            .await
            .into_iter()
            .map(|(_, post)| post)
            .collect()
    }

    pub async fn count(&self) -> usize {
        self.posts.len().await
    }

    /// Overwrite title/content/author on the matching record. `id` and
    /// `created` are immutable; a client-supplied `created` in the draft is
    /// ignored. An unknown id leaves the collection untouched.
    pub async fn update_by_id(&self, id: Uuid, draft: PostDraft) -> Result<BlogPost, ServiceError> {
        draft.validate()?;
        self.posts
            .mutate(|map| {
                let post = map.get_mut(&id).ok_or_else(|| ServiceError::not_found("post"))?;
                post.title = draft.title;
                post.content = draft.content;
                post.author = draft.author;
                Ok(post.clone())
            })
            .await
    }

    /// Idempotent delete; reports whether the record existed.
    pub async fn delete_by_id(&self, id: Uuid) -> Result<bool, ServiceError> {
        self.posts.remove(&id).await
    }

    /// Drop every record (test teardown).
    pub async fn clear(&self) -> Result<(), ServiceError> {
        self.posts.clear().await
    }

    /// Final flush and explicit shutdown point.
    pub async fn close(&self) -> Result<(), ServiceError> {
        self.posts.close().await
    }
}
