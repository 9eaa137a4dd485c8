use async_trait::async_trait;
use uuid::Uuid;

use models::post::BlogPost;

use crate::errors::ServiceError;
use crate::posts::domain::PostDraft;
use crate::posts::store::PostStore;

/// Trait abstraction over blog-post persistence.
/// Implementations can be file-backed or swapped for a database-backed
/// collection without touching the resource service.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn insert_many(&self, drafts: Vec<PostDraft>) -> Result<Vec<BlogPost>, ServiceError>;
    async fn insert(&self, draft: PostDraft) -> Result<BlogPost, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Option<BlogPost>;
    async fn find_one(&self) -> Option<BlogPost>;
    async fn list(&self) -> Vec<BlogPost>;
    async fn count(&self) -> usize;
    async fn update_by_id(&self, id: Uuid, draft: PostDraft) -> Result<BlogPost, ServiceError>;
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn clear(&self) -> Result<(), ServiceError>;
}

#[async_trait]
impl PostRepository for PostStore {
    async fn insert_many(&self, drafts: Vec<PostDraft>) -> Result<Vec<BlogPost>, ServiceError> {
        PostStore::insert_many(self, drafts).await
    }

    async fn insert(&self, draft: PostDraft) -> Result<BlogPost, ServiceError> {
        PostStore::insert(self, draft).await
    }

    async fn find_by_id(&self, id: Uuid) -> Option<BlogPost> {
        PostStore::find_by_id(self, id).await
    }

    async fn find_one(&self) -> Option<BlogPost> {
        PostStore::find_one(self).await
    }

    async fn list(&self) -> Vec<BlogPost> {
        PostStore::list(self).await
    }

    async fn count(&self) -> usize {
        PostStore::count(self).await
    }

    async fn update_by_id(&self, id: Uuid, draft: PostDraft) -> Result<BlogPost, ServiceError> {
        PostStore::update_by_id(self, id, draft).await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, ServiceError> {
        PostStore::delete_by_id(self, id).await
    }

    async fn clear(&self) -> Result<(), ServiceError> {
        PostStore::clear(self).await
    }
}
