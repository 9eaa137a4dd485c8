use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::posts::domain::{PostDraft, PostUpdate, PostView};
use crate::posts::repository::PostRepository;

/// Resource service translating CRUD intents into record-store calls and
/// rendering stored posts for external consumption.
pub struct PostService<R: PostRepository> {
    repo: Arc<R>,
}

impl<R: PostRepository> PostService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// All posts rendered, ordered by creation time with id as tie-breaker.
    pub async fn list(&self) -> Vec<PostView> {
        let mut posts = self.repo.list().await;
        posts.sort_by(|a, b| a.created.cmp(&b.created).then(a.id.cmp(&b.id)));
        posts.iter().map(PostView::from).collect()
    }

    pub async fn get(&self, id: Uuid) -> Result<PostView, ServiceError> {
        self.repo
            .find_by_id(id)
            .await
            .map(|post| PostView::from(&post))
            .ok_or_else(|| ServiceError::not_found("post"))
    }

    #[instrument(skip(self, draft))]
    pub async fn create(&self, draft: PostDraft) -> Result<PostView, ServiceError> {
        draft.validate()?;
        let post = self.repo.insert(draft).await?;
        info!(id = %post.id, "created post");
        Ok(PostView::from(&post))
    }

    /// Full overwrite. The body must carry the same id as the path; anything
    /// else is a client error.
    pub async fn update(&self, id: Uuid, input: PostUpdate) -> Result<PostView, ServiceError> {
        input.draft.validate()?;
        if input.id != Some(id) {
            return Err(ServiceError::Client(
                "request body id must match the path id".into(),
            ));
        }
        let post = self.repo.update_by_id(id, input.draft).await?;
        info!(id = %post.id, "updated post");
        Ok(PostView::from(&post))
    }

    /// Idempotent: deleting an unknown id succeeds.
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let existed = self.repo.delete_by_id(id).await?;
        info!(%id, existed, "deleted post");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posts::store::PostStore;
    use crate::test_support::{sample_draft, temp_store_path};
    use models::post::Author;

    async fn service(prefix: &str) -> PostService<PostStore> {
        let store = PostStore::open(temp_store_path(prefix)).await.expect("open store");
        PostService::new(store)
    }

    #[tokio::test]
    async fn create_renders_flattened_author() {
        let svc = service("post_service_create").await;
        let view = svc
            .create(PostDraft {
                title: "T".into(),
                content: "C".into(),
                author: Author { first_name: "A".into(), last_name: "B".into() },
                created: None,
            })
            .await
            .expect("create");

        assert!(!view.id.is_nil());
        assert_eq!(view.author, "A B");
        assert_eq!(view.title, "T");
        assert_eq!(view.content, "C");
    }

    #[tokio::test]
    async fn create_assigns_distinct_ids() {
        let svc = service("post_service_ids").await;
        let a = svc.create(sample_draft(1)).await.expect("create a");
        let b = svc.create(sample_draft(2)).await.expect("create b");
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn create_rejects_blank_author_part() {
        let svc = service("post_service_validation").await;
        let mut draft = sample_draft(1);
        draft.author.last_name = String::new();
        let res = svc.create(draft).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn list_returns_every_record_in_creation_order() {
        let svc = service("post_service_list").await;
        let mut created = Vec::new();
        for i in 1..=5 {
            created.push(svc.create(sample_draft(i)).await.expect("create"));
        }

        let listed = svc.list().await;
        assert_eq!(listed.len(), 5);
        let mut sorted = created.clone();
        sorted.sort_by(|a, b| a.created.cmp(&b.created).then(a.id.cmp(&b.id)));
        assert_eq!(listed, sorted);
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let svc = service("post_service_get").await;
        let res = svc.get(Uuid::new_v4()).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_reflects_changes_and_leaves_others_alone() {
        let svc = service("post_service_update").await;
        let target = svc.create(sample_draft(1)).await.expect("create target");
        let other = svc.create(sample_draft(2)).await.expect("create other");

        let updated = svc
            .update(
                target.id,
                PostUpdate { id: Some(target.id), draft: sample_draft(3) },
            )
            .await
            .expect("update");
        assert_eq!(updated.id, target.id);
        assert_eq!(updated.title, sample_draft(3).title);
        assert_eq!(updated.created, target.created);

        let roundtrip = svc.get(target.id).await.expect("get updated");
        assert_eq!(roundtrip, updated);
        let untouched = svc.get(other.id).await.expect("get other");
        assert_eq!(untouched, other);
    }

    #[tokio::test]
    async fn update_with_mismatched_or_missing_body_id_is_client_error() {
        let svc = service("post_service_mismatch").await;
        let post = svc.create(sample_draft(1)).await.expect("create");

        let res = svc
            .update(
                post.id,
                PostUpdate { id: Some(Uuid::new_v4()), draft: sample_draft(2) },
            )
            .await;
        assert!(matches!(res, Err(ServiceError::Client(_))));

        let res = svc
            .update(post.id, PostUpdate { id: None, draft: sample_draft(2) })
            .await;
        assert!(matches!(res, Err(ServiceError::Client(_))));

        // the record is untouched after both rejections
        let unchanged = svc.get(post.id).await.expect("get");
        assert_eq!(unchanged, post);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let svc = service("post_service_update_missing").await;
        let id = Uuid::new_v4();
        let res = svc
            .update(id, PostUpdate { id: Some(id), draft: sample_draft(1) })
            .await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found_and_delete_stays_ok() {
        let svc = service("post_service_delete").await;
        let post = svc.create(sample_draft(1)).await.expect("create");

        svc.delete(post.id).await.expect("first delete");
        assert!(matches!(svc.get(post.id).await, Err(ServiceError::NotFound(_))));
        svc.delete(post.id).await.expect("second delete");
    }
}
