use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDoc {
    pub first_name: String,
    pub last_name: String,
}

#[derive(ToSchema)]
pub struct PostViewDoc {
    pub id: Uuid,
    /// Flattened `"First Last"` display string.
    pub author: String,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

#[derive(ToSchema)]
pub struct CreatePostInputDoc {
    pub title: String,
    pub content: String,
    pub author: AuthorDoc,
}

#[derive(ToSchema)]
pub struct UpdatePostInputDoc {
    /// Must match the path id.
    pub id: Option<Uuid>,
    pub title: String,
    pub content: String,
    pub author: AuthorDoc,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::posts::list,
        crate::routes::posts::get,
        crate::routes::posts::create,
        crate::routes::posts::update,
        crate::routes::posts::delete,
    ),
    components(
        schemas(
            HealthResponse,
            AuthorDoc,
            PostViewDoc,
            CreatePostInputDoc,
            UpdatePostInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "posts")
    )
)]
pub struct ApiDoc;
