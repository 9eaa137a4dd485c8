use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{error, info};
use uuid::Uuid;

use service::errors::ServiceError;
use service::posts::domain::{PostDraft, PostUpdate, PostView};

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[utoipa::path(
    get, path = "/posts", tag = "posts",
    responses((status = 200, description = "All posts, oldest first", body = [crate::openapi::PostViewDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Json<Vec<PostView>> {
    let views = state.posts.list().await;
    info!(count = views.len(), "list posts");
    Json(views)
}

#[utoipa::path(
    get, path = "/posts/{id}", tag = "posts",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::PostViewDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PostView>, StatusCode> {
    match state.posts.get(id).await {
        Ok(view) => Ok(Json(view)),
        Err(ServiceError::NotFound(_)) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[utoipa::path(
    post, path = "/posts", tag = "posts",
    request_body = crate::openapi::CreatePostInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::PostViewDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<PostDraft>,
) -> Result<(StatusCode, Json<PostView>), JsonApiError> {
    match state.posts.create(input).await {
        Ok(view) => {
            info!(id = %view.id, "created post");
            Ok((StatusCode::CREATED, Json(view)))
        }
        Err(e @ ServiceError::Validation(_)) => Err(JsonApiError::new(
            StatusCode::BAD_REQUEST,
            "Validation Error",
            Some(e.to_string()),
        )),
        Err(e) => {
            error!(err = %e, "create post failed");
            Err(JsonApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Create Failed",
                Some(e.to_string()),
            ))
        }
    }
}

#[utoipa::path(
    put, path = "/posts/{id}", tag = "posts",
    params(("id" = Uuid, Path, description = "Post id")),
    request_body = crate::openapi::UpdatePostInputDoc,
    responses(
        (status = 201, description = "Updated", body = crate::openapi::PostViewDoc),
        (status = 400, description = "Validation Error or id mismatch"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<PostUpdate>,
) -> Result<(StatusCode, Json<PostView>), JsonApiError> {
    match state.posts.update(id, input).await {
        Ok(view) => {
            info!(id = %view.id, "updated post");
            Ok((StatusCode::CREATED, Json(view)))
        }
        Err(e @ ServiceError::Validation(_)) => Err(JsonApiError::new(
            StatusCode::BAD_REQUEST,
            "Validation Error",
            Some(e.to_string()),
        )),
        Err(e @ ServiceError::Client(_)) => Err(JsonApiError::new(
            StatusCode::BAD_REQUEST,
            "Bad Request",
            Some(e.to_string()),
        )),
        Err(e @ ServiceError::NotFound(_)) => Err(JsonApiError::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            Some(e.to_string()),
        )),
        Err(e) => {
            error!(err = %e, "update post failed");
            Err(JsonApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Update Failed",
                Some(e.to_string()),
            ))
        }
    }
}

#[utoipa::path(
    delete, path = "/posts/{id}", tag = "posts",
    params(("id" = Uuid, Path, description = "Post id")),
    responses((status = 204, description = "Deleted (idempotent)"))
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<Uuid>) -> StatusCode {
    match state.posts.delete(id).await {
        Ok(()) => {
            info!(%id, "deleted post");
            StatusCode::NO_CONTENT
        }
        Err(e) => {
            error!(err = %e, "delete post failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
