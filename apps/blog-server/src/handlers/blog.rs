//! Blog resource handlers - one path, multiplexed by method.

use actix_web::{HttpResponse, web};

use folio_core::domain::{NewPost, PostPatch, PostQuery};
use folio_shared::MessageResponse;
use folio_shared::dto::BlogQueryParams;

use crate::middleware::auth::AdminSession;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn required_id(params: &BlogQueryParams) -> AppResult<&str> {
    params
        .id()
        .ok_or_else(|| AppError::BadRequest("Post ID is required".to_string()))
}

/// GET /api/blog?category=&search=&sort= - or a single post with `?id=`.
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<BlogQueryParams>,
) -> AppResult<HttpResponse> {
    let params = query.into_inner();

    if let Some(id) = params.id() {
        let post = state.blog.get(id).await?;
        return Ok(HttpResponse::Ok().json(post));
    }

    let query = PostQuery::from_params(params.category, params.search, params.sort.as_deref());
    let posts = state.blog.list(&query).await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// POST /api/blog
pub async fn create_post(
    state: web::Data<AppState>,
    admin: AdminSession,
    body: web::Json<NewPost>,
) -> AppResult<HttpResponse> {
    let post = state
        .blog
        .create(body.into_inner())
        .await
        .map_err(AppError::on_storage("Failed to save blog post"))?;

    tracing::info!(post_id = %post.id, session = ?admin.session_id(), "Blog post created");
    Ok(HttpResponse::Created().json(post))
}

/// PUT /api/blog?id=
pub async fn update_post(
    state: web::Data<AppState>,
    admin: AdminSession,
    query: web::Query<BlogQueryParams>,
    body: web::Json<PostPatch>,
) -> AppResult<HttpResponse> {
    let id = required_id(&query)?;
    let patch = body.into_inner();
    if patch.is_empty() {
        tracing::debug!(post_id = %id, "Update carries no patchable fields");
    }

    let post = state
        .blog
        .update(id, patch)
        .await
        .map_err(AppError::on_storage("Failed to update blog post"))?;

    tracing::info!(post_id = %post.id, session = ?admin.session_id(), "Blog post updated");
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/blog?id=
pub async fn delete_post(
    state: web::Data<AppState>,
    admin: AdminSession,
    query: web::Query<BlogQueryParams>,
) -> AppResult<HttpResponse> {
    let id = required_id(&query)?;

    state
        .blog
        .delete(id)
        .await
        .map_err(AppError::on_storage("Failed to delete blog post"))?;

    tracing::info!(post_id = %id, session = ?admin.session_id(), "Blog post deleted");
    Ok(HttpResponse::Ok().json(MessageResponse::new("Post deleted successfully")))
}

/// OPTIONS /api/blog - CORS preflight.
pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

/// Any other method on /api/blog.
pub async fn method_not_allowed() -> AppResult<HttpResponse> {
    Err(AppError::MethodNotAllowed)
}
