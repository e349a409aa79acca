use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use common::BlogStats;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::models::blog::{BlogListItem, BlogResponse, CreateBlogRequest, UpdateBlogRequest};
use crate::services::blog_service;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/blogs",
    tag = "Blogs",
    operation_id = "listBlogs",
    summary = "List all blogs",
    description = "Returns every blog with its owner reduced to `{id, username, name}`. No pagination.",
    responses(
        (status = 200, description = "All blogs", body = Vec<BlogListItem>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<BlogListItem>>, AppError> {
    let blogs = blog_service(&state.db).list().await?;
    Ok(Json(blogs))
}

#[utoipa::path(
    post,
    path = "/api/blogs",
    tag = "Blogs",
    operation_id = "createBlog",
    summary = "Create a blog",
    description = "Creates a blog owned by the authenticated user. `title` and `url` are required; `likes` defaults to 0.",
    request_body = CreateBlogRequest,
    responses(
        (status = 201, description = "Blog created", body = BlogResponse),
        (status = 400, description = "Missing title or url, or negative likes", body = ErrorBody),
        (status = 401, description = "Token missing or invalid", body = ErrorBody),
        (status = 403, description = "Token user no longer exists", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn create_blog(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateBlogRequest>,
) -> Result<impl IntoResponse, AppError> {
    let blog = blog_service(&state.db).create(&auth_user, payload).await?;
    Ok((StatusCode::CREATED, Json(BlogResponse::from(blog))))
}

#[utoipa::path(
    put,
    path = "/api/blogs/{id}",
    tag = "Blogs",
    operation_id = "updateBlog",
    summary = "Update a blog",
    description = "Replaces each supplied non-empty field. Empty strings and `likes: 0` keep the stored value. Only the owner may update.",
    params(("id" = i32, Path, description = "Blog ID")),
    request_body = UpdateBlogRequest,
    responses(
        (status = 200, description = "Blog updated", body = BlogResponse),
        (status = 400, description = "Non-numeric id or negative likes", body = ErrorBody),
        (status = 401, description = "Token missing or invalid, or not the owner", body = ErrorBody),
        (status = 404, description = "Blog not found", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id))]
pub async fn update_blog(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateBlogRequest>,
) -> Result<Json<BlogResponse>, AppError> {
    let blog = blog_service(&state.db)
        .update(&auth_user, id, payload)
        .await?;
    Ok(Json(blog.into()))
}

#[utoipa::path(
    delete,
    path = "/api/blogs/{id}",
    tag = "Blogs",
    operation_id = "deleteBlog",
    summary = "Delete a blog",
    description = "Permanently deletes a blog. Only the owner may delete.",
    params(("id" = i32, Path, description = "Blog ID")),
    responses(
        (status = 204, description = "Blog deleted"),
        (status = 400, description = "Non-numeric id", body = ErrorBody),
        (status = 401, description = "Token missing or invalid, or not the owner", body = ErrorBody),
        (status = 404, description = "Blog not found", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn delete_blog(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<StatusCode, AppError> {
    blog_service(&state.db).delete(&auth_user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/blogs/stats",
    tag = "Blogs",
    operation_id = "blogStats",
    summary = "Aggregate statistics",
    description = "Total likes, the most liked blog, the author with the most blogs and the author with the most likes. Ties go to whichever came first.",
    responses(
        (status = 200, description = "Statistics over all blogs", body = BlogStats),
    ),
)]
#[instrument(skip(state))]
pub async fn blog_stats(State(state): State<AppState>) -> Result<Json<BlogStats>, AppError> {
    let stats = blog_service(&state.db).stats().await?;
    Ok(Json(stats))
}
