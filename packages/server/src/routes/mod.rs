use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(blog_routes())
        .route(
            "/users",
            get(handlers::user::list_users).post(handlers::user::register),
        )
        .route("/login", post(handlers::auth::login))
}

fn blog_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/blogs",
            get(handlers::blog::list_blogs).post(handlers::blog::create_blog),
        )
        .route("/blogs/stats", get(handlers::blog::blog_stats))
        .route(
            "/blogs/{id}",
            put(handlers::blog::update_blog).delete(handlers::blog::delete_blog),
        )
}
