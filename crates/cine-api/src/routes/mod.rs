//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{auth, comments, health, movies, posts, reviews, users};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(catalog_routes())
        .merge(board_routes())
        .merge(review_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
}

/// Profile routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/@me",
            get(users::get_profile).patch(users::update_profile),
        )
        .route("/users/@me/subscriptions", put(users::update_subscriptions))
}

/// OTT providers and movies
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/otts", get(movies::list_otts))
        .route("/movies", get(movies::list_movies))
        .route("/movies/:movie_id", get(movies::get_movie))
}

/// Categories, posts and post comments
fn board_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(posts::list_categories))
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/posts/:post_id",
            get(posts::get_post)
                .patch(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/posts/:post_id/view", post(posts::record_view))
        .route("/posts/:post_id/like", post(posts::toggle_like))
        .route(
            "/posts/:post_id/comments",
            get(comments::list_post_comments).post(comments::create_post_comment),
        )
        .route(
            "/posts/:post_id/comments/:comment_id",
            delete(comments::delete_post_comment),
        )
        .route(
            "/posts/:post_id/comments/:comment_id/like",
            post(comments::toggle_post_comment_like),
        )
}

/// Reviews, review images and review comments
///
/// The static segments (`histories`, `images`, `comments`) take priority over
/// the `:reaction` segment.
fn review_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route(
            "/reviews/:review_id",
            get(reviews::get_review)
                .patch(reviews::update_review)
                .delete(reviews::delete_review),
        )
        .route("/reviews/:review_id/:reaction", post(reviews::react))
        .route("/reviews/:review_id/histories", get(reviews::list_histories))
        .route("/reviews/:review_id/images", post(reviews::add_image))
        .route(
            "/reviews/:review_id/images/:image_id",
            delete(reviews::delete_image),
        )
        .route(
            "/reviews/:review_id/comments",
            get(comments::list_review_comments).post(comments::create_review_comment),
        )
        .route(
            "/reviews/:review_id/comments/:comment_id",
            delete(comments::delete_review_comment),
        )
        .route(
            "/reviews/:review_id/comments/:comment_id/like",
            post(comments::toggle_review_comment_like),
        )
}
