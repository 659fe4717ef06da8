//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, cookie_header, fixtures::*, set_cookie,
    TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

async fn signup(server: &TestServer) -> AuthResponse {
    let request = RegisterRequest::unique();
    let response = server.post("/auth/register", &request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn first_movie(server: &TestServer) -> MovieResponse {
    let response = server.get("/movies").await.unwrap();
    let movies: Vec<MovieResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    movies.into_iter().next().expect("seeded movies")
}

async fn category_id(server: &TestServer, slug: &str) -> String {
    let response = server.get("/categories").await.unwrap();
    let categories: Vec<CategoryResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    categories
        .into_iter()
        .find(|c| c.slug == slug)
        .map(|c| c.id)
        .expect("seeded category")
}

async fn create_post(server: &TestServer, token: &str) -> PostResponse {
    let category = category_id(server, "free").await;
    let response = server
        .post_auth("/posts", token, &CreatePostRequest::in_category(&category))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn create_review(server: &TestServer, token: &str) -> ReviewResponse {
    let movie = first_movie(server).await;
    let response = server
        .post_auth("/reviews", token, &CreateReviewRequest::for_movie(&movie.id, 4.5))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_sets_token_cookies() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/auth/register", &request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let access = set_cookie(&response, "access_token").expect("access cookie").to_string();
    assert!(access.contains("HttpOnly"));
    assert!(access.contains("SameSite=Lax"));
    assert!(access.contains("Path=/"));
    assert!(set_cookie(&response, "refresh_token").is_some());

    let auth: AuthResponse = response.json().await.unwrap();
    assert_eq!(auth.user.username, request.username);
    assert_eq!(auth.user.email, request.email);
    assert!(!auth.user.is_staff);
    assert!(!auth.access_token.is_empty());
    assert!(access.contains(&format!("Max-Age={}", auth.expires_in)));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    server.post("/auth/register", &request).await.unwrap();

    let response = server.post("/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_weak_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterRequest::unique();
    request.password = "short".to_string();

    let response = server.post("/auth/register", &request).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(error.error.details.unwrap().get("password").is_some());
}

#[tokio::test]
async fn test_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let register_req = RegisterRequest::unique();
    server.post("/auth/register", &register_req).await.unwrap();

    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/auth/login", &login_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(auth.user.username, register_req.username);
    assert!(!auth.access_token.is_empty());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let login_req = LoginRequest {
        email: "nobody@example.com".to_string(),
        password: "WrongPass1".to_string(),
    };

    let response = server.post("/auth/login", &login_req).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_from_cookie_rotates_session() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    let response = server.post("/auth/register", &request).await.unwrap();
    let cookies = cookie_header(&response);
    let first: AuthResponse = response.json().await.unwrap();

    let response = server.post_with_cookie("/auth/refresh", &cookies).await.unwrap();
    let second: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_ne!(second.refresh_token, first.refresh_token);

    // the old refresh token was revoked by the rotation
    let response = server
        .post("/auth/refresh", &json!({ "refresh_token": first.refresh_token }))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_logout_revokes_and_clears_cookies() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server).await;

    let response = server
        .post("/auth/logout", &json!({ "refresh_token": auth.refresh_token }))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cleared = set_cookie(&response, "access_token").expect("cleared cookie");
    assert!(cleared.contains("Max-Age=0"));

    let response = server
        .post("/auth/refresh", &json!({ "refresh_token": auth.refresh_token }))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Profile Tests
// ============================================================================

#[tokio::test]
async fn test_profile_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/users/@me").await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(error.error.code, "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_profile_with_cookie_only() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    let response = server.post("/auth/register", &request).await.unwrap();
    let cookies = cookie_header(&response);

    let response = server.get_with_cookie("/users/@me", &cookies).await.unwrap();
    let profile: ProfileResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.username, request.username);
    assert!(profile.subscribed_ott.is_empty());
}

#[tokio::test]
async fn test_update_username() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server).await;
    let username = format!("renamed{}", unique_suffix());

    let response = server
        .patch_auth("/users/@me", &auth.access_token, &json!({ "username": username }))
        .await
        .unwrap();
    let profile: ProfileResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.username, username);

    let response = server
        .patch_auth("/users/@me", &auth.access_token, &json!({ "username": "" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_replace_subscriptions() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server).await;

    let response = server.get("/otts").await.unwrap();
    let otts: Vec<OttResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<&str> = otts.iter().take(2).map(|o| o.id.as_str()).collect();

    let response = server
        .put_auth("/users/@me/subscriptions", &auth.access_token, &json!({ "ott_ids": ids }))
        .await
        .unwrap();
    let profile: ProfileResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.subscribed_ott.len(), 2);

    let response = server
        .put_auth("/users/@me/subscriptions", &auth.access_token, &json!({ "ott_ids": "1" }))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(error.error.details.unwrap().get("ott_ids").is_some());
}

// ============================================================================
// Catalog Tests
// ============================================================================

#[tokio::test]
async fn test_movie_filters_and_detail() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let movie = first_movie(&server).await;

    let needle: String = movie.title.chars().take(3).collect::<String>().to_lowercase();
    let response = server.get(&format!("/movies?title={needle}")).await.unwrap();
    let movies: Vec<MovieResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(movies.iter().any(|m| m.id == movie.id));

    if let Some(ott) = movie.ott_services.first() {
        let response = server.get(&format!("/movies?ott_services={ott}")).await.unwrap();
        let movies: Vec<MovieResponse> = assert_json(response, StatusCode::OK).await.unwrap();
        assert!(movies.iter().all(|m| m.ott_services.contains(ott)));
    }

    let response = server.get(&format!("/movies/{}", movie.id)).await.unwrap();
    let detail: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail["id"], json!(movie.id));
    assert!(detail["otts"].is_array());
}

#[tokio::test]
async fn test_movie_bad_id() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/movies/not-an-id").await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_PATH_PARAMETER");

    let response = server.get("/movies/1").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Board Tests
// ============================================================================

#[tokio::test]
async fn test_post_detail_does_not_count_views() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server).await;
    let post = create_post(&server, &auth.access_token).await;

    let response = server.get(&format!("/posts/{}", post.id)).await.unwrap();
    let fetched: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.view_count, 0);

    let response = server
        .post(&format!("/posts/{}/view", post.id), &json!({}))
        .await
        .unwrap();
    let view: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(view["view_count"], json!(1));
}

#[tokio::test]
async fn test_post_like_toggle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = signup(&server).await;
    let reader = signup(&server).await;
    let post = create_post(&server, &author.access_token).await;
    let path = format!("/posts/{}/like", post.id);

    let response = server
        .post_auth(&path, &reader.access_token, &json!({ "is_like": true }))
        .await
        .unwrap();
    let liked: ReactionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((liked.my_vote, liked.like_count), (1, 1));

    let response = server
        .post_auth(&path, &reader.access_token, &json!({ "is_like": false }))
        .await
        .unwrap();
    let flipped: ReactionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(
        (flipped.my_vote, flipped.like_count, flipped.dislike_count),
        (-1, 0, 1)
    );

    let response = server
        .get_auth(&format!("/posts/{}", post.id), &reader.access_token)
        .await
        .unwrap();
    let fetched: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.my_like, Some(false));
}

#[tokio::test]
async fn test_post_list_page_shape_and_hot_filter() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server).await;
    create_post(&server, &auth.access_token).await;

    let response = server.get("/posts?page=1").await.unwrap();
    let page: PageResponse<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.page, 1);
    assert!(page.count >= 1);
    assert!(page.results.len() <= page.page_size as usize);

    let response = server.get("/posts?category=hot").await.unwrap();
    let hot: PageResponse<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(hot.results.iter().all(|p| p.like_count >= 10));

    let response = server.get("/posts?page=0").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_post_owner_rules() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = signup(&server).await;
    let stranger = signup(&server).await;
    let post = create_post(&server, &author.access_token).await;
    let path = format!("/posts/{}", post.id);

    let response = server
        .patch_auth(&path, &stranger.access_token, &json!({ "title": "mine now" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.delete_auth(&path, &stranger.access_token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .patch_auth(&path, &author.access_token, &json!({ "title": "Edited title" }))
        .await
        .unwrap();
    let updated: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "Edited title");

    let response = server.delete_auth(&path, &author.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_post_comments() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = signup(&server).await;
    let reader = signup(&server).await;
    let post = create_post(&server, &author.access_token).await;
    let path = format!("/posts/{}/comments", post.id);

    let response = server
        .post_auth(&path, &reader.access_token, &json!({ "content": "Agreed!" }))
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("{path}/{}/like", comment.id),
            &author.access_token,
            &json!({ "is_like": true }),
        )
        .await
        .unwrap();
    let liked: ReactionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(liked.like_count, 1);

    let response = server.get(&path).await.unwrap();
    let comments: Vec<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].content, "Agreed!");

    let response = server
        .delete_auth(&format!("{path}/{}", comment.id), &author.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .delete_auth(&format!("{path}/{}", comment.id), &reader.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

// ============================================================================
// Review Tests
// ============================================================================

#[tokio::test]
async fn test_one_review_per_movie() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server).await;
    let review = create_review(&server, &auth.access_token).await;
    assert_eq!(review.rating, 4.5);
    assert!(!review.is_edited);

    let response = server
        .post_auth(
            "/reviews",
            &auth.access_token,
            &CreateReviewRequest::for_movie(&review.movie_id, 3.0),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_rating_must_be_half_step() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server).await;
    let movie = first_movie(&server).await;

    let response = server
        .post_auth(
            "/reviews",
            &auth.access_token,
            &CreateReviewRequest::for_movie(&movie.id, 3.3),
        )
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(error.error.details.unwrap().get("rating").is_some());
}

#[tokio::test]
async fn test_review_reaction_scenario() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = signup(&server).await;
    let voter = signup(&server).await;
    let review = create_review(&server, &author.access_token).await;

    let like = format!("/reviews/{}/like", review.id);
    let dislike = format!("/reviews/{}/dislike", review.id);

    let response = server.post_empty_auth(&like, &voter.access_token).await.unwrap();
    let first: ReactionResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!((first.my_vote, first.like_count, first.dislike_count), (1, 1, 0));

    let response = server.post_empty_auth(&like, &voter.access_token).await.unwrap();
    let retracted: ReactionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((retracted.my_vote, retracted.like_count), (0, 0));

    let response = server.post_empty_auth(&dislike, &voter.access_token).await.unwrap();
    let disliked: ReactionResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!((disliked.my_vote, disliked.dislike_count), (-1, 1));

    let response = server
        .post_empty_auth(&format!("/reviews/{}/love", review.id), &voter.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_review_update_records_history() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server).await;
    let review = create_review(&server, &auth.access_token).await;
    let path = format!("/reviews/{}", review.id);

    let response = server
        .patch_auth(
            &path,
            &auth.access_token,
            &json!({ "rating": 2.5, "comment": "Worse on a rewatch.", "image_urls": ["https://img.example.com/a.jpg"] }),
        )
        .await
        .unwrap();
    let updated: ReviewResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.rating, 2.5);
    assert!(updated.is_edited);
    assert_eq!(updated.images.len(), 1);

    let response = server
        .get_auth(&format!("{path}/histories"), &auth.access_token)
        .await
        .unwrap();
    let histories: Vec<ReviewHistoryResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(histories.len(), 1);
    assert_eq!(histories[0].previous_rating, 4.5);
    assert_eq!(histories[0].previous_comment, review.comment);

    let response = server
        .patch_auth(
            &path,
            &auth.access_token,
            &json!({ "delete_image_ids": [updated.images[0].id] }),
        )
        .await
        .unwrap();
    let trimmed: ReviewResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(trimmed.images.is_empty());
}

#[tokio::test]
async fn test_review_images_endpoint() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = signup(&server).await;
    let stranger = signup(&server).await;
    let review = create_review(&server, &author.access_token).await;
    let path = format!("/reviews/{}/images", review.id);
    let body = json!({ "image_url": "https://img.example.com/still.jpg" });

    let response = server.post_auth(&path, &stranger.access_token, &body).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.post_auth(&path, &author.access_token, &body).await.unwrap();
    let image: ReviewImageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(image.image_url, "https://img.example.com/still.jpg");

    let response = server
        .delete_auth(&format!("{path}/{}", image.id), &author.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

#[tokio::test]
async fn test_review_comment_like_only_toggle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = signup(&server).await;
    let reader = signup(&server).await;
    let review = create_review(&server, &author.access_token).await;
    let path = format!("/reviews/{}/comments", review.id);

    let response = server
        .post_auth(&path, &reader.access_token, &json!({ "content": "Spot on." }))
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let like = format!("{path}/{}/like", comment.id);

    let response = server.post_empty_auth(&like, &author.access_token).await.unwrap();
    let liked: CommentLikeResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(liked.liked);
    assert_eq!(liked.like_count, 1);

    let response = server.post_empty_auth(&like, &author.access_token).await.unwrap();
    let unliked: CommentLikeResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!unliked.liked);
    assert_eq!(unliked.like_count, 0);

    let response = server.get(&format!("/reviews/{}", review.id)).await.unwrap();
    let fetched: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched["comment_count"], json!(1));
}

#[tokio::test]
async fn test_review_list_ordering() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup(&server).await;
    let review = create_review(&server, &auth.access_token).await;

    let response = server
        .get(&format!("/reviews?movie={}&ordering=-rating", review.movie_id))
        .await
        .unwrap();
    let page: PageResponse<ReviewResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(page.results.iter().any(|r| r.id == review.id));
    assert!(page
        .results
        .windows(2)
        .all(|pair| pair[0].rating >= pair[1].rating));

    let response = server.get("/reviews?ordering=title").await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(error.error.details.unwrap().get("ordering").is_some());
}
