//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;

/// Register a fresh user and return the auth payload
async fn register(server: &TestServer) -> (RegisterRequest, AuthResponse) {
    let request = RegisterRequest::unique();
    let response = server.post("/api/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    (request, auth)
}

async fn create_post(server: &TestServer, token: &str) -> PostResponse {
    let response = server
        .post_auth("/api/posts", token, &PostRequest::unique())
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn create_comment(
    server: &TestServer,
    token: &str,
    post_id: i64,
    content: &str,
) -> CommentResponse {
    let request = CreateCommentRequest {
        post_id,
        content: content.to_string(),
    };
    let response = server.post_auth("/api/comments", token, &request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

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
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, auth) = register(&server).await;

    assert_eq!(auth.message, "User registered successfully");
    assert_eq!(auth.user.username, request.username);
    assert_eq!(auth.user.email.as_deref(), Some(request.email.as_str()));
    assert_eq!(auth.user.role, "user");
    assert!(!auth.token.is_empty());
}

#[tokio::test]
async fn test_register_duplicates() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, _) = register(&server).await;

    // Same username, new email
    let mut again = RegisterRequest::unique();
    again.username = request.username.clone();
    let response = server.post("/api/auth/register", &again).await.unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(err.error, "Username already taken");

    // Same email, new username
    let mut again = RegisterRequest::unique();
    again.email = request.email.clone();
    let response = server.post("/api/auth/register", &again).await.unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(err.error, "Email already registered");
}

#[tokio::test]
async fn test_login_and_me() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register_req, registered) = register(&server).await;

    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/auth/login", &login_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.message, "Login successful");
    assert_eq!(auth.user.id, registered.user.id);

    let response = server.get_auth("/api/auth/me", &auth.token).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.username, register_req.username);
    assert!(me.created_at.is_some());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register_req, _) = register(&server).await;

    let unknown = LoginRequest {
        email: "nonexistent@example.com".to_string(),
        password: "wrongpass".to_string(),
    };
    let response = server.post("/api/auth/login", &unknown).await.unwrap();
    let unknown_err: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let wrong_password = LoginRequest {
        email: register_req.email.clone(),
        password: "not-the-password".to_string(),
    };
    let response = server.post("/api/auth/login", &wrong_password).await.unwrap();
    let wrong_err: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // Both failures look the same to the caller
    assert_eq!(unknown_err.error, wrong_err.error);
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_read_post() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = register(&server).await;
    let post = create_post(&server, &author.token).await;

    assert_eq!(post.user_id, author.user.id);
    assert_eq!(post.username, author.user.username);
    assert_eq!((post.upvotes, post.downvotes, post.comment_count), (0, 0, 0));

    create_comment(&server, &author.token, post.id, "First!").await;

    let response = server.get(&format!("/api/posts/{}", post.id)).await.unwrap();
    let detail: PostDetailResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.post.title, post.title);
    assert_eq!(detail.post.comment_count, 1);
    assert_eq!(detail.comments.len(), 1);
    assert_eq!(detail.comments[0].content, "First!");
}

#[tokio::test]
async fn test_list_posts_pagination() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = register(&server).await;
    for _ in 0..6 {
        create_post(&server, &author.token).await;
    }

    let response = server.get("/api/posts?page=1&sort=recent").await.unwrap();
    let page: PostListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.posts.len(), 5);
    assert_eq!(page.pagination.current, 1);
    assert!(page.pagination.total >= 6);
    assert_eq!(page.pagination.pages, (page.pagination.total + 4) / 5);

    // Unknown sort keys fall back to newest first
    let response = server.get("/api/posts?sort=bogus").await.unwrap();
    let fallback: PostListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<_> = fallback.posts.iter().map(|p| p.id).collect();
    let recent: Vec<_> = page.posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, recent);
}

#[tokio::test]
async fn test_update_post_owner_only() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = register(&server).await;
    let (_, stranger) = register(&server).await;
    let post = create_post(&server, &author.token).await;
    let path = format!("/api/posts/{}", post.id);

    let edit = PostRequest {
        title: "Edited title".to_string(),
        content: "Edited body".to_string(),
    };

    let response = server.put_auth(&path, &stranger.token, &edit).await.unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(err.error, "You can only edit your own posts");

    let response = server.put_auth(&path, &author.token, &edit).await.unwrap();
    let updated: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "Edited title");
    assert!(updated.updated_at.is_some());
}

#[tokio::test]
async fn test_delete_post_cascades() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = register(&server).await;
    let (_, voter) = register(&server).await;
    let post = create_post(&server, &author.token).await;
    let comment = create_comment(&server, &voter.token, post.id, "doomed").await;
    server
        .post_empty_auth(&format!("/api/comments/{}/upvote", comment.id), &author.token)
        .await
        .unwrap();

    let path = format!("/api/posts/{}", post.id);
    let response = server.delete_auth(&path, &voter.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.delete_auth(&path, &author.token).await.unwrap();
    let done: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(done.message, "Post deleted successfully");

    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .post_empty_auth(&format!("/api/comments/{}/upvote", comment.id), &author.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_post_vote_toggle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = register(&server).await;
    let (_, voter) = register(&server).await;
    let post = create_post(&server, &author.token).await;
    let up = format!("/api/posts/{}/upvote", post.id);
    let down = format!("/api/posts/{}/downvote", post.id);

    let response = server.post_empty_auth(&up, &voter.token).await.unwrap();
    let voted: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((voted.upvotes, voted.downvotes), (1, 0));
    assert_eq!(voted.user_vote.as_deref(), Some("up"));

    let response = server.post_empty_auth(&down, &voter.token).await.unwrap();
    let flipped: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((flipped.upvotes, flipped.downvotes), (0, 1));

    let response = server.post_empty_auth(&down, &voter.token).await.unwrap();
    let cleared: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((cleared.upvotes, cleared.downvotes), (0, 0));
    assert!(cleared.user_vote.is_none());

    let response = server
        .post_empty_auth("/api/posts/999999999/upvote", &voter.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_concurrent_votes_keep_counters_exact() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = register(&server).await;
    let post = create_post(&server, &author.token).await;

    let mut voters = Vec::new();
    for _ in 0..6 {
        voters.push(register(&server).await.1.token);
    }

    let up = format!("/api/posts/{}/upvote", post.id);
    let results = upvote_concurrently(&server, &up, &voters).await;
    assert!(results.iter().all(|s| *s == StatusCode::OK));

    let response = server.get(&format!("/api/posts/{}", post.id)).await.unwrap();
    let detail: PostDetailResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((detail.post.upvotes, detail.post.downvotes), (6, 0));
}

async fn upvote_concurrently(server: &TestServer, path: &str, tokens: &[String]) -> Vec<StatusCode> {
    let mut handles = Vec::new();
    for token in tokens {
        let client = server.client.clone();
        let url = format!("{}{}", server.base_url(), path);
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            client
                .post(url)
                .bearer_auth(token)
                .send()
                .await
                .map(|r| r.status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        }));
    }

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }
    statuses
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = register(&server).await;
    let (_, other) = register(&server).await;
    let post = create_post(&server, &author.token).await;

    let older = create_comment(&server, &author.token, post.id, "older").await;
    let liked = create_comment(&server, &author.token, post.id, "liked").await;

    let response = server
        .post_empty_auth(&format!("/api/comments/{}/upvote", liked.id), &other.token)
        .await
        .unwrap();
    let voted: CommentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(voted.upvotes, 1);
    assert_eq!(voted.user_vote.as_deref(), Some("up"));

    let response = server
        .get(&format!("/api/comments/post/{}?limit=10", post.id))
        .await
        .unwrap();
    let listing: CommentListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<_> = listing.comments.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![liked.id, older.id]);
    assert_eq!(listing.pagination.total, 2);

    let path = format!("/api/comments/{}", older.id);
    let response = server.delete_auth(&path, &other.token).await.unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(err.error, "You can only delete your own comments");

    let response = server.delete_auth(&path, &author.token).await.unwrap();
    let done: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(done.message, "Comment deleted successfully");
}

#[tokio::test]
async fn test_comment_on_missing_post() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = register(&server).await;

    let request = CreateCommentRequest {
        post_id: 999_999_999,
        content: "hello?".to_string(),
    };
    let response = server.post_auth("/api/comments", &author.token, &request).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get("/api/comments/post/999999999").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_public_profile() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register(&server).await;

    let response = server.get(&format!("/api/users/{}", user.user.id)).await.unwrap();
    let profile: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.username, user.user.username);
    assert!(profile.email.is_none());

    let response = server.get("/api/users/999999999").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_update_profile_issues_new_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register(&server).await;
    let (_, other) = register(&server).await;

    let taken = serde_json::json!({ "username": other.user.username });
    let response = server.put_auth("/api/users/profile", &user.token, &taken).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let new_name = format!("renamed_{}", unique_suffix());
    let body = serde_json::json!({ "username": new_name });
    let response = server.put_auth("/api/users/profile", &user.token, &body).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.message, "Profile updated successfully");
    assert_eq!(auth.user.username, new_name);

    let response = server.get_auth("/api/auth/me", &auth.token).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.username, new_name);
}

#[tokio::test]
async fn test_change_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register_req, user) = register(&server).await;

    let wrong = ChangePasswordRequest {
        current_password: "not-it".to_string(),
        new_password: "brand-new-pass".to_string(),
    };
    let response = server.put_auth("/api/users/password", &user.token, &wrong).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let right = ChangePasswordRequest {
        current_password: register_req.password.clone(),
        new_password: "brand-new-pass".to_string(),
    };
    let response = server.put_auth("/api/users/password", &user.token, &right).await.unwrap();
    let done: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(done.message, "Password updated successfully");

    let login = LoginRequest {
        email: register_req.email.clone(),
        password: "brand-new-pass".to_string(),
    };
    let response = server.post("/api/auth/login", &login).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_admin_listing_requires_admin() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = register(&server).await;

    let response = server.get_auth("/api/admin/users", &user.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}
