//! Integration tests for the HTML screens and form posts.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use roster_core::{Draft, Role, Tab, User, UserStatus};
use roster_integration_tests::TestContext;

#[tokio::test]
async fn test_root_redirects_to_active_screen() {
    let ctx = TestContext::new();
    let response = ctx.get("/").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/users"));

    let switched = ctx.post("/roles").await;
    assert_eq!(switched.status, StatusCode::SEE_OTHER);
    assert_eq!(switched.location(), Some("/roles"));
    assert_eq!(ctx.get("/").await.location(), Some("/roles"));
}

#[tokio::test]
async fn test_viewing_a_screen_changes_nothing() {
    let ctx = TestContext::new();
    ctx.post("/users/new").await;
    let before = ctx.snapshot().await;

    let html = ctx.get("/roles").await.text();

    assert!(!html.contains("New user"));
    assert_eq!(ctx.snapshot().await, before);
}

#[tokio::test]
async fn test_users_screen_lists_users() {
    let ctx = TestContext::new();
    let response = ctx.get("/users").await;

    assert_eq!(response.status, StatusCode::OK);
    let html = response.text();
    assert!(html.contains("alice@example.com"));
    assert!(html.contains("bob@example.com"));
    assert!(!html.contains("name=\"kind\""), "no form is open");
}

#[tokio::test]
async fn test_add_user_through_forms() {
    let ctx = TestContext::new();

    let opened = ctx.post("/users/new").await;
    assert_eq!(opened.status, StatusCode::SEE_OTHER);
    assert_eq!(opened.location(), Some("/users"));
    assert!(ctx.get("/users").await.text().contains("New user"));

    let saved = ctx
        .post_form(
            "/draft",
            &[
                ("kind", "user"),
                ("name", "Carol"),
                ("email", "carol@example.com"),
                ("roles", "Admin"),
                ("roles", "Viewer"),
                ("status", "Inactive"),
            ],
        )
        .await;
    assert_eq!(saved.status, StatusCode::SEE_OTHER);
    assert_eq!(saved.location(), Some("/users"));

    let users: Vec<User> = ctx.get("/api/users").await.json();
    let carol = &users[2];
    assert_eq!(carol.name, "Carol");
    assert_eq!(carol.roles, ["Admin", "Viewer"]);
    assert_eq!(carol.status, UserStatus::Inactive);
    assert!(ctx.snapshot().await.draft.is_none());
}

#[tokio::test]
async fn test_edit_form_without_roles_clears_them() {
    let ctx = TestContext::new();
    ctx.post("/users/1/edit").await;

    let html = ctx.get("/users").await.text();
    assert!(html.contains("Edit user #1"));

    ctx.post_form(
        "/draft",
        &[
            ("kind", "user"),
            ("name", "Alice"),
            ("email", "alice@example.com"),
            ("status", "Active"),
        ],
    )
    .await;

    let users: Vec<User> = ctx.get("/api/users").await.json();
    assert_eq!(users.len(), 2);
    assert!(users[0].roles.is_empty());
}

#[tokio::test]
async fn test_role_form_splits_permissions() {
    let ctx = TestContext::new();
    ctx.post("/roles/2/edit").await;

    let snapshot = ctx.snapshot().await;
    assert_eq!(snapshot.tab, Tab::Roles);
    assert!(matches!(snapshot.draft, Some(Draft::Role(_))));

    let saved = ctx
        .post_form(
            "/draft",
            &[
                ("kind", "role"),
                ("name", "Viewer"),
                ("permissions", "Read, Export,  Share"),
            ],
        )
        .await;
    assert_eq!(saved.location(), Some("/roles"));

    let roles: Vec<Role> = ctx.get("/api/roles").await.json();
    assert_eq!(roles.len(), 2);
    assert_eq!(roles[1].permissions, ["Read", "Export", "Share"]);
}

#[tokio::test]
async fn test_invalid_status_rerenders_with_422() {
    let ctx = TestContext::new();
    ctx.post("/users/2/edit").await;

    let response = ctx
        .post_form(
            "/draft",
            &[("kind", "user"), ("name", "Robert"), ("status", "Suspended")],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().contains("invalid status"));

    // The whole submission was rolled back
    let Some(Draft::User(draft)) = ctx.snapshot().await.draft else {
        panic!("draft should stay open");
    };
    assert_eq!(draft.name, "Bob");
}

#[tokio::test]
async fn test_strict_save_failure_keeps_typed_values() {
    let ctx = TestContext::with_env(&[("ROSTER_VALIDATION", "strict")]);
    ctx.post("/users/new").await;

    let response = ctx
        .post_form(
            "/draft",
            &[("kind", "user"), ("name", "Carol"), ("email", "carol")],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let html = response.text();
    assert!(html.contains("invalid email"));
    assert!(html.contains("value=\"carol\""));
    assert_eq!(ctx.snapshot().await.users.len(), 2);
}

#[tokio::test]
async fn test_untouched_role_form_saves_unchanged() {
    for mode in ["permissive", "strict"] {
        let ctx = TestContext::with_env(&[("ROSTER_VALIDATION", mode)]);
        ctx.post("/roles/new").await;
        ctx.post_form(
            "/draft",
            &[("kind", "role"), ("name", "Empty"), ("permissions", "")],
        )
        .await;
        ctx.post("/roles/3/edit").await;

        let html = ctx.get("/roles").await.text();
        assert!(html.contains("name=\"permissions\" value=\"\""));

        let saved = ctx
            .post_form(
                "/draft",
                &[("kind", "role"), ("name", "Empty"), ("permissions", "")],
            )
            .await;
        assert_eq!(saved.status, StatusCode::SEE_OTHER, "{mode}");

        let roles: Vec<Role> = ctx.get("/api/roles").await.json();
        assert_eq!(roles[2].name, "Empty");
        assert!(roles[2].permissions.is_empty(), "{mode}");
    }
}

#[tokio::test]
async fn test_mismatched_form_is_rejected() {
    let ctx = TestContext::new();
    ctx.post("/roles/new").await;

    let response = ctx
        .post_form("/draft", &[("kind", "user"), ("name", "Mallory")])
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    let Some(Draft::Role(role)) = ctx.snapshot().await.draft else {
        panic!("role draft should be untouched");
    };
    assert!(role.name.is_empty());
}

#[tokio::test]
async fn test_draft_post_without_open_form_conflicts() {
    let ctx = TestContext::new();
    let response = ctx
        .post_form("/draft", &[("kind", "role"), ("name", "X"), ("permissions", "")])
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let malformed = ctx.post_form("/draft", &[("name", "X")]).await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cancel_redirects_and_discards() {
    let ctx = TestContext::new();
    ctx.post("/roles/1/edit").await;

    let response = ctx.post("/draft/cancel").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/roles"));
    assert!(ctx.snapshot().await.draft.is_none());

    // Nothing open: still a redirect
    assert_eq!(ctx.post("/draft/cancel").await.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_switching_screen_discards_other_draft() {
    let ctx = TestContext::new();
    ctx.post("/users/new").await;

    let response = ctx.post("/roles").await;

    assert_eq!(response.location(), Some("/roles"));
    let snapshot = ctx.snapshot().await;
    assert_eq!(snapshot.tab, Tab::Roles);
    assert!(snapshot.draft.is_none());
}

#[tokio::test]
async fn test_delete_posts() {
    let ctx = TestContext::new();

    let response = ctx.post("/roles/1/delete").await;
    assert_eq!(response.location(), Some("/roles"));
    assert_eq!(ctx.post("/roles/1/delete").await.status, StatusCode::SEE_OTHER);

    let html = ctx.get("/users").await.text();
    assert!(html.contains("tag-orphaned"));
    assert!(html.contains("no longer exist"));

    ctx.post("/users/1/delete").await;
    let users: Vec<User> = ctx.get("/api/users").await.json();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_edit_unknown_record_is_404() {
    let ctx = TestContext::new();
    assert_eq!(ctx.post("/users/77/edit").await.status, StatusCode::NOT_FOUND);
    assert_eq!(ctx.post("/roles/77/edit").await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        ctx.post("/users/abc/edit").await.status,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_empty_console_shows_empty_state() {
    let ctx = TestContext::with_env(&[("ROSTER_SEED_MOCK_DATA", "false")]);
    let html = ctx.get("/roles").await.text();
    assert!(html.contains("No roles yet"));
}
