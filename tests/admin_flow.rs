//! Browser admin tests: login gate, forms, search, filters, pagination.

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use std::sync::Arc;
use taskd::tasks::TaskDraft;
use taskd::{config::ServerConfig, rest::build_router, storage::Storage, AppContext};
use tempfile::TempDir;
use tower::ServiceExt;

async fn make_test_ctx(dir: &TempDir, admin_token: Option<&str>) -> Arc<AppContext> {
    let config = Arc::new(ServerConfig {
        port: 0,
        data_dir: dir.path().to_path_buf(),
        log: "error".to_string(),
        bind_address: "127.0.0.1".to_string(),
        log_format: "pretty".to_string(),
        admin_token: admin_token.map(String::from),
    });
    let storage = Arc::new(Storage::new(dir.path()).await.unwrap());
    Arc::new(AppContext::new(config, storage))
}

async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: &Router, uri: &str, form: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(form.to_string())).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// The session cookie pair from a login response's Set-Cookie header.
fn session_cookie(response: &Response<Body>) -> String {
    let raw = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a cookie")
        .to_str()
        .unwrap();
    raw.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn admin_is_open_when_no_token_is_configured() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = make_test_ctx(&dir, None).await;
    let app = build_router(ctx);

    let response = get(&app, "/admin/tasks", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("<h2>Tasks</h2>"));
}

#[tokio::test]
async fn admin_redirects_to_login_without_a_session() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = make_test_ctx(&dir, Some("sesame")).await;
    let app = build_router(ctx);

    for uri in ["/admin", "/admin/tasks", "/admin/tasks/new"] {
        let response = get(&app, uri, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/admin/login");
    }

    // A forged cookie does not pass either.
    let response = get(&app, "/admin/tasks", Some("taskd_admin=wrong")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn login_sets_a_session_cookie_that_opens_the_admin() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = make_test_ctx(&dir, Some("sesame")).await;
    let app = build_router(ctx);

    let response = post_form(&app, "/admin/login", "token=sesame", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/tasks");
    let cookie = session_cookie(&response);
    // The cookie carries a fingerprint, not the token itself.
    assert!(!cookie.contains("sesame"));

    let response = get(&app, "/admin/tasks", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn wrong_token_rerenders_the_login_form() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = make_test_ctx(&dir, Some("sesame")).await;
    let app = build_router(ctx);

    let response = post_form(&app, "/admin/login", "token=guess", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert!(body_text(response).await.contains("not correct"));
}

#[tokio::test]
async fn create_edit_delete_through_the_forms() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = make_test_ctx(&dir, None).await;
    let app = build_router(ctx.clone());

    // Add.
    let response = post_form(
        &app,
        "/admin/tasks/new",
        "title=Buy+milk&description=two+litres&completed=on",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/tasks");

    let rows = ctx.tasks.list(&Default::default()).await.unwrap();
    assert_eq!(rows.len(), 1);
    let task = &rows[0];
    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.description.as_deref(), Some("two litres"));
    assert!(task.completed);

    // The change form shows the read-only timestamps.
    let response = get(&app, &format!("/admin/tasks/{}", task.id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(&task.created_at));
    assert!(html.contains("read-only"));

    // Change: unchecked checkbox means completed=false, empty textarea means
    // no description.
    let response = post_form(
        &app,
        &format!("/admin/tasks/{}", task.id),
        "title=Buy+oat+milk&description=",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let updated = ctx.tasks.get(&task.id).await.unwrap().unwrap();
    assert_eq!(updated.title, "Buy oat milk");
    assert_eq!(updated.description, None);
    assert!(!updated.completed);
    assert_eq!(updated.created_at, task.created_at);
    assert!(updated.updated_at > task.updated_at);

    // Delete.
    let response = post_form(&app, &format!("/admin/tasks/{}/delete", task.id), "", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(ctx.tasks.get(&task.id).await.unwrap().is_none());
}

#[tokio::test]
async fn form_errors_rerender_with_messages_and_persist_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = make_test_ctx(&dir, None).await;
    let app = build_router(ctx.clone());

    let response = post_form(&app, "/admin/tasks/new", "title=", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("may not be blank"));
    assert!(ctx.tasks.list(&Default::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn editing_an_unknown_task_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = make_test_ctx(&dir, None).await;
    let app = build_router(ctx);

    let response = get(&app, "/admin/tasks/no-such-id", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_form(&app, "/admin/tasks/no-such-id", "title=t", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_form(&app, "/admin/tasks/no-such-id/delete", "", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_paginates_at_twenty_five() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = make_test_ctx(&dir, None).await;
    let app = build_router(ctx.clone());

    for i in 0..30 {
        ctx.tasks
            .create(&TaskDraft {
                title: format!("task {i:02}"),
                description: None,
                completed: false,
            })
            .await
            .unwrap();
    }

    let html = body_text(get(&app, "/admin/tasks", None).await).await;
    assert!(html.contains("page 1 of 2 (30 total)"));
    // Newest first: task 29 is on page one, task 00 is not.
    assert!(html.contains("task 29"));
    assert!(!html.contains("task 00"));

    let html = body_text(get(&app, "/admin/tasks?page=2", None).await).await;
    assert!(html.contains("page 2 of 2"));
    assert!(html.contains("task 00"));
}

#[tokio::test]
async fn search_and_completed_filter_narrow_the_list() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = make_test_ctx(&dir, None).await;
    let app = build_router(ctx.clone());

    let done = ctx
        .tasks
        .create(&TaskDraft {
            title: "Water the plants".into(),
            description: Some("balcony".into()),
            completed: true,
        })
        .await
        .unwrap();
    let open = ctx
        .tasks
        .create(&TaskDraft {
            title: "File taxes".into(),
            description: None,
            completed: false,
        })
        .await
        .unwrap();

    // Search hits the description, case-insensitively.
    let html = body_text(get(&app, "/admin/tasks?q=BALCONY", None).await).await;
    assert!(html.contains(&done.id));
    assert!(!html.contains(&open.id));

    let html = body_text(get(&app, "/admin/tasks?completed=no", None).await).await;
    assert!(html.contains(&open.id));
    assert!(!html.contains(&done.id));

    let html = body_text(get(&app, "/admin/tasks?q=garage", None).await).await;
    assert!(html.contains("No tasks match."));
}
