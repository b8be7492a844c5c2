// admin/mod.rs — Browser admin over the task store.
//
// Server-rendered HTML, same validation and persistence as the JSON API.
// Routes (cookie-session authenticated when an admin token is configured):
//   GET  /admin/login          POST /admin/login       POST /admin/logout
//   GET  /admin/tasks          (list: search, filters, pagination)
//   GET  /admin/tasks/new      POST /admin/tasks/new
//   GET  /admin/tasks/{id}     POST /admin/tasks/{id}
//   POST /admin/tasks/{id}/delete

pub mod auth;
pub mod views;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::AppContext;

/// Statically-declared admin configuration for one table, handed to the view
/// renderers. Replaces an ambient model-admin registry: everything the admin
/// shows, filters, searches, or refuses to edit is listed here.
pub struct AdminTable {
    pub list_columns: &'static [&'static str],
    pub filter_fields: &'static [&'static str],
    pub search_fields: &'static [&'static str],
    pub readonly_fields: &'static [&'static str],
    pub page_size: usize,
}

pub const TASK_ADMIN: AdminTable = AdminTable {
    list_columns: &["title", "description", "completed", "created_at", "updated_at"],
    filter_fields: &["completed", "created_at", "updated_at"],
    search_fields: &["title", "description"],
    readonly_fields: &["created_at", "updated_at"],
    page_size: 25,
};

pub fn router(ctx: Arc<AppContext>) -> Router<Arc<AppContext>> {
    let protected = Router::new()
        .route("/admin", get(views::index))
        .route("/admin/", get(views::index))
        .route("/admin/tasks", get(views::task_list))
        .route(
            "/admin/tasks/new",
            get(views::task_new).post(views::task_create),
        )
        .route(
            "/admin/tasks/{id}",
            get(views::task_change).post(views::task_update),
        )
        .route("/admin/tasks/{id}/delete", post(views::task_delete))
        .route_layer(middleware::from_fn_with_state(ctx, auth::require_session));

    Router::new()
        .route("/admin/login", get(views::login_form).post(views::login))
        .route("/admin/logout", post(views::logout))
        .merge(protected)
}
