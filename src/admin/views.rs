// admin/views.rs — Handlers and templates for the browser admin.

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::{cookie::Cookie, CookieJar};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::auth::{session_fingerprint, SESSION_COOKIE};
use super::{AdminTable, TASK_ADMIN};
use crate::rest::error::ApiError;
use crate::tasks::validate::{validate_task_body, FieldErrors, NON_FIELD};
use crate::tasks::{TaskListParams, TaskRow};
use crate::AppContext;

fn render<T: Template>(tmpl: T) -> Response {
    match tmpl.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!(err = %err, "template render failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn index() -> Redirect {
    Redirect::to("/admin/tasks")
}

// ─── Login / logout ───────────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "admin/login.html")]
struct LoginTemplate {
    failed: bool,
}

#[derive(Deserialize)]
pub struct LoginForm {
    token: Option<String>,
}

pub async fn login_form(State(ctx): State<Arc<AppContext>>) -> Response {
    if ctx.config.admin_token.is_none() {
        return Redirect::to("/admin/tasks").into_response();
    }
    render(LoginTemplate { failed: false })
}

pub async fn login(
    State(ctx): State<Arc<AppContext>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let Some(expected) = ctx.config.admin_token.as_deref() else {
        return Redirect::to("/admin/tasks").into_response();
    };
    if form.token.as_deref() == Some(expected) {
        let cookie = Cookie::build((SESSION_COOKIE, session_fingerprint(expected)))
            .path("/admin")
            .http_only(true)
            .build();
        (jar.add(cookie), Redirect::to("/admin/tasks")).into_response()
    } else {
        render(LoginTemplate { failed: true })
    }
}

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let cookie = Cookie::build((SESSION_COOKIE, "")).path("/admin").build();
    (jar.remove(cookie), Redirect::to("/admin/login"))
}

// ─── Task list ────────────────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "admin/task_list.html")]
struct TaskListTemplate {
    table: &'static AdminTable,
    rows: Vec<TaskRow>,
    total: usize,
    page: usize,
    pages: usize,
    prev_page: usize,
    next_page: usize,
    prev_disabled: &'static str,
    next_disabled: &'static str,
    q: String,
    completed: String,
    created_after: String,
    created_before: String,
    updated_after: String,
    updated_before: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    q: Option<String>,
    completed: Option<String>,
    created_after: Option<String>,
    created_before: Option<String>,
    updated_after: Option<String>,
    updated_before: Option<String>,
    page: Option<usize>,
}

impl ListQuery {
    fn params(&self) -> TaskListParams {
        fn non_empty(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        }
        TaskListParams {
            completed: match self.completed.as_deref() {
                Some("yes") => Some(true),
                Some("no") => Some(false),
                _ => None,
            },
            search: non_empty(&self.q),
            created_after: non_empty(&self.created_after),
            created_before: non_empty(&self.created_before),
            updated_after: non_empty(&self.updated_after),
            updated_before: non_empty(&self.updated_before),
        }
    }
}

pub async fn task_list(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let all = ctx.tasks.list(&query.params()).await?;
    let total = all.len();
    let page_size = TASK_ADMIN.page_size;
    let pages = total.div_ceil(page_size).max(1);
    let page = query.page.unwrap_or(1).clamp(1, pages);
    let rows: Vec<TaskRow> = all
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    Ok(render(TaskListTemplate {
        table: &TASK_ADMIN,
        rows,
        total,
        page,
        pages,
        prev_page: page.saturating_sub(1).max(1),
        next_page: (page + 1).min(pages),
        prev_disabled: if page > 1 { "" } else { "disabled" },
        next_disabled: if page < pages { "" } else { "disabled" },
        q: query.q.unwrap_or_default(),
        completed: query.completed.unwrap_or_default(),
        created_after: query.created_after.unwrap_or_default(),
        created_before: query.created_before.unwrap_or_default(),
        updated_after: query.updated_after.unwrap_or_default(),
        updated_before: query.updated_before.unwrap_or_default(),
    }))
}

// ─── Add / change / delete ────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "admin/task_form.html")]
struct TaskFormTemplate {
    heading: &'static str,
    action: String,
    title: String,
    description: String,
    completed: bool,
    /// Present when editing — supplies the read-only fields and delete form.
    existing: Option<TaskRow>,
    errors: TaskFormErrors,
}

#[derive(Default)]
struct TaskFormErrors {
    non_field: Vec<String>,
    title: Vec<String>,
    description: Vec<String>,
    completed: Vec<String>,
}

impl From<FieldErrors> for TaskFormErrors {
    fn from(mut errors: FieldErrors) -> Self {
        Self {
            non_field: errors.remove(NON_FIELD).unwrap_or_default(),
            title: errors.remove("title").unwrap_or_default(),
            description: errors.remove("description").unwrap_or_default(),
            completed: errors.remove("completed").unwrap_or_default(),
        }
    }
}

/// The browser add/change form. Checkboxes arrive as a present/absent field,
/// so `completed` is a marker string rather than a bool.
#[derive(Debug, Default, Deserialize)]
pub struct TaskForm {
    title: Option<String>,
    description: Option<String>,
    completed: Option<String>,
}

impl TaskForm {
    /// The admin speaks the same language as the API: rebuild a JSON body
    /// and run it through the shared validator. An empty textarea means
    /// "no description", not an empty one.
    fn to_body(&self) -> Value {
        let mut map = serde_json::Map::new();
        if let Some(title) = &self.title {
            map.insert("title".to_string(), json!(title));
        }
        if let Some(description) = &self.description {
            if !description.is_empty() {
                map.insert("description".to_string(), json!(description));
            }
        }
        map.insert("completed".to_string(), json!(self.completed.is_some()));
        Value::Object(map)
    }
}

impl TaskFormTemplate {
    fn add(form: &TaskForm, errors: TaskFormErrors) -> Self {
        Self {
            heading: "Add task",
            action: "/admin/tasks/new".to_string(),
            title: form.title.clone().unwrap_or_default(),
            description: form.description.clone().unwrap_or_default(),
            completed: form.completed.is_some(),
            existing: None,
            errors,
        }
    }

    fn change(task: TaskRow, form: Option<&TaskForm>, errors: TaskFormErrors) -> Self {
        let (title, description, completed) = match form {
            // Re-rendering after a failed submit — keep what the user typed.
            Some(f) => (
                f.title.clone().unwrap_or_default(),
                f.description.clone().unwrap_or_default(),
                f.completed.is_some(),
            ),
            None => (
                task.title.clone(),
                task.description.clone().unwrap_or_default(),
                task.completed,
            ),
        };
        Self {
            heading: "Change task",
            action: format!("/admin/tasks/{}", task.id),
            title,
            description,
            completed,
            existing: Some(task),
            errors,
        }
    }
}

pub async fn task_new() -> Response {
    render(TaskFormTemplate::add(
        &TaskForm::default(),
        TaskFormErrors::default(),
    ))
}

pub async fn task_create(
    State(ctx): State<Arc<AppContext>>,
    Form(form): Form<TaskForm>,
) -> Result<Response, ApiError> {
    match validate_task_body(&form.to_body()) {
        Ok(draft) => {
            ctx.tasks.create(&draft).await?;
            Ok(Redirect::to("/admin/tasks").into_response())
        }
        Err(errors) => Ok(render(TaskFormTemplate::add(&form, errors.into()))),
    }
}

pub async fn task_change(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let Some(task) = ctx.tasks.get(&id).await? else {
        return Err(ApiError::NotFound);
    };
    Ok(render(TaskFormTemplate::change(
        task,
        None,
        TaskFormErrors::default(),
    )))
}

pub async fn task_update(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    Form(form): Form<TaskForm>,
) -> Result<Response, ApiError> {
    let Some(task) = ctx.tasks.get(&id).await? else {
        return Err(ApiError::NotFound);
    };
    match validate_task_body(&form.to_body()) {
        Ok(draft) => {
            ctx.tasks.update(&id, &draft).await?;
            Ok(Redirect::to("/admin/tasks").into_response())
        }
        Err(errors) => Ok(render(TaskFormTemplate::change(
            task,
            Some(&form),
            errors.into(),
        ))),
    }
}

pub async fn task_delete(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Redirect, ApiError> {
    ctx.tasks.delete(&id).await?;
    Ok(Redirect::to("/admin/tasks"))
}
