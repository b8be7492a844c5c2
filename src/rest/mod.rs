// rest/mod.rs — Public HTTP API server.
//
// Endpoints:
//   GET  /api/tasks/
//   POST /api/tasks/
//   GET  /api/tasks/{id}/
//   PUT  /api/tasks/{id}/
//   DELETE /api/tasks/{id}/
//   GET  /api/openapi.json
//   GET  /api/health

pub mod error;
pub mod openapi;
pub mod routes;

use anyhow::Result;
use axum::{
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::AppContext;

pub async fn start_server(ctx: Arc<AppContext>) -> Result<()> {
    let bind = format!("{}:{}", ctx.config.bind_address, ctx.config.port);
    let addr: SocketAddr = bind.parse()?;

    let router = build_router(ctx);

    info!("HTTP server listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    // axum does not redirect on trailing slashes, and the canonical URLs end
    // with one — register both forms for every task route.
    let api = Router::new()
        .route("/api/health", get(routes::health::health))
        .route("/api/openapi.json", get(openapi::openapi_spec))
        .route(
            "/api/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/api/tasks/",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/api/tasks/{id}",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .route(
            "/api/tasks/{id}/",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .layer(CorsLayer::permissive());

    api.merge(crate::admin::router(ctx.clone())).with_state(ctx)
}
