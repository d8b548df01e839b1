pub mod middleware;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::api::middleware::{authenticate, require_admin};
use crate::service::object::{download_handler, get_image_handler};
use crate::service::upload::upload_handler;
use crate::utils::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        .merge(admin_router(state.config.max_upload_bytes))
        .route("/download/{*key}", get(download_handler))
        .layer(from_fn_with_state(state.clone(), authenticate));

    let context_path = state.config.context_path.as_str();
    let app = if context_path.is_empty() {
        routes
    } else {
        Router::new().nest(context_path, routes)
    };

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

fn admin_router(max_upload_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route("/image/{*key}", get(get_image_handler))
        .route(
            "/upload",
            post(upload_handler).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route_layer(from_fn(require_admin))
}
