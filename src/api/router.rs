//! HTTP routing configuration.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::app::AppState;

use super::handlers::{
    create_question_handler, head_not_allowed, list_questions_handler, status_handler,
    update_question_handler,
};

/// Build the application router.
///
/// Unsupported methods on a known path answer 405, HEAD included; unknown
/// paths 404.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let middleware = ServiceBuilder::new().layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Router::new()
        .route("/status", get(status_handler).head(head_not_allowed))
        .route(
            "/questions",
            get(list_questions_handler)
                .head(head_not_allowed)
                .post(create_question_handler)
                .put(update_question_handler),
        )
        .layer(middleware)
        .with_state(app_state)
}
