//! HTTP transport adapter.
//!
//! `POST /v1/authorize` takes a gateway authorizer event and answers with the
//! rendered decision. Deny is a successful response; only input that cannot
//! be evaluated is an HTTP error.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use request_authorizer_sdk::{AuthorizerEvent, RequestAuthorizerClient, RequestAuthorizerError};
use serde::Serialize;
use serde_json::json;
use tower_http::trace::TraceLayer;

const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

#[derive(Clone)]
struct AppState {
    authorizer: Arc<dyn RequestAuthorizerClient>,
}

/// Build the router served by the binary.
#[must_use]
pub fn router(authorizer: Arc<dyn RequestAuthorizerClient>) -> Router {
    Router::new()
        .route("/v1/authorize", post(authorize))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { authorizer })
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn authorize(
    State(state): State<AppState>,
    payload: Result<Json<AuthorizerEvent>, JsonRejection>,
) -> Response {
    let event = match payload {
        Ok(Json(event)) => event,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable authorizer event");
            return Problem::new(
                StatusCode::BAD_REQUEST,
                "Bad Request",
                rejection.body_text(),
            )
            .into_response();
        }
    };

    match state.authorizer.authorize_event(event).await {
        Ok(decision) => Json(decision).into_response(),
        Err(err) => authorizer_error_to_response(&err),
    }
}

/// Convert `RequestAuthorizerError` to an RFC-9457 Problem Details response.
fn authorizer_error_to_response(err: &RequestAuthorizerError) -> Response {
    match err {
        RequestAuthorizerError::MalformedRequest(msg) => {
            Problem::new(StatusCode::BAD_REQUEST, "Bad Request", msg.clone())
        }
        RequestAuthorizerError::Internal(_) => Problem::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            "Internal authorizer error".to_owned(),
        ),
    }
    .into_response()
}

#[derive(Debug, Serialize)]
struct Problem {
    #[serde(rename = "type")]
    problem_type: &'static str,
    title: &'static str,
    status: u16,
    detail: String,
}

impl Problem {
    fn new(status: StatusCode, title: &'static str, detail: String) -> Self {
        Self {
            problem_type: "about:blank",
            title,
            status: status.as_u16(),
            detail,
        }
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, [(CONTENT_TYPE, PROBLEM_CONTENT_TYPE)], Json(self)).into_response()
    }
}
