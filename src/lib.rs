pub mod extractors;
pub mod fallback;
pub mod handlers;
pub mod models;
pub mod names;
pub mod openai;
pub mod rejections;
pub mod services;
pub mod utils;
pub mod validation;

use std::sync::Arc;

use axum::{middleware, Router};

use crate::{
    openai::OpenAiClient,
    services::generation::{GenerationConfig, QuestionSelector},
};

#[derive(Clone)]
pub struct AppState {
    pub generation: Arc<GenerationConfig>,
    pub selector: QuestionSelector,
}

impl AppState {
    pub fn new(generation: GenerationConfig) -> Self {
        Self {
            generation: Arc::new(generation),
            selector: QuestionSelector::new(OpenAiClient::new()),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::homepage::routes())
        .merge(handlers::generate::routes())
        .merge(handlers::quiz::routes())
        .fallback(handlers::homepage::not_found)
        .layer(middleware::from_fn(cors))
        .with_state(state)
}

async fn cors(
    req: axum::http::Request<axum::body::Body>,
    next: middleware::Next,
) -> axum::response::Response {
    use axum::http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderValue, Method, StatusCode,
    };
    use axum::response::IntoResponse;

    let mut resp = if req.method() == Method::OPTIONS {
        let mut resp = StatusCode::NO_CONTENT.into_response();
        let headers = resp.headers_mut();
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("content-type"),
        );
        resp
    } else {
        next.run(req).await
    };

    resp.headers_mut()
        .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    resp
}
