use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::{names, rejections::AppError, utils, AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route(names::ROOT_URL, get(homepage))
}

#[derive(Serialize)]
struct ApiInfo {
    message: &'static str,
    version: &'static str,
}

async fn homepage() -> Json<ApiInfo> {
    Json(ApiInfo {
        message: "Quiz App API is running!",
        version: utils::VERSION,
    })
}

pub(crate) async fn not_found() -> AppError {
    AppError::NotFound
}
