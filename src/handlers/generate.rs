use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::JsonBody,
    models::{Difficulty, Question, QuestionBatch, QuestionSource, QuizRequest},
    names,
    rejections::AppError,
    services::generation,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::GENERATE_QUESTIONS_URL, post(generate_questions))
        .route(names::GENERATE_STATUS_URL, get(status))
}

/// Deserialize a value that may be either a JSON number or a string containing a number.
/// HTML forms and some clients send numeric fields as strings.
fn deserialize_string_or_i64<'de, D: serde::Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    struct Vis;
    impl<'de> serde::de::Visitor<'de> for Vis {
        type Value = i64;
        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("number or numeric string")
        }
        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }
        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(E::custom)
        }
        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<i64, E> {
            if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
                Ok(v as i64)
            } else {
                Err(E::custom(format!("{v} is not a whole number")))
            }
        }
        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<i64, E> {
            v.trim().parse().map_err(E::custom)
        }
    }
    d.deserialize_any(Vis)
}

#[derive(Deserialize)]
struct GenerateBody {
    #[serde(default)]
    topic: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(
        default = "default_question_count",
        deserialize_with = "deserialize_string_or_i64"
    )]
    count: i64,
}

fn default_question_count() -> i64 {
    names::DEFAULT_QUESTION_COUNT
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    success: bool,
    topic: String,
    difficulty: Difficulty,
    count: usize,
    questions: Vec<Question>,
    ai_configured: bool,
    source: QuestionSource,
}

async fn generate_questions(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<GenerateBody>,
) -> Result<Json<GenerateResponse>, AppError> {
    let request = QuizRequest::new(
        body.topic.as_deref().unwrap_or_default(),
        body.difficulty.as_deref().unwrap_or_default(),
        body.count,
    )?;

    tracing::info!(
        "question request: {} {} questions about '{}'",
        request.count,
        request.difficulty,
        request.topic
    );

    let batch = select_batch(&state, &request).await;

    Ok(Json(GenerateResponse {
        success: true,
        topic: request.topic,
        difficulty: request.difficulty,
        count: batch.questions.len(),
        questions: batch.questions,
        ai_configured: state.generation.is_configured(),
        source: batch.source,
    }))
}

/// Run the selector on its own task so that even a panic while generating
/// still ends in a fallback batch.
async fn select_batch(state: &AppState, request: &QuizRequest) -> QuestionBatch {
    let selector = state.selector.clone();
    let config = state.generation.clone();
    let task_request = request.clone();

    match tokio::spawn(async move { selector.select(&config, &task_request).await }).await {
        Ok(batch) => batch,
        Err(e) => {
            tracing::error!("question selection aborted, serving fallback: {e}");
            generation::fallback_batch(request)
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    success: bool,
    ai_configured: bool,
    message: &'static str,
}

async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let ai_configured = state.generation.is_configured();
    let message = if ai_configured {
        "AI question generation is ready"
    } else {
        "AI not configured, using fallback questions"
    };

    Json(StatusResponse {
        success: true,
        ai_configured,
        message,
    })
}
