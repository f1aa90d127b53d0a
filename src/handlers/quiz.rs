use axum::{
    extract::Query,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::JsonBody,
    fallback::{self, SampleQuestion},
    models::ValidationError,
    names,
    rejections::AppError,
    services::scoring::{self, AnswerSheet, QuizScore, SubmittedQuestion},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::SAMPLE_QUESTIONS_URL, get(sample_questions))
        .route(names::SUBMIT_QUIZ_URL, post(submit_quiz))
}

#[derive(Deserialize)]
struct SampleQuery {
    #[serde(default)]
    topic: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SampleQuestionBody {
    id: u32,
    question: &'static str,
    options: [&'static str; 4],
    correct_answer: u8,
    explanation: &'static str,
}

impl From<&SampleQuestion> for SampleQuestionBody {
    fn from(q: &SampleQuestion) -> Self {
        Self {
            id: q.id,
            question: q.text,
            options: q.options,
            correct_answer: q.correct_index,
            explanation: q.explanation,
        }
    }
}

#[derive(Serialize)]
struct SampleResponse {
    success: bool,
    questions: Vec<SampleQuestionBody>,
}

/// Legacy endpoint: always the same ten questions, whatever the topic.
async fn sample_questions(Query(query): Query<SampleQuery>) -> Result<Json<SampleResponse>, AppError> {
    let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
    if !present(&query.topic) || !present(&query.difficulty) {
        return Err(ValidationError::MissingTopicOrDifficulty.into());
    }

    Ok(Json(SampleResponse {
        success: true,
        questions: fallback::sample_questions()
            .iter()
            .map(SampleQuestionBody::from)
            .collect(),
    }))
}

#[derive(Deserialize)]
struct SubmitBody {
    #[serde(default)]
    questions: Option<Vec<SubmittedQuestion>>,
    #[serde(default)]
    answers: Option<AnswerSheet>,
}

#[derive(Serialize)]
struct SubmitResponse {
    success: bool,
    #[serde(flatten)]
    score: QuizScore,
}

async fn submit_quiz(JsonBody(body): JsonBody<SubmitBody>) -> Result<Json<SubmitResponse>, AppError> {
    let (Some(questions), Some(answers)) = (body.questions, body.answers) else {
        return Err(ValidationError::MissingSubmission.into());
    };

    let score = scoring::score_attempt(&questions, &answers)?;
    tracing::info!(
        "scored quiz: {}/{} ({}%)",
        score.score,
        score.total_questions,
        score.percentage
    );

    Ok(Json(SubmitResponse {
        success: true,
        score,
    }))
}
