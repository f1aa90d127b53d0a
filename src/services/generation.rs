use std::fmt;
use std::time::Duration;

use color_eyre::Result;

use crate::fallback;
use crate::models::{Question, QuestionBatch, QuestionSource, QuizRequest};
use crate::names;
use crate::openai::OpenAiClient;
use crate::validation::{self, SchemaError};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Everything needed to reach the generation provider.
///
/// Passed to the selector on every call; a missing or placeholder API key
/// means generation is not configured and only the fallback bank is used.
#[derive(Clone)]
pub struct GenerationConfig {
    api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GenerationConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            model: names::DEFAULT_OPENAI_MODEL.to_string(),
            base_url: names::DEFAULT_OPENAI_BASE_URL.to_string(),
            timeout: Duration::from_secs(names::DEFAULT_GENERATION_TIMEOUT_SECS),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The usable API key, if any.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != names::PLACEHOLDER_API_KEY)
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }
}

impl fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("configured", &self.is_configured())
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// CompletionProvider trait
// ---------------------------------------------------------------------------

#[cfg_attr(test, mockall::automock)]
pub trait CompletionProvider: Send + Sync {
    /// Send one prompt and return the raw completion text.
    fn complete(
        &self,
        config: &GenerationConfig,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a generation attempt was abandoned. Never reaches the caller of
/// [`QuestionSelector::select`]; it only decides that the fallback is used.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("provider call timed out after {0:?}")]
    Timeout(Duration),
    #[error("provider call failed: {0}")]
    Provider(color_eyre::Report),
    #[error("provider returned malformed questions: {0}")]
    Schema(#[from] SchemaError),
    #[error("provider returned {found} questions, expected {expected}")]
    TooFewQuestions { expected: usize, found: usize },
}

impl GenerationError {
    /// 1-based position of the rejected question, when validation failed on one.
    pub fn position(&self) -> Option<usize> {
        match self {
            GenerationError::Schema(e) => e.position(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Prompt
// ---------------------------------------------------------------------------

pub fn build_prompt(request: &QuizRequest) -> String {
    let QuizRequest {
        topic,
        difficulty,
        count,
    } = request;
    let description = difficulty.description();

    format!(
        r#"Create {count} multiple-choice quiz questions about "{topic}" at {difficulty} difficulty level ({description}).

Requirements:
- Each question should have exactly 4 answer options
- Only one correct answer per question
- Include a brief explanation for the correct answer
- Questions should be factual and educational
- Avoid trick questions or ambiguous wording
- Make sure questions are appropriate for the {difficulty} difficulty level
- Do NOT include A), B), C), D) prefixes in the options - just the plain text

Return the response as a valid JSON array with this exact structure:
[
  {{
    "question": "Question text here?",
    "options": ["First option text", "Second option text", "Third option text", "Fourth option text"],
    "correctAnswer": 0,
    "explanation": "Brief explanation of why this answer is correct."
  }}
]

Topic: {topic}
Difficulty: {difficulty}
Number of questions: {count}"#
    )
}

// ---------------------------------------------------------------------------
// QuestionSelector
// ---------------------------------------------------------------------------

pub struct QuestionSelector<P: CompletionProvider = OpenAiClient> {
    provider: P,
}

impl<P: CompletionProvider + Clone> Clone for QuestionSelector<P> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
        }
    }
}

impl<P: CompletionProvider> QuestionSelector<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Produce exactly `request.count` questions.
    ///
    /// Generation is attempted once when `config` carries a credential. Any
    /// failure is logged and answered from the fallback bank instead.
    pub async fn select(&self, config: &GenerationConfig, request: &QuizRequest) -> QuestionBatch {
        if !config.is_configured() {
            tracing::info!(
                "generation not configured, serving {} fallback questions about '{}'",
                request.count,
                request.topic
            );
            return fallback_batch(request);
        }

        tracing::info!(
            "generating {} {} questions about '{}'",
            request.count,
            request.difficulty,
            request.topic
        );

        match self.generate(config, request).await {
            Ok(questions) => {
                tracing::info!("generated {} questions", questions.len());
                QuestionBatch {
                    questions,
                    source: QuestionSource::Generated,
                }
            }
            Err(e) => {
                tracing::error!(
                    position = ?e.position(),
                    "question generation failed, falling back: {e}"
                );
                fallback_batch(request)
            }
        }
    }

    async fn generate(
        &self,
        config: &GenerationConfig,
        request: &QuizRequest,
    ) -> Result<Vec<Question>, GenerationError> {
        let prompt = build_prompt(request);

        let text = tokio::time::timeout(config.timeout, self.provider.complete(config, &prompt))
            .await
            .map_err(|_| GenerationError::Timeout(config.timeout))?
            .map_err(GenerationError::Provider)?;

        let mut questions =
            validation::parse_completion(&text, &request.topic, request.difficulty)?;

        if questions.len() < request.count {
            return Err(GenerationError::TooFewQuestions {
                expected: request.count,
                found: questions.len(),
            });
        }

        if questions.len() > request.count {
            tracing::warn!(
                "provider returned {} questions, keeping the first {}",
                questions.len(),
                request.count
            );
            questions.truncate(request.count);
        }

        Ok(questions)
    }
}

pub fn fallback_batch(request: &QuizRequest) -> QuestionBatch {
    QuestionBatch {
        questions: fallback::fallback_questions(&request.topic, request.difficulty, request.count),
        source: QuestionSource::Fallback,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
