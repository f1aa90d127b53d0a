use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::names;

/// How hard the generated questions should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Wording used when asking the provider for questions at this level.
    pub fn description(self) -> &'static str {
        match self {
            Difficulty::Easy => "basic level, suitable for beginners with simple concepts",
            Difficulty::Medium => "intermediate level, requiring some knowledge of the subject",
            Difficulty::Hard => "advanced level, requiring deep understanding and complex reasoning",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ValidationError::InvalidDifficulty),
        }
    }
}

/// Where a question came from. Diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionSource {
    Generated,
    Fallback,
}

/// A single validated trivia item.
///
/// On the wire the prompt is `question` and the answer index is
/// `correctAnswer`, which is what the browser client reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u32,
    #[serde(rename = "question")]
    pub text: String,
    pub options: [String; 4],
    #[serde(rename = "correctAnswer")]
    pub correct_index: u8,
    pub explanation: String,
    pub topic: String,
    #[serde(rename = "difficulty")]
    pub difficulty_level: Difficulty,
    pub source: QuestionSource,
    pub created_at: DateTime<Utc>,
}

/// A full set of questions for one quiz run.
#[derive(Debug, Clone)]
pub struct QuestionBatch {
    pub questions: Vec<Question>,
    pub source: QuestionSource,
}

/// Validated parameters for one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest {
    pub topic: String,
    pub difficulty: Difficulty,
    pub count: usize,
}

impl QuizRequest {
    pub fn new(topic: &str, difficulty: &str, count: i64) -> Result<Self, ValidationError> {
        let topic = topic.trim();
        if topic.is_empty() || difficulty.trim().is_empty() {
            return Err(ValidationError::MissingTopicOrDifficulty);
        }

        let difficulty = difficulty.trim().parse::<Difficulty>()?;

        if !(names::MIN_QUESTION_COUNT..=names::MAX_QUESTION_COUNT).contains(&count) {
            return Err(ValidationError::CountOutOfRange);
        }

        Ok(Self {
            topic: topic.to_string(),
            difficulty,
            count: count as usize,
        })
    }
}

/// Bad request parameters. Always surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Topic and difficulty are required")]
    MissingTopicOrDifficulty,
    #[error("Difficulty must be easy, medium, or hard")]
    InvalidDifficulty,
    #[error("Count must be between {} and {}", names::MIN_QUESTION_COUNT, names::MAX_QUESTION_COUNT)]
    CountOutOfRange,
    #[error("Questions and answers are required")]
    MissingSubmission,
}
