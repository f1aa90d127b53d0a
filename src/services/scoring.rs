use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::ValidationError;

/// A question as the client sends it back for scoring.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedQuestion {
    #[serde(default)]
    pub id: Option<u32>,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: i64,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Chosen option per question position.
///
/// The client keeps answers as an object keyed by position; older callers
/// send a plain array with `null` for skipped questions.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AnswerSheet {
    List(Vec<Option<i64>>),
    Map(BTreeMap<String, Option<i64>>),
}

impl AnswerSheet {
    pub fn answer(&self, position: usize) -> Option<i64> {
        match self {
            AnswerSheet::List(list) => list.get(position).copied().flatten(),
            AnswerSheet::Map(map) => map
                .iter()
                .find(|(key, _)| key.trim().parse::<usize>().ok() == Some(position))
                .and_then(|(_, answer)| *answer),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionReview {
    pub question_id: Option<u32>,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: i64,
    pub user_answer: Option<i64>,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizScore {
    pub score: usize,
    pub total_questions: usize,
    pub percentage: u32,
    pub message: &'static str,
    pub results: Vec<QuestionReview>,
}

pub fn score_attempt(
    questions: &[SubmittedQuestion],
    answers: &AnswerSheet,
) -> Result<QuizScore, ValidationError> {
    if questions.is_empty() {
        return Err(ValidationError::MissingSubmission);
    }

    let results: Vec<QuestionReview> = questions
        .iter()
        .enumerate()
        .map(|(idx, q)| {
            let user_answer = answers.answer(idx);
            QuestionReview {
                question_id: q.id,
                question: q.question.clone(),
                options: q.options.clone(),
                correct_answer: q.correct_answer,
                user_answer,
                is_correct: user_answer == Some(q.correct_answer),
                explanation: q.explanation.clone(),
            }
        })
        .collect();

    let score = results.iter().filter(|r| r.is_correct).count();
    let total = results.len();

    Ok(QuizScore {
        score,
        total_questions: total,
        percentage: (score as f64 * 100.0 / total as f64).round() as u32,
        message: feedback(score, total),
        results,
    })
}

/// Feedback line shown with the score.
pub fn feedback(score: usize, total: usize) -> &'static str {
    let scaled = score * 100;
    if scaled >= 80 * total {
        "Excellent work! You're a quiz master!"
    } else if scaled >= 60 * total {
        "Good job! Keep up the learning!"
    } else if scaled >= 40 * total {
        "Not bad! Room for improvement!"
    } else {
        "Keep studying and try again!"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(correct: &[i64]) -> Vec<SubmittedQuestion> {
        correct
            .iter()
            .enumerate()
            .map(|(i, &c)| SubmittedQuestion {
                id: Some(i as u32 + 1),
                question: format!("Q{}", i + 1),
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                correct_answer: c,
                explanation: None,
            })
            .collect()
    }

    #[test]
    fn counts_matching_answers() {
        let qs = questions(&[0, 1, 2]);
        let answers = AnswerSheet::List(vec![Some(0), Some(3), Some(2)]);

        let result = score_attempt(&qs, &answers).unwrap();

        assert_eq!(result.score, 2);
        assert_eq!(result.total_questions, 3);
        assert_eq!(result.percentage, 67);
        assert!(result.results[0].is_correct);
        assert!(!result.results[1].is_correct);
        assert_eq!(result.results[1].user_answer, Some(3));
    }

    #[test]
    fn unanswered_questions_are_incorrect() {
        let qs = questions(&[0, 1]);
        let answers = AnswerSheet::List(vec![None]);

        let result = score_attempt(&qs, &answers).unwrap();

        assert_eq!(result.score, 0);
        assert_eq!(result.results[1].user_answer, None);
        assert_eq!(result.message, "Keep studying and try again!");
    }

    #[test]
    fn answer_map_is_keyed_by_position() {
        let sheet: AnswerSheet = serde_json::from_str(r#"{"0": 2, "2": 1}"#).unwrap();

        assert_eq!(sheet.answer(0), Some(2));
        assert_eq!(sheet.answer(1), None);
        assert_eq!(sheet.answer(2), Some(1));
    }

    #[test]
    fn answer_list_accepts_nulls() {
        let sheet: AnswerSheet = serde_json::from_str("[1, null, 3]").unwrap();

        assert_eq!(sheet.answer(0), Some(1));
        assert_eq!(sheet.answer(1), None);
        assert_eq!(sheet.answer(5), None);
    }

    #[test]
    fn empty_submission_is_rejected() {
        let err = score_attempt(&[], &AnswerSheet::List(vec![])).unwrap_err();
        assert_eq!(err, ValidationError::MissingSubmission);
    }

    #[test]
    fn feedback_tiers() {
        assert_eq!(feedback(10, 10), "Excellent work! You're a quiz master!");
        assert_eq!(feedback(8, 10), "Excellent work! You're a quiz master!");
        assert_eq!(feedback(7, 10), "Good job! Keep up the learning!");
        assert_eq!(feedback(4, 10), "Not bad! Room for improvement!");
        assert_eq!(feedback(3, 10), "Keep studying and try again!");
    }

    #[test]
    fn perfect_score_is_one_hundred_percent() {
        let qs = questions(&[3, 3]);
        let result = score_attempt(&qs, &AnswerSheet::List(vec![Some(3), Some(3)])).unwrap();
        assert_eq!(result.percentage, 100);
    }
}
