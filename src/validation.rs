//! Turns untyped provider output into validated [`Question`]s.
//!
//! Validation is fail-fast: the first problem found is reported with the
//! 1-based position of the offending candidate.

use chrono::Utc;
use serde_json::{Map, Value};

use crate::{
    models::{Difficulty, Question, QuestionSource},
    utils,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("questions must be an array")]
    NotAnArray,
    #[error("question {0} is missing its text")]
    MissingQuestion(usize),
    #[error("question {0} options must be an array")]
    OptionsNotArray(usize),
    #[error("question {position} must have exactly 4 options, found {found}")]
    WrongOptionCount { position: usize, found: usize },
    #[error("question {0} has an option that is not text")]
    OptionNotText(usize),
    #[error("question {0} has an empty option")]
    EmptyOption(usize),
    #[error("question {0} has duplicate options")]
    DuplicateOptions(usize),
    #[error("question {0} is missing correctAnswer")]
    MissingCorrectAnswer(usize),
    #[error("question {0} has invalid correctAnswer index")]
    InvalidCorrectAnswer(usize),
    #[error("question {0} is missing its explanation")]
    MissingExplanation(usize),
}

impl SchemaError {
    /// 1-based position of the offending question, if the error is about one.
    pub fn position(&self) -> Option<usize> {
        match *self {
            SchemaError::InvalidJson(_) | SchemaError::NotAnArray => None,
            SchemaError::MissingQuestion(p)
            | SchemaError::OptionsNotArray(p)
            | SchemaError::OptionNotText(p)
            | SchemaError::EmptyOption(p)
            | SchemaError::DuplicateOptions(p)
            | SchemaError::MissingCorrectAnswer(p)
            | SchemaError::InvalidCorrectAnswer(p)
            | SchemaError::MissingExplanation(p) => Some(p),
            SchemaError::WrongOptionCount { position, .. } => Some(position),
        }
    }
}

/// Parse raw completion text, which may be wrapped in code fences, and validate it.
pub fn parse_completion(
    text: &str,
    topic: &str,
    difficulty: Difficulty,
) -> Result<Vec<Question>, SchemaError> {
    let raw: Value = serde_json::from_str(utils::strip_code_fences(text))
        .map_err(|e| SchemaError::InvalidJson(e.to_string()))?;
    validate_questions(&raw, topic, difficulty)
}

pub fn validate_questions(
    raw: &Value,
    topic: &str,
    difficulty: Difficulty,
) -> Result<Vec<Question>, SchemaError> {
    let candidates = raw.as_array().ok_or(SchemaError::NotAnArray)?;
    let created_at = Utc::now();

    candidates
        .iter()
        .enumerate()
        .map(|(idx, candidate)| -> Result<Question, SchemaError> {
            let position = idx + 1;
            let fields = candidate
                .as_object()
                .ok_or(SchemaError::MissingQuestion(position))?;

            let text =
                required_text(fields, "question").ok_or(SchemaError::MissingQuestion(position))?;
            let options = options(fields, position)?;
            let correct_index = correct_index(fields, position)?;
            let explanation = required_text(fields, "explanation")
                .ok_or(SchemaError::MissingExplanation(position))?;

            Ok(Question {
                id: position as u32,
                text,
                options,
                correct_index,
                explanation,
                topic: topic.to_string(),
                difficulty_level: difficulty,
                source: QuestionSource::Generated,
                created_at,
            })
        })
        .collect()
}

fn required_text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn options(fields: &Map<String, Value>, position: usize) -> Result<[String; 4], SchemaError> {
    let raw = fields
        .get("options")
        .and_then(Value::as_array)
        .ok_or(SchemaError::OptionsNotArray(position))?;

    if raw.len() != 4 {
        return Err(SchemaError::WrongOptionCount {
            position,
            found: raw.len(),
        });
    }

    let cleaned = raw
        .iter()
        .map(|opt| {
            opt.as_str()
                .map(normalize_option)
                .ok_or(SchemaError::OptionNotText(position))
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (i, opt) in cleaned.iter().enumerate() {
        if opt.is_empty() {
            return Err(SchemaError::EmptyOption(position));
        }
        if cleaned[..i].contains(opt) {
            return Err(SchemaError::DuplicateOptions(position));
        }
    }

    cleaned
        .try_into()
        .map_err(|_| SchemaError::WrongOptionCount { position, found: raw.len() })
}

/// Accepts integers, whole floats such as `2.0`, and numeric strings such as `"2"`.
fn correct_index(fields: &Map<String, Value>, position: usize) -> Result<u8, SchemaError> {
    let index = match fields.get("correctAnswer") {
        None | Some(Value::Null) => return Err(SchemaError::MissingCorrectAnswer(position)),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };

    match index {
        Some(i @ 0..=3) => Ok(i as u8),
        _ => Err(SchemaError::InvalidCorrectAnswer(position)),
    }
}

/// Strip a single leading `A) ` / `B. ` style label and trim.
///
/// The label must be an uppercase A-D followed by `)` or `.` and whitespace,
/// so text like "Basketball" or "D.C. United" is left intact.
pub fn normalize_option(option: &str) -> String {
    let option = option.trim();
    strip_letter_label(option).unwrap_or(option).trim().to_string()
}

fn strip_letter_label(option: &str) -> Option<&str> {
    let mut chars = option.chars();
    let letter = chars.next()?;
    let mark = chars.next()?;
    if !matches!(letter, 'A'..='D') || !matches!(mark, ')' | '.') {
        return None;
    }

    let rest = chars.as_str();
    let content = rest.trim_start();
    (content.len() < rest.len()).then_some(content)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn candidate(n: usize) -> Value {
        json!({
            "question": format!("Question {n}?"),
            "options": ["alpha", "beta", "gamma", "delta"],
            "correctAnswer": n % 4,
            "explanation": format!("Explanation {n}"),
        })
    }

    fn validate(raw: Value) -> Result<Vec<Question>, SchemaError> {
        validate_questions(&raw, "Science", Difficulty::Easy)
    }

    #[test]
    fn example_candidate_validates() {
        let raw = json!([{
            "question": "Q1?",
            "options": ["A) one", "two", "three", "four"],
            "correctAnswer": 0,
            "explanation": "e",
        }]);

        let questions = validate(raw).unwrap();

        assert_eq!(questions.len(), 1);
        let q = &questions[0];
        assert_eq!(q.id, 1);
        assert_eq!(q.text, "Q1?");
        assert_eq!(q.options, ["one", "two", "three", "four"]);
        assert_eq!(q.correct_index, 0);
        assert_eq!(q.explanation, "e");
        assert_eq!(q.topic, "Science");
        assert_eq!(q.difficulty_level, Difficulty::Easy);
        assert_eq!(q.source, QuestionSource::Generated);
    }

    #[test]
    fn ids_follow_input_order() {
        let raw = Value::Array((1..=7).map(candidate).collect());

        let questions = validate(raw).unwrap();

        let ids: Vec<u32> = questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, (1..=7).collect::<Vec<_>>());
        assert_eq!(questions[4].text, "Question 5?");
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(validate(json!([])).unwrap().is_empty());
    }

    #[test]
    fn non_array_is_rejected() {
        let err = validate(json!({ "questions": [] })).unwrap_err();
        assert_eq!(err, SchemaError::NotAnArray);
        assert_eq!(err.position(), None);
    }

    #[test]
    fn missing_explanation_names_position() {
        let mut bad = candidate(2);
        bad.as_object_mut().unwrap().remove("explanation");
        let raw = json!([candidate(1), bad, candidate(3)]);

        let err = validate(raw).unwrap_err();

        assert_eq!(err, SchemaError::MissingExplanation(2));
        assert_eq!(err.position(), Some(2));
    }

    #[test]
    fn blank_question_text_is_missing() {
        let mut bad = candidate(1);
        bad["question"] = json!("   ");

        assert_eq!(validate(json!([bad])), Err(SchemaError::MissingQuestion(1)));
    }

    #[test]
    fn options_must_be_four_strings() {
        let mut not_array = candidate(1);
        not_array["options"] = json!("a, b, c, d");
        assert_eq!(
            validate(json!([not_array])),
            Err(SchemaError::OptionsNotArray(1))
        );

        let mut three = candidate(1);
        three["options"] = json!(["a", "b", "c"]);
        assert_eq!(
            validate(json!([candidate(1), three])),
            Err(SchemaError::WrongOptionCount {
                position: 2,
                found: 3
            })
        );

        let mut numeric = candidate(1);
        numeric["options"] = json!(["a", 2, "c", "d"]);
        assert_eq!(
            validate(json!([numeric])),
            Err(SchemaError::OptionNotText(1))
        );
    }

    #[test]
    fn duplicate_options_after_normalizing_are_rejected() {
        let mut dup = candidate(1);
        dup["options"] = json!(["A) Paris", "Paris", "Rome", "Oslo"]);

        assert_eq!(validate(json!([dup])), Err(SchemaError::DuplicateOptions(1)));
    }

    #[test]
    fn empty_option_is_reported_as_empty() {
        let mut empty = candidate(1);
        empty["options"] = json!(["", "b", "c", "d"]);

        let err = validate(json!([empty])).unwrap_err();

        assert_eq!(err, SchemaError::EmptyOption(1));
        assert_eq!(err.to_string(), "question 1 has an empty option");
    }

    #[test]
    fn whitespace_option_is_empty() {
        let mut blank = candidate(2);
        blank["options"] = json!(["a", "   ", "c", "d"]);

        assert_eq!(validate(json!([candidate(1), blank])), Err(SchemaError::EmptyOption(2)));
    }

    #[test]
    fn whole_float_correct_answer_is_accepted() {
        let mut q = candidate(1);
        q["correctAnswer"] = json!(2.0);

        assert_eq!(validate(json!([q])).unwrap()[0].correct_index, 2);
    }

    #[test]
    fn correct_answer_out_of_range_is_rejected() {
        for bad_index in [
            json!(-1),
            json!(4),
            json!(100),
            json!(1.5),
            json!(4.0),
            json!(-0.5),
            json!("x"),
            json!(true),
        ] {
            let mut bad = candidate(1);
            bad["correctAnswer"] = bad_index.clone();
            assert_eq!(
                validate(json!([bad])),
                Err(SchemaError::InvalidCorrectAnswer(1)),
                "correctAnswer {bad_index} should be rejected"
            );
        }
    }

    #[test]
    fn correct_answer_must_be_present() {
        let mut missing = candidate(1);
        missing.as_object_mut().unwrap().remove("correctAnswer");
        assert_eq!(
            validate(json!([missing])),
            Err(SchemaError::MissingCorrectAnswer(1))
        );

        let mut null_answer = candidate(1);
        null_answer["correctAnswer"] = Value::Null;
        assert_eq!(
            validate(json!([null_answer])),
            Err(SchemaError::MissingCorrectAnswer(1))
        );
    }

    #[test]
    fn numeric_string_correct_answer_is_accepted() {
        let mut q = candidate(1);
        q["correctAnswer"] = json!("3");

        assert_eq!(validate(json!([q])).unwrap()[0].correct_index, 3);
    }

    #[test]
    fn first_violation_wins() {
        let mut first = candidate(1);
        first["correctAnswer"] = json!(9);
        let mut second = candidate(2);
        second.as_object_mut().unwrap().remove("question");

        assert_eq!(
            validate(json!([first, second])),
            Err(SchemaError::InvalidCorrectAnswer(1))
        );
    }

    #[test]
    fn text_fields_are_trimmed() {
        let raw = json!([{
            "question": "  Why?  ",
            "options": [" B. yes ", "no", "maybe", "never"],
            "correctAnswer": 0,
            "explanation": "\tbecause\n",
        }]);

        let q = &validate(raw).unwrap()[0];
        assert_eq!(q.text, "Why?");
        assert_eq!(q.options[0], "yes");
        assert_eq!(q.explanation, "because");
    }

    #[test]
    fn normalize_strips_only_the_label() {
        assert_eq!(normalize_option("A) Paris"), "Paris");
        assert_eq!(normalize_option("B. Berlin"), "Berlin");
        assert_eq!(normalize_option("C)   Rome "), "Rome");
        assert_eq!(normalize_option("D. D. Eisenhower"), "D. Eisenhower");
    }

    #[test]
    fn normalize_leaves_lookalikes_untouched() {
        assert_eq!(normalize_option("Basketball"), "Basketball");
        assert_eq!(normalize_option("A.I. research"), "A.I. research");
        assert_eq!(normalize_option("E) not a label"), "E) not a label");
        assert_eq!(normalize_option("a) lowercase"), "a) lowercase");
        assert_eq!(normalize_option("C)no space"), "C)no space");
    }

    #[test]
    fn fenced_completion_is_parsed() {
        let text = format!("```json\n{}\n```", json!([candidate(1)]));

        let questions = parse_completion(&text, "Art", Difficulty::Hard).unwrap();

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].difficulty_level, Difficulty::Hard);
    }

    #[test]
    fn prose_completion_is_invalid_json() {
        let err = parse_completion("Sure! Here are your questions.", "Art", Difficulty::Easy)
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidJson(_)));
    }
}
