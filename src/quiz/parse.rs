use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::question::{Question, QuestionKind, QuizSet};

#[derive(Error, Debug)]
pub enum ParseErrorReason {
    #[error("quiz payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("quiz payload is not a JSON object")]
    NotAnObject,

    #[error("\"questions\" is not an array")]
    QuestionsNotArray,
}

/// Parse failure with the offending payload attached, so the user can see
/// exactly what the model produced.
#[derive(Error, Debug)]
#[error("{reason}. Raw data from agent: {raw}")]
pub struct ParseError {
    pub reason: ParseErrorReason,

    /// the payload exactly as the generation client returned it
    pub raw: String,
}

/// Turns a raw model completion into an ordered set of questions.
///
/// A reply without a `"questions"` key means the model produced no quiz,
/// which is an empty set rather than an error. Invalid JSON or a top level
/// of the wrong shape is a [`ParseError`].
pub fn parse(raw: &str) -> Result<QuizSet, ParseError> {
    let body = strip_code_fence(raw);

    let value: Value = serde_json::from_str(body).map_err(|e| ParseError {
        reason: ParseErrorReason::InvalidJson(e),
        raw: raw.to_string(),
    })?;

    let object = value.as_object().ok_or_else(|| ParseError {
        reason: ParseErrorReason::NotAnObject,
        raw: raw.to_string(),
    })?;

    let Some(questions) = object.get("questions") else {
        return Ok(QuizSet::default());
    };

    let items = questions.as_array().ok_or_else(|| ParseError {
        reason: ParseErrorReason::QuestionsNotArray,
        raw: raw.to_string(),
    })?;

    log::debug!("parsed quiz payload with {} questions", items.len());

    Ok(QuizSet::new(items.iter().map(question_from_value).collect()))
}

/// Models sometimes wrap their JSON reply in a markdown code fence. The
/// markers are removed only on a literal prefix/suffix match; unfenced input
/// passes through untouched.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(body) = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
    else {
        return trimmed;
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[derive(Deserialize, Default)]
struct RawQuestion {
    #[serde(rename = "type")]
    kind: Option<String>,
    question: Option<String>,
    #[serde(default)]
    options: Vec<String>,
    answer: Option<String>,
}

fn question_from_value(value: &Value) -> Question {
    // Malformed elements still occupy their slot, so the score denominator
    // matches what the model emitted. Missing fields score Indeterminate.
    let raw: RawQuestion = serde_json::from_value(value.clone()).unwrap_or_default();

    let kind = match raw.kind.as_deref() {
        Some("MCQ") => QuestionKind::MultipleChoice { options: raw.options },
        Some("T/F") => QuestionKind::TrueFalse,
        // "FIB", and anything unrecognized degrades to free text
        _ => QuestionKind::FillInBlank,
    };

    Question {
        prompt: raw.question.unwrap_or_default(),
        answer: raw.answer.unwrap_or_default(),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{"questions":[
        {"type":"MCQ","question":"2+2?","options":["3","4","5","6"],"answer":"4"},
        {"type":"T/F","question":"Sky is blue.","answer":"True"},
        {"type":"FIB","question":"The capital of France is ___.","answer":"Paris"}
    ]}"#;

    #[test]
    fn parses_well_formed_payload_in_order() {
        let set = parse(PAYLOAD).unwrap();
        assert_eq!(set.len(), 3);

        let first = set.get(0).unwrap();
        assert_eq!(first.prompt, "2+2?");
        assert_eq!(first.answer, "4");
        assert_eq!(
            first.kind,
            QuestionKind::MultipleChoice {
                options: vec!["3".into(), "4".into(), "5".into(), "6".into()]
            }
        );

        assert_eq!(set.get(1).unwrap().kind, QuestionKind::TrueFalse);
        assert_eq!(set.get(2).unwrap().kind, QuestionKind::FillInBlank);
    }

    #[test]
    fn fenced_and_unfenced_payloads_parse_identically() {
        let fenced = format!("```json\n{}\n```", PAYLOAD);
        assert_eq!(parse(&fenced).unwrap(), parse(PAYLOAD).unwrap());
    }

    #[test]
    fn bare_fence_marker_is_stripped_too() {
        let fenced = format!("```\n{}\n```", PAYLOAD);
        assert_eq!(parse(&fenced).unwrap(), parse(PAYLOAD).unwrap());
    }

    #[test]
    fn fence_stripping_leaves_unfenced_input_alone() {
        // A payload that merely mentions backticks must not lose content.
        let set = parse(
            r#"{"questions":[{"type":"FIB","question":"Spell ``` in words.","answer":"three backticks"}]}"#,
        )
        .unwrap();
        assert_eq!(set.get(0).unwrap().answer, "three backticks");
    }

    #[test]
    fn missing_questions_key_is_an_empty_set() {
        let set = parse(r#"{"note":"no quiz today"}"#).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn invalid_json_keeps_the_payload_verbatim() {
        let raw = "Sorry, I could not generate a quiz.";
        let err = parse(raw).unwrap_err();
        assert!(matches!(err.reason, ParseErrorReason::InvalidJson(_)));
        assert_eq!(err.raw, raw);
    }

    #[test]
    fn non_object_top_level_is_an_error() {
        let err = parse("[1, 2, 3]").unwrap_err();
        assert!(matches!(err.reason, ParseErrorReason::NotAnObject));
    }

    #[test]
    fn questions_must_be_an_array() {
        let err = parse(r#"{"questions": "none"}"#).unwrap_err();
        assert!(matches!(err.reason, ParseErrorReason::QuestionsNotArray));
    }

    #[test]
    fn tolerates_questions_with_missing_fields() {
        let set = parse(
            r#"{"questions":[{"type":"T/F"},{"type":"mystery","question":"?"},"not an object"]}"#,
        )
        .unwrap();
        assert_eq!(set.len(), 3);

        assert_eq!(set.get(0).unwrap().kind, QuestionKind::TrueFalse);
        assert_eq!(set.get(0).unwrap().answer, "");

        assert_eq!(set.get(1).unwrap().kind, QuestionKind::FillInBlank);
        assert_eq!(set.get(1).unwrap().prompt, "?");

        assert_eq!(set.get(2).unwrap().prompt, "");
    }
}
