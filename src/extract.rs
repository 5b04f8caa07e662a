//! Structured-output extraction from raw generator text.
//!
//! Generator output is untrusted: prose wrapped around a JSON object, or
//! the line-oriented bracketed exam-question grammar. Everything here
//! fails soft — callers own a deterministic fallback value, and raw
//! generator text never crosses this boundary.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::models::{ExamQuestion, McqOption, QuestionType};

static TOPIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[Topic:\s*([^\]]+)\]").unwrap());
static TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[Question Type:\s*(Multiple Choice|Full Solution)\]").unwrap());
static QUESTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[Question:\s*([^\]]+)\]").unwrap());
static MARK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[Mark:\s*(\d+)\s*marks?\]").unwrap());
static ANSWER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[Answer:\s*([^\]]+)\]").unwrap());
static HINT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[Hint:\s*([^\]]+)\]").unwrap());
static MCQ_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[If MCQ:\s*([^\]]+)\]").unwrap());
static OPTION_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([a-e])\)").unwrap());
static CORRECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(Correct:\s*([a-e])\)").unwrap());

/// Locate the outermost brace-delimited span (first `{` through last `}`)
/// and parse it. `None` when no span exists or the span is not valid JSON.
pub fn extract_json_object(text: &str) -> Option<serde_json::Value> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

/// Typed variant of [`extract_json_object`].
pub fn extract_json<T: DeserializeOwned>(text: &str) -> Option<T> {
    let value = extract_json_object(text)?;
    serde_json::from_value(value).ok()
}

/// Parse the bracketed exam-question grammar. Fields are matched
/// independently of line order; Topic, Question Type, Question, Mark,
/// Answer and Hint are all mandatory. Missing any of them is a soft
/// failure, not an error.
pub fn extract_bracketed_fields(text: &str) -> Option<ExamQuestion> {
    let topic = capture(&TOPIC_RE, text)?;
    let type_raw = capture(&TYPE_RE, text)?;
    let question = capture(&QUESTION_RE, text)?;
    let marks: u32 = capture(&MARK_RE, text)?.parse().ok()?;
    let answer = capture(&ANSWER_RE, text)?;
    let hint = capture(&HINT_RE, text)?;

    let question_type = if type_raw.eq_ignore_ascii_case("multiple choice") {
        QuestionType::MultipleChoice
    } else {
        QuestionType::FullSolution
    };

    let (options, correct_option) = match question_type {
        QuestionType::MultipleChoice => {
            let body = capture(&MCQ_BLOCK_RE, text).unwrap_or_default();
            parse_mcq_options(&body)
        }
        QuestionType::FullSolution => (Vec::new(), None),
    };

    Some(ExamQuestion {
        topic,
        question_type,
        question,
        marks,
        answer,
        hint,
        options,
        correct_option,
    })
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    let captured = re.captures(text)?.get(1)?.as_str().trim();
    if captured.is_empty() {
        return None;
    }
    Some(captured.to_string())
}

/// Split an MCQ options body on `(a)`..`(e)` markers, trim each fragment
/// and re-label sequentially from `a`. A trailing `(Correct: x)` marker
/// names the correct option.
fn parse_mcq_options(body: &str) -> (Vec<McqOption>, Option<String>) {
    let correct = CORRECT_RE
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_ascii_lowercase());
    let body = CORRECT_RE.replace(body, "");
    let body = body.as_ref();

    let markers: Vec<(usize, usize)> = OPTION_MARKER_RE
        .find_iter(body)
        .map(|m| (m.start(), m.end()))
        .collect();

    let mut options = Vec::new();
    for (i, (_, end)) in markers.iter().enumerate() {
        let fragment_end = markers.get(i + 1).map_or(body.len(), |(start, _)| *start);
        let text = body[*end..fragment_end].trim();
        if text.is_empty() {
            continue;
        }
        let label = char::from(b'a' + options.len() as u8).to_string();
        options.push(McqOption {
            label,
            text: text.to_string(),
        });
    }

    (options, correct)
}
