//! Turns a free-form completion into question records.
//!
//! Nothing here returns an error: an unusable response is logged and becomes
//! an empty batch so the run can carry on with the next topic.

use crate::questions::{GeneratedQuestion, Question};
use mongodb::bson::oid::ObjectId;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::{debug, error, warn};

/// One decoded element of the generated array, untouched.
pub type RawRecord = Map<String, Value>;

/// First `[` to last `]`, across lines.
static BROAD_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("literal pattern compiles"));

/// Finds the end (exclusive byte offset) of the bracket group opening at
/// `start`, skipping over brackets inside JSON string literals.
fn balanced_end(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset + 1);
                }
            }
            _ => {}
        }
    }
    None
}

fn decode_array(candidate: &str) -> serde_json::Result<Vec<RawRecord>> {
    serde_json::from_str(candidate)
}

/// Locates the JSON array in `text`.
///
/// Balanced top-level bracket groups are tried left to right and the first
/// one that decodes as an array of objects wins. Groups that don't decode are
/// skipped whole; an unmatched `[` is stepped over. When none decodes, the
/// span from the first `[` to the last `]` is returned so the caller can
/// report what it saw.
pub fn extract_json_array(text: &str) -> Option<&str> {
    let mut cursor = 0;
    while let Some(found) = text[cursor..].find('[') {
        let start = cursor + found;
        match balanced_end(text, start) {
            Some(end) => {
                let candidate = &text[start..end];
                if decode_array(candidate).is_ok() {
                    return Some(candidate);
                }
                cursor = end;
            }
            None => cursor = start + 1,
        }
    }

    BROAD_SPAN.find(text).map(|m| m.as_str())
}

/// Decodes the generated array into raw objects, or nothing.
pub fn parse_response(response: Option<&str>) -> Vec<RawRecord> {
    let text = match response {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Vec::new(),
    };

    let Some(json_str) = extract_json_array(text) else {
        error!(
            "No valid JSON array found in generation response. Raw response: {}",
            text
        );
        return Vec::new();
    };

    match decode_array(json_str) {
        Ok(records) => {
            debug!("Decoded {} records from generation response", records.len());
            records
        }
        Err(e) => {
            error!(
                "Could not parse extracted JSON from generation response ({}). Raw response: {}",
                e, json_str
            );
            Vec::new()
        }
    }
}

#[derive(Debug, Default)]
pub struct ValidatedBatch {
    pub accepted: Vec<GeneratedQuestion>,
    pub rejected: usize,
}

impl ValidatedBatch {
    pub fn into_questions(self, quiz_id: ObjectId) -> Vec<Question> {
        self.accepted
            .into_iter()
            .map(|q| q.into_question(quiz_id))
            .collect()
    }
}

/// Keeps the records that form valid questions and drops the rest.
pub fn validate_records(topic: &str, records: Vec<RawRecord>) -> ValidatedBatch {
    let mut batch = ValidatedBatch::default();

    for (index, record) in records.into_iter().enumerate() {
        let generated = match serde_json::from_value::<GeneratedQuestion>(Value::Object(record)) {
            Ok(generated) => generated,
            Err(e) => {
                warn!("Dropping generated question #{} for '{}': {}", index, topic, e);
                batch.rejected += 1;
                continue;
            }
        };
        if let Err(defect) = generated.check() {
            warn!(
                "Dropping generated question #{} for '{}': {}",
                index, topic, defect
            );
            batch.rejected += 1;
            continue;
        }
        batch.accepted.push(generated);
    }

    batch
}
