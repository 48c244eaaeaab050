use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const OPTIONS_PER_QUESTION: usize = 4;
pub const MIN_TIMER_SECS: i32 = 20;
pub const MAX_TIMER_SECS: i32 = 40;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    pub text: String,
    pub is_correct: bool,
}

impl QuestionOption {
    pub fn new(text: &str, is_correct: bool) -> Self {
        QuestionOption {
            text: text.to_owned(),
            is_correct,
        }
    }
}

/// A question as it is stored in the `questions` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub quiz_id: ObjectId,
    pub question_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_image: Option<String>,
    pub options: Vec<QuestionOption>,
    pub explanation: String,
    pub timer: i32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuestionDefect {
    #[error("question text is empty")]
    EmptyText,
    #[error("expected {expected} options, found {0}", expected = OPTIONS_PER_QUESTION)]
    OptionCount(usize),
    #[error("expected exactly one correct option, found {0}")]
    CorrectCount(usize),
    #[error("timer {0} is outside {min}..={max} seconds", min = MIN_TIMER_SECS, max = MAX_TIMER_SECS)]
    TimerOutOfRange(i64),
}

/// Checks the invariants every stored question must hold.
pub fn check_shape(
    question_text: &str,
    options: &[QuestionOption],
    timer: i64,
) -> Result<(), QuestionDefect> {
    if question_text.trim().is_empty() {
        return Err(QuestionDefect::EmptyText);
    }
    if options.len() != OPTIONS_PER_QUESTION {
        return Err(QuestionDefect::OptionCount(options.len()));
    }
    let correct = options.iter().filter(|o| o.is_correct).count();
    if correct != 1 {
        return Err(QuestionDefect::CorrectCount(correct));
    }
    if !(i64::from(MIN_TIMER_SECS)..=i64::from(MAX_TIMER_SECS)).contains(&timer) {
        return Err(QuestionDefect::TimerOutOfRange(timer));
    }
    Ok(())
}

impl Question {
    pub fn check(&self) -> Result<(), QuestionDefect> {
        check_shape(&self.question_text, &self.options, i64::from(self.timer))
    }
}

/// One item of the array returned by the generation API.
///
/// Unknown keys are ignored, which also discards any image reference the
/// model added despite being told not to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub question_text: String,
    pub options: Vec<QuestionOption>,
    pub explanation: String,
    pub timer: i64,
}

impl GeneratedQuestion {
    pub fn check(&self) -> Result<(), QuestionDefect> {
        check_shape(&self.question_text, &self.options, self.timer)
    }

    /// Attaches the owning quiz. Call [`GeneratedQuestion::check`] first; the
    /// timer is clamped only so the conversion itself can't overflow.
    pub fn into_question(self, quiz_id: ObjectId) -> Question {
        Question {
            quiz_id,
            question_text: self.question_text,
            question_image: None,
            options: self.options,
            explanation: self.explanation,
            timer: self
                .timer
                .clamp(i64::from(MIN_TIMER_SECS), i64::from(MAX_TIMER_SECS)) as i32,
        }
    }
}
