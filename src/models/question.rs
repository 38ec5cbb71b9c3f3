// src/models/question.rs

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::user::UserId;

/// Server-assigned vocabulary item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordId(pub i64);

/// What the learner is asked about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// A vocabulary word whose definition must be picked.
    Word(String),
    /// A cloze sentence whose missing word must be picked. May contain markup.
    Sentence(String),
}

impl Prompt {
    pub fn text(&self) -> &str {
        match self {
            Prompt::Word(text) | Prompt::Sentence(text) => text,
        }
    }
}

/// A validated multiple-choice question. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Present for definition questions; fill-in-the-blank questions carry no id.
    pub id: Option<WordId>,

    /// The requesting user's id, as reported alongside definition questions.
    pub user_id: Option<UserId>,

    pub prompt: Prompt,

    /// Options in display order.
    pub options: Vec<String>,

    pub correct_answer: String,

    /// Why the scheduler picked this word, if the server says.
    pub reason: Option<String>,
}

impl Question {
    /// Exact, case-sensitive comparison. Any option equal to the answer counts.
    pub fn is_correct(&self, chosen: &str) -> bool {
        chosen == self.correct_answer
    }
}

/// Raw body of `GET /api/question`.
/// Every field is optional here so that a malformed payload becomes a `DataError`, not a decode panic.
#[derive(Debug, Deserialize)]
pub struct DefinitionQuestionResponse {
    pub user_id: Option<UserId>,
    pub word_id: Option<WordId>,
    pub word: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Raw body of `GET /api/fill-in-the-blank-question`.
#[derive(Debug, Deserialize)]
pub struct FillBlankQuestionResponse {
    pub sentence: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_answer: Option<String>,
}

fn required_text(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ApiError::Data(format!("missing field `{}`", field))),
    }
}

fn required_options(value: Option<Vec<String>>) -> Result<Vec<String>, ApiError> {
    match value {
        Some(options) if options.len() >= 2 => Ok(options),
        Some(options) => Err(ApiError::Data(format!(
            "expected at least 2 options, got {}",
            options.len()
        ))),
        None => Err(ApiError::Data("missing field `options`".to_string())),
    }
}

impl TryFrom<DefinitionQuestionResponse> for Question {
    type Error = ApiError;

    fn try_from(raw: DefinitionQuestionResponse) -> Result<Self, Self::Error> {
        let word = required_text(raw.word, "word")?;
        let options = required_options(raw.options)?;
        let correct_answer = required_text(raw.correct_answer, "correct_answer")?;

        Ok(Question {
            id: raw.word_id,
            user_id: raw.user_id,
            prompt: Prompt::Word(word),
            options,
            correct_answer,
            reason: raw.reason.filter(|r| !r.trim().is_empty()),
        })
    }
}

impl TryFrom<FillBlankQuestionResponse> for Question {
    type Error = ApiError;

    fn try_from(raw: FillBlankQuestionResponse) -> Result<Self, Self::Error> {
        let sentence = required_text(raw.sentence, "sentence")?;
        let options = required_options(raw.options)?;
        let correct_answer = required_text(raw.correct_answer, "correct_answer")?;

        Ok(Question {
            id: None,
            user_id: None,
            prompt: Prompt::Sentence(sentence),
            options,
            correct_answer,
            reason: None,
        })
    }
}
