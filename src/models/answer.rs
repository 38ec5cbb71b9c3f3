// src/models/answer.rs

use std::fmt;

use serde::Serialize;

use crate::models::{question::WordId, user::UserId};

/// DTO for `POST /api/answer`. Sent once per answered definition question, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerSubmission {
    pub user_id: UserId,
    pub word_id: WordId,
    pub answer: String,
}

/// Verdict shown after an option is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub correct: bool,
    pub correct_answer: String,
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.correct {
            write!(f, "Correct!")
        } else {
            write!(f, "Incorrect. The correct answer was: \"{}\"", self.correct_answer)
        }
    }
}

/// What `submit_answer` reports back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub feedback: Feedback,
    pub score: u32,
    pub questions_answered: u32,
    /// True when this was the last round of the quiz.
    pub finished: bool,
}
