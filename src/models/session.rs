// src/models/session.rs

use std::fmt;

use crate::models::user::UserId;

/// Rounds in one quiz.
pub const QUIZ_LENGTH: u32 = 5;

/// The two quiz flavours. Same state machine, different question source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizMode {
    /// Pick the definition of a word; answers are reported to the server.
    GuessDefinition,
    /// Pick the word that completes a sentence.
    FillInBlank,
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizMode::GuessDefinition => write!(f, "Guess the Definition"),
            QuizMode::FillInBlank => write!(f, "Fill in the Blank"),
        }
    }
}

/// Per-login counters. Lives in memory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: Option<String>,
    pub user_id: Option<UserId>,
    pub quiz_length: u32,
    pub score: u32,
    pub questions_answered: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            username: None,
            user_id: None,
            quiz_length: QUIZ_LENGTH,
            score: 0,
            questions_answered: 0,
        }
    }
}

impl Session {
    pub fn for_user(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Self::default()
        }
    }

    /// Zeroes the counters at the start of a quiz. Identity is kept.
    pub fn reset_counters(&mut self) {
        self.score = 0;
        self.questions_answered = 0;
    }

    /// Counts one answered round. Returns false (and changes nothing) once the quiz is full.
    pub fn record_answer(&mut self, correct: bool) -> bool {
        if self.is_complete() {
            return false;
        }
        self.questions_answered += 1;
        if correct {
            self.score += 1;
        }
        true
    }

    pub fn is_complete(&self) -> bool {
        self.questions_answered >= self.quiz_length
    }

    /// 1-based number of the round about to be asked.
    pub fn next_round(&self) -> u32 {
        self.questions_answered + 1
    }
}
