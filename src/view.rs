// src/view.rs

use crate::{
    models::{answer::Feedback, question::Question, stats::StatRow},
    state::Screen,
};

/// One change to what the user sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewUpdate {
    Screen(Screen),
    /// Text under the login form; empty clears it.
    LoginMessage(String),
    Welcome(String),
    Loading { number: u32, total: u32 },
    Question(Question),
    QuestionError(String),
    /// Option buttons enabled or disabled.
    OptionsEnabled(bool),
    Feedback(Feedback),
    /// Whether the "next question" control is offered.
    NextAvailable(bool),
    StatsLoading,
    Stats(Vec<StatRow>),
    StatsUnavailable,
    Summary { score: u32, total: u32 },
    ExamplesCleared,
    ExamplesMessage(String),
    Examples(Vec<String>),
    ExamplesError(String),
    /// The "generate examples" control enabled or disabled.
    ExamplesEnabled(bool),
}

/// Rendering capability injected into the controller.
pub trait QuizView: Send + Sync {
    fn render(&self, update: ViewUpdate);
}
