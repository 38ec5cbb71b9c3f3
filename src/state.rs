// src/state.rs

/// Which part of the quiz UI is currently visible.
///
/// `LoggedOut -> ModeSelect -> Loading -> AwaitingAnswer -> Feedback -> (Loading | Summary)`,
/// `Summary -> ModeSelect` on restart, and any screen back to `LoggedOut` on logout.
/// `Failed` is the inline error shown when a question could not be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    LoggedOut,
    ModeSelect,
    Loading,
    AwaitingAnswer,
    Feedback,
    Summary,
    Failed,
}

impl Screen {
    /// True while a question prompt is on screen.
    pub fn shows_question(self) -> bool {
        matches!(self, Screen::AwaitingAnswer | Screen::Feedback)
    }

    /// Screens from which a fresh quiz may be chosen.
    pub fn can_return_to_mode_select(self) -> bool {
        matches!(self, Screen::Summary | Screen::Failed | Screen::ModeSelect)
    }
}
