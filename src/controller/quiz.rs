// src/controller/quiz.rs

use super::QuizController;
use crate::{
    error::{ApiError, QuizError},
    models::{
        answer::{AnswerOutcome, AnswerSubmission, Feedback},
        question::Question,
        session::QuizMode,
    },
    state::Screen,
    view::ViewUpdate,
};

/// How the player picked an answer.
enum Choice<'a> {
    Text(&'a str),
    Numbered(usize),
}

/// User-facing text for a failed question fetch.
fn fetch_failure_message(mode: QuizMode, err: &ApiError) -> String {
    match (mode, err) {
        (_, ApiError::Transport(_)) => "Failed to connect to the server.".to_string(),
        (_, ApiError::Data(_)) => "Received invalid question data from the server.".to_string(),
        (QuizMode::GuessDefinition, ApiError::Application { .. }) => {
            "Failed to fetch question.".to_string()
        }
        (QuizMode::FillInBlank, ApiError::Application { status, .. }) => {
            format!("Network response was not ok, status: {}", status)
        }
    }
}

impl QuizController {
    /// Starts a fresh quiz in `mode` from the mode selection screen.
    ///
    /// Fetches the first question and refreshes stats concurrently; the
    /// returned result is the question fetch's. A stats failure never affects it.
    pub async fn start_quiz(&self, mode: QuizMode) -> Result<Question, QuizError> {
        {
            let mut st = self.lock();
            if st.session.username.is_none() {
                return Err(QuizError::NotLoggedIn);
            }
            if st.screen != Screen::ModeSelect {
                return Err(QuizError::InvalidState {
                    action: "start a quiz",
                    screen: st.screen,
                });
            }
            st.begin_epoch();
            st.session.reset_counters();
            st.mode = Some(mode);
            st.question = None;
            st.screen = Screen::Loading;
            tracing::info!(
                "Starting {} quiz for {}",
                mode,
                st.session.username.as_deref().unwrap_or_default()
            );

            self.render(ViewUpdate::Screen(Screen::Loading));
            self.render(ViewUpdate::ExamplesEnabled(true));
        }

        let (question, _stats) = tokio::join!(self.fetch_question(), self.refresh_stats());
        question
    }

    /// Requests the next question for the current mode. Valid only on `Loading`.
    ///
    /// A failure moves to the inline error screen; there is no retry, the user
    /// has to go back and start a new quiz.
    pub async fn fetch_question(&self) -> Result<Question, QuizError> {
        let (epoch, mode, username) = {
            let mut st = self.lock();
            if st.screen != Screen::Loading || st.question_pending {
                return Err(QuizError::InvalidState {
                    action: "fetch a question",
                    screen: st.screen,
                });
            }
            let Some(mode) = st.mode else {
                return Err(QuizError::InvalidState {
                    action: "fetch a question",
                    screen: st.screen,
                });
            };
            let username = st.session.username.clone().ok_or(QuizError::NotLoggedIn)?;
            st.question_pending = true;

            self.render(ViewUpdate::NextAvailable(false));
            self.render(ViewUpdate::ExamplesCleared);
            self.render(ViewUpdate::Loading {
                number: st.session.next_round(),
                total: st.session.quiz_length,
            });
            (st.epoch, mode, username)
        };

        let result = match mode {
            QuizMode::GuessDefinition => self.api().fetch_definition_question(&username).await,
            QuizMode::FillInBlank => self.api().fetch_fill_blank_question().await,
        };

        let mut st = self.lock();
        if st.epoch != epoch || st.screen != Screen::Loading {
            tracing::debug!("Discarding question response from an earlier session");
            return Err(QuizError::Stale);
        }
        st.question_pending = false;

        match result {
            Ok(question) => {
                if let Some(user_id) = question.user_id {
                    st.session.user_id = Some(user_id);
                }
                st.question = Some(question.clone());
                st.screen = Screen::AwaitingAnswer;

                self.render(ViewUpdate::Question(question.clone()));
                self.render(ViewUpdate::OptionsEnabled(true));
                self.render(ViewUpdate::Screen(Screen::AwaitingAnswer));
                Ok(question)
            }
            Err(err) => {
                tracing::error!("Failed to fetch {} question: {}", mode, err);
                st.question = None;
                st.screen = Screen::Failed;

                self.render(ViewUpdate::QuestionError(fetch_failure_message(mode, &err)));
                self.render(ViewUpdate::Screen(Screen::Failed));
                Err(err.into())
            }
        }
    }

    /// Moves from settled feedback to the next round.
    pub async fn next_question(&self) -> Result<Question, QuizError> {
        {
            let mut st = self.lock();
            if st.screen != Screen::Feedback || !st.round_settled || st.session.is_complete() {
                return Err(QuizError::InvalidState {
                    action: "load the next question",
                    screen: st.screen,
                });
            }
            st.round_settled = false;
            st.question = None;
            st.screen = Screen::Loading;
            self.render(ViewUpdate::Screen(Screen::Loading));
        }

        self.fetch_question().await
    }

    /// Answers the active question with `chosen`.
    ///
    /// The round is counted locally before anything is sent. For definition
    /// questions the answer is then reported to the server; a failed report is
    /// logged and otherwise ignored, so the local score can run ahead of the
    /// server's record. Stats are refreshed afterwards. On the last round the
    /// summary follows after the configured display delay.
    pub async fn submit_answer(&self, chosen: &str) -> Result<AnswerOutcome, QuizError> {
        self.answer(Choice::Text(chosen)).await
    }

    /// Answers with the `number`th option (1-based) of the question on screen.
    ///
    /// The option is looked up under the same lock that records the answer,
    /// so it always belongs to the question being judged.
    pub async fn choose_option(&self, number: usize) -> Result<AnswerOutcome, QuizError> {
        self.answer(Choice::Numbered(number)).await
    }

    async fn answer(&self, choice: Choice<'_>) -> Result<AnswerOutcome, QuizError> {
        let (epoch, outcome, submission) = {
            let mut guard = self.lock();
            let st = &mut *guard;
            let question = match (&st.question, st.screen) {
                (Some(question), Screen::AwaitingAnswer) => question,
                _ => {
                    return Err(QuizError::InvalidState {
                        action: "submit an answer",
                        screen: st.screen,
                    });
                }
            };

            let chosen = match choice {
                Choice::Text(text) => text.to_string(),
                Choice::Numbered(number) => {
                    match number.checked_sub(1).and_then(|i| question.options.get(i)) {
                        Some(option) => option.clone(),
                        None => return Err(QuizError::NoSuchOption(number)),
                    }
                }
            };

            let correct = question.is_correct(&chosen);
            st.session.record_answer(correct);
            st.screen = Screen::Feedback;
            st.round_settled = false;

            let submission = match (st.mode, st.session.user_id, question.id) {
                (Some(QuizMode::GuessDefinition), Some(user_id), Some(word_id)) => {
                    Some(AnswerSubmission {
                        user_id,
                        word_id,
                        answer: chosen,
                    })
                }
                _ => None,
            };

            let feedback = Feedback {
                correct,
                correct_answer: question.correct_answer.clone(),
            };
            let outcome = AnswerOutcome {
                feedback: feedback.clone(),
                score: st.session.score,
                questions_answered: st.session.questions_answered,
                finished: st.session.is_complete(),
            };

            self.render(ViewUpdate::OptionsEnabled(false));
            self.render(ViewUpdate::Feedback(feedback));
            self.render(ViewUpdate::Screen(Screen::Feedback));
            (st.epoch, outcome, submission)
        };

        if let Some(submission) = submission {
            if let Err(err) = self.api().submit_answer(&submission).await {
                tracing::warn!(
                    "Answer for word {:?} was not recorded, local score kept: {}",
                    submission.word_id,
                    err
                );
            }
        }

        match self.refresh_stats_for(epoch).await {
            Ok(_) => {}
            Err(QuizError::Stale) => {
                tracing::debug!("Session ended while the answer was being recorded");
                return Err(QuizError::Stale);
            }
            Err(err) => tracing::debug!("Stats refresh after answer failed: {}", err),
        }

        if !outcome.finished {
            let mut st = self.lock();
            if st.epoch == epoch && st.screen == Screen::Feedback {
                st.round_settled = true;
                self.render(ViewUpdate::NextAvailable(true));
            }
            return Ok(outcome);
        }

        tokio::time::sleep(self.inner.options.summary_delay).await;
        self.show_summary(epoch);
        Ok(outcome)
    }

    fn show_summary(&self, epoch: u64) {
        let mut st = self.lock();
        if st.epoch != epoch || st.screen != Screen::Feedback || !st.session.is_complete() {
            tracing::debug!("Skipping summary for an earlier session");
            return;
        }
        st.question = None;
        st.round_settled = true;
        st.screen = Screen::Summary;
        tracing::info!(
            "Quiz finished: {} out of {}",
            st.session.score,
            st.session.quiz_length
        );

        self.render(ViewUpdate::Summary {
            score: st.session.score,
            total: st.session.quiz_length,
        });
        self.render(ViewUpdate::Screen(Screen::Summary));
    }

    /// Leaves the summary (or a failed fetch) for mode selection.
    pub fn new_quiz(&self) -> Result<(), QuizError> {
        let mut st = self.lock();
        if st.session.username.is_none() {
            return Err(QuizError::NotLoggedIn);
        }
        if !st.screen.can_return_to_mode_select() {
            return Err(QuizError::InvalidState {
                action: "start a new quiz",
                screen: st.screen,
            });
        }
        st.question = None;
        st.screen = Screen::ModeSelect;
        self.render(ViewUpdate::Screen(Screen::ModeSelect));
        Ok(())
    }
}
