// src/controller/examples.rs

use super::QuizController;
use crate::{error::QuizError, models::session::QuizMode, view::ViewUpdate};

impl QuizController {
    /// Asks the server for example sentences using the word on screen.
    ///
    /// Independent of the quiz loop: failures are shown in the examples panel
    /// only. The trigger is disabled until the request resolves, and a second
    /// call while one is pending is rejected.
    pub async fn generate_examples(&self) -> Result<Vec<String>, QuizError> {
        let (epoch, word) = {
            let mut st = self.lock();
            let word = match (&st.question, st.mode) {
                (Some(question), Some(QuizMode::GuessDefinition)) if st.screen.shows_question() => {
                    question.prompt.text().to_string()
                }
                _ => {
                    let err = QuizError::NoWordLoaded;
                    self.render(ViewUpdate::ExamplesMessage(err.user_message()));
                    return Err(err);
                }
            };
            if st.examples_pending {
                return Err(QuizError::ExamplesPending);
            }
            st.examples_pending = true;

            self.render(ViewUpdate::ExamplesMessage(
                "Generating example sentences...".to_string(),
            ));
            self.render(ViewUpdate::ExamplesEnabled(false));
            (st.epoch, word)
        };

        let result = self.api().generate_examples(&word).await;

        let mut st = self.lock();
        if st.epoch != epoch {
            return Err(QuizError::Stale);
        }
        st.examples_pending = false;
        self.render(ViewUpdate::ExamplesEnabled(true));

        let still_shown = st
            .question
            .as_ref()
            .is_some_and(|q| q.prompt.text() == word);
        if !still_shown {
            tracing::debug!("Dropping examples for {}: word no longer shown", word);
            return Err(QuizError::Stale);
        }

        let result = result.map_err(QuizError::from).and_then(|examples| {
            if examples.is_empty() {
                Err(QuizError::EmptyExamples)
            } else {
                Ok(examples)
            }
        });

        match result {
            Ok(examples) => {
                self.render(ViewUpdate::Examples(examples.clone()));
                Ok(examples)
            }
            Err(err) => {
                tracing::warn!("Error generating sentences for {}: {}", word, err);
                self.render(ViewUpdate::ExamplesError(format!("Error: {}", err.user_message())));
                Err(err)
            }
        }
    }
}
