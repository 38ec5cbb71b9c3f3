// src/controller/auth.rs

use super::QuizController;
use crate::{
    error::QuizError,
    models::{
        session::Session,
        user::{AuthMode, LoginRequest, SessionStart},
    },
    state::Screen,
    view::ViewUpdate,
};

impl QuizController {
    /// Signs in (or registers) `username`.
    ///
    /// Stays on `LoggedOut` on any failure; the login message distinguishes a
    /// server rejection from a connection failure.
    pub async fn login(&self, username: &str, mode: AuthMode) -> Result<SessionStart, QuizError> {
        let request = LoginRequest::new(username, mode);

        let epoch = {
            let st = self.lock();
            if st.screen != Screen::LoggedOut {
                return Err(QuizError::InvalidState {
                    action: "log in",
                    screen: st.screen,
                });
            }
            if let Some(message) = request.rejection() {
                self.render(ViewUpdate::LoginMessage(message.clone()));
                return Err(QuizError::InvalidUsername(message));
            }
            self.render(ViewUpdate::LoginMessage("...".to_string()));
            st.epoch
        };

        let result = self.api().login(&request).await;

        let mut st = self.lock();
        if st.epoch != epoch || st.screen != Screen::LoggedOut {
            tracing::debug!("Discarding login response for {}", request.username);
            return Err(QuizError::Stale);
        }

        match result {
            Ok(()) => {
                st.begin_epoch();
                st.session = Session::for_user(request.username.clone());
                st.screen = Screen::ModeSelect;
                tracing::info!("User {} logged in ({:?})", request.username, mode);

                self.render(ViewUpdate::LoginMessage(String::new()));
                self.render(ViewUpdate::Welcome(format!("Welcome, {}!", request.username)));
                self.render(ViewUpdate::Screen(Screen::ModeSelect));

                Ok(SessionStart {
                    username: request.username,
                })
            }
            Err(err) => {
                tracing::warn!("Login failed for {}: {}", request.username, err);
                let err = QuizError::from(err);
                self.render(ViewUpdate::LoginMessage(err.user_message()));
                Err(err)
            }
        }
    }

    /// Clears the session and returns to `LoggedOut` from any screen.
    /// Requests still in flight complete on their own and are ignored.
    pub fn logout(&self) {
        let mut st = self.lock();
        st.begin_epoch();
        if let Some(username) = st.session.username.take() {
            tracing::info!("User {} logged out", username);
        }
        st.session = Session::default();
        st.mode = None;
        st.question = None;
        st.stats = None;
        st.screen = Screen::LoggedOut;

        self.render(ViewUpdate::LoginMessage(String::new()));
        self.render(ViewUpdate::Screen(Screen::LoggedOut));
    }
}
