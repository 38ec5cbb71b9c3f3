// src/controller/stats.rs

use super::QuizController;
use crate::{error::QuizError, models::stats::StatsSnapshot, view::ViewUpdate};

impl QuizController {
    /// Fetches the mastery distribution and replaces the dashboard wholesale.
    ///
    /// May run alongside a question fetch; concurrent refreshes are fine since
    /// the last response simply wins. Failure only affects the dashboard.
    pub async fn refresh_stats(&self) -> Result<StatsSnapshot, QuizError> {
        let epoch = self.lock().epoch;
        self.refresh_stats_for(epoch).await
    }

    /// Refreshes stats on behalf of the session identified by `epoch`.
    /// Refuses without a request once that session has ended.
    pub(super) async fn refresh_stats_for(&self, epoch: u64) -> Result<StatsSnapshot, QuizError> {
        let username = {
            let st = self.lock();
            if st.epoch != epoch {
                return Err(QuizError::Stale);
            }
            let username = st.session.username.clone().ok_or(QuizError::NotLoggedIn)?;
            self.render(ViewUpdate::StatsLoading);
            username
        };

        let result = self.api().fetch_stats(&username).await;

        let mut st = self.lock();
        if st.epoch != epoch {
            tracing::debug!("Discarding stats for {}", username);
            return Err(QuizError::Stale);
        }

        match result {
            Ok(snapshot) => {
                let rows = self.inner.options.stats_layout.rows(&snapshot);
                st.stats = Some(snapshot.clone());
                self.render(ViewUpdate::Stats(rows));
                Ok(snapshot)
            }
            Err(err) => {
                tracing::warn!("Failed to update stats for {}: {}", username, err);
                self.render(ViewUpdate::StatsUnavailable);
                Err(err.into())
            }
        }
    }
}
