// src/controller/mod.rs

//! Quiz session controller.
//!
//! Owns the session counters and the current screen, talks to the quiz API
//! through [`QuizApi`] and reports every visible change through [`QuizView`].
//! All methods take `&self`: the controller is a cheap `Clone` handle so that
//! independent async chains (question fetch, stats refresh, logout) can
//! interleave. The state lock is never held across an `.await`.

mod auth;
mod examples;
mod quiz;
mod stats;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};

use crate::{
    client::QuizApi,
    config::{Config, DEFAULT_SUMMARY_DELAY_MS},
    models::{
        question::Question,
        session::{QuizMode, Session},
        stats::{StatsLayout, StatsSnapshot},
    },
    state::Screen,
    view::{QuizView, ViewUpdate},
};

/// Tunables taken from `Config`.
#[derive(Debug, Clone, Copy)]
pub struct ControllerOptions {
    pub summary_delay: Duration,
    pub stats_layout: StatsLayout,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            summary_delay: Duration::from_millis(DEFAULT_SUMMARY_DELAY_MS),
            stats_layout: StatsLayout::default(),
        }
    }
}

impl From<&Config> for ControllerOptions {
    fn from(config: &Config) -> Self {
        Self {
            summary_delay: config.summary_delay,
            stats_layout: config.stats_layout,
        }
    }
}

#[derive(Debug, Default)]
struct ControllerState {
    screen: Screen,
    session: Session,
    mode: Option<QuizMode>,
    question: Option<Question>,
    stats: Option<StatsSnapshot>,
    /// Bumped whenever results of earlier requests must no longer apply.
    epoch: u64,
    question_pending: bool,
    /// Set once the answered round's submission and stats refresh have resolved.
    round_settled: bool,
    examples_pending: bool,
}

impl ControllerState {
    /// Invalidates every outstanding request.
    fn begin_epoch(&mut self) -> u64 {
        self.epoch = self.epoch.wrapping_add(1);
        self.question_pending = false;
        self.examples_pending = false;
        self.round_settled = false;
        self.epoch
    }
}

struct Inner {
    api: Arc<dyn QuizApi>,
    view: Arc<dyn QuizView>,
    options: ControllerOptions,
    state: Mutex<ControllerState>,
}

/// Drives one user through login, quiz rounds, stats and the summary.
///
/// Views must not call back into the controller from `render`; updates are
/// emitted while the state lock is held so the view never sees them out of order.
#[derive(Clone)]
pub struct QuizController {
    inner: Arc<Inner>,
}

impl QuizController {
    pub fn new(api: Arc<dyn QuizApi>, view: Arc<dyn QuizView>, options: ControllerOptions) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                view,
                options,
                state: Mutex::new(ControllerState::default()),
            }),
        }
    }

    pub fn screen(&self) -> Screen {
        self.inner.state.lock().screen
    }

    /// Snapshot of the session counters.
    pub fn session(&self) -> Session {
        self.inner.state.lock().session.clone()
    }

    pub fn mode(&self) -> Option<QuizMode> {
        self.inner.state.lock().mode
    }

    /// The question currently on screen, if any.
    pub fn current_question(&self) -> Option<Question> {
        self.inner.state.lock().question.clone()
    }

    /// Last stats snapshot received for this session.
    pub fn stats(&self) -> Option<StatsSnapshot> {
        self.inner.state.lock().stats.clone()
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.inner.state.lock()
    }

    fn render(&self, update: ViewUpdate) {
        self.inner.view.render(update);
    }

    fn api(&self) -> &dyn QuizApi {
        self.inner.api.as_ref()
    }
}
