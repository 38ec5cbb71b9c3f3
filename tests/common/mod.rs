// tests/common/mod.rs

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;
use vocab_quiz::{
    client::QuizApi,
    controller::{ControllerOptions, QuizController},
    error::ApiError,
    models::{
        answer::AnswerSubmission,
        question::{Prompt, Question, WordId},
        stats::{StatsLayout, StatsSnapshot},
        user::{LoginRequest, UserId},
    },
    view::{QuizView, ViewUpdate},
};

/// Scripted in-memory quiz API.
///
/// Unscripted calls succeed: login is accepted, questions default to
/// `ephemeral`, stats are empty, examples are a single sentence.
#[derive(Default)]
pub struct FakeApi {
    pub login_result: Mutex<Option<ApiError>>,
    pub questions: Mutex<VecDeque<Result<Question, ApiError>>>,
    pub stats_result: Mutex<Option<Result<StatsSnapshot, ApiError>>>,
    pub examples_result: Mutex<Option<Result<Vec<String>, ApiError>>>,
    pub submit_error: Mutex<Option<ApiError>>,
    pub submissions: Mutex<Vec<AnswerSubmission>>,
    pub logins: Mutex<Vec<LoginRequest>>,
    calls: Mutex<Vec<&'static str>>,
    gates: Mutex<HashMap<&'static str, Arc<Notify>>>,
}

impl FakeApi {
    pub fn push_question(&self, question: Question) {
        self.questions.lock().push_back(Ok(question));
    }

    pub fn push_question_error(&self, err: ApiError) {
        self.questions.lock().push_back(Err(err));
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls.lock().iter().filter(|c| **c == name).count()
    }

    /// Makes calls to `name` block until the returned `Notify` is signalled.
    pub fn hold(&self, name: &'static str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates.lock().insert(name, notify.clone());
        notify
    }

    /// Yields until `name` has been called at least `count` times.
    pub async fn wait_for_call(&self, name: &str, count: usize) {
        while self.call_count(name) < count {
            tokio::task::yield_now().await;
        }
    }

    async fn enter(&self, name: &'static str) {
        self.calls.lock().push(name);
        let gate = self.gates.lock().get(name).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl QuizApi for FakeApi {
    async fn login(&self, request: &LoginRequest) -> Result<(), ApiError> {
        self.logins.lock().push(request.clone());
        self.enter("login").await;
        match self.login_result.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn fetch_definition_question(&self, _username: &str) -> Result<Question, ApiError> {
        self.enter("fetch_definition_question").await;
        self.questions
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(sample_question()))
    }

    async fn fetch_fill_blank_question(&self) -> Result<Question, ApiError> {
        self.enter("fetch_fill_blank_question").await;
        self.questions
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(sentence_question("A ____ visit.", &["brief", "long"], "brief")))
    }

    async fn submit_answer(&self, submission: &AnswerSubmission) -> Result<(), ApiError> {
        self.submissions.lock().push(submission.clone());
        self.enter("submit_answer").await;
        match self.submit_error.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn fetch_stats(&self, _username: &str) -> Result<StatsSnapshot, ApiError> {
        self.enter("fetch_stats").await;
        self.stats_result
            .lock()
            .clone()
            .unwrap_or_else(|| Ok(StatsSnapshot::default()))
    }

    async fn generate_examples(&self, word: &str) -> Result<Vec<String>, ApiError> {
        self.enter("generate_examples").await;
        self.examples_result
            .lock()
            .clone()
            .unwrap_or_else(|| Ok(vec![format!("Fame is {}.", word)]))
    }
}

/// Remembers every update it was asked to render.
#[derive(Default)]
pub struct RecordingView {
    updates: Mutex<Vec<ViewUpdate>>,
}

impl RecordingView {
    pub fn updates(&self) -> Vec<ViewUpdate> {
        self.updates.lock().clone()
    }

    pub fn saw(&self, update: &ViewUpdate) -> bool {
        self.updates.lock().iter().any(|u| u == update)
    }

    pub fn last_stats(&self) -> Option<ViewUpdate> {
        self.updates
            .lock()
            .iter()
            .rev()
            .find(|u| matches!(u, ViewUpdate::Stats(_) | ViewUpdate::StatsUnavailable))
            .cloned()
    }

    pub fn clear(&self) {
        self.updates.lock().clear();
    }
}

impl QuizView for RecordingView {
    fn render(&self, update: ViewUpdate) {
        self.updates.lock().push(update);
    }
}

pub fn word_question(id: i64, word: &str, options: &[&str], correct: &str) -> Question {
    Question {
        id: Some(WordId(id)),
        user_id: Some(UserId(1)),
        prompt: Prompt::Word(word.to_string()),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer: correct.to_string(),
        reason: None,
    }
}

pub fn sentence_question(sentence: &str, options: &[&str], correct: &str) -> Question {
    Question {
        id: None,
        user_id: None,
        prompt: Prompt::Sentence(sentence.to_string()),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer: correct.to_string(),
        reason: None,
    }
}

pub fn sample_question() -> Question {
    word_question(42, "ephemeral", &["brief", "long", "loud", "soft"], "brief")
}

pub fn options(layout: StatsLayout) -> ControllerOptions {
    ControllerOptions {
        summary_delay: Duration::ZERO,
        stats_layout: layout,
    }
}

pub fn setup() -> (Arc<FakeApi>, Arc<RecordingView>, QuizController) {
    let api = Arc::new(FakeApi::default());
    let view = Arc::new(RecordingView::default());
    let controller = QuizController::new(api.clone(), view.clone(), options(StatsLayout::Sparse));
    (api, view, controller)
}

/// Controller already logged in as `alice`, sitting on mode selection.
pub async fn logged_in() -> (Arc<FakeApi>, Arc<RecordingView>, QuizController) {
    let (api, view, controller) = setup();
    controller
        .login("alice", vocab_quiz::models::user::AuthMode::Login)
        .await
        .expect("login should succeed");
    (api, view, controller)
}
