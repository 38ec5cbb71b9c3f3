// src/client.rs

use async_trait::async_trait;
use reqwest::Response;
use serde::{Deserialize, de::DeserializeOwned};
use url::Url;

use crate::{
    error::ApiError,
    models::{
        answer::AnswerSubmission,
        question::{DefinitionQuestionResponse, FillBlankQuestionResponse, Question},
        stats::StatsSnapshot,
        user::{ErrorBody, LoginRequest},
    },
};

/// Remote question/answer/stats/login service.
///
/// The controller only talks to the network through this trait, so it can be
/// driven by an in-memory implementation in tests.
#[async_trait]
pub trait QuizApi: Send + Sync {
    /// `POST /api/login`. The success body is ignored.
    async fn login(&self, request: &LoginRequest) -> Result<(), ApiError>;

    /// `GET /api/question?user=<username>`.
    async fn fetch_definition_question(&self, username: &str) -> Result<Question, ApiError>;

    /// `GET /api/fill-in-the-blank-question`.
    async fn fetch_fill_blank_question(&self) -> Result<Question, ApiError>;

    /// `POST /api/answer`.
    async fn submit_answer(&self, submission: &AnswerSubmission) -> Result<(), ApiError>;

    /// `GET /api/stats?user=<username>`.
    async fn fetch_stats(&self, username: &str) -> Result<StatsSnapshot, ApiError>;

    /// `POST /api/generate-sentences`. May return an empty list; callers decide what that means.
    async fn generate_examples(&self, word: &str) -> Result<Vec<String>, ApiError>;
}

#[derive(Debug, Deserialize)]
struct ExamplesResponse {
    #[serde(default)]
    examples: Vec<String>,
}

/// `QuizApi` over HTTP+JSON with reqwest.
#[derive(Debug, Clone)]
pub struct HttpQuizApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpQuizApi {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, mut base_url: Url) -> Self {
        // Relative joins below keep any path prefix only if the base ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Transport(format!("invalid endpoint {}: {}", path, e)))
    }

    fn user_endpoint(&self, path: &str, username: &str) -> Result<Url, ApiError> {
        let mut url = self.endpoint(path)?;
        url.query_pairs_mut().append_pair("user", username);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Turns non-2xx responses into `ApiError::Application`, keeping the server's `error` text.
async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.is_empty());

    Err(ApiError::Application {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl QuizApi for HttpQuizApi {
    async fn login(&self, request: &LoginRequest) -> Result<(), ApiError> {
        let url = self.endpoint("api/login")?;
        tracing::debug!("POST {}", url);
        let response = self.client.post(url).json(request).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn fetch_definition_question(&self, username: &str) -> Result<Question, ApiError> {
        let url = self.user_endpoint("api/question", username)?;
        let raw: DefinitionQuestionResponse = self.get(url).await?;
        Question::try_from(raw)
    }

    async fn fetch_fill_blank_question(&self) -> Result<Question, ApiError> {
        let url = self.endpoint("api/fill-in-the-blank-question")?;
        let raw: FillBlankQuestionResponse = self.get(url).await?;
        Question::try_from(raw)
    }

    async fn submit_answer(&self, submission: &AnswerSubmission) -> Result<(), ApiError> {
        let url = self.endpoint("api/answer")?;
        tracing::debug!("POST {}", url);
        let response = self.client.post(url).json(submission).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn fetch_stats(&self, username: &str) -> Result<StatsSnapshot, ApiError> {
        let url = self.user_endpoint("api/stats", username)?;
        self.get(url).await
    }

    async fn generate_examples(&self, word: &str) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint("api/generate-sentences")?;
        tracing::debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({ "word": word }))
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let body: ExamplesResponse = response.json().await?;
        Ok(body.examples)
    }
}
