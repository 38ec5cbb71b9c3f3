// src/error.rs

use std::fmt;

use crate::state::Screen;

/// Failure talking to the quiz API.
/// Every remote call made by the client resolves to one of these three kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request could not complete (DNS, refused connection, broken body stream).
    Transport(String),

    /// The server answered with a non-2xx status.
    /// `message` is the `error` field of the JSON body, if the server sent one.
    Application { status: u16, message: Option<String> },

    /// 2xx response whose payload failed decoding or a required-field check.
    Data(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport error: {}", msg),
            ApiError::Application {
                status,
                message: Some(msg),
            } => write!(f, "server returned {}: {}", status, msg),
            ApiError::Application {
                status,
                message: None,
            } => write!(f, "server returned {}", status),
            ApiError::Data(msg) => write!(f, "invalid response data: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Converts `reqwest::Error` into the matching `ApiError` kind.
/// Decode failures on a received body count as data errors, everything else as transport.
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Data(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Data(err.to_string())
    }
}

/// Errors surfaced by `QuizController` operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    Api(ApiError),

    /// Username rejected before any request was sent.
    InvalidUsername(String),

    /// The operation is not allowed on the current screen.
    InvalidState { action: &'static str, screen: Screen },

    NotLoggedIn,

    /// A numbered choice outside the current question's options.
    NoSuchOption(usize),

    /// Example sentences requested while no word is on screen.
    NoWordLoaded,

    /// An example-sentence request is already in flight.
    ExamplesPending,

    EmptyExamples,

    /// The session moved on while the request was outstanding; its result was dropped.
    Stale,
}

impl QuizError {
    /// Short text suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            QuizError::Api(ApiError::Transport(_)) => "Failed to connect to the server.".to_string(),
            QuizError::Api(ApiError::Application {
                message: Some(msg), ..
            }) => msg.clone(),
            QuizError::Api(ApiError::Application { message: None, .. }) => {
                "An unknown error occurred.".to_string()
            }
            QuizError::Api(ApiError::Data(_)) => {
                "Received invalid data from the server.".to_string()
            }
            QuizError::InvalidUsername(msg) => msg.clone(),
            QuizError::InvalidState { action, .. } => format!("Cannot {} right now.", action),
            QuizError::NotLoggedIn => "Please log in first.".to_string(),
            QuizError::NoSuchOption(number) => format!("There is no option {}.", number),
            QuizError::NoWordLoaded => "Please wait for a word to be loaded.".to_string(),
            QuizError::ExamplesPending => "Generating example sentences...".to_string(),
            QuizError::EmptyExamples => {
                "Received an empty list of examples from the server.".to_string()
            }
            QuizError::Stale => String::new(),
        }
    }
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::Api(err) => write!(f, "{}", err),
            QuizError::InvalidState { action, screen } => {
                write!(f, "cannot {} while on {:?}", action, screen)
            }
            QuizError::Stale => write!(f, "result discarded: session changed"),
            other => write!(f, "{}", other.user_message()),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::Api(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ApiError> for QuizError {
    fn from(err: ApiError) -> Self {
        QuizError::Api(err)
    }
}

/// Invalid configuration value read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.key, self.message)
    }
}

impl std::error::Error for ConfigError {}
