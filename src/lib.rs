// src/lib.rs

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod models;
pub mod state;
pub mod terminal;
pub mod utils;
pub mod view;

pub use client::{HttpQuizApi, QuizApi};
pub use controller::{ControllerOptions, QuizController};
