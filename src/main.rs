// src/main.rs

use std::process::ExitCode;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use vocab_quiz::{
    client::HttpQuizApi,
    config::Config,
    controller::{ControllerOptions, QuizController},
    error::QuizError,
    logging::init_tracing,
    models::user::AuthMode,
    state::Screen,
    terminal::{Command, HELP, TerminalView},
    view::{QuizView, ViewUpdate},
};

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration from environment (and .env, if present)
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = init_tracing(&config);
    tracing::info!("Using quiz API at {}", config.api_base_url);

    let api = Arc::new(HttpQuizApi::new(config.api_base_url.clone()));
    let view = Arc::new(TerminalView);
    let controller = QuizController::new(api, view.clone(), ControllerOptions::from(&config));

    view.render(ViewUpdate::Screen(Screen::LoggedOut));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read input: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(msg) => {
                println!("{}", msg);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::Logout => controller.logout(),
            Command::NewQuiz => report(controller.new_quiz()),
            // Network-bound commands run on their own task so that logout
            // and other input stay responsive while a request is outstanding.
            command => {
                let controller = controller.clone();
                tokio::spawn(async move { dispatch(&controller, command).await });
            }
        }
    }

    tracing::info!("Bye");
    ExitCode::SUCCESS
}

async fn dispatch(controller: &QuizController, command: Command) {
    let result = match command {
        Command::Login(name) => controller.login(&name, AuthMode::Login).await.map(|_| ()),
        Command::Register(name) => controller.login(&name, AuthMode::Register).await.map(|_| ()),
        Command::Start(mode) => controller.start_quiz(mode).await.map(|_| ()),
        Command::Choose(number) => controller.choose_option(number).await.map(|_| ()),
        Command::Next => controller.next_question().await.map(|_| ()),
        Command::Examples => controller.generate_examples().await.map(|_| ()),
        Command::Stats => controller.refresh_stats().await.map(|_| ()),
        Command::NewQuiz => controller.new_quiz(),
        Command::Logout => {
            controller.logout();
            Ok(())
        }
        Command::Help | Command::Quit => Ok(()),
    };
    report(result);
}

/// Prints rejections the view has not already shown.
fn report(result: Result<(), QuizError>) {
    match result {
        Ok(()) => {}
        Err(
            err @ (QuizError::InvalidState { .. }
            | QuizError::NotLoggedIn
            | QuizError::NoSuchOption(_)
            | QuizError::ExamplesPending),
        ) => println!("{}", err.user_message()),
        Err(err) => tracing::debug!("{}", err),
    }
}
