mod config;
mod db;
mod error;
mod handlers;
mod models;
mod services;


use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::Config,
    db::{QuestionStore, UserStore},
    handlers::AppState,
    services::{CompanionProbe, HttpProbe, probe_service::StaticProbe},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quiz_bank_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let probe: Arc<dyn CompanionProbe> = if config.companion_url.is_empty() {
        tracing::info!("No companion UI configured");
        Arc::new(StaticProbe::new("", false))
    } else {
        Arc::new(HttpProbe::new(&config.companion_url, config.probe_timeout())?)
    };

    let state = Arc::new(AppState {
        questions: QuestionStore::new(&config.questions_path),
        users: UserStore::new(&config.users_path),
        probe,
        companion_link: config.companion_link_url.clone(),
    });
    tracing::info!("Serving questions from {}", state.questions.path().display());

    let app = handlers::router(state);

    let listener = tokio::net::TcpListener::bind(config.server_addr()).await?;
    tracing::info!("Quiz bank server listening on {}", config.server_addr());
    axum::serve(listener, app).await?;

    Ok(())
}
