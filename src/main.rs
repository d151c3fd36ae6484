// src/main.rs

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use dotenvy::dotenv;
use kuis_pemula::config::Config;
use kuis_pemula::models::{
    cookie::CookieConfig,
    question::{Question, QuestionSeed},
};
use kuis_pemula::routes;
use kuis_pemula::session::SessionRegistry;
use kuis_pemula::state::AppState;
use kuis_pemula::store::{DocumentStore, PgStore, Store};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use validator::Validate;

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Initialize Database Pool with Retry
    let mut retry_count = 0;
    let pool = loop {
        match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
        {
            Ok(pool) => break pool,
            Err(e) => {
                retry_count += 1;
                if retry_count > 5 {
                    tracing::error!("Failed to connect to database after 5 retries: {}", e);
                    std::process::exit(1);
                }
                tracing::warn!("Database not ready, retrying in 2s... (Attempt {})", retry_count);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    };

    tracing::info!("Database connected...");

    tracing::info!("Running migrations...");
    if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
        tracing::error!("Failed to run database migrations: {}", e);
        std::process::exit(1);
    }
    tracing::info!("Migrations applied successfully.");

    let store: Store = Arc::new(PgStore::new(pool));

    if let Err(e) = seed_cookie_config(store.as_ref(), &config).await {
        tracing::error!("Failed to seed cookie configuration: {:?}", e);
    }
    if let Err(e) = seed_questions(store.as_ref(), &config).await {
        tracing::error!("Failed to seed questions: {:?}", e);
    }

    // The app cannot issue sessions without its cookie document.
    let cookie = match store.load_cookie_config().await {
        Ok(Some(cookie)) => cookie,
        Ok(None) => {
            tracing::error!("Cookie configuration not found!");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("Error loading cookie configuration: {}", e);
            std::process::exit(1);
        }
    };

    match store.load_all_users().await {
        Ok(users) => tracing::info!("{} registered users", users.len()),
        Err(e) => {
            tracing::error!("Error loading user credentials: {}", e);
            std::process::exit(1);
        }
    }

    let state = AppState {
        store,
        sessions: SessionRegistry::new(),
        cookie,
        config: config.clone(),
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}

/// Writes the cookie document from the environment when `COOKIE_KEY` is set
/// and the store has none yet. An existing document is never replaced.
async fn seed_cookie_config(
    store: &dyn DocumentStore,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(key) = &config.cookie_key else {
        return Ok(());
    };

    if store.load_cookie_config().await?.is_none() {
        tracing::info!("Seeding cookie configuration '{}'", config.cookie_name);
        store
            .save_cookie_config(&CookieConfig {
                name: config.cookie_name.clone(),
                key: key.clone(),
                expiry_days: config.cookie_expiry_days,
            })
            .await?;
    }
    Ok(())
}

/// Upserts the questions of `QUESTIONS_FILE`, a JSON array of
/// `{question, code?, options, answer}` objects. Invalid entries are skipped.
async fn seed_questions(
    store: &dyn DocumentStore,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = &config.questions_file else {
        return Ok(());
    };

    let raw = tokio::fs::read_to_string(path).await?;
    let seeds: Vec<QuestionSeed> = serde_json::from_str(&raw)?;

    let mut saved = 0;
    for seed in seeds {
        if let Err(e) = seed.validate() {
            tracing::warn!("Skipping question '{}': {}", seed.question, e);
            continue;
        }
        store.save_question(&Question::from(seed)).await?;
        saved += 1;
    }

    tracing::info!("Seeded {} questions from {}", saved, path);
    Ok(())
}
