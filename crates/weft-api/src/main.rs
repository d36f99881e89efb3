use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use weft_api::{
    config::Config,
    middleware::logging,
    routes::{events, health, todos},
    state::AppState,
};
use weft_core::UpdateSet;
use weft_push::PeriodicPublisher;
use weft_render::Bindings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config =
        Config::load().map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!("Starting weft demo server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    let state = AppState::new(config.clone());

    if config.publisher.enabled {
        spawn_clock_publisher(&state)?;
        tracing::info!(
            channel = %config.publisher.channel,
            interval_ms = config.publisher.interval_ms,
            "Clock publisher running"
        );
    }

    // Build router
    let app = build_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Event stream: http://{}/events", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Timer-driven push: replace the clock region on every connected
/// client at the configured interval.
fn spawn_clock_publisher(state: &AppState) -> anyhow::Result<()> {
    let updates = UpdateSet::new()
        .replace("clock")
        .with_fragment("clock :: time")?;

    let publisher = PeriodicPublisher::new(
        Arc::clone(&state.registry),
        Arc::clone(&state.envelope),
        state.config.publisher.channel.clone(),
        Duration::from_millis(state.config.publisher.interval_ms),
    );

    publisher.spawn(move || {
        let mut bindings = Bindings::new();
        bindings.insert(
            "time".to_string(),
            serde_json::json!(chrono::Utc::now().to_rfc3339()),
        );
        (updates.clone(), bindings)
    });

    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(todos::index))
        .route("/health", get(health::health_check))
        // Todos
        .route("/todos", post(todos::create))
        .route("/todos/:id/toggle", post(todos::toggle))
        .route("/todos/:id", delete(todos::remove))
        // Push channels
        .route("/events", get(events::subscribe_default))
        .route("/events/:channel", get(events::subscribe))
        .layer(middleware::from_fn(logging::log_request))
        .layer(build_cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.cors.enabled {
        let mut cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any);

        if config.cors.origins.iter().any(|o| o == "*") {
            cors = cors.allow_origin(Any);
        } else {
            for origin in &config.cors.origins {
                if let Ok(parsed_origin) = origin.parse::<axum::http::HeaderValue>() {
                    cors = cors.allow_origin(parsed_origin);
                }
            }
        }

        cors
    } else {
        CorsLayer::permissive()
    }
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
