use axum::{
    Router,
    body::Body,
    extract::Path,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use reading_roadmap::config::Config;
use reading_roadmap::embedded::WebAssets;
use reading_roadmap::services::{GeminiClient, RoadmapServiceImpl};
use reading_roadmap::{AppState, build_router, handlers, models};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::roadmap::generate_roadmap,
        handlers::system::get_status,
    ),
    components(
        schemas(
            models::SearchRequest,
            models::SearchMode,
            models::RoadmapData,
            models::UserBookAnalysis,
            models::LevelNode,
            models::BookRecommendation,
            models::DifficultyLevel,
            handlers::system::StatusResponse,
        )
    ),
    tags(
        (name = "Roadmap", description = "Learning roadmap generation"),
        (name = "System", description = "Service status"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration first
    let config = Config::load()?;

    // Initialize logging
    let log_filter = tracing_subscriber::EnvFilter::new(&config.logging.level);

    let registry = tracing_subscriber::registry().with(log_filter);

    // The guard flushes the file writer on drop, so it lives as long as main
    let _log_guard = if let Some(log_file) = &config.logging.file {
        // Ensure log directory exists
        let log_path = std::path::Path::new(log_file);
        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        // Extract directory and filename prefix from config
        let log_dir = log_path
            .parent()
            .and_then(|p| p.to_str())
            .filter(|p| !p.is_empty())
            .unwrap_or("logs");
        let file_name = log_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("reading-roadmap.log");
        // Remove .log extension if present (rolling appender adds date suffix)
        let file_prefix = file_name.strip_suffix(".log").unwrap_or(file_name);

        let file_appender = tracing_appender::rolling::daily(log_dir, file_prefix);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
            .with(tracing_subscriber::fmt::layer())
            .init();
        Some(guard)
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
        None
    };
    tracing::info!("Reading Roadmap starting up");
    tracing::info!("Configuration loaded successfully: {:?}", config.llm);

    // Initialize the model client; the API key was validated with the config
    let client = GeminiClient::new(config.llm.settings())?;
    let roadmap_service = Arc::new(RoadmapServiceImpl::new(client));
    tracing::info!("Roadmap service initialized with model {}", config.llm.model);

    let app_state = Arc::new(AppState::new(roadmap_service));

    // Static file serving from embedded assets
    let static_routes = if config.static_config.enabled {
        tracing::info!("Static file serving enabled, serving from embedded assets");
        Router::new().route("/assets/*path", get(serve_static_file))
    } else {
        Router::new()
    };

    let app = Router::new()
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(build_router(app_state))
        .merge(static_routes)
        .fallback(not_found);

    let app = app
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::cors::CorsLayer::permissive());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("API documentation available at http://{}/api-docs", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}

/// Serve a file from the embedded `web/` folder
async fn serve_static_file(Path(path): Path<String>) -> Response {
    match WebAssets::get(&path) {
        Some(file) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, get_content_type(&path))
            .header(header::CACHE_CONTROL, "public, max-age=3600")
            .body(Body::from(file.data.into_owned()))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()),
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

/// Get content type based on file extension
fn get_content_type(path: &str) -> HeaderValue {
    let ext = path.rsplit('.').next().unwrap_or("");
    let content_type = match ext {
        "html" => "text/html; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "png" => "image/png",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "woff2" => "font/woff2",
        _ => "application/octet-stream",
    };
    HeaderValue::from_static(content_type)
}
