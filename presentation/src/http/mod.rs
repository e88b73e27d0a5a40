//! HTTP surface
//!
//! | Route | Handler |
//! |-------|---------|
//! | `POST /api/query` | full query pipeline |
//! | `POST /api/economic-indicator` | direct indicator lookup |
//! | `POST /api/ocr` | text extraction from an uploaded image |
//! | `GET /api/tools` | tool declarations |
//! | `GET /health` | liveness |

pub mod dto;
pub mod error;
pub mod handlers;
pub mod state;

pub use error::{ApiError, ApiErrorBody};
pub use state::AppState;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use finquery_application::use_cases::extract_text::MAX_IMAGE_BYTES;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Largest accepted request body: one image plus multipart framing.
pub const MAX_BODY_BYTES: usize = MAX_IMAGE_BYTES + 64 * 1024;

/// Build the application router.
///
/// An empty `cors_origins` list allows any origin.
pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/query", post(handlers::answer_query))
        .route("/economic-indicator", post(handlers::economic_indicator))
        .route("/ocr", post(handlers::extract_text))
        .route("/tools", get(handlers::list_tools));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    info!("CORS restricted to {} origin(s)", allowed.len());
    layer.allow_origin(AllowOrigin::list(allowed))
}

/// Bind and serve until the process is stopped.
pub async fn serve(address: &str, app: Router) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(address).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await
}
