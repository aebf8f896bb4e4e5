use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use chrono::Utc;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Method};
use quotelift_core::{NewQuote, Quote, QuoteId};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::db::{Database, LibSqlQuoteRepository, QuoteRepository};
use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    db: Arc<Database>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, db: Database) -> Self {
        Self {
            config,
            db: Arc::new(db),
        }
    }

    fn quotes(&self) -> LibSqlQuoteRepository<'_> {
        LibSqlQuoteRepository::new(self.db.connection())
    }
}

pub fn app_router(state: AppState) -> Router {
    let saved_routes = Router::new()
        .route("/saved", get(list_saved).post(create_saved))
        .route("/saved/{id}", delete(delete_saved))
        .route("/saved/{id}/pin", put(toggle_pin));

    let cors = CorsLayer::new()
        .allow_origin(allowed_origin(&state.config))
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE]);

    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api/quotes", saved_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn allowed_origin(config: &AppConfig) -> AllowOrigin {
    match config.cors_origin.as_deref() {
        Some(origin) => AllowOrigin::list(origin.parse::<HeaderValue>().ok()),
        None => AllowOrigin::any(),
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: i64,
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().timestamp(),
    })
}

async fn list_saved(State(state): State<AppState>) -> Result<Json<Vec<Quote>>, AppError> {
    Ok(Json(state.quotes().list().await?))
}

async fn create_saved(
    State(state): State<AppState>,
    Json(candidate): Json<NewQuote>,
) -> Result<(StatusCode, Json<Quote>), AppError> {
    candidate.validate()?;
    let quote = state.quotes().create(&candidate).await?;
    tracing::info!(id = %quote.id, author = %quote.author, "Saved quote");
    Ok((StatusCode::CREATED, Json(quote)))
}

async fn delete_saved(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = QuoteId::from(id);
    if !state.quotes().delete(&id).await? {
        tracing::debug!(%id, "Delete of unknown quote ignored");
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn toggle_pin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Quote>, AppError> {
    let quote = state.quotes().toggle_pin(&QuoteId::from(id)).await?;
    Ok(Json(quote))
}
