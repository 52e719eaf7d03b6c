use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::debug;

use crate::projection::{
    ErrorKind, Market, OddsProjection, ProjectionError, ProjectionRequest, RegulationLength,
};

/// Fallback inputs for query parameters the caller leaves out.
#[derive(Debug, Clone, Copy)]
pub struct AppState {
    pub default_odd: f64,
    pub default_minute: i32,
    pub default_stoppage: i32,
    pub default_market: Market,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            default_odd: 2.5,
            default_minute: 15,
            default_stoppage: 3,
            default_market: Market::FullTime,
        }
    }
}

/// Build the Axum router for the projection API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/markets", get(markets_handler))
        .route("/api/projection", get(projection_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketInfo {
    pub key: &'static str,
    pub label: &'static str,
    pub regulation_minutes: RegulationLength,
}

/// Query string of `GET /api/projection`.
///
/// `regulation` (45 or 90) overrides the length implied by `market`.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectionQuery {
    pub odd: Option<f64>,
    pub minute: Option<i32>,
    pub stoppage: Option<i32>,
    pub market: Option<String>,
    pub regulation: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub kind: ErrorKind,
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

fn validation_error(err: impl ToString) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError {
            error: err.to_string(),
            kind: ErrorKind::Validation,
        }),
    )
}

fn projection_error(err: ProjectionError) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiError {
            kind: err.kind(),
            error: err.to_string(),
        }),
    )
}

impl ProjectionQuery {
    fn into_request(self, defaults: &AppState) -> ApiResult<ProjectionRequest> {
        let market = match self.market.as_deref() {
            Some(label) => label.parse::<Market>().map_err(validation_error)?,
            None => defaults.default_market,
        };
        let mut req = ProjectionRequest::for_market(
            market,
            self.odd.unwrap_or(defaults.default_odd),
            self.minute.unwrap_or(defaults.default_minute),
            self.stoppage.unwrap_or(defaults.default_stoppage),
        );
        if let Some(minutes) = self.regulation {
            req.regulation = RegulationLength::try_from(minutes).map_err(projection_error)?;
            if self.market.is_none() {
                req.market = None;
            }
        }
        Ok(req)
    }
}

/// GET /health
async fn health_handler() -> &'static str {
    "ok"
}

pub fn market_catalog() -> Vec<MarketInfo> {
    Market::ALL
        .iter()
        .map(|m| MarketInfo {
            key: m.key(),
            label: m.label(),
            regulation_minutes: m.regulation(),
        })
        .collect()
}

/// GET /api/markets
async fn markets_handler() -> impl IntoResponse {
    Json(market_catalog())
}

/// GET /api/projection?odd=2.5&minute=15&stoppage=3&market=full-time
async fn projection_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ProjectionQuery>, QueryRejection>,
) -> ApiResult<Json<OddsProjection>> {
    let Query(query) = query.map_err(|rejection| validation_error(rejection.body_text()))?;
    let req = query.into_request(&state)?;
    debug!(
        "Projecting odd {} from minute {} (+{} stoppage, {})",
        req.starting_odd, req.current_minute, req.stoppage_minutes, req.regulation
    );
    OddsProjection::compute(req)
        .map(Json)
        .map_err(projection_error)
}
