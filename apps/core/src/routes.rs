use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, RawQuery, Request, State},
    http::{header::CONTENT_TYPE, Method},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info, warn};
use validator::Validate;

use crate::assistant::ChatContext;
use crate::error::AppError;
use crate::logging::SERVICE_NAME;
use crate::models::{
    ChatReply, ChatRequest, HealthStatus, MentorQuery, MentorRecommendations,
    RecommendationsResponse,
};
use crate::rate_limiter::{retry_after_secs, Decision};
use crate::recommend::{parse_skills, resolve};
use crate::state::AppState;

const SKILLS_PARAM: &str = "skills_to_learn";

/// Idle clients are swept once the limiter tracks more than this many
const PRUNE_THRESHOLD: usize = 1024;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let api = Router::new()
        .route("/api/recommendations", get(recommendations_handler))
        .route("/api/recommendations/", get(recommendations_handler))
        .route("/api/chat", post(chat_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit));

    Router::new()
        .route("/recommend", post(mentors_handler))
        .route("/health", get(health_handler))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// First `skills_to_learn` value of a raw query string, form-decoded.
fn skills_param(query: &str) -> String {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == SKILLS_PARAM)
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}

/// Never fails: a missing query or unavailable catalog yields `{"videos": []}`.
pub async fn recommendations_handler(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Json<RecommendationsResponse> {
    let raw_skills = query.as_deref().map(skills_param).unwrap_or_default();

    if parse_skills(&raw_skills).is_empty() {
        debug!("No skills requested, skipping catalog fetch");
        return Json(RecommendationsResponse::default());
    }

    let catalog = state.catalog.fetch_catalog().await;
    let videos = resolve(&raw_skills, &catalog);
    info!(skills = %raw_skills, count = videos.len(), "Recommendations served");

    Json(RecommendationsResponse { videos })
}

pub async fn chat_handler(
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    request.validate()?;

    let context = ChatContext::from_hint(request.role.as_deref());
    let result = request.persona.respond(&request.message, &context);
    info!(persona = %request.persona, rule = %result.source, "Chat reply selected");

    Ok(Json(ChatReply {
        reply: result.reply,
        persona: request.persona,
        rule: result.source.label().to_string(),
    }))
}

pub async fn mentors_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MentorQuery>, JsonRejection>,
) -> Result<Json<MentorRecommendations>, AppError> {
    let Json(query) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    query.validate()?;

    Ok(Json(state.mentors.recommend_for(&query)))
}

pub async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

/// Per-IP sliding window over the `/api` routes.
pub async fn rate_limit(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let decision = {
        let mut limiter = state
            .limiter
            .lock()
            .map_err(|_| AppError::Internal("rate limiter lock poisoned".to_string()))?;
        let now = Instant::now();
        let decision = limiter.check_at(&client, now);
        if limiter.tracked_clients() > PRUNE_THRESHOLD {
            let dropped = limiter.prune_idle(now);
            debug!(dropped, "Pruned idle rate limit entries");
        }
        decision
    };

    match decision {
        Decision::Allowed { .. } => Ok(next.run(request).await),
        Decision::Limited { retry_after } => {
            warn!(%client, path = %request.uri().path(), "Rate limit exceeded");
            Err(AppError::RateLimited {
                retry_after_secs: retry_after_secs(retry_after),
            })
        }
    }
}
