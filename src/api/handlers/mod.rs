use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use super::error::ApiError;
use super::AppState;
use crate::error::ResourceKind;
use crate::models::*;

type JsonBody<T> = Result<Json<T>, JsonRejection>;

// ============================================================
// Health
// ============================================================

pub async fn root() -> &'static str {
    "Launchpad API. Check health on /health"
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "uptimeSeconds": state.started_at.elapsed().as_secs_f64(),
    }))
}

// ============================================================
// Rockets
// ============================================================

pub async fn list_rockets(State(state): State<AppState>) -> Json<Vec<Rocket>> {
    Json(state.catalog.rockets.list())
}

pub async fn get_rocket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Rocket>, ApiError> {
    state
        .catalog
        .rockets
        .get_by_id(&id)
        .map(Json)
        .ok_or(ApiError::NotFound(ResourceKind::Rocket))
}

pub async fn create_rocket(
    State(state): State<AppState>,
    body: JsonBody<RocketInput>,
) -> Result<(StatusCode, Json<Rocket>), ApiError> {
    let Json(input) = body?;
    let rocket = state.catalog.rockets.create(input)?;
    Ok((StatusCode::CREATED, Json(rocket)))
}

pub async fn update_rocket(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody<RocketInput>,
) -> Result<Json<Rocket>, ApiError> {
    let Json(input) = body?;
    Ok(Json(state.catalog.rockets.update(&id, input)?))
}

pub async fn delete_rocket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.catalog.rockets.delete(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(ResourceKind::Rocket))
    }
}

// ============================================================
// Launches
// ============================================================

pub async fn list_launches(State(state): State<AppState>) -> Json<Vec<Launch>> {
    Json(state.catalog.launches.list())
}

pub async fn get_launch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Launch>, ApiError> {
    state
        .catalog
        .launches
        .get_by_id(&id)
        .map(Json)
        .ok_or(ApiError::NotFound(ResourceKind::Launch))
}

pub async fn create_launch(
    State(state): State<AppState>,
    body: JsonBody<LaunchInput>,
) -> Result<(StatusCode, Json<Launch>), ApiError> {
    let Json(input) = body?;
    let launch = state.catalog.launches.create(input)?;
    Ok((StatusCode::CREATED, Json(launch)))
}

pub async fn update_launch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody<LaunchInput>,
) -> Result<Json<Launch>, ApiError> {
    let Json(input) = body?;
    Ok(Json(state.catalog.launches.update(&id, input)?))
}

pub async fn delete_launch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.catalog.launches.delete(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(ResourceKind::Launch))
    }
}

// ============================================================
// Customers
// ============================================================

// `Path` percent-decodes, so `/customers/ada%40example.com` looks up
// `ada@example.com`.

pub async fn list_customers(State(state): State<AppState>) -> Json<Vec<Customer>> {
    Json(state.catalog.customers.list())
}

pub async fn get_customer(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Customer>, ApiError> {
    state
        .catalog
        .customers
        .get_by_email(&email)
        .map(Json)
        .ok_or(ApiError::NotFound(ResourceKind::Customer))
}

pub async fn create_customer(
    State(state): State<AppState>,
    body: JsonBody<CustomerInput>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let Json(input) = body?;
    let customer = state.catalog.customers.create(input)?;
    Ok((StatusCode::CREATED, Json(customer)))
}

pub async fn update_customer(
    State(state): State<AppState>,
    Path(email): Path<String>,
    body: JsonBody<CustomerInput>,
) -> Result<Json<Customer>, ApiError> {
    let Json(input) = body?;
    Ok(Json(state.catalog.customers.update(&email, input)?))
}

pub async fn delete_customer(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.catalog.customers.delete(&email) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(ResourceKind::Customer))
    }
}
