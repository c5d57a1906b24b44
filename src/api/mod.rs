mod error;
mod handlers;

use std::time::Instant;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::ApiError;

use crate::store::Catalog;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            started_at: Instant::now(),
        }
    }
}

/// Router with permissive CORS, as used for local runs and tests.
pub fn create_router(catalog: Catalog) -> Router {
    create_router_with_cors(catalog, CorsLayer::permissive())
}

pub fn create_router_with_cors(catalog: Catalog, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Rockets
        .route("/rockets", get(handlers::list_rockets))
        .route("/rockets", post(handlers::create_rocket))
        .route("/rockets/{id}", get(handlers::get_rocket))
        .route("/rockets/{id}", put(handlers::update_rocket))
        .route("/rockets/{id}", delete(handlers::delete_rocket))
        // Launches
        .route("/launches", get(handlers::list_launches))
        .route("/launches", post(handlers::create_launch))
        .route("/launches/{id}", get(handlers::get_launch))
        .route("/launches/{id}", put(handlers::update_launch))
        .route("/launches/{id}", delete(handlers::delete_launch))
        // Customers
        .route("/customers", get(handlers::list_customers))
        .route("/customers", post(handlers::create_customer))
        .route("/customers/{email}", get(handlers::get_customer))
        .route("/customers/{email}", put(handlers::update_customer))
        .route("/customers/{email}", delete(handlers::delete_customer))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(AppState::new(catalog))
}
