pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;
pub mod types;

use axum::{
    extract::State,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        // Protected
        .merge(protected_routes(state.clone()))
        .layer(TraceLayer::new_for_http());

    let router = if state.config.security.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    use handlers::public::{auth, getters};

    Router::new()
        .route("/auth/token", post(auth::token_post))
        .route("/getters/realEstate", get(getters::real_estate_list))
        .route("/getters/realEstate/:id", get(getters::real_estate_get))
        .route("/getters/demographic", get(getters::demographic_list))
        .route("/getters/demographic/:location", get(getters::demographic_get))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::{admin, auth, friend};

    Router::new()
        .route("/auth/me", get(auth::me))
        // Admin-gated mutations
        .route("/admin/realEstate", post(admin::real_estate::post))
        .route(
            "/admin/realEstate/:id",
            put(admin::real_estate::put).delete(admin::real_estate::delete),
        )
        .route("/admin/demographic", post(admin::demographic::post))
        .route(
            "/admin/demographic/:location",
            put(admin::demographic::put).delete(admin::demographic::delete),
        )
        // Electricity service proxy
        .route("/friend/getListrikRealEstate", get(friend::usage_get))
        .route("/friend/post/dataListrik-realEstate", post(friend::reading_post))
        .route("/friend/put/dataListrik-realEstate", put(friend::reading_put))
        .route(
            "/friend/delete/dataListrik-realEstate/:username",
            axum::routing::delete(friend::reading_delete),
        )
        .route_layer(from_fn_with_state(state, middleware::require_auth))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Real Estate API",
        "version": version,
        "endpoints": {
            "auth": "/auth/token (public), /auth/me (token)",
            "getters": "/getters/realEstate[/:id], /getters/demographic[/:location] (public)",
            "admin": "/admin/realEstate[/:id], /admin/demographic[/:location] (admin token)",
            "friend": "/friend/* (token with electricity service credential)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "realEstate": state.real_estate.count().await,
        "demographicData": state.demographic.count().await,
        "users": state.users.len(),
    }))
}
