// HTTP handlers for the Newsdesk backend

pub mod auth;
pub mod news;
pub mod profile;

use crate::{app::AppState, middleware::auth_middleware};
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

// Authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
}

// News routes; listing and single-article reads are public, mutations
// require a bearer token
pub fn news_routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(news::store))
        .route("/{id}", put(news::update))
        .route("/{id}", delete(news::destroy))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(news::index))
        .route("/{id}", get(news::show))
        .merge(protected)
}

// Profile routes, all behind the auth middleware
pub fn profile_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(profile::show))
        .route("/{id}", put(profile::update))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
}

/// Everything mounted under /api
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/profile", profile_routes(state))
        .nest("/news", news_routes(state))
}
