use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::transactions::create_transaction;
use super::handlers::transactions::delete_transaction;
use super::handlers::transactions::get_transaction;
use super::handlers::transactions::list_transactions;
use super::handlers::transactions::list_transactions_by_category;
use super::middleware::access_gate;
use crate::domain::transaction::ports::TransactionServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub transaction_service: Arc<dyn TransactionServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    transaction_service: Arc<dyn TransactionServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        user_service,
        transaction_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/user", post(register))
        .route("/login", post(login));

    let protected_routes = Router::new()
        .route("/transaction", get(list_transactions))
        .route(
            "/transaction/:category",
            get(list_transactions_by_category).post(create_transaction),
        )
        .route(
            "/transaction/:category/:id",
            get(get_transaction).delete(delete_transaction),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), access_gate));

    // Headers are left out of the span; they carry the session cookie.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
