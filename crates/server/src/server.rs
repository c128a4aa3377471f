use axum::{
    Router,
    routing::{get, post, put},
};

use std::sync::Arc;

use crate::{expenses, groups, payment_methods, tags, users};
use store::Store;

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<Store>,
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/{id}",
            get(users::get).put(users::update).delete(users::remove),
        )
        .route(
            "/payment-methods",
            get(payment_methods::list).post(payment_methods::create),
        )
        .route(
            "/payment-methods/{id}",
            get(payment_methods::get)
                .put(payment_methods::update)
                .delete(payment_methods::remove),
        )
        .route("/tags", get(tags::list).post(tags::create))
        .route(
            "/tags/{id}",
            get(tags::get).put(tags::update).delete(tags::remove),
        )
        .route("/groups", get(groups::list).post(groups::create))
        .route(
            "/groups/{id}",
            get(groups::get).put(groups::update).delete(groups::remove),
        )
        .route("/groups/{id}/expenses", get(expenses::list_for_group))
        .route("/expenses", post(expenses::create))
        .route(
            "/expenses/{id}",
            get(expenses::get)
                .put(expenses::update)
                .delete(expenses::remove),
        )
        .route("/expenses/{id}/tags", put(expenses::replace_tags))
        .with_state(state)
}

/// Build the application router backed by `store`.
pub fn app(store: Store) -> Router {
    let state = ServerState {
        store: Arc::new(store),
    };

    router(state)
}

pub async fn run(store: Store) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(store, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    store: Store,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(store)).await
}

pub fn spawn_with_listener(
    store: Store,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(store, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
