//! HTTP server for the task API
//!
//! Builds the axum router over any [`TaskStore`] and serves it with optional
//! graceful shutdown.

use axum::{middleware, routing::get, Router};
use std::{future::Future, net::SocketAddr, sync::Arc};
use task_core::TaskStore;
use tokio::net::TcpListener;
use tracing::info;

use crate::{handler, request_logger::request_logging_middleware};

/// Shared server state for handlers
pub struct AppState<S> {
    pub store: Arc<S>,
}

/// Task API server
pub struct TaskServer<S> {
    store: Arc<S>,
}

impl<S: TaskStore> TaskServer<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Router with every task route and `/health`
    pub fn router(&self) -> Router {
        create_router(self.store.clone())
    }

    /// Bind `addr` and serve until the process is stopped
    pub async fn serve(self, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.serve_with_shutdown(addr, std::future::pending()).await
    }

    /// Bind `addr` and serve until `signal` resolves, then drain in-flight requests
    pub async fn serve_with_shutdown<F>(
        self,
        addr: &str,
        signal: F,
    ) -> Result<(), Box<dyn std::error::Error>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| format!("Invalid address '{addr}': {e}"))?;

        let listener = TcpListener::bind(socket_addr).await?;
        self.serve_listener(listener, signal).await?;
        Ok(())
    }

    /// Serve on an already bound listener until `signal` resolves
    pub async fn serve_listener<F>(self, listener: TcpListener, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!("Starting task API on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(signal)
            .await?;

        info!("Task API stopped");
        Ok(())
    }
}

/// Create the router with all endpoints
pub fn create_router<S: TaskStore>(store: Arc<S>) -> Router {
    let state = Arc::new(AppState { store });

    Router::new()
        .route(
            "/tasks",
            get(handler::list_tasks::<S>).post(handler::create_task::<S>),
        )
        .route(
            "/tasks/:task_id",
            get(handler::get_task::<S>)
                .put(handler::update_task::<S>)
                .delete(handler::delete_task::<S>),
        )
        .route("/health", get(handler::health::<S>))
        .layer(middleware::from_fn(request_logging_middleware))
        .with_state(state)
}
