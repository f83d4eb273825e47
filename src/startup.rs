//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::services::{AuthService, AuthServiceImpl, GunService, GunServiceImpl};
use crate::config::Settings;
use crate::infrastructure::database;
use crate::infrastructure::repositories::{PgGunRepository, PgSessionRepository, PgUserRepository};
use crate::presentation::http::{handlers::health, routes};
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub auth: Arc<dyn AuthService>,
    pub guns: Arc<dyn GunService>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire the PostgreSQL repositories into the services.
    pub fn new(db: PgPool, settings: Settings) -> Self {
        let users = Arc::new(PgUserRepository::new(db.clone()));
        let sessions = Arc::new(PgSessionRepository::new(db.clone()));
        let guns = Arc::new(PgGunRepository::new(db.clone()));

        Self {
            auth: Arc::new(AuthServiceImpl::new(users, sessions, settings.jwt.clone())),
            guns: Arc::new(GunServiceImpl::new(guns)),
            settings: Arc::new(settings),
            db,
        }
    }
}

/// Full router with tracing and CORS layers applied.
pub fn build_router(state: AppState) -> Router {
    let cors = cors::create_cors_layer(&state.settings.cors);

    routes::create_router(state)
        .layer(logging::create_trace_layer())
        .layer(cors)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        // Create database pool
        let db = database::create_pool(&settings.database)
            .await
            .context("failed to connect to PostgreSQL")?;
        tracing::info!("Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&db)
                .await
                .context("failed to run database migrations")?;
            tracing::info!("Database migrations applied");
        }

        let addr = settings.server.socket_addr().context("invalid server address")?;

        let router = build_router(AppState::new(db, settings));

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until Ctrl-C or SIGTERM
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
