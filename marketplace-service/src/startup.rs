use crate::config::MarketplaceConfig;
use crate::handlers;
use crate::services::MongoDb;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use service_core::error::AppError;
use std::future::IntoFuture;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: MarketplaceConfig,
    pub db: MongoDb,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
    state: AppState,
}

impl Application {
    pub async fn build(config: MarketplaceConfig) -> Result<Self, AppError> {
        let db = MongoDb::connect(&config.mongodb.uri, &config.mongodb.database)
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to MongoDB: {}", e);
                e
            })?;
        db.initialize_indexes().await.map_err(|e| {
            tracing::error!("Failed to initialize database indexes: {}", e);
            e
        })?;

        let state = AppState {
            config: config.clone(),
            db: db.clone(),
        };

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route("/ready", get(handlers::readiness_check))
            .route(
                "/users",
                post(handlers::register_user).get(handlers::list_users),
            )
            .route(
                "/users/:id",
                get(handlers::get_user)
                    .put(handlers::update_user)
                    .delete(handlers::delete_user),
            )
            .route("/users/:id/roles", put(handlers::update_user_roles))
            .route(
                "/stores",
                post(handlers::create_store).get(handlers::list_stores),
            )
            .route(
                "/stores/me",
                get(handlers::get_my_store)
                    .put(handlers::update_my_store)
                    .delete(handlers::delete_my_store),
            )
            .route("/admin/stores/:id/verify", post(handlers::verify_store))
            .route("/admin/stores/:id/reject", post(handlers::reject_store))
            .route("/admin/stores/:id/suspend", post(handlers::suspend_store))
            .route("/admin/stores/:id/block", post(handlers::block_store))
            .route("/products", post(handlers::create_product))
            .route("/products/:id", delete(handlers::delete_product))
            .route(
                "/categories",
                post(handlers::create_category).get(handlers::list_categories),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            state,
        })
    }

    pub fn db(&self) -> &MongoDb {
        &self.state.db
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
