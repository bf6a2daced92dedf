//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use axum::{Router, routing::get};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use users::{CredentialService, InMemoryAccountStore, PgAccountStore, USERS_PATH, users_router};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "users_api=info,users=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let users = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await?;

            tracing::info!("Connected to database");

            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            let service = CredentialService::from_config(PgAccountStore::new(pool), &config.users)?;
            users_router(service)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, accounts are kept in memory only");
            let service =
                CredentialService::from_config(InMemoryAccountStore::new(), &config.users)?;
            users_router(service)
        }
    };

    let app = app(users);

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Mount the users router next to the liveness probe
fn app(users: Router) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest(USERS_PATH, users)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "ok"
}

async fn not_found() -> AppError {
    AppError::new(ErrorKind::NotFound, "No such route")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;
    use users::UsersConfig;

    fn test_app() -> Router {
        let config = UsersConfig {
            hashing: platform::password::HashingParams::new(8, 1, 1),
            ..UsersConfig::development()
        };
        let service = CredentialService::from_config(InMemoryAccountStore::new(), &config).unwrap();
        app(users_router(service))
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_users_routes_are_nested() {
        let response = test_app()
            .oneshot(
                Request::post("/api/v1/users/join")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"userName":"jungrak","password":"asdf1234"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_problem_json() {
        let response = test_app()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
