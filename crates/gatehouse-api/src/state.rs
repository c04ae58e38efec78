//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use gatehouse_auth::jwt::TokenCodec;
use gatehouse_auth::traits::UserDirectory;
use gatehouse_auth::password::PasswordHasher;
use gatehouse_auth::service::AuthService;
use gatehouse_core::config::AppConfig;
use gatehouse_database::repositories::blacklist::BlacklistRepository;
use gatehouse_database::repositories::user::UserRepository;
use gatehouse_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Token codec (sign + verify).
    pub codec: Arc<TokenCodec>,
    /// Password hasher (Argon2).
    pub hasher: Arc<PasswordHasher>,
    /// Login/logout/validate orchestration.
    pub auth_service: Arc<AuthService>,
    /// User management service.
    pub user_service: Arc<UserService>,
}

impl AppState {
    /// Wires repositories and services on top of a connected pool.
    pub fn new(config: AppConfig, db_pool: PgPool) -> Self {
        let config = Arc::new(config);
        let codec = Arc::new(TokenCodec::new(&config.auth));
        let hasher = Arc::new(PasswordHasher::new());

        let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
        let blacklist_repo = Arc::new(BlacklistRepository::new(db_pool.clone()));

        let auth_service = Arc::new(AuthService::new(
            user_repo.clone() as Arc<dyn UserDirectory>,
            blacklist_repo,
            Arc::clone(&hasher),
            Arc::clone(&codec),
        ));
        let user_service = Arc::new(UserService::new(
            user_repo,
            Arc::clone(&hasher),
            config.auth.clone(),
        ));

        Self {
            config,
            db_pool,
            codec,
            hasher,
            auth_service,
            user_service,
        }
    }
}
