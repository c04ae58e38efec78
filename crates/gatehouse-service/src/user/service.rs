//! User management operations — creation, lookup, listing, password rotation.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use gatehouse_auth::password::PasswordHasher;
use gatehouse_core::config::auth::AuthConfig;
use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;
use gatehouse_core::types::pagination::{PageRequest, PageResponse};
use gatehouse_database::repositories::user::UserRepository;
use gatehouse_entity::user::{CreateUser, Role, User};

use crate::context::RequestContext;

/// Data accepted for user creation, before the password is hashed.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CreateUserInput {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password to hash.
    pub password: String,
    /// Given name (optional).
    pub first_name: Option<String>,
    /// Family name (optional).
    pub last_name: Option<String>,
    /// Assigned role.
    pub role: Role,
}

/// Handles user management on top of the repository and the hasher.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Auth configuration (password policy).
    auth_config: AuthConfig,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        auth_config: AuthConfig,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            auth_config,
        }
    }

    /// Creates a new user with a freshly hashed password.
    pub async fn create(&self, input: CreateUserInput) -> AppResult<User> {
        if input.username.trim().is_empty() {
            return Err(AppError::validation("username is required"));
        }
        if !input.email.contains('@') {
            return Err(AppError::validation("invalid email"));
        }
        if input.password.len() < self.auth_config.password_min_length {
            return Err(AppError::validation(format!(
                "password must be at least {} characters",
                self.auth_config.password_min_length
            )));
        }

        let password_hash = self.hasher.hash(&input.password).map_err(AppError::from)?;

        let user = self
            .user_repo
            .create(&CreateUser {
                username: input.username,
                email: input.email,
                password_hash,
                first_name: input.first_name,
                last_name: input.last_name,
                role: input.role,
            })
            .await?;

        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Gets a user by ID.
    pub async fn get(&self, id: Uuid) -> AppResult<User> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Lists users with pagination.
    pub async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<User>> {
        self.user_repo.find_all(page).await
    }

    /// Deletes a user by ID.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let deleted = self.user_repo.delete(id).await?;
        if !deleted {
            return Err(AppError::not_found(format!("User {id} not found")));
        }
        info!(user_id = %id, "User deleted");
        Ok(())
    }

    /// Rotates the caller's own password after verifying the current one.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = self.get(ctx.profile_id).await?;

        self.hasher
            .verify(&user.password_hash, current_password)
            .map_err(AppError::from)?;

        if new_password.len() < self.auth_config.password_min_length {
            return Err(AppError::validation(format!(
                "password must be at least {} characters",
                self.auth_config.password_min_length
            )));
        }

        let new_hash = self.hasher.hash(new_password).map_err(AppError::from)?;
        self.user_repo.update_password(user.id, &new_hash).await?;

        info!(user_id = %user.id, "Password changed");
        Ok(())
    }
}
