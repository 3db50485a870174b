//! Axum route handlers for accounts and login.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::ValidateEmail;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::{create_access_token, TokenResponse, TOKEN_TYPE};
use crate::errors::{map_unique_violation, AppError};
use crate::models::user::{UserResponse, UserRow};
use crate::routes::extract::{FormBody, JsonBody, PathParam};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl CreateUserRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.username.trim().is_empty() {
            return Err(AppError::Validation("username cannot be empty".to_string()));
        }
        if self.password.is_empty() {
            return Err(AppError::Validation("password cannot be empty".to_string()));
        }
        if !self.email.validate_email() {
            return Err(AppError::Validation(format!(
                "'{}' is not a valid email address",
                self.email
            )));
        }
        Ok(())
    }
}

/// OAuth2 password-flow form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Argon2 is CPU-bound; keep it off the async workers.
async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, crate::auth::AuthError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("blocking task failed: {e}")))?
        .map_err(AppError::from)
}

/// POST /users
pub async fn handle_create_user(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    request.validate()?;

    let password = request.password.clone();
    let password_hash = run_blocking(move || hash_password(&password)).await?;

    let user = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (id, username, email, password)
        VALUES ($1, $2, $3, $4)
        RETURNING id, username, email, password, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.username.trim())
    .bind(&request.email)
    .bind(&password_hash)
    .fetch_one(&state.db)
    .await
    .map_err(|e| map_unique_violation(e, "username or email is already registered"))?;

    info!("Created user {} ({})", user.username, user.id);
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    PathParam(user_id): PathParam<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let user = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user with id: {user_id} does not exist")))?;

    Ok(Json(user.into()))
}

/// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    FormBody(form): FormBody<LoginForm>,
) -> Result<Json<TokenResponse>, AppError> {
    let user = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE username = $1")
        .bind(&form.username)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "user with username: {} does not exist",
                form.username
            ))
        })?;

    let stored = user.password.clone();
    let password = form.password;
    let valid = run_blocking(move || verify_password(&password, &stored)).await?;
    if !valid {
        return Err(AppError::Forbidden("invalid credentials".to_string()));
    }

    let access_token = create_access_token(user.id, &user.username, &state.config)?;
    info!("User {} logged in", user.id);

    Ok(Json(TokenResponse {
        access_token,
        token_type: TOKEN_TYPE,
    }))
}
