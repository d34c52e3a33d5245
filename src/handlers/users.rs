//! User endpoints: CRUD plus register and login

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::database::NewUser;
use crate::handlers::AppState;
use crate::models::user::{UpdateUserRequest, UserResponse, UserRole};
use crate::utils::errors::{AppError, Result, ValidationErrors};
use crate::utils::helpers::is_valid_email;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/users/", get(list_users).post(create_user))
        .route("/api/users/register/", post(register_user))
        .route("/api/users/login/", post(login_user))
        .route(
            "/api/users/:id/",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

impl RegisterPayload {
    fn validate(self) -> Result<(String, String, String, String, String, String, String)> {
        let mut errors = ValidationErrors::new();

        if self.username.as_deref().map_or(true, |u| u.trim().is_empty()) {
            errors.add("username", "This field is required");
        }
        match self.email.as_deref() {
            None => errors.add("email", "This field is required"),
            Some(email) if !is_valid_email(email) => {
                errors.add("email", "Enter a valid email address");
            }
            _ => {}
        }
        if self.password.as_deref().map_or(true, |p| p.is_empty()) {
            errors.add("password", "This field is required");
        }
        if let Some(role) = self.role.as_deref() {
            if let Err(msg) = role.parse::<UserRole>() {
                errors.add("role", msg);
            }
        }

        errors.into_result()?;

        Ok((
            self.username.unwrap_or_default(),
            self.email.unwrap_or_default(),
            self.password.unwrap_or_default(),
            self.first_name.unwrap_or_default(),
            self.last_name.unwrap_or_default(),
            self.role.unwrap_or_else(|| UserRole::Customer.as_str().to_string()),
            self.phone.unwrap_or_default(),
        ))
    }
}

async fn insert_user(state: &AppState, payload: RegisterPayload) -> Result<UserResponse> {
    let (username, email, password, first_name, last_name, role, phone) = payload.validate()?;

    if state.db.users.find_by_username(&username).await?.is_some() {
        return Err(AppError::invalid_field(
            "username",
            "A user with that username already exists",
        ));
    }

    let user = state
        .db
        .users
        .create(NewUser {
            username,
            email,
            password_hash: state.services.auth.hash_password(&password),
            first_name,
            last_name,
            role,
            phone,
        })
        .await?;
    crate::utils::logging::log_write("user", user.id, "create");

    Ok(user.into())
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>> {
    let users = state.db.users.list().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let user = insert_user(&state, payload).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Register and log straight in: the response carries a token.
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let user = insert_user(&state, payload).await?;
    let token = state.services.auth.issue_token(user.id)?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub username: Option<String>,
    pub password: Option<String>,
}

pub async fn login_user(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>> {
    let (Some(username), Some(password)) = (payload.username, payload.password) else {
        return Err(AppError::invalid_field("username", "Username and password are required"));
    };

    let user = state
        .db
        .users
        .find_by_username(&username)
        .await?
        .filter(|user| state.services.auth.verify_password(&password, &user.password_hash))
        .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

    let token = state.services.auth.issue_token(user.id)?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>> {
    let user = state
        .db
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("User", id))?;

    Ok(Json(user.into()))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>> {
    let mut errors = ValidationErrors::new();
    if let Some(role) = request.role.as_deref() {
        if let Err(msg) = role.parse::<UserRole>() {
            errors.add("role", msg);
        }
    }
    if let Some(email) = request.email.as_deref() {
        if !is_valid_email(email) {
            errors.add("email", "Enter a valid email address");
        }
    }
    errors.into_result()?;

    if state.db.users.find_by_id(id).await?.is_none() {
        return Err(AppError::not_found("User", id));
    }

    let user = state.db.users.update(id, request).await?;
    crate::utils::logging::log_write("user", id, "update");

    Ok(Json(user.into()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let deleted = state.db.users.delete(id).await?;
    if deleted == 0 {
        return Err(AppError::not_found("User", id));
    }
    crate::utils::logging::log_write("user", id, "delete");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> RegisterPayload {
        RegisterPayload {
            username: Some("asha".to_string()),
            email: Some("asha@example.com".to_string()),
            password: Some("hunter2".to_string()),
            first_name: None,
            last_name: None,
            role: None,
            phone: None,
        }
    }

    #[test]
    fn register_defaults_role_to_customer() {
        let (_, _, _, _, _, role, _) = payload().validate().unwrap();
        assert_eq!(role, "customer");
    }

    #[test]
    fn register_rejects_unknown_role() {
        let mut p = payload();
        p.role = Some("admin".to_string());

        match p.validate() {
            Err(AppError::Validation(fields)) => assert!(fields.contains_key("role")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn register_rejects_bad_email_and_missing_password_together() {
        let p = RegisterPayload {
            username: Some("asha".to_string()),
            email: Some("not-an-email".to_string()),
            password: None,
            first_name: None,
            last_name: None,
            role: None,
            phone: None,
        };

        match p.validate() {
            Err(AppError::Validation(fields)) => {
                assert!(fields.contains_key("email"));
                assert!(fields.contains_key("password"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
