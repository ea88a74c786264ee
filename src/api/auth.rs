// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! Authentication endpoints: register, login, profile, logout, refresh,
//! and the password-reset flow.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use utoipa::ToSchema;

use crate::{
    audit_log,
    auth::{password, tokens, Auth},
    error::ApiError,
    mail::{templates, MailMessage},
    state::AppState,
    storage::{AuditEventType, StorageError, StoredUser, UserRepository},
};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Registration request.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Login request.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Forgot-password request.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: Option<String>,
}

/// Reset-password request.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub new_password: Option<String>,
}

/// Public projection of a user record. Never carries the password hash
/// or reset token.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserView {
    pub uid: String,
    pub full_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&StoredUser> for UserView {
    fn from(user: &StoredUser) -> Self {
        Self {
            uid: user.uid.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

/// Session response carrying the user and a fresh token.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub success: bool,
    pub message: String,
    pub data: SessionData,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionData {
    pub user: UserView,
    pub token: String,
}

/// Profile response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub success: bool,
    pub message: String,
    pub data: UserView,
}

/// Acknowledgement response without a payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct AckResponse {
    pub success: bool,
    pub message: String,
}

/// Refresh response.
#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshResponse {
    pub success: bool,
    pub message: String,
    pub data: RefreshData,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshData {
    pub token: String,
}

// =============================================================================
// Validation helpers
// =============================================================================

/// Canonical form used for storage and lookup: NFKC, trimmed, lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().nfkc().collect::<String>().to_lowercase()
}

/// Structural email check: one `@`, non-empty local part, domain with a
/// dot, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains('@')
}

fn storage_failure(context: &str, e: StorageError) -> ApiError {
    tracing::error!("{context}: {e}");
    ApiError::internal("Internal server error")
}

// =============================================================================
// Handlers
// =============================================================================

/// Register a new user account.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = SessionResponse),
        (status = 400, description = "Validation failure or duplicate email")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let full_name = request
        .full_name
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    if full_name.chars().count() < 2 {
        return Err(ApiError::bad_request(
            "Full name must be at least 2 characters",
        ));
    }

    let email = normalize_email(request.email.as_deref().unwrap_or_default());
    if !is_valid_email(&email) {
        return Err(ApiError::bad_request("Invalid email format"));
    }

    let password = request.password.as_deref().unwrap_or_default();
    if password.len() < 6 {
        return Err(ApiError::bad_request(
            "Password must be at least 6 characters",
        ));
    }

    let storage = state.storage();
    let repo = UserRepository::new(&storage);

    let existing = repo
        .find_by_email(&email)
        .map_err(|e| storage_failure("User lookup failed", e))?;
    if existing.is_some() {
        return Err(ApiError::bad_request("Email already registered"));
    }

    let password_hash = password::hash_password(password)
        .map_err(|_| ApiError::internal("Internal server error"))?;

    let user = StoredUser {
        uid: uuid::Uuid::new_v4().to_string(),
        full_name: full_name.to_string(),
        email,
        password_hash,
        reset_token: None,
        reset_token_expires: None,
        created_at: Utc::now(),
    };
    repo.create(&user)
        .map_err(|e| storage_failure("User creation failed", e))?;

    let token = tokens::issue_token(
        &state.auth_config.jwt_secret,
        &user.uid,
        &user.email,
        &user.full_name,
    )
    .map_err(|_| ApiError::internal("Internal server error"))?;

    audit_log!(&storage, AuditEventType::UserRegistered, user.uid.clone());

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            success: true,
            message: "User registered successfully".to_string(),
            data: SessionData {
                user: UserView::from(&user),
                token,
            },
        }),
    ))
}

/// Log in with email and password.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = SessionResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let email = normalize_email(request.email.as_deref().unwrap_or_default());
    let password = request.password.as_deref().unwrap_or_default();

    let storage = state.storage();
    let repo = UserRepository::new(&storage);

    let user = repo
        .find_by_email(&email)
        .map_err(|e| storage_failure("User lookup failed", e))?;

    // Unknown email and wrong password are indistinguishable to callers
    let Some(user) = user.filter(|u| password::verify_password(password, &u.password_hash)) else {
        audit_log!(&storage, AuditEventType::AuthFailure, email);
        return Err(ApiError::unauthorized("Invalid email or password"));
    };

    let token = tokens::issue_token(
        &state.auth_config.jwt_secret,
        &user.uid,
        &user.email,
        &user.full_name,
    )
    .map_err(|_| ApiError::internal("Internal server error"))?;

    audit_log!(&storage, AuditEventType::UserLogin, user.uid.clone());

    Ok(Json(SessionResponse {
        success: true,
        message: "Login successful".to_string(),
        data: SessionData {
            user: UserView::from(&user),
            token,
        },
    }))
}

/// Get the authenticated user's profile.
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    tag = "Auth",
    responses(
        (status = 200, description = "Profile retrieved", body = ProfileResponse),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer" = []))
)]
pub async fn profile(
    State(state): State<AppState>,
    Auth(user): Auth,
) -> Result<Json<ProfileResponse>, ApiError> {
    let storage = state.storage();
    let stored = UserRepository::new(&storage)
        .get(&user.uid)
        .map_err(|e| match e {
            StorageError::NotFound(_) => ApiError::not_found("User not found"),
            other => storage_failure("Profile lookup failed", other),
        })?;

    Ok(Json(ProfileResponse {
        success: true,
        message: "Profile retrieved successfully".to_string(),
        data: UserView::from(&stored),
    }))
}

/// Log out. Tokens are stateless, so this only acknowledges.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Logged out", body = AckResponse),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer" = []))
)]
pub async fn logout(Auth(user): Auth) -> Json<AckResponse> {
    tracing::debug!(uid = %user.uid, "User logged out");
    Json(AckResponse {
        success: true,
        message: "Logout successful".to_string(),
    })
}

/// Re-issue a session token for the authenticated identity.
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = "Auth",
    responses(
        (status = 200, description = "Token refreshed", body = RefreshResponse),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer" = []))
)]
pub async fn refresh(
    State(state): State<AppState>,
    Auth(user): Auth,
) -> Result<Json<RefreshResponse>, ApiError> {
    let token = tokens::issue_token(
        &state.auth_config.jwt_secret,
        &user.uid,
        &user.email,
        &user.full_name,
    )
    .map_err(|_| ApiError::internal("Internal server error"))?;

    Ok(Json(RefreshResponse {
        success: true,
        message: "Token refreshed successfully".to_string(),
        data: RefreshData { token },
    }))
}

const FORGOT_PASSWORD_ACK: &str =
    "If an account with that email exists, a password reset link has been sent";

/// Start the password-reset flow.
///
/// Always answers 200 with the same message whether or not the account
/// exists. When it does, a single-use token valid for one hour is
/// stored and mailed.
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    tag = "Auth",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Acknowledged", body = AckResponse),
        (status = 502, description = "Reset email could not be sent")
    )
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<Json<AckResponse>, ApiError> {
    let email = normalize_email(request.email.as_deref().unwrap_or_default());

    let storage = state.storage();
    let repo = UserRepository::new(&storage);
    let user = repo
        .find_by_email(&email)
        .map_err(|e| storage_failure("User lookup failed", e))?;

    if let Some(mut user) = user {
        let token = password::generate_reset_token()
            .map_err(|_| ApiError::internal("Internal server error"))?;
        user.reset_token = Some(token.clone());
        user.reset_token_expires = Some(Utc::now() + Duration::hours(1));
        repo.update(&user)
            .map_err(|e| storage_failure("Reset token persistence failed", e))?;

        let reset_url = format!(
            "{}/reset-password?token={}",
            state.mail_settings.frontend_url.trim_end_matches('/'),
            token
        );
        let message = MailMessage {
            from: state.mail_settings.from_address.clone(),
            to: user.email.clone(),
            subject: templates::PASSWORD_RESET_SUBJECT.to_string(),
            html: templates::password_reset(&reset_url),
            reply_to: None,
        };
        state.mailer().send(&message).await.map_err(|e| {
            tracing::error!(uid = %user.uid, "Password reset email failed: {e}");
            ApiError::bad_gateway("Failed to send password reset email")
        })?;

        audit_log!(
            &storage,
            AuditEventType::PasswordResetRequested,
            user.uid.clone()
        );
    }

    Ok(Json(AckResponse {
        success: true,
        message: FORGOT_PASSWORD_ACK.to_string(),
    }))
}

/// Complete the password-reset flow with a token from the email link.
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    tag = "Auth",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset", body = AckResponse),
        (status = 400, description = "Invalid or expired token")
    )
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<AckResponse>, ApiError> {
    let new_password = request.new_password.as_deref().unwrap_or_default();
    if new_password.len() < 6 {
        return Err(ApiError::bad_request(
            "Password must be at least 6 characters",
        ));
    }

    let token = request.token.as_deref().unwrap_or_default();
    let storage = state.storage();
    let repo = UserRepository::new(&storage);

    let user = repo
        .find_by_valid_reset_token(token)
        .map_err(|e| storage_failure("Reset token lookup failed", e))?;
    let Some(mut user) = user else {
        return Err(ApiError::bad_request("Invalid or expired reset token"));
    };

    user.password_hash = password::hash_password(new_password)
        .map_err(|_| ApiError::internal("Internal server error"))?;
    user.reset_token = None;
    user.reset_token_expires = None;
    repo.update(&user)
        .map_err(|e| storage_failure("Password update failed", e))?;

    audit_log!(
        &storage,
        AuditEventType::PasswordResetCompleted,
        user.uid.clone()
    );

    Ok(Json(AckResponse {
        success: true,
        message: "Password reset successful".to_string(),
    }))
}
