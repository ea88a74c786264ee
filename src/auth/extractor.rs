// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! Axum extractor for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{tokens, AuthenticatedUser, AuthError};
use crate::state::AppState;

/// Extractor for authenticated users.
///
/// Validates the HS256 session token from the Authorization header and
/// provides the authenticated user information.
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?;

        let claims = tokens::verify_token(&state.auth_config.jwt_secret, token)?;

        Ok(Auth(AuthenticatedUser::from_claims(claims)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::{ChainReader, EthClientError, ReceiptInfo, TxDetail, TxVerifier};
    use crate::mail::DisabledMailer;
    use crate::state::{AppState, AuthConfig};
    use crate::storage::{FileStorage, StoragePaths};
    use async_trait::async_trait;
    use axum::http::Request;
    use std::sync::Arc;
    use tempfile::TempDir;

    const SECRET: &str = "test-secret";

    /// Chain stub for states whose tests never touch the verifier.
    struct OfflineChain;

    #[async_trait]
    impl ChainReader for OfflineChain {
        async fn transaction_receipt(
            &self,
            _tx_hash: &str,
        ) -> Result<Option<ReceiptInfo>, EthClientError> {
            Err(EthClientError::RpcError("offline".to_string()))
        }

        async fn transaction_by_hash(
            &self,
            _tx_hash: &str,
        ) -> Result<Option<TxDetail>, EthClientError> {
            Err(EthClientError::RpcError("offline".to_string()))
        }

        async fn block_number(&self) -> Result<u64, EthClientError> {
            Err(EthClientError::RpcError("offline".to_string()))
        }
    }

    fn create_test_state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let paths = StoragePaths::new(temp_dir.path());
        let mut storage = FileStorage::new(paths);
        storage.initialize().expect("Failed to initialize storage");

        let state = AppState::new(
            storage,
            TxVerifier::new(Arc::new(OfflineChain)),
            Arc::new(DisabledMailer),
        )
        .with_auth_config(AuthConfig::new(SECRET));
        (state, temp_dir)
    }

    fn request_parts(auth_header: Option<String>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(header) = auth_header {
            builder = builder.header("Authorization", header);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn auth_extractor_requires_auth_header() {
        let (state, _temp_dir) = create_test_state();
        let mut parts = request_parts(None);

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingAuthHeader)));
    }

    #[tokio::test]
    async fn auth_extractor_rejects_non_bearer_header() {
        let (state, _temp_dir) = create_test_state();
        let mut parts = request_parts(Some("Basic dXNlcjpwYXNz".to_string()));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidAuthHeader)));
    }

    #[tokio::test]
    async fn auth_extractor_accepts_issued_token() {
        let (state, _temp_dir) = create_test_state();
        let token = tokens::issue_token(SECRET, "u-123", "jane@example.com", "Jane Renter").unwrap();
        let mut parts = request_parts(Some(format!("Bearer {token}")));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        let Auth(user) = result.expect("issued token should be accepted");
        assert_eq!(user.uid, "u-123");
        assert_eq!(user.email, "jane@example.com");
    }

    #[tokio::test]
    async fn auth_extractor_rejects_token_signed_with_other_secret() {
        let (state, _temp_dir) = create_test_state();
        let token =
            tokens::issue_token("other-secret", "u-123", "jane@example.com", "Jane Renter")
                .unwrap();
        let mut parts = request_parts(Some(format!("Bearer {token}")));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[tokio::test]
    async fn auth_extractor_rejects_tampered_token() {
        let (state, _temp_dir) = create_test_state();
        let token = tokens::issue_token(SECRET, "u-123", "jane@example.com", "Jane Renter").unwrap();
        let tampered = format!("{}x", token);
        let mut parts = request_parts(Some(format!("Bearer {tampered}")));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(result.is_err());
    }
}
