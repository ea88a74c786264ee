// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! Session token issuance and verification (HS256).

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::{AuthError, SessionClaims};

/// Session token lifetime: 24 hours.
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Issue a signed session token for a user.
pub fn issue_token(
    secret: &str,
    uid: &str,
    email: &str,
    full_name: &str,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = SessionClaims {
        sub: uid.to_string(),
        email: email.to_string(),
        name: full_name.to_string(),
        iat: now,
        exp: now + TOKEN_TTL_SECS,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::InternalError(format!("token signing failed: {e}")))
}

/// Verify a session token and return its claims.
pub fn verify_token(secret: &str, token: &str) -> Result<SessionClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = CLOCK_SKEW_LEEWAY;

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        jsonwebtoken::errors::ErrorKind::ImmatureSignature => AuthError::TokenNotYetValid,
        _ => AuthError::MalformedToken,
    })?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn issued_tokens_verify_and_round_trip_claims() {
        let token = issue_token(SECRET, "u-123", "jane@example.com", "Jane Renter").unwrap();
        let claims = verify_token(SECRET, &token).unwrap();

        assert_eq!(claims.sub, "u-123");
        assert_eq!(claims.email, "jane@example.com");
        assert_eq!(claims.name, "Jane Renter");
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(SECRET, "u-123", "jane@example.com", "Jane Renter").unwrap();

        let result = verify_token("other-secret", &token);
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn garbage_token_is_malformed() {
        assert!(matches!(
            verify_token(SECRET, "not.a.jwt"),
            Err(AuthError::MalformedToken)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        // Sign claims that expired well past the leeway window
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: "u-123".to_string(),
            email: "jane@example.com".to_string(),
            name: "Jane Renter".to_string(),
            iat: now - 2 * TOKEN_TTL_SECS,
            exp: now - TOKEN_TTL_SECS,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            verify_token(SECRET, &token),
            Err(AuthError::TokenExpired)
        ));
    }
}
