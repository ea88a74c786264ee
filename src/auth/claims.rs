// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! JWT claims and authenticated user representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims carried by a session token.
///
/// Issued by [`crate::auth::tokens::issue_token`] and verified by the
/// [`crate::auth::Auth`] extractor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject: the user's uid
    pub sub: String,

    /// User email at issue time
    pub email: String,

    /// User display name at issue time
    pub name: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Authenticated user information extracted from a session token.
///
/// This is the type handlers receive from the [`crate::auth::Auth`]
/// extractor.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Canonical user id (`sub` claim)
    pub uid: String,

    /// Email as recorded in the token
    pub email: String,

    /// Display name as recorded in the token
    pub full_name: String,
}

impl AuthenticatedUser {
    /// Create from verified session claims.
    pub fn from_claims(claims: SessionClaims) -> Self {
        Self {
            uid: claims.sub,
            email: claims.email,
            full_name: claims.name,
        }
    }
}
