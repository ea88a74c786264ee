// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! Password hashing and reset-token generation.

use ring::rand::{SecureRandom, SystemRandom};

use super::AuthError;

/// bcrypt cost factor for stored password hashes.
pub const BCRYPT_COST: u32 = 12;

/// Number of random bytes in a password reset token.
const RESET_TOKEN_BYTES: usize = 32;

/// Hash a password for storage.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| AuthError::InternalError(format!("password hashing failed: {e}")))
}

/// Check a password against a stored hash.
///
/// A corrupt hash verifies as false rather than erroring; the caller
/// only ever needs match/no-match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Generate an opaque password reset token: 32 crypto-random bytes,
/// hex-encoded.
pub fn generate_reset_token() -> Result<String, AuthError> {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| AuthError::InternalError("system RNG unavailable".to_string()))?;

    Ok(bytes.iter().map(|b| format!("{b:02x}")).collect())
}
