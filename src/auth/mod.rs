// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! # Authentication Module
//!
//! Locally issued HS256 session tokens plus bcrypt credential hashing.
//!
//! ## Auth Flow
//!
//! 1. `POST /api/auth/register` or `/login` verifies credentials and
//!    returns a 24-hour JWT in the response body
//! 2. Clients send `Authorization: Bearer <token>` on protected routes
//! 3. The [`Auth`] extractor verifies the signature and expiry and hands
//!    the handler an [`AuthenticatedUser`]
//!
//! ## Security
//!
//! - Tokens are signed with `JWT_SECRET` (HS256), 60 s clock-skew leeway
//! - Passwords are bcrypt-hashed at cost 12
//! - Password reset tokens are 32 random bytes, single-use, 1 h expiry

pub mod claims;
pub mod error;
pub mod extractor;
pub mod password;
pub mod tokens;

pub use claims::{AuthenticatedUser, SessionClaims};
pub use error::AuthError;
pub use extractor::Auth;
