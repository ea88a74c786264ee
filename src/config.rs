// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! # Runtime Configuration Constants
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Root directory for booking/car/user storage | `./data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `4000` |
//! | `JWT_SECRET` | HS256 signing secret for session tokens | Required |
//! | `SEPOLIA_RPC_URL` | Ethereum Sepolia JSON-RPC endpoint | Public Sepolia RPC |
//! | `MAIL_API_BASE_URL` | HTTP mail provider base URL | Unset (mail disabled) |
//! | `MAIL_API_KEY` | HTTP mail provider API key | Unset (mail disabled) |
//! | `MAIL_FROM_ADDRESS` | Sender address for outgoing mail | `no-reply@turborent.example` |
//! | `CONTACT_INBOX` | Destination for contact-form notifications | `MAIL_FROM_ADDRESS` |
//! | `FRONTEND_URL` | Base URL for password-reset links | `http://localhost:3000` |
//! | `MIDTRANS_SERVER_KEY` | Midtrans Snap server key | Unset (gateway disabled) |
//! | `MIDTRANS_BASE_URL` | Midtrans API base URL | Sandbox URL |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

/// Environment variable name for the data directory path.
///
/// All cars, bookings, users, id sequences, and audit logs are stored
/// under this directory as JSON/JSONL files.
///
/// # Default
/// `./data`
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Default data directory when `DATA_DIR` is not set.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Environment variable name for the JWT signing secret.
///
/// Session tokens are HS256-signed with this secret. The server refuses
/// to start without it.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the Sepolia JSON-RPC endpoint override.
pub const SEPOLIA_RPC_URL_ENV: &str = "SEPOLIA_RPC_URL";
