// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! Turbo Rent - Car Rental Booking Service
//!
//! REST backend for the Turbo Rent frontend: car inventory, bookings
//! paid with on-chain Ethereum Sepolia transfers, user accounts, and
//! transactional email.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Session tokens, passwords, and the request extractor
//! - `blockchain` - Sepolia JSON-RPC client and payment verification
//! - `mail` - HTTP mail provider transport and templates
//! - `providers` - Midtrans Snap checkout gateway
//! - `storage` - JSON-file persistence and audit logging

pub mod api;
pub mod auth;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod mail;
pub mod providers;
pub mod state;
pub mod storage;
