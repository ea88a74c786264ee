// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! # Outbound Email Module
//!
//! Transactional email for booking confirmations, password resets, and
//! contact-form traffic. Delivery goes through [`MailTransport`], an
//! injected trait object: production uses [`HttpMailer`] against an HTTP
//! mail API, tests substitute fakes, and an unconfigured deployment gets
//! [`DisabledMailer`] so every send reports failure instead of panicking.

pub mod client;
pub mod templates;

pub use client::{DisabledMailer, HttpMailer, MailError, MailMessage, MailTransport};
