// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! Blockchain integration module for Ethereum Sepolia.
//!
//! This module provides functionality for:
//! - Reading transaction receipts and details over JSON-RPC
//! - Verifying crypto payments (recipient, amount, confirmations)

pub mod client;
pub mod types;
pub mod verifier;

pub use client::{ChainReader, EthClient, EthClientError, ReceiptInfo, TxDetail};
pub use types::*;
pub use verifier::{format_amount, parse_amount, TxVerifier, VerificationResult};
