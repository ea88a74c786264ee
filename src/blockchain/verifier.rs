// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! On-chain payment verification.
//!
//! A payment is accepted when its transaction has a receipt, pays the
//! expected recipient at least the expected amount, and sits at least
//! [`MIN_CONFIRMATIONS`] blocks behind the chain head. All failures,
//! including RPC errors, are normalized into a `VerificationResult`
//! with `verified: false` and a reason string; the caller never sees a
//! panic or an error type from this path.

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::U256;

use super::client::{ChainReader, EthClientError, ReceiptInfo};
use super::types::NATIVE_DECIMALS;

/// Minimum confirmation depth before a payment is accepted.
pub const MIN_CONFIRMATIONS: u64 = 3;

/// How many times to poll for a transaction receipt.
pub const RECEIPT_ATTEMPTS: u32 = 5;

/// Delay between receipt polling attempts.
pub const RECEIPT_DELAY: Duration = Duration::from_millis(3000);

/// Outcome of verifying one payment transaction.
///
/// Ephemeral: consumed by the payment workflow and the confirmation
/// email, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    /// Whether every check passed
    pub verified: bool,
    /// Block number of the receipt (success only)
    pub block_number: Option<u64>,
    /// Confirmation depth at verification time (success only)
    pub confirmations: Option<u64>,
    /// Gas used by the transaction (success only)
    pub gas_used: Option<u64>,
    /// On-chain transferred value, formatted in ETH (success only)
    pub amount: Option<String>,
    /// Failure reason (failure only)
    pub error: Option<String>,
}

impl VerificationResult {
    /// Successful verification with receipt details.
    pub fn confirmed(block_number: u64, confirmations: u64, gas_used: u64, amount: String) -> Self {
        Self {
            verified: true,
            block_number: Some(block_number),
            confirmations: Some(confirmations),
            gas_used: Some(gas_used),
            amount: Some(amount),
            error: None,
        }
    }

    /// Failed verification with a reason.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            verified: false,
            block_number: None,
            confirmations: None,
            gas_used: None,
            amount: None,
            error: Some(error.into()),
        }
    }
}

/// Payment transaction verifier.
///
/// Chain access is injected so the checks can run against a fake chain
/// in tests. The retry policy is adjustable for the same reason.
pub struct TxVerifier {
    chain: Arc<dyn ChainReader>,
    attempts: u32,
    delay: Duration,
}

impl TxVerifier {
    /// Create a verifier with the default retry policy.
    pub fn new(chain: Arc<dyn ChainReader>) -> Self {
        Self {
            chain,
            attempts: RECEIPT_ATTEMPTS,
            delay: RECEIPT_DELAY,
        }
    }

    /// Override the receipt polling budget and inter-attempt delay.
    pub fn with_retry_policy(mut self, attempts: u32, delay: Duration) -> Self {
        self.attempts = attempts;
        self.delay = delay;
        self
    }

    /// Verify a payment transaction.
    ///
    /// `expected_amount` is the human-readable ETH amount the customer
    /// was charged (e.g. `"0.05"`). The comparison happens in wei, so
    /// display-string rounding can never accept an underpayment.
    pub async fn verify(
        &self,
        tx_hash: &str,
        expected_amount: &str,
        recipient: &str,
    ) -> VerificationResult {
        match self.check(tx_hash, expected_amount, recipient).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(tx_hash, "Blockchain verification error: {e}");
                VerificationResult::failed(e.to_string())
            }
        }
    }

    async fn check(
        &self,
        tx_hash: &str,
        expected_amount: &str,
        recipient: &str,
    ) -> Result<VerificationResult, EthClientError> {
        let Some(receipt) = self.wait_for_receipt(tx_hash).await? else {
            return Ok(VerificationResult::failed(
                "Transaction not found after retries",
            ));
        };

        let Some(tx) = self.chain.transaction_by_hash(tx_hash).await? else {
            return Ok(VerificationResult::failed(
                "Transaction details not available",
            ));
        };

        // Recipient must match, ignoring address casing
        let recipient_matches = tx
            .to
            .as_deref()
            .is_some_and(|to| to.eq_ignore_ascii_case(recipient));
        if !recipient_matches {
            return Ok(VerificationResult::failed("Invalid recipient address"));
        }

        let expected_wei = match parse_amount(expected_amount, NATIVE_DECIMALS) {
            Ok(wei) => wei,
            Err(e) => return Ok(VerificationResult::failed(e.to_string())),
        };
        if tx.value < expected_wei {
            return Ok(VerificationResult::failed("Insufficient payment amount"));
        }

        let current_block = self.chain.block_number().await?;
        let confirmations = current_block.saturating_sub(receipt.block_number);
        if confirmations < MIN_CONFIRMATIONS {
            return Ok(VerificationResult::failed(
                "Transaction needs more confirmations",
            ));
        }

        Ok(VerificationResult::confirmed(
            receipt.block_number,
            confirmations,
            receipt.gas_used,
            format_amount(tx.value, NATIVE_DECIMALS),
        ))
    }

    /// Poll for a transaction receipt with a bounded retry budget.
    ///
    /// Returns `Ok(None)` when the budget is exhausted without the
    /// transaction appearing; RPC failures abort the polling loop.
    pub async fn wait_for_receipt(
        &self,
        tx_hash: &str,
    ) -> Result<Option<ReceiptInfo>, EthClientError> {
        for attempt in 1..=self.attempts {
            if let Some(receipt) = self.chain.transaction_receipt(tx_hash).await? {
                return Ok(Some(receipt));
            }

            tracing::debug!(tx_hash, attempt, "Transaction receipt not yet available");
            if attempt < self.attempts {
                tokio::time::sleep(self.delay).await;
            }
        }

        Ok(None)
    }
}

/// Parse a human-readable amount to wei (or token units).
///
/// # Arguments
/// * `amount` - Amount as a string (e.g., "1.5")
/// * `decimals` - Number of decimals (18 for ETH)
///
/// # Returns
/// * `Ok(U256)` - Amount in smallest unit
/// * `Err` - If parsing fails
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256, EthClientError> {
    let parts: Vec<&str> = amount.trim().split('.').collect();

    if parts.len() > 2 {
        return Err(EthClientError::InvalidAmount(
            "Invalid amount format".to_string(),
        ));
    }

    let whole = parts[0]
        .parse::<u128>()
        .map_err(|_| EthClientError::InvalidAmount("Invalid whole number".to_string()))?;

    let decimal_part = if parts.len() == 2 {
        let dec_str = parts[1];
        if dec_str.len() > decimals as usize {
            return Err(EthClientError::InvalidAmount(format!(
                "Too many decimal places (max {})",
                decimals
            )));
        }
        // Pad with zeros to match decimals
        let padded = format!("{:0<width$}", dec_str, width = decimals as usize);
        padded
            .parse::<u128>()
            .map_err(|_| EthClientError::InvalidAmount("Invalid decimal".to_string()))?
    } else {
        0u128
    };

    let multiplier = 10u128.pow(decimals as u32);
    let total = whole
        .checked_mul(multiplier)
        .and_then(|w| w.checked_add(decimal_part))
        .ok_or_else(|| EthClientError::InvalidAmount("Amount overflow".to_string()))?;

    Ok(U256::from(total))
}

/// Format wei (or token units) to human-readable amount.
pub fn format_amount(amount: U256, decimals: u8) -> String {
    if amount.is_zero() {
        return "0".to_string();
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / divisor;
    let remainder = amount % divisor;

    if remainder.is_zero() {
        whole.to_string()
    } else {
        let decimal_str = format!("{:0>width$}", remainder, width = decimals as usize);
        let trimmed = decimal_str.trim_end_matches('0');
        if trimmed.is_empty() {
            whole.to_string()
        } else {
            format!("{}.{}", whole, trimmed)
        }
    }
}
