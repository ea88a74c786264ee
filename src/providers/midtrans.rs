// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! Midtrans Snap integration for card/bank checkout.
//!
//! The gateway is an alternative to on-chain payment: the API creates a
//! Snap checkout session and hands the redirect URL to the frontend.
//! Settlement callbacks are handled by the frontend flow, not here.

use std::time::Duration;

use base64ct::{Base64, Encoding};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

const DEFAULT_BASE_URL: &str = "https://app.sandbox.midtrans.com";

const SERVER_KEY_ENV: &str = "MIDTRANS_SERVER_KEY";
const BASE_URL_ENV: &str = "MIDTRANS_BASE_URL";

#[derive(Debug, thiserror::Error)]
pub enum MidtransError {
    #[error("Midtrans configuration missing: {0}")]
    MissingConfig(String),

    #[error("Midtrans request failed: {0}")]
    Request(String),

    #[error("Midtrans response was invalid: {0}")]
    InvalidResponse(String),
}

/// Customer identity attached to a checkout session.
pub struct CheckoutCustomer<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

/// A created Snap checkout session.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    /// Snap token for the embedded widget
    pub token: String,
    /// Hosted checkout page URL
    pub redirect_url: String,
}

/// Midtrans Snap API client.
#[derive(Debug, Clone)]
pub struct MidtransClient {
    base_url: String,
    server_key: String,
    http: Client,
}

impl MidtransClient {
    pub fn is_configured() -> bool {
        env_optional(SERVER_KEY_ENV).is_some()
    }

    pub fn from_env() -> Result<Self, MidtransError> {
        let server_key = env_required(SERVER_KEY_ENV)?;
        let base_url = env_or_default(BASE_URL_ENV, DEFAULT_BASE_URL);

        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| MidtransError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            server_key,
            http,
        })
    }

    /// Create a Snap checkout session.
    ///
    /// `gross_amount` is in Indonesian rupiah, whole units (Snap takes no
    /// decimals for IDR).
    pub async fn create_checkout(
        &self,
        order_id: &str,
        gross_amount: u64,
        customer: CheckoutCustomer<'_>,
    ) -> Result<CheckoutSession, MidtransError> {
        let payload = json!({
            "transaction_details": {
                "order_id": order_id,
                "gross_amount": gross_amount,
            },
            "customer_details": {
                "first_name": customer.name,
                "email": customer.email,
            },
        });

        let response = self
            .http
            .post(format!(
                "{}/snap/v1/transactions",
                self.base_url.trim_end_matches('/')
            ))
            .header("Authorization", basic_auth(&self.server_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| MidtransError::Request(format!("checkout request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MidtransError::Request(format!(
                "checkout returned {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| MidtransError::InvalidResponse(format!("invalid checkout response: {e}")))
    }
}

/// Midtrans server-key auth: `Basic base64(server_key + ":")`.
fn basic_auth(server_key: &str) -> String {
    let credentials = format!("{server_key}:");
    format!("Basic {}", Base64::encode_string(credentials.as_bytes()))
}

fn env_optional(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) => {
            let trimmed = value.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

fn env_required(name: &str) -> Result<String, MidtransError> {
    env_optional(name).ok_or_else(|| MidtransError::MissingConfig(name.to_string()))
}

fn env_or_default(name: &str, default: &str) -> String {
    env_optional(name).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_encodes_server_key_with_trailing_colon() {
        // base64("SB-Mid-server-abc:")
        assert_eq!(
            basic_auth("SB-Mid-server-abc"),
            "Basic U0ItTWlkLXNlcnZlci1hYmM6"
        );
    }

    #[test]
    fn checkout_session_parses_snap_response() {
        let session: CheckoutSession = serde_json::from_str(
            r#"{
                "token": "66e4fa55-fdac-4ef9-91b5-733b97d1b862",
                "redirect_url": "https://app.sandbox.midtrans.com/snap/v2/vtweb/66e4fa55"
            }"#,
        )
        .unwrap();

        assert_eq!(session.token, "66e4fa55-fdac-4ef9-91b5-733b97d1b862");
        assert!(session.redirect_url.contains("/snap/v2/vtweb/"));
    }

    #[test]
    fn sandbox_is_the_default_base_url() {
        assert_eq!(DEFAULT_BASE_URL, "https://app.sandbox.midtrans.com");
    }
}
