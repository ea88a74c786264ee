// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! HTTP mail provider client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

const BASE_URL_ENV: &str = "MAIL_API_BASE_URL";
const API_KEY_ENV: &str = "MAIL_API_KEY";

/// A single outgoing email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    pub reply_to: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Mail configuration missing: {0}")]
    MissingConfig(String),

    #[error("Mail transport is not configured")]
    Disabled,

    #[error("Mail request failed: {0}")]
    Request(String),

    #[error("Mail response was invalid: {0}")]
    InvalidResponse(String),
}

/// Outbound mail delivery seam.
///
/// Returns the provider-assigned message id on success.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: &MailMessage) -> Result<String, MailError>;

    /// Whether sends can possibly succeed. Used by the health endpoint.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Client for an HTTP mail API (`POST {base}/v1/send`).
#[derive(Debug, Clone)]
pub struct HttpMailer {
    base_url: String,
    api_key: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

impl HttpMailer {
    pub fn is_configured() -> bool {
        env_optional(BASE_URL_ENV).is_some() && env_optional(API_KEY_ENV).is_some()
    }

    pub fn from_env() -> Result<Self, MailError> {
        let base_url = env_required(BASE_URL_ENV)?;
        let api_key = env_required(API_KEY_ENV)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| MailError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            api_key,
            http,
        })
    }
}

#[async_trait]
impl MailTransport for HttpMailer {
    async fn send(&self, message: &MailMessage) -> Result<String, MailError> {
        let mut payload = json!({
            "from": message.from,
            "to": message.to,
            "subject": message.subject,
            "html": message.html,
        });
        if let Some(reply_to) = &message.reply_to {
            payload["reply_to"] = json!(reply_to);
        }

        let response = self
            .http
            .post(format!("{}/v1/send", self.base_url.trim_end_matches('/')))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| MailError::Request(format!("send request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Request(format!(
                "send returned {status}: {body}"
            )));
        }

        let sent: SendResponse = response
            .json()
            .await
            .map_err(|e| MailError::InvalidResponse(format!("invalid send response: {e}")))?;

        Ok(sent.id)
    }
}

/// Transport used when the mail provider is not configured.
///
/// Every send fails with [`MailError::Disabled`], so best-effort callers
/// report `emailSent: false` and strict callers (contact form, password
/// reset) surface a gateway error.
#[derive(Debug, Clone, Default)]
pub struct DisabledMailer;

#[async_trait]
impl MailTransport for DisabledMailer {
    async fn send(&self, message: &MailMessage) -> Result<String, MailError> {
        tracing::warn!(to = %message.to, subject = %message.subject, "Mail transport disabled, dropping email");
        Err(MailError::Disabled)
    }

    fn is_enabled(&self) -> bool {
        false
    }
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

fn env_required(name: &str) -> Result<String, MailError> {
    env_optional(name).ok_or_else(|| MailError::MissingConfig(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_message() -> MailMessage {
        MailMessage {
            from: "no-reply@turborent.example".to_string(),
            to: "jane@example.com".to_string(),
            subject: "Hello".to_string(),
            html: "<p>Hi</p>".to_string(),
            reply_to: None,
        }
    }

    #[tokio::test]
    async fn disabled_mailer_rejects_every_send() {
        let mailer = DisabledMailer;
        assert!(!mailer.is_enabled());

        let result = mailer.send(&sample_message()).await;
        assert!(matches!(result, Err(MailError::Disabled)));
    }

    #[test]
    fn send_response_parses_provider_id() {
        let sent: SendResponse =
            serde_json::from_str(r#"{"id":"msg_01h2xcejqtf2nbrexx3vqjhp41"}"#).unwrap();
        assert_eq!(sent.id, "msg_01h2xcejqtf2nbrexx3vqjhp41");
    }

    #[test]
    fn missing_env_is_reported_by_name() {
        let err = env_required("MAIL_TEST_VAR_THAT_DOES_NOT_EXIST").unwrap_err();
        assert!(err.to_string().contains("MAIL_TEST_VAR_THAT_DOES_NOT_EXIST"));
    }
}
