// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! Shared application state.
//!
//! Every long-lived handle (storage, chain verifier, mail transport,
//! payment gateway) is constructed once in `main` and injected here;
//! handlers never reach for ambient singletons. Cloning is cheap.

use std::sync::Arc;

use crate::blockchain::TxVerifier;
use crate::mail::MailTransport;
use crate::providers::MidtransClient;
use crate::storage::FileStorage;

/// JWT session-token settings.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// HS256 signing secret. Set from `JWT_SECRET` at startup; tests
    /// supply their own.
    pub jwt_secret: String,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
        }
    }
}

/// Addresses and links used when composing outgoing mail.
#[derive(Debug, Clone)]
pub struct MailSettings {
    /// Sender address for all outgoing mail.
    pub from_address: String,
    /// Destination for contact-form notifications.
    pub contact_inbox: String,
    /// Base URL for password-reset links.
    pub frontend_url: String,
}

impl Default for MailSettings {
    fn default() -> Self {
        let from_address = "no-reply@turborent.example".to_string();
        Self {
            contact_inbox: from_address.clone(),
            from_address,
            frontend_url: "http://localhost:3000".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    storage: FileStorage,
    verifier: Arc<TxVerifier>,
    mailer: Arc<dyn MailTransport>,
    gateway: Option<Arc<MidtransClient>>,
    pub auth_config: AuthConfig,
    pub mail_settings: MailSettings,
}

impl AppState {
    pub fn new(storage: FileStorage, verifier: TxVerifier, mailer: Arc<dyn MailTransport>) -> Self {
        Self {
            storage,
            verifier: Arc::new(verifier),
            mailer,
            gateway: None,
            auth_config: AuthConfig::default(),
            mail_settings: MailSettings::default(),
        }
    }

    pub fn with_auth_config(mut self, auth_config: AuthConfig) -> Self {
        self.auth_config = auth_config;
        self
    }

    pub fn with_mail_settings(mut self, mail_settings: MailSettings) -> Self {
        self.mail_settings = mail_settings;
        self
    }

    pub fn with_gateway(mut self, gateway: MidtransClient) -> Self {
        self.gateway = Some(Arc::new(gateway));
        self
    }

    /// Storage handle for building per-request repositories.
    pub fn storage(&self) -> FileStorage {
        self.storage.clone()
    }

    /// Payment transaction verifier.
    pub fn verifier(&self) -> &TxVerifier {
        &self.verifier
    }

    /// Outbound mail transport.
    pub fn mailer(&self) -> &Arc<dyn MailTransport> {
        &self.mailer
    }

    /// Midtrans gateway, if configured.
    pub fn gateway(&self) -> Option<&MidtransClient> {
        self.gateway.as_deref()
    }
}
