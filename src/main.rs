// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

use std::{env, net::SocketAddr, sync::Arc};

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use turbo_rent_server::{
    api::router,
    blockchain::{EthClient, TxVerifier},
    config,
    mail::{DisabledMailer, HttpMailer, MailTransport},
    providers::MidtransClient,
    state::{AppState, AuthConfig, MailSettings},
    storage::{FileStorage, StoragePaths},
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let format = env::var("LOG_FORMAT").unwrap_or_default();
    if format.eq_ignore_ascii_case("json") {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn env_trimmed(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[tokio::main]
async fn main() {
    init_tracing();

    let jwt_secret = env_trimmed(config::JWT_SECRET_ENV)
        .expect("JWT_SECRET must be set: session tokens cannot be signed without it");

    // Storage
    let data_dir =
        env_trimmed(config::DATA_DIR_ENV).unwrap_or_else(|| config::DEFAULT_DATA_DIR.to_string());
    let mut storage = FileStorage::new(StoragePaths::new(&data_dir));
    storage
        .initialize()
        .expect("Failed to initialize data directory");
    tracing::info!(%data_dir, "Storage initialized");

    // Blockchain verifier
    let chain = EthClient::sepolia()
        .await
        .expect("Failed to create Sepolia RPC client");
    tracing::info!(chain_id = chain.network().chain_id, "Sepolia RPC client ready");
    let verifier = TxVerifier::new(Arc::new(chain));

    // Mail transport
    let mailer: Arc<dyn MailTransport> = if HttpMailer::is_configured() {
        match HttpMailer::from_env() {
            Ok(mailer) => Arc::new(mailer),
            Err(e) => {
                tracing::warn!("Mail provider misconfigured, outgoing mail disabled: {e}");
                Arc::new(DisabledMailer)
            }
        }
    } else {
        tracing::warn!("Mail provider not configured, outgoing mail disabled");
        Arc::new(DisabledMailer)
    };

    // Mail addressing
    let from_address =
        env_trimmed("MAIL_FROM_ADDRESS").unwrap_or_else(|| MailSettings::default().from_address);
    let mail_settings = MailSettings {
        contact_inbox: env_trimmed("CONTACT_INBOX").unwrap_or_else(|| from_address.clone()),
        from_address,
        frontend_url: env_trimmed("FRONTEND_URL")
            .unwrap_or_else(|| MailSettings::default().frontend_url),
    };

    let mut state = AppState::new(storage, verifier, mailer)
        .with_auth_config(AuthConfig::new(jwt_secret))
        .with_mail_settings(mail_settings);

    // Midtrans checkout is optional
    if MidtransClient::is_configured() {
        match MidtransClient::from_env() {
            Ok(gateway) => {
                tracing::info!("Midtrans checkout gateway configured");
                state = state.with_gateway(gateway);
            }
            Err(e) => tracing::warn!("Midtrans gateway misconfigured, checkout disabled: {e}"),
        }
    } else {
        tracing::info!("Midtrans checkout gateway not configured");
    }

    let app = router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "4000".to_string())
        .parse()
        .unwrap_or(4000);
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    tracing::info!("Turbo Rent server listening on http://{addr} (docs at /docs)");

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            wait_for_signal().await;
            tracing::info!("Shutdown signal received");
            shutdown.cancel();
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .expect("Server failed");
}

/// Wait for SIGINT or SIGTERM.
async fn wait_for_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term =
            signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = term.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
