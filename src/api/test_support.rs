// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! Shared fixtures for handler tests: a scriptable chain, a recording
//! mail transport, and an `AppState` wired to a temp data directory.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use crate::blockchain::{
    parse_amount, ChainReader, EthClientError, ReceiptInfo, TxDetail, TxVerifier,
};
use crate::mail::{DisabledMailer, MailError, MailMessage, MailTransport};
use crate::state::{AppState, AuthConfig};
use crate::storage::{FileStorage, StoragePaths};

pub const TEST_SECRET: &str = "test-secret";
pub const TEST_RECIPIENT: &str = "0x742d35cc6634c0532925a3b844bc9e7595f4ab12";

/// Chain fake with fixed responses.
#[derive(Default)]
pub struct FakeChain {
    pub receipt: Option<ReceiptInfo>,
    pub tx: Option<TxDetail>,
    pub block: u64,
}

impl FakeChain {
    /// A chain where the payment of `value_eth` to [`TEST_RECIPIENT`]
    /// landed at block 100 with the head at `head_block`.
    pub fn confirmed_payment(value_eth: &str, head_block: u64) -> Self {
        Self {
            receipt: Some(ReceiptInfo {
                block_number: 100,
                gas_used: 21_000,
            }),
            tx: Some(TxDetail {
                to: Some(TEST_RECIPIENT.to_string()),
                value: parse_amount(value_eth, 18).unwrap(),
            }),
            block: head_block,
        }
    }
}

#[async_trait]
impl ChainReader for FakeChain {
    async fn transaction_receipt(
        &self,
        _tx_hash: &str,
    ) -> Result<Option<ReceiptInfo>, EthClientError> {
        Ok(self.receipt.clone())
    }

    async fn transaction_by_hash(
        &self,
        _tx_hash: &str,
    ) -> Result<Option<TxDetail>, EthClientError> {
        Ok(self.tx.clone())
    }

    async fn block_number(&self) -> Result<u64, EthClientError> {
        Ok(self.block)
    }
}

/// Mail transport that records sent messages, optionally failing.
#[derive(Default)]
pub struct RecordingMailer {
    pub fail: bool,
    pub sent: Mutex<Vec<MailMessage>>,
    counter: AtomicU32,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent_messages(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for RecordingMailer {
    async fn send(&self, message: &MailMessage) -> Result<String, MailError> {
        if self.fail {
            return Err(MailError::Request("simulated provider outage".to_string()));
        }
        self.sent.lock().unwrap().push(message.clone());
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(format!("msg_test_{n}"))
    }
}

/// State with an empty chain (verification fails fast) and no mail.
pub fn create_test_state() -> (AppState, TempDir) {
    create_test_state_with(FakeChain::default(), Arc::new(DisabledMailer))
}

/// State with the given chain and mail transport. Receipt polling is a
/// single attempt with no delay, so tests never sleep.
pub fn create_test_state_with(
    chain: FakeChain,
    mailer: Arc<dyn MailTransport>,
) -> (AppState, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let paths = StoragePaths::new(temp_dir.path());
    let mut storage = FileStorage::new(paths);
    storage.initialize().expect("Failed to initialize storage");

    let verifier = TxVerifier::new(Arc::new(chain)).with_retry_policy(1, Duration::ZERO);
    let state = AppState::new(storage, verifier, mailer)
        .with_auth_config(AuthConfig::new(TEST_SECRET));
    (state, temp_dir)
}
