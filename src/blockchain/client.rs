// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! Read-only Ethereum client used by the payment verifier.

use std::env;

use alloy::{
    consensus::Transaction as _,
    network::Ethereum,
    primitives::U256,
    providers::{
        fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
        Identity, Provider, ProviderBuilder, RootProvider,
    },
};
use async_trait::async_trait;

use crate::config;

use super::types::{NetworkConfig, SEPOLIA};

/// HTTP provider type (with all fillers).
type HttpProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider<Ethereum>,
>;

/// Transaction receipt fields the verifier cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptInfo {
    /// Block number where the transaction was included
    pub block_number: u64,
    /// Gas actually used
    pub gas_used: u64,
}

/// Transaction detail fields the verifier cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxDetail {
    /// Recipient address (None for contract creation)
    pub to: Option<String>,
    /// Transferred value in wei
    pub value: U256,
}

/// Read access to the chain, as the verifier needs it.
///
/// The production implementation is [`EthClient`]; tests substitute a
/// fake so verification logic runs without a node.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Fetch the receipt for a transaction, if one exists yet.
    async fn transaction_receipt(&self, tx_hash: &str)
        -> Result<Option<ReceiptInfo>, EthClientError>;

    /// Fetch the transaction itself, if the node knows it.
    async fn transaction_by_hash(&self, tx_hash: &str) -> Result<Option<TxDetail>, EthClientError>;

    /// Current chain head block number.
    async fn block_number(&self) -> Result<u64, EthClientError>;
}

/// Ethereum JSON-RPC client.
pub struct EthClient {
    /// Network configuration
    network: NetworkConfig,
    /// Alloy HTTP provider
    provider: HttpProvider,
}

impl EthClient {
    /// Create a new client for the specified network.
    pub async fn new(network: NetworkConfig) -> Result<Self, EthClientError> {
        let rpc_url = network.rpc_url.to_string();
        Self::with_rpc_url(network, &rpc_url).await
    }

    /// Create a client for a network, overriding its RPC endpoint.
    pub async fn with_rpc_url(
        network: NetworkConfig,
        rpc_url: &str,
    ) -> Result<Self, EthClientError> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e: url::ParseError| EthClientError::InvalidRpcUrl(e.to_string()))?;

        let provider = ProviderBuilder::new().connect_http(url);

        Ok(Self { network, provider })
    }

    /// Create a client for Sepolia, honoring the `SEPOLIA_RPC_URL`
    /// environment override.
    pub async fn sepolia() -> Result<Self, EthClientError> {
        match env::var(config::SEPOLIA_RPC_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::with_rpc_url(SEPOLIA, url.trim()).await,
            _ => Self::new(SEPOLIA).await,
        }
    }

    /// Get the network configuration.
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }
}

#[async_trait]
impl ChainReader for EthClient {
    async fn transaction_receipt(
        &self,
        tx_hash: &str,
    ) -> Result<Option<ReceiptInfo>, EthClientError> {
        let hash = tx_hash
            .parse()
            .map_err(|e| EthClientError::InvalidTxHash(format!("Invalid tx hash: {}", e)))?;

        let receipt = self
            .provider
            .get_transaction_receipt(hash)
            .await
            .map_err(|e| EthClientError::RpcError(format!("Failed to get receipt: {}", e)))?;

        Ok(receipt.map(|r| ReceiptInfo {
            block_number: r.block_number.unwrap_or(0),
            gas_used: r.gas_used as u64,
        }))
    }

    async fn transaction_by_hash(&self, tx_hash: &str) -> Result<Option<TxDetail>, EthClientError> {
        let hash = tx_hash
            .parse()
            .map_err(|e| EthClientError::InvalidTxHash(format!("Invalid tx hash: {}", e)))?;

        let tx = self
            .provider
            .get_transaction_by_hash(hash)
            .await
            .map_err(|e| EthClientError::RpcError(format!("Failed to get transaction: {}", e)))?;

        Ok(tx.map(|t| TxDetail {
            to: t.to().map(|addr| format!("{:?}", addr)),
            value: t.value(),
        }))
    }

    async fn block_number(&self) -> Result<u64, EthClientError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| EthClientError::RpcError(e.to_string()))
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, thiserror::Error)]
pub enum EthClientError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("Invalid transaction hash: {0}")]
    InvalidTxHash(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("RPC error: {0}")]
    RpcError(String),
}
