// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet provider seam.
//!
//! Key custody, signing, broadcasting and network switching all live in the
//! external wallet provider. The dashboard only sees the capability surface
//! below. Provider calls may suspend for as long as the user takes to approve
//! them in the provider's own UI.

use std::future::Future;

use alloy::primitives::U256;

use crate::accounts::SocialPlatform;
use crate::blockchain::{NetworkKind, EIP155_NAMESPACE};
use crate::models::{ProviderUser, WalletAddress, WalletHandle};

/// A native-token transfer handed to the provider for signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    /// Wallet expected to sign.
    pub from: WalletAddress,
    pub to: WalletAddress,
    /// Amount in wei.
    pub value: U256,
    pub chain_id: u64,
}

impl TransferRequest {
    pub fn new(from: WalletAddress, to: WalletAddress, value: U256, network: NetworkKind) -> Self {
        Self {
            from,
            to,
            value,
            chain_id: network.config().chain_id,
        }
    }

    /// CAIP-2 chain hint (`eip155:<id>`).
    pub fn chain(&self) -> String {
        format!("{EIP155_NAMESPACE}:{}", self.chain_id)
    }
}

/// Result of a broadcast transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub tx_hash: String,
}

/// Errors reported by the wallet provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("Transaction cancelled by user")]
    UserRejected,

    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("Network error, please check your connection and try again")]
    Network(String),

    #[error("Transaction fee could not be estimated")]
    GasEstimation(String),

    #[error("This account is already linked")]
    AlreadyLinked,

    #[error("Linking {0} is not available yet")]
    Unsupported(String),

    #[error("Error while sending the transaction")]
    Other(String),
}

impl ProviderError {
    /// Classify a raw provider error message.
    pub fn from_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("user rejected") || lower.contains("user denied") {
            ProviderError::UserRejected
        } else if lower.contains("insufficient funds") {
            ProviderError::InsufficientFunds
        } else if lower.contains("already linked") {
            ProviderError::AlreadyLinked
        } else if lower.contains("gas") || lower.contains("fee") {
            ProviderError::GasEstimation(message.to_string())
        } else if lower.contains("network")
            || lower.contains("timeout")
            || lower.contains("timed out")
            || lower.contains("connection")
        {
            ProviderError::Network(message.to_string())
        } else {
            ProviderError::Other(message.to_string())
        }
    }

    /// Raw provider detail, for logs.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ProviderError::Network(detail)
            | ProviderError::GasEstimation(detail)
            | ProviderError::Unsupported(detail)
            | ProviderError::Other(detail) => Some(detail),
            _ => None,
        }
    }
}

/// Capability surface of the wallet-as-a-service provider.
pub trait WalletProvider: Send + Sync {
    /// Provider name, reported to the payment API as `executed_via`.
    fn name(&self) -> &str;

    /// The signed-in user, if any.
    fn current_user(&self) -> Option<ProviderUser>;

    fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Wallets currently connected for the signed-in user.
    fn wallets(&self) -> Vec<WalletHandle>;

    fn login(&self) -> impl Future<Output = Result<ProviderUser, ProviderError>> + Send;

    fn logout(&self) -> impl Future<Output = Result<(), ProviderError>> + Send;

    fn link_account(
        &self,
        platform: SocialPlatform,
    ) -> impl Future<Output = Result<(), ProviderError>> + Send;

    /// Sign and broadcast a native transfer, returning its hash.
    fn transfer(
        &self,
        request: TransferRequest,
    ) -> impl Future<Output = Result<TransferReceipt, ProviderError>> + Send;
}
