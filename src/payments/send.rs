// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Free-form native transfers started from the wallet screen.

use alloy::primitives::U256;
use tracing::{info, warn};

use crate::blockchain::{format_amount, parse_amount, NetworkKind, NATIVE_DECIMALS};
use crate::config::NetworkPreference;
use crate::error::DashboardError;
use crate::models::{Amount, WalletAddress};
use crate::providers::{TransferRequest, WalletProvider};

/// User input from the send form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    pub recipient: String,
    pub amount: String,
    pub network: NetworkKind,
}

impl SendRequest {
    pub fn new(
        recipient: impl Into<String>,
        amount: impl Into<String>,
        preference: NetworkPreference,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            amount: amount.into(),
            network: preference.network(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    pub tx_hash: String,
    pub explorer_url: String,
    pub from: WalletAddress,
    pub to: WalletAddress,
    pub value: U256,
    pub network: NetworkKind,
}

fn validate(request: &SendRequest) -> Result<(WalletAddress, Amount), DashboardError> {
    let to = WalletAddress::parse(&request.recipient)?;
    let amount = Amount::parse(&request.amount)?;
    Ok((to, amount))
}

/// Send `request.amount` of the native token from the first connected wallet.
pub async fn send<P: WalletProvider>(
    provider: &P,
    request: &SendRequest,
) -> Result<SendReceipt, DashboardError> {
    if !provider.is_authenticated() {
        return Err(DashboardError::NotAuthenticated);
    }

    let (to, amount) = validate(request)?;

    let from = provider
        .wallets()
        .into_iter()
        .next()
        .map(|w| w.address)
        .ok_or(DashboardError::NoWallets)?;

    let value = parse_amount(amount.as_str(), NATIVE_DECIMALS)?;
    let transfer = TransferRequest::new(from.clone(), to.clone(), value, request.network);

    info!(
        from = %from,
        to = %to,
        amount = %format_amount(value, NATIVE_DECIMALS),
        chain = %transfer.chain(),
        "Submitting direct transfer"
    );

    let receipt = provider.transfer(transfer).await.map_err(|e| {
        warn!(to = %to, error = %e, detail = ?e.detail(), "Direct transfer failed");
        DashboardError::Provider(e)
    })?;

    let config = request.network.config();
    Ok(SendReceipt {
        explorer_url: format!("{}/tx/{}", config.explorer_url, receipt.tx_hash),
        tx_hash: receipt.tx_hash,
        from,
        to,
        value,
        network: request.network,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderError;
    use crate::testing::{sepolia_wallet, FakeWalletProvider, RECIPIENT_WALLET, SENDER_WALLET, TX_HASH};

    fn provider() -> FakeWalletProvider {
        FakeWalletProvider::signed_in(vec![sepolia_wallet(SENDER_WALLET)])
    }

    fn request(recipient: &str, amount: &str) -> SendRequest {
        SendRequest::new(recipient, amount, NetworkPreference::default())
    }

    #[tokio::test]
    async fn sends_on_preferred_network() {
        let provider = provider();
        let receipt = send(&provider, &request(RECIPIENT_WALLET, "0.25"))
            .await
            .unwrap();

        assert_eq!(receipt.tx_hash, TX_HASH);
        assert_eq!(receipt.network, NetworkKind::Sepolia);
        assert_eq!(
            receipt.explorer_url,
            format!("https://sepolia.etherscan.io/tx/{TX_HASH}")
        );
        assert_eq!(receipt.value, U256::from(250_000_000_000_000_000_u128));

        let transfers = provider.transfers();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].chain_id, 11_155_111);
        assert_eq!(transfers[0].from.as_str(), SENDER_WALLET);
    }

    #[tokio::test]
    async fn mainnet_preference_targets_chain_1() {
        let provider = provider();
        let req = SendRequest::new(RECIPIENT_WALLET, "1", NetworkPreference(NetworkKind::Mainnet));
        let receipt = send(&provider, &req).await.unwrap();
        assert!(receipt.explorer_url.starts_with("https://etherscan.io/tx/"));
        assert_eq!(provider.transfers()[0].chain_id, 1);
    }

    #[tokio::test]
    async fn validation_runs_before_any_transfer() {
        let provider = provider();
        let cases = [
            ("", "1"),
            ("   ", "1"),
            ("0x1234", "1"),
            ("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb", "1"),
        ];
        for (recipient, amount) in cases {
            let err = send(&provider, &request(recipient, amount)).await.unwrap_err();
            assert!(matches!(err, DashboardError::InvalidAddress(_)), "{recipient:?}: {err:?}");
        }
        for amount in ["", "0", "0.000", "-1", "abc", "0.0000000000000000001", "1e-30"] {
            let err = send(&provider, &request(RECIPIENT_WALLET, amount))
                .await
                .unwrap_err();
            assert!(matches!(err, DashboardError::InvalidAmount(_)), "{amount:?}: {err:?}");
        }
        assert!(provider.transfers().is_empty());
    }

    #[tokio::test]
    async fn requires_authentication_and_a_wallet() {
        let signed_out = FakeWalletProvider::signed_out(vec![sepolia_wallet(SENDER_WALLET)]);
        assert_eq!(
            send(&signed_out, &request(RECIPIENT_WALLET, "1")).await,
            Err(DashboardError::NotAuthenticated)
        );

        let no_wallets = FakeWalletProvider::signed_in(vec![]);
        assert_eq!(
            send(&no_wallets, &request(RECIPIENT_WALLET, "1")).await,
            Err(DashboardError::NoWallets)
        );
    }

    #[tokio::test]
    async fn provider_errors_are_surfaced() {
        let provider = provider().with_transfer_error(ProviderError::InsufficientFunds);
        let err = send(&provider, &request(RECIPIENT_WALLET, "1")).await.unwrap_err();
        assert_eq!(err, DashboardError::Provider(ProviderError::InsufficientFunds));
    }
}
