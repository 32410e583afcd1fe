// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet overview and receive views.

use serde::Serialize;

use crate::blockchain::{evm_chain_id, split_caip2, NetworkKind, EIP155_NAMESPACE, SEPOLIA};
use crate::models::WalletHandle;

/// Coarse chain family of a wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChainFamily {
    Ethereum,
    Solana,
    Other,
}

pub fn chain_family(chain_id: Option<&str>) -> ChainFamily {
    match chain_id.and_then(split_caip2) {
        Some((EIP155_NAMESPACE, _)) | None => ChainFamily::Ethereum,
        Some(("solana", _)) => ChainFamily::Solana,
        Some(_) => ChainFamily::Other,
    }
}

/// Human label for the network a wallet is connected to.
pub fn network_label(chain_id: Option<&str>) -> String {
    let Some(raw) = chain_id.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return "Ethereum".to_string();
    };
    match evm_chain_id(raw).and_then(NetworkKind::from_chain_id) {
        Some(kind) => kind.config().name.to_string(),
        None => format!("Chain {raw}"),
    }
}

/// Whether the wallet sits on the test network.
pub fn is_testnet_wallet(chain_id: Option<&str>) -> bool {
    chain_id.is_some_and(|raw| raw.contains(&SEPOLIA.chain_id.to_string()))
}

/// Network a wallet receives on. Unknown chains fall back to Sepolia.
pub fn receive_network(chain_id: Option<&str>) -> NetworkKind {
    chain_id
        .and_then(evm_chain_id)
        .and_then(NetworkKind::from_chain_id)
        .unwrap_or_default()
}

/// One wallet card on the overview page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WalletSummary {
    pub address: String,
    pub wallet_client_type: String,
    pub family: ChainFamily,
    pub network: String,
    pub testnet_badge: bool,
}

impl From<&WalletHandle> for WalletSummary {
    fn from(wallet: &WalletHandle) -> Self {
        let chain_id = wallet.chain_id.as_deref();
        Self {
            address: wallet.address.to_string(),
            wallet_client_type: wallet.wallet_client_type.clone(),
            family: chain_family(chain_id),
            network: network_label(chain_id),
            testnet_badge: is_testnet_wallet(chain_id),
        }
    }
}

pub fn summarize(wallets: &[WalletHandle]) -> Vec<WalletSummary> {
    wallets.iter().map(WalletSummary::from).collect()
}

/// Wallet and network preselected on the receive page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiveTarget<'a> {
    pub wallet: &'a WalletHandle,
    pub network: NetworkKind,
}

/// The first connected wallet is preselected.
pub fn default_receive_target(wallets: &[WalletHandle]) -> Option<ReceiveTarget<'_>> {
    wallets.first().map(|wallet| ReceiveTarget {
        wallet,
        network: receive_network(wallet.chain_id.as_deref()),
    })
}
