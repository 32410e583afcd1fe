// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Network constants for the chains PayBot settles on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ethereum network configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Network name for display
    pub name: &'static str,
    /// Short name used in free-text chain labels
    pub short_name: &'static str,
    /// Explicit network key used by the payment API
    pub key: &'static str,
    /// Chain ID
    pub chain_id: u64,
    /// Native currency symbol
    pub currency: &'static str,
    /// Whether tokens on this network have no real value
    pub is_testnet: bool,
    /// Block explorer URL
    pub explorer_url: &'static str,
}

/// Sepolia Testnet configuration.
pub const SEPOLIA: NetworkConfig = NetworkConfig {
    name: "Sepolia Testnet",
    short_name: "Sepolia",
    key: "sepolia",
    chain_id: 11_155_111,
    currency: "SepoliaETH",
    is_testnet: true,
    explorer_url: "https://sepolia.etherscan.io",
};

/// Ethereum Mainnet configuration.
pub const ETHEREUM_MAINNET: NetworkConfig = NetworkConfig {
    name: "Ethereum Mainnet",
    short_name: "Ethereum",
    key: "mainnet",
    chain_id: 1,
    currency: "ETH",
    is_testnet: false,
    explorer_url: "https://etherscan.io",
};

/// CAIP-2 namespace for EVM chains, as used in wallet chain ids (`eip155:1`).
pub const EIP155_NAMESPACE: &str = "eip155";

/// Native token decimals on both supported networks.
pub const NATIVE_DECIMALS: u8 = 18;

/// One of the two networks the dashboard can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    #[default]
    Sepolia,
    Mainnet,
}

impl NetworkKind {
    pub const ALL: [NetworkKind; 2] = [NetworkKind::Sepolia, NetworkKind::Mainnet];

    pub fn config(self) -> &'static NetworkConfig {
        match self {
            NetworkKind::Sepolia => &SEPOLIA,
            NetworkKind::Mainnet => &ETHEREUM_MAINNET,
        }
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.config().chain_id == chain_id)
    }

    /// CAIP-2 chain reference handed to the wallet provider.
    pub fn caip2(self) -> String {
        format!("{EIP155_NAMESPACE}:{}", self.config().chain_id)
    }
}

impl fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config().key)
    }
}

impl FromStr for NetworkKind {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "sepolia" => Ok(NetworkKind::Sepolia),
            "mainnet" | "ethereum" => Ok(NetworkKind::Mainnet),
            other => Err(format!(
                "Unknown network `{other}` (expected `sepolia` or `mainnet`)"
            )),
        }
    }
}

/// Split a CAIP-2 chain id (`eip155:11155111`) into namespace and reference.
pub fn split_caip2(chain_id: &str) -> Option<(&str, &str)> {
    let (namespace, reference) = chain_id.trim().split_once(':')?;
    if namespace.is_empty() || reference.is_empty() {
        return None;
    }
    Some((namespace, reference))
}

/// Numeric EVM chain id from a CAIP-2 string, if it is an `eip155` chain.
pub fn evm_chain_id(chain_id: &str) -> Option<u64> {
    match split_caip2(chain_id)? {
        (EIP155_NAMESPACE, reference) => reference.parse().ok(),
        _ => None,
    }
}
