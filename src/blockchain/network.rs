// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Network resolution for payment records.
//!
//! Payments created by the bot carry up to three overlapping hints about the
//! target chain: an explicit network key, a numeric chain id, and free-text
//! chain labels such as `"Sepolia Testnet"`. The hints can disagree, so they
//! are folded into one [`NetworkClassification`]. Testnet rules are checked
//! first: a record that matches both sides is treated as a testnet payment and
//! always gets the test warning.

use serde::Serialize;

use super::types::{NetworkConfig, NetworkKind, ETHEREUM_MAINNET, SEPOLIA};
use crate::models::PaymentRecord;

/// Literal marker accepted in chain labels besides the testnet short name.
const TESTNET_MARKER: &str = "testnet";

/// Raw network hints taken from a payment record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkHints<'a> {
    pub network: Option<&'a str>,
    pub chain_id: Option<u64>,
    pub chain_labels: Vec<&'a str>,
}

impl<'a> From<&'a PaymentRecord> for NetworkHints<'a> {
    fn from(record: &'a PaymentRecord) -> Self {
        Self {
            network: record.network.as_deref(),
            chain_id: record.chain_id,
            chain_labels: [record.sender_chain.as_str(), record.recipient_chain.as_str()]
                .into_iter()
                .filter(|label| !label.trim().is_empty())
                .collect(),
        }
    }
}

impl NetworkHints<'_> {
    fn network_is(&self, config: &NetworkConfig) -> bool {
        self.network
            .is_some_and(|network| network.trim().eq_ignore_ascii_case(config.key))
    }

    fn any_label(&self, predicate: impl Fn(&str) -> bool) -> bool {
        self.chain_labels
            .iter()
            .map(|label| label.to_lowercase())
            .any(|label| predicate(&label))
    }

    fn is_testnet(&self) -> bool {
        let short_name = SEPOLIA.short_name.to_lowercase();
        self.network_is(&SEPOLIA)
            || self.chain_id == Some(SEPOLIA.chain_id)
            || self.any_label(|label| label.contains(&short_name) || label.contains(TESTNET_MARKER))
    }

    fn is_mainnet(&self) -> bool {
        let mainnet_name = ETHEREUM_MAINNET.short_name.to_lowercase();
        let testnet_name = SEPOLIA.short_name.to_lowercase();
        (self.network_is(&ETHEREUM_MAINNET) && self.chain_id == Some(ETHEREUM_MAINNET.chain_id))
            || self.chain_id == Some(ETHEREUM_MAINNET.chain_id)
            || self.any_label(|label| label.contains(&mainnet_name) && !label.contains(&testnet_name))
    }
}

/// Single, unambiguous verdict about where a payment settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkClassification {
    Testnet,
    Mainnet,
    /// No hint matched; treated as the testnet for display and transfers.
    Unrecognized,
}

impl NetworkClassification {
    pub fn kind(self) -> NetworkKind {
        match self {
            NetworkClassification::Mainnet => NetworkKind::Mainnet,
            NetworkClassification::Testnet | NetworkClassification::Unrecognized => {
                NetworkKind::Sepolia
            }
        }
    }
}

/// Classify the hints. Testnet rules win over mainnet rules.
pub fn classify(hints: &NetworkHints<'_>) -> NetworkClassification {
    if hints.is_testnet() {
        NetworkClassification::Testnet
    } else if hints.is_mainnet() {
        NetworkClassification::Mainnet
    } else {
        NetworkClassification::Unrecognized
    }
}

/// Display metadata derived from a classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkDescriptor {
    pub classification: NetworkClassification,
    pub kind: NetworkKind,
    pub name: &'static str,
    pub chain_id: u64,
    pub is_testnet: bool,
    pub explorer_url: &'static str,
}

impl NetworkDescriptor {
    pub fn for_classification(classification: NetworkClassification) -> Self {
        let kind = classification.kind();
        let config = kind.config();
        Self {
            classification,
            kind,
            name: config.name,
            chain_id: config.chain_id,
            is_testnet: config.is_testnet,
            explorer_url: config.explorer_url,
        }
    }

    /// Explorer link for a transaction on this network.
    pub fn transaction_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url, tx_hash)
    }

    /// Whether pages must show the "test tokens have no value" warning.
    pub fn shows_test_banner(&self) -> bool {
        self.classification == NetworkClassification::Testnet
    }
}

/// Resolve the network descriptor for a set of hints.
pub fn resolve(hints: &NetworkHints<'_>) -> NetworkDescriptor {
    NetworkDescriptor::for_classification(classify(hints))
}

/// Resolve the network descriptor for a payment record.
pub fn resolve_payment(record: &PaymentRecord) -> NetworkDescriptor {
    resolve(&NetworkHints::from(record))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints<'a>(
        network: Option<&'a str>,
        chain_id: Option<u64>,
        labels: &[&'a str],
    ) -> NetworkHints<'a> {
        NetworkHints {
            network,
            chain_id,
            chain_labels: labels.to_vec(),
        }
    }

    #[test]
    fn equivalent_testnet_encodings_resolve_identically() {
        let by_key = resolve(&hints(Some("sepolia"), None, &[]));
        let by_chain_id = resolve(&hints(None, Some(11_155_111), &[]));
        let by_label = resolve(&hints(None, None, &["Sepolia Testnet"]));

        assert_eq!(by_key, by_chain_id);
        assert_eq!(by_chain_id, by_label);
        assert_eq!(by_key.classification, NetworkClassification::Testnet);
        assert_eq!(by_key.name, "Sepolia Testnet");
        assert_eq!(by_key.chain_id, 11_155_111);
        assert_eq!(by_key.explorer_url, "https://sepolia.etherscan.io");
        assert!(by_key.shows_test_banner());
    }

    #[test]
    fn generic_testnet_marker_is_recognised() {
        let descriptor = resolve(&hints(None, None, &["Some TESTNET chain"]));
        assert_eq!(descriptor.classification, NetworkClassification::Testnet);
    }

    #[test]
    fn mainnet_by_chain_id_or_label() {
        for h in [
            hints(Some("mainnet"), Some(1), &[]),
            hints(None, Some(1), &[]),
            hints(None, None, &["Ethereum Mainnet"]),
        ] {
            let descriptor = resolve(&h);
            assert_eq!(descriptor.classification, NetworkClassification::Mainnet);
            assert_eq!(descriptor.chain_id, 1);
            assert_eq!(descriptor.explorer_url, "https://etherscan.io");
            assert!(!descriptor.is_testnet);
            assert!(!descriptor.shows_test_banner());
        }
    }

    #[test]
    fn ethereum_label_mentioning_sepolia_is_not_mainnet() {
        let descriptor = resolve(&hints(None, None, &["Ethereum Sepolia"]));
        assert_eq!(descriptor.classification, NetworkClassification::Testnet);
    }

    #[test]
    fn conflicting_hints_resolve_to_testnet() {
        let descriptor = resolve(&hints(Some("sepolia"), Some(1), &["Ethereum Mainnet"]));
        assert_eq!(descriptor.classification, NetworkClassification::Testnet);
        assert_eq!(descriptor.chain_id, 11_155_111);
        assert!(descriptor.shows_test_banner());
    }

    #[test]
    fn mainnet_key_without_chain_id_is_unrecognised() {
        let descriptor = resolve(&hints(Some("mainnet"), None, &[]));
        assert_eq!(descriptor.classification, NetworkClassification::Unrecognized);
        assert_eq!(descriptor.kind, NetworkKind::Sepolia);
    }

    #[test]
    fn missing_hints_default_to_testnet_descriptor_without_banner() {
        let descriptor = resolve(&NetworkHints::default());
        assert_eq!(descriptor.classification, NetworkClassification::Unrecognized);
        assert_eq!(descriptor.name, "Sepolia Testnet");
        assert!(descriptor.is_testnet);
        assert!(!descriptor.shows_test_banner());
    }

    #[test]
    fn transaction_url_uses_explorer_base() {
        let descriptor = NetworkDescriptor::for_classification(NetworkClassification::Mainnet);
        assert_eq!(
            descriptor.transaction_url("0xdeadbeef"),
            "https://etherscan.io/tx/0xdeadbeef"
        );
    }
}
