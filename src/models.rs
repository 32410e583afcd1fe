// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Data Models
//!
//! Wire types shared with the payment API and the wallet provider.
//!
//! ## Wallet Address Type
//!
//! The [`WalletAddress`] newtype wraps Ethereum-style addresses (0x-prefixed,
//! 40 hex characters). Comparisons between addresses coming from different
//! sources are always case-insensitive.
//!
//! ## Model Categories
//!
//! - **Payments**: records created by the Discord bot, and the confirmation
//!   payload sent back once a transfer went through
//! - **Wallet provider**: wallet handles, the signed-in user and the social
//!   accounts linked to it

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::blockchain::{parse_amount, NATIVE_DECIMALS};
use crate::error::DashboardError;

// =============================================================================
// Wallet Address Type
// =============================================================================

/// Ethereum-compatible wallet address wrapper.
///
/// Format: `0x` followed by 40 hexadecimal characters (20 bytes). Values
/// received from the bot or the wallet provider are kept verbatim; use
/// [`WalletAddress::parse`] to validate user input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WalletAddress(pub String);

impl WalletAddress {
    /// Validate an address typed by the user.
    pub fn parse(raw: &str) -> Result<Self, DashboardError> {
        let address = raw.trim();
        if address.is_empty() {
            return Err(DashboardError::InvalidAddress(
                "recipient address is required".to_string(),
            ));
        }
        if !address.starts_with("0x") {
            return Err(DashboardError::InvalidAddress(
                "address must start with 0x".to_string(),
            ));
        }
        if address.len() != 42 {
            return Err(DashboardError::InvalidAddress(
                "address must be 42 characters (0x + 40 hex)".to_string(),
            ));
        }
        if !address[2..].chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DashboardError::InvalidAddress(
                "address must contain only hex characters".to_string(),
            ));
        }
        Ok(Self(address.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, other: &WalletAddress) -> bool {
        self.0.trim().eq_ignore_ascii_case(other.0.trim())
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for WalletAddress {
    fn from(value: String) -> Self {
        WalletAddress(value)
    }
}

impl From<&str> for WalletAddress {
    fn from(value: &str) -> Self {
        WalletAddress(value.to_string())
    }
}

// =============================================================================
// Scalar helpers
// =============================================================================

/// Ids and amounts arrive either as JSON numbers or as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    Text(String),
}

impl NumberOrString {
    fn into_text(self) -> String {
        match self {
            NumberOrString::Number(n) => n.to_string(),
            NumberOrString::Text(s) => s,
        }
    }
}

/// Opaque Discord user id. Snowflakes may be sent as numbers or strings.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq, Hash)]
pub struct DiscordId(pub String);

impl<'de> Deserialize<'de> for DiscordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(DiscordId(NumberOrString::deserialize(deserializer)?.into_text()))
    }
}

impl fmt::Display for DiscordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Positive decimal amount in whole currency units, kept as exact text.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Amount(String);

impl Amount {
    pub fn parse(raw: &str) -> Result<Self, DashboardError> {
        let raw = raw.trim();
        // Amounts below one wei truncate to zero and are rejected with it.
        if parse_amount(raw, NATIVE_DECIMALS)?.is_zero() {
            return Err(DashboardError::InvalidAmount(
                "amount must be greater than zero".to_string(),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = NumberOrString::deserialize(deserializer)?.into_text();
        Amount::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Payment Models
// =============================================================================

/// Lifecycle of a payment request. Only ever moves forward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
}

/// A payment request created by the Discord bot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRecord {
    pub id: String,
    #[serde(default)]
    pub sender_id: DiscordId,
    pub sender_name: String,
    #[serde(default)]
    pub recipient_id: DiscordId,
    pub recipient_name: String,
    pub amount: Amount,
    pub currency: String,
    pub sender_wallet: WalletAddress,
    pub recipient_wallet: WalletAddress,
    #[serde(default)]
    pub sender_chain: String,
    #[serde(default)]
    pub recipient_chain: String,
    /// Explicit network key (`sepolia`, `mainnet`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
    /// Originating guild, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<serde_json::Value>,
    /// Originating channel, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<serde_json::Value>,
}

/// One side of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Party<'a> {
    pub id: &'a DiscordId,
    pub name: &'a str,
    pub wallet: &'a WalletAddress,
    pub chain: &'a str,
}

/// What an unauthenticated visitor may see about a payment.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PaymentSummary {
    pub sender_name: String,
    pub recipient_name: String,
    pub amount: String,
    pub currency: String,
}

impl PaymentRecord {
    pub fn sender(&self) -> Party<'_> {
        Party {
            id: &self.sender_id,
            name: &self.sender_name,
            wallet: &self.sender_wallet,
            chain: &self.sender_chain,
        }
    }

    pub fn recipient(&self) -> Party<'_> {
        Party {
            id: &self.recipient_id,
            name: &self.recipient_name,
            wallet: &self.recipient_wallet,
            chain: &self.recipient_chain,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == PaymentStatus::Completed
    }

    pub fn summary(&self) -> PaymentSummary {
        PaymentSummary {
            sender_name: self.sender_name.clone(),
            recipient_name: self.recipient_name.clone(),
            amount: self.amount.to_string(),
            currency: self.currency.clone(),
        }
    }

    /// Creation time, if the bot wrote a parseable timestamp.
    ///
    /// Timestamps without an offset are taken as UTC.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.timestamp.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Record a submitted transaction.
    ///
    /// The hash is written at most once. Repeating the same hash is accepted.
    pub fn mark_completed(&mut self, tx_hash: &str) -> Result<(), DashboardError> {
        if let Some(existing) = &self.transaction_hash {
            if existing != tx_hash {
                return Err(DashboardError::InvalidTransition(format!(
                    "payment {} already has transaction {existing}",
                    self.id
                )));
            }
        } else if self.is_completed() {
            return Err(DashboardError::InvalidTransition(format!(
                "payment {} is already completed",
                self.id
            )));
        }

        self.transaction_hash = Some(tx_hash.to_string());
        self.status = PaymentStatus::Completed;
        Ok(())
    }
}

/// Body of `POST /api/payment/{id}/confirm`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfirmPaymentRequest {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
    pub confirmed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executed_via: Option<String>,
}

/// Acknowledgement returned by the confirmation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfirmationAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentRecord>,
}

/// Response of the payment API health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: String,
}

// =============================================================================
// Wallet Provider Models
// =============================================================================

/// A wallet exposed by the wallet provider for the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletHandle {
    pub address: WalletAddress,
    /// Connector label assigned by the provider (`privy`, `metamask`, ...).
    pub wallet_client_type: String,
    /// CAIP-2 chain id, e.g. `eip155:11155111`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<String>,
}

/// An identity linked to the provider account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkedAccount {
    /// Provider account type (`discord_oauth`, `email`, `wallet`, ...).
    #[serde(rename = "type")]
    pub account_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}

/// The user signed in through the wallet provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderUser {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub linked_accounts: Vec<LinkedAccount>,
}
