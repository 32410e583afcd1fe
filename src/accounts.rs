// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Social accounts linked to the wallet provider account.

use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::models::{LinkedAccount, ProviderUser};
use crate::providers::{ProviderError, WalletProvider};

/// Platforms shown on the "link accounts" page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Google,
    Custom,
    Discord,
    Email,
    Farcaster,
    Github,
    Linkedin,
    Phone,
    Tiktok,
    Line,
    Twitter,
    Wallet,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 12] = [
        SocialPlatform::Google,
        SocialPlatform::Custom,
        SocialPlatform::Discord,
        SocialPlatform::Email,
        SocialPlatform::Farcaster,
        SocialPlatform::Github,
        SocialPlatform::Linkedin,
        SocialPlatform::Phone,
        SocialPlatform::Tiktok,
        SocialPlatform::Line,
        SocialPlatform::Twitter,
        SocialPlatform::Wallet,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            SocialPlatform::Google => "Google",
            SocialPlatform::Custom => "Custom Auth",
            SocialPlatform::Discord => "Discord",
            SocialPlatform::Email => "Email",
            SocialPlatform::Farcaster => "Farcaster",
            SocialPlatform::Github => "GitHub",
            SocialPlatform::Linkedin => "LinkedIn",
            SocialPlatform::Phone => "Phone",
            SocialPlatform::Tiktok => "TikTok",
            SocialPlatform::Line => "Line",
            SocialPlatform::Twitter => "Twitter (X)",
            SocialPlatform::Wallet => "Crypto Wallet",
        }
    }

    /// Provider account type backing this platform, if the provider supports it.
    pub fn account_type(self) -> Option<&'static str> {
        match self {
            SocialPlatform::Discord => Some("discord_oauth"),
            SocialPlatform::Github => Some("github_oauth"),
            SocialPlatform::Twitter => Some("twitter_oauth"),
            SocialPlatform::Google => Some("google_oauth"),
            SocialPlatform::Email => Some("email"),
            SocialPlatform::Phone => Some("phone"),
            SocialPlatform::Wallet => Some("wallet"),
            _ => None,
        }
    }

    pub fn is_linkable(self) -> bool {
        self.account_type().is_some()
    }
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// What is shown for a connected platform.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ConnectedAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl ConnectedAccount {
    fn from_linked(account: &LinkedAccount) -> Self {
        match account.account_type.as_str() {
            "wallet" => Self {
                address: account.address.clone(),
                ..Self::default()
            },
            "email" => Self {
                email: account.address.clone().or_else(|| account.email.clone()),
                ..Self::default()
            },
            "phone" => Self {
                address: account.number.clone(),
                ..Self::default()
            },
            _ => Self {
                username: account.username.clone().or_else(|| account.subject.clone()),
                email: account.email.clone(),
                address: None,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlatformStatus {
    pub platform: SocialPlatform,
    pub connected: Option<ConnectedAccount>,
}

impl PlatformStatus {
    pub fn is_connected(&self) -> bool {
        self.connected.is_some()
    }
}

/// Connection status of every platform for the given user.
pub fn platform_statuses(user: &ProviderUser) -> Vec<PlatformStatus> {
    SocialPlatform::ALL
        .into_iter()
        .map(|platform| {
            let connected = platform.account_type().and_then(|account_type| {
                user.linked_accounts
                    .iter()
                    .find(|account| account.account_type == account_type)
                    .map(ConnectedAccount::from_linked)
            });
            PlatformStatus {
                platform,
                connected,
            }
        })
        .collect()
}

pub fn connected_count(statuses: &[PlatformStatus]) -> usize {
    statuses.iter().filter(|s| s.is_connected()).count()
}

/// Label for a linked account in the user menu.
fn account_label(account: &LinkedAccount) -> Option<String> {
    match account.account_type.as_str() {
        "google_oauth" => account.email.clone().or_else(|| account.subject.clone()),
        "email" => account.address.clone().or_else(|| account.email.clone()),
        "phone" => account.number.clone(),
        "wallet" => account.address.clone(),
        _ => account.username.clone().or_else(|| account.subject.clone()),
    }
}

/// Name shown for the signed-in user: email, phone, first linked account.
pub fn display_name(user: &ProviderUser) -> String {
    user.email
        .clone()
        .or_else(|| user.phone.clone())
        .or_else(|| user.linked_accounts.first().and_then(account_label))
        .unwrap_or_else(|| "User".to_string())
}

/// Link a platform through the provider.
///
/// Platforms the provider cannot link fail with [`ProviderError::Unsupported`]
/// without calling it.
pub async fn link_platform<P: WalletProvider>(
    provider: &P,
    platform: SocialPlatform,
) -> Result<(), ProviderError> {
    if !platform.is_linkable() {
        return Err(ProviderError::Unsupported(platform.display_name().to_string()));
    }

    match provider.link_account(platform).await {
        Ok(()) => {
            info!(platform = %platform, "Account linked");
            Ok(())
        }
        Err(e) => {
            warn!(platform = %platform, error = %e, "Account linking failed");
            Err(e)
        }
    }
}
