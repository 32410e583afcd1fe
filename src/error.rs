// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use reqwest::StatusCode;

use crate::providers::ProviderError;

/// Every failure the dashboard can surface to the user.
///
/// The `Display` text is the user-facing message; pages render it as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DashboardError {
    #[error("Missing payment identifier")]
    MissingIdentifier,

    #[error("Payment not found or expired")]
    NotFound,

    #[error("Payment request failed with status {status}")]
    RequestFailed { status: StatusCode },

    #[error("Could not reach the payment service: {0}")]
    Transport(String),

    #[error("Payment service returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("Sign in to continue")]
    NotAuthenticated,

    #[error("No wallet connected")]
    NoWallets,

    #[error("Sender wallet not found among your connected wallets")]
    SenderWalletNotFound,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("{0}")]
    Provider(#[from] ProviderError),

    #[error("Payment confirmation could not be recorded: {0}")]
    ConfirmationFailed(String),

    #[error("Invalid payment state: {0}")]
    InvalidTransition(String),

    #[error("A transaction is already being submitted")]
    AlreadyExecuting,

    #[error("Operation cancelled")]
    Cancelled,
}

impl DashboardError {
    pub fn request_failed(status: StatusCode) -> Self {
        if status == StatusCode::NOT_FOUND {
            Self::NotFound
        } else {
            Self::RequestFailed { status }
        }
    }

    /// Message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
