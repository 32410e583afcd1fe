// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! External providers the dashboard delegates to.
//!
//! - `wallet` - wallet-as-a-service provider (authentication, wallets,
//!   account linking, transfer signing and broadcast)

pub mod wallet;

pub use wallet::{ProviderError, TransferReceipt, TransferRequest, WalletProvider};
