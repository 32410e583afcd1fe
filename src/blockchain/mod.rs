// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Chain-side helpers for the dashboard.
//!
//! This module provides functionality for:
//! - Known network constants (Sepolia, Ethereum mainnet)
//! - Resolving a payment's target network from loose hints
//! - Exact amount conversion to and from base units

pub mod network;
pub mod types;
pub mod units;

pub use network::{
    classify, resolve, resolve_payment, NetworkClassification, NetworkDescriptor, NetworkHints,
};
pub use types::*;
pub use units::{format_amount, parse_amount};
