// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! PayBot Dashboard - Payment confirmation client for the PayBot Discord bot
//!
//! The bot creates payment requests and sends users a link. This crate loads
//! those requests from the payment API, resolves the network they settle on,
//! executes them through an external wallet provider and reports completion.
//!
//! ## Modules
//!
//! - `payments` - Payment API client, loader, executor and direct sends
//! - `blockchain` - Network descriptors, classification and wei conversion
//! - `providers` - Wallet provider seam (auth, wallets, signing)
//! - `page` - Page state machines (confirmation, send, success)
//! - `events` - Typed broadcast events and delayed navigation
//! - `accounts` / `wallets` - Linked accounts and wallet overview helpers

pub mod accounts;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod page;
pub mod payments;
pub mod providers;
pub mod wallets;

#[cfg(test)]
pub(crate) mod testing;
