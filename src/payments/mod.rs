// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Payment flows: loading bot-created payments, executing them through the
//! wallet provider, and free-form sends from the wallet screen.

pub mod client;
pub mod executor;
pub mod loader;
pub mod send;

pub use client::PaymentApiClient;
pub use executor::{
    CompletedPayment, ConfirmationStatus, ExecutionOutcome, SkipReason, TransactionExecutor,
};
pub use loader::PaymentLoader;
pub use send::{send, SendReceipt, SendRequest};
