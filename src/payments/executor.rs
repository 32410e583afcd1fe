// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Execution of a bot-created payment through the wallet provider.
//!
//! The transfer is signed and broadcast by the provider. Once it returns a
//! hash the payment is completed locally, then reported to the payment API.
//! A failed report never undoes the local completion because the transfer is
//! already on chain.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::blockchain::{parse_amount, resolve_payment, NetworkDescriptor, NATIVE_DECIMALS};
use crate::error::DashboardError;
use crate::models::{ConfirmPaymentRequest, ConfirmationAck, PaymentRecord};
use crate::providers::{TransferRequest, WalletProvider};

use super::client::PaymentApiClient;

/// Why an execution request did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyCompleted,
    /// Pending, but a transaction hash is already recorded.
    AlreadySubmitted,
    NotAuthenticated,
    NoWallets,
}

/// Result of reporting a completed transfer to the payment API.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmationStatus {
    Recorded(ConfirmationAck),
    /// The API call failed; the payment stays completed locally.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletedPayment {
    pub tx_hash: String,
    pub explorer_url: String,
    pub network: NetworkDescriptor,
    pub confirmation: ConfirmationStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    Skipped(SkipReason),
    Completed(CompletedPayment),
}

/// Clears the in-flight flag when an execution ends or is dropped.
struct InFlight(Arc<AtomicBool>);

impl InFlight {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag.clone()))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs payments through a wallet provider, one at a time.
#[derive(Debug, Clone)]
pub struct TransactionExecutor {
    client: PaymentApiClient,
    in_flight: Arc<AtomicBool>,
}

impl TransactionExecutor {
    pub fn new(client: PaymentApiClient) -> Self {
        Self {
            client,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_executing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Execute `record` with the provider's wallet matching its sender.
    ///
    /// `record` is only modified once the provider has returned a hash.
    pub async fn execute<P: WalletProvider>(
        &self,
        provider: &P,
        record: &mut PaymentRecord,
    ) -> Result<ExecutionOutcome, DashboardError> {
        if record.is_completed() {
            return Ok(ExecutionOutcome::Skipped(SkipReason::AlreadyCompleted));
        }
        if let Some(tx_hash) = &record.transaction_hash {
            warn!(payment_id = %record.id, tx_hash = %tx_hash, "Payment already has a transaction");
            return Ok(ExecutionOutcome::Skipped(SkipReason::AlreadySubmitted));
        }
        let Some(user) = provider.current_user() else {
            return Ok(ExecutionOutcome::Skipped(SkipReason::NotAuthenticated));
        };
        let wallets = provider.wallets();
        if wallets.is_empty() {
            return Ok(ExecutionOutcome::Skipped(SkipReason::NoWallets));
        }

        let _guard = InFlight::acquire(&self.in_flight).ok_or(DashboardError::AlreadyExecuting)?;

        let sender = wallets
            .iter()
            .find(|w| w.address.matches(&record.sender_wallet))
            .ok_or_else(|| {
                warn!(
                    payment_id = %record.id,
                    sender_wallet = %record.sender_wallet,
                    connected = wallets.len(),
                    "Sender wallet not connected"
                );
                DashboardError::SenderWalletNotFound
            })?;

        let value = parse_amount(record.amount.as_str(), NATIVE_DECIMALS)?;
        let network = resolve_payment(record);

        let request = TransferRequest {
            from: sender.address.clone(),
            to: record.recipient_wallet.clone(),
            value,
            chain_id: network.chain_id,
        };

        info!(
            payment_id = %record.id,
            from = %request.from,
            to = %request.to,
            value = %value,
            chain = %request.chain(),
            classification = ?network.classification,
            provider = provider.name(),
            "Submitting payment transfer"
        );

        let receipt = provider.transfer(request).await.map_err(|e| {
            warn!(payment_id = %record.id, error = %e, detail = ?e.detail(), "Transfer failed");
            DashboardError::Provider(e)
        })?;

        record.mark_completed(&receipt.tx_hash)?;
        info!(payment_id = %record.id, tx_hash = %receipt.tx_hash, "Transfer submitted");

        let confirmation = ConfirmPaymentRequest {
            user_id: user.id.clone(),
            transaction_hash: Some(receipt.tx_hash.clone()),
            confirmed_at: Utc::now(),
            wallet_type: Some(sender.wallet_client_type.clone()),
            executed_via: Some(provider.name().to_string()),
        };

        let confirmation = match self.client.confirm_payment(&record.id, &confirmation).await {
            Ok(ack) => ConfirmationStatus::Recorded(ack),
            Err(e) => {
                warn!(
                    payment_id = %record.id,
                    tx_hash = %receipt.tx_hash,
                    error = %e,
                    "Payment API did not record the confirmation"
                );
                ConfirmationStatus::Failed(e.to_string())
            }
        };

        Ok(ExecutionOutcome::Completed(CompletedPayment {
            explorer_url: network.transaction_url(&receipt.tx_hash),
            tx_hash: receipt.tx_hash,
            network,
            confirmation,
        }))
    }
}
