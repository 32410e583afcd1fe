// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Payment confirmation page.
//!
//! ```text
//! Loading ─┬─> Error
//!          ├─> AuthRequired ──login──> Confirmable
//!          ├─> Confirmable ──confirm──> Executing ─┬─> Completed ──(delay)──> /success
//!          │                                       └─> Error
//!          └─> Completed
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::blockchain::{resolve_payment, NetworkDescriptor};
use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::events::{schedule_navigation, EventBus, Route};
use crate::models::{PaymentRecord, PaymentSummary, WalletAddress};
use crate::payments::{ExecutionOutcome, PaymentApiClient, PaymentLoader, TransactionExecutor};
use crate::providers::WalletProvider;
use crate::wallets::{summarize, WalletSummary};

/// Everything the page shows for a pending payment.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentView {
    pub payment_id: String,
    pub summary: PaymentSummary,
    pub sender_wallet: WalletAddress,
    pub recipient_wallet: WalletAddress,
    pub sender_chain: String,
    pub recipient_chain: String,
    pub created_at: Option<DateTime<Utc>>,
    pub network: NetworkDescriptor,
    pub test_banner: bool,
    /// Whether the sender wallet is among the connected wallets.
    pub sender_connected: bool,
    pub wallets: Vec<WalletSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    Loading,
    Error {
        message: String,
    },
    /// Signed out: only the summary is shown, with a sign-in prompt.
    AuthRequired {
        summary: PaymentSummary,
    },
    Confirmable(PaymentView),
    Executing {
        payment_id: String,
    },
    Completed {
        tx_hash: Option<String>,
        explorer_url: Option<String>,
        network: NetworkDescriptor,
    },
}

pub struct PaymentPage<P> {
    provider: Arc<P>,
    loader: PaymentLoader,
    executor: TransactionExecutor,
    bus: EventBus,
    redirect_delay: Duration,
    shutdown: CancellationToken,
    payment: Option<PaymentRecord>,
    state: PageState,
    redirect: Option<JoinHandle<bool>>,
}

impl<P: WalletProvider> PaymentPage<P> {
    pub fn new(
        provider: Arc<P>,
        bus: EventBus,
        config: &DashboardConfig,
    ) -> Result<Self, DashboardError> {
        let client = PaymentApiClient::from_config(config)?;
        Ok(Self {
            provider,
            loader: PaymentLoader::new(client.clone()),
            executor: TransactionExecutor::new(client),
            bus,
            redirect_delay: config.confirm_redirect_delay,
            shutdown: CancellationToken::new(),
            payment: None,
            state: PageState::Loading,
            redirect: None,
        })
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn payment(&self) -> Option<&PaymentRecord> {
        self.payment.as_ref()
    }

    /// Token cancelled on unmount. Clones may be handed to a router.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Leave the page. Pending loads, transfers and redirects are abandoned.
    pub fn unmount(&self) {
        debug!("Payment page unmounted");
        self.shutdown.cancel();
    }

    /// The success redirect scheduled after completion, if any.
    pub fn take_redirect(&mut self) -> Option<JoinHandle<bool>> {
        self.redirect.take()
    }

    /// Load `payment_id` and derive the page state from it.
    pub async fn open(&mut self, payment_id: &str) -> Result<(), DashboardError> {
        if self.shutdown.is_cancelled() {
            return Err(DashboardError::Cancelled);
        }
        self.state = PageState::Loading;

        let loaded = tokio::select! {
            loaded = self.loader.load(payment_id) => loaded,
            _ = self.shutdown.cancelled() => {
                debug!(payment_id = %payment_id, "Payment load abandoned");
                return Err(DashboardError::Cancelled);
            }
        };

        match loaded {
            Ok(record) => {
                self.payment = Some(record);
                self.refresh();
                Ok(())
            }
            Err(e) => {
                self.payment = None;
                self.state = PageState::Error {
                    message: e.user_message(),
                };
                Err(e)
            }
        }
    }

    /// Re-derive the state from the loaded payment and the provider session.
    ///
    /// Call after the provider session or wallets change.
    pub fn refresh(&mut self) {
        let Some(record) = &self.payment else {
            return;
        };

        let network = resolve_payment(record);
        self.state = if record.is_completed() || record.transaction_hash.is_some() {
            PageState::Completed {
                explorer_url: record
                    .transaction_hash
                    .as_deref()
                    .map(|hash| network.transaction_url(hash)),
                tx_hash: record.transaction_hash.clone(),
                network,
            }
        } else if !self.provider.is_authenticated() {
            PageState::AuthRequired {
                summary: record.summary(),
            }
        } else {
            let wallets = self.provider.wallets();
            let sender_connected = wallets
                .iter()
                .any(|w| w.address.matches(&record.sender_wallet));
            PageState::Confirmable(PaymentView {
                payment_id: record.id.clone(),
                summary: record.summary(),
                sender_wallet: record.sender_wallet.clone(),
                recipient_wallet: record.recipient_wallet.clone(),
                sender_chain: record.sender_chain.clone(),
                recipient_chain: record.recipient_chain.clone(),
                created_at: record.created_at(),
                test_banner: network.shows_test_banner(),
                network,
                sender_connected,
                wallets: summarize(&wallets),
            })
        };
    }

    pub async fn login(&mut self) -> Result<(), DashboardError> {
        if self.shutdown.is_cancelled() {
            return Err(DashboardError::Cancelled);
        }

        let result = tokio::select! {
            result = self.provider.login() => result,
            _ = self.shutdown.cancelled() => return Err(DashboardError::Cancelled),
        };

        match result {
            Ok(user) => {
                info!(user_id = %user.id, "Signed in");
                self.refresh();
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Sign-in failed");
                Err(e.into())
            }
        }
    }

    pub async fn logout(&mut self) -> Result<(), DashboardError> {
        self.provider.logout().await?;
        self.refresh();
        Ok(())
    }

    /// Execute the loaded payment.
    ///
    /// Only acts from `Confirmable`. On success the page moves to
    /// `Completed` and schedules the redirect to the success page.
    pub async fn confirm(&mut self) -> Result<(), DashboardError> {
        if self.shutdown.is_cancelled() {
            return Err(DashboardError::Cancelled);
        }
        match &self.state {
            PageState::Confirmable(_) => {}
            PageState::Executing { .. } => return Err(DashboardError::AlreadyExecuting),
            _ => return Ok(()),
        }
        let Some(mut record) = self.payment.clone() else {
            return Ok(());
        };

        let payment_id = record.id.clone();
        self.state = PageState::Executing {
            payment_id: payment_id.clone(),
        };

        let outcome = tokio::select! {
            outcome = self.executor.execute(self.provider.as_ref(), &mut record) => outcome,
            _ = self.shutdown.cancelled() => {
                info!(payment_id = %payment_id, "Payment page left during execution");
                return Err(DashboardError::Cancelled);
            }
        };

        match outcome {
            Ok(ExecutionOutcome::Completed(done)) => {
                self.payment = Some(record);
                self.state = PageState::Completed {
                    tx_hash: Some(done.tx_hash),
                    explorer_url: Some(done.explorer_url),
                    network: done.network,
                };
                self.redirect = Some(schedule_navigation(
                    self.bus.clone(),
                    Route::Success,
                    self.redirect_delay,
                    self.shutdown.clone(),
                ));
                Ok(())
            }
            Ok(ExecutionOutcome::Skipped(reason)) => {
                debug!(reason = ?reason, "Execution skipped");
                self.refresh();
                Ok(())
            }
            Err(e) => {
                self.state = PageState::Error {
                    message: e.user_message(),
                };
                Err(e)
            }
        }
    }
}
