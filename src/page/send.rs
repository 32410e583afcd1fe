// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Send page: free-form transfers on the network selected in the header.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::{DashboardConfig, NetworkPreference};
use crate::error::DashboardError;
use crate::events::{schedule_navigation, DashboardEvent, EventBus, Route};
use crate::payments::{send, SendReceipt, SendRequest};
use crate::providers::WalletProvider;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendState {
    Idle,
    Sending,
    Sent(SendReceipt),
    Failed { message: String },
}

pub struct SendPage<P> {
    provider: Arc<P>,
    bus: EventBus,
    preference: NetworkPreference,
    redirect_delay: Duration,
    shutdown: CancellationToken,
    state: SendState,
    redirect: Option<JoinHandle<bool>>,
}

impl<P: WalletProvider> SendPage<P> {
    pub fn new(provider: Arc<P>, bus: EventBus, config: &DashboardConfig) -> Self {
        Self {
            provider,
            bus,
            preference: config.preferred_network,
            redirect_delay: config.send_redirect_delay,
            shutdown: CancellationToken::new(),
            state: SendState::Idle,
            redirect: None,
        }
    }

    pub fn state(&self) -> &SendState {
        &self.state
    }

    pub fn preference(&self) -> NetworkPreference {
        self.preference
    }

    /// Follow network switches made in the header.
    pub fn handle(&mut self, event: &DashboardEvent) {
        if let DashboardEvent::NetworkChanged(network) = event {
            self.preference = NetworkPreference(*network);
        }
    }

    pub fn unmount(&self) {
        self.shutdown.cancel();
    }

    pub fn take_redirect(&mut self) -> Option<JoinHandle<bool>> {
        self.redirect.take()
    }

    /// Validate and submit the form.
    pub async fn submit(&mut self, recipient: &str, amount: &str) -> Result<(), DashboardError> {
        if self.shutdown.is_cancelled() {
            return Err(DashboardError::Cancelled);
        }
        if self.state == SendState::Sending {
            return Err(DashboardError::AlreadyExecuting);
        }

        let request = SendRequest::new(recipient, amount, self.preference);
        self.state = SendState::Sending;

        let result = tokio::select! {
            result = send(self.provider.as_ref(), &request) => result,
            _ = self.shutdown.cancelled() => {
                debug!("Send page left during transfer");
                return Err(DashboardError::Cancelled);
            }
        };

        match result {
            Ok(receipt) => {
                self.state = SendState::Sent(receipt);
                self.redirect = Some(schedule_navigation(
                    self.bus.clone(),
                    Route::Success,
                    self.redirect_delay,
                    self.shutdown.clone(),
                ));
                Ok(())
            }
            Err(e) => {
                self.state = SendState::Failed {
                    message: e.user_message(),
                };
                Err(e)
            }
        }
    }
}
