// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Page controllers.
//!
//! A page owns its state and a `CancellationToken`. Unmounting cancels the
//! token: in-flight work is abandoned and nothing it would have produced is
//! applied to the page afterwards.

pub mod payment;
pub mod send;

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::DashboardConfig;
use crate::events::{schedule_navigation, EventBus, Route};

pub use payment::{PageState, PaymentPage, PaymentView};
pub use send::{SendPage, SendState};

/// Landing page after a successful payment; returns home after a delay.
#[derive(Debug)]
pub struct SuccessPage {
    shutdown: CancellationToken,
    redirect: JoinHandle<bool>,
}

impl SuccessPage {
    pub fn mount(bus: EventBus, config: &DashboardConfig) -> Self {
        Self::mount_with_delay(bus, config.success_redirect_delay)
    }

    pub fn mount_with_delay(bus: EventBus, delay: Duration) -> Self {
        let shutdown = CancellationToken::new();
        let redirect = schedule_navigation(bus, Route::Home, delay, shutdown.clone());
        Self { shutdown, redirect }
    }

    /// Leave the page; the pending redirect is dropped.
    pub fn unmount(&self) {
        self.shutdown.cancel();
    }

    /// Wait for the redirect task. `true` if it navigated home.
    pub async fn finished(self) -> bool {
        self.redirect.await.unwrap_or(false)
    }
}
