// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Typed dashboard events.
//!
//! Components talk to each other through a broadcast channel instead of
//! shared globals. Each subscriber sees every event published after it
//! subscribed.
//!
//! ## Delayed navigation
//!
//! Redirects after a completed payment are scheduled on a background task
//! that races the delay against the page's `CancellationToken`, the same way
//! the background pollers race their interval against shutdown.

use std::fmt;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::blockchain::NetworkKind;
use crate::config::NetworkPreference;

const CHANNEL_CAPACITY: usize = 64;

/// Dashboard pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    ConfirmPayment(String),
    Success,
    LinkAccounts,
    Send,
    Receive,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("/"),
            Route::ConfirmPayment(id) => write!(f, "/confirm/{id}"),
            Route::Success => f.write_str("/success"),
            Route::LinkAccounts => f.write_str("/link-accounts"),
            Route::Send => f.write_str("/send"),
            Route::Receive => f.write_str("/receive"),
        }
    }
}

/// Header dropdowns. At most one is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    Network,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    /// The user picked another network in the header.
    NetworkChanged(NetworkKind),
    /// A dropdown opened; every other dropdown must close.
    MenuOpened(Menu),
    Navigate(Route),
}

/// Broadcast bus shared by all mounted components.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DashboardEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.sender.subscribe()
    }

    /// Publish to current subscribers. Returns how many received it.
    pub fn publish(&self, event: DashboardEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                debug!(event = ?event, "No subscribers for dashboard event");
                0
            }
        }
    }
}

/// Publish `Navigate(route)` after `delay` unless `shutdown` fires first.
///
/// The task resolves to `true` if the navigation was published.
pub fn schedule_navigation(
    bus: EventBus,
    route: Route,
    delay: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<bool> {
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(delay) => {
                info!(route = %route, "Redirecting");
                bus.publish(DashboardEvent::Navigate(route));
                true
            }
            _ = shutdown.cancelled() => {
                debug!(route = %route, "Redirect cancelled");
                false
            }
        }
    })
}

/// Header state: selected network plus the open dropdown, if any.
#[derive(Debug)]
pub struct Header {
    bus: EventBus,
    preference: NetworkPreference,
    open: Option<Menu>,
}

impl Header {
    pub fn new(bus: EventBus, preference: NetworkPreference) -> Self {
        Self {
            bus,
            preference,
            open: None,
        }
    }

    pub fn open_menu(&self) -> Option<Menu> {
        self.open
    }

    pub fn preference(&self) -> NetworkPreference {
        self.preference
    }

    /// Toggle `menu`. Opening it closes the other one.
    pub fn toggle(&mut self, menu: Menu) {
        if self.open == Some(menu) {
            self.open = None;
        } else {
            self.open = Some(menu);
            self.bus.publish(DashboardEvent::MenuOpened(menu));
        }
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    /// Switch network, close the network menu and announce the change.
    pub fn select_network(&mut self, network: NetworkKind) {
        self.open = None;
        if self.preference.network() == network {
            return;
        }
        self.preference = NetworkPreference(network);
        info!(network = %network, "Network changed");
        self.bus.publish(DashboardEvent::NetworkChanged(network));
    }

    /// React to an event published by another component.
    pub fn handle(&mut self, event: &DashboardEvent) {
        match event {
            DashboardEvent::MenuOpened(menu) if self.open.is_some_and(|open| open != *menu) => {
                self.open = None;
            }
            DashboardEvent::NetworkChanged(network) => {
                self.preference = NetworkPreference(*network);
            }
            DashboardEvent::Navigate(_) => self.open = None,
            _ => {}
        }
    }
}
