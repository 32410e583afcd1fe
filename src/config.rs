// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the dashboard. Configuration is loaded from the environment
//! once at startup and injected into the components that need it.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `PAYMENT_API_URL` | Base URL of the payment API | `http://localhost:5000` |
//! | `PREFERRED_NETWORK` | Network preselected for sends (`sepolia` or `mainnet`) | `sepolia` |
//! | `HTTP_TIMEOUT_SECS` | Timeout applied by the HTTP client | `15` |
//! | `CONFIRM_REDIRECT_DELAY_MS` | Delay before leaving a completed payment | `2000` |
//! | `SEND_REDIRECT_DELAY_MS` | Delay before leaving a completed direct send | `3000` |
//! | `SUCCESS_REDIRECT_DELAY_MS` | Delay before the success page returns home | `5000` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::time::Duration;

use url::Url;

use crate::blockchain::NetworkKind;

/// Environment variable name for the payment API base URL.
pub const PAYMENT_API_URL_ENV: &str = "PAYMENT_API_URL";

/// Environment variable name for the preferred network.
///
/// Replaces the "selected network" the browser used to keep in local storage.
pub const PREFERRED_NETWORK_ENV: &str = "PREFERRED_NETWORK";

pub const HTTP_TIMEOUT_SECS_ENV: &str = "HTTP_TIMEOUT_SECS";
pub const CONFIRM_REDIRECT_DELAY_MS_ENV: &str = "CONFIRM_REDIRECT_DELAY_MS";
pub const SEND_REDIRECT_DELAY_MS_ENV: &str = "SEND_REDIRECT_DELAY_MS";
pub const SUCCESS_REDIRECT_DELAY_MS_ENV: &str = "SUCCESS_REDIRECT_DELAY_MS";

/// Logging format selector (`json` or `pretty`).
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_PAYMENT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_CONFIRM_REDIRECT_DELAY: Duration = Duration::from_millis(2000);
pub const DEFAULT_SEND_REDIRECT_DELAY: Duration = Duration::from_millis(3000);
pub const DEFAULT_SUCCESS_REDIRECT_DELAY: Duration = Duration::from_millis(5000);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid URL in {name}: {reason}")]
    InvalidUrl { name: &'static str, reason: String },

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Network the user wants to send on unless a payment says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NetworkPreference(pub NetworkKind);

impl NetworkPreference {
    pub fn network(self) -> NetworkKind {
        self.0
    }
}

/// Dashboard configuration, built once and passed down explicitly.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub payment_api_url: Url,
    pub preferred_network: NetworkPreference,
    pub http_timeout: Duration,
    pub confirm_redirect_delay: Duration,
    pub send_redirect_delay: Duration,
    pub success_redirect_delay: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            payment_api_url: Url::parse(DEFAULT_PAYMENT_API_URL)
                .expect("default payment API URL is valid"),
            preferred_network: NetworkPreference::default(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            confirm_redirect_delay: DEFAULT_CONFIRM_REDIRECT_DELAY,
            send_redirect_delay: DEFAULT_SEND_REDIRECT_DELAY,
            success_redirect_delay: DEFAULT_SUCCESS_REDIRECT_DELAY,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let payment_api_url = match get(PAYMENT_API_URL_ENV) {
            Some(raw) => Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl {
                name: PAYMENT_API_URL_ENV,
                reason: e.to_string(),
            })?,
            None => defaults.payment_api_url,
        };

        let preferred_network = match get(PREFERRED_NETWORK_ENV) {
            Some(raw) => NetworkPreference(raw.parse().map_err(|reason| {
                ConfigError::InvalidValue {
                    name: PREFERRED_NETWORK_ENV,
                    reason,
                }
            })?),
            None => defaults.preferred_network,
        };

        let millis = |name: &'static str, default: Duration| -> Result<Duration, ConfigError> {
            match get(name) {
                Some(raw) => raw
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|e| ConfigError::InvalidValue {
                        name,
                        reason: e.to_string(),
                    }),
                None => Ok(default),
            }
        };

        let http_timeout = match get(HTTP_TIMEOUT_SECS_ENV) {
            Some(raw) => raw
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| ConfigError::InvalidValue {
                    name: HTTP_TIMEOUT_SECS_ENV,
                    reason: e.to_string(),
                })?,
            None => defaults.http_timeout,
        };

        Ok(Self {
            payment_api_url,
            preferred_network,
            http_timeout,
            confirm_redirect_delay: millis(
                CONFIRM_REDIRECT_DELAY_MS_ENV,
                defaults.confirm_redirect_delay,
            )?,
            send_redirect_delay: millis(SEND_REDIRECT_DELAY_MS_ENV, defaults.send_redirect_delay)?,
            success_redirect_delay: millis(
                SUCCESS_REDIRECT_DELAY_MS_ENV,
                defaults.success_redirect_delay,
            )?,
        })
    }
}
