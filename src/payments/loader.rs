// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use tracing::{debug, info, warn};

use crate::error::DashboardError;
use crate::models::PaymentRecord;

use super::client::PaymentApiClient;

/// Fetches a payment at most once per identifier.
///
/// The outcome of the last fetch, success or failure, is kept until a
/// different identifier is requested.
#[derive(Debug)]
pub struct PaymentLoader {
    client: PaymentApiClient,
    last: Option<(String, Result<PaymentRecord, DashboardError>)>,
}

impl PaymentLoader {
    pub fn new(client: PaymentApiClient) -> Self {
        Self { client, last: None }
    }

    pub async fn load(&mut self, payment_id: &str) -> Result<PaymentRecord, DashboardError> {
        let payment_id = payment_id.trim();
        if payment_id.is_empty() {
            return Err(DashboardError::MissingIdentifier);
        }

        if let Some((loaded_id, outcome)) = &self.last {
            if loaded_id == payment_id {
                debug!(payment_id = %payment_id, "Payment already loaded");
                return outcome.clone();
            }
        }

        let outcome = self.client.fetch_payment(payment_id).await;
        match &outcome {
            Ok(record) => info!(
                payment_id = %payment_id,
                status = ?record.status,
                amount = %record.amount,
                currency = %record.currency,
                "Payment loaded"
            ),
            Err(e) => warn!(payment_id = %payment_id, error = %e, "Failed to load payment"),
        }

        self.last = Some((payment_id.to_string(), outcome.clone()));
        outcome
    }

    /// The currently loaded payment, if the last fetch succeeded.
    pub fn current(&self) -> Option<&PaymentRecord> {
        self.last.as_ref().and_then(|(_, outcome)| outcome.as_ref().ok())
    }
}
