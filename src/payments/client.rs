// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP client for the payment API run alongside the Discord bot.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::models::{ConfirmPaymentRequest, ConfirmationAck, HealthStatus, PaymentRecord};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for `/api/payment*` and `/health`.
#[derive(Debug, Clone)]
pub struct PaymentApiClient {
    base_url: Url,
    http: Client,
}

impl PaymentApiClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, DashboardError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DashboardError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { base_url, http })
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self, DashboardError> {
        Self::new(config.payment_api_url.clone(), config.http_timeout)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL below the base URL, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, DashboardError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                DashboardError::Transport(format!("base URL {} cannot have a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET /api/payment/{id}`.
    ///
    /// A 404 means the bot never created the payment or it expired.
    pub async fn fetch_payment(&self, payment_id: &str) -> Result<PaymentRecord, DashboardError> {
        let payment_id = payment_id.trim();
        if payment_id.is_empty() {
            return Err(DashboardError::MissingIdentifier);
        }

        let url = self.endpoint(&["api", "payment", payment_id])?;
        debug!(payment_id = %payment_id, url = %url, "Fetching payment");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        info!(payment_id = %payment_id, status = %status, "Payment API response");

        if !status.is_success() {
            return Err(DashboardError::request_failed(status));
        }

        response
            .json::<PaymentRecord>()
            .await
            .map_err(|e| DashboardError::InvalidResponse(format!("payment {payment_id}: {e}")))
    }

    /// `POST /api/payment/{id}/confirm`.
    ///
    /// The request carries an idempotency key derived from the payment and
    /// transaction so a repeated confirmation of the same transfer is
    /// recognisable server-side.
    pub async fn confirm_payment(
        &self,
        payment_id: &str,
        request: &ConfirmPaymentRequest,
    ) -> Result<ConfirmationAck, DashboardError> {
        if payment_id.trim().is_empty() {
            return Err(DashboardError::MissingIdentifier);
        }

        let url = self.endpoint(&["api", "payment", payment_id, "confirm"])?;
        let idempotency_key = confirmation_key(payment_id, request);

        let response = self
            .http
            .post(url)
            .header("Idempotency-Key", idempotency_key.to_string())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        info!(payment_id = %payment_id, status = %status, "Confirmation response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DashboardError::ConfirmationFailed(confirmation_error(status, &body)));
        }

        response
            .json::<ConfirmationAck>()
            .await
            .map_err(|e| DashboardError::InvalidResponse(format!("confirmation {payment_id}: {e}")))
    }

    /// `GET /api/payments`. Entries that do not parse are skipped.
    pub async fn list_payments(&self) -> Result<BTreeMap<String, PaymentRecord>, DashboardError> {
        let url = self.endpoint(&["api", "payments"])?;
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::RequestFailed { status });
        }

        let raw: BTreeMap<String, Value> = response.json().await?;
        let mut payments = BTreeMap::new();
        for (payment_id, value) in raw {
            match serde_json::from_value::<PaymentRecord>(value) {
                Ok(record) => {
                    payments.insert(payment_id, record);
                }
                Err(e) => {
                    warn!(payment_id = %payment_id, error = %e, "Skipping malformed payment");
                }
            }
        }
        Ok(payments)
    }

    /// `GET /health`.
    pub async fn health(&self) -> Result<HealthStatus, DashboardError> {
        let url = self.endpoint(&["health"])?;
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::RequestFailed { status });
        }
        Ok(response.json().await?)
    }
}

fn confirmation_key(payment_id: &str, request: &ConfirmPaymentRequest) -> Uuid {
    let discriminator = request
        .transaction_hash
        .as_deref()
        .unwrap_or(request.user_id.as_str());
    Uuid::new_v5(
        &Uuid::NAMESPACE_URL,
        format!("paybot:confirm:{payment_id}:{discriminator}").as_bytes(),
    )
}

fn confirmation_error(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("status {}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentStatus;
    use crate::testing::{sample_payment_json, StubPaymentApi};
    use chrono::Utc;
    use serde_json::json;

    fn confirm_request(hash: Option<&str>) -> ConfirmPaymentRequest {
        ConfirmPaymentRequest {
            user_id: "did:privy:alice".to_string(),
            transaction_hash: hash.map(str::to_string),
            confirmed_at: Utc::now(),
            wallet_type: Some("privy".to_string()),
            executed_via: Some("fake".to_string()),
        }
    }

    #[tokio::test]
    async fn fetch_payment_returns_record() {
        let api = StubPaymentApi::start().await;
        api.insert_payment("abc123", sample_payment_json());

        let record = api.client().fetch_payment("abc123").await.unwrap();
        assert_eq!(record.id, "abc123");
        assert_eq!(record.status, PaymentStatus::Pending);
        assert_eq!(api.fetch_count(), 1);
    }

    #[tokio::test]
    async fn fetch_payment_maps_404_to_not_found() {
        let api = StubPaymentApi::start().await;
        for id in ["missing", "expired-42", "x y"] {
            let err = api.client().fetch_payment(id).await.unwrap_err();
            assert_eq!(err, DashboardError::NotFound, "id {id:?}");
        }
    }

    #[tokio::test]
    async fn fetch_payment_reports_other_statuses() {
        let api = StubPaymentApi::start().await;
        api.insert_payment("abc123", sample_payment_json());
        api.fail_fetches_with(StatusCode::INTERNAL_SERVER_ERROR);

        let err = api.client().fetch_payment("abc123").await.unwrap_err();
        assert_eq!(
            err,
            DashboardError::RequestFailed {
                status: StatusCode::INTERNAL_SERVER_ERROR
            }
        );
    }

    #[tokio::test]
    async fn empty_identifier_makes_no_request() {
        let api = StubPaymentApi::start().await;
        let err = api.client().fetch_payment("  ").await.unwrap_err();
        assert_eq!(err, DashboardError::MissingIdentifier);
        assert_eq!(api.fetch_count(), 0);
    }

    #[tokio::test]
    async fn malformed_record_is_invalid_response() {
        let api = StubPaymentApi::start().await;
        api.insert_payment("bad", json!({"id": "bad"}));
        let err = api.client().fetch_payment("bad").await.unwrap_err();
        assert!(matches!(err, DashboardError::InvalidResponse(_)), "{err:?}");
    }

    #[tokio::test]
    async fn confirm_payment_posts_body_and_idempotency_key() {
        let api = StubPaymentApi::start().await;
        api.insert_payment("abc123", sample_payment_json());

        let ack = api
            .client()
            .confirm_payment("abc123", &confirm_request(Some("0xdeadbeef")))
            .await
            .unwrap();
        assert!(ack.success);
        assert_eq!(
            ack.payment.unwrap().transaction_hash.as_deref(),
            Some("0xdeadbeef")
        );

        let confirmations = api.confirmations();
        assert_eq!(confirmations.len(), 1);
        let (payment_id, body, key) = &confirmations[0];
        assert_eq!(payment_id, "abc123");
        assert_eq!(body["user_id"], "did:privy:alice");
        assert_eq!(body["transaction_hash"], "0xdeadbeef");
        assert_eq!(body["executed_via"], "fake");
        assert!(body["confirmed_at"].is_string());

        let expected = confirmation_key("abc123", &confirm_request(Some("0xdeadbeef")));
        assert_eq!(key.as_deref(), Some(expected.to_string().as_str()));
    }

    #[tokio::test]
    async fn confirm_payment_surfaces_backend_error_message() {
        let api = StubPaymentApi::start().await;
        api.insert_payment("abc123", sample_payment_json());
        api.fail_confirmations_with(StatusCode::INTERNAL_SERVER_ERROR);

        let err = api
            .client()
            .confirm_payment("abc123", &confirm_request(Some("0x1")))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DashboardError::ConfirmationFailed("Save failed".to_string())
        );
    }

    #[tokio::test]
    async fn list_payments_skips_malformed_entries() {
        let api = StubPaymentApi::start().await;
        api.insert_payment("abc123", sample_payment_json());
        api.insert_payment("broken", json!({"id": "broken", "amount": "lots"}));

        let payments = api.client().list_payments().await.unwrap();
        assert_eq!(payments.len(), 1);
        assert!(payments.contains_key("abc123"));
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let api = StubPaymentApi::start().await;
        let health = api.client().health().await.unwrap();
        assert_eq!(health.status, "OK");
    }

    #[test]
    fn endpoint_keeps_base_path_and_encodes_segments() {
        let client = PaymentApiClient::new(
            Url::parse("https://pay.example.com/dashboard/").unwrap(),
            Duration::from_secs(1),
        )
        .unwrap();
        let url = client.endpoint(&["api", "payment", "a/b c"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://pay.example.com/dashboard/api/payment/a%2Fb%20c"
        );
    }

    #[test]
    fn confirmation_error_falls_back_to_status() {
        assert_eq!(
            confirmation_error(StatusCode::BAD_GATEWAY, "<html>"),
            "status 502"
        );
        assert_eq!(
            confirmation_error(StatusCode::NOT_FOUND, r#"{"error":"Payment not found"}"#),
            "Payment not found"
        );
    }
}
