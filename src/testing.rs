// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared test fixtures: a scripted wallet provider and a stub payment API.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::Notify;
use url::Url;

use crate::accounts::SocialPlatform;
use crate::models::{PaymentRecord, ProviderUser, WalletAddress, WalletHandle};
use crate::payments::PaymentApiClient;
use crate::providers::{ProviderError, TransferReceipt, TransferRequest, WalletProvider};

pub(crate) const SENDER_WALLET: &str = "0xAAAaaaAAAaaaAAAaaaAAAaaaAAAaaaAAAaaaAAAa";
pub(crate) const RECIPIENT_WALLET: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
pub(crate) const TX_HASH: &str =
    "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060";

/// Payload shaped like what the Discord bot stores.
pub(crate) fn sample_payment_json() -> Value {
    json!({
        "id": "abc123",
        "sender_id": 111,
        "sender_name": "alice",
        "recipient_id": "222",
        "recipient_name": "bob",
        "amount": 0.1,
        "currency": "ETH",
        "sender_wallet": SENDER_WALLET,
        "recipient_wallet": RECIPIENT_WALLET,
        "sender_chain": "Sepolia Testnet",
        "recipient_chain": "Sepolia Testnet",
        "status": "pending",
        "timestamp": "2025-07-01T12:30:00.123456",
        "guild_id": 987654321012345678_u64,
        "channel_id": 123
    })
}

pub(crate) fn sample_payment() -> PaymentRecord {
    serde_json::from_value(sample_payment_json()).expect("fixture parses")
}

pub(crate) fn sepolia_wallet(address: &str) -> WalletHandle {
    WalletHandle {
        address: WalletAddress::from(address),
        wallet_client_type: "privy".to_string(),
        chain_id: Some("eip155:11155111".to_string()),
    }
}

pub(crate) fn test_user() -> ProviderUser {
    ProviderUser {
        id: "did:privy:alice".to_string(),
        email: Some("alice@example.com".to_string()),
        ..ProviderUser::default()
    }
}

// =============================================================================
// Wallet provider
// =============================================================================

/// Wallet provider whose answers are scripted by the test.
pub(crate) struct FakeWalletProvider {
    user: Mutex<Option<ProviderUser>>,
    wallets: Vec<WalletHandle>,
    transfer_result: Mutex<Result<String, ProviderError>>,
    login_result: Mutex<Result<ProviderUser, ProviderError>>,
    transfers: Mutex<Vec<TransferRequest>>,
    linked: Mutex<Vec<SocialPlatform>>,
    transfer_delay: Option<Duration>,
    transfer_gate: Option<Arc<Notify>>,
}

impl FakeWalletProvider {
    fn build(user: Option<ProviderUser>, wallets: Vec<WalletHandle>) -> Self {
        Self {
            user: Mutex::new(user),
            wallets,
            transfer_result: Mutex::new(Ok(TX_HASH.to_string())),
            login_result: Mutex::new(Ok(test_user())),
            transfers: Mutex::new(Vec::new()),
            linked: Mutex::new(Vec::new()),
            transfer_delay: None,
            transfer_gate: None,
        }
    }

    pub(crate) fn signed_in(wallets: Vec<WalletHandle>) -> Self {
        Self::build(Some(test_user()), wallets)
    }

    pub(crate) fn signed_out(wallets: Vec<WalletHandle>) -> Self {
        Self::build(None, wallets)
    }

    pub(crate) fn with_transfer_error(self, error: ProviderError) -> Self {
        *self.transfer_result.lock().unwrap() = Err(error);
        self
    }

    pub(crate) fn with_login_error(self, error: ProviderError) -> Self {
        *self.login_result.lock().unwrap() = Err(error);
        self
    }

    /// Transfers sleep for `delay` before answering.
    pub(crate) fn with_transfer_delay(mut self, delay: Duration) -> Self {
        self.transfer_delay = Some(delay);
        self
    }

    /// Transfers wait until `gate` is notified before answering.
    pub(crate) fn with_transfer_gate(mut self, gate: Arc<Notify>) -> Self {
        self.transfer_gate = Some(gate);
        self
    }

    pub(crate) fn transfers(&self) -> Vec<TransferRequest> {
        self.transfers.lock().unwrap().clone()
    }

    pub(crate) fn linked_platforms(&self) -> Vec<SocialPlatform> {
        self.linked.lock().unwrap().clone()
    }
}

impl WalletProvider for FakeWalletProvider {
    fn name(&self) -> &str {
        "fake"
    }

    fn current_user(&self) -> Option<ProviderUser> {
        self.user.lock().unwrap().clone()
    }

    fn wallets(&self) -> Vec<WalletHandle> {
        if self.is_authenticated() {
            self.wallets.clone()
        } else {
            Vec::new()
        }
    }

    async fn login(&self) -> Result<ProviderUser, ProviderError> {
        let result = self.login_result.lock().unwrap().clone();
        if let Ok(user) = &result {
            *self.user.lock().unwrap() = Some(user.clone());
        }
        result
    }

    async fn logout(&self) -> Result<(), ProviderError> {
        *self.user.lock().unwrap() = None;
        Ok(())
    }

    async fn link_account(&self, platform: SocialPlatform) -> Result<(), ProviderError> {
        self.linked.lock().unwrap().push(platform);
        Ok(())
    }

    async fn transfer(&self, request: TransferRequest) -> Result<TransferReceipt, ProviderError> {
        self.transfers.lock().unwrap().push(request);
        if let Some(delay) = self.transfer_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(gate) = &self.transfer_gate {
            gate.notified().await;
        }
        let result = self.transfer_result.lock().unwrap().clone();
        result.map(|tx_hash| TransferReceipt { tx_hash })
    }
}

// =============================================================================
// Payment API stub
// =============================================================================

#[derive(Default)]
struct StubState {
    payments: Mutex<HashMap<String, Value>>,
    fetch_status: Mutex<Option<StatusCode>>,
    confirm_status: Mutex<Option<StatusCode>>,
    confirmations: Mutex<Vec<(String, Value, Option<String>)>>,
    fetches: AtomicUsize,
}

/// Payment API served by axum on an ephemeral local port.
pub(crate) struct StubPaymentApi {
    base_url: Url,
    state: Arc<StubState>,
}

impl StubPaymentApi {
    pub(crate) async fn start() -> Self {
        let state = Arc::new(StubState::default());
        let app = Router::new()
            .route("/api/payment/{id}", get(get_payment))
            .route("/api/payment/{id}/confirm", post(confirm_payment))
            .route("/api/payments", get(list_payments))
            .route("/health", get(health))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub server");
        });

        let base_url = Url::parse(&format!("http://{addr}")).expect("stub URL");
        Self { base_url, state }
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn client(&self) -> PaymentApiClient {
        PaymentApiClient::new(self.base_url.clone(), Duration::from_secs(5))
            .expect("client builds")
    }

    pub(crate) fn insert_payment(&self, payment_id: &str, payment: Value) {
        self.state
            .payments
            .lock()
            .unwrap()
            .insert(payment_id.to_string(), payment);
    }

    pub(crate) fn stored_payment(&self, payment_id: &str) -> Option<Value> {
        self.state.payments.lock().unwrap().get(payment_id).cloned()
    }

    pub(crate) fn fail_fetches_with(&self, status: StatusCode) {
        *self.state.fetch_status.lock().unwrap() = Some(status);
    }

    pub(crate) fn fail_confirmations_with(&self, status: StatusCode) {
        *self.state.confirm_status.lock().unwrap() = Some(status);
    }

    pub(crate) fn fetch_count(&self) -> usize {
        self.state.fetches.load(Ordering::SeqCst)
    }

    /// `(payment id, body, Idempotency-Key)` for every confirmation received.
    pub(crate) fn confirmations(&self) -> Vec<(String, Value, Option<String>)> {
        self.state.confirmations.lock().unwrap().clone()
    }
}

async fn get_payment(State(state): State<Arc<StubState>>, Path(id): Path<String>) -> Response {
    state.fetches.fetch_add(1, Ordering::SeqCst);
    if let Some(status) = *state.fetch_status.lock().unwrap() {
        return (status, Json(json!({"error": "Internal server error"}))).into_response();
    }
    match state.payments.lock().unwrap().get(&id) {
        Some(payment) => Json(payment.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Payment not found"})),
        )
            .into_response(),
    }
}

async fn confirm_payment(
    State(state): State<Arc<StubState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let key = headers
        .get("Idempotency-Key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state
        .confirmations
        .lock()
        .unwrap()
        .push((id.clone(), body.clone(), key));

    if let Some(status) = *state.confirm_status.lock().unwrap() {
        return (status, Json(json!({"error": "Save failed"}))).into_response();
    }

    let mut payments = state.payments.lock().unwrap();
    let Some(payment) = payments.get_mut(&id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Payment not found"})),
        )
            .into_response();
    };
    payment["status"] = json!("completed");
    payment["confirmed_at"] = body["confirmed_at"].clone();
    if let Some(hash) = body.get("transaction_hash") {
        payment["transaction_hash"] = hash.clone();
    }

    Json(json!({"success": true, "payment": payment.clone()})).into_response()
}

async fn list_payments(State(state): State<Arc<StubState>>) -> Json<Value> {
    let payments = state.payments.lock().unwrap().clone();
    Json(serde_json::to_value(payments).unwrap_or_default())
}

async fn health() -> Json<Value> {
    Json(json!({"status": "OK", "timestamp": "2025-07-01T12:30:00"}))
}
