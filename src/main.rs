// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Operator CLI for the payment API.
//!
//! ```text
//! paybot-dashboard payment <id>   # show one payment and its network
//! paybot-dashboard payments       # list all payments
//! paybot-dashboard health         # check the payment API
//! ```

use std::env;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use paybot_dashboard::blockchain::resolve_payment;
use paybot_dashboard::config::{DashboardConfig, LOG_FORMAT_ENV};
use paybot_dashboard::error::DashboardError;
use paybot_dashboard::models::PaymentRecord;
use paybot_dashboard::payments::PaymentApiClient;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "paybot-dashboard", about = "Operator CLI for the PayBot payment API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show one payment and the network it settles on
    Payment { id: String },
    /// List all payments
    Payments,
    /// Check the payment API
    Health,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let json = env::var(LOG_FORMAT_ENV)
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn report(record: &PaymentRecord) {
    let network = resolve_payment(record);
    info!(
        payment_id = %record.id,
        sender = %record.sender_name,
        recipient = %record.recipient_name,
        amount = %record.amount,
        currency = %record.currency,
        status = ?record.status,
        network = network.name,
        chain_id = network.chain_id,
        testnet = network.is_testnet,
        explorer = ?record.transaction_hash.as_deref().map(|h| network.transaction_url(h)),
        "Payment"
    );
}

async fn run(client: &PaymentApiClient, command: Command) -> Result<(), DashboardError> {
    match command {
        Command::Payment { id } => {
            let record = client.fetch_payment(&id).await?;
            report(&record);
        }
        Command::Payments => {
            let payments = client.list_payments().await?;
            info!(count = payments.len(), "Payments");
            for record in payments.values() {
                report(record);
            }
        }
        Command::Health => {
            let health = client.health().await?;
            info!(status = %health.status, timestamp = %health.timestamp, "Payment API health");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let config = match DashboardConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::from(2);
        }
    };

    let client = match PaymentApiClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to build payment API client");
            return ExitCode::from(2);
        }
    };
    info!(api = %client.base_url(), network = %config.preferred_network.network(), "PayBot dashboard");

    match run(&client, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            ExitCode::FAILURE
        }
    }
}
