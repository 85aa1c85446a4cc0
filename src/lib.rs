//! Kitchen Ledger is a small web app for tracking the finances of a single
//! food business: investor contributions, expenses and sales.
//!
//! This library provides a REST API that directly serves HTML pages, plus an
//! XLSX report export. All derived numbers (totals, investor shares, monthly
//! series, category breakdown) come from the [summary] engine so the dashboard
//! and the exported workbook can never disagree.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod contribution;
mod dashboard;
mod db;
mod endpoints;
mod error;
mod expense;
mod html;
mod internal_server_error;
mod navigation;
mod not_found;
mod report;
mod routing;
mod sale;
pub mod summary;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use contribution::{
    Contribution, ContributionBuilder, InvestorName, create_contribution, get_all_contributions,
};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use expense::{Expense, ExpenseBuilder, create_expense, get_all_expenses};
pub use routing::build_router;
pub use sale::{Sale, SaleBuilder, create_sale, get_all_sales};

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
