//! Contribution deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    contribution::{ContributionId, db::delete_contribution},
};

/// The state needed for deleting a contribution.
#[derive(Debug, Clone)]
pub struct DeleteContributionEndpointState {
    /// The connection to the database holding the application's records.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteContributionEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle contribution deletion. Returns success alert or error.
pub async fn delete_contribution_endpoint(
    Path(contribution_id): Path<ContributionId>,
    State(state): State<DeleteContributionEndpointState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_contribution(contribution_id, &connection) {
        Ok(_) => Alert::Success {
            message: "Contribution deleted successfully".to_owned(),
        }
        .into_response(),
        Err(Error::DeleteMissingContribution) => {
            Error::DeleteMissingContribution.into_alert_response()
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting contribution {contribution_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
