//! Sale deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    sale::{SaleId, db::delete_sale},
};

/// The state needed for deleting a sale.
#[derive(Debug, Clone)]
pub struct DeleteSaleEndpointState {
    /// The connection to the database holding the application's records.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteSaleEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle sale deletion. Returns success alert or error.
pub async fn delete_sale_endpoint(
    Path(sale_id): Path<SaleId>,
    State(state): State<DeleteSaleEndpointState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_sale(sale_id, &connection) {
        Ok(_) => Alert::Success {
            message: "Sale deleted successfully".to_owned(),
        }
        .into_response(),
        Err(Error::DeleteMissingSale) => Error::DeleteMissingSale.into_alert_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while deleting sale {sale_id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod delete_sale_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        sale::{SaleBuilder, create_sale, create_sale_table, delete_sale_endpoint},
        test_utils::{assert_valid_html, parse_html_fragment},
    };

    use super::DeleteSaleEndpointState;

    fn get_delete_sale_state() -> DeleteSaleEndpointState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_sale_table(&connection).expect("Could not create sale table");

        DeleteSaleEndpointState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn delete_sale_endpoint_succeeds() {
        let state = get_delete_sale_state();
        let sale = create_sale(
            SaleBuilder {
                amount: 500.0,
                date: date!(2024 - 03 - 16),
                description: None,
            },
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not create test sale");

        let response = delete_sale_endpoint(Path(sale.id), State(state))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn delete_sale_endpoint_with_invalid_id_returns_error_html() {
        let state = get_delete_sale_state();

        let response = delete_sale_endpoint(Path(999999), State(state))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Could not delete sale"));
    }
}
