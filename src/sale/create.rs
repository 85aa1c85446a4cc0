//! Sale creation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
    },
    navigation::NavBar,
    sale::{SaleBuilder, create_sale, domain::SaleFormData},
};

/// The state needed for creating a sale.
#[derive(Debug, Clone)]
pub struct CreateSaleEndpointState {
    /// The connection to the database holding the application's records.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateSaleEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the sale creation page.
pub async fn get_new_sale_page() -> Response {
    new_sale_view().into_response()
}

/// Handle sale creation form submission.
pub async fn create_sale_endpoint(
    State(state): State<CreateSaleEndpointState>,
    Form(form_data): Form<SaleFormData>,
) -> Response {
    let builder = match SaleBuilder::try_from(&form_data) {
        Ok(builder) => builder,
        Err(error) => {
            return new_sale_form_view(&format!("Error: {error}")).into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_sale(builder, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::SALES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a sale: {error}");

            error.into_alert_response()
        }
    }
}

fn new_sale_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_SALE_VIEW).into_html();
    let form = new_sale_form_view("");

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Record Sale", &[], &content)
}

fn new_sale_form_view(error_message: &str) -> Markup {
    html! {
        form
            hx-post=(endpoints::POST_SALE)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount (£)" }

                input
                    id="amount"
                    type="number"
                    name="amount"
                    step="0.01"
                    min="0"
                    placeholder="0.00"
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    id="date"
                    type="date"
                    name="date"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description (optional)" }

                input
                    id="description"
                    type="text"
                    name="description"
                    placeholder="e.g. Saturday market"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Record Sale" }
        }
    }
}


#[cfg(test)]
mod create_sale_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Form, extract::State, http::StatusCode, response::IntoResponse};
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        endpoints,
        sale::{
            create::CreateSaleEndpointState, create_sale_endpoint, create_sale_table,
            domain::SaleFormData, get_sale,
        },
        test_utils::{
            assert_form_error_message, assert_hx_redirect, assert_valid_html, must_get_form,
            parse_html_fragment,
        },
    };

    fn get_sale_state() -> CreateSaleEndpointState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_sale_table(&connection).expect("Could not create sale table");

        CreateSaleEndpointState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn can_create_sale() {
        let state = get_sale_state();
        let form = SaleFormData {
            amount: 500.0,
            date: "2024-03-16".to_owned(),
            description: "Saturday market".to_owned(),
        };

        let response = create_sale_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::SALES_VIEW);

        let created =
            get_sale(1, &state.db_connection.lock().unwrap()).expect("Sale was not persisted");
        assert_eq!(created.amount, 500.0);
        assert_eq!(created.date, date!(2024 - 03 - 16));
        assert_eq!(created.description, Some("Saturday market".to_owned()));
    }

    #[tokio::test]
    async fn create_sale_fails_on_negative_amount() {
        let state = get_sale_state();
        let form = SaleFormData {
            amount: -500.0,
            date: "2024-03-16".to_owned(),
            description: "".to_owned(),
        };

        let response = create_sale_endpoint(State(state), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: -500 is a negative amount, which is not allowed");
    }
}
