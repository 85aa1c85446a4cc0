//! Sale editing page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;
use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
    },
    navigation::NavBar,
    sale::{SaleBuilder, SaleId, domain::SaleFormData, get_sale, update_sale},
};

const DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month repr:numerical padding:zero]-[day padding:zero]");

/// The state needed for the edit sale page.
#[derive(Debug, Clone)]
pub struct EditSalePageState {
    /// The connection to the database holding the application's records.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditSalePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The state needed for updating a sale.
#[derive(Debug, Clone)]
pub struct UpdateSaleEndpointState {
    /// The connection to the database holding the application's records.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateSaleEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The current field values to pre-fill the edit form with.
struct FormValues {
    amount: String,
    date: String,
    description: String,
}

/// Render the sale editing page.
pub async fn get_edit_sale_page(
    Path(sale_id): Path<SaleId>,
    State(state): State<EditSalePageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let edit_endpoint = endpoints::format_endpoint(endpoints::EDIT_SALE_VIEW, sale_id);
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_SALE, sale_id);

    let sale = get_sale(sale_id, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve sale {sale_id}: {error}"))?;

    let values = FormValues {
        amount: sale.amount.to_string(),
        date: sale.date.format(&DATE_FORMAT).unwrap_or_default(),
        description: sale.description.unwrap_or_default(),
    };

    Ok(edit_sale_view(&edit_endpoint, &update_endpoint, &values, "").into_response())
}

/// Handle sale update form submission.
pub async fn update_sale_endpoint(
    Path(sale_id): Path<SaleId>,
    State(state): State<UpdateSaleEndpointState>,
    Form(form_data): Form<SaleFormData>,
) -> Response {
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_SALE, sale_id);

    let builder = match SaleBuilder::try_from(&form_data) {
        Ok(builder) => builder,
        Err(error) => {
            let values = FormValues {
                amount: form_data.amount.to_string(),
                date: form_data.date,
                description: form_data.description,
            };

            return edit_sale_form_view(&update_endpoint, &values, &format!("Error: {error}"))
                .into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match update_sale(sale_id, builder, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::SALES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::UpdateMissingSale) => Error::UpdateMissingSale.into_alert_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while updating sale {sale_id}: {error}");
            error.into_alert_response()
        }
    }
}

fn edit_sale_view(
    edit_endpoint: &str,
    update_endpoint: &str,
    values: &FormValues,
    error_message: &str,
) -> Markup {
    let nav_bar = NavBar::new(edit_endpoint).into_html();
    let form = edit_sale_form_view(update_endpoint, values, error_message);

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Edit Sale", &[], &content)
}

fn edit_sale_form_view(update_endpoint: &str, values: &FormValues, error_message: &str) -> Markup {
    html! {
        form
            hx-put=(update_endpoint)
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
                    value=(values.amount)
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
                    value=(values.date)
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
                    value=(values.description)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            @if !error_message.is_empty() {
                p
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Sale" }
        }
    }
}

#[cfg(test)]
mod edit_sale_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Form,
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        endpoints,
        sale::{
            SaleBuilder, create_sale, create_sale_table,
            domain::SaleFormData,
            edit::{EditSalePageState, UpdateSaleEndpointState},
            get_edit_sale_page, get_sale, update_sale_endpoint,
        },
        test_utils::{
            assert_form_error_message, assert_form_input_with_value,
            assert_form_submit_button_with_text, assert_hx_endpoint, assert_hx_redirect,
            assert_valid_html, must_get_form, parse_html_document, parse_html_fragment,
        },
    };

    fn get_test_connection() -> Arc<Mutex<Connection>> {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_sale_table(&connection).expect("Could not create sale table");

        Arc::new(Mutex::new(connection))
    }

    fn test_builder() -> SaleBuilder {
        SaleBuilder {
            amount: 500.0,
            date: date!(2024 - 03 - 16),
            description: Some("Saturday market".to_owned()),
        }
    }

    #[tokio::test]
    async fn get_edit_sale_page_succeeds() {
        let db_connection = get_test_connection();
        let sale = create_sale(test_builder(), &db_connection.lock().unwrap())
            .expect("Could not create test sale");
        let state = EditSalePageState {
            db_connection: db_connection.clone(),
        };

        let response = get_edit_sale_page(Path(sale.id), State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(
            &form,
            &endpoints::format_endpoint(endpoints::PUT_SALE, sale.id),
            "hx-put",
        );
        assert_form_input_with_value(&form, "amount", "number", "500");
        assert_form_input_with_value(&form, "date", "date", "2024-03-16");
        assert_form_input_with_value(&form, "description", "text", "Saturday market");
        assert_form_submit_button_with_text(&form, "Update Sale");
    }

    #[tokio::test]
    async fn get_edit_sale_page_with_invalid_id_returns_not_found() {
        let state = EditSalePageState {
            db_connection: get_test_connection(),
        };

        let response = get_edit_sale_page(Path(999999), State(state))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("404"));
    }

    #[tokio::test]
    async fn update_sale_endpoint_succeeds() {
        let db_connection = get_test_connection();
        let sale = create_sale(test_builder(), &db_connection.lock().unwrap())
            .expect("Could not create test sale");
        let state = UpdateSaleEndpointState {
            db_connection: db_connection.clone(),
        };

        let form = SaleFormData {
            amount: 550.0,
            date: "2024-04-01".to_owned(),
            description: "".to_owned(),
        };

        let response = update_sale_endpoint(Path(sale.id), State(state), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::SALES_VIEW);

        let updated =
            get_sale(sale.id, &db_connection.lock().unwrap()).expect("Could not get updated sale");
        assert_eq!(updated.amount, 550.0);
        assert_eq!(updated.date, date!(2024 - 04 - 01));
        assert_eq!(updated.description, None);
    }

    #[tokio::test]
    async fn update_sale_endpoint_with_invalid_id_returns_not_found() {
        let state = UpdateSaleEndpointState {
            db_connection: get_test_connection(),
        };
        let form = SaleFormData {
            amount: 550.0,
            date: "2024-04-01".to_owned(),
            description: "".to_owned(),
        };

        let response = update_sale_endpoint(Path(999999), State(state), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_sale_endpoint_with_negative_amount_returns_error() {
        let db_connection = get_test_connection();
        let sale = create_sale(test_builder(), &db_connection.lock().unwrap())
            .expect("Could not create test sale");
        let state = UpdateSaleEndpointState { db_connection };

        let form = SaleFormData {
            amount: -1.0,
            date: "2024-04-01".to_owned(),
            description: "".to_owned(),
        };

        let response = update_sale_endpoint(Path(sale.id), State(state), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: -1 is a negative amount, which is not allowed");
    }
}
