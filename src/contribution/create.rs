//! Contribution creation page and endpoint.

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
    contribution::{ContributionBuilder, create_contribution, domain::ContributionFormData},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
    },
    navigation::NavBar,
};

/// The state needed for creating a contribution.
#[derive(Debug, Clone)]
pub struct CreateContributionEndpointState {
    /// The connection to the database holding the application's records.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateContributionEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the contribution creation page.
pub async fn get_new_contribution_page() -> Response {
    new_contribution_view().into_response()
}

/// Handle contribution creation form submission.
pub async fn create_contribution_endpoint(
    State(state): State<CreateContributionEndpointState>,
    Form(form_data): Form<ContributionFormData>,
) -> Response {
    let builder = match ContributionBuilder::try_from(&form_data) {
        Ok(builder) => builder,
        Err(error) => {
            return new_contribution_form_view(&format!("Error: {error}")).into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_contribution(builder, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::CONTRIBUTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a contribution: {error}");

            error.into_alert_response()
        }
    }
}

fn new_contribution_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_CONTRIBUTION_VIEW).into_html();
    let form = new_contribution_form_view("");

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Record Contribution", &[], &content)
}

fn new_contribution_form_view(error_message: &str) -> Markup {
    html! {
        form
            hx-post=(endpoints::POST_CONTRIBUTION)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="investor_name" class=(FORM_LABEL_STYLE) { "Investor Name" }

                input
                    id="investor_name"
                    type="text"
                    name="investor_name"
                    placeholder="Investor Name"
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

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

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Record Contribution" }
        }
    }
}
