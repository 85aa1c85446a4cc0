//! Contribution editing page and endpoint.

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
    contribution::{
        ContributionBuilder, ContributionId, domain::ContributionFormData, get_contribution,
        update_contribution,
    },
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
    },
    navigation::NavBar,
};

const DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month repr:numerical padding:zero]-[day padding:zero]");

/// The state needed for the edit contribution page.
#[derive(Debug, Clone)]
pub struct EditContributionPageState {
    /// The connection to the database holding the application's records.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditContributionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The state needed for updating a contribution.
#[derive(Debug, Clone)]
pub struct UpdateContributionEndpointState {
    /// The connection to the database holding the application's records.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateContributionEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The current field values to pre-fill the edit form with.
struct FormValues {
    investor_name: String,
    amount: String,
    date: String,
}

/// Render the contribution editing page.
pub async fn get_edit_contribution_page(
    Path(contribution_id): Path<ContributionId>,
    State(state): State<EditContributionPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let edit_endpoint = endpoints::format_endpoint(endpoints::EDIT_CONTRIBUTION_VIEW, contribution_id);
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_CONTRIBUTION, contribution_id);

    let contribution = get_contribution(contribution_id, &connection).inspect_err(|error| {
        tracing::error!("Failed to retrieve contribution {contribution_id}: {error}")
    })?;

    let values = FormValues {
        investor_name: contribution.investor_name.to_string(),
        amount: contribution.amount.to_string(),
        date: contribution.date.format(&DATE_FORMAT).unwrap_or_default(),
    };

    Ok(edit_contribution_view(&edit_endpoint, &update_endpoint, &values, "").into_response())
}

/// Handle contribution update form submission.
pub async fn update_contribution_endpoint(
    Path(contribution_id): Path<ContributionId>,
    State(state): State<UpdateContributionEndpointState>,
    Form(form_data): Form<ContributionFormData>,
) -> Response {
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_CONTRIBUTION, contribution_id);

    let builder = match ContributionBuilder::try_from(&form_data) {
        Ok(builder) => builder,
        Err(error) => {
            let values = FormValues {
                investor_name: form_data.investor_name,
                amount: form_data.amount.to_string(),
                date: form_data.date,
            };

            return edit_contribution_form_view(&update_endpoint, &values, &format!("Error: {error}"))
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

    match update_contribution(contribution_id, builder, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::CONTRIBUTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::UpdateMissingContribution) => {
            Error::UpdateMissingContribution.into_alert_response()
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating contribution {contribution_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

fn edit_contribution_view(
    edit_endpoint: &str,
    update_endpoint: &str,
    values: &FormValues,
    error_message: &str,
) -> Markup {
    let nav_bar = NavBar::new(edit_endpoint).into_html();
    let form = edit_contribution_form_view(update_endpoint, values, error_message);

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Edit Contribution", &[], &content)
}

fn edit_contribution_form_view(
    update_endpoint: &str,
    values: &FormValues,
    error_message: &str,
) -> Markup {
    html! {
        form
            hx-put=(update_endpoint)
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
                    value=(values.investor_name)
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
                    value=(values.amount)
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
                    value=(values.date)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            @if !error_message.is_empty() {
                p
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Contribution" }
        }
    }
}
