//! Contributions listing page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    AppState, Error, endpoints,
    contribution::{Contribution, get_all_contributions},
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, edit_delete_action_links, format_currency,
    },
    navigation::NavBar,
};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[day] [month repr:short] [year]");

/// The state needed for the contributions listing page.
#[derive(Debug, Clone)]
pub struct ContributionsPageState {
    /// The connection to the database holding the application's records.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ContributionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the contributions listing page.
pub async fn get_contributions_page(
    State(state): State<ContributionsPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let contributions = get_all_contributions(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve contributions: {error}"))?;

    Ok(contributions_view(&contributions).into_response())
}

fn contributions_view(contributions: &[Contribution]) -> Markup {
    let new_contribution_route = endpoints::NEW_CONTRIBUTION_VIEW;
    let nav_bar = NavBar::new(endpoints::CONTRIBUTIONS_VIEW).into_html();

    let table_row = |contribution: &Contribution| {
        let edit_url =
            endpoints::format_endpoint(endpoints::EDIT_CONTRIBUTION_VIEW, contribution.id);
        let delete_url = endpoints::format_endpoint(endpoints::DELETE_CONTRIBUTION, contribution.id);
        let confirm_message = format!(
            "Are you sure you want to delete the {} contribution from '{}'?",
            format_currency(contribution.amount),
            contribution.investor_name,
        );

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE) { (contribution.investor_name) }

                td class=(TABLE_CELL_STYLE) { (format_currency(contribution.amount)) }

                td class=(TABLE_CELL_STYLE)
                {
                    (contribution.date.format(&DATE_FORMAT).unwrap_or_default())
                }

                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        (edit_delete_action_links(
                            &edit_url,
                            &delete_url,
                            &confirm_message,
                            "closest tr",
                            "delete",
                        ))
                    }
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Contributions" }

                    a href=(new_contribution_route) class=(LINK_STYLE)
                    {
                        "Record Contribution"
                    }
                }

                section class="dark:bg-gray-800"
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Investor" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for contribution in contributions {
                                (table_row(contribution))
                            }

                            @if contributions.is_empty() {
                                tr
                                {
                                    td
                                        colspan="4"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No contributions recorded yet. "
                                        a href=(new_contribution_route) class=(LINK_STYLE)
                                        {
                                            "Record your first contribution"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Contributions", &[], &content)
}
