//! Sales listing page.

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
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, edit_delete_action_links, format_currency,
    },
    navigation::NavBar,
    sale::{Sale, get_all_sales},
};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[day] [month repr:short] [year]");

/// The state needed for the sales listing page.
#[derive(Debug, Clone)]
pub struct SalesPageState {
    /// The connection to the database holding the application's records.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SalesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the sales listing page.
pub async fn get_sales_page(State(state): State<SalesPageState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let sales = get_all_sales(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve sales: {error}"))?;

    Ok(sales_view(&sales).into_response())
}

fn sales_view(sales: &[Sale]) -> Markup {
    let new_sale_route = endpoints::NEW_SALE_VIEW;
    let nav_bar = NavBar::new(endpoints::SALES_VIEW).into_html();

    let table_row = |sale: &Sale| {
        let edit_url = endpoints::format_endpoint(endpoints::EDIT_SALE_VIEW, sale.id);
        let delete_url = endpoints::format_endpoint(endpoints::DELETE_SALE, sale.id);
        let confirm_message = format!(
            "Are you sure you want to delete the {} sale?",
            format_currency(sale.amount),
        );

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE) { (format_currency(sale.amount)) }

                td class=(TABLE_CELL_STYLE)
                {
                    (sale.date.format(&DATE_FORMAT).unwrap_or_default())
                }

                td class=(TABLE_CELL_STYLE) { (sale.description.as_deref().unwrap_or("—")) }

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
                    h1 class="text-xl font-bold" { "Sales" }

                    a href=(new_sale_route) class=(LINK_STYLE)
                    {
                        "Record Sale"
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
                                th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for sale in sales {
                                (table_row(sale))
                            }

                            @if sales.is_empty() {
                                tr
                                {
                                    td
                                        colspan="4"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No sales recorded yet. "
                                        a href=(new_sale_route) class=(LINK_STYLE)
                                        {
                                            "Record your first sale"
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

    base("Sales", &[], &content)
}
