//! The dashboard page handler.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    contribution::get_all_contributions,
    dashboard::{
        cards::totals_cards_view,
        charts::{DashboardChart, charts_script, charts_view, monthly_activity_chart},
        tables::{
            category_breakdown_table, investment_breakdown_table, monthly_summary_table,
            recent_activity_view,
        },
    },
    endpoints,
    expense::get_all_expenses,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    sale::get_all_sales,
    summary::{ReportPayload, assemble_report},
    timezone::get_local_date,
};

/// The state needed for the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardPageState {
    /// The connection to the database holding the application's records.
    pub db_connection: Arc<Mutex<Connection>>,
    /// An IANA timezone name used to decide which year the dashboard covers.
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the dashboard: headline totals, investment breakdown, monthly
/// activity and the most recent records.
pub async fn get_dashboard_page(State(state): State<DashboardPageState>) -> Result<Response, Error> {
    let (contributions, expenses, sales) = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        (
            get_all_contributions(&connection)
                .inspect_err(|error| tracing::error!("Failed to retrieve contributions: {error}"))?,
            get_all_expenses(&connection)
                .inspect_err(|error| tracing::error!("Failed to retrieve expenses: {error}"))?,
            get_all_sales(&connection)
                .inspect_err(|error| tracing::error!("Failed to retrieve sales: {error}"))?,
        )
    };

    let today = get_local_date(&state.local_timezone)?;
    let report = assemble_report(
        contributions,
        expenses,
        sales,
        today.year(),
        OffsetDateTime::now_utc(),
    );

    Ok(dashboard_view(&report).into_response())
}

fn dashboard_view(report: &ReportPayload) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let charts = [DashboardChart {
        id: "monthly-activity-chart",
        options: monthly_activity_chart(report).to_string(),
    }];

    let scripts = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(&charts),
    ];

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                h1 class="text-xl font-bold" { "Dashboard" }

                (totals_cards_view(report))

                (charts_view(&charts))

                (investment_breakdown_table(report))

                (monthly_summary_table(report))

                (category_breakdown_table(report))

                (recent_activity_view(report))
            }
        }
    );

    base("Dashboard", &scripts, &content)
}

#[cfg(test)]
mod dashboard_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        contribution::{ContributionBuilder, InvestorName, create_contribution},
        db::initialize,
        expense::{ExpenseBuilder, create_expense},
        sale::{SaleBuilder, create_sale},
        test_utils::{assert_valid_html, parse_html_document},
    };

    use super::{DashboardPageState, get_dashboard_page};

    fn get_dashboard_page_state() -> DashboardPageState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        DashboardPageState {
            db_connection: Arc::new(Mutex::new(connection)),
            local_timezone: "Europe/London".to_owned(),
        }
    }

    fn current_year_date(month: u8, day: u8) -> time::Date {
        let year = time::OffsetDateTime::now_utc().year();

        time::Date::from_calendar_date(year, time::Month::try_from(month).unwrap(), day).unwrap()
    }

    #[tokio::test]
    async fn renders_totals_and_investor_breakdown() {
        let state = get_dashboard_page_state();
        {
            let connection = state.db_connection.lock().unwrap();
            create_contribution(
                ContributionBuilder {
                    investor_name: InvestorName::new_unchecked("Adwait"),
                    amount: 600.0,
                    date: current_year_date(1, 1),
                },
                &connection,
            )
            .expect("Could not create test contribution");
            create_contribution(
                ContributionBuilder {
                    investor_name: InvestorName::new_unchecked("Shree"),
                    amount: 400.0,
                    date: current_year_date(1, 2),
                },
                &connection,
            )
            .expect("Could not create test contribution");
            create_expense(
                ExpenseBuilder {
                    description: "Gas refill".to_owned(),
                    amount: 100.0,
                    date: current_year_date(2, 1),
                    category: Some("Fuel".to_owned()),
                },
                &connection,
            )
            .expect("Could not create test expense");
            create_sale(
                SaleBuilder {
                    amount: 500.0,
                    date: current_year_date(2, 2),
                    description: None,
                },
                &connection,
            )
            .expect("Could not create test sale");
        }

        let response = get_dashboard_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("£1,000.00"));
        assert!(text.contains("£500.00"));
        assert!(text.contains("£400.00"));
        assert!(text.contains("Adwait"));
        assert!(text.contains("60.0%"));
        assert!(text.contains("£240.00"));
        assert!(text.contains("Fuel"));
    }

    #[tokio::test]
    async fn renders_empty_dashboard() {
        let state = get_dashboard_page_state();

        let response = get_dashboard_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("No contributions recorded yet."));
        assert!(text.contains("£0.00"));
    }
}
