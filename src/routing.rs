//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    contribution::{
        create_contribution_endpoint, delete_contribution_endpoint, get_contributions_page,
        get_edit_contribution_page, get_new_contribution_page, update_contribution_endpoint,
    },
    dashboard::get_dashboard_page,
    endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, get_edit_expense_page,
        get_expenses_page, get_new_expense_page, update_expense_endpoint,
    },
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    report::get_export_report,
    sale::{
        create_sale_endpoint, delete_sale_endpoint, get_edit_sale_page, get_new_sale_page,
        get_sales_page, update_sale_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let view_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::CONTRIBUTIONS_VIEW, get(get_contributions_page))
        .route(
            endpoints::NEW_CONTRIBUTION_VIEW,
            get(get_new_contribution_page),
        )
        .route(
            endpoints::EDIT_CONTRIBUTION_VIEW,
            get(get_edit_contribution_page),
        )
        .route(endpoints::EXPENSES_VIEW, get(get_expenses_page))
        .route(endpoints::NEW_EXPENSE_VIEW, get(get_new_expense_page))
        .route(endpoints::EDIT_EXPENSE_VIEW, get(get_edit_expense_page))
        .route(endpoints::SALES_VIEW, get(get_sales_page))
        .route(endpoints::NEW_SALE_VIEW, get(get_new_sale_page))
        .route(endpoints::EDIT_SALE_VIEW, get(get_edit_sale_page))
        .route(endpoints::EXPORT_REPORT, get(get_export_report))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(
            endpoints::POST_CONTRIBUTION,
            post(create_contribution_endpoint),
        )
        .route(
            endpoints::PUT_CONTRIBUTION,
            put(update_contribution_endpoint),
        )
        .route(
            endpoints::DELETE_CONTRIBUTION,
            delete(delete_contribution_endpoint),
        )
        .route(endpoints::POST_EXPENSE, post(create_expense_endpoint))
        .route(endpoints::PUT_EXPENSE, put(update_expense_endpoint))
        .route(endpoints::DELETE_EXPENSE, delete(delete_expense_endpoint))
        .route(endpoints::POST_SALE, post(create_sale_endpoint))
        .route(endpoints::PUT_SALE, put(update_sale_endpoint))
        .route(endpoints::DELETE_SALE, delete(delete_sale_endpoint));

    view_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
