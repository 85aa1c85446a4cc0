//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/expenses/{expense_id}/edit',
//! use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page with the financial summary.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for listing all contributions.
pub const CONTRIBUTIONS_VIEW: &str = "/contributions";
/// The page for recording a new contribution.
pub const NEW_CONTRIBUTION_VIEW: &str = "/contributions/new";
/// The page for editing an existing contribution.
pub const EDIT_CONTRIBUTION_VIEW: &str = "/contributions/{contribution_id}/edit";
/// The page for listing all expenses.
pub const EXPENSES_VIEW: &str = "/expenses";
/// The page for recording a new expense.
pub const NEW_EXPENSE_VIEW: &str = "/expenses/new";
/// The page for editing an existing expense.
pub const EDIT_EXPENSE_VIEW: &str = "/expenses/{expense_id}/edit";
/// The page for listing all sales.
pub const SALES_VIEW: &str = "/sales";
/// The page for recording a new sale.
pub const NEW_SALE_VIEW: &str = "/sales/new";
/// The page for editing an existing sale.
pub const EDIT_SALE_VIEW: &str = "/sales/{sale_id}/edit";
/// The route that downloads the financial report workbook.
pub const EXPORT_REPORT: &str = "/export";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create a contribution.
pub const POST_CONTRIBUTION: &str = "/api/contributions";
/// The route to update a contribution.
pub const PUT_CONTRIBUTION: &str = "/api/contributions/{contribution_id}";
/// The route to delete a contribution.
pub const DELETE_CONTRIBUTION: &str = "/api/contributions/{contribution_id}";
/// The route to create an expense.
pub const POST_EXPENSE: &str = "/api/expenses";
/// The route to update an expense.
pub const PUT_EXPENSE: &str = "/api/expenses/{expense_id}";
/// The route to delete an expense.
pub const DELETE_EXPENSE: &str = "/api/expenses/{expense_id}";
/// The route to create a sale.
pub const POST_SALE: &str = "/api/sales";
/// The route to update a sale.
pub const PUT_SALE: &str = "/api/sales/{sale_id}";
/// The route to delete a sale.
pub const DELETE_SALE: &str = "/api/sales/{sale_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/expenses/{expense_id}/edit',
/// '{expense_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
