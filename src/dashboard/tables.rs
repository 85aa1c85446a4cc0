//! Table views for the dashboard.

use maud::{Markup, html};
use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    expense::UNCATEGORISED_LABEL,
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    summary::ReportPayload,
};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[day] [month repr:short] [year]");

const TABLE_STYLE: &str = "w-full text-sm text-left rtl:text-right
    text-gray-500 dark:text-gray-400";
const TABLE_SECTION_STYLE: &str = "overflow-x-auto rounded-lg shadow";

fn table_section(heading: &str, table: Markup) -> Markup {
    html!(
        div class="w-full"
        {
            h3 class="text-xl font-semibold mb-4" { (heading) }

            div class=(TABLE_SECTION_STYLE)
            {
                (table)
            }
        }
    )
}

/// Each investor's stake and their cut of net profit, one row per investor.
pub(super) fn investment_breakdown_table(report: &ReportPayload) -> Markup {
    let rows = report
        .investor_shares
        .iter()
        .zip(report.profit_shares.iter());

    let table = html!(
        table class=(TABLE_STYLE)
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Investor" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Invested" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Share" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Profit Share" }
                }
            }

            tbody
            {
                @for (investor_share, profit_share) in rows {
                    tr class=(TABLE_ROW_STYLE)
                    {
                        td class=(TABLE_CELL_STYLE) { (investor_share.investor_name) }
                        td class=(TABLE_CELL_STYLE) { (format_currency(investor_share.amount)) }
                        td class=(TABLE_CELL_STYLE) { (investor_share.percent_of_total) }
                        td class=(TABLE_CELL_STYLE) { (profit_share.formatted_amount) }
                    }
                }

                @if report.investor_shares.is_empty() {
                    tr
                    {
                        td
                            colspan="4"
                            class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                        {
                            "No contributions recorded yet."
                        }
                    }
                }
            }
        }
    );

    table_section("Investment Breakdown", table)
}

/// Month-by-month sales and expense activity for the report year.
pub(super) fn monthly_summary_table(report: &ReportPayload) -> Markup {
    let rows = report
        .monthly_sales
        .iter()
        .zip(report.monthly_expenses.iter());

    let table = html!(
        table class=(TABLE_STYLE)
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Month" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Sales" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Sale Count" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Expenses" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Expense Count" }
                }
            }

            tbody
            {
                @for (sales_entry, expenses_entry) in rows {
                    tr class=(TABLE_ROW_STYLE)
                    {
                        td class=(TABLE_CELL_STYLE) { (sales_entry.month_name) }
                        td class=(TABLE_CELL_STYLE) { (format_currency(sales_entry.total)) }
                        td class=(TABLE_CELL_STYLE) { (sales_entry.count) }
                        td class=(TABLE_CELL_STYLE) { (format_currency(expenses_entry.total)) }
                        td class=(TABLE_CELL_STYLE) { (expenses_entry.count) }
                    }
                }
            }
        }
    );

    table_section(&format!("Monthly Summary ({})", report.year), table)
}

/// Expense totals per category, largest first.
pub(super) fn category_breakdown_table(report: &ReportPayload) -> Markup {
    let table = html!(
        table class=(TABLE_STYLE)
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Total" }
                }
            }

            tbody
            {
                @for entry in &report.category_breakdown {
                    tr class=(TABLE_ROW_STYLE)
                    {
                        td class=(TABLE_CELL_STYLE)
                        {
                            (entry.category.as_deref().unwrap_or(UNCATEGORISED_LABEL))
                        }
                        td class=(TABLE_CELL_STYLE) { (format_currency(entry.total)) }
                    }
                }

                @if report.category_breakdown.is_empty() {
                    tr
                    {
                        td
                            colspan="2"
                            class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                        {
                            "No expenses recorded yet."
                        }
                    }
                }
            }
        }
    );

    table_section("Expenses by Category", table)
}

/// The five most recent expenses and sales, side by side.
pub(super) fn recent_activity_view(report: &ReportPayload) -> Markup {
    let expense_rows = report.recent_expenses.iter().map(|expense| {
        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE)
                {
                    (expense.date.format(&DATE_FORMAT).unwrap_or_default())
                }
                td class=(TABLE_CELL_STYLE) { (expense.description) }
                td class=(TABLE_CELL_STYLE) { (format_currency(expense.amount)) }
            }
        )
    });

    let sale_rows = report.recent_sales.iter().map(|sale| {
        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE)
                {
                    (sale.date.format(&DATE_FORMAT).unwrap_or_default())
                }
                td class=(TABLE_CELL_STYLE) { (sale.description.as_deref().unwrap_or("—")) }
                td class=(TABLE_CELL_STYLE) { (format_currency(sale.amount)) }
            }
        )
    });

    let recent_table = |heading: &str, value_heading: &str, rows: Markup, is_empty: bool| {
        table_section(
            heading,
            html!(
                table class=(TABLE_STYLE)
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class=(TABLE_CELL_STYLE) { (value_heading) }
                        }
                    }

                    tbody
                    {
                        (rows)

                        @if is_empty {
                            tr
                            {
                                td
                                    colspan="3"
                                    class="px-6 py-4 text-center
                                        text-gray-500 dark:text-gray-400"
                                {
                                    "Nothing recorded yet."
                                }
                            }
                        }
                    }
                }
            ),
        )
    };

    html!(
        div class="grid grid-cols-1 lg:grid-cols-2 gap-4 w-full"
        {
            (recent_table(
                "Recent Expenses",
                "Amount",
                html!(@for row in expense_rows { (row) }),
                report.recent_expenses.is_empty(),
            ))
            (recent_table(
                "Recent Sales",
                "Amount",
                html!(@for row in sale_rows { (row) }),
                report.recent_sales.is_empty(),
            ))
        }
    )
}
