//! Summary cards showing the headline totals for the business.

use maud::{Markup, html};

use crate::{
    html::format_currency,
    summary::{ReportPayload, Totals},
};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200
    dark:border-gray-700 rounded-lg p-4 shadow-md flex flex-col gap-1";
const CARD_LABEL_STYLE: &str = "text-sm text-gray-600 dark:text-gray-400";
const CARD_VALUE_STYLE: &str = "text-2xl font-semibold";
const CARD_VALUE_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const CARD_VALUE_RED_STYLE: &str = "text-red-600 dark:text-red-400";

/// Gets the CSS class for coloring amounts (green for positive, red for negative).
fn amount_color_class(amount: f64) -> &'static str {
    if amount >= 0.0 {
        CARD_VALUE_GREEN_STYLE
    } else {
        CARD_VALUE_RED_STYLE
    }
}

/// Renders the grid of headline total cards.
pub(super) fn totals_cards_view(report: &ReportPayload) -> Markup {
    let Totals {
        total_contributions,
        total_expenses,
        total_sales,
        net_profit,
    } = report.totals;

    let card = |label: &str, value: String, value_class: &str| {
        html!(
            div class=(CARD_STYLE)
            {
                span class=(CARD_LABEL_STYLE) { (label) }
                span class={(CARD_VALUE_STYLE) " " (value_class)} { (value) }
            }
        )
    };

    html!(
        section class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-5 gap-4"
            {
                (card("Total Contributions", format_currency(total_contributions), ""))
                (card(
                    "Total Sales",
                    format_currency(total_sales),
                    CARD_VALUE_GREEN_STYLE,
                ))
                (card(
                    "Total Expenses",
                    format_currency(total_expenses),
                    CARD_VALUE_RED_STYLE,
                ))
                (card(
                    "Net Profit",
                    format_currency(net_profit),
                    amount_color_class(net_profit),
                ))
                (card("Total Records", report.total_records.to_string(), ""))
            }
        }
    )
}

#[cfg(test)]
mod cards_tests {
    use time::macros::datetime;

    use crate::summary::assemble_report;

    use super::totals_cards_view;

    #[test]
    fn cards_show_zero_totals_for_empty_report() {
        let report = assemble_report(vec![], vec![], vec![], 2024, datetime!(2024-03-01 12:00 UTC));

        let markup = totals_cards_view(&report).into_string();

        assert!(markup.contains("Total Contributions"));
        assert!(markup.contains("Net Profit"));
        assert!(markup.contains("£0.00"));
        assert!(markup.contains("Total Records"));
    }
}
