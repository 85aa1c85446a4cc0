//! The declarative layout of the report workbook.
//!
//! The layout is plain data so it can be tested without writing any XLSX
//! bytes. Percentages and profit shares are copied from the payload's
//! formatted strings, so the workbook shows exactly what the dashboard shows.

use time::Date;

use crate::{expense::UNCATEGORISED_LABEL, summary::ReportPayload};

/// A single cell of the report workbook.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Cell {
    /// A cell with no content.
    Empty,
    /// Plain text.
    Text(String),
    /// Bold text, used for section titles and column headings.
    Header(String),
    /// A numeric amount rendered with a currency number format.
    Currency(f64),
    /// A whole number, e.g. a record count.
    Integer(i64),
    /// A calendar date.
    Date(Date),
}

/// One worksheet of the report workbook.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Sheet {
    /// The worksheet tab name.
    pub name: String,
    /// Widths for the leading columns, in Excel character units.
    pub column_widths: Vec<f64>,
    /// The cell grid, row by row.
    pub rows: Vec<Vec<Cell>>,
}

/// Lay out the full report: one sheet per record kind plus a summary sheet.
pub(super) fn build_report_sheets(report: &ReportPayload) -> Vec<Sheet> {
    vec![
        contributions_sheet(report),
        expenses_sheet(report),
        sales_sheet(report),
        summary_sheet(report),
    ]
}

fn contributions_sheet(report: &ReportPayload) -> Sheet {
    let mut rows = vec![vec![
        Cell::Header("Investor".to_owned()),
        Cell::Header("Amount".to_owned()),
        Cell::Header("Date".to_owned()),
    ]];

    for contribution in &report.contributions {
        rows.push(vec![
            Cell::Text(contribution.investor_name.as_ref().to_owned()),
            Cell::Currency(contribution.amount),
            Cell::Date(contribution.date),
        ]);
    }

    Sheet {
        name: "Contributions".to_owned(),
        column_widths: vec![25.0, 14.0, 14.0],
        rows,
    }
}

fn expenses_sheet(report: &ReportPayload) -> Sheet {
    let mut rows = vec![vec![
        Cell::Header("Description".to_owned()),
        Cell::Header("Amount".to_owned()),
        Cell::Header("Date".to_owned()),
        Cell::Header("Category".to_owned()),
    ]];

    for expense in &report.expenses {
        rows.push(vec![
            Cell::Text(expense.description.clone()),
            Cell::Currency(expense.amount),
            Cell::Date(expense.date),
            Cell::Text(
                expense
                    .category
                    .clone()
                    .unwrap_or_else(|| UNCATEGORISED_LABEL.to_owned()),
            ),
        ]);
    }

    Sheet {
        name: "Expenses".to_owned(),
        column_widths: vec![35.0, 14.0, 14.0, 20.0],
        rows,
    }
}

fn sales_sheet(report: &ReportPayload) -> Sheet {
    let mut rows = vec![vec![
        Cell::Header("Amount".to_owned()),
        Cell::Header("Date".to_owned()),
        Cell::Header("Description".to_owned()),
    ]];

    for sale in &report.sales {
        rows.push(vec![
            Cell::Currency(sale.amount),
            Cell::Date(sale.date),
            match &sale.description {
                Some(description) => Cell::Text(description.clone()),
                None => Cell::Empty,
            },
        ]);
    }

    Sheet {
        name: "Sales".to_owned(),
        column_widths: vec![14.0, 14.0, 35.0],
        rows,
    }
}

fn summary_sheet(report: &ReportPayload) -> Sheet {
    let mut rows = vec![
        vec![Cell::Header("Summary Overview".to_owned())],
        vec![
            Cell::Text("Report Year".to_owned()),
            Cell::Integer(report.year as i64),
        ],
        vec![
            Cell::Text("Generated".to_owned()),
            Cell::Date(report.generated_at.date()),
        ],
        vec![
            Cell::Text("Total Contributions".to_owned()),
            Cell::Currency(report.totals.total_contributions),
        ],
        vec![
            Cell::Text("Total Sales".to_owned()),
            Cell::Currency(report.totals.total_sales),
        ],
        vec![
            Cell::Text("Total Expenses".to_owned()),
            Cell::Currency(report.totals.total_expenses),
        ],
        vec![
            Cell::Text("Net Profit".to_owned()),
            Cell::Currency(report.totals.net_profit),
        ],
        vec![
            Cell::Text("Total Records".to_owned()),
            Cell::Integer(report.total_records as i64),
        ],
        vec![Cell::Empty],
        vec![Cell::Header("Investment Breakdown".to_owned())],
        vec![
            Cell::Header("Investor".to_owned()),
            Cell::Header("Invested".to_owned()),
            Cell::Header("Share".to_owned()),
        ],
    ];

    for share in &report.investor_shares {
        rows.push(vec![
            Cell::Text(share.investor_name.clone()),
            Cell::Currency(share.amount),
            Cell::Text(share.percent_of_total.clone()),
        ]);
    }

    rows.push(vec![Cell::Empty]);
    rows.push(vec![Cell::Header("Profit Sharing".to_owned())]);
    rows.push(vec![
        Cell::Header("Investor".to_owned()),
        Cell::Header("Profit Share".to_owned()),
    ]);

    for share in &report.profit_shares {
        rows.push(vec![
            Cell::Text(share.investor_name.clone()),
            Cell::Text(share.formatted_amount.clone()),
        ]);
    }

    Sheet {
        name: "Summary".to_owned(),
        column_widths: vec![25.0, 14.0, 14.0],
        rows,
    }
}

#[cfg(test)]
mod layout_tests {
    use time::macros::{date, datetime};

    use crate::{
        contribution::{Contribution, InvestorName},
        expense::Expense,
        sale::Sale,
        summary::assemble_report,
    };

    use super::{Cell, build_report_sheets};

    fn worked_example() -> crate::summary::ReportPayload {
        let contributions = vec![
            Contribution {
                id: 1,
                investor_name: InvestorName::new_unchecked("Adwait"),
                amount: 600.0,
                date: date!(2024 - 01 - 01),
            },
            Contribution {
                id: 2,
                investor_name: InvestorName::new_unchecked("Shree"),
                amount: 400.0,
                date: date!(2024 - 01 - 02),
            },
        ];
        let expenses = vec![Expense {
            id: 1,
            description: "Gas refill".to_owned(),
            amount: 100.0,
            date: date!(2024 - 02 - 01),
            category: None,
        }];
        let sales = vec![Sale {
            id: 1,
            amount: 500.0,
            date: date!(2024 - 02 - 02),
            description: Some("Saturday market".to_owned()),
        }];

        assemble_report(
            contributions,
            expenses,
            sales,
            2024,
            datetime!(2024-03-01 12:00 UTC),
        )
    }

    #[test]
    fn report_has_one_sheet_per_record_kind_plus_summary() {
        let sheets = build_report_sheets(&worked_example());

        let names: Vec<&str> = sheets.iter().map(|sheet| sheet.name.as_str()).collect();
        assert_eq!(names, ["Contributions", "Expenses", "Sales", "Summary"]);
    }

    #[test]
    fn record_sheets_have_a_row_per_record_plus_headings() {
        let sheets = build_report_sheets(&worked_example());

        assert_eq!(sheets[0].rows.len(), 3);
        assert_eq!(sheets[1].rows.len(), 2);
        assert_eq!(sheets[2].rows.len(), 2);
    }

    #[test]
    fn amounts_are_written_as_currency_cells() {
        let sheets = build_report_sheets(&worked_example());

        assert_eq!(sheets[0].rows[1][1], Cell::Currency(600.0));
        assert_eq!(sheets[1].rows[1][1], Cell::Currency(100.0));
        assert_eq!(sheets[2].rows[1][0], Cell::Currency(500.0));
    }

    #[test]
    fn uncategorised_expenses_are_labelled() {
        let sheets = build_report_sheets(&worked_example());

        assert_eq!(sheets[1].rows[1][3], Cell::Text("Uncategorised".to_owned()));
    }

    #[test]
    fn summary_sheet_reuses_dashboard_percent_and_profit_strings() {
        let sheets = build_report_sheets(&worked_example());
        let summary = &sheets[3];

        let cells: Vec<&Cell> = summary.rows.iter().flatten().collect();
        assert!(cells.contains(&&Cell::Header("Summary Overview".to_owned())));
        assert!(cells.contains(&&Cell::Header("Investment Breakdown".to_owned())));
        assert!(cells.contains(&&Cell::Header("Profit Sharing".to_owned())));
        assert!(cells.contains(&&Cell::Text("60.0%".to_owned())));
        assert!(cells.contains(&&Cell::Text("40.0%".to_owned())));
        assert!(cells.contains(&&Cell::Text("£240.00".to_owned())));
        assert!(cells.contains(&&Cell::Text("£160.00".to_owned())));
        assert!(cells.contains(&&Cell::Currency(400.0)));
    }

    #[test]
    fn empty_report_still_lays_out_all_sections() {
        let report = assemble_report(vec![], vec![], vec![], 2024, datetime!(2024-03-01 12:00 UTC));

        let sheets = build_report_sheets(&report);

        assert_eq!(sheets.len(), 4);
        let summary_cells: Vec<&Cell> = sheets[3].rows.iter().flatten().collect();
        assert!(summary_cells.contains(&&Cell::Header("Profit Sharing".to_owned())));
        assert!(summary_cells.contains(&&Cell::Integer(0)));
    }
}
