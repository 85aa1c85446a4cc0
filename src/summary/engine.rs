//! The computations behind the dashboard and the exported report.
//!
//! Every function here is pure: no I/O, no shared state, no panics on any
//! well-typed input. Percentages and profit shares are carried as formatted
//! strings so every renderer shows the exact same text.

use std::collections::HashMap;

use time::{Date, Month, OffsetDateTime};

use crate::{
    contribution::Contribution,
    expense::Expense,
    html::{format_currency, format_percent},
    sale::Sale,
};

/// Running totals over all records.
#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    /// The sum of all contribution amounts.
    pub total_contributions: f64,
    /// The sum of all expense amounts.
    pub total_expenses: f64,
    /// The sum of all sale amounts.
    pub total_sales: f64,
    /// `total_sales - total_expenses`.
    pub net_profit: f64,
}

/// An investor's stake: how much they put in and what fraction of the pot
/// that is.
#[derive(Debug, Clone, PartialEq)]
pub struct InvestorShare {
    /// The investor's name, exactly as recorded.
    pub investor_name: String,
    /// The sum of this investor's contributions.
    pub amount: f64,
    /// `amount / total_contributions * 100` formatted to one decimal place,
    /// e.g. "60.0%". "0.0%" when there are no contributions at all.
    pub percent_of_total: String,
}

/// An investor's cut of net profit, proportional to their contribution share.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfitShare {
    /// The investor's name, exactly as recorded.
    pub investor_name: String,
    /// `net_profit * (investor amount / total_contributions)`.
    pub amount: f64,
    /// `amount` as a currency string, e.g. "£240.00".
    pub formatted_amount: String,
}

/// One month's activity for a single record kind.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyEntry {
    /// The full English month name, e.g. "January".
    pub month_name: String,
    /// The sum of amounts dated within the month.
    pub total: f64,
    /// The number of records dated within the month.
    pub count: usize,
}

/// Total spend for one expense category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The category label. `None` groups the uncategorised expenses.
    pub category: Option<String>,
    /// The sum of amounts in this category.
    pub total: f64,
}

/// Everything the dashboard and the exported report render from.
///
/// Assembled once per request by [assemble_report]; neither consumer derives
/// any number on its own beyond formatting and layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPayload {
    /// The year the monthly series covers.
    pub year: i32,
    /// When the report was generated, supplied by the caller.
    pub generated_at: OffsetDateTime,
    /// Running totals over all records.
    pub totals: Totals,
    /// Per-investor stakes, in first-seen order.
    pub investor_shares: Vec<InvestorShare>,
    /// Per-investor profit cuts, in the same order as `investor_shares`.
    pub profit_shares: Vec<ProfitShare>,
    /// Sales activity for each month January through December of `year`.
    pub monthly_sales: Vec<MonthlyEntry>,
    /// Expense activity for each month January through December of `year`.
    pub monthly_expenses: Vec<MonthlyEntry>,
    /// Expense totals per category, largest first.
    pub category_breakdown: Vec<CategoryTotal>,
    /// The five most recent expenses.
    pub recent_expenses: Vec<Expense>,
    /// The five most recent sales.
    pub recent_sales: Vec<Sale>,
    /// The number of records across all three kinds.
    pub total_records: usize,
    /// The contribution snapshot the report was computed from.
    pub contributions: Vec<Contribution>,
    /// The expense snapshot the report was computed from.
    pub expenses: Vec<Expense>,
    /// The sale snapshot the report was computed from.
    pub sales: Vec<Sale>,
}

/// How many recent expenses/sales the payload carries.
const RECENT_RECORD_COUNT: usize = 5;

/// Sum the amounts of all records and derive net profit.
pub fn compute_totals(
    contributions: &[Contribution],
    expenses: &[Expense],
    sales: &[Sale],
) -> Totals {
    let total_contributions = contributions
        .iter()
        .map(|contribution| contribution.amount)
        .sum();
    let total_expenses: f64 = expenses.iter().map(|expense| expense.amount).sum();
    let total_sales: f64 = sales.iter().map(|sale| sale.amount).sum();

    Totals {
        total_contributions,
        total_expenses,
        total_sales,
        net_profit: total_sales - total_expenses,
    }
}

/// Sum contributions per distinct investor (exact, case-sensitive name match)
/// and express each total as a percentage of all contributions.
///
/// Investors appear in the order their first contribution appears in the
/// input. When there are no contributions every percentage is "0.0%".
pub fn compute_investor_shares(contributions: &[Contribution]) -> Vec<InvestorShare> {
    let total: f64 = contributions
        .iter()
        .map(|contribution| contribution.amount)
        .sum();

    let mut order: Vec<String> = Vec::new();
    let mut amounts: HashMap<&str, f64> = HashMap::new();

    for contribution in contributions {
        let name = contribution.investor_name.as_ref();

        if !amounts.contains_key(name) {
            order.push(name.to_owned());
        }

        *amounts.entry(name).or_insert(0.0) += contribution.amount;
    }

    order
        .into_iter()
        .map(|investor_name| {
            let amount = amounts[investor_name.as_str()];
            let percent = if total == 0.0 {
                0.0
            } else {
                amount / total * 100.0
            };

            InvestorShare {
                investor_name,
                amount,
                percent_of_total: format_percent(percent),
            }
        })
        .collect()
}

/// Split net profit between investors in proportion to their stakes.
///
/// When there are no contributions every share is zero, never a division
/// by zero.
pub fn compute_profit_shares(
    net_profit: f64,
    investor_shares: &[InvestorShare],
    total_contributions: f64,
) -> Vec<ProfitShare> {
    investor_shares
        .iter()
        .map(|share| {
            let amount = if total_contributions == 0.0 {
                0.0
            } else {
                net_profit * (share.amount / total_contributions)
            };

            ProfitShare {
                investor_name: share.investor_name.clone(),
                amount,
                formatted_amount: format_currency(amount),
            }
        })
        .collect()
}

/// Bucket dated amounts into the twelve calendar months of `year`.
///
/// A record lands in month `m` exactly when its date falls in the closed
/// interval from the first to the last day of `m`: December runs through the
/// 31st, and February 29 of a leap year counts as February. Records from
/// other years are ignored.
pub fn compute_monthly_series(records: &[(Date, f64)], year: i32) -> Vec<MonthlyEntry> {
    const MONTHS: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    MONTHS
        .into_iter()
        .map(|month| {
            let mut total = 0.0;
            let mut count = 0;

            for (date, amount) in records {
                if date.year() == year && date.month() == month {
                    total += amount;
                    count += 1;
                }
            }

            MonthlyEntry {
                month_name: month.to_string(),
                total,
                count,
            }
        })
        .collect()
}

/// Total expenses per category, sorted by total descending.
///
/// Uncategorised expenses are grouped under `None`, never dropped. Ties keep
/// first-seen order (the sort is stable).
pub fn compute_category_breakdown(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index_by_category: HashMap<Option<&str>, usize> = HashMap::new();

    for expense in expenses {
        let category = expense.category.as_deref();

        match index_by_category.get(&category) {
            Some(&index) => totals[index].total += expense.amount,
            None => {
                index_by_category.insert(category, totals.len());
                totals.push(CategoryTotal {
                    category: expense.category.clone(),
                    total: expense.amount,
                });
            }
        }
    }

    totals.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    totals
}

/// Assemble the full report payload from record snapshots.
///
/// `year` selects the monthly series and `generated_at` is stamped into the
/// payload untouched, so identical arguments always produce an identical
/// payload.
pub fn assemble_report(
    contributions: Vec<Contribution>,
    expenses: Vec<Expense>,
    sales: Vec<Sale>,
    year: i32,
    generated_at: OffsetDateTime,
) -> ReportPayload {
    let totals = compute_totals(&contributions, &expenses, &sales);
    let investor_shares = compute_investor_shares(&contributions);
    let profit_shares = compute_profit_shares(
        totals.net_profit,
        &investor_shares,
        totals.total_contributions,
    );

    let sale_amounts: Vec<(Date, f64)> = sales.iter().map(|sale| (sale.date, sale.amount)).collect();
    let expense_amounts: Vec<(Date, f64)> = expenses
        .iter()
        .map(|expense| (expense.date, expense.amount))
        .collect();

    let monthly_sales = compute_monthly_series(&sale_amounts, year);
    let monthly_expenses = compute_monthly_series(&expense_amounts, year);

    let category_breakdown = compute_category_breakdown(&expenses);

    let mut recent_expenses = expenses.clone();
    recent_expenses.sort_by(|a, b| (b.date, b.id).cmp(&(a.date, a.id)));
    recent_expenses.truncate(RECENT_RECORD_COUNT);

    let mut recent_sales = sales.clone();
    recent_sales.sort_by(|a, b| (b.date, b.id).cmp(&(a.date, a.id)));
    recent_sales.truncate(RECENT_RECORD_COUNT);

    let total_records = contributions.len() + expenses.len() + sales.len();

    ReportPayload {
        year,
        generated_at,
        totals,
        investor_shares,
        profit_shares,
        monthly_sales,
        monthly_expenses,
        category_breakdown,
        recent_expenses,
        recent_sales,
        total_records,
        contributions,
        expenses,
        sales,
    }
}

#[cfg(test)]
mod engine_tests {
    use time::{
        Date,
        macros::{date, datetime},
    };

    use crate::{
        contribution::{Contribution, InvestorName},
        expense::Expense,
        sale::Sale,
    };

    use super::{
        assemble_report, compute_category_breakdown, compute_investor_shares,
        compute_monthly_series, compute_profit_shares, compute_totals,
    };

    fn contribution(id: i64, name: &str, amount: f64, date: Date) -> Contribution {
        Contribution {
            id,
            investor_name: InvestorName::new_unchecked(name),
            amount,
            date,
        }
    }

    fn expense(id: i64, amount: f64, date: Date, category: Option<&str>) -> Expense {
        Expense {
            id,
            description: format!("expense {id}"),
            amount,
            date,
            category: category.map(|category| category.to_owned()),
        }
    }

    fn sale(id: i64, amount: f64, date: Date) -> Sale {
        Sale {
            id,
            amount,
            date,
            description: None,
        }
    }

    #[test]
    fn totals_sum_each_record_kind() {
        let contributions = vec![
            contribution(1, "Adwait", 600.0, date!(2024 - 01 - 01)),
            contribution(2, "Shree", 400.0, date!(2024 - 01 - 02)),
        ];
        let expenses = vec![expense(1, 100.0, date!(2024 - 02 - 01), None)];
        let sales = vec![sale(1, 500.0, date!(2024 - 02 - 02))];

        let totals = compute_totals(&contributions, &expenses, &sales);

        assert_eq!(totals.total_contributions, 1000.0);
        assert_eq!(totals.total_expenses, 100.0);
        assert_eq!(totals.total_sales, 500.0);
        assert_eq!(totals.net_profit, 400.0);
    }

    #[test]
    fn totals_of_empty_lists_are_zero() {
        let totals = compute_totals(&[], &[], &[]);

        assert_eq!(totals.total_contributions, 0.0);
        assert_eq!(totals.total_expenses, 0.0);
        assert_eq!(totals.total_sales, 0.0);
        assert_eq!(totals.net_profit, 0.0);
    }

    #[test]
    fn investor_shares_match_worked_example() {
        let contributions = vec![
            contribution(1, "Adwait", 600.0, date!(2024 - 01 - 01)),
            contribution(2, "Shree", 400.0, date!(2024 - 01 - 02)),
        ];

        let shares = compute_investor_shares(&contributions);

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].investor_name, "Adwait");
        assert_eq!(shares[0].amount, 600.0);
        assert_eq!(shares[0].percent_of_total, "60.0%");
        assert_eq!(shares[1].investor_name, "Shree");
        assert_eq!(shares[1].amount, 400.0);
        assert_eq!(shares[1].percent_of_total, "40.0%");
    }

    #[test]
    fn investor_shares_group_repeat_contributions() {
        let contributions = vec![
            contribution(1, "Adwait", 100.0, date!(2024 - 01 - 01)),
            contribution(2, "Shree", 200.0, date!(2024 - 01 - 02)),
            contribution(3, "Adwait", 300.0, date!(2024 - 01 - 03)),
        ];

        let shares = compute_investor_shares(&contributions);

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].investor_name, "Adwait");
        assert_eq!(shares[0].amount, 400.0);
    }

    #[test]
    fn investor_names_match_case_sensitively() {
        let contributions = vec![
            contribution(1, "Adwait", 100.0, date!(2024 - 01 - 01)),
            contribution(2, "adwait", 200.0, date!(2024 - 01 - 02)),
        ];

        let shares = compute_investor_shares(&contributions);

        assert_eq!(shares.len(), 2);
    }

    #[test]
    fn investor_share_percentages_sum_to_one_hundred() {
        let contributions = vec![
            contribution(1, "A", 333.33, date!(2024 - 01 - 01)),
            contribution(2, "B", 333.33, date!(2024 - 01 - 02)),
            contribution(3, "C", 333.34, date!(2024 - 01 - 03)),
        ];

        let shares = compute_investor_shares(&contributions);

        let percent_sum: f64 = shares
            .iter()
            .map(|share| {
                share
                    .percent_of_total
                    .strip_suffix('%')
                    .expect("percent string should end with %")
                    .parse::<f64>()
                    .expect("percent string should parse as a number")
            })
            .sum();

        // Each share rounds to one decimal place, so the sum may be off by up
        // to 0.05 per share.
        assert!((percent_sum - 100.0).abs() <= 0.15, "got {percent_sum}");
    }

    #[test]
    fn zero_contributions_give_zero_percentages() {
        let shares = compute_investor_shares(&[]);

        assert!(shares.is_empty());
    }

    #[test]
    fn zero_total_contributions_guard_against_division() {
        let contributions = vec![
            contribution(1, "Adwait", 0.0, date!(2024 - 01 - 01)),
            contribution(2, "Shree", 0.0, date!(2024 - 01 - 02)),
        ];

        let shares = compute_investor_shares(&contributions);

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].percent_of_total, "0.0%");
        assert_eq!(shares[1].percent_of_total, "0.0%");
    }

    #[test]
    fn profit_shares_match_worked_example() {
        let contributions = vec![
            contribution(1, "Adwait", 600.0, date!(2024 - 01 - 01)),
            contribution(2, "Shree", 400.0, date!(2024 - 01 - 02)),
        ];
        let shares = compute_investor_shares(&contributions);

        let profit_shares = compute_profit_shares(400.0, &shares, 1000.0);

        assert_eq!(profit_shares[0].investor_name, "Adwait");
        assert_eq!(profit_shares[0].formatted_amount, "£240.00");
        assert_eq!(profit_shares[1].investor_name, "Shree");
        assert_eq!(profit_shares[1].formatted_amount, "£160.00");
    }

    #[test]
    fn profit_shares_are_zero_when_no_contributions() {
        let shares = vec![super::InvestorShare {
            investor_name: "Adwait".to_owned(),
            amount: 0.0,
            percent_of_total: "0.0%".to_owned(),
        }];

        let profit_shares = compute_profit_shares(400.0, &shares, 0.0);

        assert_eq!(profit_shares[0].amount, 0.0);
        assert_eq!(profit_shares[0].formatted_amount, "£0.00");
    }

    #[test]
    fn negative_net_profit_splits_into_negative_shares() {
        let contributions = vec![
            contribution(1, "Adwait", 600.0, date!(2024 - 01 - 01)),
            contribution(2, "Shree", 400.0, date!(2024 - 01 - 02)),
        ];
        let shares = compute_investor_shares(&contributions);

        let profit_shares = compute_profit_shares(-100.0, &shares, 1000.0);

        assert_eq!(profit_shares[0].formatted_amount, "-£60.00");
        assert_eq!(profit_shares[1].formatted_amount, "-£40.00");
    }

    #[test]
    fn monthly_series_always_has_twelve_entries() {
        let series = compute_monthly_series(&[], 2024);

        assert_eq!(series.len(), 12);
        assert_eq!(series[0].month_name, "January");
        assert_eq!(series[11].month_name, "December");
        assert!(series.iter().all(|entry| entry.total == 0.0 && entry.count == 0));
    }

    #[test]
    fn monthly_series_buckets_by_calendar_month() {
        let records = vec![
            (date!(2024 - 01 - 01), 10.0),
            (date!(2024 - 01 - 31), 20.0),
            (date!(2024 - 12 - 31), 40.0),
        ];

        let series = compute_monthly_series(&records, 2024);

        assert_eq!(series[0].total, 30.0);
        assert_eq!(series[0].count, 2);
        assert_eq!(series[11].total, 40.0);
        assert_eq!(series[11].count, 1);
    }

    #[test]
    fn monthly_series_counts_leap_day_in_february() {
        let records = vec![(date!(2024 - 02 - 29), 99.0)];

        let series = compute_monthly_series(&records, 2024);

        assert_eq!(series[1].month_name, "February");
        assert_eq!(series[1].total, 99.0);
        assert_eq!(series[1].count, 1);
    }

    #[test]
    fn monthly_series_ignores_other_years() {
        let records = vec![(date!(2023 - 06 - 15), 50.0), (date!(2024 - 06 - 15), 60.0)];

        let series = compute_monthly_series(&records, 2024);

        assert_eq!(series[5].total, 60.0);
        assert_eq!(series[5].count, 1);
    }

    #[test]
    fn monthly_series_totals_sum_to_year_total() {
        let records: Vec<(Date, f64)> = (1..=12)
            .map(|month| {
                (
                    Date::from_calendar_date(2024, time::Month::try_from(month).unwrap(), 15)
                        .unwrap(),
                    month as f64,
                )
            })
            .collect();

        let series = compute_monthly_series(&records, 2024);

        let series_total: f64 = series.iter().map(|entry| entry.total).sum();
        let records_total: f64 = records.iter().map(|(_, amount)| amount).sum();
        assert_eq!(series_total, records_total);
    }

    #[test]
    fn category_breakdown_sorts_descending_and_groups() {
        let expenses = vec![
            expense(1, 100.0, date!(2024 - 01 - 01), Some("Food")),
            expense(2, 50.0, date!(2024 - 01 - 02), Some("Food")),
            expense(3, 30.0, date!(2024 - 01 - 03), Some("Fuel")),
        ];

        let breakdown = compute_category_breakdown(&expenses);

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, Some("Food".to_owned()));
        assert_eq!(breakdown[0].total, 150.0);
        assert_eq!(breakdown[1].category, Some("Fuel".to_owned()));
        assert_eq!(breakdown[1].total, 30.0);
    }

    #[test]
    fn category_breakdown_keeps_uncategorised_expenses() {
        let expenses = vec![
            expense(1, 10.0, date!(2024 - 01 - 01), None),
            expense(2, 5.0, date!(2024 - 01 - 02), Some("Fuel")),
        ];

        let breakdown = compute_category_breakdown(&expenses);

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, None);
        assert_eq!(breakdown[0].total, 10.0);
    }

    #[test]
    fn category_breakdown_ties_keep_first_seen_order() {
        let expenses = vec![
            expense(1, 25.0, date!(2024 - 01 - 01), Some("Fuel")),
            expense(2, 25.0, date!(2024 - 01 - 02), Some("Food")),
        ];

        let breakdown = compute_category_breakdown(&expenses);

        assert_eq!(breakdown[0].category, Some("Fuel".to_owned()));
        assert_eq!(breakdown[1].category, Some("Food".to_owned()));
    }

    #[test]
    fn report_matches_worked_example() {
        let contributions = vec![
            contribution(1, "Adwait", 600.0, date!(2024 - 01 - 01)),
            contribution(2, "Shree", 400.0, date!(2024 - 01 - 02)),
        ];
        let expenses = vec![expense(1, 100.0, date!(2024 - 02 - 01), None)];
        let sales = vec![sale(1, 500.0, date!(2024 - 02 - 02))];
        let generated_at = datetime!(2024-03-01 12:00 UTC);

        let report = assemble_report(contributions, expenses, sales, 2024, generated_at);

        assert_eq!(report.totals.total_contributions, 1000.0);
        assert_eq!(report.totals.total_expenses, 100.0);
        assert_eq!(report.totals.total_sales, 500.0);
        assert_eq!(report.totals.net_profit, 400.0);

        assert_eq!(report.investor_shares[0].percent_of_total, "60.0%");
        assert_eq!(report.investor_shares[1].percent_of_total, "40.0%");
        assert_eq!(report.profit_shares[0].formatted_amount, "£240.00");
        assert_eq!(report.profit_shares[1].formatted_amount, "£160.00");

        assert_eq!(report.total_records, 4);
    }

    #[test]
    fn report_is_idempotent() {
        let contributions = vec![contribution(1, "Adwait", 600.0, date!(2024 - 01 - 01))];
        let expenses = vec![expense(1, 100.0, date!(2024 - 02 - 01), Some("Food"))];
        let sales = vec![sale(1, 500.0, date!(2024 - 02 - 02))];
        let generated_at = datetime!(2024-03-01 12:00 UTC);

        let first = assemble_report(
            contributions.clone(),
            expenses.clone(),
            sales.clone(),
            2024,
            generated_at,
        );
        let second = assemble_report(contributions, expenses, sales, 2024, generated_at);

        assert_eq!(first, second);
    }

    #[test]
    fn report_on_empty_snapshot_has_no_nans() {
        let generated_at = datetime!(2024-03-01 12:00 UTC);

        let report = assemble_report(vec![], vec![], vec![], 2024, generated_at);

        assert_eq!(report.totals.net_profit, 0.0);
        assert!(report.investor_shares.is_empty());
        assert!(report.profit_shares.is_empty());
        assert_eq!(report.monthly_sales.len(), 12);
        assert_eq!(report.total_records, 0);
    }

    #[test]
    fn report_keeps_five_most_recent_records() {
        let expenses: Vec<_> = (1..=7)
            .map(|id| {
                expense(
                    id,
                    id as f64,
                    Date::from_calendar_date(2024, time::Month::January, id as u8).unwrap(),
                    None,
                )
            })
            .collect();
        let generated_at = datetime!(2024-03-01 12:00 UTC);

        let report = assemble_report(vec![], expenses, vec![], 2024, generated_at);

        assert_eq!(report.recent_expenses.len(), 5);
        assert_eq!(report.recent_expenses[0].id, 7);
        assert_eq!(report.recent_expenses[4].id, 3);
    }
}
