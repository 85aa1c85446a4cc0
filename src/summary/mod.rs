//! The financial summary engine.
//!
//! Pure functions over in-memory snapshots of the application's records.
//! The dashboard and the report exporter both render from the single
//! [ReportPayload] this module produces, so the two views always agree.

mod engine;

pub use engine::{
    CategoryTotal, InvestorShare, MonthlyEntry, ProfitShare, ReportPayload, Totals,
    assemble_report, compute_category_breakdown, compute_investor_shares, compute_monthly_series,
    compute_profit_shares, compute_totals,
};
