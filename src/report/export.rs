//! The report export endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    AppState, Error,
    contribution::get_all_contributions,
    expense::get_all_expenses,
    report::{layout::build_report_sheets, xlsx::write_workbook},
    sale::get_all_sales,
    summary::assemble_report,
    timezone::get_local_date,
};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!(
    "[year]-[month repr:numerical padding:zero]-[day padding:zero]"
);

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// The state needed for the report export endpoint.
#[derive(Debug, Clone)]
pub struct ExportReportState {
    /// The connection to the database holding the application's records.
    pub db_connection: Arc<Mutex<Connection>>,
    /// An IANA timezone name used for the report year and the file name date.
    pub local_timezone: String,
}

impl FromRef<AppState> for ExportReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Generate the report workbook and send it as a file download.
pub async fn get_export_report(State(state): State<ExportReportState>) -> Result<Response, Error> {
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

    let sheets = build_report_sheets(&report);
    let buffer = write_workbook(&sheets)
        .inspect_err(|error| tracing::error!("Failed to write report workbook: {error}"))?;

    let date_stamp = today
        .format(&DATE_FORMAT)
        .map_err(|error| Error::ReportWriteError(error.to_string()))?;
    let file_name = format!("kitchen_ledger_report_{date_stamp}.xlsx");

    Ok((
        [
            (CONTENT_TYPE, XLSX_CONTENT_TYPE.to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        buffer,
    )
        .into_response())
}
