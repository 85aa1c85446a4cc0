//! Rendering the report layout into XLSX bytes.

use rust_xlsxwriter::{Format, Workbook};
use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    report::layout::{Cell, Sheet},
};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!(
    "[year]-[month repr:numerical padding:zero]-[day padding:zero]"
);

/// The Excel number format for currency cells.
const CURRENCY_NUMBER_FORMAT: &str = "\"£\"#,##0.00";

/// Write the laid-out sheets into an in-memory XLSX workbook.
pub(super) fn write_workbook(sheets: &[Sheet]) -> Result<Vec<u8>, Error> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let currency_format = Format::new().set_num_format(CURRENCY_NUMBER_FORMAT);

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (column_index, width) in sheet.column_widths.iter().enumerate() {
            worksheet.set_column_width(column_index as u16, *width)?;
        }

        for (row_index, row) in sheet.rows.iter().enumerate() {
            let row_index = row_index as u32;

            for (column_index, cell) in row.iter().enumerate() {
                let column_index = column_index as u16;

                match cell {
                    Cell::Empty => {}
                    Cell::Text(text) => {
                        worksheet.write_string(row_index, column_index, text)?;
                    }
                    Cell::Header(text) => {
                        worksheet.write_string_with_format(
                            row_index,
                            column_index,
                            text,
                            &header_format,
                        )?;
                    }
                    Cell::Currency(amount) => {
                        worksheet.write_number_with_format(
                            row_index,
                            column_index,
                            *amount,
                            &currency_format,
                        )?;
                    }
                    Cell::Integer(value) => {
                        worksheet.write_number(row_index, column_index, *value as f64)?;
                    }
                    Cell::Date(date) => {
                        worksheet.write_string(
                            row_index,
                            column_index,
                            &date.format(&DATE_FORMAT).unwrap_or_default(),
                        )?;
                    }
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
