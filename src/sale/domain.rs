//! Core sale domain types.

use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Database identifier for a sale.
pub type SaleId = i64;

/// Money taken from customers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    /// The ID assigned by the database.
    pub id: SaleId,
    /// How much was taken. Always non-negative.
    pub amount: f64,
    /// The date the sale happened.
    pub date: Date,
    /// An optional note about the sale, e.g. "Saturday market".
    pub description: Option<String>,
}

/// The validated fields for creating or updating a sale.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleBuilder {
    /// How much was taken.
    pub amount: f64,
    /// The date the sale happened.
    pub date: Date,
    /// An optional note about the sale.
    pub description: Option<String>,
}

/// Form data for sale creation and editing.
#[derive(Debug, Serialize, Deserialize)]
pub struct SaleFormData {
    /// How much was taken.
    pub amount: f64,
    /// The date the sale happened as a YYYY-MM-DD string.
    pub date: String,
    /// An optional note about the sale. An empty string means no note.
    #[serde(default)]
    pub description: String,
}

impl TryFrom<&SaleFormData> for SaleBuilder {
    type Error = Error;

    fn try_from(form_data: &SaleFormData) -> Result<Self, Self::Error> {
        if form_data.amount < 0.0 {
            return Err(Error::NegativeAmount(form_data.amount));
        }

        let date = Date::parse(&form_data.date, &DATE_FORMAT)
            .map_err(|_| Error::InvalidDate(form_data.date.clone()))?;

        let description = match form_data.description.trim() {
            "" => None,
            description => Some(description.to_owned()),
        };

        Ok(Self {
            amount: form_data.amount,
            date,
            description,
        })
    }
}
