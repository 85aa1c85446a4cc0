//! Core expense domain types.

use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Database identifier for an expense.
pub type ExpenseId = i64;

/// Money spent running the business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID assigned by the database.
    pub id: ExpenseId,
    /// What the money was spent on.
    pub description: String,
    /// How much was spent. Always non-negative.
    pub amount: f64,
    /// The date the money was spent.
    pub date: Date,
    /// An optional free-text label for grouping expenses, e.g. "Ingredients".
    pub category: Option<String>,
}

/// The validated fields for creating or updating an expense.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseBuilder {
    /// What the money was spent on.
    pub description: String,
    /// How much was spent.
    pub amount: f64,
    /// The date the money was spent.
    pub date: Date,
    /// An optional free-text label for grouping expenses.
    pub category: Option<String>,
}

/// Form data for expense creation and editing.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpenseFormData {
    /// What the money was spent on.
    pub description: String,
    /// How much was spent.
    pub amount: f64,
    /// The date the money was spent as a YYYY-MM-DD string.
    pub date: String,
    /// An optional category label. An empty string means no category.
    #[serde(default)]
    pub category: String,
}

impl TryFrom<&ExpenseFormData> for ExpenseBuilder {
    type Error = Error;

    fn try_from(form_data: &ExpenseFormData) -> Result<Self, Self::Error> {
        let description = form_data.description.trim();

        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        if form_data.amount < 0.0 {
            return Err(Error::NegativeAmount(form_data.amount));
        }

        let date = Date::parse(&form_data.date, &DATE_FORMAT)
            .map_err(|_| Error::InvalidDate(form_data.date.clone()))?;

        let category = match form_data.category.trim() {
            "" => None,
            category => Some(category.to_owned()),
        };

        Ok(Self {
            description: description.to_owned(),
            amount: form_data.amount,
            date,
            category,
        })
    }
}
