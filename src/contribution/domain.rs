//! Core contribution domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// A validated, non-empty investor name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct InvestorName(String);

impl InvestorName {
    /// Create an investor name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyInvestorName] if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyInvestorName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create an investor name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for InvestorName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for InvestorName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InvestorName::new(s)
    }
}

impl Display for InvestorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for a contribution.
pub type ContributionId = i64;

/// A capital injection by an investor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    /// The ID assigned by the database.
    pub id: ContributionId,
    /// Who put the money in.
    pub investor_name: InvestorName,
    /// How much was put in. Always non-negative.
    pub amount: f64,
    /// The date the money was put in.
    pub date: Date,
}

/// The validated fields for creating or updating a contribution.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionBuilder {
    /// Who put the money in.
    pub investor_name: InvestorName,
    /// How much was put in.
    pub amount: f64,
    /// The date the money was put in.
    pub date: Date,
}

/// Form data for contribution creation and editing.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContributionFormData {
    /// Who put the money in.
    pub investor_name: String,
    /// How much was put in.
    pub amount: f64,
    /// The date the money was put in as a YYYY-MM-DD string.
    pub date: String,
}

impl TryFrom<&ContributionFormData> for ContributionBuilder {
    type Error = Error;

    fn try_from(form_data: &ContributionFormData) -> Result<Self, Self::Error> {
        let investor_name = InvestorName::new(&form_data.investor_name)?;

        if form_data.amount < 0.0 {
            return Err(Error::NegativeAmount(form_data.amount));
        }

        let date = Date::parse(&form_data.date, &DATE_FORMAT)
            .map_err(|_| Error::InvalidDate(form_data.date.clone()))?;

        Ok(Self {
            investor_name,
            amount: form_data.amount,
            date,
        })
    }
}
