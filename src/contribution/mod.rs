//! Investor contribution management.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::{create_contribution_endpoint, get_new_contribution_page};
pub use db::{
    create_contribution, create_contribution_table, delete_contribution, get_all_contributions,
    get_contribution, update_contribution,
};
pub use delete::delete_contribution_endpoint;
pub use domain::{Contribution, ContributionBuilder, ContributionId, InvestorName};
pub use edit::{get_edit_contribution_page, update_contribution_endpoint};
pub use list::get_contributions_page;
