//! Business expense management.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::{create_expense_endpoint, get_new_expense_page};
pub use db::{
    create_expense, create_expense_table, delete_expense, get_all_expenses, get_expense,
    update_expense,
};
pub use delete::delete_expense_endpoint;
pub use domain::{Expense, ExpenseBuilder, ExpenseId};
pub use edit::{get_edit_expense_page, update_expense_endpoint};
pub use list::{UNCATEGORISED_LABEL, get_expenses_page};
