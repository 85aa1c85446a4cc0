//! Database initialization for the application's three record tables.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{
    Error, contribution::create_contribution_table, expense::create_expense_table,
    sale::create_sale_table,
};

/// Create the tables for the domain models if they do not already exist.
///
/// All tables are created within a single exclusive transaction so a partially
/// initialized database is never left behind.
///
/// # Errors
/// Returns an error if the tables could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_contribution_table(&transaction)?;
    create_expense_table(&transaction)?;
    create_sale_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
