//! Database operations for contributions.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    contribution::{Contribution, ContributionBuilder, ContributionId, InvestorName},
};

/// Create a contribution and return it with its generated ID.
pub fn create_contribution(
    builder: ContributionBuilder,
    connection: &Connection,
) -> Result<Contribution, Error> {
    connection.execute(
        "INSERT INTO contribution (investor_name, amount, date) VALUES (?1, ?2, ?3);",
        (builder.investor_name.as_ref(), builder.amount, builder.date),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Contribution {
        id,
        investor_name: builder.investor_name,
        amount: builder.amount,
        date: builder.date,
    })
}

/// Retrieve a single contribution by ID.
pub fn get_contribution(
    contribution_id: ContributionId,
    connection: &Connection,
) -> Result<Contribution, Error> {
    connection
        .prepare("SELECT id, investor_name, amount, date FROM contribution WHERE id = :id;")?
        .query_row(&[(":id", &contribution_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all contributions, most recent first.
pub fn get_all_contributions(connection: &Connection) -> Result<Vec<Contribution>, Error> {
    connection
        .prepare("SELECT id, investor_name, amount, date FROM contribution ORDER BY date DESC, id DESC;")?
        .query_map([], map_row)?
        .map(|maybe_contribution| maybe_contribution.map_err(|error| error.into()))
        .collect()
}

/// Update a contribution's fields. Returns an error if the contribution doesn't exist.
pub fn update_contribution(
    contribution_id: ContributionId,
    builder: ContributionBuilder,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE contribution SET investor_name = ?1, amount = ?2, date = ?3 WHERE id = ?4",
        (
            builder.investor_name.as_ref(),
            builder.amount,
            builder.date,
            contribution_id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingContribution);
    }

    Ok(())
}

/// Delete a contribution by ID. Returns an error if the contribution doesn't exist.
pub fn delete_contribution(
    contribution_id: ContributionId,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected =
        connection.execute("DELETE FROM contribution WHERE id = ?1", [contribution_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingContribution);
    }

    Ok(())
}

/// Initialize the contribution table.
pub fn create_contribution_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS contribution (
            id INTEGER PRIMARY KEY,
            investor_name TEXT NOT NULL,
            amount REAL NOT NULL,
            date TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_contribution_date ON contribution(date);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Contribution, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let investor_name = InvestorName::new_unchecked(&raw_name);
    let amount = row.get(2)?;
    let date = row.get(3)?;

    Ok(Contribution {
        id,
        investor_name,
        amount,
        date,
    })
}
