//! Database operations for sales.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    sale::{Sale, SaleBuilder, SaleId},
};

/// Create a sale and return it with its generated ID.
pub fn create_sale(builder: SaleBuilder, connection: &Connection) -> Result<Sale, Error> {
    connection.execute(
        "INSERT INTO sale (amount, date, description) VALUES (?1, ?2, ?3);",
        (builder.amount, builder.date, &builder.description),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Sale {
        id,
        amount: builder.amount,
        date: builder.date,
        description: builder.description,
    })
}

/// Retrieve a single sale by ID.
pub fn get_sale(sale_id: SaleId, connection: &Connection) -> Result<Sale, Error> {
    connection
        .prepare("SELECT id, amount, date, description FROM sale WHERE id = :id;")?
        .query_row(&[(":id", &sale_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all sales, most recent first.
pub fn get_all_sales(connection: &Connection) -> Result<Vec<Sale>, Error> {
    connection
        .prepare("SELECT id, amount, date, description FROM sale ORDER BY date DESC, id DESC;")?
        .query_map([], map_row)?
        .map(|maybe_sale| maybe_sale.map_err(|error| error.into()))
        .collect()
}

/// Update a sale's fields. Returns an error if the sale doesn't exist.
pub fn update_sale(
    sale_id: SaleId,
    builder: SaleBuilder,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE sale SET amount = ?1, date = ?2, description = ?3 WHERE id = ?4",
        (builder.amount, builder.date, &builder.description, sale_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingSale);
    }

    Ok(())
}

/// Delete a sale by ID. Returns an error if the sale doesn't exist.
pub fn delete_sale(sale_id: SaleId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM sale WHERE id = ?1", [sale_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingSale);
    }

    Ok(())
}

/// Initialize the sale table.
pub fn create_sale_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS sale (
            id INTEGER PRIMARY KEY,
            amount REAL NOT NULL,
            date TEXT NOT NULL,
            description TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_sale_date ON sale(date);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Sale, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let date = row.get(2)?;
    let description = row.get(3)?;

    Ok(Sale {
        id,
        amount,
        date,
        description,
    })
}
