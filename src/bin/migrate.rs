use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use kitchen_ledger::{
    ContributionBuilder, ExpenseBuilder, SaleBuilder, create_contribution, create_expense,
    create_sale, get_all_contributions, get_all_expenses, get_all_sales, initialize_db,
};

/// A utility for copying the records from an existing Kitchen Ledger database
/// into a freshly initialized one.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database to copy records from.
    #[arg(long, short)]
    source_path: String,

    /// File path to save the new SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let source_path = Path::new(&args.source_path);
    let output_path = Path::new(&args.output_path);

    if !source_path.is_file() {
        eprintln!("No database found at {source_path:#?}.");
        exit(1);
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    let source = Connection::open(source_path)?;

    println!("Creating database at {output_path:#?}");
    let destination = Connection::open(output_path)?;
    initialize_db(&destination)?;

    let contributions = get_all_contributions(&source)?;
    println!("Copying {} contributions...", contributions.len());
    for contribution in contributions {
        create_contribution(
            ContributionBuilder {
                investor_name: contribution.investor_name,
                amount: contribution.amount,
                date: contribution.date,
            },
            &destination,
        )?;
    }

    let expenses = get_all_expenses(&source)?;
    println!("Copying {} expenses...", expenses.len());
    for expense in expenses {
        create_expense(
            ExpenseBuilder {
                description: expense.description,
                amount: expense.amount,
                date: expense.date,
                category: expense.category,
            },
            &destination,
        )?;
    }

    let sales = get_all_sales(&source)?;
    println!("Copying {} sales...", sales.len());
    for sale in sales {
        create_sale(
            SaleBuilder {
                amount: sale.amount,
                date: sale.date,
                description: sale.description,
            },
            &destination,
        )?;
    }

    println!("Success!");

    Ok(())
}
