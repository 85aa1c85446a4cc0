//! Sales record management.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::{create_sale_endpoint, get_new_sale_page};
pub use db::{create_sale, create_sale_table, delete_sale, get_all_sales, get_sale, update_sale};
pub use delete::delete_sale_endpoint;
pub use domain::{Sale, SaleBuilder, SaleId};
pub use edit::{get_edit_sale_page, update_sale_endpoint};
pub use list::get_sales_page;
