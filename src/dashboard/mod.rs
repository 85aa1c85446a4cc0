//! The dashboard: an overview of the business's finances rendered from a
//! single [crate::summary::ReportPayload].

mod cards;
mod charts;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
