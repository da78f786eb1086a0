pub mod db;

pub mod budgets;
pub mod categories;
pub mod dashboard;
pub mod transactions;
pub mod users;

pub mod errors;
pub mod schema;

pub use errors::{Error, Result};
