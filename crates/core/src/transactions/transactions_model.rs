use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{errors::ValidationError, Error};

/// Whether an amount counts toward income or expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    Income,
    Expense,
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Income" => Ok(TransactionType::Income),
            "Expense" => Ok(TransactionType::Expense),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown transaction type '{}'",
                other
            )))),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => write!(f, "Income"),
            TransactionType::Expense => write!(f, "Expense"),
        }
    }
}

#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    pub title: String,
    pub amount: f64,
    pub transaction_type: String,
    pub date: NaiveDateTime,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransaction {
    pub id: Option<String>,
    pub user_id: String,
    pub category_id: String,
    pub title: String,
    pub amount: f64,
    pub transaction_type: String,
    pub date: NaiveDateTime,
    pub description: Option<String>,
}

/// Read model joining the owning category's name, which is what every
/// listing endpoint and the CSV export render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionWithCategory {
    pub id: String,
    pub title: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub date: NaiveDateTime,
    pub category: String,
    pub description: Option<String>,
}

impl TransactionWithCategory {
    pub fn from_parts(transaction: Transaction, category: String) -> Self {
        TransactionWithCategory {
            id: transaction.id,
            title: transaction.title,
            amount: transaction.amount,
            transaction_type: transaction.transaction_type,
            date: transaction.date,
            category,
            description: transaction.description,
        }
    }
}

/// Validated input for creating a transaction.
#[derive(Debug, Clone)]
pub struct TransactionInput {
    pub title: String,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub date: NaiveDateTime,
    pub category_name: String,
    pub description: Option<String>,
}

/// Partial update; fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub transaction_type: Option<TransactionType>,
    pub date: Option<NaiveDateTime>,
    pub category_name: Option<String>,
    pub description: Option<String>,
}

/// Optional criteria for the filter endpoint; they compose conjunctively.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub category_name: Option<String>,
    pub search_term: Option<String>,
}
