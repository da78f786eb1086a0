use chrono::NaiveDateTime;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::schema::{categories, transactions};
use crate::transactions::transactions_model::{NewTransaction, Transaction};
use crate::transactions::transactions_traits::TransactionRepositoryTrait;

pub struct TransactionRepository {
    pool: Arc<DbPool>,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        TransactionRepository { pool }
    }
}

impl TransactionRepositoryTrait for TransactionRepository {
    fn list_with_category(
        &self,
        user_id: &str,
        date_range: Option<(NaiveDateTime, NaiveDateTime)>,
        category_id: Option<String>,
    ) -> Result<Vec<(Transaction, String)>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = transactions::table
            .inner_join(categories::table.on(categories::id.eq(transactions::category_id)))
            .filter(transactions::user_id.eq(user_id.to_string()))
            .select((Transaction::as_select(), categories::name))
            .into_boxed();

        if let Some((start, end)) = date_range {
            query = query
                .filter(transactions::date.ge(start))
                .filter(transactions::date.lt(end));
        }

        if let Some(category_id) = category_id {
            query = query.filter(transactions::category_id.eq(category_id));
        }

        Ok(query
            .order((transactions::date.asc(), transactions::id.asc()))
            .load::<(Transaction, String)>(&mut conn)?)
    }

    fn find_with_category(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<Option<(Transaction, String)>> {
        let mut conn = get_connection(&self.pool)?;

        Ok(transactions::table
            .inner_join(categories::table.on(categories::id.eq(transactions::category_id)))
            .filter(transactions::id.eq(transaction_id))
            .filter(transactions::user_id.eq(user_id))
            .select((Transaction::as_select(), categories::name))
            .first::<(Transaction, String)>(&mut conn)
            .optional()?)
    }

    fn insert(&self, mut new_transaction: NewTransaction) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;

        new_transaction.id = Some(Uuid::new_v4().to_string());

        Ok(diesel::insert_into(transactions::table)
            .values(&new_transaction)
            .returning(transactions::all_columns)
            .get_result(&mut conn)?)
    }

    fn update(&self, transaction: Transaction) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;

        Ok(diesel::update(
            transactions::table
                .filter(transactions::id.eq(&transaction.id))
                .filter(transactions::user_id.eq(&transaction.user_id)),
        )
        .set(&transaction)
        .returning(transactions::all_columns)
        .get_result(&mut conn)?)
    }

    fn delete(&self, user_id: &str, transaction_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;

        Ok(diesel::delete(
            transactions::table
                .filter(transactions::id.eq(transaction_id))
                .filter(transactions::user_id.eq(user_id)),
        )
        .execute(&mut conn)?)
    }
}
