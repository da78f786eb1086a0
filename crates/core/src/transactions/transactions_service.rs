use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::sync::Arc;

use crate::categories::CategoryRepositoryTrait;
use crate::errors::{Result, ValidationError};
use crate::transactions::transactions_model::{
    NewTransaction, TransactionFilter, TransactionInput, TransactionPatch,
    TransactionWithCategory,
};
use crate::transactions::transactions_traits::{
    TransactionRepositoryTrait, TransactionServiceTrait,
};
use crate::Error;
use async_trait::async_trait;

/// Half-open window covering one calendar month, or `None` for a month
/// outside 1..=12 (such a filter simply matches nothing).
pub(crate) fn month_range(year: i32, month: i32) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let month = u32::try_from(month).ok()?;
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start.and_time(NaiveTime::MIN), end.and_time(NaiveTime::MIN)))
}

pub struct TransactionService<T: TransactionRepositoryTrait, C: CategoryRepositoryTrait> {
    transaction_repo: Arc<T>,
    category_repo: Arc<C>,
}

impl<T: TransactionRepositoryTrait, C: CategoryRepositoryTrait> TransactionService<T, C> {
    pub fn new(transaction_repo: Arc<T>, category_repo: Arc<C>) -> Self {
        TransactionService {
            transaction_repo,
            category_repo,
        }
    }

    fn resolve_category_id(&self, user_id: &str, name: &str) -> Result<String> {
        self.category_repo
            .find_by_name(user_id, name)?
            .map(|category| category.id)
            .ok_or_else(|| Error::NotFound("Category".to_string()))
    }
}

#[async_trait]
impl<T, C> TransactionServiceTrait for TransactionService<T, C>
where
    T: TransactionRepositoryTrait + Send + Sync,
    C: CategoryRepositoryTrait + Send + Sync,
{
    fn list_transactions(&self, user_id: &str) -> Result<Vec<TransactionWithCategory>> {
        Ok(self
            .transaction_repo
            .list_with_category(user_id, None, None)?
            .into_iter()
            .map(|(transaction, category)| {
                TransactionWithCategory::from_parts(transaction, category)
            })
            .collect())
    }

    fn get_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<TransactionWithCategory> {
        let (transaction, category) = self
            .transaction_repo
            .find_with_category(user_id, transaction_id)?
            .ok_or_else(|| Error::NotFound("Transaction".to_string()))?;
        Ok(TransactionWithCategory::from_parts(transaction, category))
    }

    fn filter_transactions(
        &self,
        user_id: &str,
        filter: TransactionFilter,
    ) -> Result<Vec<TransactionWithCategory>> {
        // Month and year only narrow the result when both are present.
        let date_range = match (filter.month, filter.year) {
            (Some(month), Some(year)) => match month_range(year, month) {
                Some(range) => Some(range),
                None => return Ok(Vec::new()),
            },
            _ => None,
        };

        let category_id = match filter.category_name.as_deref() {
            Some(name) => Some(self.resolve_category_id(user_id, name)?),
            None => None,
        };

        let mut rows = self
            .transaction_repo
            .list_with_category(user_id, date_range, category_id)?;

        if let Some(term) = filter.search_term.as_deref() {
            let needle = term.to_lowercase();
            rows.retain(|(transaction, _)| {
                transaction.title.to_lowercase().contains(&needle)
                    || transaction
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            });
        }

        Ok(rows
            .into_iter()
            .map(|(transaction, category)| {
                TransactionWithCategory::from_parts(transaction, category)
            })
            .collect())
    }

    fn export_csv(&self, user_id: &str) -> Result<Vec<u8>> {
        let rows = self.transaction_repo.list_with_category(user_id, None, None)?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["Title", "Amount", "Type", "Date", "Category", "Description"])?;

        for (transaction, category) in rows {
            let amount = transaction.amount.to_string();
            let date = transaction.date.format("%Y-%m-%dT%H:%M:%S").to_string();
            writer.write_record([
                transaction.title.as_str(),
                amount.as_str(),
                transaction.transaction_type.as_str(),
                date.as_str(),
                category.as_str(),
                transaction.description.as_deref().unwrap_or(""),
            ])?;
        }

        writer
            .into_inner()
            .map_err(|e| Error::Validation(ValidationError::InvalidInput(e.to_string())))
    }

    async fn create_transaction(
        &self,
        user_id: &str,
        input: TransactionInput,
    ) -> Result<TransactionWithCategory> {
        if input.title.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "title".to_string(),
            )));
        }

        let category = self
            .category_repo
            .find_by_name(user_id, &input.category_name)?
            .ok_or_else(|| Error::NotFound("Category".to_string()))?;

        let created = self.transaction_repo.insert(NewTransaction {
            id: None,
            user_id: user_id.to_string(),
            category_id: category.id,
            title: input.title,
            amount: input.amount,
            transaction_type: input.transaction_type.to_string(),
            date: input.date,
            description: input.description,
        })?;

        Ok(TransactionWithCategory::from_parts(created, category.name))
    }

    async fn update_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        patch: TransactionPatch,
    ) -> Result<TransactionWithCategory> {
        let (mut transaction, mut category_name) = self
            .transaction_repo
            .find_with_category(user_id, transaction_id)?
            .ok_or_else(|| Error::NotFound("Transaction".to_string()))?;

        if let Some(title) = patch.title {
            transaction.title = title;
        }
        if let Some(amount) = patch.amount {
            transaction.amount = amount;
        }
        if let Some(transaction_type) = patch.transaction_type {
            transaction.transaction_type = transaction_type.to_string();
        }
        if let Some(date) = patch.date {
            transaction.date = date;
        }
        if let Some(description) = patch.description {
            transaction.description = Some(description);
        }
        if let Some(name) = patch.category_name {
            if name != category_name {
                transaction.category_id = self.resolve_category_id(user_id, &name)?;
                category_name = name;
            }
        }
        transaction.updated_at = Utc::now().naive_utc();

        let updated = self.transaction_repo.update(transaction)?;
        Ok(TransactionWithCategory::from_parts(updated, category_name))
    }

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<()> {
        let deleted = self.transaction_repo.delete(user_id, transaction_id)?;
        if deleted == 0 {
            return Err(Error::NotFound("Transaction".to_string()));
        }
        Ok(())
    }
}
