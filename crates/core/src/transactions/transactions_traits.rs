use chrono::NaiveDateTime;

use crate::errors::Result;
use crate::transactions::transactions_model::{
    NewTransaction, Transaction, TransactionFilter, TransactionInput, TransactionPatch,
    TransactionWithCategory,
};
use async_trait::async_trait;

/// Trait for transaction repository operations. All reads join the owning
/// category so callers never see a bare `category_id`.
pub trait TransactionRepositoryTrait: Send + Sync {
    /// List a user's transactions with their category names, ordered by
    /// `(date, id)` so equal-date rows come back in a stable order.
    /// `date_range` is half-open: `start <= date < end`.
    fn list_with_category(
        &self,
        user_id: &str,
        date_range: Option<(NaiveDateTime, NaiveDateTime)>,
        category_id: Option<String>,
    ) -> Result<Vec<(Transaction, String)>>;

    fn find_with_category(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<Option<(Transaction, String)>>;

    fn insert(&self, new_transaction: NewTransaction) -> Result<Transaction>;

    fn update(&self, transaction: Transaction) -> Result<Transaction>;

    /// Returns the number of rows removed (0 or 1).
    fn delete(&self, user_id: &str, transaction_id: &str) -> Result<usize>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn list_transactions(&self, user_id: &str) -> Result<Vec<TransactionWithCategory>>;

    fn get_transaction(&self, user_id: &str, transaction_id: &str)
        -> Result<TransactionWithCategory>;

    fn filter_transactions(
        &self,
        user_id: &str,
        filter: TransactionFilter,
    ) -> Result<Vec<TransactionWithCategory>>;

    /// Render all of a user's transactions as a CSV document.
    fn export_csv(&self, user_id: &str) -> Result<Vec<u8>>;

    async fn create_transaction(
        &self,
        user_id: &str,
        input: TransactionInput,
    ) -> Result<TransactionWithCategory>;

    async fn update_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        patch: TransactionPatch,
    ) -> Result<TransactionWithCategory>;

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<()>;
}
