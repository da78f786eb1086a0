use crate::categories::categories_model::{Category, NewCategory};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for category repository operations. Every lookup is scoped to the
/// owning user; a valid id belonging to someone else behaves like a miss.
pub trait CategoryRepositoryTrait: Send + Sync {
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Category>>;

    fn find_by_id(&self, user_id: &str, category_id: &str) -> Result<Option<Category>>;

    fn find_by_name(&self, user_id: &str, name: &str) -> Result<Option<Category>>;

    fn create(&self, new_category: NewCategory) -> Result<Category>;

    /// Delete a category (only if no transactions reference it).
    fn delete(&self, user_id: &str, category_id: &str) -> Result<()>;
}

/// Trait for category service operations
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    fn list_categories(&self, user_id: &str) -> Result<Vec<Category>>;

    fn get_category_by_name(&self, user_id: &str, name: &str) -> Result<Option<Category>>;

    async fn create_category(&self, user_id: &str, name: String) -> Result<Category>;

    /// Delete a category (fails if transactions are assigned; budgets for
    /// the category are removed by the schema's cascade).
    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<()>;
}
