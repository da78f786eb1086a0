use crate::categories::categories_model::{Category, NewCategory};
use crate::categories::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::{Result, ValidationError};
use crate::Error;
use async_trait::async_trait;
use std::sync::Arc;

pub struct CategoryService<T: CategoryRepositoryTrait> {
    category_repo: Arc<T>,
}

impl<T: CategoryRepositoryTrait> CategoryService<T> {
    pub fn new(category_repo: Arc<T>) -> Self {
        CategoryService { category_repo }
    }
}

#[async_trait]
impl<T: CategoryRepositoryTrait + Send + Sync> CategoryServiceTrait for CategoryService<T> {
    fn list_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        self.category_repo.list_by_user(user_id)
    }

    fn get_category_by_name(&self, user_id: &str, name: &str) -> Result<Option<Category>> {
        self.category_repo.find_by_name(user_id, name)
    }

    async fn create_category(&self, user_id: &str, name: String) -> Result<Category> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Category name cannot be empty".to_string(),
            )));
        }

        if self.category_repo.find_by_name(user_id, &name)?.is_some() {
            return Err(Error::Conflict("Category already exists".to_string()));
        }

        self.category_repo.create(NewCategory {
            id: None,
            user_id: user_id.to_string(),
            name,
        })
    }

    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<()> {
        self.category_repo.delete(user_id, category_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;
    use crate::db::DbPool;
    use crate::categories::categories_repository::CategoryRepository;
    use crate::schema::users;
    use diesel::prelude::*;
    use uuid::Uuid;

    fn insert_user(pool: &DbPool, username: &str) -> String {
        let mut conn = pool.get().unwrap();
        let user_id = Uuid::new_v4().to_string();
        diesel::insert_into(users::table)
            .values((
                users::id.eq(&user_id),
                users::username.eq(username),
                users::email.eq(format!("{username}@example.com")),
                users::password_hash.eq("hash"),
            ))
            .execute(&mut conn)
            .unwrap();
        user_id
    }

    #[tokio::test]
    async fn create_and_list_categories() {
        let pool = memory_pool();
        let user = insert_user(&pool, "alice");
        let service = CategoryService::new(Arc::new(CategoryRepository::new(pool)));

        service
            .create_category(&user, "Rent".to_string())
            .await
            .unwrap();
        service
            .create_category(&user, "Food".to_string())
            .await
            .unwrap();

        let names: Vec<String> = service
            .list_categories(&user)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Food", "Rent"]);
    }

    #[tokio::test]
    async fn duplicate_name_is_conflict_within_user_only() {
        let pool = memory_pool();
        let alice = insert_user(&pool, "alice");
        let bob = insert_user(&pool, "bob");
        let service = CategoryService::new(Arc::new(CategoryRepository::new(pool)));

        service
            .create_category(&alice, "Food".to_string())
            .await
            .unwrap();

        let err = service
            .create_category(&alice, "Food".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));

        // Same name for a different user is fine.
        service
            .create_category(&bob, "Food".to_string())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn empty_name_is_rejected() {
        let pool = memory_pool();
        let user = insert_user(&pool, "alice");
        let service = CategoryService::new(Arc::new(CategoryRepository::new(pool)));

        let err = service
            .create_category(&user, "   ".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn delete_is_ownership_scoped() {
        let pool = memory_pool();
        let alice = insert_user(&pool, "alice");
        let bob = insert_user(&pool, "bob");
        let service = CategoryService::new(Arc::new(CategoryRepository::new(pool)));

        let category = service
            .create_category(&alice, "Food".to_string())
            .await
            .unwrap();

        // Bob guessing Alice's id must look like a missing record.
        let err = service.delete_category(&bob, &category.id).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        service.delete_category(&alice, &category.id).await.unwrap();
        assert!(service.list_categories(&alice).unwrap().is_empty());
    }
}
