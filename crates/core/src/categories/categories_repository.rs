use crate::categories::categories_model::{Category, NewCategory};
use crate::categories::categories_traits::CategoryRepositoryTrait;
use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::schema::{categories, transactions};
use crate::Error;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

pub struct CategoryRepository {
    pool: Arc<DbPool>,
}

impl CategoryRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        CategoryRepository { pool }
    }
}

impl CategoryRepositoryTrait for CategoryRepository {
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(categories::table
            .filter(categories::user_id.eq(user_id))
            .order(categories::name.asc())
            .load::<Category>(&mut conn)?)
    }

    fn find_by_id(&self, user_id: &str, category_id: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(categories::table
            .filter(categories::id.eq(category_id))
            .filter(categories::user_id.eq(user_id))
            .first::<Category>(&mut conn)
            .optional()?)
    }

    fn find_by_name(&self, user_id: &str, name: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(categories::table
            .filter(categories::name.eq(name))
            .filter(categories::user_id.eq(user_id))
            .first::<Category>(&mut conn)
            .optional()?)
    }

    fn create(&self, mut new_category: NewCategory) -> Result<Category> {
        let mut conn = get_connection(&self.pool)?;

        new_category.id = Some(Uuid::new_v4().to_string());

        Ok(diesel::insert_into(categories::table)
            .values(&new_category)
            .returning(categories::all_columns)
            .get_result(&mut conn)?)
    }

    fn delete(&self, user_id: &str, category_id: &str) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;

        // The ownership check, the in-use guard and the delete must see the
        // same state, so they run in one transaction.
        conn.transaction::<_, Error, _>(|conn| {
            let owned: Option<Category> = categories::table
                .filter(categories::id.eq(category_id))
                .filter(categories::user_id.eq(user_id))
                .first::<Category>(conn)
                .optional()?;

            let Some(category) = owned else {
                return Err(Error::NotFound("Category".to_string()));
            };

            let in_use: i64 = transactions::table
                .filter(transactions::category_id.eq(&category.id))
                .count()
                .get_result(conn)?;

            if in_use > 0 {
                return Err(Error::Conflict(format!(
                    "Cannot delete category: {} transactions are assigned to it",
                    in_use
                )));
            }

            diesel::delete(categories::table.find(&category.id)).execute(conn)?;
            Ok(())
        })
    }
}
