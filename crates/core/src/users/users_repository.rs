use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::schema::users;
use crate::users::users_model::{NewUser, User};
use crate::users::users_traits::UserRepositoryTrait;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

pub struct UserRepository {
    pool: Arc<DbPool>,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        UserRepository { pool }
    }
}

impl UserRepositoryTrait for UserRepository {
    fn find_by_id(&self, user_id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(users::table
            .find(user_id)
            .first::<User>(&mut conn)
            .optional()?)
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(users::table
            .filter(users::username.eq(username))
            .first::<User>(&mut conn)
            .optional()?)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(users::table
            .filter(users::email.eq(email))
            .first::<User>(&mut conn)
            .optional()?)
    }

    fn create(&self, mut new_user: NewUser) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;

        new_user.id = Some(Uuid::new_v4().to_string());

        Ok(diesel::insert_into(users::table)
            .values(&new_user)
            .returning(users::all_columns)
            .get_result(&mut conn)?)
    }
}
