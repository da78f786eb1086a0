use crate::errors::Result;
use crate::users::users_model::{NewUser, User};
use crate::users::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::Error;
use async_trait::async_trait;
use std::sync::Arc;

pub struct UserService<T: UserRepositoryTrait> {
    user_repo: Arc<T>,
}

impl<T: UserRepositoryTrait> UserService<T> {
    pub fn new(user_repo: Arc<T>) -> Self {
        UserService { user_repo }
    }
}

#[async_trait]
impl<T: UserRepositoryTrait + Send + Sync> UserServiceTrait for UserService<T> {
    async fn register(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;

        if self.user_repo.find_by_username(&new_user.username)?.is_some() {
            return Err(Error::Conflict("Username already exists".to_string()));
        }
        if self.user_repo.find_by_email(&new_user.email)?.is_some() {
            return Err(Error::Conflict("Email already exists".to_string()));
        }

        self.user_repo.create(new_user)
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo.find_by_username(username)
    }

    fn get_user_by_id(&self, user_id: &str) -> Result<Option<User>> {
        self.user_repo.find_by_id(user_id)
    }
}
