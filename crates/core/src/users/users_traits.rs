use crate::errors::Result;
use crate::users::users_model::{NewUser, User};
use async_trait::async_trait;

/// Trait for user repository operations
pub trait UserRepositoryTrait: Send + Sync {
    fn find_by_id(&self, user_id: &str) -> Result<Option<User>>;
    fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    fn create(&self, new_user: NewUser) -> Result<User>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    /// Register a new user; duplicate username or email is a conflict.
    async fn register(&self, new_user: NewUser) -> Result<User>;

    /// Look up a user for credential verification.
    fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Look up a user by id, used when resolving bearer tokens.
    fn get_user_by_id(&self, user_id: &str) -> Result<Option<User>>;
}
