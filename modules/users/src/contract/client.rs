use async_trait::async_trait;

use crate::contract::model::{NewUser, User, UserUpdate};

/// Public API trait for the users module that other modules can use
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// Get a user by id
    async fn get_user(&self, id: &str) -> anyhow::Result<User>;

    /// Create a new user
    async fn create_user(&self, new_user: NewUser) -> anyhow::Result<User>;

    /// Replace the mutable fields of an existing user
    async fn update_user(&self, id: &str, update: UserUpdate) -> anyhow::Result<User>;

    /// Delete a user by id
    async fn delete_user(&self, id: &str) -> anyhow::Result<()>;
}
