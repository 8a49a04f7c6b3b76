use std::sync::Arc;

use async_trait::async_trait;

use crate::contract::{
    client::UsersApi,
    error::UsersError,
    model::{NewUser, User, UserUpdate},
};
use crate::domain::{error::DomainError, registry::UserRegistry};

/// Local implementation of the UsersApi trait that delegates to the registry
pub struct UsersLocalClient {
    registry: Arc<UserRegistry>,
}

impl UsersLocalClient {
    pub fn new(registry: Arc<UserRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl UsersApi for UsersLocalClient {
    async fn get_user(&self, id: &str) -> anyhow::Result<User> {
        self.registry.get_user(id).map_err(map_domain_error_to_anyhow)
    }

    async fn create_user(&self, new_user: NewUser) -> anyhow::Result<User> {
        self.registry
            .create_user(new_user)
            .map_err(map_domain_error_to_anyhow)
    }

    async fn update_user(&self, id: &str, update: UserUpdate) -> anyhow::Result<User> {
        self.registry
            .update_user(id, update)
            .map_err(map_domain_error_to_anyhow)
    }

    async fn delete_user(&self, id: &str) -> anyhow::Result<()> {
        self.registry
            .delete_user(id)
            .map_err(map_domain_error_to_anyhow)
    }
}

/// Map domain errors to contract errors wrapped in anyhow
fn map_domain_error_to_anyhow(domain_error: DomainError) -> anyhow::Error {
    let contract_error = match domain_error {
        DomainError::UserNotFound { id } => UsersError::not_found(id),
        DomainError::EmptyUsername => UsersError::invalid_argument("username cannot be empty"),
        DomainError::EmptyEmail => UsersError::invalid_argument("email cannot be empty"),
    };

    anyhow::Error::new(contract_error)
}
