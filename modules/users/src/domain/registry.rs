use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, info, instrument};

use crate::contract::model::{NewUser, User, UserUpdate};
use crate::domain::error::DomainError;

/// Canonical in-memory store of user records.
///
/// All state sits behind a single `RwLock`: mutations take the write lock,
/// reads take the read lock, so a reader observes either none or all of a
/// concurrent create/update/delete. Identifier assignment happens under the
/// same write lock and the counter only moves forward, so ids are never
/// reused, deletion included. No method blocks beyond the lock and the lock
/// is never held across an await point.
pub struct UserRegistry {
    state: RwLock<RegistryState>,
}

struct RegistryState {
    users: HashMap<String, User>,
    next_id: u64,
}

impl UserRegistry {
    /// Create an empty registry. The first assigned id is `u1`.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState {
                users: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    #[instrument(name = "users.registry.get_user", skip(self), fields(user_id = %id))]
    pub fn get_user(&self, id: &str) -> Result<User, DomainError> {
        debug!("Getting user by id");

        let state = self.state.read();
        state
            .users
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    #[instrument(
        name = "users.registry.create_user",
        skip(self),
        fields(username = %new_user.username, email = %new_user.email)
    )]
    pub fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");

        validate_username(&new_user.username)?;
        validate_email(&new_user.email)?;

        let mut state = self.state.write();
        let id = format!("u{}", state.next_id);
        state.next_id += 1;

        let now = Utc::now();
        let user = User {
            id: id.clone(),
            username: new_user.username,
            email: new_user.email,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(id, user.clone());

        info!("Successfully created user with id={}", user.id);
        Ok(user)
    }

    #[instrument(
        name = "users.registry.update_user",
        skip(self, update),
        fields(user_id = %id)
    )]
    pub fn update_user(&self, id: &str, update: UserUpdate) -> Result<User, DomainError> {
        info!("Updating user");

        validate_username(&update.username)?;
        validate_email(&update.email)?;

        let mut state = self.state.write();
        let user = state
            .users
            .get_mut(id)
            .ok_or_else(|| DomainError::user_not_found(id))?;

        user.username = update.username;
        user.email = update.email;
        // updated_at never moves backwards, even if the wall clock does
        let now = Utc::now();
        user.updated_at = now.max(user.updated_at);

        info!("Successfully updated user");
        Ok(user.clone())
    }

    #[instrument(name = "users.registry.delete_user", skip(self), fields(user_id = %id))]
    pub fn delete_user(&self, id: &str) -> Result<(), DomainError> {
        info!("Deleting user");

        let mut state = self.state.write();
        if state.users.remove(id).is_none() {
            return Err(DomainError::user_not_found(id));
        }

        info!("Successfully deleted user");
        Ok(())
    }

    /// Number of records currently stored.
    pub fn user_count(&self) -> usize {
        self.state.read().users.len()
    }
}

impl Default for UserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// --- validation helpers ---

fn validate_username(username: &str) -> Result<(), DomainError> {
    if username.is_empty() {
        return Err(DomainError::empty_username());
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), DomainError> {
    if email.is_empty() {
        return Err(DomainError::empty_email());
    }
    Ok(())
}
