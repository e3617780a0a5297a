use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::{
    Address, AddressFields, Contact, ContactFields, NewUser, User, UserChanges,
};

/// Errors surfaced by any store implementation
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence for the `users` table.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user. A duplicate email yields `StoreError::Conflict`.
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    async fn find_user(&self, user_id: i64) -> Result<Option<User>, StoreError>;

    /// Exact match on the stored bearer token.
    async fn find_user_by_token(&self, token: &str) -> Result<Option<User>, StoreError>;

    /// Match on email and hashed password.
    async fn find_user_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError>;

    /// Replace the user's current token, invalidating the previous one.
    async fn set_user_token(&self, user_id: i64, token: &str) -> Result<(), StoreError>;

    /// `Ok(None)` when no row was affected.
    async fn update_user(
        &self,
        user_id: i64,
        changes: UserChanges,
    ) -> Result<Option<User>, StoreError>;
}

/// Persistence for the `contacts` table. Every operation is scoped to the
/// owning user.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create_contact(
        &self,
        user_id: i64,
        fields: ContactFields,
    ) -> Result<Contact, StoreError>;

    async fn list_contacts(&self, user_id: i64) -> Result<Vec<Contact>, StoreError>;

    async fn find_contact(
        &self,
        user_id: i64,
        contact_id: i64,
    ) -> Result<Option<Contact>, StoreError>;

    /// `Ok(None)` when no row was affected, whether the contact is absent or
    /// owned by someone else.
    async fn update_contact(
        &self,
        user_id: i64,
        contact_id: i64,
        fields: ContactFields,
    ) -> Result<Option<Contact>, StoreError>;

    /// Returns whether a row was deleted. Addresses of the contact go with it.
    async fn delete_contact(&self, user_id: i64, contact_id: i64) -> Result<bool, StoreError>;
}

/// Persistence for the `addresses` table. Every operation is scoped to the
/// owning contact; callers check the contact first.
#[async_trait]
pub trait AddressRepository: Send + Sync {
    async fn create_address(
        &self,
        contact_id: i64,
        fields: AddressFields,
    ) -> Result<Address, StoreError>;

    async fn list_addresses(&self, contact_id: i64) -> Result<Vec<Address>, StoreError>;

    async fn find_address(
        &self,
        contact_id: i64,
        address_id: i64,
    ) -> Result<Option<Address>, StoreError>;

    async fn update_address(
        &self,
        contact_id: i64,
        address_id: i64,
        fields: AddressFields,
    ) -> Result<Option<Address>, StoreError>;

    async fn delete_address(&self, contact_id: i64, address_id: i64) -> Result<bool, StoreError>;
}

/// Everything the HTTP layer needs from persistence.
#[async_trait]
pub trait Store: UserRepository + ContactRepository + AddressRepository {
    /// Cheap connectivity check used by `/health`
    async fn ping(&self) -> Result<(), StoreError>;
}
