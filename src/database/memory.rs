use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::database::models::{
    Address, AddressFields, Contact, ContactFields, NewUser, User, UserChanges,
};
use crate::database::repository::{
    AddressRepository, ContactRepository, Store, StoreError, UserRepository,
};

/// In-process store with the same observable behavior as `PgStore`:
/// serial ids, unique emails, owner-scoped statements and cascading contact
/// deletes. Used by the test suite and by `--memory` runs.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    contacts: Vec<Contact>,
    addresses: Vec<Address>,
    next_user_id: i64,
    next_contact_id: i64,
    next_address_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables()?;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("Email already registered".to_string()));
        }

        let now = Utc::now();
        let row = User {
            user_id: next_id(&mut tables.next_user_id),
            name: user.name,
            email: user.email,
            password: user.password,
            token: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(row.clone());
        Ok(row)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.tables()?.users.clone())
    }

    async fn find_user(&self, user_id: i64) -> Result<Option<User>, StoreError> {
        let tables = self.tables()?;
        Ok(tables.users.iter().find(|u| u.user_id == user_id).cloned())
    }

    async fn find_user_by_token(&self, token: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables()?;
        Ok(tables
            .users
            .iter()
            .find(|u| u.token.as_deref() == Some(token))
            .cloned())
    }

    async fn find_user_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError> {
        let tables = self.tables()?;
        Ok(tables
            .users
            .iter()
            .find(|u| u.email == email && u.password == password_hash)
            .cloned())
    }

    async fn set_user_token(&self, user_id: i64, token: &str) -> Result<(), StoreError> {
        let mut tables = self.tables()?;
        if let Some(user) = tables.users.iter_mut().find(|u| u.user_id == user_id) {
            user.token = Some(token.to_string());
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn update_user(
        &self,
        user_id: i64,
        changes: UserChanges,
    ) -> Result<Option<User>, StoreError> {
        let mut tables = self.tables()?;
        if tables
            .users
            .iter()
            .any(|u| u.user_id != user_id && u.email == changes.email)
        {
            return Err(StoreError::Conflict("Email already registered".to_string()));
        }

        let Some(user) = tables.users.iter_mut().find(|u| u.user_id == user_id) else {
            return Ok(None);
        };
        user.name = changes.name;
        user.email = changes.email;
        if let Some(password) = changes.password {
            user.password = password;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl ContactRepository for MemoryStore {
    async fn create_contact(
        &self,
        user_id: i64,
        fields: ContactFields,
    ) -> Result<Contact, StoreError> {
        let mut tables = self.tables()?;
        let now = Utc::now();
        let row = Contact {
            contact_id: next_id(&mut tables.next_contact_id),
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            phone: fields.phone,
            user_id,
            created_at: now,
            updated_at: now,
        };
        tables.contacts.push(row.clone());
        Ok(row)
    }

    async fn list_contacts(&self, user_id: i64) -> Result<Vec<Contact>, StoreError> {
        let tables = self.tables()?;
        Ok(tables
            .contacts
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_contact(
        &self,
        user_id: i64,
        contact_id: i64,
    ) -> Result<Option<Contact>, StoreError> {
        let tables = self.tables()?;
        Ok(tables
            .contacts
            .iter()
            .find(|c| c.contact_id == contact_id && c.user_id == user_id)
            .cloned())
    }

    async fn update_contact(
        &self,
        user_id: i64,
        contact_id: i64,
        fields: ContactFields,
    ) -> Result<Option<Contact>, StoreError> {
        let mut tables = self.tables()?;
        let Some(contact) = tables
            .contacts
            .iter_mut()
            .find(|c| c.contact_id == contact_id && c.user_id == user_id)
        else {
            return Ok(None);
        };
        contact.first_name = fields.first_name;
        contact.last_name = fields.last_name;
        contact.email = fields.email;
        contact.phone = fields.phone;
        contact.updated_at = Utc::now();
        Ok(Some(contact.clone()))
    }

    async fn delete_contact(&self, user_id: i64, contact_id: i64) -> Result<bool, StoreError> {
        let mut tables = self.tables()?;
        let before = tables.contacts.len();
        tables
            .contacts
            .retain(|c| !(c.contact_id == contact_id && c.user_id == user_id));
        let deleted = tables.contacts.len() < before;
        if deleted {
            tables.addresses.retain(|a| a.contact_id != contact_id);
        }
        Ok(deleted)
    }
}

#[async_trait]
impl AddressRepository for MemoryStore {
    async fn create_address(
        &self,
        contact_id: i64,
        fields: AddressFields,
    ) -> Result<Address, StoreError> {
        let mut tables = self.tables()?;
        let now = Utc::now();
        let row = Address {
            address_id: next_id(&mut tables.next_address_id),
            street: fields.street,
            city: fields.city,
            province: fields.province,
            country: fields.country,
            postal_code: fields.postal_code,
            contact_id,
            created_at: now,
            updated_at: now,
        };
        tables.addresses.push(row.clone());
        Ok(row)
    }

    async fn list_addresses(&self, contact_id: i64) -> Result<Vec<Address>, StoreError> {
        let tables = self.tables()?;
        Ok(tables
            .addresses
            .iter()
            .filter(|a| a.contact_id == contact_id)
            .cloned()
            .collect())
    }

    async fn find_address(
        &self,
        contact_id: i64,
        address_id: i64,
    ) -> Result<Option<Address>, StoreError> {
        let tables = self.tables()?;
        Ok(tables
            .addresses
            .iter()
            .find(|a| a.address_id == address_id && a.contact_id == contact_id)
            .cloned())
    }

    async fn update_address(
        &self,
        contact_id: i64,
        address_id: i64,
        fields: AddressFields,
    ) -> Result<Option<Address>, StoreError> {
        let mut tables = self.tables()?;
        let Some(address) = tables
            .addresses
            .iter_mut()
            .find(|a| a.address_id == address_id && a.contact_id == contact_id)
        else {
            return Ok(None);
        };
        address.street = fields.street;
        address.city = fields.city;
        address.province = fields.province;
        address.country = fields.country;
        address.postal_code = fields.postal_code;
        address.updated_at = Utc::now();
        Ok(Some(address.clone()))
    }

    async fn delete_address(&self, contact_id: i64, address_id: i64) -> Result<bool, StoreError> {
        let mut tables = self.tables()?;
        let before = tables.addresses.len();
        tables
            .addresses
            .retain(|a| !(a.address_id == address_id && a.contact_id == contact_id));
        Ok(tables.addresses.len() < before)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.tables().map(|_| ())
    }
}
