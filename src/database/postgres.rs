use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::models::{
    Address, AddressFields, Contact, ContactFields, NewUser, User, UserChanges,
};
use crate::database::repository::{
    AddressRepository, ContactRepository, Store, StoreError, UserRepository,
};

const USER_COLUMNS: &str = "user_id, name, email, password, token, created_at, updated_at";
const CONTACT_COLUMNS: &str =
    "contact_id, first_name, last_name, email, phone, user_id, created_at, updated_at";
const ADDRESS_COLUMNS: &str =
    "address_id, street, city, province, country, postal_code, contact_id, created_at, updated_at";

/// PostgreSQL-backed store. One parameterized statement per operation.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Translate a unique-key violation on `users.email` into a conflict
fn map_user_write_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Conflict("Email already registered".to_string())
        }
        _ => StoreError::Sqlx(err),
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let sql = format!(
            "INSERT INTO users (name, email, password) VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password)
            .fetch_one(&self.pool)
            .await
            .map_err(map_user_write_error)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY user_id");
        let users = sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?;
        Ok(users)
    }

    async fn find_user(&self, user_id: i64) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_token(&self, token: &str) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE token = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND password = $2");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .bind(password_hash)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn set_user_token(&self, user_id: i64, token: &str) -> Result<(), StoreError> {
        sqlx::query("UPDATE users SET token = $1, updated_at = now() WHERE user_id = $2")
            .bind(token)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_user(
        &self,
        user_id: i64,
        changes: UserChanges,
    ) -> Result<Option<User>, StoreError> {
        // COALESCE keeps the stored digest when no new password was supplied
        let sql = format!(
            "UPDATE users SET name = $1, email = $2, password = COALESCE($3, password), updated_at = now() \
             WHERE user_id = $4 RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(&changes.name)
            .bind(&changes.email)
            .bind(&changes.password)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_user_write_error)
    }
}

#[async_trait]
impl ContactRepository for PgStore {
    async fn create_contact(
        &self,
        user_id: i64,
        fields: ContactFields,
    ) -> Result<Contact, StoreError> {
        let sql = format!(
            "INSERT INTO contacts (first_name, last_name, email, phone, user_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {CONTACT_COLUMNS}"
        );
        let contact = sqlx::query_as::<_, Contact>(&sql)
            .bind(&fields.first_name)
            .bind(&fields.last_name)
            .bind(&fields.email)
            .bind(&fields.phone)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(contact)
    }

    async fn list_contacts(&self, user_id: i64) -> Result<Vec<Contact>, StoreError> {
        let sql =
            format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE user_id = $1 ORDER BY contact_id");
        let contacts = sqlx::query_as::<_, Contact>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(contacts)
    }

    async fn find_contact(
        &self,
        user_id: i64,
        contact_id: i64,
    ) -> Result<Option<Contact>, StoreError> {
        let sql = format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts WHERE contact_id = $1 AND user_id = $2"
        );
        let contact = sqlx::query_as::<_, Contact>(&sql)
            .bind(contact_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(contact)
    }

    async fn update_contact(
        &self,
        user_id: i64,
        contact_id: i64,
        fields: ContactFields,
    ) -> Result<Option<Contact>, StoreError> {
        let sql = format!(
            "UPDATE contacts SET first_name = $1, last_name = $2, email = $3, phone = $4, updated_at = now() \
             WHERE contact_id = $5 AND user_id = $6 RETURNING {CONTACT_COLUMNS}"
        );
        let contact = sqlx::query_as::<_, Contact>(&sql)
            .bind(&fields.first_name)
            .bind(&fields.last_name)
            .bind(&fields.email)
            .bind(&fields.phone)
            .bind(contact_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(contact)
    }

    async fn delete_contact(&self, user_id: i64, contact_id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM contacts WHERE contact_id = $1 AND user_id = $2")
            .bind(contact_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl AddressRepository for PgStore {
    async fn create_address(
        &self,
        contact_id: i64,
        fields: AddressFields,
    ) -> Result<Address, StoreError> {
        let sql = format!(
            "INSERT INTO addresses (street, city, province, country, postal_code, contact_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {ADDRESS_COLUMNS}"
        );
        let address = sqlx::query_as::<_, Address>(&sql)
            .bind(&fields.street)
            .bind(&fields.city)
            .bind(&fields.province)
            .bind(&fields.country)
            .bind(&fields.postal_code)
            .bind(contact_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(address)
    }

    async fn list_addresses(&self, contact_id: i64) -> Result<Vec<Address>, StoreError> {
        let sql = format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE contact_id = $1 ORDER BY address_id"
        );
        let addresses = sqlx::query_as::<_, Address>(&sql)
            .bind(contact_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(addresses)
    }

    async fn find_address(
        &self,
        contact_id: i64,
        address_id: i64,
    ) -> Result<Option<Address>, StoreError> {
        let sql = format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE address_id = $1 AND contact_id = $2"
        );
        let address = sqlx::query_as::<_, Address>(&sql)
            .bind(address_id)
            .bind(contact_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(address)
    }

    async fn update_address(
        &self,
        contact_id: i64,
        address_id: i64,
        fields: AddressFields,
    ) -> Result<Option<Address>, StoreError> {
        let sql = format!(
            "UPDATE addresses SET street = $1, city = $2, province = $3, country = $4, postal_code = $5, \
             updated_at = now() WHERE address_id = $6 AND contact_id = $7 RETURNING {ADDRESS_COLUMNS}"
        );
        let address = sqlx::query_as::<_, Address>(&sql)
            .bind(&fields.street)
            .bind(&fields.city)
            .bind(&fields.province)
            .bind(&fields.country)
            .bind(&fields.postal_code)
            .bind(address_id)
            .bind(contact_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(address)
    }

    async fn delete_address(&self, contact_id: i64, address_id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM addresses WHERE address_id = $1 AND contact_id = $2")
            .bind(address_id)
            .bind(contact_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
