// handlers/protected/contact.rs - /contact/* handlers, scoped to the caller

use axum::{
    body::Bytes,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::database::models::{Contact, ContactFields};
use crate::error::ApiError;
use crate::handlers::utils::{parse_id, parse_json_body};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::validation::Validator;

pub(crate) const CONTACT_NOT_FOUND: &str = "Contact not found";

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl ContactRequest {
    fn into_fields(self) -> Result<ContactFields, ApiError> {
        Validator::new()
            .required("first_name", &self.first_name)
            .required("last_name", &self.last_name)
            .required_email("email", &self.email)
            .required("phone", &self.phone)
            .finish()?;

        Ok(ContactFields {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
        })
    }
}

/// POST /contact - create a contact owned by the caller
pub async fn create_contact(
    State(state): State<AppState>,
    caller: AuthUser,
    body: Bytes,
) -> ApiResult<Contact> {
    let fields = parse_json_body::<ContactRequest>(&body)?.into_fields()?;
    let contact = state.store.create_contact(caller.user_id, fields).await?;
    Ok(ApiResponse::created("Contact created successfully", contact))
}

/// GET /contact - the caller's contacts
pub async fn list_contacts(
    State(state): State<AppState>,
    caller: AuthUser,
) -> ApiResult<Vec<Contact>> {
    let contacts = state.store.list_contacts(caller.user_id).await?;
    Ok(ApiResponse::success("Success", contacts))
}

/// GET /contact/:id
pub async fn get_contact(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Contact> {
    let contact_id = parse_id(&id, CONTACT_NOT_FOUND)?;
    let contact = state
        .store
        .find_contact(caller.user_id, contact_id)
        .await?
        .ok_or_else(|| ApiError::not_found(CONTACT_NOT_FOUND))?;
    Ok(ApiResponse::success("Success", contact))
}

/// PUT /contact/:id
pub async fn update_contact(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Contact> {
    let fields = parse_json_body::<ContactRequest>(&body)?.into_fields()?;
    let contact_id = parse_id(&id, CONTACT_NOT_FOUND)?;

    let contact = state
        .store
        .update_contact(caller.user_id, contact_id, fields)
        .await?
        .ok_or_else(|| ApiError::not_found(CONTACT_NOT_FOUND))?;
    Ok(ApiResponse::success("Contact updated successfully", contact))
}

/// DELETE /contact/:id
pub async fn delete_contact(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let contact_id = parse_id(&id, CONTACT_NOT_FOUND)?;
    if !state.store.delete_contact(caller.user_id, contact_id).await? {
        return Err(ApiError::not_found(CONTACT_NOT_FOUND));
    }
    Ok(ApiResponse::message("Contact deleted successfully"))
}
