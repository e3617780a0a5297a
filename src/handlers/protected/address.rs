// handlers/protected/address.rs - /address/* handlers, scoped to a contact
//
// Every operation first confirms the parent contact exists and belongs to
// the caller; only then does the address statement run.

use axum::{
    body::Bytes,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::database::models::{Address, AddressFields};
use crate::error::ApiError;
use crate::handlers::utils::{deserialize_optional_id, parse_id, parse_json_body};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::validation::Validator;

use super::contact::CONTACT_NOT_FOUND;

const ADDRESS_NOT_FOUND: &str = "Address not found";

#[derive(Debug, Deserialize)]
pub struct AddressRequest {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub postal_code: Option<String>,
    /// Only read on create; the path carries the contact for the other routes
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub contact_id: Option<i64>,
}

impl AddressRequest {
    fn into_fields(self) -> AddressFields {
        AddressFields {
            street: self.street,
            city: self.city,
            province: self.province,
            country: self.country,
            postal_code: self.postal_code,
        }
    }
}

/// 404 unless the contact exists and is owned by the caller
async fn ensure_contact(state: &AppState, caller: &AuthUser, contact_id: i64) -> Result<(), ApiError> {
    match state.store.find_contact(caller.user_id, contact_id).await? {
        Some(_) => Ok(()),
        None => Err(ApiError::not_found(CONTACT_NOT_FOUND)),
    }
}

/// POST /address/ - create an address under the contact named in the body
pub async fn create_address(
    State(state): State<AppState>,
    caller: AuthUser,
    body: Bytes,
) -> ApiResult<Address> {
    let request: AddressRequest = parse_json_body(&body)?;
    Validator::new()
        .required("country", &request.country)
        .required_some("contact_id", &request.contact_id)
        .finish()?;

    let contact_id = request
        .contact_id
        .ok_or_else(|| ApiError::validation_failed(vec!["contact_id is required".to_string()]))?;
    ensure_contact(&state, &caller, contact_id).await?;

    let address = state
        .store
        .create_address(contact_id, request.into_fields())
        .await?;
    Ok(ApiResponse::created("Address created successfully", address))
}

/// GET /address/:contact_id
pub async fn list_addresses(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(contact_id): Path<String>,
) -> ApiResult<Vec<Address>> {
    let contact_id = parse_id(&contact_id, CONTACT_NOT_FOUND)?;
    ensure_contact(&state, &caller, contact_id).await?;

    let addresses = state.store.list_addresses(contact_id).await?;
    Ok(ApiResponse::success("Addresses retrieved successfully", addresses))
}

/// GET /address/:contact_id/:address_id
pub async fn get_address(
    State(state): State<AppState>,
    caller: AuthUser,
    Path((contact_id, address_id)): Path<(String, String)>,
) -> ApiResult<Address> {
    let contact_id = parse_id(&contact_id, CONTACT_NOT_FOUND)?;
    ensure_contact(&state, &caller, contact_id).await?;

    let address_id = parse_id(&address_id, ADDRESS_NOT_FOUND)?;
    let address = state
        .store
        .find_address(contact_id, address_id)
        .await?
        .ok_or_else(|| ApiError::not_found(ADDRESS_NOT_FOUND))?;
    Ok(ApiResponse::success("Address retrieved successfully", address))
}

/// PUT /address/:contact_id/:address_id - only `country` is mandatory
pub async fn update_address(
    State(state): State<AppState>,
    caller: AuthUser,
    Path((contact_id, address_id)): Path<(String, String)>,
    body: Bytes,
) -> ApiResult<Address> {
    let request: AddressRequest = parse_json_body(&body)?;
    Validator::new()
        .required("country", &request.country)
        .finish()?;

    let contact_id = parse_id(&contact_id, CONTACT_NOT_FOUND)?;
    ensure_contact(&state, &caller, contact_id).await?;

    let address_id = parse_id(&address_id, ADDRESS_NOT_FOUND)?;
    let address = state
        .store
        .update_address(contact_id, address_id, request.into_fields())
        .await?
        .ok_or_else(|| ApiError::not_found(ADDRESS_NOT_FOUND))?;
    Ok(ApiResponse::success("Address updated successfully", address))
}

/// DELETE /address/:contact_id/:address_id
pub async fn delete_address(
    State(state): State<AppState>,
    caller: AuthUser,
    Path((contact_id, address_id)): Path<(String, String)>,
) -> ApiResult<()> {
    let contact_id = parse_id(&contact_id, CONTACT_NOT_FOUND)?;
    ensure_contact(&state, &caller, contact_id).await?;

    let address_id = parse_id(&address_id, ADDRESS_NOT_FOUND)?;
    if !state.store.delete_address(contact_id, address_id).await? {
        return Err(ApiError::not_found(ADDRESS_NOT_FOUND));
    }
    Ok(ApiResponse::message("Address deleted successfully"))
}
