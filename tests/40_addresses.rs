mod common;

use anyhow::Result;
use contact_api::database::AddressRepository;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn create_address_for_unknown_contact_is_not_found() -> Result<()> {
    let server = common::TestServer::start().await?;
    let (_, token) = server.signed_up("A", "a@x.com").await?;

    let res = server
        .client
        .post(server.url("/address/"))
        .header("Authorization", &token)
        .json(&json!({ "contact_id": 77, "country": "Indonesia" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Contact not found");

    assert!(server.store.list_addresses(77).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn create_address_under_another_users_contact_is_not_found() -> Result<()> {
    let server = common::TestServer::start().await?;
    let (_, owner) = server.signed_up("A", "a@x.com").await?;
    let (_, stranger) = server.signed_up("B", "b@x.com").await?;
    let contact = server.create_contact(&owner).await?;
    let contact_id = contact["contact_id"].as_i64().unwrap_or_default();

    let res = server
        .client
        .post(server.url("/address/"))
        .header("Authorization", &stranger)
        .json(&json!({ "contact_id": contact_id, "country": "Indonesia" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(server.store.list_addresses(contact_id).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn create_address_requires_country_and_contact() -> Result<()> {
    let server = common::TestServer::start().await?;
    let (_, token) = server.signed_up("A", "a@x.com").await?;

    let res = server
        .client
        .post(server.url("/address/"))
        .header("Authorization", &token)
        .json(&json!({ "city": "Bandung" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["errors"], json!(["country is required", "contact_id is required"]));
    Ok(())
}

#[tokio::test]
async fn address_lifecycle() -> Result<()> {
    let server = common::TestServer::start().await?;
    let (_, token) = server.signed_up("A", "a@x.com").await?;
    let contact = server.create_contact(&token).await?;
    let contact_id = contact["contact_id"].as_i64().unwrap_or_default();

    // contact_id given as a numeric string
    let res = server
        .client
        .post(server.url("/address/"))
        .header("Authorization", &token)
        .json(&json!({
            "contact_id": contact_id.to_string(),
            "street": "Jl. Merdeka 1",
            "city": "Bandung",
            "country": "Indonesia",
            "postal_code": "40111"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await?;
    assert_eq!(created["data"]["contact_id"], contact_id);
    assert_eq!(created["data"]["province"], Value::Null);
    let address_id = created["data"]["address_id"].as_i64().unwrap_or_default();
    let item = format!("/address/{}/{}", contact_id, address_id);

    let list: Value = server
        .client
        .get(server.url(&format!("/address/{}", contact_id)))
        .header("Authorization", &token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(list["data"].as_array().map(Vec::len), Some(1));

    let got = server.client.get(server.url(&item)).header("Authorization", &token).send().await?;
    assert_eq!(got.status(), StatusCode::OK);

    let updated = server
        .client
        .put(server.url(&item))
        .header("Authorization", &token)
        .json(&json!({ "country": "Malaysia" }))
        .send()
        .await?;
    assert_eq!(updated.status(), StatusCode::OK);
    let body: Value = updated.json().await?;
    assert_eq!(body["data"]["country"], "Malaysia");
    assert_eq!(body["data"]["city"], Value::Null);

    let deleted = server
        .client
        .delete(server.url(&item))
        .header("Authorization", &token)
        .send()
        .await?;
    assert_eq!(deleted.status(), StatusCode::OK);

    let gone = server.client.get(server.url(&item)).header("Authorization", &token).send().await?;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    let body: Value = gone.json().await?;
    assert_eq!(body["message"], "Address not found");
    Ok(())
}

#[tokio::test]
async fn update_requires_country_only() -> Result<()> {
    let server = common::TestServer::start().await?;
    let (_, token) = server.signed_up("A", "a@x.com").await?;
    let contact = server.create_contact(&token).await?;

    let res = server
        .client
        .put(server.url(&format!("/address/{}/1", contact["contact_id"])))
        .header("Authorization", &token)
        .json(&json!({ "street": "Somewhere" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["errors"], json!(["country is required"]));
    Ok(())
}

#[tokio::test]
async fn address_of_a_different_contact_is_not_found() -> Result<()> {
    let server = common::TestServer::start().await?;
    let (_, token) = server.signed_up("A", "a@x.com").await?;
    let first = server.create_contact(&token).await?;
    let second = server.create_contact(&token).await?;

    let res = server
        .client
        .post(server.url("/address/"))
        .header("Authorization", &token)
        .json(&json!({ "contact_id": first["contact_id"], "country": "Indonesia" }))
        .send()
        .await?;
    let created: Value = res.json().await?;
    let address_id = &created["data"]["address_id"];

    // Right address id, wrong parent: update and delete both miss
    let wrong_parent = format!("/address/{}/{}", second["contact_id"], address_id);
    let update = server
        .client
        .put(server.url(&wrong_parent))
        .header("Authorization", &token)
        .json(&json!({ "country": "Malaysia" }))
        .send()
        .await?;
    assert_eq!(update.status(), StatusCode::NOT_FOUND);

    let delete = server
        .client
        .delete(server.url(&wrong_parent))
        .header("Authorization", &token)
        .send()
        .await?;
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn deleting_contact_removes_its_addresses() -> Result<()> {
    let server = common::TestServer::start().await?;
    let (_, token) = server.signed_up("A", "a@x.com").await?;
    let contact = server.create_contact(&token).await?;
    let contact_id = contact["contact_id"].as_i64().unwrap_or_default();

    server
        .client
        .post(server.url("/address/"))
        .header("Authorization", &token)
        .json(&json!({ "contact_id": contact_id, "country": "Indonesia" }))
        .send()
        .await?;

    server
        .client
        .delete(server.url(&format!("/contact/{}", contact_id)))
        .header("Authorization", &token)
        .send()
        .await?;

    assert!(server.store.list_addresses(contact_id).await?.is_empty());

    let list = server
        .client
        .get(server.url(&format!("/address/{}", contact_id)))
        .header("Authorization", &token)
        .send()
        .await?;
    assert_eq!(list.status(), StatusCode::NOT_FOUND);
    Ok(())
}
