mod common;

use anyhow::Result;
use contact_api::database::ContactRepository;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn contact_routes_reject_missing_token_without_writing() -> Result<()> {
    let server = common::TestServer::start().await?;
    let (user_id, _) = server.signed_up("A", "a@x.com").await?;

    let res = server
        .client
        .post(server.url("/contact"))
        .json(&common::contact_payload())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Unauthorized");

    assert!(server.store.list_contacts(user_id).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn empty_contact_list_is_an_empty_array() -> Result<()> {
    let server = common::TestServer::start().await?;
    let (_, token) = server.signed_up("A", "a@x.com").await?;

    let res = server
        .client
        .get(server.url("/contact"))
        .header("Authorization", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"], json!([]));
    Ok(())
}

#[tokio::test]
async fn created_contact_is_owned_by_caller() -> Result<()> {
    let server = common::TestServer::start().await?;
    let (user_id, token) = server.signed_up("A", "a@x.com").await?;

    let res = server
        .client
        .post(server.url("/contact"))
        .header("Authorization", &token)
        .json(&json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.com",
            "phone": "0800",
            "user_id": 999
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Contact created successfully");
    assert_eq!(body["data"]["user_id"], user_id);
    assert_eq!(body["data"]["first_name"], "Ada");

    let list: Value = server
        .client
        .get(server.url("/contact"))
        .header("Authorization", &token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(list["data"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn create_contact_validates_fields() -> Result<()> {
    let server = common::TestServer::start().await?;
    let (_, token) = server.signed_up("A", "a@x.com").await?;

    let res = server
        .client
        .post(server.url("/contact"))
        .header("Authorization", &token)
        .json(&json!({ "first_name": "Ada", "email": "bad" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(
        body["errors"],
        json!(["last_name is required", "email is email", "phone is required"])
    );
    Ok(())
}

#[tokio::test]
async fn get_contact_is_scoped_to_owner() -> Result<()> {
    let server = common::TestServer::start().await?;
    let (_, owner) = server.signed_up("A", "a@x.com").await?;
    let (_, stranger) = server.signed_up("B", "b@x.com").await?;
    let contact = server.create_contact(&owner).await?;
    let path = format!("/contact/{}", contact["contact_id"]);

    let mine = server.client.get(server.url(&path)).header("Authorization", &owner).send().await?;
    assert_eq!(mine.status(), StatusCode::OK);

    let theirs = server
        .client
        .get(server.url(&path))
        .header("Authorization", &stranger)
        .send()
        .await?;
    assert_eq!(theirs.status(), StatusCode::NOT_FOUND);
    let body: Value = theirs.json().await?;
    assert_eq!(body["message"], "Contact not found");

    let garbage = server
        .client
        .get(server.url("/contact/abc"))
        .header("Authorization", &owner)
        .send()
        .await?;
    assert_eq!(garbage.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn update_contact_by_owner_and_stranger() -> Result<()> {
    let server = common::TestServer::start().await?;
    let (_, owner) = server.signed_up("A", "a@x.com").await?;
    let (_, stranger) = server.signed_up("B", "b@x.com").await?;
    let contact = server.create_contact(&owner).await?;
    let path = format!("/contact/{}", contact["contact_id"]);

    let mut payload = common::contact_payload();
    payload["phone"] = json!("0999");

    let res = server
        .client
        .put(server.url(&path))
        .header("Authorization", &owner)
        .json(&payload)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["phone"], "0999");

    let foreign = server
        .client
        .put(server.url(&path))
        .header("Authorization", &stranger)
        .json(&payload)
        .send()
        .await?;
    let absent = server
        .client
        .put(server.url("/contact/4242"))
        .header("Authorization", &stranger)
        .json(&payload)
        .send()
        .await?;
    assert_eq!(foreign.status(), StatusCode::NOT_FOUND);
    assert_eq!(absent.status(), StatusCode::NOT_FOUND);
    assert_eq!(foreign.json::<Value>().await?, absent.json::<Value>().await?);
    Ok(())
}

#[tokio::test]
async fn delete_contact_not_owned_is_not_found() -> Result<()> {
    let server = common::TestServer::start().await?;
    let (owner_id, owner) = server.signed_up("A", "a@x.com").await?;
    let (_, stranger) = server.signed_up("B", "b@x.com").await?;
    let contact = server.create_contact(&owner).await?;
    let path = format!("/contact/{}", contact["contact_id"]);

    let res = server
        .client
        .delete(server.url(&path))
        .header("Authorization", &stranger)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(server.store.list_contacts(owner_id).await?.len(), 1);

    let res = server
        .client
        .delete(server.url(&path))
        .header("Authorization", &owner)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Contact deleted successfully");
    assert!(body.get("data").is_none());

    let again = server
        .client
        .delete(server.url(&path))
        .header("Authorization", &owner)
        .send()
        .await?;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
    Ok(())
}
