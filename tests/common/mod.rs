#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{Response, StatusCode};
use serde_json::{json, Value};

use contact_api::config::AppConfig;
use contact_api::database::MemoryStore;
use contact_api::{app, AppState};

/// Router served on a free local port, backed by a fresh `MemoryStore`.
///
/// Each test gets its own server; it runs on the test's runtime and stops
/// with it.
pub struct TestServer {
    pub base_url: String,
    pub store: MemoryStore,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let store = MemoryStore::new();
        let mut config = AppConfig::development();
        config.api.enable_request_logging = false;
        let router = app(AppState::new(Arc::new(store.clone()), config));

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            base_url,
            store,
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/user"))
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await?)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?)
    }

    /// Register then log in, returning `(user_id, token)`
    pub async fn signed_up(&self, name: &str, email: &str) -> Result<(i64, String)> {
        let res = self.register(name, email, "secret").await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());

        let res = self.login(email, "secret").await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
        let body: Value = res.json().await?;

        let user_id = body["data"]["user_id"].as_i64().context("missing user_id")?;
        let token = body["data"]["token"]
            .as_str()
            .context("missing token")?
            .to_string();
        Ok((user_id, token))
    }

    pub async fn create_contact(&self, token: &str) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/contact"))
            .header("Authorization", token)
            .json(&contact_payload())
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create contact failed: {}", res.status());
        let body: Value = res.json().await?;
        Ok(body["data"].clone())
    }
}

pub fn contact_payload() -> Value {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "ada@example.com",
        "phone": "08123456789"
    })
}
