use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{CatalogClient, ClientFactory};
use crate::common::ClientError;
use crate::models::{OrderBy, Product, ProductChanges, ProductFields, ProductId, Session};

const PRODUCTS_TABLE: &str = "products";

/// Refresh this long before the access token actually runs out.
const EXPIRY_MARGIN_SECS: i64 = 30;

/// Used when the token response carries neither `expires_at` nor `expires_in`.
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

/// Shares one HTTP connection pool between all per-request clients.
pub struct SupabaseConnector {
    http: reqwest::Client,
    config: Arc<SupabaseConfig>,
}

impl SupabaseConnector {
    pub fn new(config: SupabaseConfig) -> Self {
        let config = SupabaseConfig {
            url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key,
        };

        Self {
            http: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }
}

impl ClientFactory for SupabaseConnector {
    fn connect(&self, session: Option<Session>) -> Box<dyn CatalogClient> {
        Box::new(SupabaseClient {
            http: self.http.clone(),
            config: self.config.clone(),
            session: RwLock::new(session),
        })
    }
}

/// PostgREST + GoTrue client holding at most one session.
pub struct SupabaseClient {
    http: reqwest::Client,
    config: Arc<SupabaseConfig>,
    session: RwLock<Option<Session>>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
}

impl TokenResponse {
    fn into_session(self) -> Session {
        let expires_at = self.expires_at.unwrap_or_else(|| {
            Utc::now().timestamp() + self.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS)
        });
        Session::new(self.access_token, self.refresh_token, expires_at)
    }
}

impl SupabaseClient {
    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.config.url, PRODUCTS_TABLE)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.url, path)
    }

    /// Access token of a live session, or the anon key for public reads.
    async fn bearer(&self) -> Result<String, ClientError> {
        Ok(match self.get_session().await? {
            Some(session) => session.access_token().to_string(),
            None => self.config.anon_key.clone(),
        })
    }

    async fn authed(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        let token = self.bearer().await?;
        Ok(builder
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token))
    }

    async fn failure(resp: reqwest::Response) -> ClientError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        ClientError::Service {
            status,
            message: error_message(status, &body),
        }
    }

    async fn expect_success(resp: reqwest::Response) -> Result<(), ClientError> {
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::failure(resp).await)
        }
    }

    async fn request_token(
        &self,
        grant_type: &str,
        body: serde_json::Value,
    ) -> Result<Session, ClientError> {
        let resp = self
            .http
            .post(self.auth_url("token"))
            .query(&[("grant_type", grant_type)])
            .header("apikey", &self.config.anon_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(match Self::failure(resp).await {
                ClientError::Service { message, .. } => ClientError::Auth(message),
                other => other,
            });
        }

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| ClientError::Decode(format!("token response: {e}")))?;
        Ok(token.into_session())
    }
}

#[async_trait]
impl CatalogClient for SupabaseClient {
    async fn list_products(&self, order: OrderBy) -> Result<Vec<Product>, ClientError> {
        let req = self
            .http
            .get(self.table_url())
            .query(&[("select", "*".to_string()), ("order", order.as_query())]);
        let resp = self.authed(req).await?.send().await?;

        if !resp.status().is_success() {
            return Err(Self::failure(resp).await);
        }

        resp.json::<Vec<Product>>()
            .await
            .map_err(|e| ClientError::Decode(format!("products: {e}")))
    }

    async fn create_product(&self, fields: &ProductFields) -> Result<(), ClientError> {
        let req = self
            .http
            .post(self.table_url())
            .header("Prefer", "return=minimal")
            .json(&[fields]);
        let resp = self.authed(req).await?.send().await?;
        Self::expect_success(resp).await
    }

    async fn update_product(
        &self,
        id: ProductId,
        fields: &ProductFields,
    ) -> Result<(), ClientError> {
        let changes = ProductChanges {
            fields,
            updated_at: Utc::now(),
        };
        let req = self
            .http
            .patch(self.table_url())
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(&changes);
        let resp = self.authed(req).await?.send().await?;
        Self::expect_success(resp).await
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ClientError> {
        let req = self
            .http
            .delete(self.table_url())
            .query(&[("id", format!("eq.{id}"))]);
        let resp = self.authed(req).await?.send().await?;
        Self::expect_success(resp).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<(), ClientError> {
        let session = self
            .request_token(
                "password",
                serde_json::json!({ "email": email, "password": password }),
            )
            .await?;

        *self.session.write().await = Some(session);
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), ClientError> {
        let Some(session) = self.session.write().await.take() else {
            return Ok(());
        };

        let resp = self
            .http
            .post(self.auth_url("logout"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(session.access_token())
            .send()
            .await?;

        // The token is already unknown to the service.
        if matches!(resp.status().as_u16(), 401 | 403 | 404) {
            return Ok(());
        }
        Self::expect_success(resp).await
    }

    async fn get_session(&self) -> Result<Option<Session>, ClientError> {
        let Some(session) = self.session.read().await.clone() else {
            return Ok(None);
        };

        if !session.expires_within(EXPIRY_MARGIN_SECS) {
            return Ok(Some(session));
        }

        let mut guard = self.session.write().await;
        // Another caller may have refreshed or signed out meanwhile.
        match guard.as_ref() {
            None => return Ok(None),
            Some(current)
                if current != &session && !current.expires_within(EXPIRY_MARGIN_SECS) =>
            {
                return Ok(Some(current.clone()));
            }
            Some(_) => {}
        }

        let Some(refresh_token) = session.refresh_token() else {
            *guard = None;
            return Ok(None);
        };

        match self
            .request_token(
                "refresh_token",
                serde_json::json!({ "refresh_token": refresh_token }),
            )
            .await
        {
            Ok(fresh) => {
                *guard = Some(fresh.clone());
                Ok(Some(fresh))
            }
            Err(ClientError::Auth(message)) => {
                log::info!("Session refresh rejected: {}", message);
                *guard = None;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Picks the human-readable message out of a PostgREST or GoTrue error body.
pub fn error_message(status: u16, body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();

    parsed
        .as_ref()
        .and_then(|value| {
            ["message", "msg", "error_description", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        })
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with status {status}"))
}
