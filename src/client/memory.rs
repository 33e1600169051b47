use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CatalogClient, ClientFactory};
use crate::common::ClientError;
use crate::models::{OrderBy, Product, ProductFields, ProductId, Session};

const SESSION_LIFETIME_SECS: i64 = 3600;

/// In-process stand-in for the hosted service: one admin credential and a
/// product table that lives as long as the process.
///
/// Writes without a live session are refused the way row-level security
/// refuses them upstream.
#[derive(Clone)]
pub struct MemoryCatalog {
    inner: Arc<MemoryStore>,
}

struct MemoryStore {
    email: String,
    password: String,
    products: RwLock<Vec<Product>>,
    /// Issued access tokens and their expiry, seconds since the epoch.
    tokens: RwLock<HashMap<String, i64>>,
}

impl MemoryCatalog {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        products: Vec<Product>,
    ) -> Self {
        Self {
            inner: Arc::new(MemoryStore {
                email: email.into(),
                password: password.into(),
                products: RwLock::new(products),
                tokens: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Snapshot of the table in insertion order.
    pub async fn products(&self) -> Vec<Product> {
        self.inner.products.read().await.clone()
    }

    async fn is_live(&self, session: &Session) -> bool {
        !session.is_expired() && self.inner.tokens.read().await.contains_key(session.access_token())
    }
}

impl ClientFactory for MemoryCatalog {
    fn connect(&self, session: Option<Session>) -> Box<dyn CatalogClient> {
        Box::new(MemoryClient {
            catalog: self.clone(),
            session: RwLock::new(session),
        })
    }
}

pub struct MemoryClient {
    catalog: MemoryCatalog,
    session: RwLock<Option<Session>>,
}

impl MemoryClient {
    async fn require_auth(&self) -> Result<(), ClientError> {
        match self.get_session().await? {
            Some(_) => Ok(()),
            None => Err(ClientError::Service {
                status: 401,
                message: "new row violates row-level security policy for table \"products\""
                    .to_string(),
            }),
        }
    }
}

#[async_trait]
impl CatalogClient for MemoryClient {
    async fn list_products(&self, order: OrderBy) -> Result<Vec<Product>, ClientError> {
        let mut products = self.catalog.products().await;
        order.sort(&mut products);
        Ok(products)
    }

    async fn create_product(&self, fields: &ProductFields) -> Result<(), ClientError> {
        self.require_auth().await?;

        let product = Product {
            id: Uuid::new_v4(),
            title: fields.title.clone(),
            description: fields.description.clone(),
            image_url: fields.image_url.clone(),
            instagram_link: fields.instagram_link.clone(),
            order_position: fields.order_position,
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        self.catalog.inner.products.write().await.push(product);
        Ok(())
    }

    async fn update_product(
        &self,
        id: ProductId,
        fields: &ProductFields,
    ) -> Result<(), ClientError> {
        self.require_auth().await?;

        let mut products = self.catalog.inner.products.write().await;
        // Matching no row is not an error upstream either.
        if let Some(product) = products.iter_mut().find(|p| p.id == id) {
            product.title = fields.title.clone();
            product.description = fields.description.clone();
            product.image_url = fields.image_url.clone();
            product.instagram_link = fields.instagram_link.clone();
            product.order_position = fields.order_position;
            product.updated_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ClientError> {
        self.require_auth().await?;

        self.catalog.inner.products.write().await.retain(|p| p.id != id);
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<(), ClientError> {
        let store = &self.catalog.inner;
        if email.trim() != store.email || password != store.password {
            return Err(ClientError::Auth("Invalid login credentials".to_string()));
        }

        let now = Utc::now().timestamp();
        let token = format!("memory-{}", Uuid::new_v4());
        let expires_at = now + SESSION_LIFETIME_SECS;

        let mut tokens = store.tokens.write().await;
        tokens.retain(|_, expiry| *expiry > now);
        tokens.insert(token.clone(), expires_at);
        drop(tokens);

        *self.session.write().await = Some(Session::new(token, None, expires_at));
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), ClientError> {
        if let Some(session) = self.session.write().await.take() {
            self.catalog
                .inner
                .tokens
                .write()
                .await
                .remove(session.access_token());
        }
        Ok(())
    }

    async fn get_session(&self) -> Result<Option<Session>, ClientError> {
        let Some(session) = self.session.read().await.clone() else {
            return Ok(None);
        };

        if self.catalog.is_live(&session).await {
            Ok(Some(session))
        } else {
            Ok(None)
        }
    }
}
