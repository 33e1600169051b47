//! Access to the hosted table store and auth service.
//!
//! Views only ever talk to a [`CatalogClient`]; which backend sits behind it
//! is decided once at startup through a [`ClientFactory`].

pub use memory::*;
pub use supabase::*;

mod memory;
mod supabase;

use async_trait::async_trait;

use crate::common::ClientError;
use crate::models::{OrderBy, Product, ProductFields, ProductId, Session};

/// Capability interface over the `products` table and the auth endpoint.
///
/// Every call is a single round trip. Nothing is retried or cached.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn list_products(&self, order: OrderBy) -> Result<Vec<Product>, ClientError>;

    async fn create_product(&self, fields: &ProductFields) -> Result<(), ClientError>;

    /// Also stamps `updated_at` with the current time.
    async fn update_product(
        &self,
        id: ProductId,
        fields: &ProductFields,
    ) -> Result<(), ClientError>;

    async fn delete_product(&self, id: ProductId) -> Result<(), ClientError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<(), ClientError>;

    async fn sign_out(&self) -> Result<(), ClientError>;

    async fn get_session(&self) -> Result<Option<Session>, ClientError>;
}

/// Builds a client bound to the session a visitor brought along.
pub trait ClientFactory: Send + Sync {
    fn connect(&self, session: Option<Session>) -> Box<dyn CatalogClient>;
}
