use crate::client::CatalogClient;
use crate::log_err;
use crate::models::{OrderBy, Product, ProductDraft, ProductId};

use super::PublicSite;

const LOAD_FAILED: &str = "Error al cargar productos";
const SAVE_FAILED: &str = "Error al guardar producto";
const DELETE_FAILED: &str = "Error al eliminar producto";
const NOT_FOUND: &str = "Producto no encontrado";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Viewing,
    Creating,
    Editing(ProductId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Invalid,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Declined,
    Failed,
}

/// Product management screen.
#[derive(Debug)]
pub struct Dashboard {
    products: Vec<Product>,
    loading: bool,
    mode: Mode,
    draft: ProductDraft,
    error: Option<String>,
    pending_delete: Option<ProductId>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            loading: true,
            mode: Mode::Viewing,
            draft: ProductDraft::default(),
            error: None,
            pending_delete: None,
        }
    }
}

fn message_or(e: impl ToString, fallback: &str) -> String {
    let message = e.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

impl Dashboard {
    /// Starts from a catalog already fetched for the public site instead of
    /// asking the store again.
    pub fn from_site(site: &PublicSite) -> Self {
        Self {
            products: site.products().to_vec(),
            loading: site.is_loading(),
            error: site.load_error().map(|e| message_or(e, LOAD_FAILED)),
            ..Default::default()
        }
    }

    pub async fn load(&mut self, client: &dyn CatalogClient) {
        match client.list_products(OrderBy::POSITION).await {
            Ok(mut products) => {
                OrderBy::POSITION.sort(&mut products);
                self.products = products;
            }
            Err(e) => {
                log_err!("loading dashboard products", e);
                self.error = Some(message_or(e, LOAD_FAILED));
            }
        }
        self.loading = false;
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ProductDraft {
        &mut self.draft
    }

    /// Shown when there is nothing listed and no create form open.
    pub fn is_empty_state(&self) -> bool {
        self.products.is_empty() && self.mode != Mode::Creating
    }

    pub fn start_create(&mut self) {
        self.mode = Mode::Creating;
        self.draft = ProductDraft::default();
        self.error = None;
        self.pending_delete = None;
    }

    /// Opens the edit form pre-filled from the listed product. An id that
    /// is not listed stays in the current mode with an error.
    pub fn start_edit(&mut self, id: ProductId) -> bool {
        let Some(product) = self.product(id) else {
            self.error = Some(NOT_FOUND.to_string());
            return false;
        };

        self.draft = ProductDraft::from_product(product);
        self.mode = Mode::Editing(id);
        self.error = None;
        self.pending_delete = None;
        true
    }

    pub fn cancel(&mut self) {
        self.mode = Mode::Viewing;
        self.draft = ProductDraft::default();
        self.error = None;
    }

    /// Validates the draft locally, then creates or updates. On success the
    /// list is reloaded and the view returns to [`Mode::Viewing`]; otherwise
    /// mode and draft are kept.
    pub async fn save(&mut self, client: &dyn CatalogClient) -> SaveOutcome {
        let fields = match self.draft.validate() {
            Ok(fields) => fields,
            Err(e) => {
                self.error = Some(e.to_string());
                return SaveOutcome::Invalid;
            }
        };

        let result = match self.mode {
            Mode::Creating => client.create_product(&fields).await,
            Mode::Editing(id) => client.update_product(id, &fields).await,
            // No form is open.
            Mode::Viewing => return SaveOutcome::Invalid,
        };

        if let Err(e) = result {
            log_err!("saving product", e);
            self.error = Some(message_or(e, SAVE_FAILED));
            return SaveOutcome::Failed;
        }

        self.cancel();
        self.load(client).await;
        SaveOutcome::Saved
    }

    /// First half of a delete: asks for confirmation.
    pub fn request_delete(&mut self, id: ProductId) -> bool {
        if self.product(id).is_none() {
            self.error = Some(NOT_FOUND.to_string());
            return false;
        }
        self.pending_delete = Some(id);
        true
    }

    pub fn pending_delete(&self) -> Option<&Product> {
        self.pending_delete.and_then(|id| self.product(id))
    }

    /// Deletes only when `confirmed`; a declined confirmation never reaches
    /// the client.
    pub async fn delete(
        &mut self,
        client: &dyn CatalogClient,
        id: ProductId,
        confirmed: bool,
    ) -> DeleteOutcome {
        self.pending_delete = None;
        if !confirmed {
            return DeleteOutcome::Declined;
        }

        match client.delete_product(id).await {
            Ok(()) => {
                self.load(client).await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                log_err!("deleting product", e);
                self.error = Some(message_or(e, DELETE_FAILED));
                DeleteOutcome::Failed
            }
        }
    }

    /// Signs out and hands control back through `on_logout`, also when the
    /// service could not be reached.
    pub async fn logout<F>(&mut self, client: &dyn CatalogClient, on_logout: F)
    where
        F: FnOnce(),
    {
        if let Err(e) = client.sign_out().await {
            log_err!("signing out", e);
        }
        on_logout();
    }
}
