use crate::client::CatalogClient;

const SIGN_IN_FAILED: &str = "Error al iniciar sesión";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    SignedIn,
    Failed,
    /// A previous submission is still in flight.
    Busy,
}

/// Admin credential form.
#[derive(Debug, Default)]
pub struct LoginView {
    pub email: String,
    pub password: String,
    error: Option<String>,
    loading: bool,
}

impl LoginView {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Shows a failure that happened before reaching the auth service.
    pub fn reject(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Signs in and calls `on_success` once the service accepts the
    /// credentials. Navigation is up to the caller.
    pub async fn submit<F>(&mut self, client: &dyn CatalogClient, on_success: F) -> LoginOutcome
    where
        F: FnOnce(),
    {
        if self.loading {
            return LoginOutcome::Busy;
        }

        self.error = None;
        self.loading = true;
        let result = client.sign_in(&self.email, &self.password).await;
        self.loading = false;

        match result {
            Ok(()) => {
                on_success();
                LoginOutcome::SignedIn
            }
            Err(e) => {
                let message = e.to_string();
                self.error = Some(if message.trim().is_empty() {
                    SIGN_IN_FAILED.to_string()
                } else {
                    message
                });
                LoginOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientFactory, MemoryCatalog};

    #[tokio::test]
    async fn test_submit_while_loading_is_ignored() {
        let catalog = MemoryCatalog::new("admin@test.com", "secret", vec![]);
        let client = catalog.connect(None);
        let mut view = LoginView::new("admin@test.com", "secret");
        view.loading = true;

        let mut called = false;
        let outcome = view.submit(client.as_ref(), || called = true).await;

        assert_eq!(outcome, LoginOutcome::Busy);
        assert!(!called);
        assert!(view.is_loading());
        assert!(client.get_session().await.unwrap().is_none());
    }
}
