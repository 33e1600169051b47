use std::sync::Arc;

use boavila::client::ClientFactory;

use crate::web::security::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub clients: Arc<dyn ClientFactory>,
    pub rate_limiter: Arc<RateLimiter>,
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(clients: Arc<dyn ClientFactory>, cookie_secure: bool) -> Self {
        Self {
            clients,
            rate_limiter: Arc::new(RateLimiter::new()),
            cookie_secure,
        }
    }
}
