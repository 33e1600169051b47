#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use boavila::client::CatalogClient;
use boavila::common::ClientError;
use boavila::models::*;

const TIME_FMT: &str = "%Y-%m-%d %H:%M:%S%#z";

pub fn parse_time(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_str(s, TIME_FMT)
        .expect("Invalid time format in test helper")
        .with_timezone(&Utc)
}

pub fn seed_id(n: u8) -> Uuid {
    Uuid::parse_str(&format!("00000000-0000-0000-0000-0000000000{n:02x}")).unwrap()
}

pub fn get_seed_product(n: u8, title: &str, order_position: i32) -> Product {
    Product {
        id: seed_id(n),
        title: title.to_string(),
        description: format!("Descripción de {title}"),
        image_url: Some(format!("https://img.test/{n}.jpg")),
        instagram_link: Some(format!("https://instagram.com/p/{n}")),
        order_position,
        created_at: Some(parse_time("2026-01-04 22:15:06+00")),
        updated_at: Some(parse_time("2026-01-04 22:15:06+00")),
    }
}

/// Deliberately out of order, with a tie on position 1.
pub fn get_seed_products() -> Vec<Product> {
    vec![
        get_seed_product(3, "Anillo Luna", 3),
        get_seed_product(1, "Collar Mar", 1),
        get_seed_product(2, "Broche Sol", 1),
        get_seed_product(4, "Pulsera Río", 0),
    ]
}

pub fn pendientes_azul_form() -> ProductDraft {
    ProductDraft {
        title: "Pendientes Azul".to_string(),
        description: "Pieza artesanal".to_string(),
        image_url: String::new(),
        instagram_link: String::new(),
        order_position: 2,
    }
}

pub fn live_session() -> Session {
    Session::new("token", None, Utc::now().timestamp() + 3600)
}

/// In-process client that records calls and fails on request.
#[derive(Default)]
pub struct FakeClient {
    pub products: Mutex<Vec<Product>>,
    pub session: Mutex<Option<Session>>,
    pub list_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub sign_in_calls: AtomicUsize,
    pub sign_out_calls: AtomicUsize,
    pub fail_list: AtomicBool,
    pub fail_writes: AtomicBool,
    pub fail_auth: AtomicBool,
    pub fail_session: AtomicBool,
}

impl FakeClient {
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
            ..Default::default()
        }
    }

    pub fn signed_in(self) -> Self {
        *self.session.lock().unwrap() = Some(live_session());
        self
    }

    pub fn failing_writes(self) -> Self {
        self.fail_writes.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_list(self) -> Self {
        self.fail_list.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_auth(self) -> Self {
        self.fail_auth.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_session(self) -> Self {
        self.fail_session.store(true, Ordering::SeqCst);
        self
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> usize {
        Self::calls(&self.create_calls)
            + Self::calls(&self.update_calls)
            + Self::calls(&self.delete_calls)
    }

    pub fn stored(&self) -> Vec<Product> {
        self.products.lock().unwrap().clone()
    }

    fn service_error(&self) -> ClientError {
        ClientError::Service {
            status: 500,
            message: "upstream unavailable".to_string(),
        }
    }
}

#[async_trait]
impl CatalogClient for FakeClient {
    async fn list_products(&self, _order: OrderBy) -> Result<Vec<Product>, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(self.service_error());
        }
        // Store order on purpose; callers sort.
        Ok(self.stored())
    }

    async fn create_product(&self, fields: &ProductFields) -> Result<(), ClientError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(self.service_error());
        }
        self.products.lock().unwrap().push(Product {
            id: Uuid::new_v4(),
            title: fields.title.clone(),
            description: fields.description.clone(),
            image_url: fields.image_url.clone(),
            instagram_link: fields.instagram_link.clone(),
            order_position: fields.order_position,
            created_at: Some(Utc::now()),
            updated_at: None,
        });
        Ok(())
    }

    async fn update_product(
        &self,
        id: ProductId,
        fields: &ProductFields,
    ) -> Result<(), ClientError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(self.service_error());
        }
        let mut products = self.products.lock().unwrap();
        if let Some(p) = products.iter_mut().find(|p| p.id == id) {
            p.title = fields.title.clone();
            p.description = fields.description.clone();
            p.image_url = fields.image_url.clone();
            p.instagram_link = fields.instagram_link.clone();
            p.order_position = fields.order_position;
            p.updated_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ClientError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(self.service_error());
        }
        self.products.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    async fn sign_in(&self, _email: &str, _password: &str) -> Result<(), ClientError> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_auth.load(Ordering::SeqCst) {
            return Err(ClientError::Auth("Invalid login credentials".to_string()));
        }
        *self.session.lock().unwrap() = Some(live_session());
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), ClientError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        self.session.lock().unwrap().take();
        if self.fail_auth.load(Ordering::SeqCst) {
            return Err(self.service_error());
        }
        Ok(())
    }

    async fn get_session(&self) -> Result<Option<Session>, ClientError> {
        if self.fail_session.load(Ordering::SeqCst) {
            return Err(ClientError::Service {
                status: 503,
                message: "Service Unavailable".to_string(),
            });
        }
        Ok(self.session.lock().unwrap().clone())
    }
}
