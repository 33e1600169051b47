pub mod auth;
pub mod products;
pub mod root;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    root::configure(cfg);
    auth::configure(cfg);
    products::configure(cfg);
}
