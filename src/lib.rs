pub mod client;
pub mod common;
pub mod config;
pub mod models;
pub mod views;
