// server module public api

pub mod app;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod pages;

pub use app::{create_app, create_test_app, start_server};
