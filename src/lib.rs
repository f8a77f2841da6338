// mserve: a zero-configuration personal media server
// library surface shared by the binary and the integration tests

pub mod config;
pub mod library;
pub mod server;
pub mod utils;
