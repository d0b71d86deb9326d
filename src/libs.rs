pub mod client;
pub mod core;
pub mod models;
pub mod server;
pub mod storage;
