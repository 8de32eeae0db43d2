pub mod config;
pub mod error;
pub mod flights;
pub mod intent;
pub mod models;
pub mod orchestrator;
pub mod places;
pub mod response;
pub mod scenarios;
pub mod security;
pub mod server;
pub mod translation;

#[cfg(test)]
pub(crate) mod testing;
