//! # Permis HTTP Server Module
//!
//! Axum server exposing the license-record API.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/permis` - List and create records
//! - `/api/permis/:id` - Read, update, and delete one record

pub mod config;
pub mod observability_routes;
pub mod permis_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
