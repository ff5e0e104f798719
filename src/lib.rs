//! permis - REST service for driving-license records
//!
//! Five endpoints under `/api/permis` over a single PostgreSQL table,
//! with validation and COALESCE-style partial updates.

pub mod cli;
pub mod config;
pub mod http_server;
pub mod logging;
pub mod permis;
