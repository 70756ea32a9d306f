//! Room Access Token Service Library
//!
//! This library provides the credential issuance core for the SecretChat
//! video-calling backend: it mints short-lived, room-scoped Twilio Video
//! access tokens on behalf of clients that never hold the provider secret.
//!
//! # Modules
//!
//! - `config` - Service configuration
//! - `crypto` - Access token claims and JWT signing
//! - `errors` - Error types
//! - `handlers` - HTTP request handlers
//! - `middleware` - HTTP middleware layers
//! - `models` - Wire-level data models
//! - `observability` - Metrics and log-field hashing
//! - `routes` - Router assembly
//! - `services` - Business logic layer

pub mod config;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod routes;
pub mod services;
