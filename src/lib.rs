//! Lead API Library
//!
//! Backend for the marketing site: validates email signups from the download form
//! and forwards them to the Brevo contacts API, plus the toolkit-independent logic
//! of the site's browser scripts.
//!
//! # Modules
//!
//! - `api`: API-layer namespace (handlers, middleware, router).
//! - `core`: Domain namespace (validation, models, errors).
//! - `integrations`: External service integrations.
//! - `brevo_client`: Brevo contacts API client.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `middleware`: Request id, request logging and CORS allow-list.
//! - `models`: Request/response bodies.
//! - `server`: Router assembly.
//! - `site`: Lead form state machine and page widgets.
//! - `validation`: Email and consent checks.

pub mod api;
pub mod core;
pub mod integrations;

pub mod brevo_client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;
pub mod site;
pub mod validation;
