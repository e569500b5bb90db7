//! HTTP surface of the admin backend
//!
//! Exposes email OTP issuance and verification plus the account flows
//! (email confirmation and password reset) built on top of them.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod startup;
pub mod telemetry;

pub use app::{create_app, AppState};
