//! Client for the TakeOne app-user SDK API (`/sdkapi/v1`).
//!
//! Calls are authorized with OAuth2 bearer tokens obtained by exchanging
//! the one-time authorization code that the web application emails to a
//! provider. [`auth::TokenAuth`] refreshes an expired access token once per
//! request.

pub mod auth;
pub mod client;
pub mod models;

pub use auth::TokenAuth;
pub use client::SdkClient;
