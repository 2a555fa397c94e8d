// src/gateway/mod.rs
//
// Hosted backend gateway (consumed, not implemented)
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Never creates or modifies domain entities directly
// - Returns typed records that repositories and services map
// - Handles all remote API concerns (headers, sessions, status codes)

pub mod auth;
pub mod client;

pub use auth::AuthUserRecord;
pub use client::{GatewayClient, GatewayConfig};
