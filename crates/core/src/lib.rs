//! Feira Livre Core - Shared domain types.
//!
//! This crate provides common types used across all Feira Livre components:
//! - `api` - Typed client for the backend REST API
//! - `cli` - Multi-role command-line front end (`fl-cli`)
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. The backend
//! owns every authoritative computation (pricing, discounts, delivery fees,
//! PIX expiry); these types exist so the client crates agree on IDs, money
//! display, and the status vocabulary the backend speaks.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, BRL money formatting, and status enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
