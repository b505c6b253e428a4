//! Feira Livre API - Typed client for the backend REST API.
//!
//! The backend owns every authoritative computation: pricing, discounts,
//! delivery fees, PIX code generation and expiry, and all order status
//! transitions. This crate is the client side of that contract - a single
//! configured HTTP pipeline plus the two pieces of stateful client logic the
//! app actually carries:
//!
//! - [`cart::CartState`] - cart/quote reconciliation. Every mutation issues
//!   one backend call and then unconditionally re-fetches the cart, so the
//!   displayed totals can never diverge from server-side pricing.
//! - [`pix::PixWallet`] - in-memory PIX code lifecycle
//!   (`no code -> requesting -> active -> expired`), swept by a 1-second
//!   tick; expired codes are discarded and never re-requested automatically.
//!
//! # Example
//!
//! ```rust,ignore
//! use feira_livre_api::{ApiClient, ApiConfig, cart::CartState};
//!
//! let config = ApiConfig::from_env()?;
//! let client = ApiClient::new(&config)?;
//!
//! let auth = client.login("ana@example.com", "s3nh@F0rte!").await?;
//! client.set_token(&auth.access_token);
//!
//! let mut cart = CartState::default();
//! cart.refresh(&client).await?;
//! cart.increment(&client, item_id).await?;
//! println!("{}", cart.quote().display());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod orders;
pub mod pix;
pub mod session;
pub mod store;
pub mod types;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::ApiError;
pub use session::{Session, SessionStore};
