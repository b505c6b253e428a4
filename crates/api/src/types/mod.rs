//! Wire types for the backend REST API.
//!
//! These structs mirror the JSON the backend actually sends and accepts.
//! Money fields are `rust_decimal::Decimal` (the backend emits both strings
//! and numbers for the same field depending on the endpoint; the default
//! deserializer accepts either). Optional fields default rather than fail so
//! older backend revisions keep parsing.

mod cart;
mod catalog;
mod driver;
mod order;
mod user;

pub use cart::*;
pub use catalog::*;
pub use driver::*;
pub use order::*;
pub use user::*;
