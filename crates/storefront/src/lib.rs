//! Pelussi Storefront library.
//!
//! Wires the pure cart and catalog state from `pelussi-core` to the outside
//! world: durable key-value persistence, catalog data sources and
//! environment configuration. A [`session::StorefrontSession`] is the single
//! application context a front end constructs and passes around; there is
//! no global state.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod persistence;
pub mod session;

pub use config::StorefrontConfig;
pub use error::{Result, StorefrontError};
pub use session::StorefrontSession;
