//! Pelussi Core - Cart engine, catalog filter and shared gallery types.
//!
//! This crate provides the state core used by every Pelussi component:
//! - `storefront` - Session context, persistence adapters and catalog sources
//! - `cli` - Command-line shell over a storefront session
//!
//! # Architecture
//!
//! The core crate contains only types and pure state machines - no I/O, no
//! storage access, no HTTP clients. State changes are announced through
//! [`cart::CartObserver`] so persistence lives entirely outside this crate.
//!
//! # Modules
//!
//! - [`types`] - Newtypes and value objects (product ids, prices, categories, languages)
//! - [`cart`] - Shopping cart engine with quantity aggregation and change notifications
//! - [`catalog`] - Category filtering, text search and translation fallback

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;

pub use cart::{Cart, CartChange, CartLine, CartObserver};
pub use catalog::{CatalogFilter, resolve_translation, visible_products};
pub use types::*;
