//! Core types for the Pelussi gallery.
//!
//! This module provides type-safe wrappers for the gallery's domain concepts.

pub mod category;
pub mod id;
pub mod language;
pub mod preferences;
pub mod price;
pub mod product;

pub use category::{Category, CategoryFilter, ParseEnumError};
pub use id::{ProductId, ProductIdError};
pub use language::Language;
pub use preferences::{Preferences, Theme};
pub use price::{CurrencyCode, Price, PriceError};
pub use product::{Product, RawProduct, RawTranslation, Translation, ValidationError};
