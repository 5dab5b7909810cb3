//! Catalog products and the validating boundary for raw catalog records.
//!
//! Records arrive from the document store with every field optional.
//! [`Product::try_from`] turns a [`RawProduct`] into a fully typed
//! [`Product`] or reports exactly which field was unusable; nothing is
//! silently defaulted except empty image and translation collections.
//!
//! Translations are partial by nature. An entry in an unsupported language
//! or without a title is dropped with a warning and the product is kept;
//! display falls back through [`crate::resolve_translation`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use super::{Category, Language, Price, ProductId, ProductIdError};

/// Errors raised when a raw catalog record cannot become a [`Product`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The record is not an object with the expected field types.
    #[error("malformed record: {0}")]
    Malformed(String),
    /// A required field is absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    /// The id is empty or too long.
    #[error("invalid id: {0}")]
    InvalidId(#[from] ProductIdError),
    /// The price is below zero.
    #[error("price cannot be negative (got {0})")]
    NegativePrice(Decimal),
    /// The category is not one of the gallery's categories.
    #[error("unknown category `{0}`")]
    UnknownCategory(String),
    /// An image entry is not an absolute URL.
    #[error("invalid image url `{url}`: {reason}")]
    InvalidImageUrl { url: String, reason: String },
    /// `createdAt` is not an RFC 3339 timestamp.
    #[error("invalid createdAt `{0}`")]
    InvalidTimestamp(String),
}

/// Display text for a product in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Translation {
    /// Title shown when no usable translation exists.
    pub const PLACEHOLDER_TITLE: &'static str = "Untitled";

    /// The `{title: "Untitled", description: ""}` placeholder.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            title: Self::PLACEHOLDER_TITLE.to_owned(),
            description: String::new(),
            tags: Vec::new(),
        }
    }
}

/// A gallery product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub price: Price,
    pub category: Category,
    pub available: bool,
    #[serde(default)]
    pub images: Vec<Url>,
    #[serde(default)]
    pub translations: BTreeMap<Language, Translation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// The translation stored for `language`, if any.
    #[must_use]
    pub fn translation(&self, language: Language) -> Option<&Translation> {
        self.translations.get(&language)
    }

    /// Decode and validate a single loosely-typed record.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Malformed`] if the record does not have the
    /// shape of a [`RawProduct`], otherwise any error from
    /// [`Product::try_from`].
    pub fn from_record(record: serde_json::Value) -> Result<Self, ValidationError> {
        let raw: RawProduct = serde_json::from_value(record)
            .map_err(|e| ValidationError::Malformed(e.to_string()))?;
        Self::try_from(raw)
    }
}

/// A catalog record as stored in the document database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub available: Option<bool>,
    pub images: Option<Vec<String>>,
    pub translations: Option<BTreeMap<String, RawTranslation>>,
    pub dimensions: Option<String>,
    pub medium: Option<String>,
    pub created_at: Option<String>,
}

/// A translation as stored in the document database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTranslation {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl TryFrom<RawProduct> for Product {
    type Error = ValidationError;

    fn try_from(raw: RawProduct) -> Result<Self, Self::Error> {
        let id = ProductId::parse(&raw.id.ok_or(ValidationError::MissingField("id"))?)?;

        let amount = raw.price.ok_or(ValidationError::MissingField("price"))?;
        let price = Price::new(amount).map_err(|_| ValidationError::NegativePrice(amount))?;

        let category_name = raw
            .category
            .ok_or(ValidationError::MissingField("category"))?;
        let category = category_name
            .parse::<Category>()
            .map_err(|_| ValidationError::UnknownCategory(category_name))?;

        let available = raw
            .available
            .ok_or(ValidationError::MissingField("available"))?;

        let images = raw
            .images
            .unwrap_or_default()
            .into_iter()
            .map(|url| {
                Url::parse(&url).map_err(|e| ValidationError::InvalidImageUrl {
                    url,
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let translations = raw
            .translations
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(code, translation)| convert_translation(&id, &code, translation))
            .collect::<BTreeMap<_, _>>();

        let created_at_raw = raw
            .created_at
            .ok_or(ValidationError::MissingField("createdAt"))?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_raw)
            .map_err(|_| ValidationError::InvalidTimestamp(created_at_raw))?
            .with_timezone(&Utc);

        Ok(Self {
            id,
            price,
            category,
            available,
            images,
            translations,
            dimensions: non_blank(raw.dimensions),
            medium: non_blank(raw.medium),
            created_at,
        })
    }
}

fn convert_translation(
    id: &ProductId,
    code: &str,
    raw: RawTranslation,
) -> Option<(Language, Translation)> {
    let Ok(language) = code.parse::<Language>() else {
        warn!(product_id = %id, language = code, "Dropping translation in unsupported language");
        return None;
    };
    let Some(title) = non_blank(raw.title) else {
        warn!(product_id = %id, %language, "Dropping translation without a title");
        return None;
    };
    Some((
        language,
        Translation {
            title,
            description: raw.description.unwrap_or_default(),
            tags: raw.tags.unwrap_or_default(),
        },
    ))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
