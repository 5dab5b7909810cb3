//! Catalog data sources.
//!
//! A [`CatalogSource`] fetches raw product records; [`parse_catalog`] turns
//! them into validated [`Product`]s. Invalid or duplicate records are
//! reported in [`CatalogLoad::rejected`] and skipped, so one bad document
//! never hides the rest of the catalog.
//!
//! # Sources
//!
//! - [`FileCatalogSource`] - YAML or JSON file exported from the document store
//! - [`HttpCatalogSource`] - JSON array served over HTTP(S)

mod file;
mod http;

use std::collections::HashSet;
use std::future::Future;
use std::path::PathBuf;

use pelussi_core::{Product, ValidationError};
use thiserror::Error;
use tracing::warn;

pub use file::FileCatalogSource;
pub use http::HttpCatalogSource;

/// Errors that can occur while fetching the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The payload is not a list of records.
    #[error("failed to parse catalog: {0}")]
    Parse(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog endpoint answered with a non-success status.
    #[error("catalog endpoint returned status {0}")]
    Status(u16),

    /// The access token cannot be sent as a header.
    #[error("invalid catalog token: {0}")]
    InvalidToken(String),
}

/// Fetches raw catalog records.
pub trait CatalogSource {
    /// Fetch every record in source order.
    fn fetch(&self) -> impl Future<Output = Result<Vec<serde_json::Value>, CatalogError>> + Send;

    /// Human-readable location, used in logs.
    fn describe(&self) -> String;
}

/// Why a record was left out of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("duplicate product id")]
    DuplicateId,
}

/// A record that did not make it into the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Position of the record in the source.
    pub index: usize,
    /// The record's id, when it had a readable one.
    pub id: Option<String>,
    pub reason: RejectReason,
}

/// Result of parsing a batch of raw records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogLoad {
    /// Valid products, in source order.
    pub products: Vec<Product>,
    pub rejected: Vec<RejectedRecord>,
}

/// Validate raw records into products.
///
/// The first record with a given id wins; later ones are rejected as
/// duplicates.
#[must_use]
pub fn parse_catalog(records: Vec<serde_json::Value>) -> CatalogLoad {
    let mut load = CatalogLoad::default();
    let mut seen = HashSet::new();

    for (index, record) in records.into_iter().enumerate() {
        let raw_id = record
            .get("id")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);

        let reason = match Product::from_record(record) {
            Ok(product) if seen.insert(product.id.clone()) => {
                load.products.push(product);
                continue;
            }
            Ok(_) => RejectReason::DuplicateId,
            Err(e) => RejectReason::Invalid(e),
        };

        warn!(index, id = ?raw_id, %reason, "Skipping catalog record");
        load.rejected.push(RejectedRecord {
            index,
            id: raw_id,
            reason,
        });
    }

    load
}

/// Fetch and parse the catalog from `source`.
///
/// # Errors
///
/// Returns an error if the source cannot be fetched. Individual invalid
/// records are not errors; see [`CatalogLoad::rejected`].
pub async fn load_catalog<S: CatalogSource>(source: &S) -> Result<CatalogLoad, CatalogError> {
    let records = source.fetch().await?;
    let load = parse_catalog(records);
    tracing::info!(
        source = %source.describe(),
        products = load.products.len(),
        rejected = load.rejected.len(),
        "Catalog loaded"
    );
    Ok(load)
}

fn parse_records_json(payload: &str) -> Result<Vec<serde_json::Value>, CatalogError> {
    serde_json::from_str(payload).map_err(|e| CatalogError::Parse(e.to_string()))
}

fn parse_records_yaml(payload: &str) -> Result<Vec<serde_json::Value>, CatalogError> {
    serde_yaml::from_str(payload).map_err(|e| CatalogError::Parse(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(id: &str, category: &str) -> serde_json::Value {
        json!({
            "id": id,
            "price": 45,
            "category": category,
            "available": true,
            "createdAt": "2024-06-01T08:30:00+02:00",
            "translations": { "en": { "title": id } }
        })
    }

    #[test]
    fn test_parse_catalog_keeps_valid_in_order() {
        let load = parse_catalog(vec![
            record("c", "prints"),
            record("a", "jewelry"),
            record("b", "digital"),
        ]);
        let ids: Vec<_> = load.products.iter().map(|p| p.id.to_string()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
        assert!(load.rejected.is_empty());
    }

    #[test]
    fn test_parse_catalog_reports_invalid_records() {
        let load = parse_catalog(vec![
            record("a", "prints"),
            record("b", "sculpture"),
            json!({ "price": 1 }),
            record("c", "paintings"),
        ]);
        assert_eq!(load.products.len(), 2);
        assert_eq!(load.rejected.len(), 2);
        assert_eq!(load.rejected[0].index, 1);
        assert_eq!(load.rejected[0].id.as_deref(), Some("b"));
        assert_eq!(
            load.rejected[0].reason,
            RejectReason::Invalid(ValidationError::UnknownCategory("sculpture".to_owned()))
        );
        assert_eq!(load.rejected[1].id, None);
    }

    #[test]
    fn test_parse_catalog_rejects_duplicates() {
        let load = parse_catalog(vec![record("a", "prints"), record("a", "digital")]);
        assert_eq!(load.products.len(), 1);
        assert_eq!(load.products[0].category, pelussi_core::Category::Prints);
        assert_eq!(load.rejected[0].reason, RejectReason::DuplicateId);
    }

    #[test]
    fn test_parse_records_formats() {
        assert_eq!(parse_records_json("[{\"id\":\"x\"}]").unwrap().len(), 1);
        assert_eq!(parse_records_yaml("- id: x\n- id: y\n").unwrap().len(), 2);
        assert!(matches!(
            parse_records_json("{\"id\":\"x\"}"),
            Err(CatalogError::Parse(_))
        ));
    }
}
