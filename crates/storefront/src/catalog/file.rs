//! Catalog exported to a local YAML or JSON file.

use std::path::{Path, PathBuf};

use super::{CatalogError, CatalogSource, parse_records_json, parse_records_yaml};

/// Reads the catalog from a file. `.yaml`/`.yml` files are parsed as YAML,
/// everything else as JSON.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_yaml(&self) -> bool {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
    }
}

impl CatalogSource for FileCatalogSource {
    async fn fetch(&self) -> Result<Vec<serde_json::Value>, CatalogError> {
        let content =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| CatalogError::Io {
                    path: self.path.clone(),
                    source,
                })?;

        if self.is_yaml() {
            parse_records_yaml(&content)
        } else {
            parse_records_json(&content)
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
