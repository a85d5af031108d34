//! Translation (`.nls`) property files and translation store ordering.
//!
//! An `.nls` file is a plain `key=value` property file whose `Nls-Class`
//! key names the fully qualified translation provider class. A blank or
//! missing value means absent, never an error.

use crate::error::{FormforgeError, Result};
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Property key naming the provider class.
pub const NLS_CLASS_KEY: &str = "Nls-Class";

/// A parsed `.nls` property file.
#[derive(Debug, Clone)]
pub struct NlsFile {
    pub path: PathBuf,
    entries: IndexMap<String, String>,
}

impl NlsFile {
    /// Read and parse a property file. Lines without `=` and comment lines
    /// (`#`) are skipped.
    pub fn parse(path: impl AsRef<Path>) -> Result<NlsFile> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| FormforgeError::nls(path, e.to_string()))?;
        Ok(Self::parse_content(path, &content))
    }

    pub fn parse_content(path: impl Into<PathBuf>, content: &str) -> NlsFile {
        let mut entries = IndexMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                entries.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
        let file = NlsFile {
            path: path.into(),
            entries,
        };
        debug!(path = %file.path.display(), entries = file.entries.len(), "Nls file parsed");
        file
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// The referenced provider class. Blank values count as absent.
    pub fn nls_class(&self) -> Option<&str> {
        self.get(NLS_CLASS_KEY).filter(|v| !v.is_empty())
    }
}

/// One translation service with its precedence order.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationStore {
    /// Fully qualified name of the backing text provider service.
    pub service_class: String,
    /// Precedence order; lower values win.
    pub order: f64,
}

impl TranslationStore {
    pub fn new(service_class: impl Into<String>, order: f64) -> Self {
        TranslationStore {
            service_class: service_class.into(),
            order,
        }
    }
}

/// Total order over optional translation stores: by precedence order first,
/// then by service class name; a present store always sorts before an
/// absent one.
pub fn compare_stores(a: Option<&TranslationStore>, b: Option<&TranslationStore>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (Some(a), Some(b)) => a
            .order
            .partial_cmp(&b.order)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.service_class.cmp(&b.service_class)),
    }
}
