//! Message translation.
//!
//! Content is written in English and every player-visible string goes through
//! [`tr`]. A catalog maps source strings to translations:
//!
//! ```toml
//! [messages]
//! "The safe is locked." = "Die kluis is gesluit."
//! ```
//!
//! Strings without a translation pass through unchanged.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{LazyLock, RwLock};

use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;

static CATALOG: LazyLock<RwLock<Catalog>> = LazyLock::new(|| RwLock::new(Catalog::default()));

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    messages: HashMap<String, String>,
}

impl Catalog {
    pub fn lookup<'a>(&'a self, source: &'a str) -> &'a str {
        self.messages.get(source).map_or(source, String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Read a catalog from a TOML file.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let text = fs::read_to_string(path).with_context(|| format!("reading catalog '{}'", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing catalog '{}'", path.display()))
}

/// Make `catalog` the active one for the whole process.
pub fn install(catalog: Catalog) {
    info!("installing translation catalog with {} messages", catalog.len());
    if let Ok(mut guard) = CATALOG.write() {
        *guard = catalog;
    }
}

/// Translate a source string with the active catalog.
pub fn tr(source: &str) -> String {
    CATALOG
        .read()
        .map(|catalog| catalog.lookup(source).to_string())
        .unwrap_or_else(|_| source.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn unknown_strings_pass_through() {
        assert_eq!(tr("A string nobody translated"), "A string nobody translated");
    }

    #[test]
    fn catalog_lookup_translates_known_strings() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[messages]\n\"Logs\" = \"Logboek\"").expect("write");
        let catalog = load_catalog(file.path()).expect("catalog");
        assert_eq!(catalog.lookup("Logs"), "Logboek");
        assert_eq!(catalog.lookup("Alerts"), "Alerts");
    }

    #[test]
    fn broken_catalog_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[messages\n").expect("write");
        assert!(load_catalog(file.path()).is_err());
    }
}
