//! Translation catalog.
//!
//! Plugins load a text domain during init; lookups fall back to the source
//! string when no translation is present, so an unloaded or partial catalog
//! never breaks rendering.

use std::collections::HashMap;

use dashmap::DashMap;
use tracing::debug;

/// A loaded text domain.
#[derive(Debug, Clone)]
struct TextDomain {
    locale: String,
    dir: String,
    entries: HashMap<String, String>,
}

/// Registry of loaded text domains.
#[derive(Debug, Default)]
pub struct TranslationCatalog {
    domains: DashMap<String, TextDomain>,
}

impl TranslationCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a text domain for a locale. Returns false if the domain was
    /// already loaded; loading is idempotent per request cycle.
    pub fn load_text_domain(&self, domain: &str, locale: &str, dir: &str) -> bool {
        if self.domains.contains_key(domain) {
            debug!(domain = %domain, "Text domain already loaded");
            return false;
        }
        self.domains.insert(
            domain.to_string(),
            TextDomain {
                locale: locale.to_string(),
                dir: dir.to_string(),
                entries: HashMap::new(),
            },
        );
        debug!(domain = %domain, locale = %locale, dir = %dir, "Text domain loaded");
        true
    }

    /// Returns whether a text domain is loaded.
    pub fn is_loaded(&self, domain: &str) -> bool {
        self.domains.contains_key(domain)
    }

    /// Returns the locale a domain was loaded for.
    pub fn locale(&self, domain: &str) -> Option<String> {
        self.domains.get(domain).map(|d| d.locale.clone())
    }

    /// Returns the directory a domain's catalog was loaded from.
    pub fn dir(&self, domain: &str) -> Option<String> {
        self.domains.get(domain).map(|d| d.dir.clone())
    }

    /// Adds translation entries to a loaded domain. Returns false if the
    /// domain is not loaded.
    pub fn add_entries(&self, domain: &str, entries: HashMap<String, String>) -> bool {
        match self.domains.get_mut(domain) {
            Some(mut d) => {
                d.entries.extend(entries);
                true
            }
            None => false,
        }
    }

    /// Translates a string in a domain, falling back to the input.
    pub fn translate(&self, domain: &str, text: &str) -> String {
        self.domains
            .get(domain)
            .and_then(|d| d.entries.get(text).cloned())
            .unwrap_or_else(|| text.to_string())
    }

    /// Unloads a text domain. Returns false if it was not loaded.
    pub fn unload(&self, domain: &str) -> bool {
        self.domains.remove(domain).is_some()
    }
}
