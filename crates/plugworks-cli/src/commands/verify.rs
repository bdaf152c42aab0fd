//! Framework service verification command.
//!
//! Builds the service catalog the way a healthy host would and checks
//! every expected entry against it, one report line per service. The
//! command exits non-zero when anything is missing so it can gate
//! provisioning scripts.

use clap::Args;

use plugworks_core::AppError;
use plugworks_host::catalog::ServiceCatalog;
use plugworks_sdk::framework::{register_services, SERVICE_SET};

use crate::output;

/// Arguments for the verify command
#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Leave a service key out of the catalog before checking
    #[arg(long, value_name = "KEY", hide = true)]
    pub omit: Vec<String>,
}

/// One checked catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyEntry {
    /// Service key.
    pub key: String,
    /// Service description.
    pub description: String,
    /// Whether the catalog resolved the key.
    pub present: bool,
}

impl VerifyEntry {
    /// Formats the entry as its report line, without the status mark.
    pub fn line(&self) -> String {
        if self.present {
            format!("{} ({})", self.description, self.key)
        } else {
            format!("{} ({}) - NOT FOUND", self.description, self.key)
        }
    }
}

/// Checks the expected service set against a catalog, preserving the
/// expected order.
pub fn check_catalog(catalog: &ServiceCatalog) -> Vec<VerifyEntry> {
    SERVICE_SET
        .iter()
        .map(|(key, description)| VerifyEntry {
            key: (*key).to_string(),
            description: (*description).to_string(),
            present: catalog.contains(key),
        })
        .collect()
}

/// Execute the verify command
pub async fn execute(args: &VerifyArgs) -> Result<(), AppError> {
    let catalog = ServiceCatalog::new();
    register_services(&catalog);
    for key in &args.omit {
        catalog.remove(key);
        output::print_warning(&format!("Catalog built without '{}'", key));
    }

    let entries = check_catalog(&catalog);
    let mut missing = 0;
    for entry in &entries {
        if entry.present {
            output::print_success(&entry.line());
        } else {
            output::print_error(&entry.line());
            missing += 1;
        }
    }

    println!();
    output::print_kv("Services checked", &entries.len().to_string());
    output::print_kv("Missing", &missing.to_string());

    if missing > 0 {
        output::print_error("Some services failed to resolve.");
        return Err(AppError::plugin("service catalog verification failed"));
    }

    output::print_success("All services resolved successfully!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_catalog_resolves_every_entry() {
        let catalog = ServiceCatalog::new();
        register_services(&catalog);

        let entries = check_catalog(&catalog);
        assert_eq!(entries.len(), 7);
        assert!(entries.iter().all(|e| e.present));
        assert_eq!(entries[0].line(), "Component (Base) (component)");
    }

    #[test]
    fn test_missing_entry_reports_not_found() {
        let catalog = ServiceCatalog::new();
        register_services(&catalog);
        catalog.remove("post");

        let entries = check_catalog(&catalog);
        let post = entries.iter().find(|e| e.key == "post").expect("post entry");
        assert!(!post.present);
        assert_eq!(post.line(), "Post (post) - NOT FOUND");

        let resolved = entries.iter().filter(|e| e.present).count();
        assert_eq!(resolved, 6);
    }

    #[test]
    fn test_entries_keep_expected_order() {
        let catalog = ServiceCatalog::new();
        register_services(&catalog);

        let entries = check_catalog(&catalog);
        let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "component",
                "settings-core",
                "post",
                "post-controller",
                "term",
                "term-controller",
                "meta-box"
            ]
        );
    }
}
