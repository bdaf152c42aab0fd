//! Framework service set.
//!
//! Every service the SDK provides to plugins is published in the host's
//! service catalog under a stable key. Plugin bootstrap and the verification
//! CLI both check this set, so a host with a damaged or partial framework
//! install is caught before any plugin code wires itself up.

use plugworks_host::catalog::ServiceCatalog;
use tracing::debug;

/// Services the SDK registers on a host, as `(key, description)` pairs.
pub const SERVICE_SET: &[(&str, &str)] = &[
    ("component", "Component (Base)"),
    ("settings-core", "Settings Core"),
    ("post", "Post"),
    ("post-controller", "Post Controller"),
    ("term", "Term"),
    ("term-controller", "Term Controller"),
    ("meta-box", "Meta Box"),
];

/// Registers the full framework service set in the given catalog.
///
/// Registration is idempotent; services already present keep their entry.
pub fn register_services(catalog: &ServiceCatalog) {
    for (key, description) in SERVICE_SET {
        catalog.register(key, description);
    }
    debug!(services = SERVICE_SET.len(), "Framework services registered");
}
