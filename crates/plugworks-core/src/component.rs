//! Component identity shared by every plugin sub-component.
//!
//! The host platform's component model hands each component a name and a
//! version at construction time. Both are immutable afterwards; everything
//! that needs them receives a `ComponentInfo` by value or reference instead
//! of inheriting from a framework base class.

use serde::{Deserialize, Serialize};

/// Immutable name/version pair identifying a plugin component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentInfo {
    /// Component (plugin) name, e.g. `"example-plugin"`.
    name: String,
    /// Component version string, e.g. `"1.0.6"`.
    version: String,
}

impl ComponentInfo {
    /// Create a new component identity.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// The component name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The component version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Derive an asset handle for this component, e.g. `"example-plugin-admin"`.
    pub fn asset_handle(&self, suffix: &str) -> String {
        format!("{}-{}", self.name, suffix)
    }
}

impl std::fmt::Display for ComponentInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_immutable_after_construction() {
        let info = ComponentInfo::new("example-plugin", "1.0.6");
        assert_eq!(info.name(), "example-plugin");
        assert_eq!(info.version(), "1.0.6");
    }

    #[test]
    fn test_asset_handle() {
        let info = ComponentInfo::new("example-plugin", "1.0.6");
        assert_eq!(info.asset_handle("admin"), "example-plugin-admin");
    }

    #[test]
    fn test_display() {
        let info = ComponentInfo::new("example-plugin", "1.0.6");
        assert_eq!(info.to_string(), "example-plugin v1.0.6");
    }
}
