//! Request user identity and capability checks.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The user a request runs as, with their granted capabilities.
///
/// Capability strings are opaque to the host; plugins decide which
/// capability gates which operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserContext {
    /// Unique user identifier. Nil for anonymous visitors.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Granted capability set.
    pub capabilities: BTreeSet<String>,
}

impl UserContext {
    /// Creates a user with an explicit capability set.
    pub fn new(name: &str, capabilities: &[&str]) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            capabilities: capabilities.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Creates an administrator with the full management capability set.
    pub fn administrator(name: &str) -> Self {
        Self::new(name, &["read", "edit_posts", "manage_options"])
    }

    /// Creates an editor who can manage content but not settings.
    pub fn editor(name: &str) -> Self {
        Self::new(name, &["read", "edit_posts"])
    }

    /// Creates a subscriber with read-only access.
    pub fn subscriber(name: &str) -> Self {
        Self::new(name, &["read"])
    }

    /// Creates an anonymous visitor with no capabilities.
    pub fn anonymous() -> Self {
        Self {
            id: Uuid::nil(),
            name: "anonymous".to_string(),
            capabilities: BTreeSet::new(),
        }
    }

    /// Adds a capability.
    pub fn with_capability(mut self, capability: &str) -> Self {
        self.capabilities.insert(capability.to_string());
        self
    }

    /// Returns whether the user holds the given capability.
    pub fn can(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }

    /// Returns whether this is an anonymous visitor.
    pub fn is_anonymous(&self) -> bool {
        self.id.is_nil()
    }
}
