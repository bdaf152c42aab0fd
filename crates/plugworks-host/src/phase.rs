//! Request phase definitions.
//!
//! A request runs through a fixed, ordered list of phases. Each phase fires
//! exactly once per request; handlers are invoked in priority order within a
//! phase. Activation and deactivation are not phases — they are edge-triggered
//! host operations that run outside the request cycle.

use serde::{Deserialize, Serialize};

/// Enumeration of all request phases, in lifecycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Fired first, after all active plugins are available. Wiring only;
    /// site services may not be fully populated yet.
    PluginsLoaded,
    /// General setup: content registration, translations, public wiring.
    Init,
    /// Admin-side setup. Only fired for admin requests.
    AdminInit,
    /// Fired after setup, before the main content query runs. Last chance
    /// to adjust query behavior.
    QueryReady,
}

impl Phase {
    /// Returns the string name of this phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PluginsLoaded => "plugins_loaded",
            Self::Init => "init",
            Self::AdminInit => "admin_init",
            Self::QueryReady => "query_ready",
        }
    }

    /// Returns whether the phase only fires on admin requests.
    pub fn is_admin_only(&self) -> bool {
        matches!(self, Self::AdminInit)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of request being dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// An administration screen request.
    Admin,
    /// A public-facing request.
    Frontend,
}

impl RequestKind {
    /// Returns the ordered phase list for this request kind.
    ///
    /// Admin requests run every phase. Frontend requests skip `AdminInit`.
    pub fn phase_order(&self) -> &'static [Phase] {
        match self {
            Self::Admin => &[
                Phase::PluginsLoaded,
                Phase::Init,
                Phase::AdminInit,
                Phase::QueryReady,
            ],
            Self::Frontend => &[Phase::PluginsLoaded, Phase::Init, Phase::QueryReady],
        }
    }

    /// Returns the string name of this request kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Frontend => "frontend",
        }
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
