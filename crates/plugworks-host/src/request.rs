//! Request context and the report produced by a full dispatch cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assets::Asset;
use crate::notices::Notice;
use crate::phase::{Phase, RequestKind};
use crate::users::UserContext;

/// Context for a single simulated request, passed to every phase handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Unique request identifier.
    pub id: Uuid,
    /// Whether this is an admin or frontend request.
    pub kind: RequestKind,
    /// The user the request runs as.
    pub user: UserContext,
    /// When the request started.
    pub started_at: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(kind: RequestKind, user: UserContext) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            user,
            started_at: Utc::now(),
        }
    }

    /// Creates an admin request context.
    pub fn admin(user: UserContext) -> Self {
        Self::new(RequestKind::Admin, user)
    }

    /// Creates a frontend request context.
    pub fn frontend(user: UserContext) -> Self {
        Self::new(RequestKind::Frontend, user)
    }

    /// Returns whether this is an admin request.
    pub fn is_admin(&self) -> bool {
        self.kind == RequestKind::Admin
    }
}

/// A handler failure recorded during dispatch.
///
/// Failures never abort the request; they are collected here and logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerFailure {
    /// Phase the handler ran in.
    pub phase: Phase,
    /// Plugin owning the handler.
    pub plugin_id: String,
    /// Handler name.
    pub handler: String,
    /// Error message.
    pub message: String,
}

/// Summary of a completed request dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestReport {
    /// The request identifier.
    pub request_id: Uuid,
    /// The request kind that was dispatched.
    pub kind: RequestKind,
    /// Phases that fired, in order.
    pub phases_run: Vec<Phase>,
    /// Total handler invocations across all phases.
    pub handlers_run: usize,
    /// Handler failures collected during dispatch.
    pub failures: Vec<HandlerFailure>,
    /// Stylesheets enqueued during the request, in enqueue order.
    pub styles: Vec<Asset>,
    /// Scripts enqueued during the request, in enqueue order.
    pub scripts: Vec<Asset>,
    /// Notices rendered at the end of the request (admin requests only).
    pub notices: Vec<Notice>,
}

impl RequestReport {
    /// Returns whether every handler completed without error.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the handles of all enqueued assets, styles first.
    pub fn asset_handles(&self) -> Vec<&str> {
        self.styles
            .iter()
            .chain(self.scripts.iter())
            .map(|a| a.handle.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_context() {
        let ctx = RequestContext::admin(UserContext::administrator("alice"));
        assert!(ctx.is_admin());
        assert_eq!(ctx.kind, RequestKind::Admin);
    }

    #[test]
    fn test_frontend_context() {
        let ctx = RequestContext::frontend(UserContext::anonymous());
        assert!(!ctx.is_admin());
    }
}
