//! Phase dispatcher — fires one phase for one request.
//!
//! Handlers run in priority order. A failing handler is logged and recorded
//! in the outcome, then dispatch moves on to the next handler; a broken
//! plugin must not take the whole request down. A handler that exceeds the
//! time limit is treated the same way.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error};

use crate::phase::Phase;
use crate::registry::PhaseRegistry;
use crate::request::{HandlerFailure, RequestContext};
use crate::services::HostServices;

/// Time limit for a single handler invocation.
const HANDLER_TIMEOUT: Duration = Duration::from_secs(10);

/// Aggregated result of dispatching one phase.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    /// The phase that was dispatched.
    pub phase: Phase,
    /// Number of handlers invoked.
    pub handlers_run: usize,
    /// Failures collected during the phase.
    pub failures: Vec<HandlerFailure>,
}

/// Dispatches phases to all registered handlers.
#[derive(Debug)]
pub struct PhaseDispatcher {
    /// Phase registry.
    registry: Arc<PhaseRegistry>,
}

impl PhaseDispatcher {
    /// Creates a new phase dispatcher.
    pub fn new(registry: Arc<PhaseRegistry>) -> Self {
        Self { registry }
    }

    /// Dispatches a phase to all registered handlers in priority order.
    pub async fn dispatch(
        &self,
        phase: Phase,
        services: &HostServices,
        request: &RequestContext,
    ) -> DispatchOutcome {
        let handlers = self.registry.get_handlers(phase).await;

        if handlers.is_empty() {
            return DispatchOutcome {
                phase,
                handlers_run: 0,
                failures: Vec::new(),
            };
        }

        debug!(
            phase = %phase,
            request_id = %request.id,
            handler_count = handlers.len(),
            "Dispatching phase"
        );

        let mut failures = Vec::new();

        for handler in &handlers {
            match tokio::time::timeout(HANDLER_TIMEOUT, handler.run(services, request)).await {
                Ok(Ok(())) => {
                    debug!(
                        phase = %phase,
                        plugin_id = %handler.plugin_id(),
                        handler = %handler.name(),
                        "Handler completed"
                    );
                }
                Ok(Err(e)) => {
                    error!(
                        phase = %phase,
                        plugin_id = %handler.plugin_id(),
                        handler = %handler.name(),
                        error = %e,
                        "Handler failed, continuing with remaining handlers"
                    );
                    failures.push(HandlerFailure {
                        phase,
                        plugin_id: handler.plugin_id().to_string(),
                        handler: handler.name().to_string(),
                        message: e.to_string(),
                    });
                }
                Err(_) => {
                    error!(
                        phase = %phase,
                        plugin_id = %handler.plugin_id(),
                        handler = %handler.name(),
                        "Handler timed out after {} seconds",
                        HANDLER_TIMEOUT.as_secs()
                    );
                    failures.push(HandlerFailure {
                        phase,
                        plugin_id: handler.plugin_id().to_string(),
                        handler: handler.name().to_string(),
                        message: format!(
                            "timed out after {} seconds",
                            HANDLER_TIMEOUT.as_secs()
                        ),
                    });
                }
            }
        }

        DispatchOutcome {
            phase,
            handlers_run: handlers.len(),
            failures,
        }
    }

    /// Returns a reference to the phase registry.
    pub fn registry(&self) -> &Arc<PhaseRegistry> {
        &self.registry
    }
}
