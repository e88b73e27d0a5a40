//! Tool Registry: maps each [`ToolKind`] to the handler that runs it.
//!
//! The registry is the single [`ToolExecutorPort`] implementation. It owns
//! the catalog declared to the model, validates arguments against each
//! definition before running anything, and stamps every outcome with its
//! execution time.
//!
//! ```text
//! ToolDispatcher
//!     │ execute(call)
//!     ▼
//! ToolRegistry ── validate ──▶ handler.run(call) ──▶ ToolOutcome (+duration)
//!     │
//!     └─ HashMap<ToolKind, Arc<dyn ToolHandler>>
//! ```
//!
//! The catalog is rebuilt in [`ToolKind::ALL`] order on every registration,
//! so the menu handed to the model does not depend on wiring order.

use async_trait::async_trait;
use finquery_application::ports::tool_executor::ToolExecutorPort;
use finquery_domain::tool::{
    DefaultToolValidator, ToolValidator,
    entities::{ToolCall, ToolDefinition, ToolKind, ToolSpec},
    value_objects::{ToolError, ToolOutcome},
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// One executor behind one tool kind.
///
/// `run` is only called with arguments that already passed validation
/// against [`definition`](Self::definition). It must never fail outright:
/// every problem becomes the error half of the returned [`ToolOutcome`].
#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn kind(&self) -> ToolKind;

    fn definition(&self) -> ToolDefinition;

    async fn run(&self, call: &ToolCall) -> ToolOutcome;
}

/// Kind-keyed collection of tool handlers
#[derive(Default)]
pub struct ToolRegistry {
    handlers: HashMap<ToolKind, Arc<dyn ToolHandler>>,
    tool_spec: ToolSpec,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. A second handler for the same kind replaces the first.
    pub fn register(self, handler: impl ToolHandler + 'static) -> Self {
        self.register_arc(Arc::new(handler))
    }

    pub fn register_arc(mut self, handler: Arc<dyn ToolHandler>) -> Self {
        let kind = handler.kind();
        if self.handlers.insert(kind, handler).is_some() {
            warn!(tool = kind.name(), "Replacing existing tool handler");
        }
        self.rebuild_spec();
        self
    }

    fn rebuild_spec(&mut self) {
        self.tool_spec = ToolKind::ALL
            .into_iter()
            .filter_map(|kind| self.handlers.get(&kind))
            .fold(ToolSpec::new(), |spec, handler| {
                spec.register(handler.definition())
            });
    }

    /// Kinds declared by the domain that have no handler wired in.
    pub fn missing_kinds(&self) -> Vec<ToolKind> {
        ToolKind::ALL
            .into_iter()
            .filter(|kind| !self.handlers.contains_key(kind))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    fn definition_for(&self, kind: ToolKind) -> Option<&ToolDefinition> {
        self.tool_spec.get(kind.name())
    }
}

#[async_trait]
impl ToolExecutorPort for ToolRegistry {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    fn supports(&self, kind: ToolKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    async fn execute(&self, call: &ToolCall) -> ToolOutcome {
        let handler = call
            .kind()
            .and_then(|kind| self.handlers.get(&kind).map(|h| (kind, h)));

        let Some((kind, handler)) = handler else {
            warn!(tool = %call.tool_name, "No handler registered for tool");
            return ToolOutcome::failure(
                &call.tool_name,
                ToolError::not_found(format!("tool '{}'", call.tool_name)),
            );
        };

        if let Some(definition) = self.definition_for(kind)
            && let Err(e) = DefaultToolValidator.validate(call, definition)
        {
            warn!(tool = kind.name(), error = %e, "Rejected tool arguments");
            return ToolOutcome::failure(kind.name(), ToolError::invalid_argument(e));
        }

        let start = Instant::now();
        let outcome = handler.run(call).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        debug!(
            tool = kind.name(),
            success = outcome.is_success(),
            cached = outcome.metadata.cached,
            duration_ms,
            "Tool finished"
        );

        outcome.with_duration(duration_ms)
    }
}
