//! Tool dispatch.
//!
//! Turns the model's function call into exactly one executor run. The model's
//! output crosses a trust boundary, so the name is checked before anything
//! touches a provider:
//!
//! 1. blank name → [`DispatchError::InvalidAiResponse`]
//! 2. name with no [`ToolKind`] or no executor → [`DispatchError::UnrecognizedFunction`]
//! 3. otherwise the executor runs once and its [`ToolOutcome`] is returned
//!
//! Provider failures are not dispatch errors; they arrive as the error half
//! of the outcome.

use crate::ports::query_logger::{NoQueryLogger, QueryEvent, QueryLogger};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::tool_helpers::describe_call;
use finquery_domain::tool::entities::{ToolCall, ToolKind, ToolSpec};
use finquery_domain::tool::value_objects::ToolOutcome;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Fatal dispatch failures. Both abort the query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The model signalled a function call but gave no function name
    #[error("Invalid AI response: function call without a name")]
    InvalidAiResponse,

    /// The name matches no tool, or the tool has no executor
    #[error("Unrecognized function: {0}")]
    UnrecognizedFunction(String),
}

/// Maps a model function call to its executor and runs it once.
#[derive(Clone)]
pub struct ToolDispatcher {
    executor: Arc<dyn ToolExecutorPort>,
    query_logger: Arc<dyn QueryLogger>,
}

impl ToolDispatcher {
    pub fn new(executor: Arc<dyn ToolExecutorPort>) -> Self {
        Self {
            executor,
            query_logger: Arc::new(NoQueryLogger),
        }
    }

    pub fn with_query_logger(mut self, logger: Arc<dyn QueryLogger>) -> Self {
        self.query_logger = logger;
        self
    }

    /// The catalog declared to the model.
    pub fn tool_spec(&self) -> &ToolSpec {
        self.executor.tool_spec()
    }

    /// Resolve a call to a tool kind without running anything.
    pub fn resolve(&self, call: &ToolCall) -> Result<ToolKind, DispatchError> {
        if !call.has_name() {
            return Err(DispatchError::InvalidAiResponse);
        }

        let name = call.tool_name.trim();
        match call.kind() {
            Some(kind) if self.executor.supports(kind) => Ok(kind),
            Some(kind) => {
                // Declared in the closed set but nothing registered behind it.
                error!("Tool '{}' has no registered executor", kind);
                Err(DispatchError::UnrecognizedFunction(name.to_string()))
            }
            None => Err(DispatchError::UnrecognizedFunction(name.to_string())),
        }
    }

    /// Run the requested tool exactly once.
    pub async fn dispatch(&self, call: &ToolCall) -> Result<ToolOutcome, DispatchError> {
        let kind = match self.resolve(call) {
            Ok(kind) => kind,
            Err(e) => {
                warn!("Dispatch rejected: {}", e);
                return Err(e);
            }
        };

        info!("Dispatching {} ({})", kind, describe_call(kind, call));
        self.query_logger.log(QueryEvent::new(
            "tool_call",
            serde_json::json!({
                "tool": kind.name(),
                "arguments": call.arguments,
            }),
        ));

        let outcome = self.executor.execute(call).await;

        debug!(
            "Tool {} finished: success={}, duration_ms={:?}",
            kind,
            outcome.is_success(),
            outcome.metadata.duration_ms
        );
        self.query_logger.log(QueryEvent::new(
            "tool_outcome",
            serde_json::json!({
                "tool": kind.name(),
                "success": outcome.is_success(),
                "error": outcome.error().map(|e| e.to_string()),
                "duration_ms": outcome.metadata.duration_ms,
                "cached": outcome.metadata.cached,
            }),
        ));

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use finquery_domain::tool::entities::ToolDefinition;
    use finquery_domain::tool::value_objects::ToolError;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ==================== Test Mocks ====================

    /// Executor that succeeds for quotes, fails for history, and counts calls
    struct CountingExecutor {
        spec: ToolSpec,
        calls: AtomicUsize,
    }

    impl CountingExecutor {
        fn new(kinds: &[ToolKind]) -> Self {
            let spec = kinds.iter().fold(ToolSpec::new(), |spec, kind| {
                spec.register(ToolDefinition::for_kind(*kind, "test tool"))
            });
            Self {
                spec,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ToolExecutorPort for CountingExecutor {
        fn tool_spec(&self) -> &ToolSpec {
            &self.spec
        }

        async fn execute(&self, call: &ToolCall) -> ToolOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match call.kind() {
                Some(ToolKind::StockQuote) => {
                    ToolOutcome::success(&call.tool_name, serde_json::json!({"price": 170.0}))
                }
                _ => ToolOutcome::failure(&call.tool_name, ToolError::upstream("boom")),
            }
        }
    }

    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl QueryLogger for RecordingLogger {
        fn log(&self, event: QueryEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    fn dispatcher(executor: &Arc<CountingExecutor>) -> ToolDispatcher {
        ToolDispatcher::new(executor.clone() as Arc<dyn ToolExecutorPort>)
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_empty_name_is_invalid_ai_response_without_execution() {
        let executor = Arc::new(CountingExecutor::new(&ToolKind::ALL));
        let dispatcher = dispatcher(&executor);

        for name in ["", "   "] {
            let err = dispatcher.dispatch(&ToolCall::new(name)).await.unwrap_err();
            assert_eq!(err, DispatchError::InvalidAiResponse);
        }
        assert_eq!(executor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_name_is_unrecognized() {
        let executor = Arc::new(CountingExecutor::new(&ToolKind::ALL));
        let err = dispatcher(&executor)
            .dispatch(&ToolCall::new("get_weather").with_arg("city", "Paris"))
            .await
            .unwrap_err();

        assert_eq!(err, DispatchError::UnrecognizedFunction("get_weather".to_string()));
        assert_eq!(executor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_known_kind_without_executor_is_unrecognized() {
        let executor = Arc::new(CountingExecutor::new(&[ToolKind::StockQuote]));
        let err = dispatcher(&executor)
            .dispatch(&ToolCall::for_kind(ToolKind::FinancialNews))
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::UnrecognizedFunction(ref n) if n == "get_financial_news"));
        assert_eq!(executor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_every_registered_tool_yields_exactly_one_half() {
        let executor = Arc::new(CountingExecutor::new(&ToolKind::ALL));
        let dispatcher = dispatcher(&executor);

        for kind in ToolKind::ALL {
            let outcome = dispatcher.dispatch(&ToolCall::for_kind(kind)).await.unwrap();
            assert_ne!(outcome.success_payload().is_some(), outcome.error().is_some());
        }
        assert_eq!(executor.call_count(), ToolKind::ALL.len());
    }

    #[tokio::test]
    async fn test_executor_runs_once_and_failure_is_not_dispatch_error() {
        let executor = Arc::new(CountingExecutor::new(&ToolKind::ALL));
        let outcome = dispatcher(&executor)
            .dispatch(&ToolCall::for_kind(ToolKind::HistoricalStockData).with_arg("ticker", "AAPL"))
            .await
            .unwrap();

        assert!(!outcome.is_success());
        assert_eq!(executor.call_count(), 1);
    }

    #[tokio::test]
    async fn test_logs_call_and_outcome() {
        let executor = Arc::new(CountingExecutor::new(&ToolKind::ALL));
        let logger = Arc::new(RecordingLogger {
            events: Mutex::new(Vec::new()),
        });
        let dispatcher = dispatcher(&executor).with_query_logger(logger.clone());

        dispatcher
            .dispatch(&ToolCall::for_kind(ToolKind::StockQuote).with_arg("ticker", "AAPL"))
            .await
            .unwrap();

        assert_eq!(*logger.events.lock().unwrap(), vec!["tool_call", "tool_outcome"]);
    }

    #[test]
    fn test_resolve_trims_name() {
        let executor = Arc::new(CountingExecutor::new(&ToolKind::ALL));
        let kind = dispatcher(&executor)
            .resolve(&ToolCall::new(" get_stock_price "))
            .unwrap();
        assert_eq!(kind, ToolKind::StockQuote);
    }
}
