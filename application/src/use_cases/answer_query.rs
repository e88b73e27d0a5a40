//! Answer Query use case.
//!
//! The single authoritative query pipeline:
//!
//! ```text
//! query → plan (model + tool menu) ─┬─ text ──────────────────────────┐
//!                                   └─ function call → dispatch once ─┤
//!                                                                     ▼
//!                 envelope ← aggregate ← audio (best effort) ← synthesize
//! ```
//!
//! Tool failures are absorbed into an apologetic summary. Only an invalid
//! query, malformed model output, an unrecognized function or a failed
//! planning call end the query with an error.

use crate::config::PipelineParams;
use crate::ports::data_providers::SpeechProvider;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::query_logger::{NoQueryLogger, QueryEvent, QueryLogger};
use crate::ports::tool_schema::ToolSchemaPort;
use crate::use_cases::aggregate::ResponseAggregator;
use crate::use_cases::dispatch_tool::{DispatchError, ToolDispatcher};
use crate::use_cases::synthesize::ResponseSynthesizer;
use finquery_domain::util::preview;
use finquery_domain::{
    DomainError, PhaseTracker, PromptTemplate, Query, QueryPhase, ResponseEnvelope,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that end a query without an envelope.
#[derive(Error, Debug)]
pub enum AnswerQueryError {
    #[error(transparent)]
    InvalidQuery(#[from] DomainError),

    #[error("Invalid AI response: function call without a name")]
    InvalidAiResponse,

    #[error("Unrecognized function: {0}")]
    UnrecognizedFunction(String),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

impl From<DispatchError> for AnswerQueryError {
    fn from(e: DispatchError) -> Self {
        match e {
            DispatchError::InvalidAiResponse => AnswerQueryError::InvalidAiResponse,
            DispatchError::UnrecognizedFunction(name) => {
                AnswerQueryError::UnrecognizedFunction(name)
            }
        }
    }
}

/// Input for the [`AnswerQueryUseCase`].
#[derive(Debug, Clone)]
pub struct AnswerQueryInput {
    /// Raw query text from the client
    pub query: String,
}

impl AnswerQueryInput {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

/// Output of the [`AnswerQueryUseCase`].
#[derive(Debug, Clone)]
pub struct AnswerQueryOutput {
    pub envelope: ResponseEnvelope,
    /// Tool the model chose, if any
    pub tool_name: Option<String>,
    /// Phases visited, starting at `Received`
    pub phases: Vec<QueryPhase>,
}

/// Use case for answering one financial query.
#[derive(Clone)]
pub struct AnswerQueryUseCase {
    gateway: Arc<dyn LlmGateway>,
    dispatcher: ToolDispatcher,
    tool_schema: Arc<dyn ToolSchemaPort>,
    speech: Option<Arc<dyn SpeechProvider>>,
    synthesizer: ResponseSynthesizer,
    aggregator: ResponseAggregator,
    params: PipelineParams,
    query_logger: Arc<dyn QueryLogger>,
}

impl AnswerQueryUseCase {
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        dispatcher: ToolDispatcher,
        tool_schema: Arc<dyn ToolSchemaPort>,
    ) -> Self {
        Self {
            gateway,
            dispatcher,
            tool_schema,
            speech: None,
            synthesizer: ResponseSynthesizer::new(),
            aggregator: ResponseAggregator::new(),
            params: PipelineParams::default(),
            query_logger: Arc::new(NoQueryLogger),
        }
    }

    pub fn with_speech(mut self, speech: Arc<dyn SpeechProvider>) -> Self {
        self.speech = Some(speech);
        self
    }

    pub fn with_params(mut self, params: PipelineParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_query_logger(mut self, logger: Arc<dyn QueryLogger>) -> Self {
        self.query_logger = logger;
        self
    }

    pub fn dispatcher(&self) -> &ToolDispatcher {
        &self.dispatcher
    }

    /// Answer one query.
    pub async fn execute(
        &self,
        input: AnswerQueryInput,
    ) -> Result<AnswerQueryOutput, AnswerQueryError> {
        let query = Query::parse(input.query)?;
        let mut tracker = PhaseTracker::new();

        info!("Answering query: {}", preview(query.content(), 100));
        self.query_logger.log(QueryEvent::new(
            "query_received",
            serde_json::json!({ "query": query.content() }),
        ));

        // ModelPlanning
        advance(&mut tracker, QueryPhase::ModelPlanning);
        let tools = self
            .tool_schema
            .all_tools_schema(self.dispatcher.tool_spec());
        debug!(
            "Planning with model {} and {} declared tools",
            self.gateway.model_name(),
            tools.len()
        );

        let planned = async {
            let session = self.gateway.create_session(PromptTemplate::system()).await?;
            let response = session.send_with_tools(query.content(), &tools).await?;
            Ok::<_, GatewayError>((session, response))
        }
        .await;
        let (session, plan) = match planned {
            Ok(planned) => planned,
            Err(e) => {
                advance(&mut tracker, QueryPhase::Failed);
                return Err(e.into());
            }
        };

        let (summary, tool) = match plan.first_tool_call() {
            None => {
                advance(&mut tracker, QueryPhase::NoToolChosen);
                advance(&mut tracker, QueryPhase::Synthesizing);
                (self.synthesizer.direct(&plan.text_content()), None)
            }
            Some(call) => {
                advance(&mut tracker, QueryPhase::ToolChosen);
                advance(&mut tracker, QueryPhase::Dispatching);
                let outcome = match self.dispatcher.dispatch(&call).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        advance(&mut tracker, QueryPhase::Failed);
                        return Err(e.into());
                    }
                };

                if outcome.is_success() {
                    advance(&mut tracker, QueryPhase::ToolSucceeded);
                } else {
                    advance(&mut tracker, QueryPhase::ToolFailed);
                }
                advance(&mut tracker, QueryPhase::Synthesizing);

                let summary = self
                    .synthesizer
                    .after_tool(session.as_ref(), &call, &outcome)
                    .await;
                (summary, Some((call, outcome)))
            }
        };

        let audio_url = self.speak(&summary).await;

        advance(&mut tracker, QueryPhase::Aggregating);
        let envelope = self.aggregator.aggregate(
            summary,
            tool.as_ref().map(|(call, outcome)| (call, outcome)),
            audio_url,
        );
        advance(&mut tracker, QueryPhase::Returned);

        self.query_logger.log(QueryEvent::new(
            "summary",
            serde_json::json!({
                "bytes": envelope.summary.len(),
                "text": envelope.summary,
                "has_chart": envelope.chart_series.is_some(),
                "has_image": envelope.image_url.is_some(),
                "has_audio": envelope.audio_url.is_some(),
            }),
        ));
        info!("Query answered ({} phases)", tracker.history().len());

        Ok(AnswerQueryOutput {
            envelope,
            tool_name: tool.map(|(call, _)| call.tool_name.trim().to_string()),
            phases: tracker.history().to_vec(),
        })
    }

    /// Best-effort speech synthesis of the summary.
    async fn speak(&self, summary: &str) -> Option<String> {
        if !self.params.audio_enabled {
            return None;
        }
        let speech = self.speech.as_ref()?;
        match speech.synthesize(summary).await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("Audio synthesis failed, continuing without audio: {}", e);
                None
            }
        }
    }
}

/// Record a phase transition; an illegal one is logged, never surfaced.
fn advance(tracker: &mut PhaseTracker, next: QueryPhase) {
    if let Err(e) = tracker.advance(next) {
        warn!("{}", e);
    }
}
