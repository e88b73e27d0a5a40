//! Per-query pipeline phases

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Phase of a single query as it moves through the pipeline.
///
/// ```text
/// Received → ModelPlanning ─┬─ NoToolChosen ─────────────────────────────┐
///                           └─ ToolChosen → Dispatching ─┬─ ToolSucceeded ┤
///                                                        └─ ToolFailed ───┤
///                                                                         ▼
///                                      Returned ← Aggregating ← Synthesizing
/// ```
///
/// A tool failure is not terminal: it flows through `Synthesizing` like a
/// success. Only malformed model output or an unrecognized function moves a
/// query to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryPhase {
    Received,
    ModelPlanning,
    NoToolChosen,
    ToolChosen,
    Dispatching,
    ToolSucceeded,
    ToolFailed,
    Synthesizing,
    Aggregating,
    Returned,
    Failed,
}

impl QueryPhase {
    pub fn as_str(&self) -> &str {
        match self {
            QueryPhase::Received => "received",
            QueryPhase::ModelPlanning => "model_planning",
            QueryPhase::NoToolChosen => "no_tool_chosen",
            QueryPhase::ToolChosen => "tool_chosen",
            QueryPhase::Dispatching => "dispatching",
            QueryPhase::ToolSucceeded => "tool_succeeded",
            QueryPhase::ToolFailed => "tool_failed",
            QueryPhase::Synthesizing => "synthesizing",
            QueryPhase::Aggregating => "aggregating",
            QueryPhase::Returned => "returned",
            QueryPhase::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, QueryPhase::Returned | QueryPhase::Failed)
    }

    /// Whether `next` is a legal successor of this phase.
    pub fn can_advance_to(&self, next: QueryPhase) -> bool {
        use QueryPhase::*;
        match (self, next) {
            (Received, ModelPlanning) => true,
            (ModelPlanning, NoToolChosen | ToolChosen | Failed) => true,
            (NoToolChosen, Synthesizing) => true,
            (ToolChosen, Dispatching | Failed) => true,
            (Dispatching, ToolSucceeded | ToolFailed | Failed) => true,
            (ToolSucceeded | ToolFailed, Synthesizing) => true,
            (Synthesizing, Aggregating) => true,
            (Aggregating, Returned) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for QueryPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Records the phases a query has visited and rejects illegal transitions.
#[derive(Debug, Clone)]
pub struct PhaseTracker {
    history: Vec<QueryPhase>,
}

impl PhaseTracker {
    pub fn new() -> Self {
        Self {
            history: vec![QueryPhase::Received],
        }
    }

    pub fn current(&self) -> QueryPhase {
        // history is never empty: it starts at Received
        self.history[self.history.len() - 1]
    }

    pub fn advance(&mut self, next: QueryPhase) -> Result<(), DomainError> {
        let current = self.current();
        if !current.can_advance_to(next) {
            return Err(DomainError::InvalidTransition {
                from: current.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }
        self.history.push(next);
        Ok(())
    }

    pub fn history(&self) -> &[QueryPhase] {
        &self.history
    }
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_path() {
        let mut tracker = PhaseTracker::new();
        for phase in [
            QueryPhase::ModelPlanning,
            QueryPhase::ToolChosen,
            QueryPhase::Dispatching,
            QueryPhase::ToolFailed,
            QueryPhase::Synthesizing,
            QueryPhase::Aggregating,
            QueryPhase::Returned,
        ] {
            tracker.advance(phase).unwrap();
        }
        assert!(tracker.current().is_terminal());
        assert_eq!(tracker.history().len(), 8);
    }

    #[test]
    fn test_direct_answer_path() {
        let mut tracker = PhaseTracker::new();
        tracker.advance(QueryPhase::ModelPlanning).unwrap();
        tracker.advance(QueryPhase::NoToolChosen).unwrap();
        tracker.advance(QueryPhase::Synthesizing).unwrap();
        tracker.advance(QueryPhase::Aggregating).unwrap();
        tracker.advance(QueryPhase::Returned).unwrap();
        assert_eq!(tracker.current(), QueryPhase::Returned);
    }

    #[test]
    fn test_illegal_transition_rejected() {
        let mut tracker = PhaseTracker::new();
        let err = tracker.advance(QueryPhase::Dispatching).unwrap_err();
        assert!(err.to_string().contains("received"));
        assert_eq!(tracker.current(), QueryPhase::Received);
    }

    #[test]
    fn test_tool_failure_cannot_short_circuit() {
        assert!(!QueryPhase::ToolFailed.can_advance_to(QueryPhase::Failed));
        assert!(!QueryPhase::ToolFailed.can_advance_to(QueryPhase::Returned));
    }
}
