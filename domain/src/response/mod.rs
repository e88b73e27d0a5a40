//! Query response domain.
//!
//! - [`envelope::ResponseEnvelope`]: the composite answer for one query
//! - [`phase::QueryPhase`]: pipeline state machine with [`phase::PhaseTracker`]

pub mod envelope;
pub mod phase;

pub use envelope::ResponseEnvelope;
pub use phase::{PhaseTracker, QueryPhase};
