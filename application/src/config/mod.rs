//! Application-level configuration.
//!
//! - [`PipelineParams`]: per-query pipeline knobs (audio, series length, news size)

pub mod pipeline_params;

pub use pipeline_params::PipelineParams;
