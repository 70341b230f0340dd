// core/src/pipeline/mod.rs

//! A minimal named-step runner. The notification verifier is built on it: each
//! check of the reconciliation state machine is one step, and a step that
//! settles the outcome stops the run.

pub mod context_data;
pub mod control;
pub mod definition;
pub mod execution;
pub mod step;

pub use context_data::ContextData;
pub use control::{PipelineControl, PipelineResult};
pub use definition::{Handler, Pipeline};
pub use step::StepDef;
