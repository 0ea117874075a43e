//! Workflow glue between the command line and the library

pub mod orchestration;

pub use orchestration::{apply_bump, capture_state, prepare_bump, BumpPlan, BumpWorkflowArgs, WorkflowResult};
