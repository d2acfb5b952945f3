//! Application-level configuration.
//!
//! - [`FlowParams`] controls the steps after the assessment (gate, roadmap length)

pub mod flow_params;

pub use flow_params::FlowParams;
