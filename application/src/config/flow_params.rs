//! Flow parameters: how the screens after the assessment behave.

use blueprint_domain::DEFAULT_WEAKEST_COUNT;
use serde::{Deserialize, Serialize};

/// Static parameters for the post-assessment steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowParams {
    /// Show the payment gate between the assessment and lead capture.
    pub require_gate: bool,
    /// Sections listed on the priority roadmap.
    pub weakest_count: usize,
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            require_gate: true,
            weakest_count: DEFAULT_WEAKEST_COUNT,
        }
    }
}

impl FlowParams {
    pub fn with_require_gate(mut self, require_gate: bool) -> Self {
        self.require_gate = require_gate;
        self
    }

    pub fn with_weakest_count(mut self, count: usize) -> Self {
        self.weakest_count = count;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = FlowParams::default();
        assert!(params.require_gate);
        assert_eq!(params.weakest_count, 3);
    }

    #[test]
    fn test_builder() {
        let params = FlowParams::default()
            .with_require_gate(false)
            .with_weakest_count(5);
        assert!(!params.require_gate);
        assert_eq!(params.weakest_count, 5);
    }
}
