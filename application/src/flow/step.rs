//! Screens of an assessment run, in order.

use serde::{Deserialize, Serialize};

/// One screen of the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Landing,
    Assessment,
    /// Payment gate; stubbed, proceeding is always allowed.
    Gate,
    Capture,
    Results,
}

impl Step {
    /// Canonical route of the screen.
    pub fn path(&self) -> &'static str {
        match self {
            Step::Landing => "/",
            Step::Assessment => "/assessment",
            Step::Gate => "/payment",
            Step::Capture => "/capture",
            Step::Results => "/results",
        }
    }

    /// Screen a missing or stale session sends the caller back to.
    pub fn first() -> Self {
        Step::Assessment
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Step::Landing.path(), "/");
        assert_eq!(Step::Gate.to_string(), "/payment");
        assert_eq!(Step::first(), Step::Assessment);
    }
}
