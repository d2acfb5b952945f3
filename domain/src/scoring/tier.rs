//! Readiness tiers
//!
//! Four fixed bands over the total percentage, matched from the highest band
//! down with inclusive lower bounds:
//!
//! | Band | Tier |
//! |------|------|
//! | `[80, 100]` | High Readiness |
//! | `[60, 80)` | Moderate Readiness |
//! | `[40, 60)` | Early Stage |
//! | `[0, 40)` | Not Yet Ready |

use serde::{Deserialize, Serialize};

const CONTACT_URL: &str = "https://iconocapital.com/contact";

/// Readiness classification, ordered from least to most ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    NotYetReady,
    EarlyStage,
    ModerateReadiness,
    HighReadiness,
}

/// Call to action attached to a tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallToAction {
    pub label: &'static str,
    pub url: &'static str,
}

/// Display copy for a tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierInfo {
    pub tier: Tier,
    pub label: &'static str,
    pub heading: &'static str,
    pub description: &'static str,
    pub cta: CallToAction,
}

impl Tier {
    /// Classify a total percentage.
    ///
    /// Total over `0..=100`; anything above 100 classifies as the top tier.
    pub fn classify(percentage: u32) -> Self {
        match percentage {
            80.. => Tier::HighReadiness,
            60..80 => Tier::ModerateReadiness,
            40..60 => Tier::EarlyStage,
            _ => Tier::NotYetReady,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::HighReadiness => "High Readiness",
            Tier::ModerateReadiness => "Moderate Readiness",
            Tier::EarlyStage => "Early Stage",
            Tier::NotYetReady => "Not Yet Ready",
        }
    }

    pub fn info(&self) -> TierInfo {
        let (heading, description, cta) = match self {
            Tier::HighReadiness => (
                "You are a strong candidate for the Breakaway Blueprint™.",
                "Your structural, financial, psychological, and operational indicators align with advisors who successfully transition to independence. The data supports moving forward with a structured engagement.",
                "Schedule Your Readiness Audit",
            ),
            Tier::ModerateReadiness => (
                "Strong fundamentals — with specific gaps to close.",
                "Your profile shows meaningful alignment with independence, but targeted areas need strengthening before a transition would be structurally sound.",
                "Explore Preparation Pathways",
            ),
            Tier::EarlyStage => (
                "Independence is plausible — but not imminent.",
                "Several foundational areas require development. This isn't a disqualification — it's a diagnosis. With focused preparation, many advisors in this range reach full readiness within 12–18 months.",
                "Request a Diagnostic Call",
            ),
            Tier::NotYetReady => (
                "Independence is not the right move right now.",
                "Your current profile suggests significant structural and personal risk. This assessment is designed to protect you. The action items below will get you moving in the right direction.",
                "Get the Preparation Playbook",
            ),
        };
        TierInfo {
            tier: *self,
            label: self.label(),
            heading,
            description,
            cta: CallToAction {
                label: cta,
                url: CONTACT_URL,
            },
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a total percentage into its readiness tier.
pub fn classify_tier(percentage: u32) -> Tier {
    Tier::classify(percentage)
}
