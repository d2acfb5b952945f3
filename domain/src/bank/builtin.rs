//! The standard Breakaway Blueprint question bank
//!
//! Nine readiness dimensions for an advisor weighing a move to independence.
//! Section maxima are derived from the questions, so editing an option score
//! here keeps the bank consistent.

use crate::bank::catalog::{BankError, QuestionBank};
use crate::bank::question::{ChoiceOption, Question};
use crate::bank::section::{Recommendations, Section, SectionId};
use std::collections::BTreeMap;

fn opts(options: &[(&str, u32)]) -> Vec<ChoiceOption> {
    options
        .iter()
        .map(|(label, score)| ChoiceOption::new(*label, *score))
        .collect()
}

fn questions() -> Vec<Question> {
    vec![
        // Book size & revenue
        Question::choice(
            "aum",
            "book",
            "How much in client assets do you currently advise on?",
            opts(&[
                ("Under $50M", 1),
                ("$50M – $150M", 2),
                ("$150M – $400M", 4),
                ("Over $400M", 5),
            ]),
        ),
        Question::choice(
            "gross_revenue",
            "book",
            "What is your annual gross revenue (GDC)?",
            opts(&[
                ("Under $500K", 1),
                ("$500K – $1M", 2),
                ("$1M – $2.5M", 4),
                ("Over $2.5M", 5),
            ]),
        ),
        // Recurring revenue mix
        Question::choice(
            "fee_based_share",
            "recurring",
            "What share of your revenue is fee-based or recurring?",
            opts(&[
                ("Less than 25%", 0),
                ("25% – 50%", 2),
                ("50% – 80%", 4),
                ("More than 80%", 5),
            ]),
        )
        .with_subtitle("Commissions and one-time product revenue count as non-recurring."),
        Question::choice(
            "revenue_trend",
            "recurring",
            "How has your recurring revenue moved over the last three years?",
            opts(&[
                ("Declined", 0),
                ("Roughly flat", 2),
                ("Grown modestly", 4),
                ("Grown more than 10% a year", 5),
            ]),
        ),
        // Client concentration
        Question::choice(
            "top_ten_share",
            "concentration",
            "What share of revenue comes from your ten largest relationships?",
            opts(&[
                ("More than 60%", 0),
                ("40% – 60%", 2),
                ("20% – 40%", 4),
                ("Less than 20%", 5),
            ]),
        ),
        Question::choice(
            "client_age",
            "concentration",
            "What is the median age of your clients?",
            opts(&[
                ("Over 75", 1),
                ("65 – 75", 2),
                ("50 – 65", 4),
                ("Under 50", 5),
            ]),
        ),
        // Transition risk
        Question::choice(
            "client_loyalty",
            "transition_risk",
            "What share of clients would follow you to a new firm?",
            opts(&[
                ("Less than 50%", 0),
                ("50% – 70%", 2),
                ("70% – 90%", 4),
                ("More than 90%", 5),
            ]),
        ),
        Question::choice(
            "restrictive_covenants",
            "transition_risk",
            "Which restrictive covenants apply to your current agreement?",
            opts(&[
                ("Non-compete and non-solicit", 0),
                ("Non-solicit only", 2),
                ("Protocol firm, no other restrictions", 4),
                ("None", 5),
            ]),
        )
        .with_subtitle("Check your employment agreement and any forgivable loan terms."),
        // Cash flow quality
        Question::choice(
            "expense_ratio",
            "cash_flow",
            "What share of revenue would go to overhead as an independent practice?",
            opts(&[
                ("I don't know", 0),
                ("More than 50%", 1),
                ("35% – 50%", 3),
                ("Less than 35%", 5),
            ]),
        ),
        Question::choice(
            "deferred_comp",
            "cash_flow",
            "How much unvested deferred compensation would you leave behind?",
            opts(&[
                ("More than a year of revenue", 0),
                ("Six to twelve months", 2),
                ("Less than six months", 4),
                ("None", 5),
            ]),
        ),
        // Business continuity
        Question::choice(
            "succession_plan",
            "continuity",
            "Do you have a documented succession or continuity plan?",
            opts(&[
                ("No", 0),
                ("Informal understanding", 2),
                ("Documented but untested", 4),
                ("Documented and funded", 5),
            ]),
        ),
        Question::choice(
            "key_person",
            "continuity",
            "If you were unavailable for three months, how would the practice run?",
            opts(&[
                ("It would stop", 0),
                ("Clients would be at risk", 2),
                ("Staff could cover most needs", 4),
                ("Business as usual", 5),
            ]),
        ),
        // Team & operations
        Question::choice(
            "team_size",
            "team",
            "How many people support your practice today?",
            opts(&[
                ("Just me", 1),
                ("One assistant", 2),
                ("Two to four", 4),
                ("Five or more", 5),
            ]),
        ),
        Question::choice(
            "team_follow",
            "team",
            "Would your key staff move with you?",
            opts(&[
                ("Unlikely", 0),
                ("Haven't asked", 2),
                ("Some of them", 3),
                ("All of them", 5),
            ]),
        ),
        Question::choice(
            "operations_ownership",
            "team",
            "Who would own compliance, technology and operations?",
            opts(&[
                ("Nobody yet", 0),
                ("Me, part-time", 2),
                ("A team member", 4),
                ("An outsourced partner", 5),
            ]),
        ),
        // Entrepreneurial mindset
        Question::scale(
            "ownership_appetite",
            "mindset",
            "How much do you want to run a business, not just a book?",
            1,
            10,
            0.5,
        )
        .with_subtitle("1 = I only want to serve clients, 10 = I want to build an enterprise."),
        Question::scale(
            "risk_tolerance",
            "mindset",
            "How comfortable are you with a temporary dip in personal income?",
            1,
            10,
            0.5,
        ),
        // Financial runway
        Question::choice(
            "personal_reserves",
            "runway",
            "How many months of personal expenses do you hold in reserve?",
            opts(&[
                ("Less than three", 0),
                ("Three to six", 2),
                ("Six to twelve", 4),
                ("More than twelve", 5),
            ]),
        ),
        Question::scale(
            "family_support",
            "runway",
            "How supportive is your family of the move?",
            1,
            10,
            0.5,
        ),
    ]
}

fn sections() -> Vec<Section> {
    let section = |id: &str, label: &str, ids: &[&str], recs: Recommendations| {
        Section::new(id, label, ids.iter().map(|&q| q.into()).collect(), 0, recs)
    };

    vec![
        section(
            "book",
            "Book Size & Revenue",
            &["aum", "gross_revenue"],
            Recommendations::new(
                "Your book has the scale to carry independent overhead. Model the economics with a firm-neutral partner before you negotiate.",
                "Your book can support independence with a lean cost structure. Build a 24-month revenue projection before committing.",
                "Scale is the first constraint. Focus on growing revenue or consider a supported independence model rather than a standalone RIA.",
            ),
        ),
        section(
            "recurring",
            "Recurring Revenue Mix",
            &["fee_based_share", "revenue_trend"],
            Recommendations::new(
                "Recurring revenue is a strength and will anchor any valuation. Protect it through the transition.",
                "Shift more relationships to fee-based before you move; every point of recurring revenue raises practice value.",
                "Revenue is too transactional to fund a transition. Start converting your top relationships to advisory agreements now.",
            ),
        ),
        section(
            "concentration",
            "Client Concentration",
            &["top_ten_share", "client_age"],
            Recommendations::new(
                "Your client base is well diversified. Keep documenting next-generation relationships.",
                "A handful of relationships carry real weight. Build deeper ties with heirs and secondary decision makers.",
                "Concentration is a material risk. Losing one or two households would change the transition math entirely.",
            ),
        ),
        section(
            "transition_risk",
            "Transition Risk",
            &["client_loyalty", "restrictive_covenants"],
            Recommendations::new(
                "Portability looks strong. Get a legal review of your agreement before announcing.",
                "Some clients or agreement terms are at risk. Map every relationship and have counsel review your covenants.",
                "Transition risk is high. Retain employment counsel and stress-test your retention assumptions before going further.",
            ),
        ),
        section(
            "cash_flow",
            "Cash Flow Quality",
            &["expense_ratio", "deferred_comp"],
            Recommendations::new(
                "Your margins and exit costs are manageable. Lock in your vendor stack early.",
                "Build a detailed expense budget and price out what you'd forfeit on departure.",
                "Cash flow is the biggest unknown. Build a full P&L and quantify forfeited compensation before anything else.",
            ),
        ),
        section(
            "continuity",
            "Business Continuity",
            &["succession_plan", "key_person"],
            Recommendations::new(
                "Continuity planning is in good shape. Revisit it as part of the transition.",
                "Formalize your continuity arrangement and fund it with a buy-sell agreement.",
                "The practice depends entirely on you. Put a documented continuity partner in place.",
            ),
        ),
        section(
            "team",
            "Team & Operations",
            &["team_size", "team_follow", "operations_ownership"],
            Recommendations::new(
                "You have the people to run an independent office. Confirm roles and compensation ahead of the move.",
                "Decide which functions to staff and which to outsource, and talk to key staff early.",
                "Operations would land on you. Line up an outsourced operations and compliance partner before moving.",
            ),
        ),
        section(
            "mindset",
            "Entrepreneurial Mindset",
            &["ownership_appetite", "risk_tolerance"],
            Recommendations::new(
                "You are wired for ownership. Channel it into a written business plan.",
                "Talk to advisors who made the move about what ownership really demands week to week.",
                "Independence means running a business. Consider whether a supported model fits your goals better.",
            ),
        ),
        section(
            "runway",
            "Financial Runway",
            &["personal_reserves", "family_support"],
            Recommendations::new(
                "You have the personal runway to absorb a slow first year.",
                "Extend your personal reserves and align with your family on the timeline.",
                "Personal runway is thin. Build at least six months of reserves before you resign.",
            ),
        ),
    ]
}

fn benchmarks() -> BTreeMap<SectionId, u32> {
    [
        ("book", 58),
        ("recurring", 62),
        ("concentration", 55),
        ("transition_risk", 60),
        ("cash_flow", 48),
        ("continuity", 42),
        ("team", 52),
        ("mindset", 65),
        ("runway", 50),
    ]
    .into_iter()
    .map(|(id, pct)| (SectionId::from(id), pct))
    .collect()
}

impl QuestionBank {
    /// The standard nine-dimension readiness bank.
    pub fn standard() -> Result<Self, BankError> {
        let questions = questions();
        let mut sections = sections();
        Self::derive_max_scores(&mut sections, &questions);
        Self::new(sections, questions, benchmarks())
    }
}
