//! Static topic catalog. Reference data only: the core never mutates it,
//! and every content or bank record is keyed by one of these ids.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub chapter_id: &'static str,
    pub order: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: &'static str,
    pub title: &'static str,
    pub order: u32,
}

pub const CHAPTERS: &[Chapter] = &[
    Chapter { id: "limits", title: "Limits and Continuity", order: 1 },
    Chapter { id: "derivatives", title: "Differentiation", order: 2 },
    Chapter { id: "applications-derivatives", title: "Applications of Derivatives", order: 3 },
    Chapter { id: "integrals", title: "Integration", order: 4 },
    Chapter { id: "applications-integrals", title: "Applications of Integrals", order: 5 },
];

pub const TOPICS: &[Topic] = &[
    Topic {
        id: "limits-intro",
        title: "Introduction to Limits",
        description: "Limit notation, one-sided limits, and estimating limits from tables and graphs.",
        chapter_id: "limits",
        order: 1,
    },
    Topic {
        id: "limit-laws",
        title: "Limit Laws and Algebraic Evaluation",
        description: "Evaluating limits with the limit laws, factoring, and rationalisation.",
        chapter_id: "limits",
        order: 2,
    },
    Topic {
        id: "continuity",
        title: "Continuity",
        description: "Continuity at a point, types of discontinuity, and the Intermediate Value Theorem.",
        chapter_id: "limits",
        order: 3,
    },
    Topic {
        id: "derivative-definition",
        title: "The Derivative as a Limit",
        description: "Difference quotients, the formal definition of the derivative, and differentiability.",
        chapter_id: "derivatives",
        order: 1,
    },
    Topic {
        id: "differentiation-rules",
        title: "Differentiation Rules",
        description: "Power, product, and quotient rules for efficient differentiation.",
        chapter_id: "derivatives",
        order: 2,
    },
    Topic {
        id: "chain-rule",
        title: "The Chain Rule",
        description: "Differentiating composite functions and combining the chain rule with other rules.",
        chapter_id: "derivatives",
        order: 3,
    },
    Topic {
        id: "implicit-differentiation",
        title: "Implicit Differentiation",
        description: "Differentiating implicitly defined curves and finding tangent lines to them.",
        chapter_id: "derivatives",
        order: 4,
    },
    Topic {
        id: "related-rates",
        title: "Related Rates",
        description: "Modelling linked quantities and solving related-rates word problems.",
        chapter_id: "applications-derivatives",
        order: 1,
    },
    Topic {
        id: "optimization",
        title: "Optimization",
        description: "Absolute extrema, closed-interval method, and applied optimisation problems.",
        chapter_id: "applications-derivatives",
        order: 2,
    },
    Topic {
        id: "curve-sketching",
        title: "Curve Sketching",
        description: "First and second derivative tests, concavity, and full curve analysis.",
        chapter_id: "applications-derivatives",
        order: 3,
    },
    Topic {
        id: "antiderivatives",
        title: "Antiderivatives and Indefinite Integrals",
        description: "Reversing differentiation, basic antiderivative rules, and initial value problems.",
        chapter_id: "integrals",
        order: 1,
    },
    Topic {
        id: "definite-integrals",
        title: "Definite Integrals and the FTC",
        description: "Riemann sums, the definite integral, and both parts of the Fundamental Theorem of Calculus.",
        chapter_id: "integrals",
        order: 2,
    },
    Topic {
        id: "substitution",
        title: "Integration by Substitution",
        description: "Recognising inner functions and evaluating integrals by u-substitution.",
        chapter_id: "integrals",
        order: 3,
    },
    Topic {
        id: "area-between-curves",
        title: "Area Between Curves",
        description: "Setting up and evaluating integrals for regions bounded by curves.",
        chapter_id: "applications-integrals",
        order: 1,
    },
    Topic {
        id: "volumes-of-revolution",
        title: "Volumes of Revolution",
        description: "Disc, washer, and shell methods for solids of revolution.",
        chapter_id: "applications-integrals",
        order: 2,
    },
];

pub fn lookup_topic(topic_id: &str) -> Option<&'static Topic> {
    TOPICS.iter().find(|t| t.id == topic_id)
}
