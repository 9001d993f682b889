//! Local safety replies used when the completion service cannot answer.
//!
//! Rules are checked in order against the lower-cased utterance and the
//! first rule with a matching trigger wins, so a message mentioning both
//! chest pain and a drug name gets the cardiac guidance.

/// One entry of the priority table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackRule {
    /// Lower-case substrings, any of which selects this rule
    pub triggers: &'static [&'static str],
    pub reply: &'static str,
}

pub const CARDIAC_WARNING_REPLY: &str = "Chest discomfort can have many causes. Warning signs of \
a possible heart attack include chest pressure or pain, pain spreading to the arm, jaw or back, \
shortness of breath, sweating, or nausea. If symptoms are severe or sudden, please seek \
emergency care immediately.";

pub const IBUPROFEN_REPLY: &str = "Ibuprofen is a non-steroidal anti-inflammatory drug (NSAID) \
used to reduce pain, inflammation and fever. Always follow the dosage on the label or your \
doctor’s advice.";

pub const CETIRIZINE_REPLY: &str = "Cetirizine is an antihistamine commonly used for allergies \
such as sneezing, runny nose and itchy eyes. It can make some people drowsy, so take it as \
directed.";

pub const GENERIC_TRIAGE_REPLY: &str = "I can give general health information and help you \
understand symptoms or hospital services. Please describe your question in more detail. For \
emergencies, contact your nearest hospital immediately.";

const RULES: &[FallbackRule] = &[
    FallbackRule {
        triggers: &["chest", "heart attack"],
        reply: CARDIAC_WARNING_REPLY,
    },
    FallbackRule {
        triggers: &["ibuprofen"],
        reply: IBUPROFEN_REPLY,
    },
    FallbackRule {
        triggers: &["cetirizine"],
        reply: CETIRIZINE_REPLY,
    },
];

/// Pure, total mapping from an utterance to a canned reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackResponder;

impl FallbackResponder {
    pub fn new() -> Self {
        Self
    }

    pub fn reply(&self, user_text: &str) -> &'static str {
        let lower = user_text.to_lowercase();
        RULES
            .iter()
            .find(|rule| rule.triggers.iter().any(|t| lower.contains(t)))
            .map(|rule| rule.reply)
            .unwrap_or(GENERIC_TRIAGE_REPLY)
    }

    /// The priority table, highest priority first (the generic reply is implicit)
    pub fn rules(&self) -> &'static [FallbackRule] {
        RULES
    }
}
