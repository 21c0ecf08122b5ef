//! Passwordless readiness evaluation
//!
//! Pipeline: raw Graph records -> [`normalize`] -> [`dedup`] -> [`classify`]
//! -> { [`score`], [`recommend`] } -> [`ReadinessResult`].
//! Every call is a pure function of its inputs and the policy.

pub mod classify;
pub mod dedup;
pub mod method;
pub mod normalize;
pub mod policy;
pub mod recommend;
pub mod score;

use crate::graph::authentication_methods::{RawAuthMethod, RawPhoneMethod};
use serde::Serialize;

pub use classify::ReadinessFacts;
pub use method::{AuthMethod, AuthMethodKind, MethodDetail};
pub use policy::{ReadinessPolicy, ReadyRule, ScoreWeights};
pub use recommend::Step;

/// Outcome of one evaluation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResult {
    pub score: u8,
    pub ready: bool,
    pub passwordless_active: bool,
    pub facts: ReadinessFacts,
    pub recommended_steps: Vec<Step>,
    pub missing_passwordless_kinds: Vec<AuthMethodKind>,
    /// Normalized, deduplicated registrations the facts were derived from
    pub methods: Vec<AuthMethod>,
}

pub fn evaluate(
    generic: &[RawAuthMethod],
    phone: &[RawPhoneMethod],
    policy: &ReadinessPolicy,
) -> ReadinessResult {
    let methods = dedup::dedup_phone_methods(normalize::normalize_methods(generic, phone));
    evaluate_methods(methods, policy)
}

/// Evaluate an already normalized and deduplicated method list
pub fn evaluate_methods(methods: Vec<AuthMethod>, policy: &ReadinessPolicy) -> ReadinessResult {
    let facts = classify::classify(&methods, policy);
    let score = score::score(&facts, policy);

    ReadinessResult {
        score: score.value,
        ready: score.ready,
        passwordless_active: facts.passwordless_active(),
        recommended_steps: recommend::recommend(&facts),
        missing_passwordless_kinds: classify::missing_passwordless_kinds(&methods, policy),
        facts,
        methods,
    }
}
