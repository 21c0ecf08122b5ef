//! Readiness policy
//!
//! Weights and gates live here as plain data; the classifier, scorer and
//! recommendation engine only read them. Changing how readiness is judged is
//! an edit to this struct (or to the `[policy]` table in `config.toml`).

use crate::readiness::method::AuthMethodKind;
use serde::{Deserialize, Serialize};

/// Points contributed by each fact. Each term counts once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub authenticator_app: u8,
    /// Awarded when the user has a second factor or a phone
    pub mfa: u8,
    pub windows_hello: u8,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            authenticator_app: 40,
            mfa: 20,
            windows_hello: 40,
        }
    }
}

/// How the `ready` verdict is reached
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ReadyRule {
    /// A passwordless-capable Authenticator or Windows Hello credential, and
    /// Windows Hello registered
    #[default]
    Strict,
    /// Score at or above `min`
    ScoreThreshold { min: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessPolicy {
    pub name: String,
    /// Also report a missing FIDO2 security key as a missing passwordless method
    pub include_fido2: bool,
    /// Kinds that make `hasMFA` true
    pub mfa_kinds: Vec<AuthMethodKind>,
    /// Kinds that earn the MFA weight. The Authenticator earns its own weight
    /// and is not credited twice.
    pub second_factor_kinds: Vec<AuthMethodKind>,
    pub weights: ScoreWeights,
    pub ready_rule: ReadyRule,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            name: "strict-passwordless".to_string(),
            include_fido2: true,
            mfa_kinds: vec![
                AuthMethodKind::MicrosoftAuthenticator,
                AuthMethodKind::Phone,
                AuthMethodKind::SoftwareOath,
            ],
            second_factor_kinds: vec![AuthMethodKind::Phone, AuthMethodKind::SoftwareOath],
            weights: ScoreWeights::default(),
            ready_rule: ReadyRule::Strict,
        }
    }
}

impl ReadinessPolicy {
    /// Passwordless kinds a user is expected to have registered
    pub fn passwordless_kinds(&self) -> Vec<AuthMethodKind> {
        let mut kinds = vec![AuthMethodKind::MicrosoftAuthenticator];
        if self.include_fido2 {
            kinds.push(AuthMethodKind::Fido2);
        }
        kinds
    }

    pub fn counts_as_mfa(&self, kind: AuthMethodKind) -> bool {
        self.mfa_kinds.contains(&kind)
    }

    pub fn counts_as_second_factor(&self, kind: AuthMethodKind) -> bool {
        self.second_factor_kinds.contains(&kind)
    }

    /// Render as a `[policy]` section ready to paste into `config.toml`
    pub fn to_toml(&self) -> crate::error::Result<String> {
        #[derive(Serialize)]
        struct Section<'a> {
            policy: &'a ReadinessPolicy,
        }

        toml::to_string_pretty(&Section { policy: self }).map_err(|e| {
            crate::error::ReadinessError::ConfigError(format!("Failed to serialize policy: {}", e))
        })
    }
}
