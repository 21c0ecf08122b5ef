//! One readiness evaluation for one user, end to end
//!
//! Token and user lookups are fatal. The two method listings are fetched
//! concurrently and each degrades to an empty list on failure.

use crate::config::{Config, ConfigManager};
use crate::error::{ReadinessError, Result};
use crate::graph::auth::{GraphAuth, TokenSource};
use crate::graph::authentication_methods::{list_methods, list_phone_methods};
use crate::graph::users::{get_user, GraphUser};
use crate::graph::{GraphClient, GRAPH_API_BASE};
use crate::readiness::{
    self, AuthMethod, AuthMethodKind, ReadinessFacts, ReadinessPolicy, ReadinessResult, Step,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Evaluation response as served to the dashboard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport {
    pub user: GraphUser,
    pub available_methods: Vec<AuthMethod>,
    #[serde(rename = "hasMFA")]
    pub has_mfa: bool,
    #[serde(rename = "hasWHfB")]
    pub has_whfb: bool,
    /// Graph type names of the passwordless methods the user lacks
    pub missing_passwordless: Vec<String>,
    pub score: u8,
    pub ready: bool,
    pub passwordless_active: bool,
    pub facts: ReadinessFacts,
    pub recommended_steps: Vec<Step>,
    pub evaluated_at: DateTime<Utc>,
}

impl EvaluationReport {
    pub fn new(user: GraphUser, result: ReadinessResult) -> Self {
        Self {
            user,
            has_mfa: result.facts.has_mfa,
            has_whfb: result.facts.has_windows_hello,
            missing_passwordless: result
                .missing_passwordless_kinds
                .iter()
                .map(|kind| kind.graph_type().to_string())
                .collect(),
            score: result.score,
            ready: result.ready,
            passwordless_active: result.passwordless_active,
            facts: result.facts,
            recommended_steps: result.recommended_steps,
            available_methods: result.methods,
            evaluated_at: Utc::now(),
        }
    }

    /// First registered method of the given kind
    pub fn first_of(&self, kind: AuthMethodKind) -> Option<&AuthMethod> {
        self.available_methods.iter().find(|m| m.kind() == kind)
    }
}

pub struct ReadinessService {
    token_source: TokenSource,
    graph_base_url: String,
    policy: ReadinessPolicy,
}

impl ReadinessService {
    pub fn new(token_source: TokenSource, policy: ReadinessPolicy) -> Self {
        Self {
            token_source,
            graph_base_url: GRAPH_API_BASE.to_string(),
            policy,
        }
    }

    pub fn with_graph_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.graph_base_url = base_url.into();
        self
    }

    /// Build from configuration. A supplied access token bypasses the
    /// client credentials flow entirely.
    pub fn from_config(
        manager: &ConfigManager,
        config: &Config,
        access_token: Option<String>,
    ) -> Result<Self> {
        let token_source = match access_token {
            Some(token) => TokenSource::Static(token),
            None => {
                let credentials = manager.resolve_credentials(config)?;
                let auth = match config.graph.authority.as_deref() {
                    Some(authority) => GraphAuth::with_authority(credentials, authority),
                    None => GraphAuth::new(credentials),
                };
                TokenSource::ClientCredentials(auth)
            }
        };

        let mut service = Self::new(token_source, config.policy.clone());
        if let Some(base_url) = config.graph.base_url.as_deref() {
            service = service.with_graph_base_url(base_url);
        }
        Ok(service)
    }

    pub fn policy(&self) -> &ReadinessPolicy {
        &self.policy
    }

    /// Evaluate a user by object ID or UPN
    #[instrument(skip(self), fields(policy = %self.policy.name))]
    pub async fn evaluate(&self, user_id: &str) -> Result<EvaluationReport> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(ReadinessError::MissingIdentity(
                "no user identifier was supplied".into(),
            ));
        }

        let access_token = self.token_source.access_token().await?;
        let client = GraphClient::with_base_url(access_token, &self.graph_base_url);

        let user = get_user(&client, user_id).await?;

        let (methods, phone_methods) = tokio::join!(
            list_methods(&client, user_id),
            list_phone_methods(&client, user_id)
        );

        let methods = methods.unwrap_or_else(|e| {
            warn!(error = %e, "Listing authentication methods failed, continuing without them");
            Vec::new()
        });
        let phone_methods = phone_methods.unwrap_or_else(|e| {
            warn!(error = %e, "Listing phone methods failed, continuing without them");
            Vec::new()
        });

        let result = readiness::evaluate(&methods, &phone_methods, &self.policy);

        info!(
            score = result.score,
            ready = result.ready,
            methods = result.methods.len(),
            "Readiness evaluated"
        );

        Ok(EvaluationReport::new(user, result))
    }
}
