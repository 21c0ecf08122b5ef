use crate::readiness::method::{
    AuthMethod, AuthMethodKind, CredentialType, KeyStrength, MethodDetail,
};
use crate::readiness::policy::ReadinessPolicy;
use serde::Serialize;

/// Facts derived from a user's (deduplicated) method registrations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessFacts {
    #[serde(rename = "hasMFA")]
    pub has_mfa: bool,
    /// A phone or OATH factor besides the Authenticator
    pub has_second_factor: bool,
    pub has_authenticator_app: bool,
    pub has_phone: bool,
    pub has_windows_hello: bool,
    pub authenticator_is_passwordless: bool,
    pub windows_hello_is_passwordless: bool,
    pub default_method_kind: Option<AuthMethodKind>,
}

impl ReadinessFacts {
    /// At least one method can sign in without a password today
    pub fn passwordless_active(&self) -> bool {
        self.authenticator_is_passwordless || self.windows_hello_is_passwordless
    }
}

pub fn classify(methods: &[AuthMethod], policy: &ReadinessPolicy) -> ReadinessFacts {
    let has = |kind: AuthMethodKind| methods.iter().any(|m| m.kind() == kind);

    ReadinessFacts {
        has_mfa: methods.iter().any(|m| policy.counts_as_mfa(m.kind())),
        has_second_factor: methods
            .iter()
            .any(|m| policy.counts_as_second_factor(m.kind())),
        has_authenticator_app: has(AuthMethodKind::MicrosoftAuthenticator),
        has_phone: has(AuthMethodKind::Phone),
        has_windows_hello: has(AuthMethodKind::WindowsHelloForBusiness),
        authenticator_is_passwordless: methods.iter().any(is_passwordless_authenticator),
        windows_hello_is_passwordless: methods.iter().any(is_passwordless_windows_hello),
        default_method_kind: methods.iter().find(|m| m.is_default).map(AuthMethod::kind),
    }
}

/// Passwordless kinds from the policy that the user has not registered
pub fn missing_passwordless_kinds(
    methods: &[AuthMethod],
    policy: &ReadinessPolicy,
) -> Vec<AuthMethodKind> {
    policy
        .passwordless_kinds()
        .into_iter()
        .filter(|kind| !methods.iter().any(|m| m.kind() == *kind))
        .collect()
}

fn is_passwordless_authenticator(method: &AuthMethod) -> bool {
    matches!(
        method.detail,
        MethodDetail::MicrosoftAuthenticator {
            is_phone_sign_in_enabled: Some(true),
            ..
        }
    )
}

fn is_passwordless_windows_hello(method: &AuthMethod) -> bool {
    match method.detail {
        MethodDetail::WindowsHelloForBusiness {
            key_strength,
            credential_type,
            ..
        } => {
            matches!(key_strength, Some(KeyStrength::Normal | KeyStrength::Strong))
                || credential_type == Some(CredentialType::Certificate)
        }
        _ => false,
    }
}
