//! Remediation steps
//!
//! Candidates are checked in catalog order and a step is emitted only when its
//! gate holds. Titles, descriptions and links are constants.

use crate::readiness::classify::ReadinessFacts;
use serde::Serialize;

const SECURITY_INFO_URL: &str = "https://mysignins.microsoft.com/security-info";
const WHFB_URL: &str =
    "https://learn.microsoft.com/windows/security/identity-protection/hello-for-business/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub link: &'static str,
}

struct Candidate {
    step: Step,
    gate: fn(&ReadinessFacts) -> bool,
}

const CATALOG: &[Candidate] = &[
    Candidate {
        step: Step {
            id: "auth-app",
            title: "Register Microsoft Authenticator",
            description: "Install and register Microsoft Authenticator (recommended primary passwordless method).",
            link: SECURITY_INFO_URL,
        },
        gate: missing_authenticator,
    },
    Candidate {
        step: Step {
            id: "mfa",
            title: "Enable Multi-Factor Authentication (MFA)",
            description: "Add an extra verification method (phone or authenticator).",
            link: SECURITY_INFO_URL,
        },
        gate: missing_mfa,
    },
    Candidate {
        step: Step {
            id: "whfb",
            title: "Configure Windows Hello for Business",
            description: "Set up Windows Hello (PIN/biometrics) on your Windows device.",
            link: WHFB_URL,
        },
        gate: missing_windows_hello,
    },
];

fn missing_authenticator(facts: &ReadinessFacts) -> bool {
    !facts.has_authenticator_app
}

fn missing_mfa(facts: &ReadinessFacts) -> bool {
    !facts.has_mfa && !facts.has_phone
}

fn missing_windows_hello(facts: &ReadinessFacts) -> bool {
    !facts.has_windows_hello
}

/// Ordered remediation steps for the given facts; empty means nothing to do.
pub fn recommend(facts: &ReadinessFacts) -> Vec<Step> {
    CATALOG
        .iter()
        .filter(|candidate| (candidate.gate)(facts))
        .map(|candidate| candidate.step.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts() -> ReadinessFacts {
        ReadinessFacts {
            has_mfa: false,
            has_second_factor: false,
            has_authenticator_app: false,
            has_phone: false,
            has_windows_hello: false,
            authenticator_is_passwordless: false,
            windows_hello_is_passwordless: false,
            default_method_kind: None,
        }
    }

    fn ids(steps: &[Step]) -> Vec<&'static str> {
        steps.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_all_steps_in_fixed_order() {
        assert_eq!(ids(&recommend(&facts())), vec!["auth-app", "mfa", "whfb"]);
    }

    #[test]
    fn test_phone_satisfies_mfa_step() {
        let input = ReadinessFacts {
            has_phone: true,
            ..facts()
        };
        assert_eq!(ids(&recommend(&input)), vec!["auth-app", "whfb"]);
    }

    #[test]
    fn test_nothing_to_do() {
        let input = ReadinessFacts {
            has_mfa: true,
            has_authenticator_app: true,
            has_windows_hello: true,
            ..facts()
        };
        assert!(recommend(&input).is_empty());
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut ids: Vec<&str> = CATALOG.iter().map(|c| c.step.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), CATALOG.len());
    }
}
