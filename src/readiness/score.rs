use crate::readiness::classify::ReadinessFacts;
use crate::readiness::policy::{ReadinessPolicy, ReadyRule};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    /// 0-100
    pub value: u8,
    pub ready: bool,
}

/// Weighted readiness score and verdict. Pure: same facts, same result.
pub fn score(facts: &ReadinessFacts, policy: &ReadinessPolicy) -> Score {
    let weights = &policy.weights;

    let mut total: u32 = 0;
    if facts.has_authenticator_app {
        total += u32::from(weights.authenticator_app);
    }
    if facts.has_second_factor || facts.has_phone {
        total += u32::from(weights.mfa);
    }
    if facts.has_windows_hello {
        total += u32::from(weights.windows_hello);
    }
    let value = total.min(100) as u8;

    let ready = match policy.ready_rule {
        ReadyRule::Strict => facts.passwordless_active() && facts.has_windows_hello,
        ReadyRule::ScoreThreshold { min } => value >= min,
    };

    Score { value, ready }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readiness::policy::ScoreWeights;

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

    #[test]
    fn test_nothing_registered_scores_zero() {
        let result = score(&facts(), &ReadinessPolicy::default());
        assert_eq!(result, Score { value: 0, ready: false });
    }

    #[test]
    fn test_second_factor_and_phone_count_once() {
        let both = ReadinessFacts {
            has_mfa: true,
            has_second_factor: true,
            has_phone: true,
            ..facts()
        };
        let phone_only = ReadinessFacts {
            has_phone: true,
            ..facts()
        };
        let policy = ReadinessPolicy::default();

        assert_eq!(score(&both, &policy).value, 20);
        assert_eq!(score(&phone_only, &policy).value, 20);
    }

    #[test]
    fn test_authenticator_is_not_credited_twice() {
        let authenticator_only = ReadinessFacts {
            has_mfa: true,
            has_authenticator_app: true,
            ..facts()
        };
        assert_eq!(score(&authenticator_only, &ReadinessPolicy::default()).value, 40);
    }

    #[test]
    fn test_full_registration_scores_hundred() {
        let all = ReadinessFacts {
            has_mfa: true,
            has_second_factor: true,
            has_authenticator_app: true,
            has_phone: true,
            has_windows_hello: true,
            ..facts()
        };
        assert_eq!(score(&all, &ReadinessPolicy::default()).value, 100);
    }

    #[test]
    fn test_score_is_clamped() {
        let policy = ReadinessPolicy {
            weights: ScoreWeights {
                authenticator_app: 90,
                mfa: 90,
                windows_hello: 90,
            },
            ..Default::default()
        };
        let all = ReadinessFacts {
            has_phone: true,
            has_authenticator_app: true,
            has_windows_hello: true,
            ..facts()
        };
        assert_eq!(score(&all, &policy).value, 100);
    }

    #[test]
    fn test_strict_rule_needs_passwordless_and_windows_hello() {
        let policy = ReadinessPolicy::default();

        // High score without a passwordless credential is not ready
        let no_passwordless = ReadinessFacts {
            has_mfa: true,
            has_second_factor: true,
            has_authenticator_app: true,
            has_windows_hello: true,
            ..facts()
        };
        let result = score(&no_passwordless, &policy);
        assert_eq!(result.value, 100);
        assert!(!result.ready);

        let passwordless_without_hello = ReadinessFacts {
            has_mfa: true,
            has_authenticator_app: true,
            authenticator_is_passwordless: true,
            ..facts()
        };
        assert!(!score(&passwordless_without_hello, &policy).ready);

        let ready = ReadinessFacts {
            has_windows_hello: true,
            windows_hello_is_passwordless: true,
            ..facts()
        };
        assert!(score(&ready, &policy).ready);
    }

    #[test]
    fn test_threshold_rule() {
        let policy = ReadinessPolicy {
            ready_rule: ReadyRule::ScoreThreshold { min: 80 },
            ..Default::default()
        };
        let eighty = ReadinessFacts {
            has_authenticator_app: true,
            has_windows_hello: true,
            ..facts()
        };
        let sixty = ReadinessFacts {
            has_authenticator_app: true,
            has_phone: true,
            ..facts()
        };

        assert!(score(&eighty, &policy).ready);
        assert!(!score(&sixty, &policy).ready);
    }

    #[test]
    fn test_score_is_deterministic() {
        let input = ReadinessFacts {
            has_mfa: true,
            has_authenticator_app: true,
            authenticator_is_passwordless: true,
            ..facts()
        };
        let policy = ReadinessPolicy::default();
        assert_eq!(score(&input, &policy), score(&input, &policy));
    }
}
