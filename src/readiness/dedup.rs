use crate::readiness::method::{AuthMethod, AuthMethodKind};
use std::collections::HashSet;

/// Drop phone methods whose number was already seen earlier in the sequence.
///
/// The same phone shows up in both the generic and the phone listings. The
/// first occurrence wins and relative order is kept; non-phone methods are
/// never removed.
pub fn dedup_phone_methods(methods: Vec<AuthMethod>) -> Vec<AuthMethod> {
    let mut seen: HashSet<Option<String>> = HashSet::new();

    methods
        .into_iter()
        .filter(|method| {
            if method.kind() != AuthMethodKind::Phone {
                return true;
            }
            seen.insert(method.phone_number().map(str::to_string))
        })
        .collect()
}
