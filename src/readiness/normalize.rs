//! Raw Graph records -> canonical [`AuthMethod`]

use crate::graph::authentication_methods::{RawAuthMethod, RawPhoneMethod};
use crate::readiness::method::{
    AuthMethod, AuthMethodKind, CredentialType, KeyStrength, MethodDetail, PhoneType,
};
use chrono::{DateTime, Utc};

/// Normalize both listings into one ordered sequence, generic methods first.
pub fn normalize_methods(generic: &[RawAuthMethod], phone: &[RawPhoneMethod]) -> Vec<AuthMethod> {
    generic
        .iter()
        .map(normalize_generic)
        .chain(phone.iter().map(normalize_phone))
        .collect()
}

pub fn normalize_generic(raw: &RawAuthMethod) -> AuthMethod {
    let odata_type = raw.odata_type.as_deref().unwrap_or_default();
    let kind = AuthMethodKind::from_odata_type(odata_type);

    let device_display_name = raw
        .device
        .as_ref()
        .and_then(|d| d.display_name.clone())
        .or_else(|| raw.display_name.clone());

    let detail = match kind {
        AuthMethodKind::Password => MethodDetail::Password,
        AuthMethodKind::MicrosoftAuthenticator => MethodDetail::MicrosoftAuthenticator {
            device_display_name,
            is_phone_sign_in_enabled: raw.is_phone_sign_in_enabled,
        },
        AuthMethodKind::Phone => MethodDetail::Phone {
            phone_number: non_empty(raw.phone_number.as_deref()),
            phone_type: raw.phone_type.as_deref().map(PhoneType::parse),
        },
        AuthMethodKind::Fido2 => MethodDetail::Fido2 {
            model: raw.model.clone(),
        },
        AuthMethodKind::SoftwareOath => MethodDetail::SoftwareOath,
        AuthMethodKind::WindowsHelloForBusiness => MethodDetail::WindowsHelloForBusiness {
            device_display_name,
            key_strength: raw.key_strength.as_deref().map(KeyStrength::parse),
            credential_type: raw.credential_type.as_deref().map(CredentialType::parse),
        },
        AuthMethodKind::Unknown => MethodDetail::Unknown,
    };

    AuthMethod {
        id: raw.id.clone(),
        method_type: type_segment(odata_type),
        label: raw.display_name.clone().unwrap_or_default(),
        is_default: raw.is_default.unwrap_or(false),
        created_at: parse_timestamp(raw.created_date_time.as_deref()),
        detail,
    }
}

pub fn normalize_phone(raw: &RawPhoneMethod) -> AuthMethod {
    AuthMethod {
        id: raw.id.clone(),
        method_type: AuthMethodKind::Phone.graph_type().to_string(),
        label: raw.display_name.clone().unwrap_or_default(),
        is_default: false,
        created_at: None,
        detail: MethodDetail::Phone {
            phone_number: non_empty(raw.phone_number.as_deref()),
            phone_type: raw.phone_type.as_deref().map(PhoneType::parse),
        },
    }
}

fn type_segment(odata_type: &str) -> String {
    odata_type
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .trim_start_matches('#')
        .to_string()
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
        .map(|dt| dt.with_timezone(&Utc))
}
