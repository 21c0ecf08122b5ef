//! Canonical authentication method model
//!
//! Graph returns one record shape per method type, each with its own optional
//! fields. Everything the classifier needs is lifted into [`AuthMethod`] here so
//! nothing downstream looks at provider-shaped JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a registered authentication method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthMethodKind {
    Password,
    MicrosoftAuthenticator,
    Phone,
    Fido2,
    SoftwareOath,
    WindowsHelloForBusiness,
    #[serde(other)]
    Unknown,
}

impl AuthMethodKind {
    /// Map a Graph `@odata.type` discriminator to a kind.
    ///
    /// Accepts the full form (`#microsoft.graph.fido2AuthenticationMethod`) or
    /// just the final segment. Comparison is case-insensitive and anything
    /// unrecognized becomes [`AuthMethodKind::Unknown`].
    pub fn from_odata_type(odata_type: &str) -> Self {
        let segment = odata_type.rsplit('.').next().unwrap_or_default().trim();

        [
            AuthMethodKind::Password,
            AuthMethodKind::MicrosoftAuthenticator,
            AuthMethodKind::Phone,
            AuthMethodKind::Fido2,
            AuthMethodKind::SoftwareOath,
            AuthMethodKind::WindowsHelloForBusiness,
        ]
        .into_iter()
        .find(|kind| kind.graph_type().eq_ignore_ascii_case(segment))
        .unwrap_or(AuthMethodKind::Unknown)
    }

    /// Graph type name (final `@odata.type` segment) for this kind
    pub fn graph_type(&self) -> &'static str {
        match self {
            AuthMethodKind::Password => "passwordAuthenticationMethod",
            AuthMethodKind::MicrosoftAuthenticator => "microsoftAuthenticatorAuthenticationMethod",
            AuthMethodKind::Phone => "phoneAuthenticationMethod",
            AuthMethodKind::Fido2 => "fido2AuthenticationMethod",
            AuthMethodKind::SoftwareOath => "softwareOathAuthenticationMethod",
            AuthMethodKind::WindowsHelloForBusiness => {
                "windowsHelloForBusinessAuthenticationMethod"
            }
            AuthMethodKind::Unknown => "unknown",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethodKind::Password => "Password",
            AuthMethodKind::MicrosoftAuthenticator => "Microsoft Authenticator",
            AuthMethodKind::Phone => "Phone",
            AuthMethodKind::Fido2 => "FIDO2 security key",
            AuthMethodKind::SoftwareOath => "Software OATH token",
            AuthMethodKind::WindowsHelloForBusiness => "Windows Hello for Business",
            AuthMethodKind::Unknown => "Unknown",
        }
    }
}

/// Windows Hello for Business key strength as reported by Graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeyStrength {
    Normal,
    Strong,
    Weak,
    #[serde(other)]
    Unknown,
}

impl KeyStrength {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "normal" => KeyStrength::Normal,
            "strong" => KeyStrength::Strong,
            "weak" => KeyStrength::Weak,
            _ => KeyStrength::Unknown,
        }
    }
}

/// Credential backing a Windows Hello for Business registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CredentialType {
    Certificate,
    Key,
    #[serde(other)]
    Unknown,
}

impl CredentialType {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "certificate" => CredentialType::Certificate,
            "key" => CredentialType::Key,
            _ => CredentialType::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhoneType {
    Mobile,
    AlternateMobile,
    Office,
    #[serde(other)]
    Unknown,
}

impl PhoneType {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "mobile" => PhoneType::Mobile,
            "alternatemobile" => PhoneType::AlternateMobile,
            "office" => PhoneType::Office,
            _ => PhoneType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PhoneType::Mobile => "mobile",
            PhoneType::AlternateMobile => "alternate mobile",
            PhoneType::Office => "office",
            PhoneType::Unknown => "unknown",
        }
    }
}

/// Kind-specific fields of a method, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MethodDetail {
    Password,
    #[serde(rename_all = "camelCase")]
    MicrosoftAuthenticator {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        device_display_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        is_phone_sign_in_enabled: Option<bool>,
    },
    #[serde(rename_all = "camelCase")]
    Phone {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        phone_number: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        phone_type: Option<PhoneType>,
    },
    #[serde(rename_all = "camelCase")]
    Fido2 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        model: Option<String>,
    },
    SoftwareOath,
    #[serde(rename_all = "camelCase")]
    WindowsHelloForBusiness {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        device_display_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key_strength: Option<KeyStrength>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        credential_type: Option<CredentialType>,
    },
    Unknown,
}

impl MethodDetail {
    pub fn kind(&self) -> AuthMethodKind {
        match self {
            MethodDetail::Password => AuthMethodKind::Password,
            MethodDetail::MicrosoftAuthenticator { .. } => AuthMethodKind::MicrosoftAuthenticator,
            MethodDetail::Phone { .. } => AuthMethodKind::Phone,
            MethodDetail::Fido2 { .. } => AuthMethodKind::Fido2,
            MethodDetail::SoftwareOath => AuthMethodKind::SoftwareOath,
            MethodDetail::WindowsHelloForBusiness { .. } => AuthMethodKind::WindowsHelloForBusiness,
            MethodDetail::Unknown => AuthMethodKind::Unknown,
        }
    }
}

/// A normalized authentication method registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthMethod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Final segment of the Graph type, kept verbatim for display
    #[serde(rename = "type")]
    pub method_type: String,

    pub label: String,

    pub is_default: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub detail: MethodDetail,
}

impl AuthMethod {
    pub fn kind(&self) -> AuthMethodKind {
        self.detail.kind()
    }

    pub fn phone_number(&self) -> Option<&str> {
        match &self.detail {
            MethodDetail::Phone { phone_number, .. } => phone_number.as_deref(),
            _ => None,
        }
    }

    /// Device name for device-bound methods (Authenticator, Windows Hello)
    pub fn device_display_name(&self) -> Option<&str> {
        match &self.detail {
            MethodDetail::MicrosoftAuthenticator {
                device_display_name,
                ..
            }
            | MethodDetail::WindowsHelloForBusiness {
                device_display_name,
                ..
            } => device_display_name.as_deref(),
            _ => None,
        }
    }
}
