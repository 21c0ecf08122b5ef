//! Entra ID authentication method registrations
//!
//! Provides access to:
//! - All registered methods (`/users/{id}/authentication/methods`)
//! - Phone methods (`/users/{id}/authentication/phoneMethods`)
//!
//! Required permissions:
//! - UserAuthenticationMethod.Read.All (application)

use crate::error::Result;
use crate::graph::{path_segment, GraphClient};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Generic authentication method record as returned by Graph
///
/// Graph returns a different shape per `@odata.type`; every kind-specific field
/// is optional here and sorted out by the normalizer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAuthMethod {
    #[serde(rename = "@odata.type", default)]
    pub odata_type: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub is_default: Option<bool>,
    #[serde(default)]
    pub created_date_time: Option<String>,

    // phoneAuthenticationMethod
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub phone_type: Option<String>,

    // microsoftAuthenticatorAuthenticationMethod
    #[serde(default)]
    pub is_phone_sign_in_enabled: Option<bool>,

    // windowsHelloForBusinessAuthenticationMethod
    #[serde(default)]
    pub key_strength: Option<String>,
    #[serde(default)]
    pub credential_type: Option<String>,
    #[serde(default)]
    pub device: Option<RawDevice>,

    // fido2AuthenticationMethod
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDevice {
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Record from the dedicated phone methods listing (always a phone)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPhoneMethod {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub phone_type: Option<String>,
}

impl RawAuthMethod {
    /// Parse one listing record. A record that does not fit the expected
    /// shape keeps only its `id` and normalizes to an unknown method.
    pub fn from_record(record: Value) -> Self {
        let id = record.get("id").and_then(Value::as_str).map(str::to_string);

        serde_json::from_value(record).unwrap_or_else(|e| {
            warn!(id = id.as_deref().unwrap_or("-"), error = %e, "Malformed authentication method record");
            Self {
                id,
                ..Default::default()
            }
        })
    }
}

impl RawPhoneMethod {
    /// Parse one listing record; malformed records are skipped.
    pub fn from_record(record: Value) -> Option<Self> {
        serde_json::from_value(record)
            .map_err(|e| warn!(error = %e, "Malformed phone method record"))
            .ok()
    }
}

/// List every authentication method registered for a user
pub async fn list_methods(client: &GraphClient, user_id: &str) -> Result<Vec<RawAuthMethod>> {
    let endpoint = format!("users/{}/authentication/methods", path_segment(user_id));
    let records: Vec<Value> = client.get_all_pages(&endpoint).await?;
    Ok(records.into_iter().map(RawAuthMethod::from_record).collect())
}

/// List the phone methods registered for a user
pub async fn list_phone_methods(
    client: &GraphClient,
    user_id: &str,
) -> Result<Vec<RawPhoneMethod>> {
    let endpoint = format!("users/{}/authentication/phoneMethods", path_segment(user_id));
    let records: Vec<Value> = client.get_all_pages(&endpoint).await?;
    Ok(records
        .into_iter()
        .filter_map(RawPhoneMethod::from_record)
        .collect())
}
