use crate::error::Result;
use crate::graph::{path_segment, GraphClient};
use serde::{Deserialize, Serialize};

const USER_SELECT: &str = "displayName,givenName,surname,mail,userPrincipalName";

/// Basic profile of the user being evaluated
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub mail: Option<String>,
    #[serde(default)]
    pub user_principal_name: Option<String>,
}

impl GraphUser {
    /// Display name, falling back to given name + surname, then the UPN
    pub fn name(&self) -> String {
        if let Some(name) = self.display_name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }

        let parts: Vec<&str> = [self.given_name.as_deref(), self.surname.as_deref()]
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
            .collect();

        if !parts.is_empty() {
            return parts.join(" ");
        }

        self.user_principal_name.clone().unwrap_or_else(|| "-".into())
    }
}

/// Get a user's basic profile
pub async fn get_user(client: &GraphClient, user_id: &str) -> Result<GraphUser> {
    let endpoint = format!("users/{}?$select={}", path_segment(user_id), USER_SELECT);
    client.get(&endpoint).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_prefers_display_name() {
        let user = GraphUser {
            display_name: Some("Adele Vance".into()),
            given_name: Some("Adele".into()),
            ..Default::default()
        };
        assert_eq!(user.name(), "Adele Vance");
    }

    #[test]
    fn test_name_falls_back_to_given_and_surname() {
        let user = GraphUser {
            display_name: Some(String::new()),
            given_name: Some("Adele".into()),
            surname: Some("Vance".into()),
            ..Default::default()
        };
        assert_eq!(user.name(), "Adele Vance");

        let upn_only = GraphUser {
            user_principal_name: Some("adele@contoso.com".into()),
            ..Default::default()
        };
        assert_eq!(upn_only.name(), "adele@contoso.com");
    }
}
