use crate::config::GraphCredentials;
use crate::error::{ReadinessError, Result};
use oauth2::{
    basic::BasicClient, reqwest::async_http_client, AuthUrl, ClientId, ClientSecret, Scope,
    TokenResponse, TokenUrl,
};
use tracing::{debug, instrument};

pub const MICROSOFT_AUTHORITY: &str = "https://login.microsoftonline.com";
const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Required Microsoft Graph application permissions
pub const REQUIRED_SCOPES: &[&str] = &["User.Read.All", "UserAuthenticationMethod.Read.All"];

/// App-only authentication against Entra ID (client credentials flow)
#[derive(Debug, Clone)]
pub struct GraphAuth {
    credentials: GraphCredentials,
    authority: String,
}

impl GraphAuth {
    pub fn new(credentials: GraphCredentials) -> Self {
        Self::with_authority(credentials, MICROSOFT_AUTHORITY)
    }

    pub fn with_authority(credentials: GraphCredentials, authority: &str) -> Self {
        Self {
            credentials,
            authority: authority.trim_end_matches('/').to_string(),
        }
    }

    /// Acquire a fresh access token. Nothing is cached.
    #[instrument(skip(self), fields(tenant_id = %self.credentials.tenant_id))]
    pub async fn acquire_token(&self) -> Result<String> {
        let tenant_id = &self.credentials.tenant_id;

        let auth_url = AuthUrl::new(format!(
            "{}/{}/oauth2/v2.0/authorize",
            self.authority, tenant_id
        ))
        .map_err(|e| ReadinessError::AuthError(format!("Invalid auth URL: {}", e)))?;

        let token_url = TokenUrl::new(format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority, tenant_id
        ))
        .map_err(|e| ReadinessError::AuthError(format!("Invalid token URL: {}", e)))?;

        let client = BasicClient::new(
            ClientId::new(self.credentials.client_id.clone()),
            Some(ClientSecret::new(self.credentials.client_secret.clone())),
            auth_url,
            Some(token_url),
        );

        let token = client
            .exchange_client_credentials()
            .add_scope(Scope::new(GRAPH_SCOPE.to_string()))
            .request_async(async_http_client)
            .await
            .map_err(|e| {
                ReadinessError::AuthError(format!("Client credentials exchange failed: {}", e))
            })?;

        debug!("Access token acquired");
        Ok(token.access_token().secret().clone())
    }
}

/// Where bearer tokens for Graph come from
#[derive(Debug, Clone)]
pub enum TokenSource {
    ClientCredentials(GraphAuth),
    /// Token acquired by the caller
    Static(String),
}

impl TokenSource {
    pub async fn access_token(&self) -> Result<String> {
        match self {
            TokenSource::ClientCredentials(auth) => auth.acquire_token().await,
            TokenSource::Static(token) if token.trim().is_empty() => Err(
                ReadinessError::AuthError("Empty access token supplied".into()),
            ),
            TokenSource::Static(token) => Ok(token.clone()),
        }
    }
}
