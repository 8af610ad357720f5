use std::sync::Arc;

use async_trait::async_trait;
use azure_core::HttpClient;
use azure_core::auth::{AccessToken, TokenCredential};
use azure_identity::ClientSecretCredential;
use time::OffsetDateTime;
use tracing::info;
use url::Url;

use super::MediaServicesError;
use super::client::{MediaServices, MediaServicesClient};
use crate::config::settings::{CloudEndpoints, ServicePrincipal};

/// Produces an authenticated media-services client. Called once per request;
/// tokens are not cached between invocations.
#[async_trait]
pub trait MediaServicesConnector: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn MediaServices>, MediaServicesError>;
}

/// Scope requesting the management resource's default permissions.
pub fn management_scope(resource: &str) -> String {
    format!("{}/.default", resource.trim_end_matches('/'))
}

/// Exchanges the service principal for a management-API bearer token using
/// the client-credentials grant. A fresh credential is built per call, so no
/// token outlives the request that asked for it.
pub async fn acquire_token(
    http: Arc<dyn HttpClient>,
    endpoints: &CloudEndpoints,
    principal: &ServicePrincipal,
) -> Result<AccessToken, MediaServicesError> {
    for (field, value) in [
        ("client_id", &principal.client_id),
        ("client_secret", &principal.client_secret),
        ("subscription_id", &principal.subscription_id),
        ("tenant_id", &principal.tenant_id),
    ] {
        if value.trim().is_empty() {
            return Err(MediaServicesError::MissingCredential(field));
        }
    }

    let credential = ClientSecretCredential::new(
        http,
        Url::parse(&endpoints.authority_host)?,
        principal.tenant_id.clone(),
        principal.client_id.clone(),
        principal.client_secret.clone(),
    );
    let scope = management_scope(&endpoints.management_resource);

    credential
        .get_token(&[scope.as_str()])
        .await
        .map_err(MediaServicesError::Authentication)
}

/// Connector against the real identity platform and management endpoint.
#[derive(Clone)]
pub struct AzureMediaConnector {
    client: reqwest::Client,
    principal: ServicePrincipal,
    endpoints: CloudEndpoints,
}

impl AzureMediaConnector {
    pub fn new(
        client: reqwest::Client,
        principal: ServicePrincipal,
        endpoints: CloudEndpoints,
    ) -> Self {
        Self {
            client,
            principal,
            endpoints,
        }
    }
}

#[async_trait]
impl MediaServicesConnector for AzureMediaConnector {
    async fn connect(&self) -> Result<Arc<dyn MediaServices>, MediaServicesError> {
        let http: Arc<dyn HttpClient> = Arc::new(self.client.clone());
        let token = acquire_token(http, &self.endpoints, &self.principal).await?;
        info!(
            "Signed into media services (token valid for {}s)",
            (token.expires_on - OffsetDateTime::now_utc()).whole_seconds()
        );

        Ok(Arc::new(MediaServicesClient::new(
            self.client.clone(),
            token.token,
            &self.principal.subscription_id,
            &self.endpoints.resource_manager,
        )))
    }
}
