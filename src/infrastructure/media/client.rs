use async_trait::async_trait;
use azure_core::auth::Secret;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use super::MediaServicesError;
use super::models::{
    ArmErrorResponse, Asset, AssetContainerPermission, AssetContainerSas, AssetInput, AssetList,
    ListContainerSasInput, Transform, TransformInput, TransformOutput, TransformProperties,
};
use crate::config::settings::MediaAccount;

pub const API_VERSION: &str = "2021-11-01";

/// Operations against one media-services subscription.
#[async_trait]
pub trait MediaServices: Send + Sync {
    /// Creates the asset, or updates it when the name already exists.
    async fn create_or_update_asset(
        &self,
        account: &MediaAccount,
        asset_name: &str,
    ) -> Result<Asset, MediaServicesError>;

    async fn list_container_sas(
        &self,
        account: &MediaAccount,
        asset_name: &str,
        permissions: AssetContainerPermission,
        expiry: OffsetDateTime,
    ) -> Result<Vec<String>, MediaServicesError>;

    async fn get_asset(
        &self,
        account: &MediaAccount,
        asset_name: &str,
    ) -> Result<Option<Asset>, MediaServicesError>;

    /// Looks an asset up by its platform GUID rather than its name.
    async fn find_asset_by_id(
        &self,
        account: &MediaAccount,
        asset_id: &str,
    ) -> Result<Option<Asset>, MediaServicesError>;

    async fn get_transform(
        &self,
        account: &MediaAccount,
        transform_name: &str,
    ) -> Result<Option<Transform>, MediaServicesError>;

    async fn create_or_update_transform(
        &self,
        account: &MediaAccount,
        transform_name: &str,
        outputs: Vec<TransformOutput>,
    ) -> Result<Transform, MediaServicesError>;
}

/// REST client bound to a subscription and an access token.
pub struct MediaServicesClient {
    client: reqwest::Client,
    token: Secret,
    subscription_id: String,
    base_url: String,
}

impl MediaServicesClient {
    pub fn new(
        client: reqwest::Client,
        token: Secret,
        subscription_id: &str,
        base_url: &str,
    ) -> Self {
        Self {
            client,
            token,
            subscription_id: subscription_id.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `{base}/subscriptions/{sub}/resourceGroups/{rg}/providers/Microsoft.Media/`
    /// `mediaServices/{account}/{segments..}?api-version=..`
    fn account_url(
        &self,
        account: &MediaAccount,
        segments: &[&str],
    ) -> Result<Url, MediaServicesError> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| MediaServicesError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend([
                "subscriptions",
                self.subscription_id.as_str(),
                "resourceGroups",
                account.resource_group.as_str(),
                "providers",
                "Microsoft.Media",
                "mediaServices",
                account.account_name.as_str(),
            ])
            .extend(segments);
        url.query_pairs_mut().append_pair("api-version", API_VERSION);
        Ok(url)
    }

    /// Sends the request; `None` on 404, an error on any other failure status.
    async fn execute(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<Option<Response>, MediaServicesError> {
        let response = request
            .bearer_auth(self.token.secret())
            .header("x-ms-client-request-id", Uuid::new_v4().to_string())
            .send()
            .await?;

        let status = response.status();
        debug!("{} -> {}", operation, status);

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let (code, message) = match serde_json::from_str::<ArmErrorResponse>(&body) {
                Ok(parsed) => (parsed.error.code, parsed.error.message),
                Err(_) => (String::new(), body),
            };
            return Err(MediaServicesError::Api {
                operation,
                status,
                code,
                message,
            });
        }

        Ok(Some(response))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<Option<T>, MediaServicesError> {
        match self.execute(operation, request).await? {
            Some(response) => Ok(Some(response.json::<T>().await?)),
            None => Ok(None),
        }
    }
}

/// OData string literal: single quotes are doubled.
fn odata_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[async_trait]
impl MediaServices for MediaServicesClient {
    async fn create_or_update_asset(
        &self,
        account: &MediaAccount,
        asset_name: &str,
    ) -> Result<Asset, MediaServicesError> {
        let url = self.account_url(account, &["assets", asset_name])?;
        self.fetch("create asset", self.client.put(url).json(&AssetInput::default()))
            .await?
            .ok_or_else(|| MediaServicesError::NotFound {
                kind: "media account",
                name: account.account_name.clone(),
            })
    }

    async fn list_container_sas(
        &self,
        account: &MediaAccount,
        asset_name: &str,
        permissions: AssetContainerPermission,
        expiry: OffsetDateTime,
    ) -> Result<Vec<String>, MediaServicesError> {
        let url = self.account_url(account, &["assets", asset_name, "listContainerSas"])?;
        let expiry_time = expiry
            .to_offset(time::UtcOffset::UTC)
            .format(&Rfc3339)?;
        let body = ListContainerSasInput {
            permissions,
            expiry_time,
        };

        let sas: AssetContainerSas = self
            .fetch("list container sas", self.client.post(url).json(&body))
            .await?
            .ok_or_else(|| MediaServicesError::NotFound {
                kind: "asset",
                name: asset_name.to_string(),
            })?;
        Ok(sas.asset_container_sas_urls)
    }

    async fn get_asset(
        &self,
        account: &MediaAccount,
        asset_name: &str,
    ) -> Result<Option<Asset>, MediaServicesError> {
        let url = self.account_url(account, &["assets", asset_name])?;
        self.fetch("get asset", self.client.get(url)).await
    }

    async fn find_asset_by_id(
        &self,
        account: &MediaAccount,
        asset_id: &str,
    ) -> Result<Option<Asset>, MediaServicesError> {
        let mut url = self.account_url(account, &["assets"])?;
        url.query_pairs_mut()
            .append_pair("$filter", &format!("properties/assetId eq {}", odata_quote(asset_id)))
            .append_pair("$top", "1");

        let list: Option<AssetList> = self.fetch("list assets", self.client.get(url)).await?;
        Ok(list.and_then(|list| list.value.into_iter().next()))
    }

    async fn get_transform(
        &self,
        account: &MediaAccount,
        transform_name: &str,
    ) -> Result<Option<Transform>, MediaServicesError> {
        let url = self.account_url(account, &["transforms", transform_name])?;
        self.fetch("get transform", self.client.get(url)).await
    }

    async fn create_or_update_transform(
        &self,
        account: &MediaAccount,
        transform_name: &str,
        outputs: Vec<TransformOutput>,
    ) -> Result<Transform, MediaServicesError> {
        let url = self.account_url(account, &["transforms", transform_name])?;
        let body = TransformInput {
            properties: TransformProperties {
                description: None,
                outputs,
            },
        };

        self.fetch("create transform", self.client.put(url).json(&body))
            .await?
            .ok_or_else(|| MediaServicesError::NotFound {
                kind: "media account",
                name: account.account_name.clone(),
            })
    }
}
