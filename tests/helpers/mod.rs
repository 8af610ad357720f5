//! Test helpers: in-memory platform fakes and a router wired to them.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use azure_core::error::ErrorKind;
use axum_test::TestServer;
use media_functions::app::create_app;
use media_functions::config::settings::{
    AppConfig, CloudEndpoints, MediaAccount, ServicePrincipal, StorageAccount,
};
use media_functions::infrastructure::media::models::{
    Asset, AssetContainerPermission, AssetProperties, Transform, TransformOutput,
    TransformProperties,
};
use media_functions::infrastructure::media::{
    MediaServices, MediaServicesConnector, MediaServicesError,
};
use media_functions::infrastructure::storage::blob::{
    BlobCopier, BlobLocation, CopyReceipt, SourceBlob, StorageError,
};
use media_functions::state::AppState;
use time::OffsetDateTime;

pub const STORAGE_ACCOUNT: &str = "mediastore";
// base64("integration-test-key")
pub const SOURCE_KEY: &str = "aW50ZWdyYXRpb24tdGVzdC1rZXk=";

pub fn test_config() -> AppConfig {
    AppConfig {
        server_port: 0,
        credentials: ServicePrincipal {
            client_id: "app-id".into(),
            client_secret: "app-secret".into(),
            subscription_id: "sub-1".into(),
            tenant_id: "tenant-1".into(),
        },
        media: MediaAccount {
            resource_group: "media-rg".into(),
            account_name: "amsacct".into(),
        },
        storage: StorageAccount {
            account_name: STORAGE_ACCOUNT.into(),
            account_key: SOURCE_KEY.into(),
        },
        endpoints: CloudEndpoints::default(),
    }
}

fn arm_id(kind: &str, name: &str) -> String {
    format!(
        "/subscriptions/sub-1/resourceGroups/media-rg\
         /providers/Microsoft.Media/mediaServices/amsacct/{}/{}",
        kind, name
    )
}

pub struct SasRequest {
    pub asset_name: String,
    pub permissions: AssetContainerPermission,
    pub expiry: OffsetDateTime,
}

/// In-memory media account.
#[derive(Default)]
pub struct FakeMediaServices {
    pub assets: Mutex<HashMap<String, Asset>>,
    pub transforms: Mutex<HashMap<String, Transform>>,
    pub transform_creates: AtomicUsize,
    pub sas_requests: Mutex<Vec<SasRequest>>,
    pub accounts_seen: Mutex<Vec<MediaAccount>>,
}

impl FakeMediaServices {
    pub fn insert_asset(&self, name: &str, asset_id: &str, storage_account: &str, container: &str) {
        self.assets.lock().unwrap().insert(
            name.to_string(),
            Asset {
                name: name.to_string(),
                id: arm_id("assets", name),
                properties: AssetProperties {
                    asset_id: Some(asset_id.to_string()),
                    container: Some(container.to_string()),
                    storage_account_name: Some(storage_account.to_string()),
                    ..AssetProperties::default()
                },
            },
        );
    }

    pub fn insert_transform(&self, transform: Transform) {
        self.transforms.lock().unwrap().insert(transform.name.clone(), transform);
    }

    fn saw(&self, account: &MediaAccount) {
        self.accounts_seen.lock().unwrap().push(account.clone());
    }
}

#[async_trait]
impl MediaServices for FakeMediaServices {
    async fn create_or_update_asset(
        &self,
        account: &MediaAccount,
        asset_name: &str,
    ) -> Result<Asset, MediaServicesError> {
        self.saw(account);
        if !self.assets.lock().unwrap().contains_key(asset_name) {
            self.insert_asset(
                asset_name,
                &format!("id-{asset_name}"),
                STORAGE_ACCOUNT,
                &format!("asset-{asset_name}"),
            );
        }
        Ok(self.assets.lock().unwrap()[asset_name].clone())
    }

    async fn list_container_sas(
        &self,
        account: &MediaAccount,
        asset_name: &str,
        permissions: AssetContainerPermission,
        expiry: OffsetDateTime,
    ) -> Result<Vec<String>, MediaServicesError> {
        self.saw(account);
        self.sas_requests.lock().unwrap().push(SasRequest {
            asset_name: asset_name.to_string(),
            permissions,
            expiry,
        });

        let assets = self.assets.lock().unwrap();
        let asset = assets.get(asset_name).ok_or_else(|| MediaServicesError::NotFound {
            kind: "asset",
            name: asset_name.to_string(),
        })?;
        let container = asset.properties.container.clone().unwrap_or_default();
        Ok(vec![format!(
            "https://{STORAGE_ACCOUNT}.blob.core.windows.net/{container}\
             ?sv=2021-08-06&sr=c&sp=rw&sig=abc"
        )])
    }

    async fn get_asset(
        &self,
        account: &MediaAccount,
        asset_name: &str,
    ) -> Result<Option<Asset>, MediaServicesError> {
        self.saw(account);
        Ok(self.assets.lock().unwrap().get(asset_name).cloned())
    }

    async fn find_asset_by_id(
        &self,
        account: &MediaAccount,
        asset_id: &str,
    ) -> Result<Option<Asset>, MediaServicesError> {
        self.saw(account);
        Ok(self
            .assets
            .lock()
            .unwrap()
            .values()
            .find(|asset| asset.properties.asset_id.as_deref() == Some(asset_id))
            .cloned())
    }

    async fn get_transform(
        &self,
        account: &MediaAccount,
        transform_name: &str,
    ) -> Result<Option<Transform>, MediaServicesError> {
        self.saw(account);
        Ok(self.transforms.lock().unwrap().get(transform_name).cloned())
    }

    async fn create_or_update_transform(
        &self,
        account: &MediaAccount,
        transform_name: &str,
        outputs: Vec<TransformOutput>,
    ) -> Result<Transform, MediaServicesError> {
        self.saw(account);
        self.transform_creates.fetch_add(1, Ordering::SeqCst);

        let transform = Transform {
            name: transform_name.to_string(),
            id: arm_id("transforms", transform_name),
            properties: TransformProperties {
                description: None,
                outputs,
            },
        };
        self.insert_transform(transform.clone());
        Ok(transform)
    }
}

pub struct FakeConnector {
    pub services: Arc<FakeMediaServices>,
    pub reject_credentials: bool,
    pub connects: AtomicUsize,
}

#[async_trait]
impl MediaServicesConnector for FakeConnector {
    async fn connect(&self) -> Result<Arc<dyn MediaServices>, MediaServicesError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if self.reject_credentials {
            return Err(MediaServicesError::Authentication(azure_core::Error::message(
                ErrorKind::Credential,
                "invalid_client",
            )));
        }
        let services: Arc<dyn MediaServices> = self.services.clone();
        Ok(services)
    }
}

#[derive(Default)]
pub struct FakeBlobCopier {
    pub copies: Mutex<Vec<(SourceBlob, BlobLocation)>>,
}

#[async_trait]
impl BlobCopier for FakeBlobCopier {
    async fn start_copy(
        &self,
        source: &SourceBlob,
        destination: &BlobLocation,
    ) -> Result<CopyReceipt, StorageError> {
        let mut copies = self.copies.lock().unwrap();
        copies.push((source.clone(), destination.clone()));
        Ok(CopyReceipt {
            copy_id: format!("copy-{}", copies.len()),
            status: "pending".into(),
        })
    }
}

/// Router over fakes, plus handles to inspect what the handlers did.
pub struct TestApp {
    pub server: TestServer,
    pub media: Arc<FakeMediaServices>,
    pub connector: Arc<FakeConnector>,
    pub blobs: Arc<FakeBlobCopier>,
}

pub fn setup_test_app() -> TestApp {
    build(false)
}

pub fn setup_test_app_with_bad_credentials() -> TestApp {
    build(true)
}

fn build(reject_credentials: bool) -> TestApp {
    let media = Arc::new(FakeMediaServices::default());
    let connector = Arc::new(FakeConnector {
        services: media.clone(),
        reject_credentials,
        connects: AtomicUsize::new(0),
    });
    let blobs = Arc::new(FakeBlobCopier::default());

    let state = AppState::new(test_config(), connector.clone(), blobs.clone());
    let server = TestServer::new(create_app(state)).expect("test server");

    TestApp {
        server,
        media,
        connector,
        blobs,
    }
}
