mod helpers;

use helpers::{SOURCE_KEY, setup_test_app, setup_test_app_with_bad_credentials};

const ASSET_GUID: &str = "0a1b2c3d-0000-4000-8000-000000000001";
const REQUIRED: &str = "Required parameters: asset_id, file_name, \
                        source_storage_account_name, source_storage_account_key, source_container";

fn copy_request(asset_id: &str) -> serde_json::Value {
    serde_json::json!({
        "asset_id": asset_id,
        "file_name": "raw/clip one.mp4",
        "source_storage_account_name": "uploads",
        "source_storage_account_key": SOURCE_KEY,
        "source_container": "incoming"
    })
}

#[tokio::test]
async fn test_start_copy_into_asset_container() {
    let app = setup_test_app();
    app.media
        .insert_asset("video1", ASSET_GUID, "assetstore", "asset-0a1b2c3d");

    let response = app
        .server
        .post("/api/media-services-start-blob-copy-to-asset")
        .json(&copy_request("video1"))
        .await;

    assert_eq!(response.status_code(), 200);
    let data: serde_json::Value = response.json();
    assert_eq!(data["destination_container"], "asset-0a1b2c3d");
    assert_eq!(data["destination_storage_account"], "assetstore");
    assert_eq!(data["copy_id"], "copy-1");
    assert_eq!(data["copy_status"], "pending");

    let copies = app.blobs.copies.lock().unwrap();
    assert_eq!(copies.len(), 1);
    let (source, destination) = &copies[0];
    assert_eq!(source.account_name, "uploads");
    assert_eq!(source.account_key, SOURCE_KEY);
    assert_eq!(source.container, "incoming");
    assert_eq!(source.blob_name, "raw/clip one.mp4");
    assert_eq!(destination.account_name, "assetstore");
    assert_eq!(destination.container, "asset-0a1b2c3d");
    assert_eq!(destination.blob_name, "raw/clip one.mp4");
}

#[tokio::test]
async fn test_start_copy_resolves_asset_by_guid() {
    let app = setup_test_app();
    app.media
        .insert_asset("video1", ASSET_GUID, "assetstore", "asset-0a1b2c3d");

    let response = app
        .server
        .post("/api/media-services-start-blob-copy-to-asset")
        .json(&copy_request(ASSET_GUID))
        .await;

    assert_eq!(response.status_code(), 200);
    let data: serde_json::Value = response.json();
    assert_eq!(data["destination_container"], "asset-0a1b2c3d");
}

#[tokio::test]
async fn test_start_copy_mixes_query_and_body_fields() {
    let app = setup_test_app();
    app.media
        .insert_asset("video1", ASSET_GUID, "assetstore", "asset-0a1b2c3d");

    let mut body = copy_request("video1");
    body.as_object_mut().unwrap().remove("source_container");

    let response = app
        .server
        .post("/api/media-services-start-blob-copy-to-asset")
        .add_query_param("source_container", "from-query")
        .json(&body)
        .await;

    assert_eq!(response.status_code(), 200);
    let copies = app.blobs.copies.lock().unwrap();
    assert_eq!(copies[0].0.container, "from-query");
    assert_eq!(copies[0].0.account_name, "uploads");
}

#[tokio::test]
async fn test_start_copy_with_missing_field_is_rejected() {
    let app = setup_test_app();

    for field in [
        "asset_id",
        "file_name",
        "source_storage_account_name",
        "source_storage_account_key",
        "source_container",
    ] {
        let mut body = copy_request("video1");
        body.as_object_mut().unwrap().remove(field);

        let response = app
            .server
            .post("/api/media-services-start-blob-copy-to-asset")
            .json(&body)
            .await;

        assert_eq!(response.status_code(), 400, "missing {field}");
        assert_eq!(response.text(), REQUIRED);
    }

    assert!(app.blobs.copies.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_start_copy_with_malformed_key_is_rejected() {
    let app = setup_test_app();

    let mut body = copy_request("video1");
    body["source_storage_account_key"] = serde_json::json!("not base64!");

    let response = app
        .server
        .post("/api/media-services-start-blob-copy-to-asset")
        .json(&body)
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.text(), "Invalid parameter: source_storage_account_key");
}

#[tokio::test]
async fn test_start_copy_with_dot_segment_file_name_is_rejected() {
    let app = setup_test_app();
    app.media
        .insert_asset("video1", ASSET_GUID, "assetstore", "asset-0a1b2c3d");

    for file_name in ["raw/../clip.mp4", "./clip.mp4", "raw/.."] {
        let mut body = copy_request("video1");
        body["file_name"] = serde_json::json!(file_name);

        let response = app
            .server
            .post("/api/media-services-start-blob-copy-to-asset")
            .json(&body)
            .await;

        assert_eq!(response.status_code(), 400, "{file_name}");
        assert_eq!(response.text(), "Invalid parameter: file_name");
    }

    assert!(app.blobs.copies.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_start_copy_for_unknown_asset() {
    let app = setup_test_app();

    let response = app
        .server
        .post("/api/media-services-start-blob-copy-to-asset")
        .json(&copy_request("missing"))
        .await;

    assert_eq!(response.status_code(), 500);
    let data: serde_json::Value = response.json();
    assert_eq!(data["error"], "Media services resource not found");
    assert!(app.blobs.copies.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_start_copy_with_rejected_credentials() {
    let app = setup_test_app_with_bad_credentials();

    let response = app
        .server
        .post("/api/media-services-start-blob-copy-to-asset")
        .json(&copy_request("video1"))
        .await;

    assert_eq!(response.status_code(), 500);
    let data: serde_json::Value = response.json();
    assert_eq!(data["error"], "Failed to authenticate with media services");
    assert!(app.blobs.copies.lock().unwrap().is_empty());
}
